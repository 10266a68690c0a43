//! Card records exchanged with the user's editor as TOML.

use lexicard_types::EditRecord;
use serde::{Deserialize, Serialize};

use crate::error::RecordError;

const HEADER: &str = "# Edit the cards below, then save and quit to create them.\n\
                      # Each [[card]] becomes a forward and a reverse card.\n\n";

#[derive(Serialize)]
struct SheetRef<'a> {
    card: &'a [EditRecord],
}

#[derive(Deserialize)]
struct Sheet {
    #[serde(default)]
    card: Vec<EditRecord>,
}

pub fn encode_records(records: &[EditRecord]) -> Result<String, RecordError> {
    let body = toml::to_string(&SheetRef { card: records })?;
    Ok(format!("{HEADER}{body}"))
}

pub fn decode_records(text: &str) -> Result<Vec<EditRecord>, RecordError> {
    let sheet: Sheet = toml::from_str(text)?;
    if sheet.card.is_empty() {
        return Err(RecordError::Empty);
    }
    Ok(sheet.card)
}
