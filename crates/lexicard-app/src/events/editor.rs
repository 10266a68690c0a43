use std::fs;
use std::io::Write;
use std::process::Command;

use anyhow::{Context, bail};

/// Let the user edit `text` in their editor, returning the saved contents
pub async fn edit_text(editor: String, text: String) -> Result<String, String> {
    tokio::task::spawn_blocking(move || edit_blocking(&editor, &text))
        .await
        .map_err(|e| format!("editor task failed: {e}"))?
        .map_err(|e| format!("{e:#}"))
}

fn edit_blocking(editor: &str, text: &str) -> anyhow::Result<String> {
    let mut file = tempfile::Builder::new()
        .prefix("lexicard_")
        .suffix(".toml")
        .tempfile()
        .context("failed to create temp file")?;
    file.write_all(text.as_bytes())
        .and_then(|_| file.flush())
        .context("failed to write temp file")?;

    // `code --wait` style commands carry their own arguments
    let mut parts = editor.split_whitespace();
    let Some(program) = parts.next() else {
        bail!("no editor configured");
    };
    tracing::debug!("Launching {editor} on {}", file.path().display());

    let status = Command::new(program)
        .args(parts)
        .arg(file.path())
        .status()
        .with_context(|| format!("failed to launch {program}"))?;
    if !status.success() {
        bail!("{editor} exited with {status}");
    }

    fs::read_to_string(file.path()).context("failed to read edited file")
}
