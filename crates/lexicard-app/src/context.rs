use std::sync::Arc;

use kanal::AsyncSender;
use lexicard_cards::{CardService, CardTemplate};
use lexicard_completion::CompletionProvider;
use lexicard_config::Config;
use lexicard_core::Dictionary;
use lexicard_types::AppEvent;

/// Collaborators shared by every request task
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    pub dictionary: Arc<Dictionary>,
    pub cards: Arc<dyn CardService>,
    pub card_template: Arc<CardTemplate>,
    pub completion: Arc<dyn CompletionProvider>,
    /// Where finished requests report back
    pub event_tx: AsyncSender<AppEvent>,
}
