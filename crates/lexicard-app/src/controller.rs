use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use lexicard_cards::{CardTemplate, MochiClient};
use lexicard_completion::OpenAiClient;
use lexicard_config::Config;
use lexicard_core::Dictionary;
use lexicard_types::AppEvent;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::context::AppContext;
use crate::events::event_loop;
use crate::io::spawn_input_reader;

/// Centralized channel management
pub struct ChannelSet {
    /// Typed lines and request completions, consumed by the event loop
    pub events: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    /// Lets the input reader take the next line
    pub resume: (AsyncSender<()>, AsyncReceiver<()>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            events: kanal::bounded_async(64),
            resume: kanal::bounded_async(1),
        }
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    context: AppContext,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(config: Config, dictionary: Dictionary) -> Self {
        let channels = ChannelSet::new();
        let context = AppContext {
            cards: Arc::new(MochiClient::new(config.cards.base_url.clone())),
            card_template: Arc::new(CardTemplate::from_config(&config.cards)),
            completion: Arc::new(OpenAiClient::new(
                config.completion.api_url.clone(),
                config.completion.model.clone(),
            )),
            dictionary: Arc::new(dictionary),
            config: Arc::new(config),
            event_tx: channels.events.0.clone(),
        };

        Self {
            channels,
            context,
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn spawn_tasks(&self) -> anyhow::Result<JoinSet<anyhow::Result<()>>> {
        let mut tasks = JoinSet::new();

        // Event loop
        tasks.spawn(event_loop(
            self.context.clone(),
            self.channels.events.1.clone(),
            self.channels.resume.0.clone(),
            self.cancel_token.child_token(),
        ));

        // Stdin reader, cancels everything on EOF
        spawn_input_reader(
            tokio::runtime::Handle::current(),
            self.channels.events.0.clone(),
            self.channels.resume.1.clone(),
            self.cancel_token.clone(),
        )?;

        Ok(tasks)
    }

    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel_token
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
