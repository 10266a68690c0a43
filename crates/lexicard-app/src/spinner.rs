use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Busy indicator on stderr while a request is outstanding
pub struct Spinner {
    tick: Duration,
    bar: Option<ProgressBar>,
}

impl Spinner {
    pub fn new(tick_ms: u64) -> Self {
        Self {
            tick: Duration::from_millis(tick_ms.max(1)),
            bar: None,
        }
    }

    pub fn start(&mut self, label: &'static str) {
        self.stop();

        let style = ProgressStyle::default_spinner()
            .template("{spinner} {msg}...")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        let bar = ProgressBar::new_spinner();
        bar.set_style(style);
        bar.set_message(label);
        bar.enable_steady_tick(self.tick);
        self.bar = Some(bar);
    }

    pub fn stop(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.stop();
    }
}
