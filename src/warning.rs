// src/warning.rs
use std::sync::{Arc, Mutex};

use tracing::warn;

/// User-facing warning channel. Network failures are surfaced here and
/// nowhere else; callers of the data handler only ever see a success flag.
pub trait WarningSink {
    fn push(&self, message: &str, dismiss: &str);
}

/// Default sink: routes warnings to the log.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogWarningSink;

impl WarningSink for LogWarningSink {
    fn push(&self, message: &str, dismiss: &str) {
        warn!("[WARNING] {message} (dismiss: {dismiss})");
    }
}

/// Keeps every pushed warning so an embedder (or a test) can inspect them.
#[derive(Clone, Debug, Default)]
pub struct CollectingWarningSink {
    messages: Arc<Mutex<Vec<String>>>,
}

impl CollectingWarningSink {
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|msgs| msgs.clone())
            .unwrap_or_default()
    }
}

impl WarningSink for CollectingWarningSink {
    fn push(&self, message: &str, _dismiss: &str) {
        if let Ok(mut msgs) = self.messages.lock() {
            msgs.push(message.to_string());
        }
    }
}
