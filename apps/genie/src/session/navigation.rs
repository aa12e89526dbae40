use std::sync::Mutex;

use tracing::info;

pub trait Navigator: Send + Sync {
    fn go_to(&self, path: &str);
}

/// Navigator that keeps the visited paths, most recent last.
#[derive(Default)]
pub struct HistoryNavigator {
    history: Mutex<Vec<String>>,
}

impl HistoryNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> Vec<String> {
        self.history
            .lock()
            .map(|h| h.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    pub fn current(&self) -> Option<String> {
        self.history().last().cloned()
    }
}

impl Navigator for HistoryNavigator {
    fn go_to(&self, path: &str) {
        info!("navigating to {path}");
        match self.history.lock() {
            Ok(mut history) => history.push(path.to_string()),
            Err(poisoned) => poisoned.into_inner().push(path.to_string()),
        }
    }
}
