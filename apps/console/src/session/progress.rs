//! Upload progress and the busy indicator, published outside the session lock
//! so the page can poll them while a batch is running.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProgressSnapshot {
    /// Loading-indicator text; `None` when idle.
    pub busy: Option<String>,
    pub percent: u8,
    pub label: String,
}

impl ProgressSnapshot {
    /// The bar is hidden at 0%.
    pub fn visible(&self) -> bool {
        self.percent > 0
    }
}

/// Percent reported while the `done`-th of `total` files is in flight (1-based),
/// i.e. `round(100 * done / total)`.
pub fn batch_percent(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let done = done.min(total);
    ((200 * done + total) / (2 * total)) as u8
}

#[derive(Clone)]
pub struct ProgressTracker {
    tx: Arc<watch::Sender<ProgressSnapshot>>,
}

impl ProgressTracker {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(ProgressSnapshot::default());
        Self { tx: Arc::new(tx) }
    }

    #[cfg(test)]
    pub fn subscribe(&self) -> watch::Receiver<ProgressSnapshot> {
        self.tx.subscribe()
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        self.tx.borrow().clone()
    }

    pub fn set_busy(&self, text: &str) {
        self.tx.send_modify(|p| p.busy = Some(text.to_string()));
    }

    pub fn clear_busy(&self) {
        self.tx.send_modify(|p| p.busy = None);
    }

    pub fn update(&self, percent: u8, label: impl Into<String>) {
        let label = label.into();
        self.tx.send_modify(|p| {
            p.percent = percent.min(100);
            p.label = label;
        });
    }

    pub fn reset(&self) {
        self.update(0, "");
    }
}
