//! Progress reporting for a running transfer.

use serde::{Deserialize, Serialize};

/// One progress notification from the delegated transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEvent {
    /// Bytes acknowledged so far.
    pub loaded: u64,
    /// Payload size, when the transfer knows it.
    pub total: Option<u64>,
}

impl ProgressEvent {
    pub fn new(loaded: u64, total: Option<u64>) -> Self {
        Self { loaded, total }
    }

    /// `round(loaded / total * 100)` clamped to `0..=100`.
    ///
    /// `None` when the total is unknown or zero.
    pub fn percentage(&self) -> Option<u8> {
        let total = self.total.filter(|t| *t > 0)?;
        let pct = (self.loaded as f64 / total as f64 * 100.0).round();
        Some(pct.clamp(0.0, 100.0) as u8)
    }
}

/// Fold an event into the current percentage. Never moves backwards.
pub fn advance(current: u8, event: &ProgressEvent) -> u8 {
    match event.percentage() {
        Some(pct) => current.max(pct),
        None => current,
    }
}
