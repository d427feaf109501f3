//! Contract with the delegated multi-part transfer.
//!
//! The actual chunking, parallel part upload and retries belong to whatever
//! implements [`Transfer`]. This side only describes what to upload
//! ([`TransferRequest`]) and how results come back ([`TransferHandle`]).
//!
//! ```text
//! start(request) ──▶ TransferHandle
//!                     ├── progress: ProgressEvent, ProgressEvent, ... (closes)
//!                     └── outcome:  Ok(()) | Err(TransferError)   (exactly once)
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use futures::channel::{mpsc, oneshot};
use serde::{Deserialize, Serialize};

use crate::config::Destination;
use crate::error::TransferResult;
use crate::progress::ProgressEvent;

/// Prefix of every object key.
pub const KEY_PREFIX: &str = "uploads/";

/// Size of one part in a multi-part upload (5 MiB).
pub const PART_SIZE: u64 = 5 * 1024 * 1024;

/// Parts uploaded in parallel.
pub const QUEUE_SIZE: u32 = 4;

/// Multi-part tuning handed to the transfer capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferOptions {
    pub part_size: u64,
    pub queue_size: u32,
    /// Keep already uploaded parts when the transfer fails.
    pub leave_parts_on_error: bool,
}

impl Default for TransferOptions {
    fn default() -> Self {
        Self {
            part_size: PART_SIZE,
            queue_size: QUEUE_SIZE,
            leave_parts_on_error: false,
        }
    }
}

/// Object key for a file uploaded at `at`: `uploads/<unix-millis>-<name>`.
pub fn object_key(file_name: &str, at: DateTime<Utc>) -> String {
    format!("{}{}-{}", KEY_PREFIX, at.timestamp_millis(), file_name)
}

/// One upload, fully described.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferRequest<B> {
    pub destination: Destination,
    pub key: String,
    pub body: B,
    pub content_type: String,
    pub metadata: BTreeMap<String, String>,
    pub options: TransferOptions,
}

/// Receiving end of a started transfer.
///
/// `progress` closes once the transfer has settled, so every event is
/// observed before `outcome` is awaited.
#[derive(Debug)]
pub struct TransferHandle {
    pub progress: mpsc::UnboundedReceiver<ProgressEvent>,
    pub outcome: oneshot::Receiver<TransferResult<()>>,
}

/// Sending end of a transfer, kept by the [`Transfer`] implementation.
#[derive(Debug)]
pub struct TransferSink {
    progress: mpsc::UnboundedSender<ProgressEvent>,
    outcome: oneshot::Sender<TransferResult<()>>,
}

/// Linked sink and handle for one transfer.
pub fn transfer_channel() -> (TransferSink, TransferHandle) {
    let (progress_tx, progress_rx) = mpsc::unbounded();
    let (outcome_tx, outcome_rx) = oneshot::channel();
    (
        TransferSink {
            progress: progress_tx,
            outcome: outcome_tx,
        },
        TransferHandle {
            progress: progress_rx,
            outcome: outcome_rx,
        },
    )
}

impl TransferSink {
    /// Report progress. Ignored once the receiver is gone.
    pub fn report(&self, event: ProgressEvent) {
        let _ = self.progress.unbounded_send(event);
    }

    /// Extra sender for callbacks that outlive a borrow of the sink. The
    /// progress stream only closes after every clone is dropped.
    pub fn progress_sender(&self) -> mpsc::UnboundedSender<ProgressEvent> {
        self.progress.clone()
    }

    /// Settle the transfer. Closes this sink's progress sender first.
    pub fn finish(self, result: TransferResult<()>) {
        let TransferSink { progress, outcome } = self;
        drop(progress);
        if outcome.send(result).is_err() {
            log::debug!("transfer outcome dropped: nobody is listening");
        }
    }
}

/// The delegated multi-part transfer.
pub trait Transfer {
    /// Body handle type (a browser `File`, a byte buffer, ...).
    type Body;

    /// Start uploading. Must not block; results arrive through the handle.
    fn start(&self, request: TransferRequest<Self::Body>) -> TransferHandle;
}

impl<T: Transfer + ?Sized> Transfer for &T {
    type Body = T::Body;

    fn start(&self, request: TransferRequest<Self::Body>) -> TransferHandle {
        (**self).start(request)
    }
}
