//! # s3drop - upload workflow for a drag-and-drop S3 uploader
//!
//! Everything the uploader widget does that is not rendering: selecting a
//! file, editing metadata, deciding when a transfer starts, folding progress
//! into a percentage and turning failures into a message. The multi-part
//! transfer itself is delegated to an implementation of [`Transfer`].
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐  Action   ┌─────────────┐  Command   ┌─────────────┐
//! │  UI events  │──────────▶│  Uploader   │───────────▶│    shell    │
//! │ (drop, tag) │           │ (dispatch)  │            │ (spawn, ⏱)  │
//! └─────────────┘           └─────────────┘            └──────┬──────┘
//!                                  ▲   progress / outcome     │
//!                                  └────── drive_transfer ◀───┘
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types and display normalization
//! - [`config`] - Destination configuration
//! - [`models`] - Selected file and status
//! - [`metadata`] - Title, description and the tag editor
//! - [`progress`] - Percentage computation
//! - [`transfer`] - Contract with the delegated transfer
//! - [`workflow`] - The reducer

// Core modules
pub mod error;
pub mod models;

// Configuration
pub mod config;

// Form
pub mod metadata;

// Transfer
pub mod progress;
pub mod transfer;

// State machine
pub mod workflow;

#[cfg(test)]
pub(crate) mod testing;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    ConfigError,
    ConfigResult,
    TransferError,
    TransferResult,
    UploadError,
    GENERIC_FAILURE_MESSAGE,
};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use config::{Credentials, Destination};
pub use metadata::Metadata;
pub use models::{format_size, PickedFile, SelectedFile, UploadStatus};
pub use progress::ProgressEvent;

// =============================================================================
// Re-exports - Transfer
// =============================================================================

pub use transfer::{
    object_key,
    transfer_channel,
    Transfer,
    TransferHandle,
    TransferOptions,
    TransferRequest,
    TransferSink,
    PART_SIZE,
    QUEUE_SIZE,
};

// =============================================================================
// Re-exports - Workflow
// =============================================================================

pub use workflow::{
    drive_transfer,
    Action,
    Command,
    Uploader,
    UploaderState,
    SUCCESS_RESET_DELAY,
};
