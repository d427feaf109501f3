//! Error types for the upload workflow.
//!
//! - [`ConfigError`] - missing destination configuration, detected locally
//! - [`TransferError`] - failures reported by the delegated transfer
//! - [`UploadError`] - what the trigger boundary turns into a display message
//!
//! Conversion into [`UploadError`] is automatic via `From`, so `?` works
//! across the boundary.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shown when a failure carries no message of its own.
pub const GENERIC_FAILURE_MESSAGE: &str = "Upload failed";

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors while validating the destination configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// One or more required variables are absent or blank.
    #[error("Missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<&'static str>),
}

// =============================================================================
// Transfer Errors
// =============================================================================

/// Failures surfaced by the delegated transfer capability.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum TransferError {
    /// The transfer failed with a message of its own (network, permissions,
    /// service-side rejection).
    #[error("{0}")]
    Rejected(String),

    /// The transfer failed without a usable message.
    #[error("transfer failed without a message")]
    Unspecified,

    /// The transfer went away without settling.
    #[error("transfer ended without reporting an outcome")]
    Abandoned,
}

impl TransferError {
    /// Build from an optional failure message. Blank messages count as none.
    pub fn from_message(message: Option<String>) -> Self {
        match message {
            Some(m) if !m.trim().is_empty() => TransferError::Rejected(m),
            _ => TransferError::Unspecified,
        }
    }

    /// Text to show the user.
    pub fn display_message(&self) -> String {
        match self {
            TransferError::Rejected(message) => message.clone(),
            TransferError::Unspecified | TransferError::Abandoned => {
                GENERIC_FAILURE_MESSAGE.to_string()
            }
        }
    }
}

// =============================================================================
// Upload Errors (trigger boundary)
// =============================================================================

/// Everything that can end an upload attempt in the error state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    /// Destination configuration is incomplete.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The delegated transfer failed.
    #[error("Transfer error: {0}")]
    Transfer(#[from] TransferError),
}

impl UploadError {
    /// Normalize to the string shown in the error banner.
    pub fn display_message(&self) -> String {
        match self {
            UploadError::Config(err) => err.to_string(),
            UploadError::Transfer(err) => err.display_message(),
        }
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for a delegated transfer.
pub type TransferResult<T> = Result<T, TransferError>;
