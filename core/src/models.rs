//! Domain models for the upload widget.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Descriptor of the file the user picked.
///
/// The bytes themselves stay in the body handle held next to the state
/// (see [`PickedFile`]); the descriptor is what gets rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedFile {
    pub name: String,
    /// MIME type as reported by the browser. May be empty.
    pub content_type: String,
    /// Size in bytes.
    pub size: u64,
}

/// A file coming out of a drop or a picker: descriptor plus body handle.
#[derive(Debug, Clone, PartialEq)]
pub struct PickedFile<B> {
    pub info: SelectedFile,
    pub body: B,
}

impl<B> PickedFile<B> {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, size: u64, body: B) -> Self {
        Self {
            info: SelectedFile {
                name: name.into(),
                content_type: content_type.into(),
                size,
            },
            body,
        }
    }
}

/// Where the workflow stands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    #[default]
    Idle,
    Uploading,
    Success,
    Error,
}

impl fmt::Display for UploadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UploadStatus::Idle => "idle",
            UploadStatus::Uploading => "uploading",
            UploadStatus::Success => "success",
            UploadStatus::Error => "error",
        };
        f.write_str(s)
    }
}

/// Human readable byte size, e.g. `4.2 MB`.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];
    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    let mut value = bytes as f64;
    let mut unit = "B";
    for u in UNITS {
        if value < 1024.0 {
            break;
        }
        value /= 1024.0;
        unit = u;
    }
    format!("{:.1} {}", value, unit)
}
