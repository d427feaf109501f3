//! UI Components for the uploader.
//!
//! # Layout Components
//! - [`Hero`] - Title and tagline
//! - [`Footer`] - Page footer
//!
//! # Feature Components
//! - [`UploadSection`] - Drop zone, metadata form and upload trigger
//! - [`MetadataForm`] - Title, description and tag editor
//! - [`ProgressSection`] - Upload progress bar
//! - [`StatusBanner`] - Success / error banners

mod hero;
mod upload;
mod metadata_form;
mod progress;
mod status;
mod footer;

pub use hero::*;
pub use upload::*;
pub use metadata_form::*;
pub use progress::*;
pub use status::*;
pub use footer::*;
