//! External services.
//!
//! # Services
//!
//! - [`upload`] - Managed multi-part upload to S3
//!
//! # JavaScript Bindings
//!
//! The AWS SDK is reached through `src/js/s3_upload.js`.

pub mod upload;

pub use upload::*;
