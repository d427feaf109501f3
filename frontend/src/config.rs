//! Application configuration.
//!
//! The destination (region, credentials, bucket) is captured from the
//! environment when the WASM bundle is built, the same way a static page
//! bundler inlines its environment. It is validated once by
//! [`load_destination`] and handed to the uploader explicitly.

use s3drop::config::{
    ENV_ACCESS_KEY_ID, ENV_BUCKET_NAME, ENV_ENDPOINT, ENV_REGION, ENV_SECRET_ACCESS_KEY,
};
use s3drop::{ConfigResult, Destination};

/// Page title.
pub const APP_TITLE: &str = "S3 File Uploader";

/// Line under the title.
pub const APP_TAGLINE: &str = "Easily upload your files to Amazon S3";

/// Hint shown in the empty drop zone.
pub const DROP_HINT: &str = "Drag and drop your file here or click to browse";

/// Validate the build-time destination configuration.
pub fn load_destination() -> ConfigResult<Destination> {
    Destination::from_lookup(build_env)
}

fn build_env(key: &str) -> Option<String> {
    let value = match key {
        ENV_REGION => option_env!("AWS_REGION"),
        ENV_ACCESS_KEY_ID => option_env!("AWS_ACCESS_KEY_ID"),
        ENV_SECRET_ACCESS_KEY => option_env!("AWS_SECRET_ACCESS_KEY"),
        ENV_BUCKET_NAME => option_env!("AWS_BUCKET_NAME"),
        ENV_ENDPOINT => option_env!("AWS_S3_ENDPOINT"),
        _ => None,
    };
    value.map(str::to_string)
}
