//! Destination configuration.
//!
//! The bucket, region and credential pair are read once at start-up,
//! validated here, and then handed to the workflow explicitly. Nothing else
//! in the crate looks at the environment.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Region of the bucket.
pub const ENV_REGION: &str = "AWS_REGION";
/// Access key id of the credential pair.
pub const ENV_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
/// Secret half of the credential pair.
pub const ENV_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";
/// Target bucket.
pub const ENV_BUCKET_NAME: &str = "AWS_BUCKET_NAME";
/// Optional endpoint override (S3-compatible services, local testing).
pub const ENV_ENDPOINT: &str = "AWS_S3_ENDPOINT";

/// Static credential pair used to sign requests.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .finish()
    }
}

/// Where uploads go.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub region: String,
    pub bucket: String,
    pub credentials: Credentials,
    /// Endpoint override; `None` means the regional AWS endpoint.
    pub endpoint: Option<String>,
}

impl Destination {
    /// Build from any key lookup. Blank values count as missing, and every
    /// missing required variable is reported at once.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let region = get(ENV_REGION);
        let access_key_id = get(ENV_ACCESS_KEY_ID);
        let secret_access_key = get(ENV_SECRET_ACCESS_KEY);
        let bucket = get(ENV_BUCKET_NAME);

        let missing: Vec<&'static str> = [
            (ENV_REGION, region.is_none()),
            (ENV_ACCESS_KEY_ID, access_key_id.is_none()),
            (ENV_SECRET_ACCESS_KEY, secret_access_key.is_none()),
            (ENV_BUCKET_NAME, bucket.is_none()),
        ]
        .into_iter()
        .filter_map(|(key, absent)| absent.then_some(key))
        .collect();

        match (region, access_key_id, secret_access_key, bucket) {
            (Some(region), Some(access_key_id), Some(secret_access_key), Some(bucket)) => {
                Ok(Self {
                    region,
                    bucket,
                    credentials: Credentials {
                        access_key_id,
                        secret_access_key,
                    },
                    endpoint: get(ENV_ENDPOINT),
                })
            }
            _ => Err(ConfigError::Missing(missing)),
        }
    }

    /// Build from the process environment.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Endpoint the client talks to. Path-style addressing is always used,
    /// so the bucket is not part of the host.
    pub fn endpoint_url(&self) -> String {
        match &self.endpoint {
            Some(endpoint) => endpoint.trim_end_matches('/').to_string(),
            None => format!("https://s3.{}.amazonaws.com", self.region),
        }
    }
}
