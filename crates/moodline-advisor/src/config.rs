use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::AdvisorError;
use crate::remote::RetryPolicy;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_secs(1);
/// One call plus one retry.
pub const MAX_ATTEMPTS: u32 = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CredentialSource {
    Inline {
        access_key_id: String,
        secret_access_key: String,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        session_token: Option<String>,
    },
    Profile {
        profile_name: String,
    },
    DefaultChain,
}

impl CredentialSource {
    /// Description safe to log: never includes secrets.
    pub fn describe(&self) -> String {
        match self {
            CredentialSource::Inline { access_key_id, .. } => {
                format!("inline ({})", redact_access_key(access_key_id))
            }
            CredentialSource::Profile { profile_name } => format!("profile ({profile_name})"),
            CredentialSource::DefaultChain => "default_chain".to_string(),
        }
    }
}

fn redact_access_key(key: &str) -> String {
    if key.len() <= 8 || !key.is_ascii() {
        return "****".to_string();
    }
    let prefix = &key[..4];
    let suffix = &key[key.len() - 4..];
    format!("{prefix}...{suffix}")
}

/// Where and how to reach the remote narrative model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteSettings {
    pub region: String,
    pub model_id: String,
    pub credentials: CredentialSource,
}

/// Immutable report generator configuration.
///
/// `remote: None` means every report uses the fallback template and no
/// outbound call is ever attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvisorConfig {
    pub remote: Option<RemoteSettings>,
    pub timeout: Duration,
    pub retry_backoff: Duration,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            remote: None,
            timeout: DEFAULT_TIMEOUT,
            retry_backoff: DEFAULT_RETRY_BACKOFF,
        }
    }
}

impl AdvisorConfig {
    pub fn with_remote(mut self, remote: RemoteSettings) -> Self {
        self.remote = Some(remote);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }

    pub fn validate(&self) -> Result<(), AdvisorError> {
        if self.timeout.is_zero() {
            return Err(AdvisorError::Config("timeout must be non-zero".to_string()));
        }
        let Some(remote) = &self.remote else {
            return Ok(());
        };
        if remote.model_id.trim().is_empty() {
            return Err(AdvisorError::Config("model_id is empty".to_string()));
        }
        if remote.region.trim().is_empty() {
            return Err(AdvisorError::Config("region is empty".to_string()));
        }
        match &remote.credentials {
            CredentialSource::Inline {
                access_key_id,
                secret_access_key,
                ..
            } if access_key_id.is_empty() || secret_access_key.is_empty() => Err(
                AdvisorError::Config("inline credentials need both key id and secret".to_string()),
            ),
            CredentialSource::Profile { profile_name } if profile_name.is_empty() => {
                Err(AdvisorError::Config("profile name is empty".to_string()))
            }
            _ => Ok(()),
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: MAX_ATTEMPTS,
            timeout: self.timeout,
            backoff: self.retry_backoff,
        }
    }
}

/// Build an `SdkConfig` from a region and credential source.
pub async fn build_aws_config(region: &str, creds: &CredentialSource) -> aws_config::SdkConfig {
    let mut builder = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(region.to_string()));

    match creds {
        CredentialSource::Inline {
            access_key_id,
            secret_access_key,
            session_token,
        } => {
            builder = builder.credentials_provider(aws_sdk_bedrockruntime::config::Credentials::new(
                access_key_id,
                secret_access_key,
                session_token.clone(),
                None,
                "moodline-config",
            ));
        }
        CredentialSource::Profile { profile_name } => {
            builder = builder.profile_name(profile_name);
        }
        CredentialSource::DefaultChain => {}
    }

    builder.load().await
}
