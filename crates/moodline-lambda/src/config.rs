use std::env;
use std::time::Duration;

use moodline_advisor::config::{DEFAULT_RETRY_BACKOFF, DEFAULT_TIMEOUT};
use moodline_advisor::{AdvisorConfig, CredentialSource, RemoteSettings};
use moodline_instruments::questionnaire::Thresholds;

const DEFAULT_REGION: &str = "us-east-1";

/// Everything the service reads from its environment, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// S3 bucket for history. `None` keeps history in memory.
    pub bucket: Option<String>,
    pub region: String,
    pub credentials: CredentialSource,
    pub advisor: AdvisorConfig,
    pub thresholds: Thresholds,
}

impl ServiceConfig {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any variable source. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let region = var("AWS_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string());
        let credentials = match (
            var("MOODLINE_AWS_ACCESS_KEY_ID"),
            var("MOODLINE_AWS_SECRET_ACCESS_KEY"),
        ) {
            (Some(access_key_id), Some(secret_access_key)) => CredentialSource::Inline {
                access_key_id,
                secret_access_key,
                session_token: var("MOODLINE_AWS_SESSION_TOKEN"),
            },
            (None, None) => match var("MOODLINE_AWS_PROFILE") {
                Some(profile_name) => CredentialSource::Profile { profile_name },
                None => CredentialSource::DefaultChain,
            },
            _ => {
                return Err(eyre::eyre!(
                    "MOODLINE_AWS_ACCESS_KEY_ID and MOODLINE_AWS_SECRET_ACCESS_KEY must be set together"
                ));
            }
        };

        let timeout = match var("MOODLINE_REMOTE_TIMEOUT_SECS") {
            Some(v) => Duration::from_secs(parse(&v, "MOODLINE_REMOTE_TIMEOUT_SECS")?),
            None => DEFAULT_TIMEOUT,
        };
        let retry_backoff = match var("MOODLINE_RETRY_BACKOFF_MS") {
            Some(v) => Duration::from_millis(parse(&v, "MOODLINE_RETRY_BACKOFF_MS")?),
            None => DEFAULT_RETRY_BACKOFF,
        };

        let mut advisor = AdvisorConfig::default()
            .with_timeout(timeout)
            .with_retry_backoff(retry_backoff);
        if let Some(model_id) = var("MOODLINE_MODEL_ID") {
            advisor = advisor.with_remote(RemoteSettings {
                region: region.clone(),
                model_id,
                credentials: credentials.clone(),
            });
        }
        advisor.validate()?;

        let mut thresholds = Thresholds::default();
        if let Some(v) = var("MOODLINE_SYMPTOM_THRESHOLD") {
            thresholds.symptom_count = parse(&v, "MOODLINE_SYMPTOM_THRESHOLD")?;
        }

        Ok(Self {
            bucket: var("MOODLINE_BUCKET"),
            region,
            credentials,
            advisor,
            thresholds,
        })
    }
}

fn parse<T: std::str::FromStr>(value: &str, name: &str) -> eyre::Result<T>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| eyre::eyre!("{name}={value:?} is invalid: {e}"))
}
