use std::collections::HashMap;
use std::time::Duration;

use moodline_advisor::CredentialSource;
use moodline_lambda::config::ServiceConfig;

fn load(vars: &[(&str, &str)]) -> eyre::Result<ServiceConfig> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    ServiceConfig::from_lookup(|name| vars.get(name).cloned())
}

#[test]
fn empty_environment_runs_fallback_only_in_memory() {
    let config = load(&[]).unwrap();
    assert_eq!(config.bucket, None);
    assert_eq!(config.region, "us-east-1");
    assert_eq!(config.credentials, CredentialSource::DefaultChain);
    assert!(config.advisor.remote.is_none());
    assert_eq!(config.advisor.timeout, Duration::from_secs(30));
    assert_eq!(config.advisor.retry_backoff, Duration::from_secs(1));
    assert_eq!(config.thresholds.symptom_count, 7);
}

#[test]
fn model_id_enables_remote_with_shared_credentials() {
    let config = load(&[
        ("MOODLINE_MODEL_ID", "us.anthropic.claude-model"),
        ("AWS_REGION", "eu-west-1"),
        ("MOODLINE_AWS_PROFILE", "clinic"),
        ("MOODLINE_REMOTE_TIMEOUT_SECS", "10"),
        ("MOODLINE_RETRY_BACKOFF_MS", "250"),
        ("MOODLINE_BUCKET", "moodline-history"),
    ])
    .unwrap();

    let remote = config.advisor.remote.unwrap();
    assert_eq!(remote.model_id, "us.anthropic.claude-model");
    assert_eq!(remote.region, "eu-west-1");
    assert_eq!(
        remote.credentials,
        CredentialSource::Profile {
            profile_name: "clinic".to_string()
        }
    );
    assert_eq!(config.advisor.timeout, Duration::from_secs(10));
    assert_eq!(config.advisor.retry_backoff, Duration::from_millis(250));
    assert_eq!(config.bucket.as_deref(), Some("moodline-history"));
}

#[test]
fn blank_model_id_means_no_remote() {
    let config = load(&[("MOODLINE_MODEL_ID", "  ")]).unwrap();
    assert!(config.advisor.remote.is_none());
}

#[test]
fn inline_keys_win_over_profile() {
    let config = load(&[
        ("MOODLINE_AWS_ACCESS_KEY_ID", "AKIAEXAMPLE1234"),
        ("MOODLINE_AWS_SECRET_ACCESS_KEY", "secret"),
        ("MOODLINE_AWS_PROFILE", "ignored"),
    ])
    .unwrap();
    assert!(matches!(config.credentials, CredentialSource::Inline { .. }));
}

#[test]
fn half_inline_credentials_are_rejected() {
    assert!(load(&[("MOODLINE_AWS_ACCESS_KEY_ID", "AKIAEXAMPLE1234")]).is_err());
}

#[test]
fn malformed_numbers_are_rejected() {
    assert!(load(&[("MOODLINE_REMOTE_TIMEOUT_SECS", "soon")]).is_err());
    assert!(load(&[("MOODLINE_REMOTE_TIMEOUT_SECS", "0")]).is_err());
    assert!(load(&[("MOODLINE_SYMPTOM_THRESHOLD", "-1")]).is_err());
}

#[test]
fn threshold_override_is_read() {
    let config = load(&[("MOODLINE_SYMPTOM_THRESHOLD", "8")]).unwrap();
    assert_eq!(config.thresholds.symptom_count, 8);
}
