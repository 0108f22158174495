use std::time::Duration;

use moodline_core::models::report::{ReportKind, ReportSection};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::RemoteUnavailable;
use crate::model::NarrativeModel;
use crate::sections::{parse_reply, render_narrative};

/// Bounded attempts, each under its own timeout, with a fixed pause between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub timeout: Duration,
    pub backoff: Duration,
}

/// A well-formed remote reply. The narrative is rendered from the parsed
/// sections, so text outside them never reaches a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteReply {
    pub narrative: String,
    pub sections: Vec<ReportSection>,
    /// Calls made, including the one that succeeded.
    pub attempts: u32,
}

/// Call the model until it returns a well-formed reply or the attempts run
/// out. Timeouts, invocation errors, and empty or malformed replies all count
/// as failed attempts. Cancellation stops immediately, mid-call or mid-backoff.
pub async fn invoke_with_retry(
    model: &dyn NarrativeModel,
    kind: ReportKind,
    system_prompt: &str,
    prompt: &str,
    policy: &RetryPolicy,
    cancel: &CancellationToken,
) -> Result<RemoteReply, RemoteUnavailable> {
    let mut last_error = RemoteUnavailable::NotConfigured;

    for attempt in 1..=policy.max_attempts {
        let call = tokio::time::timeout(policy.timeout, model.converse(system_prompt, prompt));
        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(RemoteUnavailable::Cancelled),
            outcome = call => outcome,
        };

        let error = match outcome {
            Err(_) => RemoteUnavailable::Timeout(policy.timeout),
            Ok(Err(e)) => e,
            Ok(Ok(text)) => match parse_reply(kind, &text) {
                Ok(sections) => {
                    debug!(attempt, model_id = %model.model_id(), "remote narrative received");
                    return Ok(RemoteReply {
                        narrative: render_narrative(&sections),
                        sections,
                        attempts: attempt,
                    });
                }
                Err(e) => e,
            },
        };

        warn!(
            attempt,
            max_attempts = policy.max_attempts,
            model_id = %model.model_id(),
            reason = error.reason(),
            error = %error,
            "remote narrative attempt failed"
        );
        last_error = error;

        if attempt < policy.max_attempts {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(RemoteUnavailable::Cancelled),
                _ = tokio::time::sleep(policy.backoff) => {}
            }
        }
    }

    Err(last_error)
}
