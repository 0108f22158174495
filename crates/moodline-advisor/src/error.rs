use std::time::Duration;

use thiserror::Error;

/// Why the remote strategy did not produce a narrative.
///
/// Never surfaced to end users: the generator logs it and falls back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteUnavailable {
    #[error("no remote model configured")]
    NotConfigured,

    #[error("remote call timed out after {0:?}")]
    Timeout(Duration),

    #[error("model invocation failed: {0}")]
    Invocation(String),

    #[error("model returned an empty response")]
    EmptyResponse,

    #[error("model response contained no recognizable sections")]
    Malformed,

    #[error("remote call cancelled")]
    Cancelled,
}

impl RemoteUnavailable {
    /// Short machine-readable cause for logs and audit events.
    pub fn reason(&self) -> &'static str {
        match self {
            RemoteUnavailable::NotConfigured => "not_configured",
            RemoteUnavailable::Timeout(_) => "timeout",
            RemoteUnavailable::Invocation(_) => "invocation",
            RemoteUnavailable::EmptyResponse => "empty_response",
            RemoteUnavailable::Malformed => "malformed",
            RemoteUnavailable::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("invalid advisor configuration: {0}")]
    Config(String),
}
