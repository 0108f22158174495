use moodline_core::models::report::Report;
use serde::Serialize;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

/// A structured audit event for logging screening actions.
///
/// Emitted via `tracing` so it lands in CloudWatch Logs next to the request
/// logs. Every generated report and every saved submission produces one.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEvent {
    pub action: String,
    pub resource_type: String,
    pub resource_id: String,
    pub user_sub: String,
    pub details: Option<serde_json::Value>,
}

impl AuditEvent {
    pub fn new(
        action: impl Into<String>,
        resource_type: impl Into<String>,
        resource_id: impl Into<String>,
        user_sub: impl Into<String>,
    ) -> Self {
        Self {
            action: action.into(),
            resource_type: resource_type.into(),
            resource_id: resource_id.into(),
            user_sub: user_sub.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// A report was produced. `reason` explains a fallback, if there was one.
    pub fn report_generated(user_sub: &str, report: &Report, reason: Option<&str>) -> Self {
        Self::new("report.generated", "report", report.id.to_string(), user_sub).with_details(
            json!({
                "kind": report.kind.as_str(),
                "source": report.source.as_str(),
                "model_id": report.model_id,
                "classification": report.scored.classification,
                "processing_ms": report.processing_ms,
                "fallback_reason": reason,
            }),
        )
    }

    pub fn submission_saved(user_sub: &str, submission_id: Uuid, report: &Report) -> Self {
        Self::new(
            "submission.saved",
            "submission",
            submission_id.to_string(),
            user_sub,
        )
        .with_details(json!({
            "report_id": report.id,
            "source": report.source.as_str(),
        }))
    }

    pub fn history_read(user_sub: &str, resource_id: impl Into<String>) -> Self {
        Self::new("history.read", "submission", resource_id, user_sub)
    }

    /// Emit this audit event via tracing.
    pub fn emit(&self) {
        let details = self
            .details
            .as_ref()
            .map(serde_json::Value::to_string)
            .unwrap_or_default();
        info!(
            audit.action = %self.action,
            audit.resource_type = %self.resource_type,
            audit.resource_id = %self.resource_id,
            audit.user_sub = %self.user_sub,
            audit.details = %details,
            "audit event"
        );
    }
}
