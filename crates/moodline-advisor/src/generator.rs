use std::sync::Arc;

use moodline_audit::AuditEvent;
use moodline_core::models::context::ReportContext;
use moodline_core::models::report::{Report, ReportKind, ReportSection, ReportSource};
use moodline_instruments::questionnaire::QuestionnaireDefinition;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::AdvisorConfig;
use crate::error::{AdvisorError, RemoteUnavailable};
use crate::fallback::{fallback_for, fallback_narrative};
use crate::model::{BedrockModel, NarrativeModel};
use crate::prompt::{build_history_prompt, build_prompt, system_prompt};
use crate::remote::invoke_with_retry;

/// Produces a `Report` for every scored screening.
///
/// Holds only read-only state, so one generator can serve concurrent
/// requests through a shared reference.
#[derive(Clone)]
pub struct ReportGenerator {
    config: AdvisorConfig,
    definition: Arc<QuestionnaireDefinition>,
    model: Option<Arc<dyn NarrativeModel>>,
}

/// How this call will produce its narrative. Chosen once, up front.
enum Strategy<'a> {
    Remote(&'a dyn NarrativeModel),
    Fallback(RemoteUnavailable),
}

struct Narrative {
    text: String,
    sections: Vec<ReportSection>,
    source: ReportSource,
    model_id: Option<String>,
    /// Remote calls behind a remote narrative.
    attempts: Option<u32>,
    fallback_reason: Option<RemoteUnavailable>,
}

impl ReportGenerator {
    /// A generator with no model attached. Until [`with_model`] is called
    /// every report uses the fallback template.
    ///
    /// [`with_model`]: ReportGenerator::with_model
    pub fn new(config: AdvisorConfig, definition: Arc<QuestionnaireDefinition>) -> Self {
        Self {
            config,
            definition,
            model: None,
        }
    }

    pub fn with_model(mut self, model: Arc<dyn NarrativeModel>) -> Self {
        self.model = Some(model);
        self
    }

    /// Validate the config and, when remote settings are present, connect
    /// the Bedrock model.
    pub async fn from_config(
        config: AdvisorConfig,
        definition: Arc<QuestionnaireDefinition>,
    ) -> Result<Self, AdvisorError> {
        config.validate()?;
        let model = match &config.remote {
            Some(remote) => {
                info!(
                    model_id = %remote.model_id,
                    region = %remote.region,
                    credentials = %remote.credentials.describe(),
                    "remote narrative model configured"
                );
                Some(Arc::new(BedrockModel::from_settings(remote).await) as Arc<dyn NarrativeModel>)
            }
            None => {
                info!("no remote narrative model configured, using the fallback template");
                None
            }
        };
        Ok(Self {
            config,
            definition,
            model,
        })
    }

    pub fn config(&self) -> &AdvisorConfig {
        &self.config
    }

    pub fn definition(&self) -> &QuestionnaireDefinition {
        &self.definition
    }

    /// Generate a screening report. Never fails.
    pub async fn generate(&self, context: ReportContext) -> Report {
        self.generate_with_cancel(context, &CancellationToken::new())
            .await
    }

    /// Generate a screening report, abandoning the remote call if `cancel`
    /// fires. A cancelled call still returns a fallback report.
    pub async fn generate_with_cancel(
        &self,
        context: ReportContext,
        cancel: &CancellationToken,
    ) -> Report {
        self.produce(ReportKind::Screening, context, cancel).await
    }

    /// Generate a history report for the latest screening in `context`, with
    /// `context.history` summarizing the screenings before it. Never fails.
    pub async fn generate_history(&self, context: ReportContext) -> Report {
        self.generate_history_with_cancel(context, &CancellationToken::new())
            .await
    }

    pub async fn generate_history_with_cancel(
        &self,
        context: ReportContext,
        cancel: &CancellationToken,
    ) -> Report {
        self.produce(ReportKind::History, context, cancel).await
    }

    async fn produce(
        &self,
        kind: ReportKind,
        context: ReportContext,
        cancel: &CancellationToken,
    ) -> Report {
        let started = Instant::now();

        let narrative = match self.strategy() {
            Strategy::Remote(model) => {
                let prompt = match kind {
                    ReportKind::Screening => build_prompt(&self.definition, &context),
                    ReportKind::History => build_history_prompt(&self.definition, &context),
                };
                let policy = self.config.retry_policy();
                match invoke_with_retry(model, kind, system_prompt(kind), &prompt, &policy, cancel)
                    .await
                {
                    Ok(reply) => Narrative {
                        text: reply.narrative,
                        sections: reply.sections,
                        source: ReportSource::Remote,
                        model_id: Some(model.model_id().to_string()),
                        attempts: Some(reply.attempts),
                        fallback_reason: None,
                    },
                    Err(cause) => {
                        warn!(
                            user_id = %context.user_id,
                            kind = kind.as_str(),
                            reason = cause.reason(),
                            error = %cause,
                            "remote narrative unavailable, using fallback"
                        );
                        self.fallback(kind, &context, cause)
                    }
                }
            }
            Strategy::Fallback(cause) => {
                info!(
                    user_id = %context.user_id,
                    kind = kind.as_str(),
                    reason = cause.reason(),
                    "using fallback narrative"
                );
                self.fallback(kind, &context, cause)
            }
        };

        let report = Report {
            id: Uuid::new_v4(),
            kind,
            narrative: narrative.text,
            sections: narrative.sections,
            source: narrative.source,
            model_id: narrative.model_id,
            scored: context.scored,
            generated_at: jiff::Timestamp::now(),
            processing_ms: started.elapsed().as_millis() as u64,
        };

        info!(
            user_id = %context.user_id,
            report_id = %report.id,
            kind = kind.as_str(),
            source = report.source.as_str(),
            classification = report.scored.classification.label(),
            attempts = ?narrative.attempts,
            processing_ms = report.processing_ms,
            "report generated"
        );
        AuditEvent::report_generated(
            &context.user_id,
            &report,
            narrative.fallback_reason.as_ref().map(RemoteUnavailable::reason),
        )
        .emit();

        report
    }

    fn strategy(&self) -> Strategy<'_> {
        match (&self.config.remote, &self.model) {
            (Some(_), Some(model)) => Strategy::Remote(model.as_ref()),
            _ => Strategy::Fallback(RemoteUnavailable::NotConfigured),
        }
    }

    fn fallback(
        &self,
        kind: ReportKind,
        context: &ReportContext,
        cause: RemoteUnavailable,
    ) -> Narrative {
        let sections = fallback_for(kind, &context.scored, context.history.as_ref());
        Narrative {
            text: fallback_narrative(&sections),
            sections,
            source: ReportSource::Fallback,
            model_id: None,
            attempts: None,
            fallback_reason: Some(cause),
        }
    }
}
