use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use moodline_audit::AuditEvent;
use moodline_core::models::answer::AnswerSet;
use moodline_core::models::context::ReportContext;
use moodline_core::models::history::HistoryPoint;
use moodline_core::models::report::Report;
use moodline_core::models::score::ScoredResult;
use moodline_instruments::trend::summarize_history;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Serialize)]
pub struct ScreeningResponse {
    pub submission_id: Uuid,
    pub scored: ScoredResult,
    pub report: Report,
}

/// Score a submission, write its report, and store both.
///
/// Invalid answers are rejected before anything else happens. An unreadable
/// history only drops the trend from the report.
pub async fn create_screening(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(answers): Json<AnswerSet>,
) -> Result<(StatusCode, Json<ScreeningResponse>), ApiError> {
    let scored = state.engine.score(&answers)?;
    info!(
        user_id = %user.sub,
        symptom_count = scored.symptom_count,
        classification = scored.classification.label(),
        "screening scored"
    );

    let history = match state.history.get_history(&user.sub).await {
        Ok(records) => {
            let points: Vec<HistoryPoint> = records.iter().map(HistoryPoint::from).collect();
            summarize_history(&points)
        }
        Err(e) => {
            warn!(user_id = %user.sub, error = %e, "history unavailable, reporting without trend");
            None
        }
    };

    let context = ReportContext::new(user.sub.clone(), scored.clone()).with_history(history);
    let report = state.generator.generate(context).await;

    let submission_id = state
        .history
        .save(&user.sub, &answers, &scored, &report)
        .await?;
    AuditEvent::submission_saved(&user.sub, submission_id, &report).emit();

    Ok((
        StatusCode::CREATED,
        Json(ScreeningResponse {
            submission_id,
            scored,
            report,
        }),
    ))
}
