use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use moodline_audit::AuditEvent;
use moodline_core::models::context::ReportContext;
use moodline_core::models::history::{HistoryPoint, HistoryRecord};
use moodline_core::models::report::{Report, ReportSource};
use moodline_core::models::score::Classification;
use moodline_export::render_default;
use moodline_instruments::trend::summarize_history;
use serde::Serialize;
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Serialize)]
pub struct SubmissionSummary {
    pub submission_id: Uuid,
    pub created_at: jiff::Timestamp,
    pub symptom_count: u32,
    pub classification: Classification,
    pub source: ReportSource,
}

/// The caller's submissions, most recent first.
pub async fn list_history(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<SubmissionSummary>>, ApiError> {
    let records = state.history.get_history(&user.sub).await?;
    AuditEvent::history_read(&user.sub, "*").emit();

    Ok(Json(
        records
            .into_iter()
            .map(|r| SubmissionSummary {
                submission_id: r.submission_id,
                created_at: r.created_at,
                symptom_count: r.scored.symptom_count,
                classification: r.scored.classification,
                source: r.report.source,
            })
            .collect(),
    ))
}

pub async fn get_submission(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<HistoryRecord>, ApiError> {
    let record = state.history.get_by_submission_id(&user.sub, id).await?;
    AuditEvent::history_read(&user.sub, id.to_string()).emit();
    Ok(Json(record))
}

/// A submission rendered as a Markdown document.
pub async fn export_submission(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let record = state.history.get_by_submission_id(&user.sub, id).await?;
    let document = render_default(&record)?;
    AuditEvent::history_read(&user.sub, id.to_string())
        .with_details(serde_json::json!({ "export": "markdown" }))
        .emit();

    Ok((
        [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
        document,
    ))
}

#[derive(Serialize)]
pub struct HistoryReportResponse {
    /// The screening the report is anchored on.
    pub latest_submission_id: Uuid,
    pub screenings: usize,
    pub report: Report,
}

/// A trend report across all of the caller's screenings. Generated on
/// request and not stored.
pub async fn history_report(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<HistoryReportResponse>, ApiError> {
    let records = state.history.get_history(&user.sub).await?;
    let Some((latest, earlier)) = records.split_first() else {
        return Err(ApiError::NotFound("no screenings on record".to_string()));
    };
    AuditEvent::history_read(&user.sub, "*")
        .with_details(serde_json::json!({ "report": "history" }))
        .emit();

    let prior: Vec<HistoryPoint> = earlier.iter().map(HistoryPoint::from).collect();
    let context = ReportContext::new(user.sub.clone(), latest.scored.clone())
        .with_history(summarize_history(&prior))
        .with_timeline(records.iter().map(HistoryPoint::from).collect());
    let report = state.generator.generate_history(context).await;

    Ok(Json(HistoryReportResponse {
        latest_submission_id: latest.submission_id,
        screenings: records.len(),
        report,
    }))
}
