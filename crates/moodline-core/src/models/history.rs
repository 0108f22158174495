use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::answer::AnswerSet;
use super::report::Report;
use super::score::ScoredResult;

/// A persisted submission. Append-only: records are never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct HistoryRecord {
    pub user_id: String,
    pub submission_id: Uuid,
    pub answers: AnswerSet,
    pub scored: ScoredResult,
    pub report: Report,
    pub created_at: jiff::Timestamp,
}

/// A single prior score, the input to trend analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub assessed_at: jiff::Timestamp,
    pub symptom_count: u32,
}

impl From<&HistoryRecord> for HistoryPoint {
    fn from(record: &HistoryRecord) -> Self {
        Self {
            assessed_at: record.created_at,
            symptom_count: record.scored.symptom_count,
        }
    }
}

/// Direction of change across a user's prior screenings. Lower symptom counts
/// are improvement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Trend {
    SignificantImprovement,
    ModerateImprovement,
    MildImprovement,
    Stable,
    MildDeterioration,
    ModerateDeterioration,
    SignificantDeterioration,
}

impl Trend {
    pub fn label(&self) -> &'static str {
        match self {
            Trend::SignificantImprovement => "significant improvement",
            Trend::ModerateImprovement => "moderate improvement",
            Trend::MildImprovement => "mild improvement",
            Trend::Stable => "stable",
            Trend::MildDeterioration => "mild deterioration",
            Trend::ModerateDeterioration => "moderate deterioration",
            Trend::SignificantDeterioration => "significant deterioration",
        }
    }
}

/// Summary of a user's prior screenings, fed into the report prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct HistorySummary {
    pub prior_assessments: u32,
    /// Mean of the earliest scores.
    pub baseline_score: f64,
    /// Symptom count of the most recent prior screening.
    pub previous_score: u32,
    pub trend: Trend,
    pub trend_confidence: f64,
    pub first_assessed_at: jiff::Timestamp,
    pub last_assessed_at: jiff::Timestamp,
}
