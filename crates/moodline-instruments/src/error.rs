use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

/// A single problem found in an `AnswerSet`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum ValidationIssue {
    #[error("expected {expected} responses, got {actual}")]
    ItemCount { expected: u32, actual: u32 },

    #[error("{item_id}: '{value}' is not one of [{}]", .allowed.join(", "))]
    OutOfDomain {
        item_id: String,
        value: String,
        allowed: Vec<String>,
    },
}

/// An `AnswerSet` was rejected before scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error(
    "{questionnaire}: invalid answers: {}",
    .issues.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
)]
pub struct ValidationError {
    pub questionnaire: String,
    pub issues: Vec<ValidationIssue>,
}

#[derive(Debug, Error)]
pub enum InstrumentError {
    #[error("invalid thresholds: {0}")]
    InvalidThresholds(String),
}
