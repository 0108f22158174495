use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Functional impact reported on the impact item, ordered from least to most
/// severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ImpactLevel {
    None,
    Minor,
    Moderate,
    Serious,
}

impl ImpactLevel {
    pub const ALL: [ImpactLevel; 4] = [
        ImpactLevel::None,
        ImpactLevel::Minor,
        ImpactLevel::Moderate,
        ImpactLevel::Serious,
    ];

    /// Map a questionnaire response token to an impact level.
    pub fn from_response(token: &str) -> Option<Self> {
        match token {
            "no" => Some(ImpactLevel::None),
            "minor" => Some(ImpactLevel::Minor),
            "moderate" => Some(ImpactLevel::Moderate),
            "serious" => Some(ImpactLevel::Serious),
            _ => None,
        }
    }

    /// The response token a respondent selects for this level.
    pub fn response(&self) -> &'static str {
        match self {
            ImpactLevel::None => "no",
            ImpactLevel::Minor => "minor",
            ImpactLevel::Moderate => "moderate",
            ImpactLevel::Serious => "serious",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ImpactLevel::None => "no problems",
            ImpactLevel::Minor => "minor problems",
            ImpactLevel::Moderate => "moderate problems",
            ImpactLevel::Serious => "serious problems",
        }
    }
}

/// Three-way screening outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Classification {
    Negative,
    /// Borderline: close to the symptom threshold, or over it without enough
    /// functional impact. Always flagged for clinical follow-up.
    Indeterminate,
    Positive,
}

impl Classification {
    pub const ALL: [Classification; 3] = [
        Classification::Negative,
        Classification::Indeterminate,
        Classification::Positive,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Classification::Negative => "negative",
            Classification::Indeterminate => "indeterminate (borderline)",
            Classification::Positive => "positive",
        }
    }
}

/// Grade of a screen that meets the symptom threshold, set by functional
/// impact. Screens below the threshold are not graded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Severity {
    /// Enough symptoms, but no functional impact.
    Subclinical,
    Mild,
    Moderate,
    High,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Subclinical => "subclinical",
            Severity::Mild => "mild",
            Severity::Moderate => "moderate",
            Severity::High => "high",
        }
    }

    /// Days between follow-up assessments.
    pub fn monitoring_interval_days(&self) -> u32 {
        match self {
            Severity::High => 1,
            Severity::Moderate => 3,
            Severity::Mild => 7,
            Severity::Subclinical => 14,
        }
    }
}

/// The outcome of scoring a valid `AnswerSet`.
///
/// Only `moodline_instruments::scoring::ScoringEngine` builds these; everything
/// downstream (reports, history, exports) treats them as read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoredResult {
    pub questionnaire_id: String,
    /// Endorsed symptom items.
    pub symptom_count: u32,
    /// Number of symptom items on the questionnaire.
    pub symptom_item_count: u32,
    /// Symptom count required for a positive screen.
    pub threshold: u32,
    /// Endorsed items among the core mania symptoms.
    pub core_symptom_count: u32,
    pub impact_level: ImpactLevel,
    pub co_occurrence: bool,
    pub classification: Classification,
    /// IDs of the endorsed symptom items, in questionnaire order.
    pub contributing_items: Vec<String>,
    /// Heuristic risk estimate in percent, one decimal place.
    pub risk_percentage: f64,
}

impl ScoredResult {
    /// Severity grade, or `None` when the symptom count is under the threshold.
    pub fn severity(&self) -> Option<Severity> {
        if self.symptom_count < self.threshold {
            return None;
        }
        Some(match self.impact_level {
            ImpactLevel::None => Severity::Subclinical,
            ImpactLevel::Minor => Severity::Mild,
            ImpactLevel::Moderate => Severity::Moderate,
            ImpactLevel::Serious => Severity::High,
        })
    }
}
