use serde::{Deserialize, Serialize};

use super::history::{HistoryPoint, HistorySummary};
use super::score::ScoredResult;

/// Everything the report generator needs for one report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportContext {
    pub user_id: String,
    pub scored: ScoredResult,
    pub history: Option<HistorySummary>,
    /// Every screening on record, oldest first. Only history reports use it.
    #[serde(default)]
    pub timeline: Vec<HistoryPoint>,
    pub requested_at: jiff::Timestamp,
}

impl ReportContext {
    pub fn new(user_id: impl Into<String>, scored: ScoredResult) -> Self {
        Self {
            user_id: user_id.into(),
            scored,
            history: None,
            timeline: Vec::new(),
            requested_at: jiff::Timestamp::now(),
        }
    }

    pub fn with_history(mut self, history: Option<HistorySummary>) -> Self {
        self.history = history;
        self
    }

    pub fn with_timeline(mut self, mut timeline: Vec<HistoryPoint>) -> Self {
        timeline.sort_by_key(|p| p.assessed_at);
        self.timeline = timeline;
        self
    }
}
