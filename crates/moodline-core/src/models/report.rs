use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::score::ScoredResult;

/// How a report's narrative was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ReportSource {
    Remote,
    Fallback,
}

impl ReportSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportSource::Remote => "remote",
            ReportSource::Fallback => "fallback",
        }
    }
}

/// What a report covers: one screening, or the trend across a user's history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ReportKind {
    #[default]
    Screening,
    History,
}

impl ReportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::Screening => "screening",
            ReportKind::History => "history",
        }
    }

    /// The sections a report of this kind contains, in canonical order.
    pub fn sections(&self) -> &'static [SectionKind] {
        match self {
            ReportKind::Screening => &SectionKind::SCREENING,
            ReportKind::History => &SectionKind::HISTORY,
        }
    }
}

/// Headings a narrative is organised under. Each report kind uses a fixed
/// subset; see [`ReportKind::sections`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SectionKind {
    ExecutiveSummary,
    ClinicalAssessment,
    RiskEvaluation,
    TreatmentRecommendations,
    LifestyleRecommendations,
    MonitoringPlan,
    EmergencyProtocols,
    ProgressAnalysis,
    TrendInterpretation,
    PrognosisAssessment,
}

impl SectionKind {
    pub const ALL: [SectionKind; 10] = [
        SectionKind::ExecutiveSummary,
        SectionKind::ClinicalAssessment,
        SectionKind::RiskEvaluation,
        SectionKind::TreatmentRecommendations,
        SectionKind::LifestyleRecommendations,
        SectionKind::MonitoringPlan,
        SectionKind::EmergencyProtocols,
        SectionKind::ProgressAnalysis,
        SectionKind::TrendInterpretation,
        SectionKind::PrognosisAssessment,
    ];

    pub const SCREENING: [SectionKind; 7] = [
        SectionKind::ExecutiveSummary,
        SectionKind::ClinicalAssessment,
        SectionKind::RiskEvaluation,
        SectionKind::TreatmentRecommendations,
        SectionKind::LifestyleRecommendations,
        SectionKind::MonitoringPlan,
        SectionKind::EmergencyProtocols,
    ];

    pub const HISTORY: [SectionKind; 5] = [
        SectionKind::ExecutiveSummary,
        SectionKind::ProgressAnalysis,
        SectionKind::TrendInterpretation,
        SectionKind::TreatmentRecommendations,
        SectionKind::PrognosisAssessment,
    ];

    /// The bracketed heading used in narrative text, without brackets.
    pub fn marker(&self) -> &'static str {
        match self {
            SectionKind::ExecutiveSummary => "EXECUTIVE SUMMARY",
            SectionKind::ClinicalAssessment => "CLINICAL ASSESSMENT",
            SectionKind::RiskEvaluation => "RISK EVALUATION",
            SectionKind::TreatmentRecommendations => "TREATMENT RECOMMENDATIONS",
            SectionKind::LifestyleRecommendations => "LIFESTYLE RECOMMENDATIONS",
            SectionKind::MonitoringPlan => "MONITORING PLAN",
            SectionKind::EmergencyProtocols => "EMERGENCY PROTOCOLS",
            SectionKind::ProgressAnalysis => "PROGRESS ANALYSIS",
            SectionKind::TrendInterpretation => "TREND INTERPRETATION",
            SectionKind::PrognosisAssessment => "PROGNOSIS ASSESSMENT",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            SectionKind::ExecutiveSummary => "Executive Summary",
            SectionKind::ClinicalAssessment => "Clinical Assessment",
            SectionKind::RiskEvaluation => "Risk Evaluation",
            SectionKind::TreatmentRecommendations => "Treatment Recommendations",
            SectionKind::LifestyleRecommendations => "Lifestyle Recommendations",
            SectionKind::MonitoringPlan => "Monitoring Plan",
            SectionKind::EmergencyProtocols => "Emergency Protocols",
            SectionKind::ProgressAnalysis => "Progress Analysis",
            SectionKind::TrendInterpretation => "Trend Interpretation",
            SectionKind::PrognosisAssessment => "Prognosis Assessment",
        }
    }

    pub fn from_marker(marker: &str) -> Option<Self> {
        let normalized = marker.trim().to_ascii_uppercase();
        Self::ALL.into_iter().find(|k| k.marker() == normalized)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReportSection {
    pub kind: SectionKind,
    pub body: String,
}

/// A generated narrative report. Same shape whichever strategy produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Report {
    pub id: Uuid,
    #[serde(default)]
    pub kind: ReportKind,
    pub narrative: String,
    pub sections: Vec<ReportSection>,
    pub source: ReportSource,
    /// Model that wrote the narrative. `None` for fallback reports.
    pub model_id: Option<String>,
    pub scored: ScoredResult,
    pub generated_at: jiff::Timestamp,
    pub processing_ms: u64,
}

impl Report {
    pub fn section(&self, kind: SectionKind) -> Option<&str> {
        self.sections
            .iter()
            .find(|s| s.kind == kind)
            .map(|s| s.body.as_str())
    }
}
