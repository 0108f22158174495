use moodline_core::models::answer::AnswerSet;
use moodline_core::models::score::{ImpactLevel, ScoredResult};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{InstrumentError, ValidationIssue};

/// The response token that endorses a yes/no item.
pub const ENDORSED: &str = "yes";

const YES_NO: &[&str] = &["yes", "no"];
const IMPACT_SCALE: &[&str] = &["no", "minor", "moderate", "serious"];

/// What an item contributes to scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ItemKind {
    /// Counted toward the symptom total when endorsed.
    Symptom,
    /// Whether symptoms clustered in one period. Reported, not scored.
    CoOccurrence,
    /// Functional impact. The highest impact item sets the impact level.
    Impact,
}

/// The set of valid response tokens for an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ResponseDomain {
    YesNo,
    ImpactScale,
}

impl ResponseDomain {
    pub fn allowed(&self) -> &'static [&'static str] {
        match self {
            ResponseDomain::YesNo => YES_NO,
            ResponseDomain::ImpactScale => IMPACT_SCALE,
        }
    }

    pub fn contains(&self, value: &str) -> bool {
        self.allowed().contains(&value)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Item {
    pub id: String,
    pub text: String,
    pub kind: ItemKind,
    pub domain: ResponseDomain,
    /// Part of the core symptom cluster.
    pub core: bool,
}

/// Cut-points for a positive screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Thresholds {
    /// Endorsed symptom items required for a positive screen.
    pub symptom_count: u32,
    /// Minimum impact level for a positive screen.
    pub impact_floor: ImpactLevel,
    /// Counts this close below the threshold are borderline.
    pub borderline_margin: u32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            symptom_count: 7,
            impact_floor: ImpactLevel::Moderate,
            borderline_margin: 1,
        }
    }
}

/// Immutable description of a questionnaire: its items, their response
/// domains, and the scoring thresholds.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuestionnaireDefinition {
    pub id: String,
    pub name: String,
    pub items: Vec<Item>,
    pub thresholds: Thresholds,
}

impl QuestionnaireDefinition {
    /// Replace the default thresholds. The symptom threshold must be reachable.
    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Result<Self, InstrumentError> {
        let symptom_items = self.symptom_item_count();
        if thresholds.symptom_count == 0 || thresholds.symptom_count > symptom_items {
            return Err(InstrumentError::InvalidThresholds(format!(
                "{}: symptom threshold {} must be within 1..={symptom_items}",
                self.name, thresholds.symptom_count,
            )));
        }
        self.thresholds = thresholds;
        Ok(self)
    }

    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn symptom_items(&self) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(|i| i.kind == ItemKind::Symptom)
    }

    pub fn symptom_item_count(&self) -> u32 {
        self.symptom_items().count() as u32
    }

    /// Check an answer set's length and every response's domain.
    ///
    /// Returns every problem found; an empty vec means the answers are valid.
    pub fn validate(&self, answers: &AnswerSet) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        if answers.len() != self.items.len() {
            issues.push(ValidationIssue::ItemCount {
                expected: self.items.len() as u32,
                actual: answers.len() as u32,
            });
        }
        for (item, value) in self.items.iter().zip(&answers.responses) {
            if !item.domain.contains(value) {
                issues.push(ValidationIssue::OutOfDomain {
                    item_id: item.id.clone(),
                    value: value.clone(),
                    allowed: item.domain.allowed().iter().map(|s| s.to_string()).collect(),
                });
            }
        }
        issues
    }

    /// Format a scored result as structured text for inclusion in a prompt.
    pub fn to_structured_input(&self, scored: &ScoredResult) -> String {
        let mut output = format!("## {}\n\n", self.name);
        output.push_str(&format!(
            "- Symptom score: {}/{} (positive threshold {})\n",
            scored.symptom_count, scored.symptom_item_count, scored.threshold
        ));
        output.push_str(&format!(
            "- Core symptoms endorsed: {}\n",
            scored.core_symptom_count
        ));
        output.push_str(&format!(
            "- Symptoms in the same period: {}\n",
            if scored.co_occurrence { "yes" } else { "no" }
        ));
        output.push_str(&format!(
            "- Functional impact: {}\n",
            scored.impact_level.label()
        ));
        output.push_str(&format!(
            "- Screening classification: {}\n",
            scored.classification.label()
        ));
        if let Some(severity) = scored.severity() {
            output.push_str(&format!("- Severity grade: {}\n", severity.label()));
        }
        output.push_str(&format!(
            "- Estimated risk: {:.1}%\n\n",
            scored.risk_percentage
        ));

        output.push_str("### Endorsed symptoms\n");
        if scored.contributing_items.is_empty() {
            output.push_str("- none\n");
        }
        for id in &scored.contributing_items {
            match self.item(id) {
                Some(item) => output.push_str(&format!("- {id}: {}\n", item.text)),
                None => output.push_str(&format!("- {id}\n")),
            }
        }
        output
    }
}
