use std::sync::Arc;

use moodline_core::models::answer::AnswerSet;
use moodline_core::models::score::{Classification, ImpactLevel, ScoredResult};

use crate::error::ValidationError;
use crate::questionnaire::{ENDORSED, ItemKind, QuestionnaireDefinition, Thresholds};

/// A response after it has passed domain validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Response {
    Yes,
    No,
    Impact(ImpactLevel),
}

/// Scores answer sets against one questionnaire definition.
///
/// Stateless apart from the shared, read-only definition, so a single engine
/// can be used from any number of tasks.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    definition: Arc<QuestionnaireDefinition>,
}

impl ScoringEngine {
    pub fn new(definition: Arc<QuestionnaireDefinition>) -> Self {
        Self { definition }
    }

    pub fn definition(&self) -> &QuestionnaireDefinition {
        &self.definition
    }

    /// Score an answer set.
    ///
    /// Rejects the whole set if any response is missing or out of its
    /// item's domain; never returns a partial result.
    pub fn score(&self, answers: &AnswerSet) -> Result<ScoredResult, ValidationError> {
        let responses = self.parse(answers)?;
        let definition = &self.definition;

        let mut contributing_items = Vec::new();
        let mut core_symptom_count = 0u32;
        let mut co_occurrence = false;
        let mut impact_level = ImpactLevel::None;

        for (item, response) in definition.items.iter().zip(responses) {
            match (item.kind, response) {
                (ItemKind::Symptom, Response::Yes) => {
                    contributing_items.push(item.id.clone());
                    if item.core {
                        core_symptom_count += 1;
                    }
                }
                (ItemKind::CoOccurrence, Response::Yes) => co_occurrence = true,
                (ItemKind::Impact, Response::Impact(level)) => {
                    impact_level = impact_level.max(level);
                }
                _ => {}
            }
        }

        let symptom_count = contributing_items.len() as u32;
        let symptom_item_count = definition.symptom_item_count();
        let classification = classify(symptom_count, impact_level, &definition.thresholds);

        Ok(ScoredResult {
            questionnaire_id: definition.id.clone(),
            symptom_count,
            symptom_item_count,
            threshold: definition.thresholds.symptom_count,
            core_symptom_count,
            impact_level,
            co_occurrence,
            classification,
            contributing_items,
            risk_percentage: risk_percentage(
                symptom_count,
                symptom_item_count,
                co_occurrence,
                impact_level,
            ),
        })
    }

    fn parse(&self, answers: &AnswerSet) -> Result<Vec<Response>, ValidationError> {
        let issues = self.definition.validate(answers);
        if !issues.is_empty() {
            return Err(ValidationError {
                questionnaire: self.definition.name.clone(),
                issues,
            });
        }

        Ok(self
            .definition
            .items
            .iter()
            .zip(&answers.responses)
            .map(|(item, value)| match item.kind {
                ItemKind::Impact => {
                    Response::Impact(ImpactLevel::from_response(value).unwrap_or(ImpactLevel::None))
                }
                _ if value == ENDORSED => Response::Yes,
                _ => Response::No,
            })
            .collect())
    }
}

/// Apply the screening rule, in precedence order:
///
/// 1. at or over the symptom threshold with impact at or above the floor: positive
/// 2. within `borderline_margin` below the threshold, or over it without
///    enough impact: indeterminate
/// 3. otherwise negative
pub fn classify(
    symptom_count: u32,
    impact: ImpactLevel,
    thresholds: &Thresholds,
) -> Classification {
    let threshold = thresholds.symptom_count;
    if symptom_count >= threshold && impact >= thresholds.impact_floor {
        Classification::Positive
    } else if symptom_count.saturating_add(thresholds.borderline_margin) >= threshold {
        Classification::Indeterminate
    } else {
        Classification::Negative
    }
}

/// Heuristic risk estimate in percent.
///
/// Symptom share contributes up to 60 points, co-occurrence 20, impact up to
/// 25, and a high-symptom cluster with co-occurrence and some impact adds 15.
pub fn risk_percentage(
    symptom_count: u32,
    symptom_item_count: u32,
    co_occurrence: bool,
    impact: ImpactLevel,
) -> f64 {
    let share = if symptom_item_count == 0 {
        0.0
    } else {
        f64::from(symptom_count) / f64::from(symptom_item_count)
    };
    let mut total = (share * 60.0).min(60.0);
    if co_occurrence {
        total += 20.0;
    }
    total += match impact {
        ImpactLevel::None => 0.0,
        ImpactLevel::Minor => 5.0,
        ImpactLevel::Moderate => 15.0,
        ImpactLevel::Serious => 25.0,
    };
    if symptom_count >= 9 && co_occurrence && impact != ImpactLevel::None {
        total += 15.0;
    }
    (total.clamp(0.0, 100.0) * 10.0).round() / 10.0
}
