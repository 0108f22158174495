//! moodline-instruments
//!
//! Screening questionnaire definitions and scoring. Pure data and pure
//! functions. No AWS dependency and no I/O.

pub mod error;
pub mod instruments;
pub mod questionnaire;
pub mod scoring;
pub mod trend;

use questionnaire::QuestionnaireDefinition;

/// Return all registered questionnaires.
pub fn all_questionnaires() -> Vec<QuestionnaireDefinition> {
    vec![instruments::mdq::definition()]
}

/// Look up a questionnaire by ID.
pub fn get_questionnaire(id: &str) -> Option<QuestionnaireDefinition> {
    all_questionnaires().into_iter().find(|q| q.id == id)
}
