use axum::Json;
use axum::extract::State;
use moodline_instruments::questionnaire::QuestionnaireDefinition;

use crate::state::AppState;

/// The active questionnaire, including the thresholds this deployment uses.
pub async fn get_questionnaire(State(state): State<AppState>) -> Json<QuestionnaireDefinition> {
    Json(state.engine.definition().clone())
}
