pub mod health;
pub mod history;
pub mod questionnaire;
pub mod screenings;
