pub mod answer;
pub mod context;
pub mod history;
pub mod report;
pub mod score;
