//! moodline-export
//!
//! Markdown documents from stored screening records.

pub mod error;
pub mod render;

pub use render::{DEFAULT_TEMPLATE, render_default, render_report};
