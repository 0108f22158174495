//! moodline-advisor
//!
//! Turns a scored screening into a narrative report. A remote model writes
//! the narrative when one is configured and answers in time; otherwise a
//! deterministic template does. Either way the caller gets a `Report`.

pub mod config;
pub mod error;
pub mod fallback;
pub mod generator;
pub mod model;
pub mod prompt;
pub mod remote;
pub mod sections;

pub use config::{AdvisorConfig, CredentialSource, RemoteSettings};
pub use error::{AdvisorError, RemoteUnavailable};
pub use generator::ReportGenerator;
pub use model::{BedrockModel, NarrativeModel};
