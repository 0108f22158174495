//! moodline-storage
//!
//! Screening history persistence. S3 in production, in-memory for tests and
//! local runs.

pub mod client;
pub mod error;
pub mod history;
pub mod objects;
pub mod state;

pub use error::StorageError;
pub use history::{HistoryStore, MemoryHistoryStore, S3HistoryStore};
