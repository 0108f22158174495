//! moodline-core
//!
//! Pure domain types and S3 key conventions.
//! The shared vocabulary of the Moodline system. No AWS SDK dependency.

pub mod error;
pub mod models;
pub mod s3_keys;

use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by the async trait seams (`NarrativeModel`,
/// `HistoryStore`).
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
