//! Append-only screening history.
//!
//! Each submission is one immutable record. Saves never overwrite and reads
//! never see a partially written record.

use std::collections::HashMap;

use aws_sdk_s3::Client;
use moodline_core::BoxFuture;
use moodline_core::models::answer::AnswerSet;
use moodline_core::models::history::HistoryRecord;
use moodline_core::models::report::Report;
use moodline_core::models::score::ScoredResult;
use moodline_core::s3_keys;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::StorageError;
use crate::state;

pub trait HistoryStore: Send + Sync {
    /// Persist a submission and return its new id. Durable once it returns.
    fn save<'a>(
        &'a self,
        user_id: &'a str,
        answers: &'a AnswerSet,
        scored: &'a ScoredResult,
        report: &'a Report,
    ) -> BoxFuture<'a, Result<Uuid, StorageError>>;

    /// All of a user's submissions, most recent first.
    fn get_history<'a>(
        &'a self,
        user_id: &'a str,
    ) -> BoxFuture<'a, Result<Vec<HistoryRecord>, StorageError>>;

    /// One submission. `NotFound` if it does not exist or belongs to another user.
    fn get_by_submission_id<'a>(
        &'a self,
        user_id: &'a str,
        submission_id: Uuid,
    ) -> BoxFuture<'a, Result<HistoryRecord, StorageError>>;
}

fn new_record(
    user_id: &str,
    answers: &AnswerSet,
    scored: &ScoredResult,
    report: &Report,
) -> HistoryRecord {
    HistoryRecord {
        user_id: user_id.to_string(),
        submission_id: Uuid::new_v4(),
        answers: answers.clone(),
        scored: scored.clone(),
        report: report.clone(),
        created_at: jiff::Timestamp::now(),
    }
}

/// One JSON object per submission under `history/{user_id}/`.
#[derive(Debug, Clone)]
pub struct S3HistoryStore {
    client: Client,
    bucket: String,
}

impl S3HistoryStore {
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }
}

impl HistoryStore for S3HistoryStore {
    fn save<'a>(
        &'a self,
        user_id: &'a str,
        answers: &'a AnswerSet,
        scored: &'a ScoredResult,
        report: &'a Report,
    ) -> BoxFuture<'a, Result<Uuid, StorageError>> {
        Box::pin(async move {
            s3_keys::validate_user_id(user_id)?;
            let record = new_record(user_id, answers, scored, report);
            let key = s3_keys::history_record(user_id, record.submission_id);
            let etag = state::create_json(&self.client, &self.bucket, &key, &record).await?;
            info!(
                user_id,
                submission_id = %record.submission_id,
                key = %key,
                etag = %etag,
                "submission saved"
            );
            Ok(record.submission_id)
        })
    }

    fn get_history<'a>(
        &'a self,
        user_id: &'a str,
    ) -> BoxFuture<'a, Result<Vec<HistoryRecord>, StorageError>> {
        Box::pin(async move {
            s3_keys::validate_user_id(user_id)?;
            let prefix = s3_keys::history_prefix(user_id);
            let keys = crate::objects::list_objects(&self.client, &self.bucket, &prefix).await?;

            let mut records = Vec::with_capacity(keys.len());
            for key in keys {
                if s3_keys::submission_id_from_key(&key).is_none() {
                    debug!(key = %key, "skipping non-record object");
                    continue;
                }
                match state::load_json::<HistoryRecord>(&self.client, &self.bucket, &key).await {
                    Ok(record) => records.push(record),
                    // Listed but gone: deleted out of band between list and get
                    Err(StorageError::NotFound { .. }) => {
                        warn!(key = %key, "history record disappeared during listing");
                    }
                    Err(e) => return Err(e),
                }
            }

            records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(records)
        })
    }

    fn get_by_submission_id<'a>(
        &'a self,
        user_id: &'a str,
        submission_id: Uuid,
    ) -> BoxFuture<'a, Result<HistoryRecord, StorageError>> {
        Box::pin(async move {
            s3_keys::validate_user_id(user_id)?;
            let key = s3_keys::history_record(user_id, submission_id);
            let record: HistoryRecord = state::load_json(&self.client, &self.bucket, &key).await?;
            if record.user_id != user_id {
                return Err(StorageError::NotFound { key });
            }
            Ok(record)
        })
    }
}

/// Process-local store. Records live as long as the store does.
#[derive(Debug, Default)]
pub struct MemoryHistoryStore {
    records: RwLock<HashMap<String, Vec<HistoryRecord>>>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryStore for MemoryHistoryStore {
    fn save<'a>(
        &'a self,
        user_id: &'a str,
        answers: &'a AnswerSet,
        scored: &'a ScoredResult,
        report: &'a Report,
    ) -> BoxFuture<'a, Result<Uuid, StorageError>> {
        Box::pin(async move {
            s3_keys::validate_user_id(user_id)?;
            let record = new_record(user_id, answers, scored, report);
            let submission_id = record.submission_id;
            self.records
                .write()
                .await
                .entry(user_id.to_string())
                .or_default()
                .push(record);
            debug!(user_id, submission_id = %submission_id, "submission saved in memory");
            Ok(submission_id)
        })
    }

    fn get_history<'a>(
        &'a self,
        user_id: &'a str,
    ) -> BoxFuture<'a, Result<Vec<HistoryRecord>, StorageError>> {
        Box::pin(async move {
            s3_keys::validate_user_id(user_id)?;
            let records = self.records.read().await;
            Ok(records
                .get(user_id)
                .map(|list| list.iter().rev().cloned().collect())
                .unwrap_or_default())
        })
    }

    fn get_by_submission_id<'a>(
        &'a self,
        user_id: &'a str,
        submission_id: Uuid,
    ) -> BoxFuture<'a, Result<HistoryRecord, StorageError>> {
        Box::pin(async move {
            s3_keys::validate_user_id(user_id)?;
            let records = self.records.read().await;
            records
                .get(user_id)
                .and_then(|list| list.iter().find(|r| r.submission_id == submission_id))
                .cloned()
                .ok_or_else(|| StorageError::NotFound {
                    key: s3_keys::history_record(user_id, submission_id),
                })
        })
    }
}
