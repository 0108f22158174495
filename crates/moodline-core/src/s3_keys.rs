//! S3 key/path conventions.
//!
//! Pure string functions with no AWS SDK dependency. These define the canonical
//! layout of objects in the Moodline S3 bucket.

use uuid::Uuid;

use crate::error::CoreError;

pub const HISTORY_PREFIX: &str = "history/";

const MAX_USER_ID_LEN: usize = 128;

/// Reject user ids that cannot be embedded in a key segment.
pub fn validate_user_id(user_id: &str) -> Result<(), CoreError> {
    if user_id.is_empty() || user_id.len() > MAX_USER_ID_LEN {
        return Err(CoreError::InvalidUserId(format!(
            "length must be 1..={MAX_USER_ID_LEN}"
        )));
    }
    if user_id == "." || user_id == ".." {
        return Err(CoreError::InvalidUserId(user_id.to_string()));
    }
    if user_id
        .chars()
        .any(|c| c == '/' || c == '\\' || c.is_whitespace() || c.is_control())
    {
        return Err(CoreError::InvalidUserId(user_id.to_string()));
    }
    Ok(())
}

pub fn history_prefix(user_id: &str) -> String {
    format!("{HISTORY_PREFIX}{user_id}/")
}

pub fn history_record(user_id: &str, submission_id: Uuid) -> String {
    format!("{HISTORY_PREFIX}{user_id}/{submission_id}.json")
}

/// Extract the submission id from a key produced by [`history_record`].
pub fn submission_id_from_key(key: &str) -> Option<Uuid> {
    key.rsplit('/')
        .next()
        .and_then(|name| name.strip_suffix(".json"))
        .and_then(|id| id.parse().ok())
}
