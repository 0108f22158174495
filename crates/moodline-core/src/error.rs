use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid user id: {0}")]
    InvalidUserId(String),
}
