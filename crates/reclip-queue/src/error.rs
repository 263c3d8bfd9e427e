//! Queue error types.

use thiserror::Error;

pub type QueueResult<T> = Result<T, QueueError>;

#[derive(Debug, Error)]
pub enum QueueError {
    #[error("No clips selected for export")]
    EmptySelection,

    #[error("Clip selected more than once: {0}")]
    DuplicateClip(String),
}
