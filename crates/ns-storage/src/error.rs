use thiserror::Error;

use crate::QueueKind;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("pop from empty {kind} queue")]
    EmptyQueue { kind: QueueKind },

    #[error("unknown queue type {0:?}: expected \"FIFO\" or \"LIFO\"")]
    UnknownQueueKind(String),
}

pub type StorageResult<T> = Result<T, StorageError>;
