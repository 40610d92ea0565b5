//! Network error type.

use thiserror::Error;

use ns_core::{CoreError, ElementId};
use ns_storage::StorageError;

use crate::NodeKind;

/// Errors produced by `ns-network`.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("{kind} {id} not found in network")]
    UnknownNode { kind: NodeKind, id: ElementId },

    #[error("{kind} {id} already exists in network")]
    DuplicateNode { kind: NodeKind, id: ElementId },

    #[error("ramp {ramp} has no path to any storehouse")]
    Inconsistent { ramp: ElementId },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

pub type NetworkResult<T> = Result<T, NetworkError>;
