//! Queue discipline.

use std::fmt;
use std::str::FromStr;

use crate::StorageError;

/// Which end of a [`Queue`][crate::Queue] `pop` removes from.  Fixed at
/// construction.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QueueKind {
    /// First in, first out: pop the earliest-pushed package.
    #[default]
    Fifo,
    /// Last in, first out: pop the most recently pushed package.
    Lifo,
}

impl QueueKind {
    /// Label used by the network definition format and reports.
    pub fn as_str(self) -> &'static str {
        match self {
            QueueKind::Fifo => "FIFO",
            QueueKind::Lifo => "LIFO",
        }
    }
}

impl fmt::Display for QueueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QueueKind {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FIFO" => Ok(QueueKind::Fifo),
            "LIFO" => Ok(QueueKind::Lifo),
            other => Err(StorageError::UnknownQueueKind(other.to_owned())),
        }
    }
}
