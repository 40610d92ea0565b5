//! Stockpile and queue abstractions.
//!
//! # Contracts
//!
//! - `push` appends; iteration is always in insertion order regardless of
//!   discipline, so reports show packages in the order they arrived.
//! - `pop` on an empty queue is a contract violation surfaced as
//!   [`StorageError::EmptyQueue`].  The tick loop always checks
//!   `is_empty()` first; hitting the error means a caller bug.

use std::collections::VecDeque;

use ns_core::Package;

use crate::{QueueKind, StorageError, StorageResult};

// ── Traits ────────────────────────────────────────────────────────────────────

/// An ordered holding area for packages at a node.
pub trait PackageStockpile {
    /// Append `package`.
    fn push(&mut self, package: Package);

    /// Read-only view of the held packages in insertion order.
    fn iter(&self) -> Box<dyn Iterator<Item = &Package> + '_>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A stockpile that can also hand packages back out.
pub trait PackageQueue: PackageStockpile {
    /// Remove one package according to [`queue_kind`][Self::queue_kind].
    fn pop(&mut self) -> StorageResult<Package>;

    /// The discipline fixed at construction.
    fn queue_kind(&self) -> QueueKind;
}

// ── Queue ─────────────────────────────────────────────────────────────────────

/// `VecDeque`-backed FIFO or LIFO queue.
#[derive(Debug)]
pub struct Queue {
    kind:     QueueKind,
    packages: VecDeque<Package>,
}

impl Queue {
    pub fn new(kind: QueueKind) -> Self {
        Self { kind, packages: VecDeque::new() }
    }

    pub fn fifo() -> Self {
        Self::new(QueueKind::Fifo)
    }

    pub fn lifo() -> Self {
        Self::new(QueueKind::Lifo)
    }
}

impl Default for Queue {
    fn default() -> Self {
        Self::fifo()
    }
}

impl PackageStockpile for Queue {
    fn push(&mut self, package: Package) {
        self.packages.push_back(package);
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &Package> + '_> {
        Box::new(self.packages.iter())
    }

    fn len(&self) -> usize {
        self.packages.len()
    }
}

impl PackageQueue for Queue {
    fn pop(&mut self) -> StorageResult<Package> {
        let popped = match self.kind {
            QueueKind::Fifo => self.packages.pop_front(),
            QueueKind::Lifo => self.packages.pop_back(),
        };
        popped.ok_or(StorageError::EmptyQueue { kind: self.kind })
    }

    fn queue_kind(&self) -> QueueKind {
        self.kind
    }
}
