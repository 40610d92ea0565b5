//! `ns-storage`: where packages wait.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`stockpile`] | `PackageStockpile`, `PackageQueue` traits, `Queue`        |
//! | [`kind`]      | `QueueKind` (FIFO / LIFO)                                 |
//! | [`error`]     | `StorageError`, `StorageResult<T>`                        |
//!
//! Storehouses hold a `Box<dyn PackageStockpile>`; workers hold a
//! `Box<dyn PackageQueue>`.  [`Queue`] implements both and is the only
//! discipline-aware implementation shipped here.

pub mod error;
pub mod kind;
pub mod stockpile;

#[cfg(test)]
mod tests;

pub use error::{StorageError, StorageResult};
pub use kind::QueueKind;
pub use stockpile::{PackageQueue, PackageStockpile, Queue};
