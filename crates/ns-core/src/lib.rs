//! `ns-core`: foundational types for the `netsim` logistics simulator.
//!
//! This crate is a dependency of every other `ns-*` crate.  It intentionally
//! has no `ns-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `ElementId`, `PackageId`                              |
//! | [`package`]     | `Package` (move-only), `PackageIds` allocator         |
//! | [`time`]        | `Tick`, `TimeOffset`, `SimClock`, `SimConfig`         |
//! | [`rng`]         | `ProbabilitySource`, `SimRng`, `FixedSequence`        |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids, ticks and config.   |

pub mod error;
pub mod ids;
pub mod package;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use ids::{ElementId, PackageId};
pub use package::{Package, PackageIds};
pub use rng::{FixedSequence, ProbabilitySource, SimRng};
pub use time::{SimClock, SimConfig, Tick, TimeOffset};
