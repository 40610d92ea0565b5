//! `ns-sim`: tick loop orchestrator for the netsim logistics simulator.
//!
//! # Three-phase tick loop
//!
//! ```text
//! for tick in start_tick..end_tick:
//!   ① Deliveries: every ramp creates a package if its buffer is empty and
//!                  releases it to its outgoing slot once the interval elapses.
//!   ② Passing   : ramps, then workers, hand their outgoing package to a
//!                  receiver drawn from their preference table.
//!   ③ Work      : every worker pops from its queue when idle and moves a
//!                  finished package to its outgoing slot.
//! ```
//!
//! Each phase completes over the whole network before the next begins, so a
//! package released in ① of tick T is routed no earlier than ② of tick T and
//! processed no earlier than ③ of tick T.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ns_core::SimConfig;
//! use ns_sim::{NoopObserver, SimBuilder};
//!
//! let network = ns_io::load_network_file("factory.txt")?;
//! let mut sim = SimBuilder::new(SimConfig::default(), network).build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::{Sim, TickSummary};
