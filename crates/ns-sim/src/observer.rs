//! Simulation observer trait for reporting and data collection.

use ns_core::Tick;
use ns_network::Network;

use crate::TickSummary;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] and
/// [`Sim::run_ticks`][crate::Sim::run_ticks] at tick boundaries.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct StoredCounter;
///
/// impl SimObserver for StoredCounter {
///     fn on_tick_end(&mut self, tick: Tick, _s: &TickSummary, network: &Network) {
///         println!("{tick}: {} stored", network.stored_count());
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before the deliveries phase.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after the work phase with read-only access to the network, so
    /// report writers can render its state without the sim knowing about any
    /// output format.
    fn on_tick_end(&mut self, _tick: Tick, _summary: &TickSummary, _network: &Network) {}

    /// Called once after the final tick of [`Sim::run`][crate::Sim::run].
    /// `final_tick` is the first tick that was *not* simulated.
    fn on_sim_end(&mut self, _final_tick: Tick, _network: &Network) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// Forward every callback to both observers, first `A` then `B`.
impl<A: SimObserver, B: SimObserver> SimObserver for (A, B) {
    fn on_tick_start(&mut self, tick: Tick) {
        self.0.on_tick_start(tick);
        self.1.on_tick_start(tick);
    }

    fn on_tick_end(&mut self, tick: Tick, summary: &TickSummary, network: &Network) {
        self.0.on_tick_end(tick, summary, network);
        self.1.on_tick_end(tick, summary, network);
    }

    fn on_sim_end(&mut self, final_tick: Tick, network: &Network) {
        self.0.on_sim_end(final_tick, network);
        self.1.on_sim_end(final_tick, network);
    }
}

/// An optional observer; `None` ignores every callback.
impl<O: SimObserver> SimObserver for Option<O> {
    fn on_tick_start(&mut self, tick: Tick) {
        if let Some(inner) = self {
            inner.on_tick_start(tick);
        }
    }

    fn on_tick_end(&mut self, tick: Tick, summary: &TickSummary, network: &Network) {
        if let Some(inner) = self {
            inner.on_tick_end(tick, summary, network);
        }
    }

    fn on_sim_end(&mut self, final_tick: Tick, network: &Network) {
        if let Some(inner) = self {
            inner.on_sim_end(final_tick, network);
        }
    }
}
