//! The `Sim` struct and its tick loop.

use tracing::{debug, info};

use ns_core::{ProbabilitySource, SimClock, SimConfig, Tick};
use ns_network::Network;

use crate::{SimObserver, SimResult};

/// What happened during one tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickSummary {
    /// Successful hand-offs in the passing phase.
    pub passed:    usize,
    /// Packages resting in storehouses after the work phase.
    pub stored:    usize,
    /// Packages anywhere else (ramp buffers, queues, processing and
    /// outgoing slots) after the work phase.
    pub in_flight: usize,
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The simulation runner.
///
/// Owns the network, the clock and the probability source that drives
/// routing.  Every tick runs the three phases in order:
///
/// 1. **Deliveries**: [`Network::do_deliveries`].
/// 2. **Package passing**: [`Network::do_package_passing`], drawing from
///    `source`.
/// 3. **Work**: [`Network::do_work`].
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    /// Total ticks, seed, start tick, report interval.
    pub config: SimConfig,

    /// Current tick.  Advanced once per completed tick.
    pub clock: SimClock,

    /// The network being simulated.
    pub network: Network,

    /// Probability source shared by every sender's routing draw.
    source: Box<dyn ProbabilitySource>,
}

impl Sim {
    pub(crate) fn new(config: SimConfig, network: Network, source: Box<dyn ProbabilitySource>) -> Self {
        Self { clock: config.make_clock(), config, network, source }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let end = self.config.end_tick();
        info!(
            start = %self.clock.current_tick,
            end = %end,
            ramps = self.network.ramps().len(),
            workers = self.network.workers().len(),
            storehouses = self.network.storehouses().len(),
            "simulation started"
        );

        while self.clock.current_tick < end {
            self.observed_tick(observer)?;
        }

        observer.on_sim_end(self.clock.current_tick, &self.network);
        info!(
            final_tick = %self.clock.current_tick,
            stored = self.network.stored_count(),
            in_flight = self.network.in_flight_count(),
            "simulation finished"
        );
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.observed_tick(observer)?;
        }
        Ok(())
    }

    /// Execute one tick without observer callbacks and advance the clock.
    pub fn step(&mut self) -> SimResult<TickSummary> {
        let now = self.clock.current_tick;
        let summary = self.process_tick(now)?;
        self.clock.advance();
        Ok(summary)
    }

    /// The tick the next call to [`step`][Self::step] will simulate.
    pub fn current_tick(&self) -> Tick {
        self.clock.current_tick
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn observed_tick<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);
        let summary = self.process_tick(now)?;
        observer.on_tick_end(now, &summary, &self.network);
        self.clock.advance();
        Ok(())
    }

    fn process_tick(&mut self, now: Tick) -> SimResult<TickSummary> {
        self.network.do_deliveries(now);
        let passed = self.network.do_package_passing(self.source.as_mut());
        self.network.do_work(now)?;

        let summary = TickSummary {
            passed,
            stored:    self.network.stored_count(),
            in_flight: self.network.in_flight_count(),
        };
        debug!(%now, passed, stored = summary.stored, in_flight = summary.in_flight, "tick done");
        Ok(summary)
    }
}
