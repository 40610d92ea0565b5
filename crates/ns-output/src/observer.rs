//! `SimObserver` bridges for reports and tick summaries.
//!
//! Observer callbacks have no return value, so both observers keep the first
//! write error and stop writing once one has occurred.  After `sim.run()`
//! returns, check with `take_error`.

use std::io::Write;

use tracing::warn;

use ns_core::Tick;
use ns_network::Network;
use ns_sim::{SimObserver, TickSummary};

use crate::notification::ReportNotification;
use crate::report::write_turn_report;
use crate::row::TickSummaryRow;
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

fn store_first(slot: &mut Option<OutputError>, result: OutputResult<()>) {
    if let Err(e) = result {
        if slot.is_none() {
            warn!(error = %e, "output write failed; further output suppressed");
            *slot = Some(e);
        }
    }
}

// ── ReportObserver ────────────────────────────────────────────────────────────

/// Writes a turn report to `out` on every turn its notification selects.
pub struct ReportObserver<W: Write, N: ReportNotification> {
    out:          W,
    notification: N,
    reports:      usize,
    last_error:   Option<OutputError>,
}

impl<W: Write, N: ReportNotification> ReportObserver<W, N> {
    pub fn new(out: W, notification: N) -> Self {
        Self { out, notification, reports: 0, last_error: None }
    }

    /// Number of turn reports written so far.
    pub fn reports_written(&self) -> usize {
        self.reports
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner sink (e.g. to inspect a buffer after the sim).
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write, N: ReportNotification> SimObserver for ReportObserver<W, N> {
    fn on_tick_end(&mut self, tick: Tick, _summary: &TickSummary, network: &Network) {
        if self.last_error.is_some() || !self.notification.should_generate_report(tick) {
            return;
        }
        let result = write_turn_report(network, &mut self.out, tick);
        if result.is_ok() {
            self.reports += 1;
        }
        store_first(&mut self.last_error, result);
    }

    fn on_sim_end(&mut self, _final_tick: Tick, _network: &Network) {
        let result = self.out.flush().map_err(OutputError::from);
        store_first(&mut self.last_error, result);
    }
}

// ── SummaryObserver ───────────────────────────────────────────────────────────

/// Writes one [`TickSummaryRow`] per tick to any [`OutputWriter`].
pub struct SummaryObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SummaryObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer.
    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<W: OutputWriter> SimObserver for SummaryObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, summary: &TickSummary, network: &Network) {
        if self.last_error.is_some() {
            return;
        }
        let row = TickSummaryRow {
            tick:          tick.0,
            passed:        summary.passed as u64,
            stored:        summary.stored as u64,
            in_flight:     summary.in_flight as u64,
            live_packages: network.package_ids().assigned_count() as u64,
        };
        let result = self.writer.write_tick_summary(&row);
        store_first(&mut self.last_error, result);
    }

    fn on_sim_end(&mut self, _final_tick: Tick, _network: &Network) {
        let result = self.writer.finish();
        store_first(&mut self.last_error, result);
    }
}
