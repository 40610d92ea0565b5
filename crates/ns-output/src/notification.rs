//! When to emit a turn report.

use std::collections::BTreeSet;

use ns_core::Tick;

/// Decides, turn by turn, whether a report is due.
pub trait ReportNotification {
    fn should_generate_report(&self, turn: Tick) -> bool;
}

impl<N: ReportNotification + ?Sized> ReportNotification for Box<N> {
    fn should_generate_report(&self, turn: Tick) -> bool {
        (**self).should_generate_report(turn)
    }
}

/// Fires on turns `1, 1 + n, 1 + 2n, …`.  An interval of 0 never fires.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct IntervalReportNotification {
    interval: u64,
}

impl IntervalReportNotification {
    pub fn new(interval: u64) -> Self {
        Self { interval }
    }

    pub fn interval(&self) -> u64 {
        self.interval
    }
}

impl ReportNotification for IntervalReportNotification {
    fn should_generate_report(&self, turn: Tick) -> bool {
        match (self.interval, turn.0.checked_sub(1)) {
            (0, _) | (_, None) => false,
            (n, Some(t)) => t % n == 0,
        }
    }
}

/// Fires exactly on the listed turns.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpecificTurnsReportNotification {
    turns: BTreeSet<u64>,
}

impl SpecificTurnsReportNotification {
    pub fn new(turns: impl IntoIterator<Item = u64>) -> Self {
        Self { turns: turns.into_iter().collect() }
    }

    pub fn turns(&self) -> impl Iterator<Item = u64> + '_ {
        self.turns.iter().copied()
    }
}

impl ReportNotification for SpecificTurnsReportNotification {
    fn should_generate_report(&self, turn: Tick) -> bool {
        self.turns.contains(&turn.0)
    }
}
