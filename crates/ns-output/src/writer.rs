//! The `OutputWriter` trait implemented by tick-summary backends.

use crate::{OutputResult, TickSummaryRow};

/// Destination for per-tick summary rows.
///
/// Errors are stored by [`SummaryObserver`][crate::SummaryObserver] and
/// retrieved with its `take_error`.
pub trait OutputWriter {
    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush all underlying handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
