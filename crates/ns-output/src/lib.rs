//! `ns-output`: reports and summaries for the netsim logistics simulator.
//!
//! | Module           | Contents                                                   |
//! |------------------|------------------------------------------------------------|
//! | [`report`]       | `write_structure_report`, `write_turn_report`              |
//! | [`notification`] | `ReportNotification`: interval and specific-turn policies  |
//! | [`observer`]     | `ReportObserver`, `SummaryObserver` (both `SimObserver`s)  |
//! | [`csv`]          | `CsvSummaryWriter`: one row per tick                       |
//! | [`writer`]       | `OutputWriter` trait for tick-summary backends             |
//!
//! # Usage
//!
//! ```rust,ignore
//! use ns_output::{CsvSummaryWriter, IntervalReportNotification, ReportObserver, SummaryObserver};
//!
//! let reports = ReportObserver::new(std::io::stdout(), IntervalReportNotification::new(5));
//! let summary = SummaryObserver::new(CsvSummaryWriter::create(Path::new("ticks.csv"))?);
//! let mut obs = (reports, summary);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.0.take_error() { eprintln!("report error: {e}"); }
//! ```

pub mod csv;
pub mod error;
pub mod notification;
pub mod observer;
pub mod report;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use self::csv::CsvSummaryWriter;
pub use error::{OutputError, OutputResult};
pub use notification::{IntervalReportNotification, ReportNotification, SpecificTurnsReportNotification};
pub use observer::{ReportObserver, SummaryObserver};
pub use report::{write_structure_report, write_turn_report};
pub use row::TickSummaryRow;
pub use writer::OutputWriter;
