//! CSV tick-summary backend.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use ::csv::Writer;

use crate::writer::OutputWriter;
use crate::{OutputResult, TickSummaryRow};

const HEADER: [&str; 5] = ["tick", "passed", "stored", "in_flight", "live_packages"];

/// Writes one CSV row per simulated tick.
pub struct CsvSummaryWriter<W: Write = File> {
    summaries: Writer<W>,
    finished:  bool,
}

impl CsvSummaryWriter<File> {
    /// Create (or truncate) the CSV file at `path` and write the header row.
    pub fn create(path: &Path) -> OutputResult<Self> {
        Self::with_writer(Writer::from_path(path)?)
    }
}

impl<W: Write> CsvSummaryWriter<W> {
    /// Write CSV to any sink, starting with the header row.
    pub fn from_writer(out: W) -> OutputResult<Self> {
        Self::with_writer(Writer::from_writer(out))
    }

    fn with_writer(mut summaries: Writer<W>) -> OutputResult<Self> {
        summaries.write_record(HEADER)?;
        Ok(Self { summaries, finished: false })
    }

    /// Flush and return the underlying sink.
    pub fn into_inner(self) -> OutputResult<W> {
        self.summaries.into_inner().map_err(|e| e.into_error().into())
    }
}

impl<W: Write> OutputWriter for CsvSummaryWriter<W> {
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.passed.to_string(),
            row.stored.to_string(),
            row.in_flight.to_string(),
            row.live_packages.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.summaries.flush()?;
        Ok(())
    }
}
