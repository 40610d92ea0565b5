//! Definition writer.
//!
//! Output order is ramps, workers, storehouses, then links (ramps' edges
//! before workers', each table in its stored order), every section under a
//! `; == SECTION ==` header.  Loading the output rebuilds the same node sets,
//! parameters and edges.

use std::io::{BufWriter, Write};
use std::path::Path;

use ns_network::{Network, Node};

use crate::FormatResult;

/// Write `network` to a new file at `path`, replacing any existing file.
pub fn save_network_file(network: &Network, path: &Path) -> FormatResult<()> {
    let file = std::fs::File::create(path)?;
    let mut writer = BufWriter::new(file);
    save_network(network, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Like [`save_network_file`] but accepts any `Write` sink.
pub fn save_network<W: Write>(network: &Network, out: &mut W) -> FormatResult<()> {
    writeln!(out, "; == LOADING RAMPS ==")?;
    writeln!(out)?;
    for ramp in network.ramps() {
        writeln!(
            out,
            "LOADING_RAMP id={} delivery-interval={}",
            ramp.id(),
            ramp.delivery_interval()
        )?;
    }

    writeln!(out)?;
    writeln!(out, "; == WORKERS ==")?;
    writeln!(out)?;
    for worker in network.workers() {
        writeln!(
            out,
            "WORKER id={} processing-time={} queue-type={}",
            worker.id(),
            worker.processing_duration(),
            worker.queue_kind()
        )?;
    }

    writeln!(out)?;
    writeln!(out, "; == STOREHOUSES ==")?;
    writeln!(out)?;
    for store in network.storehouses() {
        writeln!(out, "STOREHOUSE id={}", store.id())?;
    }

    writeln!(out)?;
    writeln!(out, "; == LINKS ==")?;
    writeln!(out)?;
    for (src, dest) in network.links() {
        writeln!(out, "LINK src={src} dest={dest}")?;
    }
    writeln!(out)?;
    Ok(())
}
