//! Human-readable network reports.
//!
//! # Structure report
//!
//! ```text
//! == LOADING RAMPS ==
//!
//! LOADING RAMP #1
//!   Delivery interval: 3
//!   Receivers:
//!     worker #1
//!
//! == WORKERS ==
//!
//! WORKER #1
//!   Processing time: 2
//!   Queue type: FIFO
//!   Receivers:
//!     storehouse #1
//!
//! == STOREHOUSES ==
//!
//! STOREHOUSE #1
//! ```
//!
//! # Turn report
//!
//! ```text
//! === [ Turn: 4 ] ===
//!
//! == WORKERS ==
//!
//! WORKER #1
//!   PBuffer: #2 (pt = 1)
//!   Queue: #3, #4
//!   SBuffer: (empty)
//!
//! == STOREHOUSES ==
//!
//! STOREHOUSE #1
//!   Stock: #1
//! ```
//!
//! Every node kind is listed in ascending id order, whatever order the
//! network holds them in.  Receivers are listed in preference-table order.

use std::io::Write;

use ns_core::{Package, Tick};
use ns_network::{Network, Node, PackageReceiver, PackageSender, ReceiverId};

use crate::OutputResult;

// ── Structure ─────────────────────────────────────────────────────────────────

/// Describe every node's parameters and outgoing links.
pub fn write_structure_report<W: Write>(network: &Network, out: &mut W) -> OutputResult<()> {
    writeln!(out, "== LOADING RAMPS ==")?;
    writeln!(out)?;
    for ramp in sorted_by_id(network.ramps()) {
        writeln!(out, "LOADING RAMP #{}", ramp.id())?;
        writeln!(out, "  Delivery interval: {}", ramp.delivery_interval())?;
        write_receivers(out, ramp)?;
        writeln!(out)?;
    }

    writeln!(out, "== WORKERS ==")?;
    writeln!(out)?;
    for worker in sorted_by_id(network.workers()) {
        writeln!(out, "WORKER #{}", worker.id())?;
        writeln!(out, "  Processing time: {}", worker.processing_duration())?;
        writeln!(out, "  Queue type: {}", worker.queue_kind())?;
        write_receivers(out, worker)?;
        writeln!(out)?;
    }

    writeln!(out, "== STOREHOUSES ==")?;
    writeln!(out)?;
    for store in sorted_by_id(network.storehouses()) {
        writeln!(out, "STOREHOUSE #{}", store.id())?;
        writeln!(out)?;
    }
    Ok(())
}

fn write_receivers<W: Write, S: PackageSender>(out: &mut W, sender: &S) -> OutputResult<()> {
    writeln!(out, "  Receivers:")?;
    for receiver in sender.receiver_preferences().receivers() {
        match receiver {
            ReceiverId::Worker(id)     => writeln!(out, "    worker #{id}")?,
            ReceiverId::Storehouse(id) => writeln!(out, "    storehouse #{id}")?,
        }
    }
    Ok(())
}

// ── Turn ──────────────────────────────────────────────────────────────────────

/// Describe where every package sits at the end of `turn`.
pub fn write_turn_report<W: Write>(network: &Network, out: &mut W, turn: Tick) -> OutputResult<()> {
    writeln!(out, "=== [ Turn: {} ] ===", turn.0)?;
    writeln!(out)?;

    writeln!(out, "== WORKERS ==")?;
    writeln!(out)?;
    for worker in sorted_by_id(network.workers()) {
        writeln!(out, "WORKER #{}", worker.id())?;
        match worker.processing_buffer() {
            Some(package) => writeln!(
                out,
                "  PBuffer: {} (pt = {})",
                package,
                turn.elapsed_since(worker.processing_start())
            )?,
            None => writeln!(out, "  PBuffer: (empty)")?,
        }
        writeln!(out, "  Queue: {}", package_list(worker.packages()))?;
        writeln!(out, "  SBuffer: {}", package_list(worker.sending_buffer().into_iter()))?;
        writeln!(out)?;
    }

    writeln!(out, "== STOREHOUSES ==")?;
    writeln!(out)?;
    for store in sorted_by_id(network.storehouses()) {
        writeln!(out, "STOREHOUSE #{}", store.id())?;
        writeln!(out, "  Stock: {}", package_list(store.packages()))?;
        writeln!(out)?;
    }
    Ok(())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn sorted_by_id<'a, N: Node + 'a>(nodes: impl IntoIterator<Item = &'a N>) -> Vec<&'a N> {
    let mut nodes: Vec<&N> = nodes.into_iter().collect();
    nodes.sort_by_key(|n| n.id());
    nodes
}

/// `#1, #2, #3`, or `(empty)`.
fn package_list<'a>(packages: impl Iterator<Item = &'a Package>) -> String {
    let ids: Vec<String> = packages.map(ToString::to_string).collect();
    if ids.is_empty() {
        "(empty)".to_owned()
    } else {
        ids.join(", ")
    }
}
