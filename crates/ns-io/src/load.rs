//! Definition loader.
//!
//! Lines are applied to the network in file order, so a `LINK` must come
//! after both of its endpoints.  The first error aborts the load and no
//! partial network is returned.
//!
//! Node ids are non-negative (`u32`): `id=-1` is an
//! [`InvalidValue`][FormatError::InvalidValue], as is any id that does not
//! fit 32 bits.

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read};
use std::num::NonZeroU32;
use std::path::Path;
use std::str::FromStr;

use tracing::{debug, warn};

use ns_core::ElementId;
use ns_network::{Network, Ramp, ReceiverId, SenderId, Storehouse, Worker};
use ns_storage::QueueKind;

use crate::{FormatError, FormatResult};

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a network from a definition file.
pub fn load_network_file(path: &Path) -> FormatResult<Network> {
    let file = std::fs::File::open(path)?;
    load_network(file)
}

/// Like [`load_network_file`] but accepts any `Read` source.
pub fn load_network<R: Read>(reader: R) -> FormatResult<Network> {
    let mut network = Network::new();
    for (index, line) in BufReader::new(reader).lines().enumerate() {
        apply_line(&mut network, index + 1, &line?)?;
    }
    log_loaded(&network);
    Ok(network)
}

/// Load a network from definition text already in memory.
pub fn parse_network(text: &str) -> FormatResult<Network> {
    let mut network = Network::new();
    for (index, line) in text.lines().enumerate() {
        apply_line(&mut network, index + 1, line)?;
    }
    log_loaded(&network);
    Ok(network)
}

// ── Line handling ─────────────────────────────────────────────────────────────

/// One non-comment line split into its keyword and `key=value` parameters.
struct ParsedLine<'a> {
    line:    usize,
    keyword: &'a str,
    params:  HashMap<&'a str, &'a str>,
}

impl<'a> ParsedLine<'a> {
    /// `None` for blank and comment lines.
    fn parse(line: usize, text: &'a str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed.starts_with(';') {
            return None;
        }

        let mut tokens = trimmed.split_whitespace();
        let keyword = tokens.next()?;
        let mut params = HashMap::new();
        for token in tokens {
            match token.split_once('=') {
                Some((key, value)) => {
                    params.insert(key, value);
                }
                None => warn!(line, token, "ignoring token without `=`"),
            }
        }
        Some(Self { line, keyword, params })
    }

    fn require(&self, key: &'static str) -> FormatResult<&'a str> {
        self.params
            .get(key)
            .copied()
            .ok_or(FormatError::MissingParameter { line: self.line, key })
    }

    fn value<T: FromStr>(&self, key: &'static str) -> FormatResult<T> {
        let raw = self.require(key)?;
        raw.parse().map_err(|_| FormatError::InvalidValue {
            line:  self.line,
            key,
            value: raw.to_owned(),
        })
    }

    fn node_ref<T: FromStr>(&self, key: &'static str) -> FormatResult<T> {
        let raw = self.require(key)?;
        raw.parse().map_err(|_| FormatError::InvalidNodeRef {
            line:  self.line,
            key,
            value: raw.to_owned(),
        })
    }

    /// Warn about keys this keyword does not use.
    fn warn_unknown_keys(&self, known: &[&str]) {
        for key in self.params.keys().filter(|k| !known.contains(*k)) {
            warn!(line = self.line, key = *key, keyword = self.keyword, "ignoring unknown parameter");
        }
    }
}

fn apply_line(network: &mut Network, line: usize, text: &str) -> FormatResult<()> {
    let Some(parsed) = ParsedLine::parse(line, text) else {
        return Ok(());
    };
    let at_line = |source| FormatError::Network { line, source };

    match parsed.keyword {
        "LOADING_RAMP" => {
            parsed.warn_unknown_keys(&["id", "delivery-interval"]);
            let id: ElementId = parsed.value("id")?;
            let interval: NonZeroU32 = parsed.value("delivery-interval")?;
            network.add_ramp(Ramp::new(id, interval.get())).map_err(at_line)
        }
        "WORKER" => {
            parsed.warn_unknown_keys(&["id", "processing-time", "queue-type"]);
            let id: ElementId = parsed.value("id")?;
            let duration: NonZeroU32 = parsed.value("processing-time")?;
            let kind: QueueKind = parsed.value("queue-type")?;
            network
                .add_worker(Worker::with_queue_kind(id, duration.get(), kind))
                .map_err(at_line)
        }
        "STOREHOUSE" => {
            parsed.warn_unknown_keys(&["id"]);
            let id: ElementId = parsed.value("id")?;
            network.add_storehouse(Storehouse::new(id)).map_err(at_line)
        }
        "LINK" => {
            parsed.warn_unknown_keys(&["src", "dest"]);
            let src: SenderId = parsed.node_ref("src")?;
            let dest: ReceiverId = parsed.node_ref("dest")?;
            network.link(src, dest).map_err(at_line)
        }
        other => Err(FormatError::UnknownKeyword { line, keyword: other.to_owned() }),
    }
}

fn log_loaded(network: &Network) {
    debug!(
        ramps = network.ramps().len(),
        workers = network.workers().len(),
        storehouses = network.storehouses().len(),
        links = network.links().len(),
        "network definition loaded"
    );
}
