//! Weighted receiver preferences.
//!
//! # Weights
//!
//! Preferences are always uniform: with `k` receivers every weight is `1/k`.
//! Adding or removing a receiver re-normalises every entry, so the weights
//! sum to 1.0 after every mutation (within floating tolerance) and there is
//! no configurable bias.
//!
//! # Selection
//!
//! Draw `r` in `[0, 1)` from the injected [`ProbabilitySource`], walk the
//! table in stored order accumulating weights, and return the first receiver
//! whose cumulative weight is `>= r`.  If rounding leaves nothing selected
//! (e.g. `r == 1.0`), the last entry is returned.

use std::collections::BTreeMap;

use ns_core::ProbabilitySource;

use crate::node::ReceiverId;

/// Per-sender mapping from receiver to selection probability.
///
/// Entries are kept in ascending [`ReceiverId`] order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReceiverPreferences {
    preferences: BTreeMap<ReceiverId, f64>,
}

impl ReceiverPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `receiver`; every entry (the new one included) becomes `1/k`.
    ///
    /// Re-adding a receiver that is already present only re-normalises.
    pub fn add_receiver(&mut self, receiver: ReceiverId) {
        self.preferences.insert(receiver, 0.0);
        self.normalize();
    }

    /// Drop `receiver` and re-normalise the rest.  Removing the last entry
    /// leaves an empty table.
    pub fn remove_receiver(&mut self, receiver: ReceiverId) -> bool {
        if self.preferences.remove(&receiver).is_none() {
            return false;
        }
        self.normalize();
        true
    }

    /// Choose a receiver, or `None` if the table is empty.
    pub fn choose(&self, source: &mut dyn ProbabilitySource) -> Option<ReceiverId> {
        let (&last, _) = self.preferences.last_key_value()?;

        let r = source.probability();
        let mut cumulative = 0.0;
        for (&receiver, &weight) in &self.preferences {
            cumulative += weight;
            if r <= cumulative {
                return Some(receiver);
            }
        }
        Some(last)
    }

    pub fn get(&self, receiver: ReceiverId) -> Option<f64> {
        self.preferences.get(&receiver).copied()
    }

    pub fn contains(&self, receiver: ReceiverId) -> bool {
        self.preferences.contains_key(&receiver)
    }

    pub fn len(&self) -> usize {
        self.preferences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.preferences.is_empty()
    }

    /// `(receiver, weight)` pairs in stored order.
    pub fn iter(&self) -> impl Iterator<Item = (ReceiverId, f64)> + '_ {
        self.preferences.iter().map(|(&r, &w)| (r, w))
    }

    /// Receivers in stored order.
    pub fn receivers(&self) -> impl Iterator<Item = ReceiverId> + '_ {
        self.preferences.keys().copied()
    }

    fn normalize(&mut self) {
        let n = self.preferences.len();
        if n == 0 {
            return;
        }
        let weight = 1.0 / n as f64;
        for w in self.preferences.values_mut() {
            *w = weight;
        }
    }
}
