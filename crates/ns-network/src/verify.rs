//! Reachability verification: can every ramp eventually deliver to storage?
//!
//! # Algorithm
//!
//! Three-colour depth-first search over senders only, following the edges in
//! each sender's preference table.  Storehouses are leaves and are never
//! recursed into.
//!
//! ```text
//! Unvisited ──visit──▶ InProgress ──storehouse found──▶ Confirmed(true)
//!                          │
//!                          └── walk from the root ramp failed ──▶ Confirmed(false)
//! ```
//!
//! One memo map is shared across every ramp's check, so a sender confirmed
//! during one ramp's walk is never explored again.
//!
//! # Cycles
//!
//! A sender that is `InProgress` when reached again (a cycle back to an
//! ancestor) contributes nothing to that path.  A sender that exhausts its
//! table without success stays `InProgress` for the rest of the current walk
//! rather than being marked false on the spot: it may only have failed
//! because its route to storage runs through an ancestor still on the
//! stack.  When the walk ends:
//!
//! - root unreachable: everything touched is reachable from the root, so
//!   none of it can reach storage either; all of it becomes `Confirmed(false)`.
//! - root reachable: tentative senders are reset to `Unvisited` so a later
//!   ramp's walk explores them afresh.
//!
//! Each sender is expanded at most once per walk, and once overall when it
//! ends up confirmed.

use ns_core::ElementId;

use crate::node::{ReceiverId, SenderId};
use crate::{Network, NetworkError, NetworkResult};

#[cfg(feature = "fx-hash")]
type ColorMap = rustc_hash::FxHashMap<SenderId, Color>;
#[cfg(not(feature = "fx-hash"))]
type ColorMap = std::collections::HashMap<SenderId, Color>;

/// Memo state for one sender.  Absent from the map means unvisited.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum Color {
    InProgress,
    Confirmed(bool),
}

/// Memoising reachability checker over a borrowed network.
pub struct ReachabilityVerifier<'a> {
    network: &'a Network,
    colors:  ColorMap,
}

impl<'a> ReachabilityVerifier<'a> {
    pub fn new(network: &'a Network) -> Self {
        Self { network, colors: ColorMap::default() }
    }

    /// `true` if `ramp` has a path, through zero or more workers, to some
    /// storehouse.  An unknown ramp has no path.
    pub fn ramp_reaches_storehouse(&mut self, ramp: ElementId) -> bool {
        self.sender_reaches_storehouse(SenderId::Ramp(ramp))
    }

    /// Like [`ramp_reaches_storehouse`][Self::ramp_reaches_storehouse] for
    /// any sender.
    pub fn sender_reaches_storehouse(&mut self, root: SenderId) -> bool {
        let mut touched = Vec::new();
        let reachable = self.visit(root, &mut touched);

        for sender in touched {
            if self.colors.get(&sender) == Some(&Color::InProgress) {
                if reachable {
                    self.colors.remove(&sender);
                } else {
                    self.colors.insert(sender, Color::Confirmed(false));
                }
            }
        }
        reachable
    }

    fn visit(&mut self, sender: SenderId, touched: &mut Vec<SenderId>) -> bool {
        if let Some(Color::Confirmed(known)) = self.colors.get(&sender) {
            return *known;
        }
        self.colors.insert(sender, Color::InProgress);
        touched.push(sender);

        let network = self.network;
        let Some(node) = network.sender(sender) else {
            return false;
        };

        for receiver in node.receiver_preferences().receivers() {
            let next = match receiver {
                ReceiverId::Storehouse(_) => return self.confirm(sender),
                ReceiverId::Worker(id) => SenderId::Worker(id),
            };
            if next == sender {
                continue;
            }
            match self.colors.get(&next).copied() {
                None => {
                    if self.visit(next, touched) {
                        return self.confirm(sender);
                    }
                }
                Some(Color::Confirmed(true)) => return self.confirm(sender),
                Some(Color::Confirmed(false)) | Some(Color::InProgress) => {}
            }
        }
        false
    }

    fn confirm(&mut self, sender: SenderId) -> bool {
        self.colors.insert(sender, Color::Confirmed(true));
        true
    }
}

impl Network {
    /// `true` iff every ramp can reach a storehouse.  A network with no
    /// ramps is trivially consistent.
    pub fn is_consistent(&self) -> bool {
        self.check_consistency().is_ok()
    }

    /// Like [`is_consistent`][Self::is_consistent] but names the first ramp
    /// (in insertion order) that cannot reach storage.
    pub fn check_consistency(&self) -> NetworkResult<()> {
        let mut verifier = ReachabilityVerifier::new(self);
        for ramp in self.ramps().ids() {
            if !verifier.ramp_reaches_storehouse(ramp) {
                return Err(NetworkError::Inconsistent { ramp });
            }
        }
        Ok(())
    }

    /// Every ramp with no path to storage, in insertion order.
    pub fn unreachable_ramps(&self) -> Vec<ElementId> {
        let mut verifier = ReachabilityVerifier::new(self);
        self.ramps()
            .ids()
            .filter(|&ramp| !verifier.ramp_reaches_storehouse(ramp))
            .collect()
    }
}
