//! Sender and receiver capabilities.
//!
//! Capabilities are structural roles, not node identity: a worker is both a
//! sender and a receiver.  Each variant implements the contracts it supports;
//! [`NodeKind::can_send`][crate::NodeKind::can_send] and
//! [`NodeKind::can_receive`][crate::NodeKind::can_receive] answer the same
//! question without a node in hand.

use ns_core::{Package, ProbabilitySource};

use crate::node::{ReceiverId, ReceiverKind, SenderId};
use crate::preferences::ReceiverPreferences;

// ── SendingSlot ───────────────────────────────────────────────────────────────

/// The state every sender carries: one outgoing package and a preference
/// table over receivers.
#[derive(Debug, Default)]
pub struct SendingSlot {
    buffer:      Option<Package>,
    preferences: ReceiverPreferences,
}

impl SendingSlot {
    pub fn buffer(&self) -> Option<&Package> {
        self.buffer.as_ref()
    }

    pub fn is_occupied(&self) -> bool {
        self.buffer.is_some()
    }

    pub fn preferences(&self) -> &ReceiverPreferences {
        &self.preferences
    }

    pub fn preferences_mut(&mut self) -> &mut ReceiverPreferences {
        &mut self.preferences
    }

    /// Put `package` in the outgoing slot.
    ///
    /// Returns the package that was displaced, if any.  Node phases only load
    /// an empty slot, so in the tick loop this is always `None`.
    pub fn load(&mut self, package: Package) -> Option<Package> {
        self.buffer.replace(package)
    }

    /// Empty the outgoing slot.
    pub fn take(&mut self) -> Option<Package> {
        self.buffer.take()
    }
}

// ── PackageSender ─────────────────────────────────────────────────────────────

/// A node that can route its buffered package to a receiver.
pub trait PackageSender {
    fn sender_id(&self) -> SenderId;

    fn sending_slot(&self) -> &SendingSlot;

    fn sending_slot_mut(&mut self) -> &mut SendingSlot;

    /// Read-only view of the outgoing package.
    fn sending_buffer(&self) -> Option<&Package> {
        self.sending_slot().buffer()
    }

    fn receiver_preferences(&self) -> &ReceiverPreferences {
        self.sending_slot().preferences()
    }

    /// Add `receiver` to the preference table (re-normalising uniformly).
    fn add_receiver(&mut self, receiver: ReceiverId) {
        self.sending_slot_mut().preferences_mut().add_receiver(receiver);
    }

    /// Remove `receiver` from the preference table.  Returns `false` if it
    /// was not present.
    fn remove_receiver(&mut self, receiver: ReceiverId) -> bool {
        self.sending_slot_mut().preferences_mut().remove_receiver(receiver)
    }

    /// Pick a destination for the buffered package.
    ///
    /// Returns `None` without drawing a probability when the buffer is empty
    /// or the table has no receivers.
    fn choose_receiver(&self, source: &mut dyn ProbabilitySource) -> Option<ReceiverId> {
        if !self.sending_slot().is_occupied() {
            return None;
        }
        self.receiver_preferences().choose(source)
    }

    /// Hand the buffered package directly to `receiver`.  Returns `false` if
    /// there was nothing to send.
    fn send_package_to(&mut self, receiver: &mut dyn PackageReceiver) -> bool {
        match self.sending_slot_mut().take() {
            Some(package) => {
                receiver.receive_package(package);
                true
            }
            None => false,
        }
    }
}

// ── PackageReceiver ───────────────────────────────────────────────────────────

/// A node that accepts packages into a stockpile or queue.
pub trait PackageReceiver {
    fn receiver_id(&self) -> ReceiverId;

    fn receiver_kind(&self) -> ReceiverKind {
        self.receiver_id().kind()
    }

    /// Push `package` into this node's stockpile.
    fn receive_package(&mut self, package: Package);

    /// Held packages in arrival order.
    fn packages(&self) -> Box<dyn Iterator<Item = &Package> + '_>;
}
