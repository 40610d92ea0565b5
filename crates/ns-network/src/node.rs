//! The three node variants and the value handles that name them.
//!
//! | Variant      | Sender | Receiver | Holds                                        |
//! |--------------|--------|----------|----------------------------------------------|
//! | `Ramp`       | yes    | no       | delivery buffer, outgoing slot               |
//! | `Worker`     | yes    | yes      | input queue, processing buffer, outgoing slot|
//! | `Storehouse` | no     | yes      | stockpile                                    |
//!
//! Node ids are unique within a kind only, so every cross-node reference is a
//! kind-tagged handle: [`SenderId`] (`ramp-N` / `worker-N`) or [`ReceiverId`]
//! (`worker-N` / `store-N`).  Both display and parse in the network
//! definition syntax.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use ns_core::{ElementId, Package, PackageIds, Tick, TimeOffset};
use ns_storage::{PackageQueue, PackageStockpile, Queue, QueueKind, StorageResult};

use crate::capability::{PackageReceiver, PackageSender, SendingSlot};
use crate::collection::Node;

// ── Kinds ─────────────────────────────────────────────────────────────────────

/// Which of the three node variants a node is.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    Ramp,
    Worker,
    Storehouse,
}

impl NodeKind {
    /// Holds an outgoing buffer and a receiver preference table.
    pub fn can_send(self) -> bool {
        matches!(self, NodeKind::Ramp | NodeKind::Worker)
    }

    /// Exposes an inbound stockpile.
    pub fn can_receive(self) -> bool {
        matches!(self, NodeKind::Worker | NodeKind::Storehouse)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Ramp       => "ramp",
            NodeKind::Worker     => "worker",
            NodeKind::Storehouse => "storehouse",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind a receiver reports about itself, so routing can branch.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReceiverKind {
    Worker,
    Storehouse,
}

// ── Handles ───────────────────────────────────────────────────────────────────

/// A node-reference string that is not `<kind>-<id>` with a valid kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid node reference {0:?}")]
pub struct ParseNodeRefError(pub String);

fn split_node_ref(s: &str) -> Result<(&str, ElementId), ParseNodeRefError> {
    let (kind, id) = s
        .split_once('-')
        .ok_or_else(|| ParseNodeRefError(s.to_owned()))?;
    let id = id
        .parse::<ElementId>()
        .map_err(|_| ParseNodeRefError(s.to_owned()))?;
    Ok((kind, id))
}

/// Handle to a node that can send: a ramp or a worker.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SenderId {
    Ramp(ElementId),
    Worker(ElementId),
}

impl SenderId {
    pub fn id(self) -> ElementId {
        match self {
            SenderId::Ramp(id) | SenderId::Worker(id) => id,
        }
    }

    pub fn kind(self) -> NodeKind {
        match self {
            SenderId::Ramp(_)   => NodeKind::Ramp,
            SenderId::Worker(_) => NodeKind::Worker,
        }
    }
}

impl fmt::Display for SenderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SenderId::Ramp(id)   => write!(f, "ramp-{id}"),
            SenderId::Worker(id) => write!(f, "worker-{id}"),
        }
    }
}

impl FromStr for SenderId {
    type Err = ParseNodeRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match split_node_ref(s)? {
            ("ramp", id)   => Ok(SenderId::Ramp(id)),
            ("worker", id) => Ok(SenderId::Worker(id)),
            _ => Err(ParseNodeRefError(s.to_owned())),
        }
    }
}

/// Handle to a node that can receive: a worker or a storehouse.
///
/// The derived `Ord` (workers before storehouses, then by id) is the stored
/// order of every preference table.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReceiverId {
    Worker(ElementId),
    Storehouse(ElementId),
}

impl ReceiverId {
    pub fn id(self) -> ElementId {
        match self {
            ReceiverId::Worker(id) | ReceiverId::Storehouse(id) => id,
        }
    }

    pub fn kind(self) -> ReceiverKind {
        match self {
            ReceiverId::Worker(_)     => ReceiverKind::Worker,
            ReceiverId::Storehouse(_) => ReceiverKind::Storehouse,
        }
    }

    pub fn node_kind(self) -> NodeKind {
        match self {
            ReceiverId::Worker(_)     => NodeKind::Worker,
            ReceiverId::Storehouse(_) => NodeKind::Storehouse,
        }
    }

    /// The same node viewed as a sender, if it can send.
    pub fn as_sender(self) -> Option<SenderId> {
        match self {
            ReceiverId::Worker(id)    => Some(SenderId::Worker(id)),
            ReceiverId::Storehouse(_) => None,
        }
    }
}

impl fmt::Display for ReceiverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReceiverId::Worker(id)     => write!(f, "worker-{id}"),
            ReceiverId::Storehouse(id) => write!(f, "store-{id}"),
        }
    }
}

impl FromStr for ReceiverId {
    type Err = ParseNodeRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match split_node_ref(s)? {
            ("worker", id) => Ok(ReceiverId::Worker(id)),
            ("store", id)  => Ok(ReceiverId::Storehouse(id)),
            _ => Err(ParseNodeRefError(s.to_owned())),
        }
    }
}

// ── Ramp ──────────────────────────────────────────────────────────────────────

/// Source node: originates one package per delivery interval.
#[derive(Debug)]
pub struct Ramp {
    id:                ElementId,
    delivery_interval: TimeOffset,
    /// Package waiting for its delivery interval to elapse.
    pending:           Option<Package>,
    delivery_start:    Tick,
    sending:           SendingSlot,
}

impl Ramp {
    pub fn new(id: ElementId, delivery_interval: TimeOffset) -> Self {
        Self {
            id,
            delivery_interval,
            pending:        None,
            delivery_start: Tick::ZERO,
            sending:        SendingSlot::default(),
        }
    }

    pub fn delivery_interval(&self) -> TimeOffset {
        self.delivery_interval
    }

    /// The package currently counting down its delivery interval.
    pub fn pending_package(&self) -> Option<&Package> {
        self.pending.as_ref()
    }

    pub fn delivery_start(&self) -> Tick {
        self.delivery_start
    }

    /// Deliveries phase.
    ///
    /// An empty delivery buffer is refilled with a fresh package stamped
    /// `now`.  Once the interval has elapsed (creation tick inclusive) the
    /// package moves to the outgoing slot, provided the slot is free; a full
    /// slot leaves it pending until a later tick.
    pub fn deliver_goods(&mut self, now: Tick, ids: &PackageIds) {
        if self.pending.is_none() {
            self.pending = Some(ids.create());
            self.delivery_start = now;
        }

        if now.has_elapsed(self.delivery_start, self.delivery_interval)
            && !self.sending.is_occupied()
        {
            if let Some(package) = self.pending.take() {
                self.sending.load(package);
            }
        }
    }
}

impl Node for Ramp {
    fn id(&self) -> ElementId {
        self.id
    }
}

impl PackageSender for Ramp {
    fn sender_id(&self) -> SenderId {
        SenderId::Ramp(self.id)
    }

    fn sending_slot(&self) -> &SendingSlot {
        &self.sending
    }

    fn sending_slot_mut(&mut self) -> &mut SendingSlot {
        &mut self.sending
    }
}

// ── Worker ────────────────────────────────────────────────────────────────────

/// Intermediate node: queues, processes for a fixed duration, forwards.
pub struct Worker {
    id:                  ElementId,
    processing_duration: TimeOffset,
    queue:               Box<dyn PackageQueue>,
    processing:          Option<Package>,
    processing_start:    Tick,
    sending:             SendingSlot,
}

impl Worker {
    pub fn new(id: ElementId, processing_duration: TimeOffset, queue: Box<dyn PackageQueue>) -> Self {
        Self {
            id,
            processing_duration,
            queue,
            processing:       None,
            processing_start: Tick::ZERO,
            sending:          SendingSlot::default(),
        }
    }

    /// Worker backed by the stock [`Queue`] with the given discipline.
    pub fn with_queue_kind(id: ElementId, processing_duration: TimeOffset, kind: QueueKind) -> Self {
        Self::new(id, processing_duration, Box::new(Queue::new(kind)))
    }

    pub fn processing_duration(&self) -> TimeOffset {
        self.processing_duration
    }

    pub fn processing_start(&self) -> Tick {
        self.processing_start
    }

    pub fn processing_buffer(&self) -> Option<&Package> {
        self.processing.as_ref()
    }

    pub fn queue(&self) -> &dyn PackageQueue {
        self.queue.as_ref()
    }

    pub fn queue_kind(&self) -> QueueKind {
        self.queue.queue_kind()
    }

    /// Hand the outgoing package back to this worker's own queue (a
    /// self-loop edge).  Returns `false` if the slot was empty.
    pub(crate) fn requeue_outgoing(&mut self) -> bool {
        match self.sending.take() {
            Some(package) => {
                self.queue.push(package);
                true
            }
            None => false,
        }
    }

    /// Work phase.
    ///
    /// An idle worker pops one package from its queue and stamps `now`.  A
    /// package whose processing time has elapsed moves to the outgoing slot,
    /// provided the slot is free.
    pub fn do_work(&mut self, now: Tick) -> StorageResult<()> {
        if self.processing.is_none() && !self.queue.is_empty() {
            self.processing = Some(self.queue.pop()?);
            self.processing_start = now;
        }

        if self.processing.is_some()
            && now.has_elapsed(self.processing_start, self.processing_duration)
            && !self.sending.is_occupied()
        {
            if let Some(package) = self.processing.take() {
                self.sending.load(package);
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Worker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Worker")
            .field("id", &self.id)
            .field("processing_duration", &self.processing_duration)
            .field("queue_kind", &self.queue.queue_kind())
            .field("queued", &self.queue.len())
            .field("processing", &self.processing)
            .field("sending", &self.sending)
            .finish()
    }
}

impl Node for Worker {
    fn id(&self) -> ElementId {
        self.id
    }
}

impl PackageSender for Worker {
    fn sender_id(&self) -> SenderId {
        SenderId::Worker(self.id)
    }

    fn sending_slot(&self) -> &SendingSlot {
        &self.sending
    }

    fn sending_slot_mut(&mut self) -> &mut SendingSlot {
        &mut self.sending
    }
}

impl PackageReceiver for Worker {
    fn receiver_id(&self) -> ReceiverId {
        ReceiverId::Worker(self.id)
    }

    fn receive_package(&mut self, package: Package) {
        self.queue.push(package);
    }

    fn packages(&self) -> Box<dyn Iterator<Item = &Package> + '_> {
        self.queue.iter()
    }
}

// ── Storehouse ────────────────────────────────────────────────────────────────

/// Terminal node: accumulates packages indefinitely.
pub struct Storehouse {
    id:        ElementId,
    stockpile: Box<dyn PackageStockpile>,
}

impl Storehouse {
    /// Storehouse backed by a FIFO [`Queue`].
    pub fn new(id: ElementId) -> Self {
        Self::with_stockpile(id, Box::new(Queue::fifo()))
    }

    pub fn with_stockpile(id: ElementId, stockpile: Box<dyn PackageStockpile>) -> Self {
        Self { id, stockpile }
    }

    pub fn stockpile(&self) -> &dyn PackageStockpile {
        self.stockpile.as_ref()
    }
}

impl fmt::Debug for Storehouse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Storehouse")
            .field("id", &self.id)
            .field("stored", &self.stockpile.len())
            .finish()
    }
}

impl Node for Storehouse {
    fn id(&self) -> ElementId {
        self.id
    }
}

impl PackageReceiver for Storehouse {
    fn receiver_id(&self) -> ReceiverId {
        ReceiverId::Storehouse(self.id)
    }

    fn receive_package(&mut self, package: Package) {
        self.stockpile.push(package);
    }

    fn packages(&self) -> Box<dyn Iterator<Item = &Package> + '_> {
        self.stockpile.iter()
    }
}
