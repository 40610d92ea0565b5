//! The `Network`: sole owner of every node in a run.
//!
//! # Per-tick operations
//!
//! The orchestrator in `ns-sim` calls the three phases in order:
//!
//! ```text
//! do_deliveries(now)        ramps create / release packages
//! do_package_passing(src)   ramps, then workers, hand outgoing packages on
//! do_work(now)              workers pop from their queues and process
//! ```
//!
//! Each phase runs to completion over every node before the next begins.
//!
//! # Removal
//!
//! Removing a worker or storehouse first scrubs its [`ReceiverId`] from every
//! sender's preference table (the removed node's own table included), and
//! only then drops the node.  Packages it held are dropped with it, which
//! returns their ids to the pool.

use tracing::{debug, trace};

use ns_core::time::positive_duration;
use ns_core::{ElementId, PackageIds, ProbabilitySource, Tick};

use crate::capability::PackageSender;
use crate::collection::{Node, NodeCollection};
use crate::node::{NodeKind, Ramp, ReceiverId, SenderId, Storehouse, Worker};
use crate::{NetworkError, NetworkResult};

/// Index of a sender within its collection.  Stable only within one phase.
#[derive(Copy, Clone)]
enum SenderSlot {
    Ramp(usize),
    Worker(usize),
}

/// The logistics network (the "factory").
#[derive(Debug, Default)]
pub struct Network {
    ramps:       NodeCollection<Ramp>,
    workers:     NodeCollection<Worker>,
    storehouses: NodeCollection<Storehouse>,
    /// Allocator for every package created by this network's ramps.
    packages:    PackageIds,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn package_ids(&self) -> &PackageIds {
        &self.packages
    }

    // ── Construction ──────────────────────────────────────────────────────

    pub fn add_ramp(&mut self, ramp: Ramp) -> NetworkResult<()> {
        let id = ramp.id();
        positive_duration("ramp", id, ramp.delivery_interval())?;
        if self.ramps.contains(id) {
            return Err(NetworkError::DuplicateNode { kind: NodeKind::Ramp, id });
        }
        self.ramps.add(ramp);
        Ok(())
    }

    pub fn add_worker(&mut self, worker: Worker) -> NetworkResult<()> {
        let id = worker.id();
        positive_duration("worker", id, worker.processing_duration())?;
        if self.workers.contains(id) {
            return Err(NetworkError::DuplicateNode { kind: NodeKind::Worker, id });
        }
        self.workers.add(worker);
        Ok(())
    }

    pub fn add_storehouse(&mut self, storehouse: Storehouse) -> NetworkResult<()> {
        let id = storehouse.id();
        if self.storehouses.contains(id) {
            return Err(NetworkError::DuplicateNode { kind: NodeKind::Storehouse, id });
        }
        self.storehouses.add(storehouse);
        Ok(())
    }

    /// Add `receiver` to `sender`'s preference table.
    ///
    /// Both ends must already exist.
    pub fn link(&mut self, sender: SenderId, receiver: ReceiverId) -> NetworkResult<()> {
        if !self.contains_receiver(receiver) {
            return Err(NetworkError::UnknownNode { kind: receiver.node_kind(), id: receiver.id() });
        }
        let node = self
            .sender_mut(sender)
            .ok_or(NetworkError::UnknownNode { kind: sender.kind(), id: sender.id() })?;
        node.add_receiver(receiver);
        trace!(%sender, %receiver, "linked");
        Ok(())
    }

    /// Remove one edge.  Returns `false` if the sender or the edge is absent.
    pub fn unlink(&mut self, sender: SenderId, receiver: ReceiverId) -> bool {
        self.sender_mut(sender)
            .is_some_and(|node| node.remove_receiver(receiver))
    }

    // ── Removal ───────────────────────────────────────────────────────────

    /// Ramps are never receivers, so nothing references them.
    pub fn remove_ramp(&mut self, id: ElementId) -> Option<Ramp> {
        let removed = self.ramps.remove_by_id(id);
        if removed.is_some() {
            debug!(%id, "removed ramp");
        }
        removed
    }

    pub fn remove_worker(&mut self, id: ElementId) -> Option<Worker> {
        if !self.workers.contains(id) {
            return None;
        }
        self.scrub_receiver(ReceiverId::Worker(id));
        self.workers.remove_by_id(id)
    }

    pub fn remove_storehouse(&mut self, id: ElementId) -> Option<Storehouse> {
        if !self.storehouses.contains(id) {
            return None;
        }
        self.scrub_receiver(ReceiverId::Storehouse(id));
        self.storehouses.remove_by_id(id)
    }

    /// Drop `receiver` from every sender's table.
    fn scrub_receiver(&mut self, receiver: ReceiverId) {
        let mut scrubbed = 0usize;
        for ramp in self.ramps.iter_mut() {
            scrubbed += usize::from(ramp.remove_receiver(receiver));
        }
        for worker in self.workers.iter_mut() {
            scrubbed += usize::from(worker.remove_receiver(receiver));
        }
        debug!(%receiver, scrubbed, "removed receiver and scrubbed references");
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    pub fn ramps(&self) -> &NodeCollection<Ramp> {
        &self.ramps
    }

    pub fn workers(&self) -> &NodeCollection<Worker> {
        &self.workers
    }

    pub fn storehouses(&self) -> &NodeCollection<Storehouse> {
        &self.storehouses
    }

    pub fn find_ramp_by_id(&self, id: ElementId) -> Option<&Ramp> {
        self.ramps.find_by_id(id)
    }

    pub fn find_worker_by_id(&self, id: ElementId) -> Option<&Worker> {
        self.workers.find_by_id(id)
    }

    pub fn find_worker_by_id_mut(&mut self, id: ElementId) -> Option<&mut Worker> {
        self.workers.find_by_id_mut(id)
    }

    pub fn find_storehouse_by_id(&self, id: ElementId) -> Option<&Storehouse> {
        self.storehouses.find_by_id(id)
    }

    pub fn sender(&self, id: SenderId) -> Option<&dyn PackageSender> {
        match id {
            SenderId::Ramp(id)   => self.ramps.find_by_id(id).map(|n| n as &dyn PackageSender),
            SenderId::Worker(id) => self.workers.find_by_id(id).map(|n| n as &dyn PackageSender),
        }
    }

    pub fn sender_mut(&mut self, id: SenderId) -> Option<&mut dyn PackageSender> {
        match id {
            SenderId::Ramp(id)   => self.ramps.find_by_id_mut(id).map(|n| n as &mut dyn PackageSender),
            SenderId::Worker(id) => self.workers.find_by_id_mut(id).map(|n| n as &mut dyn PackageSender),
        }
    }

    pub fn contains_receiver(&self, id: ReceiverId) -> bool {
        match id {
            ReceiverId::Worker(id)     => self.workers.contains(id),
            ReceiverId::Storehouse(id) => self.storehouses.contains(id),
        }
    }

    /// Every sender: ramps first, then workers, each in insertion order.
    pub fn senders(&self) -> impl Iterator<Item = &dyn PackageSender> + '_ {
        self.ramps
            .iter()
            .map(|n| n as &dyn PackageSender)
            .chain(self.workers.iter().map(|n| n as &dyn PackageSender))
    }

    /// Every edge currently present: ramps' edges before workers' edges, each
    /// sender's receivers in preference-table order.
    pub fn links(&self) -> Vec<(SenderId, ReceiverId)> {
        self.senders()
            .flat_map(|s| {
                let from = s.sender_id();
                s.receiver_preferences().receivers().map(move |to| (from, to))
            })
            .collect()
    }

    // ── Inventory ─────────────────────────────────────────────────────────

    /// Packages resting in storehouses.
    pub fn stored_count(&self) -> usize {
        self.storehouses.iter().map(|s| s.stockpile().len()).sum()
    }

    /// Packages anywhere other than a storehouse: ramp buffers, worker
    /// queues, processing buffers and outgoing slots.
    pub fn in_flight_count(&self) -> usize {
        let ramps: usize = self
            .ramps
            .iter()
            .map(|r| usize::from(r.pending_package().is_some()) + usize::from(r.sending_buffer().is_some()))
            .sum();
        let workers: usize = self
            .workers
            .iter()
            .map(|w| {
                w.queue().len()
                    + usize::from(w.processing_buffer().is_some())
                    + usize::from(w.sending_buffer().is_some())
            })
            .sum();
        ramps + workers
    }

    // ── Phases ────────────────────────────────────────────────────────────

    /// Phase 1: every ramp creates and/or releases a package.
    pub fn do_deliveries(&mut self, now: Tick) {
        for ramp in self.ramps.iter_mut() {
            ramp.deliver_goods(now, &self.packages);
        }
        trace!(%now, ramps = self.ramps.len(), "deliveries done");
    }

    /// Phase 2: ramps, then workers, hand their outgoing package to a chosen
    /// receiver.  Returns the number of successful hand-offs.
    pub fn do_package_passing(&mut self, source: &mut dyn ProbabilitySource) -> usize {
        let mut passed = 0;
        for i in 0..self.ramps.len() {
            passed += usize::from(self.pass_from(SenderSlot::Ramp(i), source));
        }
        for i in 0..self.workers.len() {
            passed += usize::from(self.pass_from(SenderSlot::Worker(i), source));
        }
        trace!(passed, "package passing done");
        passed
    }

    /// Phase 3: every worker pops and processes.
    ///
    /// A queue failing to pop after reporting non-empty is a contract
    /// violation and aborts the phase.
    pub fn do_work(&mut self, now: Tick) -> NetworkResult<()> {
        for worker in self.workers.iter_mut() {
            worker.do_work(now)?;
        }
        trace!(%now, workers = self.workers.len(), "work done");
        Ok(())
    }

    fn slot(&self, slot: SenderSlot) -> Option<&dyn PackageSender> {
        match slot {
            SenderSlot::Ramp(i)   => self.ramps.get(i).map(|n| n as &dyn PackageSender),
            SenderSlot::Worker(i) => self.workers.get(i).map(|n| n as &dyn PackageSender),
        }
    }

    /// Move one sender's outgoing package to a chosen receiver.  An
    /// unresolved receiver leaves the package in the slot.
    fn pass_from(&mut self, slot: SenderSlot, source: &mut dyn ProbabilitySource) -> bool {
        let Some(target) = self.slot(slot).and_then(|s| s.choose_receiver(source)) else {
            return false;
        };
        match (slot, target) {
            (SenderSlot::Ramp(i), ReceiverId::Worker(id)) => {
                match (self.ramps.get_mut(i), self.workers.find_by_id_mut(id)) {
                    (Some(ramp), Some(worker)) => ramp.send_package_to(worker),
                    _ => false,
                }
            }
            (SenderSlot::Ramp(i), ReceiverId::Storehouse(id)) => {
                match (self.ramps.get_mut(i), self.storehouses.find_by_id_mut(id)) {
                    (Some(ramp), Some(store)) => ramp.send_package_to(store),
                    _ => false,
                }
            }
            (SenderSlot::Worker(i), ReceiverId::Storehouse(id)) => {
                match (self.workers.get_mut(i), self.storehouses.find_by_id_mut(id)) {
                    (Some(worker), Some(store)) => worker.send_package_to(store),
                    _ => false,
                }
            }
            (SenderSlot::Worker(i), ReceiverId::Worker(id)) => match self.workers.position(id) {
                Some(j) if j == i => self.workers.get_mut(i).is_some_and(Worker::requeue_outgoing),
                Some(j) => match self.workers.pair_mut(i, j) {
                    Some((from, to)) => from.send_package_to(to),
                    None => false,
                },
                None => false,
            },
        }
    }
}
