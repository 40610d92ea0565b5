//! Packages and the package-identity allocator.
//!
//! # Identity model
//!
//! Package ids are a scarce, reusable resource.  [`PackageIds`] keeps two
//! ordered sets: ids currently assigned and ids that have been freed.
//!
//!   assign = smallest freed id, else max(assigned) + 1, else 1
//!
//! Freed ids are recycled smallest-first, so id values stay dense over long
//! runs.  Id 0 is reserved ([`PackageId::NONE`]) and never assigned.
//!
//! # Ownership
//!
//! A [`Package`] is move-only: it is neither `Clone` nor `Copy`, so an id can
//! never be duplicated.  Dropping a package returns its id to the allocator
//! it came from.  The allocator handle is a cheap `Rc` clone; packages only
//! hold a `Weak` back-reference, so outliving the allocator is harmless.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::PackageId;

// ── IdPool ────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct IdPool {
    assigned: BTreeSet<PackageId>,
    freed:    BTreeSet<PackageId>,
}

impl IdPool {
    fn assign(&mut self) -> PackageId {
        let id = match self.freed.pop_first() {
            Some(id) => id,
            None => self
                .assigned
                .last()
                .map_or(PackageId(1), |max| PackageId(max.0 + 1)),
        };
        self.assigned.insert(id);
        id
    }

    fn free(&mut self, id: PackageId) {
        if id.is_none() || !self.assigned.remove(&id) {
            return;
        }
        self.freed.insert(id);
    }
}

// ── PackageIds ────────────────────────────────────────────────────────────────

/// Shared handle to a package-identity allocator.
///
/// Owned by the network; cloning the handle shares the same pool.  Not
/// `Send`: the simulation is strictly single-threaded.
#[derive(Clone, Default)]
pub struct PackageIds(Rc<RefCell<IdPool>>);

impl PackageIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fresh package holding the next available id.
    pub fn create(&self) -> Package {
        Package {
            id:   self.assign(),
            pool: Rc::downgrade(&self.0),
        }
    }

    /// Reserve an id without wrapping it in a [`Package`].
    ///
    /// The caller is responsible for handing it back via [`free`][Self::free].
    pub fn assign(&self) -> PackageId {
        self.0.borrow_mut().assign()
    }

    /// Return `id` to the free pool.  Freeing `PackageId::NONE` or an id that
    /// is not currently assigned is a no-op.
    pub fn free(&self, id: PackageId) {
        self.0.borrow_mut().free(id);
    }

    pub fn is_assigned(&self, id: PackageId) -> bool {
        self.0.borrow().assigned.contains(&id)
    }

    /// Number of live ids.
    pub fn assigned_count(&self) -> usize {
        self.0.borrow().assigned.len()
    }

    /// Snapshot of live ids in ascending order.
    pub fn assigned(&self) -> Vec<PackageId> {
        self.0.borrow().assigned.iter().copied().collect()
    }

    /// Snapshot of recyclable ids in ascending order.
    pub fn freed(&self) -> Vec<PackageId> {
        self.0.borrow().freed.iter().copied().collect()
    }
}

impl fmt::Debug for PackageIds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pool = self.0.borrow();
        f.debug_struct("PackageIds")
            .field("assigned", &pool.assigned.len())
            .field("freed", &pool.freed.len())
            .finish()
    }
}

// ── Package ───────────────────────────────────────────────────────────────────

/// An opaque unit of flow.
///
/// Exists in exactly one place at a time: a buffer, a queue, or a local
/// binding during hand-off.
pub struct Package {
    id:   PackageId,
    pool: Weak<RefCell<IdPool>>,
}

impl Package {
    #[inline]
    pub fn id(&self) -> PackageId {
        self.id
    }
}

impl Drop for Package {
    fn drop(&mut self) {
        let Some(pool) = self.pool.upgrade() else {
            return;
        };
        // assign/free never drop a package while holding the borrow.
        if let Ok(mut pool) = pool.try_borrow_mut() {
            pool.free(self.id);
        }
    }
}

impl fmt::Debug for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Package(#{})", self.id)
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.id)
    }
}
