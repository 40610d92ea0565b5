//! Row types written by summary backends.

/// Network-wide counters after one tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:          u64,
    /// Successful hand-offs during the passing phase.
    pub passed:        u64,
    /// Packages resting in storehouses.
    pub stored:        u64,
    /// Packages in ramp buffers, worker queues and processing/outgoing slots.
    pub in_flight:     u64,
    /// Package ids currently assigned.  Equals `stored + in_flight` unless
    /// packages are held outside the network.
    pub live_packages: u64,
}
