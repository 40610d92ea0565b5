//! Probability sources for stochastic routing.
//!
//! Routing draws one value in `[0, 1)` per hand-off.  The draw is behind the
//! [`ProbabilitySource`] trait so that production runs use a seeded
//! [`SimRng`] while tests replay an exact sequence with [`FixedSequence`] or
//! a closure.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

// ── ProbabilitySource ─────────────────────────────────────────────────────────

/// A generator of probabilities in `[0, 1)`.
pub trait ProbabilitySource {
    fn probability(&mut self) -> f64;
}

impl<F> ProbabilitySource for F
where
    F: FnMut() -> f64,
{
    #[inline]
    fn probability(&mut self) -> f64 {
        self()
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Simulation-level RNG.  The default probability source.
///
/// Used only in single-threaded contexts; the tick loop never shares it.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }
}

impl ProbabilitySource for SimRng {
    /// Uniform in `[0, 1)`.
    #[inline]
    fn probability(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }
}

// ── FixedSequence ─────────────────────────────────────────────────────────────

/// Replays a fixed list of probabilities, cycling when exhausted.
///
/// An empty sequence always yields `0.0`.
#[derive(Clone, Debug, Default)]
pub struct FixedSequence {
    values: Vec<f64>,
    next:   usize,
}

impl FixedSequence {
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self { values: values.into(), next: 0 }
    }

    /// A source that always returns `value`.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }
}

impl ProbabilitySource for FixedSequence {
    fn probability(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.next];
        self.next = (self.next + 1) % self.values.len();
        value
    }
}
