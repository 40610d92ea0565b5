//! Fluent builder for constructing a [`Sim`].

use tracing::warn;

use ns_core::{ProbabilitySource, SimConfig, SimRng};
use ns_network::{Network, NetworkError};

use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`SimConfig`]: start tick, total ticks, seed, report interval
/// - [`Network`]: usually from `ns_io::load_network`
///
/// # Optional inputs (have defaults)
///
/// | Method                     | Default                          |
/// |----------------------------|----------------------------------|
/// | `.probability_source(s)`   | `SimRng::new(config.seed)`       |
/// | `.skip_verification()`     | network must be consistent       |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, network)
///     .probability_source(FixedSequence::constant(0.5))
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    config:  SimConfig,
    network: Network,
    source:  Option<Box<dyn ProbabilitySource>>,
    verify:  bool,
}

impl SimBuilder {
    pub fn new(config: SimConfig, network: Network) -> Self {
        Self { config, network, source: None, verify: true }
    }

    /// Replace the seeded RNG with another probability source.
    pub fn probability_source<S: ProbabilitySource + 'static>(mut self, source: S) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Build even if some ramp cannot reach a storehouse.  Packages from such
    /// a ramp accumulate in its buffers.
    pub fn skip_verification(mut self) -> Self {
        self.verify = false;
        self
    }

    /// Validate the config and the network and return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate()?;

        if self.verify {
            match self.network.check_consistency() {
                Ok(()) => {}
                Err(NetworkError::Inconsistent { ramp }) => {
                    return Err(SimError::Inconsistent { ramp });
                }
                Err(e) => return Err(e.into()),
            }
        } else if !self.network.is_consistent() {
            warn!(
                unreachable = ?self.network.unreachable_ramps(),
                "building simulation over an inconsistent network"
            );
        }

        let source: Box<dyn ProbabilitySource> = match self.source {
            Some(source) => source,
            None => Box::new(SimRng::new(self.config.seed)),
        };
        Ok(Sim::new(self.config, self.network, source))
    }
}
