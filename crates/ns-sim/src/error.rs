use ns_core::{CoreError, ElementId};
use ns_network::NetworkError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] CoreError),

    #[error("network is inconsistent: ramp {ramp} cannot reach any storehouse")]
    Inconsistent { ramp: ElementId },

    #[error("network error during tick: {0}")]
    Network(#[from] NetworkError),
}

pub type SimResult<T> = Result<T, SimError>;
