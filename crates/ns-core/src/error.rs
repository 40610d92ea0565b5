//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant where they need to.

use thiserror::Error;

use crate::ElementId;

/// The base error type shared by the `ns-*` crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("{what} {id}: duration must be positive")]
    ZeroDuration { what: &'static str, id: ElementId },
}

/// Shorthand result type for `ns-core`.
pub type CoreResult<T> = Result<T, CoreError>;
