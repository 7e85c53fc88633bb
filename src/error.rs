use thiserror::Error;

/// Top-level error type for the strand crate.
#[derive(Debug, Error)]
pub enum StrandError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors related to the vertex/edge store.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),
}

/// Errors raised by a straighten pass.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("operation interrupted")]
    Cancelled,

    #[error("edge selection is empty")]
    EmptySelection,

    #[error("edge island {index} has {endpoints} endpoints, expected 2")]
    InvalidIsland { index: usize, endpoints: usize },

    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: &'static str,
    },
}

impl OperationError {
    /// Creates an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        Self::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }
}

/// Convenience type alias for results using [`StrandError`].
pub type Result<T> = std::result::Result<T, StrandError>;
