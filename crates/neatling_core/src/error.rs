//! Error types for neatling_core.
//!
//! Only programming errors and broken invariants surface here. A structural mutation
//! that finds nothing eligible is a normal outcome and is reported as `Ok(None)`.

use neatling_data::{EdgeKey, Innovation, NodeId};
use thiserror::Error;

/// Main error type for genome operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NeatError {
    /// `think` was given an input vector of the wrong length.
    #[error("Input length mismatch: expected {expected} values, got {actual}")]
    InputLength { expected: usize, actual: usize },

    /// Add-node was invoked on a genome that has no connection to split.
    #[error("Cannot split a connection: genome has no connections")]
    NoConnections,

    /// A connection carries an innovation number the registry does not agree with.
    #[error("Registry inconsistency on edge {edge}: registry has {recorded:?}, connection has {found}")]
    RegistryInconsistency {
        edge: EdgeKey,
        recorded: Option<Innovation>,
        found: Innovation,
    },

    /// A node id that does not belong to the genome.
    #[error("Unknown node id: {0}")]
    UnknownNode(NodeId),

    /// A structural invariant of the genome does not hold.
    #[error("Invariant violation: {0}")]
    Invariant(String),
}

/// Result type alias for neatling_core operations.
pub type Result<T> = std::result::Result<T, NeatError>;

impl NeatError {
    /// Creates a new invariant violation error.
    #[must_use]
    pub fn invariant<S: Into<String>>(msg: S) -> Self {
        Self::Invariant(msg.into())
    }
}
