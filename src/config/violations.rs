//! Configuration violations.

use thiserror::Error;

/// A single problem found while validating a [`MachineConfig`](super::MachineConfig).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigViolation {
    #[error("max_depth must be at least 1")]
    ZeroCapacity,

    #[error("max_depth {requested} exceeds the hard limit of {limit}")]
    CapacityTooLarge { requested: usize, limit: usize },

    #[error("history_limit {requested} exceeds the hard limit of {limit}")]
    HistoryTooLarge { requested: usize, limit: usize },
}
