//! Error types for Vigil

use crate::workflow::RunPhase;
use thiserror::Error;

/// Result type alias for Vigil operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for Vigil operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Diff fetch failure
    #[error("Diff fetch error: {0}")]
    Diff(String),

    /// Review analysis failure
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Comment posting failure
    #[error("Posting error: {0}")]
    Post(String),

    /// Checkpoint store failure
    #[error("Checkpoint error: {0}")]
    Checkpoint(String),

    /// No persisted run with the given identifier
    #[error("Run {0} not found")]
    RunNotFound(String),

    /// A run with the given identifier already exists
    #[error("Run {0} already exists")]
    DuplicateRun(String),

    /// The run is not suspended at the approval gate
    #[error("Run {run_id} is not awaiting approval (phase: {phase})")]
    RunNotSuspended {
        /// The run identifier
        run_id: String,
        /// The phase the run was actually in
        phase: RunPhase,
    },

    /// Attempted phase transition outside the workflow graph
    #[error("Invalid phase transition from {from} to {to}")]
    InvalidTransition {
        /// The current phase
        from: RunPhase,
        /// The requested phase
        to: RunPhase,
    },

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}
