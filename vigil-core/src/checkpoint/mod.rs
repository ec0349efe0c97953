//! Checkpoint persistence for review runs
//!
//! Suspension is a durable snapshot, not a blocked thread: the runner
//! writes the full state record at the approval gate and returns control
//! to the caller. Resuming loads the snapshot and re-enters the workflow
//! at the recorded phase.

pub mod memory;

#[cfg(feature = "database")]
pub mod manager;

use crate::state::ReviewState;
use crate::workflow::RunPhase;
use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use memory::MemoryCheckpointStore;

#[cfg(feature = "database")]
pub use manager::CheckpointManager;

/// A point-in-time snapshot of a review run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSnapshot {
    /// Identifier distinguishing this run from all others in the store
    pub run_id: String,
    /// Phase the run was in when the snapshot was taken
    pub phase: RunPhase,
    /// The full state record
    pub state: ReviewState,
}

impl RunSnapshot {
    /// Create a snapshot
    pub fn new(run_id: impl Into<String>, phase: RunPhase, state: ReviewState) -> Self {
        Self {
            run_id: run_id.into(),
            phase,
            state,
        }
    }
}

/// Durable storage for run snapshots, keyed by run identifier
///
/// The workflow runner is the only writer, with one exception: the
/// external approval decision is applied directly to the stored record via
/// [`CheckpointStore::set_approved`] while the run is suspended.
#[async_trait]
pub trait CheckpointStore: Send + Sync {
    /// Insert a snapshot for a new run
    ///
    /// Fails with [`crate::Error::DuplicateRun`] if the run id exists.
    async fn create(&self, snapshot: &RunSnapshot) -> Result<()>;

    /// Overwrite the snapshot of an existing run
    async fn save(&self, snapshot: &RunSnapshot) -> Result<()>;

    /// Load a snapshot by run id
    async fn load(&self, run_id: &str) -> Result<Option<RunSnapshot>>;

    /// Atomically advance the stored phase from `from` to `to`
    ///
    /// Returns false when the run is missing or not in `from`, including
    /// when another resume claimed it first.
    async fn transition(&self, run_id: &str, from: RunPhase, to: RunPhase) -> Result<bool>;

    /// Record the external approval decision on the stored state
    ///
    /// Only valid while the run is suspended at the approval gate.
    async fn set_approved(&self, run_id: &str, approved: bool) -> Result<()>;

    /// All stored snapshots
    async fn list(&self) -> Result<Vec<RunSnapshot>>;

    /// Remove a run from the store
    async fn delete(&self, run_id: &str) -> Result<()>;
}
