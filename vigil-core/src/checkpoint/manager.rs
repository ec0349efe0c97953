//! Durable checkpoint storage backed by vigil-db
//!
//! Wraps the SQLite store, serializing the state record to JSON per run
//! row. The phase guards live in the database layer as conditional
//! updates, so concurrent resumes race on a single atomic statement.

use super::{CheckpointStore, RunSnapshot};
use crate::state::ReviewState;
use crate::workflow::RunPhase;
use crate::{Error, Result};
use async_trait::async_trait;
use std::path::Path;
use vigil_db::{Checkpoint, Database, NewCheckpoint};

/// Checkpoint store persisted in SQLite
pub struct CheckpointManager {
    db: Database,
}

impl CheckpointManager {
    /// Open the store at the default database path
    pub async fn new() -> Result<Self> {
        let db = Database::default().await.map_err(db_error)?;
        Ok(Self { db })
    }

    /// Open the store at a specific database path
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = Database::new(path).await.map_err(db_error)?;
        Ok(Self { db })
    }

    /// Wrap an already-open database
    pub fn with_database(db: Database) -> Self {
        Self { db }
    }

    /// The underlying database handle
    pub fn database(&self) -> &Database {
        &self.db
    }

    fn to_row(snapshot: &RunSnapshot) -> Result<NewCheckpoint> {
        let state_json = serde_json::to_string(&snapshot.state)?;
        Ok(NewCheckpoint::new(
            &snapshot.run_id,
            &snapshot.state.repo_name,
            snapshot.state.pr_number as i64,
            snapshot.phase.as_str(),
            state_json,
        ))
    }

    fn from_row(row: Checkpoint) -> Result<RunSnapshot> {
        let phase: RunPhase = row.phase.parse()?;
        let state: ReviewState = serde_json::from_str(&row.state_json)?;
        Ok(RunSnapshot::new(row.run_id, phase, state))
    }
}

fn db_error(err: vigil_db::Error) -> Error {
    Error::Checkpoint(err.to_string())
}

#[async_trait]
impl CheckpointStore for CheckpointManager {
    async fn create(&self, snapshot: &RunSnapshot) -> Result<()> {
        let row = Self::to_row(snapshot)?;
        self.db.checkpoints().insert(&row).await.map_err(|e| match e {
            vigil_db::Error::Conflict(_) => Error::DuplicateRun(snapshot.run_id.clone()),
            other => db_error(other),
        })
    }

    async fn save(&self, snapshot: &RunSnapshot) -> Result<()> {
        let state_json = serde_json::to_string(&snapshot.state)?;
        self.db
            .checkpoints()
            .update(&snapshot.run_id, snapshot.phase.as_str(), &state_json)
            .await
            .map_err(|e| match e {
                vigil_db::Error::NotFound(_) => Error::RunNotFound(snapshot.run_id.clone()),
                other => db_error(other),
            })
    }

    async fn load(&self, run_id: &str) -> Result<Option<RunSnapshot>> {
        let row = self
            .db
            .checkpoints()
            .find_by_run(run_id)
            .await
            .map_err(db_error)?;
        row.map(Self::from_row).transpose()
    }

    async fn transition(&self, run_id: &str, from: RunPhase, to: RunPhase) -> Result<bool> {
        self.db
            .checkpoints()
            .transition_phase(run_id, from.as_str(), to.as_str())
            .await
            .map_err(db_error)
    }

    async fn set_approved(&self, run_id: &str, approved: bool) -> Result<()> {
        let row = self
            .db
            .checkpoints()
            .find_by_run(run_id)
            .await
            .map_err(db_error)?
            .ok_or_else(|| Error::RunNotFound(run_id.to_string()))?;

        let phase: RunPhase = row.phase.parse()?;
        let mut state: ReviewState = serde_json::from_str(&row.state_json)?;
        state.review_approved = approved;
        let state_json = serde_json::to_string(&state)?;

        let updated = self
            .db
            .checkpoints()
            .update_state_if_phase(run_id, RunPhase::AwaitingApproval.as_str(), &state_json)
            .await
            .map_err(db_error)?;

        if !updated {
            return Err(Error::RunNotSuspended {
                run_id: run_id.to_string(),
                phase,
            });
        }

        Ok(())
    }

    async fn list(&self) -> Result<Vec<RunSnapshot>> {
        let rows = self.db.checkpoints().list_all().await.map_err(db_error)?;
        rows.into_iter().map(Self::from_row).collect()
    }

    async fn delete(&self, run_id: &str) -> Result<()> {
        self.db
            .checkpoints()
            .delete(run_id)
            .await
            .map_err(|e| match e {
                vigil_db::Error::NotFound(_) => Error::RunNotFound(run_id.to_string()),
                other => db_error(other),
            })
    }
}
