//! In-memory checkpoint store
//!
//! Keeps snapshots in a map for tests and embedders that do not need
//! durability across processes. Same contract as the database-backed
//! store, including the phase guards.

use super::{CheckpointStore, RunSnapshot};
use crate::workflow::RunPhase;
use crate::{Error, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

/// Checkpoint store backed by a process-local map
#[derive(Debug, Default)]
pub struct MemoryCheckpointStore {
    runs: Mutex<HashMap<String, RunSnapshot>>,
}

impl MemoryCheckpointStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CheckpointStore for MemoryCheckpointStore {
    async fn create(&self, snapshot: &RunSnapshot) -> Result<()> {
        let mut runs = self.runs.lock().await;
        if runs.contains_key(&snapshot.run_id) {
            return Err(Error::DuplicateRun(snapshot.run_id.clone()));
        }
        runs.insert(snapshot.run_id.clone(), snapshot.clone());
        Ok(())
    }

    async fn save(&self, snapshot: &RunSnapshot) -> Result<()> {
        let mut runs = self.runs.lock().await;
        if !runs.contains_key(&snapshot.run_id) {
            return Err(Error::RunNotFound(snapshot.run_id.clone()));
        }
        runs.insert(snapshot.run_id.clone(), snapshot.clone());
        Ok(())
    }

    async fn load(&self, run_id: &str) -> Result<Option<RunSnapshot>> {
        let runs = self.runs.lock().await;
        Ok(runs.get(run_id).cloned())
    }

    async fn transition(&self, run_id: &str, from: RunPhase, to: RunPhase) -> Result<bool> {
        let mut runs = self.runs.lock().await;
        match runs.get_mut(run_id) {
            Some(snapshot) if snapshot.phase == from => {
                snapshot.phase = to;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn set_approved(&self, run_id: &str, approved: bool) -> Result<()> {
        let mut runs = self.runs.lock().await;
        match runs.get_mut(run_id) {
            None => Err(Error::RunNotFound(run_id.to_string())),
            Some(snapshot) if snapshot.phase != RunPhase::AwaitingApproval => {
                Err(Error::RunNotSuspended {
                    run_id: run_id.to_string(),
                    phase: snapshot.phase,
                })
            }
            Some(snapshot) => {
                snapshot.state.review_approved = approved;
                Ok(())
            }
        }
    }

    async fn list(&self) -> Result<Vec<RunSnapshot>> {
        let runs = self.runs.lock().await;
        let mut snapshots: Vec<RunSnapshot> = runs.values().cloned().collect();
        snapshots.sort_by(|a, b| a.run_id.cmp(&b.run_id));
        Ok(snapshots)
    }

    async fn delete(&self, run_id: &str) -> Result<()> {
        let mut runs = self.runs.lock().await;
        runs.remove(run_id)
            .map(|_| ())
            .ok_or_else(|| Error::RunNotFound(run_id.to_string()))
    }
}
