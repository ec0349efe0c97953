//! Database models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted run checkpoint
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Checkpoint {
    /// Run identifier (primary key)
    pub run_id: String,
    /// Target repository, as `owner/repo`
    pub repo_name: String,
    /// Pull request number
    pub pr_number: i64,
    /// Workflow phase at the time of the snapshot
    pub phase: String,
    /// Serialized state record
    pub state_json: String,
    /// When the run was first persisted
    pub created_at: DateTime<Utc>,
    /// When the row was last written
    pub updated_at: DateTime<Utc>,
}

/// Fields for inserting a new checkpoint
#[derive(Debug, Clone)]
pub struct NewCheckpoint {
    /// Run identifier
    pub run_id: String,
    /// Target repository, as `owner/repo`
    pub repo_name: String,
    /// Pull request number
    pub pr_number: i64,
    /// Workflow phase at the time of the snapshot
    pub phase: String,
    /// Serialized state record
    pub state_json: String,
}

impl NewCheckpoint {
    /// Create a new checkpoint record
    pub fn new(
        run_id: impl Into<String>,
        repo_name: impl Into<String>,
        pr_number: i64,
        phase: impl Into<String>,
        state_json: impl Into<String>,
    ) -> Self {
        Self {
            run_id: run_id.into(),
            repo_name: repo_name.into(),
            pr_number,
            phase: phase.into(),
            state_json: state_json.into(),
        }
    }
}
