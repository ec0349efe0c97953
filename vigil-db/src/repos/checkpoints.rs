//! Repository for run checkpoint operations

use chrono::Utc;
use sqlx::SqlitePool;

use crate::error::{Error, Result};
use crate::models::{Checkpoint, NewCheckpoint};

/// Repository for managing run checkpoints
pub struct CheckpointRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CheckpointRepository<'a> {
    /// Create a new repository instance
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a checkpoint for a new run
    ///
    /// Fails with [`Error::Conflict`] if the run id already exists.
    pub async fn insert(&self, checkpoint: &NewCheckpoint) -> Result<()> {
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO checkpoints (
                run_id, repo_name, pr_number, phase, state_json,
                created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&checkpoint.run_id)
        .bind(&checkpoint.repo_name)
        .bind(checkpoint.pr_number)
        .bind(&checkpoint.phase)
        .bind(&checkpoint.state_json)
        .bind(now)
        .bind(now)
        .execute(self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => Error::Conflict(format!(
                "Run {} already exists",
                checkpoint.run_id
            )),
            _ => Error::Sqlx(e),
        })?;

        Ok(())
    }

    /// Find a checkpoint by run id
    pub async fn find_by_run(&self, run_id: &str) -> Result<Option<Checkpoint>> {
        let checkpoint = sqlx::query_as::<_, Checkpoint>(
            r#"
            SELECT run_id, repo_name, pr_number, phase, state_json,
                   created_at, updated_at
            FROM checkpoints
            WHERE run_id = ?
            "#,
        )
        .bind(run_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(checkpoint)
    }

    /// Overwrite the phase and state of an existing run
    pub async fn update(&self, run_id: &str, phase: &str, state_json: &str) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE checkpoints
            SET phase = ?, state_json = ?, updated_at = ?
            WHERE run_id = ?
            "#,
        )
        .bind(phase)
        .bind(state_json)
        .bind(Utc::now())
        .bind(run_id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("Run {} not found", run_id)));
        }

        Ok(())
    }

    /// Atomically advance the phase from `from` to `to`
    ///
    /// Returns false when the run is missing or not in `from`. The
    /// conditional update is the concurrency guard for resumes.
    pub async fn transition_phase(&self, run_id: &str, from: &str, to: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE checkpoints
            SET phase = ?, updated_at = ?
            WHERE run_id = ? AND phase = ?
            "#,
        )
        .bind(to)
        .bind(Utc::now())
        .bind(run_id)
        .bind(from)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Overwrite the state only while the run is in the given phase
    ///
    /// Returns false when the run is missing or in a different phase.
    pub async fn update_state_if_phase(
        &self,
        run_id: &str,
        phase: &str,
        state_json: &str,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE checkpoints
            SET state_json = ?, updated_at = ?
            WHERE run_id = ? AND phase = ?
            "#,
        )
        .bind(state_json)
        .bind(Utc::now())
        .bind(run_id)
        .bind(phase)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List all checkpoints, most recently created first
    pub async fn list_all(&self) -> Result<Vec<Checkpoint>> {
        let checkpoints = sqlx::query_as::<_, Checkpoint>(
            r#"
            SELECT run_id, repo_name, pr_number, phase, state_json,
                   created_at, updated_at
            FROM checkpoints
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(checkpoints)
    }

    /// Delete a checkpoint by run id
    pub async fn delete(&self, run_id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM checkpoints WHERE run_id = ?")
            .bind(run_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("Run {} not found", run_id)));
        }

        Ok(())
    }

    /// Count stored checkpoints
    pub async fn count(&self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM checkpoints")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;
    use tempfile::TempDir;

    async fn setup_db() -> (TempDir, Database) {
        let temp_dir = TempDir::new().unwrap();
        let db = Database::new(temp_dir.path().join("test.db")).await.unwrap();
        (temp_dir, db)
    }

    fn sample(run_id: &str) -> NewCheckpoint {
        NewCheckpoint::new(
            run_id,
            "acme/widgets",
            42,
            "awaiting-approval",
            r#"{"repo_name":"acme/widgets","pr_number":42}"#,
        )
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let (_dir, db) = setup_db().await;
        let repo = db.checkpoints();

        repo.insert(&sample("run-1")).await.unwrap();

        let found = repo.find_by_run("run-1").await.unwrap().unwrap();
        assert_eq!(found.repo_name, "acme/widgets");
        assert_eq!(found.pr_number, 42);
        assert_eq!(found.phase, "awaiting-approval");

        assert!(repo.find_by_run("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_duplicate_conflicts() {
        let (_dir, db) = setup_db().await;
        let repo = db.checkpoints();

        repo.insert(&sample("run-1")).await.unwrap();
        let result = repo.insert(&sample("run-1")).await;
        assert!(matches!(result, Err(Error::Conflict(_))));
    }

    #[tokio::test]
    async fn test_update() {
        let (_dir, db) = setup_db().await;
        let repo = db.checkpoints();

        repo.insert(&sample("run-1")).await.unwrap();
        repo.update("run-1", "done", r#"{"review_approved":true}"#)
            .await
            .unwrap();

        let found = repo.find_by_run("run-1").await.unwrap().unwrap();
        assert_eq!(found.phase, "done");
        assert!(found.state_json.contains("review_approved"));

        let result = repo.update("missing", "done", "{}").await;
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn test_transition_phase_is_atomic_guard() {
        let (_dir, db) = setup_db().await;
        let repo = db.checkpoints();

        repo.insert(&sample("run-1")).await.unwrap();

        assert!(repo
            .transition_phase("run-1", "awaiting-approval", "posting")
            .await
            .unwrap());

        // Phase moved on; a second identical claim finds no matching row
        assert!(!repo
            .transition_phase("run-1", "awaiting-approval", "posting")
            .await
            .unwrap());

        assert!(!repo
            .transition_phase("missing", "awaiting-approval", "posting")
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_update_state_if_phase() {
        let (_dir, db) = setup_db().await;
        let repo = db.checkpoints();

        repo.insert(&sample("run-1")).await.unwrap();

        assert!(repo
            .update_state_if_phase("run-1", "awaiting-approval", r#"{"review_approved":true}"#)
            .await
            .unwrap());

        assert!(!repo
            .update_state_if_phase("run-1", "posting", "{}")
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_list_and_delete() {
        let (_dir, db) = setup_db().await;
        let repo = db.checkpoints();

        repo.insert(&sample(&uuid::Uuid::new_v4().to_string()))
            .await
            .unwrap();
        repo.insert(&sample(&uuid::Uuid::new_v4().to_string()))
            .await
            .unwrap();

        let all = repo.list_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(repo.count().await.unwrap(), 2);

        repo.delete(&all[0].run_id).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 1);

        let result = repo.delete("missing").await;
        assert!(matches!(result, Err(Error::NotFound(_))));
    }
}
