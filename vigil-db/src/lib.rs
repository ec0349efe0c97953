//! Database layer for Vigil
//!
//! Provides durable storage for review run checkpoints: the full state
//! snapshot of each run, keyed by run identifier, written at phase
//! boundaries and mutated externally only by the approval decision.

pub mod error;
pub mod models;
pub mod repos;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub use error::{Error, Result};
pub use models::{Checkpoint, NewCheckpoint};
pub use repos::CheckpointRepository;

/// Database connection pool
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Create a new database connection from a file path
    pub async fn new(db_path: impl AsRef<Path>) -> Result<Self> {
        let db_path = db_path.as_ref();

        // Create parent directory if needed
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::Io(format!("Failed to create database directory: {}", e)))?;
        }

        let options = SqliteConnectOptions::from_str(&format!("sqlite://{}", db_path.display()))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        // Run migrations
        let migration_sql = include_str!("../migrations/001_checkpoints.sql");
        sqlx::query(migration_sql)
            .execute(&pool)
            .await
            .map_err(|e| Error::Migration(e.to_string()))?;

        tracing::debug!(path = %db_path.display(), "Opened checkpoint database");

        Ok(Self { pool })
    }

    /// Get the default database path (~/.cache/vigil/vigil.db)
    pub fn default_path() -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| Error::Io("Could not determine cache directory".to_string()))?;
        Ok(cache_dir.join("vigil").join("vigil.db"))
    }

    /// Create a database connection at the default path
    pub async fn default() -> Result<Self> {
        Self::new(Self::default_path()?).await
    }

    /// Get the underlying connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Get the checkpoint repository
    pub fn checkpoints(&self) -> CheckpointRepository<'_> {
        CheckpointRepository::new(&self.pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_database_creation() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        let _db = Database::new(&db_path).await.unwrap();
        assert!(db_path.exists());
    }

    #[tokio::test]
    async fn test_database_migration() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        let db = Database::new(&db_path).await.unwrap();

        // Verify the checkpoints table exists
        let result: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='checkpoints'",
        )
        .fetch_one(db.pool())
        .await
        .unwrap();
        assert_eq!(result.0, 1);
    }

    #[tokio::test]
    async fn test_reopen_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        let db = Database::new(&db_path).await.unwrap();
        db.checkpoints()
            .insert(&NewCheckpoint::new("run-1", "acme/widgets", 42, "done", "{}"))
            .await
            .unwrap();
        drop(db);

        // Second open re-runs the migration without clobbering data
        let db = Database::new(&db_path).await.unwrap();
        assert_eq!(db.checkpoints().count().await.unwrap(), 1);
    }
}
