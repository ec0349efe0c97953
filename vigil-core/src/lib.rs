//! Vigil Core - Core library for human-gated automated PR review
//!
//! This crate provides the review workflow: fetch a pull request diff,
//! generate structured review comments, suspend for human approval, and
//! post the approved comments. External collaborators (diff source,
//! reasoning model, posting target, checkpoint storage) plug in behind
//! traits.

pub mod checkpoint;
pub mod config;
pub mod error;
pub mod secrets;
pub mod state;
pub mod workflow;

pub use checkpoint::{CheckpointStore, MemoryCheckpointStore, RunSnapshot};
pub use config::Config;
pub use error::{Error, Result};
pub use secrets::Secrets;
pub use state::{Comment, Message, ReviewState, Role, Severity};
pub use workflow::{CommentSink, DiffSource, ReviewAnalyst, ReviewRunner, RunPhase};

#[cfg(feature = "database")]
pub use checkpoint::CheckpointManager;
