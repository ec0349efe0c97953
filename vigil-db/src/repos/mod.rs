//! Repository modules for database access

pub mod checkpoints;

pub use checkpoints::CheckpointRepository;
