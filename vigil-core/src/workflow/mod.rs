//! Review workflow
//!
//! A run is a linear pipeline with a single human-in-the-loop checkpoint:
//! generate review comments, suspend for approval, then post or skip.

pub mod phase;
pub mod poster;
pub mod reviewer;
pub mod runner;

pub use phase::RunPhase;
pub use poster::{CommentSink, Poster, NO_ISSUES_MESSAGE, REJECTED_MESSAGE};
pub use reviewer::{DiffSource, ReviewAnalyst, Reviewer};
pub use runner::ReviewRunner;
