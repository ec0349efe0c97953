//! GitHub integration for Vigil PR review
//!
//! Implements the diff-source and comment-sink collaborator seams against
//! the GitHub REST API via octocrab.

pub mod client;
pub mod diff;
pub mod error;
pub mod review;

pub use client::{GitHubClient, RepoRef};
pub use error::{Error, Result};
