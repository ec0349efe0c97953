//! Review generation step
//!
//! Ensures the diff is present (fetching it once if absent), then asks the
//! reasoning collaborator for structured comments. An empty diff or a
//! clean analysis yields an empty comment list, not an error.

use crate::state::{Comment, ReviewState};
use crate::Result;
use async_trait::async_trait;
use tracing::{debug, info};

/// Source of pull request diffs
#[async_trait]
pub trait DiffSource: Send + Sync {
    /// Fetch the textual diff for a pull request
    async fn fetch_diff(&self, repo: &str, pr_number: u64) -> Result<String>;
}

/// External reasoning collaborator that turns a diff into review comments
#[async_trait]
pub trait ReviewAnalyst: Send + Sync {
    /// Analyze a diff and return the identified issues
    ///
    /// A diff with no findings yields an empty list.
    async fn analyze(&self, repo: &str, diff: &str) -> Result<Vec<Comment>>;
}

/// The review generation step
pub struct Reviewer<D, A> {
    diffs: D,
    analyst: A,
}

impl<D: DiffSource, A: ReviewAnalyst> Reviewer<D, A> {
    /// Create a reviewer from its collaborators
    pub fn new(diffs: D, analyst: A) -> Self {
        Self { diffs, analyst }
    }

    /// Populate `pr_diff` and `proposed_comments` on the state record
    ///
    /// Rerunning overwrites any previously proposed comments. Fetch and
    /// analysis failures propagate; there is no retry.
    pub async fn run(&self, state: &mut ReviewState) -> Result<()> {
        let diff = match &state.pr_diff {
            Some(diff) => diff.clone(),
            None => {
                debug!(
                    repo = %state.repo_name,
                    pr = state.pr_number,
                    "Fetching pull request diff"
                );
                let diff = self
                    .diffs
                    .fetch_diff(&state.repo_name, state.pr_number)
                    .await?;
                state.pr_diff = Some(diff.clone());
                diff
            }
        };

        let comments = self.analyst.analyze(&state.repo_name, &diff).await?;

        info!(
            repo = %state.repo_name,
            pr = state.pr_number,
            count = comments.len(),
            "Generated review comments"
        );

        state.proposed_comments = comments;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Severity;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StaticDiffs {
        diff: String,
        calls: AtomicUsize,
    }

    impl StaticDiffs {
        fn new(diff: &str) -> Self {
            Self {
                diff: diff.to_string(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl DiffSource for StaticDiffs {
        async fn fetch_diff(&self, _repo: &str, _pr_number: u64) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.diff.clone())
        }
    }

    struct StaticAnalyst {
        comments: Vec<Comment>,
        calls: AtomicUsize,
    }

    impl StaticAnalyst {
        fn new(comments: Vec<Comment>) -> Self {
            Self {
                comments,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ReviewAnalyst for StaticAnalyst {
        async fn analyze(&self, _repo: &str, _diff: &str) -> Result<Vec<Comment>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.comments.clone())
        }
    }

    #[tokio::test]
    async fn test_fetches_diff_when_absent() {
        let reviewer = Reviewer::new(
            StaticDiffs::new("+ let q = format!(\"SELECT {}\", input);"),
            StaticAnalyst::new(vec![Comment::new(
                "src/db.rs",
                3,
                "SQL built by string concatenation",
                Severity::Critical,
            )]),
        );

        let mut state = ReviewState::new("acme/widgets", 42);
        reviewer.run(&mut state).await.unwrap();

        assert!(state.has_diff());
        assert_eq!(state.proposed_comments.len(), 1);
        assert_eq!(reviewer.diffs.calls.load(Ordering::SeqCst), 1);
        assert_eq!(reviewer.analyst.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_skips_fetch_when_diff_present() {
        let reviewer = Reviewer::new(
            StaticDiffs::new("unused"),
            StaticAnalyst::new(Vec::new()),
        );

        let mut state = ReviewState::new("acme/widgets", 42).with_diff("+ fn main() {}");
        reviewer.run(&mut state).await.unwrap();

        assert_eq!(reviewer.diffs.calls.load(Ordering::SeqCst), 0);
        assert_eq!(state.pr_diff.as_deref(), Some("+ fn main() {}"));
    }

    #[tokio::test]
    async fn test_clean_diff_yields_empty_comments() {
        let reviewer = Reviewer::new(StaticDiffs::new(""), StaticAnalyst::new(Vec::new()));

        let mut state = ReviewState::new("acme/widgets", 42);
        reviewer.run(&mut state).await.unwrap();

        assert!(state.proposed_comments.is_empty());
    }

    #[tokio::test]
    async fn test_rerun_overwrites_comments() {
        let reviewer = Reviewer::new(
            StaticDiffs::new("+ x"),
            StaticAnalyst::new(vec![Comment::new("a.rs", 1, "only finding", Severity::Minor)]),
        );

        let mut state = ReviewState::new("acme/widgets", 42);
        state
            .proposed_comments
            .push(Comment::new("stale.rs", 9, "stale", Severity::Major));

        reviewer.run(&mut state).await.unwrap();

        assert_eq!(state.proposed_comments.len(), 1);
        assert_eq!(state.proposed_comments[0].file_path, "a.rs");
    }
}
