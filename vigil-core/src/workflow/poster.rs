//! Comment posting step
//!
//! Runs only after an external resume. Branches on the approval flag: a
//! rejected or comment-less run produces a status message without any
//! external call; an approved run with comments invokes the posting
//! collaborator exactly once.

use crate::state::{Comment, Message, ReviewState};
use crate::Result;
use async_trait::async_trait;
use tracing::info;

/// Status recorded when the human rejected the review
pub const REJECTED_MESSAGE: &str = "❌ Review NOT approved by human. No comments posted.";

/// Status recorded when an approved review has nothing to post
pub const NO_ISSUES_MESSAGE: &str = "✅ No issues found. Skipping comment posting.";

/// External collaborator that publishes approved comments
#[async_trait]
pub trait CommentSink: Send + Sync {
    /// Post the comments and return a human-readable result string
    async fn post_comments(
        &self,
        repo: &str,
        pr_number: u64,
        comments: &[Comment],
    ) -> Result<String>;
}

/// The comment posting step
pub struct Poster<S> {
    sink: S,
}

impl<S: CommentSink> Poster<S> {
    /// Create a poster from its posting collaborator
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    /// Post approved comments, or record why nothing was posted
    ///
    /// Returns the status message appended to the state's log. Posting
    /// failures propagate; there is no retry.
    pub async fn run(&self, state: &mut ReviewState) -> Result<String> {
        if !state.review_approved {
            state.push_message(Message::agent(REJECTED_MESSAGE));
            return Ok(REJECTED_MESSAGE.to_string());
        }

        if state.proposed_comments.is_empty() {
            state.push_message(Message::agent(NO_ISSUES_MESSAGE));
            return Ok(NO_ISSUES_MESSAGE.to_string());
        }

        let result = self
            .sink
            .post_comments(&state.repo_name, state.pr_number, &state.proposed_comments)
            .await?;

        info!(
            repo = %state.repo_name,
            pr = state.pr_number,
            count = state.proposed_comments.len(),
            "Posted review comments"
        );

        let message = format!("🚀 {}", result);
        state.push_message(Message::agent(message.clone()));
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Severity;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSink {
        calls: AtomicUsize,
        posted: Mutex<Vec<Comment>>,
    }

    #[async_trait]
    impl CommentSink for RecordingSink {
        async fn post_comments(
            &self,
            repo: &str,
            pr_number: u64,
            comments: &[Comment],
        ) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.posted.lock().unwrap().extend_from_slice(comments);
            Ok(format!(
                "Posted {} review comment(s) to {}#{}",
                comments.len(),
                repo,
                pr_number
            ))
        }
    }

    fn sample_comment() -> Comment {
        Comment::new("src/db.rs", 3, "SQL built by string concatenation", Severity::Critical)
    }

    #[tokio::test]
    async fn test_not_approved_posts_nothing() {
        let poster = Poster::new(RecordingSink::default());
        let mut state = ReviewState::new("acme/widgets", 42);
        state.proposed_comments.push(sample_comment());

        let message = poster.run(&mut state).await.unwrap();

        assert_eq!(message, REJECTED_MESSAGE);
        assert_eq!(poster.sink.calls.load(Ordering::SeqCst), 0);
        assert_eq!(state.last_message().unwrap().text, REJECTED_MESSAGE);
    }

    #[tokio::test]
    async fn test_approved_without_comments_posts_nothing() {
        let poster = Poster::new(RecordingSink::default());
        let mut state = ReviewState::new("acme/widgets", 42);
        state.review_approved = true;

        let message = poster.run(&mut state).await.unwrap();

        assert_eq!(message, NO_ISSUES_MESSAGE);
        assert_eq!(poster.sink.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_approved_with_comments_posts_once() {
        let poster = Poster::new(RecordingSink::default());
        let mut state = ReviewState::new("acme/widgets", 42);
        state.review_approved = true;
        state.proposed_comments.push(sample_comment());
        state
            .proposed_comments
            .push(Comment::new("src/lib.rs", 10, "unused import", Severity::Nitpick));

        let message = poster.run(&mut state).await.unwrap();

        assert_eq!(poster.sink.calls.load(Ordering::SeqCst), 1);
        assert_eq!(poster.sink.posted.lock().unwrap().len(), 2);
        assert!(message.starts_with("🚀 "));
        assert!(message.contains("Posted 2 review comment(s) to acme/widgets#42"));
        assert_eq!(state.last_message().unwrap().text, message);
    }
}
