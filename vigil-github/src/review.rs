//! Pull request review posting

use crate::{Error, GitHubClient, RepoRef, Result};
use async_trait::async_trait;
use serde::Serialize;
use tracing::info;
use vigil_core::{Comment, CommentSink};

/// One line comment inside a review submission
#[derive(Debug, Clone, Serialize)]
struct ReviewCommentPayload {
    path: String,
    line: u64,
    side: &'static str,
    body: String,
}

impl From<&Comment> for ReviewCommentPayload {
    fn from(comment: &Comment) -> Self {
        Self {
            path: comment.file_path.clone(),
            line: comment.line_number,
            side: "RIGHT",
            body: format!("**[{}]** {}", comment.severity, comment.body),
        }
    }
}

/// Body of a review submission
#[derive(Debug, Clone, Serialize)]
struct CreateReviewPayload {
    body: String,
    event: &'static str,
    comments: Vec<ReviewCommentPayload>,
}

impl GitHubClient {
    /// Submit one review carrying all comments on a pull request
    pub async fn post_review(
        &self,
        repo: &str,
        pr_number: u64,
        comments: &[Comment],
    ) -> Result<String> {
        let repo_ref: RepoRef = repo.parse()?;

        let payload = CreateReviewPayload {
            body: format!("Automated review: {} comment(s)", comments.len()),
            event: "COMMENT",
            comments: comments.iter().map(ReviewCommentPayload::from).collect(),
        };

        let route = format!(
            "/repos/{}/{}/pulls/{}/reviews",
            repo_ref.owner, repo_ref.repo, pr_number
        );

        let _response: serde_json::Value = self
            .client()
            .post(route, Some(&payload))
            .await
            .map_err(|e| match &e {
                octocrab::Error::GitHub { source, .. }
                    if source.message.contains("Not Found") =>
                {
                    Error::PrNotFound(pr_number)
                }
                _ => Error::Api(e),
            })?;

        info!(
            repo = %repo_ref,
            pr = pr_number,
            count = comments.len(),
            "Submitted pull request review"
        );

        Ok(format!(
            "Posted {} review comment(s) to {}#{}",
            comments.len(),
            repo_ref,
            pr_number
        ))
    }
}

#[async_trait]
impl CommentSink for GitHubClient {
    async fn post_comments(
        &self,
        repo: &str,
        pr_number: u64,
        comments: &[Comment],
    ) -> vigil_core::Result<String> {
        self.post_review(repo, pr_number, comments)
            .await
            .map_err(|e| vigil_core::Error::Post(e.to_string()))
    }
}
