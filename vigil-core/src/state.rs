//! Review run state
//!
//! The mutable record shared by the workflow steps. One [`ReviewState`]
//! exists per run; it is created when the run starts, mutated in place by
//! each step, and persisted as part of the run snapshot at the approval
//! gate.

use serde::{Deserialize, Serialize};

/// Severity of a review comment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Security vulnerabilities and similar must-fix findings
    Critical,
    /// Logic bugs, race conditions, performance problems
    Major,
    /// Style issues worth fixing
    Minor,
    /// Take-it-or-leave-it polish
    Nitpick,
}

impl Severity {
    /// Lowercase name, as serialized
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Major => "major",
            Severity::Minor => "minor",
            Severity::Nitpick => "nitpick",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s {
            "critical" => Ok(Severity::Critical),
            "major" => Ok(Severity::Major),
            "minor" => Ok(Severity::Minor),
            "nitpick" => Ok(Severity::Nitpick),
            other => Err(crate::Error::Other(format!("unknown severity: {}", other))),
        }
    }
}

/// A single proposed review comment, anchored to a changed line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Path of the file the comment applies to
    pub file_path: String,
    /// Line number in the changed file
    pub line_number: u64,
    /// The review text
    pub body: String,
    /// How serious the finding is
    pub severity: Severity,
}

impl Comment {
    /// Create a new comment
    pub fn new(
        file_path: impl Into<String>,
        line_number: u64,
        body: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            file_path: file_path.into(),
            line_number,
            body: body.into(),
            severity,
        }
    }
}

impl std::fmt::Display for Comment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{} [{}] {}",
            self.file_path, self.line_number, self.severity, self.body
        )
    }
}

/// Author role of a status message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A human participant
    User,
    /// The review agent
    Agent,
}

/// One entry in the append-only status log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Who produced the entry
    pub role: Role,
    /// Human-readable status text
    pub text: String,
}

impl Message {
    /// Create an agent-authored message
    pub fn agent(text: impl Into<String>) -> Self {
        Self {
            role: Role::Agent,
            text: text.into(),
        }
    }

    /// Create a user-authored message
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }
}

/// State record for a single review run
///
/// Owned by the workflow runner for the lifetime of the run. External
/// actors may only mutate [`ReviewState::review_approved`], and only while
/// the run is suspended at the approval gate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewState {
    /// Target repository, as `owner/repo`
    pub repo_name: String,
    /// Pull request number within that repository
    pub pr_number: u64,
    /// The fetched diff; `None` until fetched, then immutable for the run
    pub pr_diff: Option<String>,
    /// Comments produced by the review generator
    pub proposed_comments: Vec<Comment>,
    /// Whether a human approved posting; defaults to false
    pub review_approved: bool,
    /// Append-only log of human-readable status entries
    pub messages: Vec<Message>,
}

impl ReviewState {
    /// Create the initial state for a run
    pub fn new(repo_name: impl Into<String>, pr_number: u64) -> Self {
        Self {
            repo_name: repo_name.into(),
            pr_number,
            pr_diff: None,
            proposed_comments: Vec::new(),
            review_approved: false,
            messages: Vec::new(),
        }
    }

    /// Seed the state with an already-fetched diff
    pub fn with_diff(mut self, diff: impl Into<String>) -> Self {
        self.pr_diff = Some(diff.into());
        self
    }

    /// Whether the diff has been fetched
    pub fn has_diff(&self) -> bool {
        self.pr_diff.is_some()
    }

    /// Append a status entry to the log
    pub fn push_message(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// The most recent status entry, if any
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = ReviewState::new("acme/widgets", 42);
        assert_eq!(state.repo_name, "acme/widgets");
        assert_eq!(state.pr_number, 42);
        assert!(state.pr_diff.is_none());
        assert!(state.proposed_comments.is_empty());
        assert!(!state.review_approved);
        assert!(state.messages.is_empty());
    }

    #[test]
    fn test_with_diff() {
        let state = ReviewState::new("acme/widgets", 42).with_diff("+ added line");
        assert!(state.has_diff());
        assert_eq!(state.pr_diff.as_deref(), Some("+ added line"));
    }

    #[test]
    fn test_messages_append_in_order() {
        let mut state = ReviewState::new("acme/widgets", 42);
        state.push_message(Message::agent("first"));
        state.push_message(Message::user("second"));

        assert_eq!(state.messages.len(), 2);
        assert_eq!(state.messages[0].text, "first");
        assert_eq!(state.last_message().unwrap().text, "second");
        assert_eq!(state.last_message().unwrap().role, Role::User);
    }

    #[test]
    fn test_severity_roundtrip() {
        for severity in [
            Severity::Critical,
            Severity::Major,
            Severity::Minor,
            Severity::Nitpick,
        ] {
            let parsed: Severity = severity.as_str().parse().unwrap();
            assert_eq!(parsed, severity);
        }
        assert!("blocker".parse::<Severity>().is_err());
    }

    #[test]
    fn test_severity_serde_lowercase() {
        let json = serde_json::to_string(&Severity::Critical).unwrap();
        assert_eq!(json, "\"critical\"");

        let comment: Comment =
            serde_json::from_str(r#"{"file_path":"src/db.rs","line_number":7,"body":"x","severity":"nitpick"}"#)
                .unwrap();
        assert_eq!(comment.severity, Severity::Nitpick);
    }

    #[test]
    fn test_comment_display() {
        let comment = Comment::new("src/db.rs", 12, "string concatenation in SQL", Severity::Critical);
        assert_eq!(
            comment.to_string(),
            "src/db.rs:12 [critical] string concatenation in SQL"
        );
    }

    #[test]
    fn test_state_serde_roundtrip() {
        let mut state = ReviewState::new("acme/widgets", 42).with_diff("diff");
        state.proposed_comments.push(Comment::new("a.rs", 1, "b", Severity::Major));
        state.review_approved = true;
        state.push_message(Message::agent("done"));

        let json = serde_json::to_string(&state).unwrap();
        let back: ReviewState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.repo_name, state.repo_name);
        assert_eq!(back.proposed_comments, state.proposed_comments);
        assert!(back.review_approved);
        assert_eq!(back.messages, state.messages);
    }
}
