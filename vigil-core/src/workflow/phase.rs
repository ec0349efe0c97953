//! Run phases
//!
//! A review run moves through a fixed, linear phase graph:
//! start -> reviewing -> awaiting-approval -> posting -> done. The only
//! gated edge is awaiting-approval -> posting, which requires an explicit
//! external resume. There is no way to skip the review or re-enter the
//! gate; each run is single-pass.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Phase of a review run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RunPhase {
    /// Run created, nothing executed yet
    Start,
    /// Review generator executing
    Reviewing,
    /// Suspended at the approval gate
    AwaitingApproval,
    /// Poster executing after an external resume
    Posting,
    /// Terminal
    Done,
}

impl RunPhase {
    /// Kebab-case name, as persisted
    pub fn as_str(&self) -> &'static str {
        match self {
            RunPhase::Start => "start",
            RunPhase::Reviewing => "reviewing",
            RunPhase::AwaitingApproval => "awaiting-approval",
            RunPhase::Posting => "posting",
            RunPhase::Done => "done",
        }
    }

    /// Whether `next` is reachable from this phase
    pub fn can_advance_to(&self, next: RunPhase) -> bool {
        matches!(
            (self, next),
            (RunPhase::Start, RunPhase::Reviewing)
                | (RunPhase::Reviewing, RunPhase::AwaitingApproval)
                | (RunPhase::AwaitingApproval, RunPhase::Posting)
                | (RunPhase::Posting, RunPhase::Done)
        )
    }

    /// Validated transition to the next phase
    pub fn advance_to(self, next: RunPhase) -> Result<RunPhase> {
        if !self.can_advance_to(next) {
            return Err(Error::InvalidTransition {
                from: self,
                to: next,
            });
        }

        tracing::debug!(from = %self, to = %next, "Run phase transition");

        Ok(next)
    }

    /// Whether the run has finished
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunPhase::Done)
    }
}

impl std::fmt::Display for RunPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RunPhase {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "start" => Ok(RunPhase::Start),
            "reviewing" => Ok(RunPhase::Reviewing),
            "awaiting-approval" => Ok(RunPhase::AwaitingApproval),
            "posting" => Ok(RunPhase::Posting),
            "done" => Ok(RunPhase::Done),
            other => Err(Error::Other(format!("unknown run phase: {}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_transitions() {
        let phase = RunPhase::Start;
        let phase = phase.advance_to(RunPhase::Reviewing).unwrap();
        let phase = phase.advance_to(RunPhase::AwaitingApproval).unwrap();
        let phase = phase.advance_to(RunPhase::Posting).unwrap();
        let phase = phase.advance_to(RunPhase::Done).unwrap();
        assert!(phase.is_terminal());
    }

    #[test]
    fn test_no_skipping_the_gate() {
        assert!(!RunPhase::Reviewing.can_advance_to(RunPhase::Posting));
        assert!(!RunPhase::Start.can_advance_to(RunPhase::AwaitingApproval));
        assert!(!RunPhase::AwaitingApproval.can_advance_to(RunPhase::Done));
    }

    #[test]
    fn test_no_reentry() {
        assert!(!RunPhase::Posting.can_advance_to(RunPhase::AwaitingApproval));
        assert!(!RunPhase::Done.can_advance_to(RunPhase::Start));
        assert!(!RunPhase::Done.can_advance_to(RunPhase::Reviewing));
    }

    #[test]
    fn test_invalid_transition_error() {
        let result = RunPhase::Start.advance_to(RunPhase::Done);
        assert!(matches!(
            result,
            Err(Error::InvalidTransition {
                from: RunPhase::Start,
                to: RunPhase::Done,
            })
        ));
    }

    #[test]
    fn test_str_roundtrip() {
        for phase in [
            RunPhase::Start,
            RunPhase::Reviewing,
            RunPhase::AwaitingApproval,
            RunPhase::Posting,
            RunPhase::Done,
        ] {
            let parsed: RunPhase = phase.as_str().parse().unwrap();
            assert_eq!(parsed, phase);
        }
        assert!("paused".parse::<RunPhase>().is_err());
    }

    #[test]
    fn test_serde_kebab_case() {
        let json = serde_json::to_string(&RunPhase::AwaitingApproval).unwrap();
        assert_eq!(json, "\"awaiting-approval\"");
    }
}
