//! Workflow runner
//!
//! Sequences the review generation step, the approval gate, and the
//! posting step. Every run suspends unconditionally before posting: the
//! runner persists the full state record and returns. Resuming claims the
//! suspended run atomically and continues from the gate without
//! re-executing the review.

use crate::checkpoint::{CheckpointStore, RunSnapshot};
use crate::state::ReviewState;
use crate::workflow::phase::RunPhase;
use crate::workflow::poster::{CommentSink, Poster};
use crate::workflow::reviewer::{DiffSource, ReviewAnalyst, Reviewer};
use crate::{Error, Result};
use tracing::info;

/// Runs the review workflow for one repository/pull-request pair at a time
///
/// Owns its collaborators; construct one explicitly per process rather
/// than sharing a global instance.
pub struct ReviewRunner<D, A, S, C> {
    reviewer: Reviewer<D, A>,
    poster: Poster<S>,
    store: C,
}

impl<D, A, S, C> ReviewRunner<D, A, S, C>
where
    D: DiffSource,
    A: ReviewAnalyst,
    S: CommentSink,
    C: CheckpointStore,
{
    /// Create a runner from its collaborators
    pub fn new(diffs: D, analyst: A, sink: S, store: C) -> Self {
        Self {
            reviewer: Reviewer::new(diffs, analyst),
            poster: Poster::new(sink),
            store,
        }
    }

    /// The checkpoint store backing this runner
    pub fn store(&self) -> &C {
        &self.store
    }

    /// Execute a new run up to the approval gate
    ///
    /// Fetches the diff, generates comments, persists the snapshot in the
    /// awaiting-approval phase, and returns it. The run then waits for an
    /// external [`ReviewRunner::set_approved`] + [`ReviewRunner::resume`];
    /// there is no timeout.
    pub async fn start(
        &self,
        run_id: &str,
        repo: impl Into<String>,
        pr_number: u64,
    ) -> Result<RunSnapshot> {
        if self.store.load(run_id).await?.is_some() {
            return Err(Error::DuplicateRun(run_id.to_string()));
        }

        let mut state = ReviewState::new(repo, pr_number);

        info!(
            run_id,
            repo = %state.repo_name,
            pr = state.pr_number,
            "Starting review run"
        );

        let phase = RunPhase::Start.advance_to(RunPhase::Reviewing)?;
        self.reviewer.run(&mut state).await?;
        let phase = phase.advance_to(RunPhase::AwaitingApproval)?;

        let snapshot = RunSnapshot::new(run_id, phase, state);
        self.store.create(&snapshot).await?;

        info!(run_id, "Run suspended awaiting human approval");

        Ok(snapshot)
    }

    /// Record the human decision on a suspended run
    ///
    /// The mutation is applied directly to the stored snapshot and is only
    /// valid while the run is at the approval gate.
    pub async fn set_approved(&self, run_id: &str, approved: bool) -> Result<()> {
        self.store.set_approved(run_id, approved).await
    }

    /// Resume a suspended run from the approval gate
    ///
    /// Claims the run atomically; a run that is missing, never reached the
    /// gate, already finished, or was claimed by a concurrent resume is
    /// rejected. The review step is not re-executed: the poster runs on
    /// the persisted diff and comments exactly as suspended.
    pub async fn resume(&self, run_id: &str) -> Result<(RunSnapshot, String)> {
        let claimed = self
            .store
            .transition(run_id, RunPhase::AwaitingApproval, RunPhase::Posting)
            .await?;

        if !claimed {
            return Err(match self.store.load(run_id).await? {
                None => Error::RunNotFound(run_id.to_string()),
                Some(snapshot) => Error::RunNotSuspended {
                    run_id: run_id.to_string(),
                    phase: snapshot.phase,
                },
            });
        }

        let mut snapshot = self
            .store
            .load(run_id)
            .await?
            .ok_or_else(|| Error::RunNotFound(run_id.to_string()))?;

        info!(
            run_id,
            approved = snapshot.state.review_approved,
            "Resuming run from approval gate"
        );

        let message = self.poster.run(&mut snapshot.state).await?;

        snapshot.phase = snapshot.phase.advance_to(RunPhase::Done)?;
        self.store.save(&snapshot).await?;

        Ok((snapshot, message))
    }
}
