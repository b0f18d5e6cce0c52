//! Job status aggregation
//!
//! Interprets the multi-job status payload of the pre-aggregations jobs
//! API and decides whether to keep polling, fail, or succeed.
//!
//! A [`JobBatch`] starts in `Submitted` with the token list returned by
//! the submit call. Each poll round feeds the latest status map through
//! [`JobBatch::observe`], which applies the transition rules in order:
//!
//! 1. any status containing the failure marker fails the batch,
//! 2. every status equal to `missing_partition` means there are no live
//!    jobs to wait on (a distinct hard failure),
//! 3. every status equal to `done` completes the batch,
//! 4. anything else keeps it polling.
//!
//! Terminal states are absorbing. The driver loop re-queries the full
//! original token set each round; the still-pending subset is recomputed
//! per round for progress reporting only.

mod types;

pub use types::{
    BatchState, JobStatus, RoundOutcome, StatusMap, FAILURE_MARKER, STATUS_DONE,
    STATUS_MISSING_PARTITION,
};

/// One submitted pre-aggregations build batch
#[derive(Debug, Clone)]
pub struct JobBatch {
    tokens: Vec<String>,
    state: BatchState,
}

impl JobBatch {
    /// Create a batch from the token list returned by the submit call
    pub fn new(tokens: Vec<String>) -> Self {
        Self {
            tokens,
            state: BatchState::Submitted,
        }
    }

    /// The full original token set; re-sent to the API every round
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Consume the batch, returning the token list
    pub fn into_tokens(self) -> Vec<String> {
        self.tokens
    }

    /// Current lifecycle state
    pub fn state(&self) -> &BatchState {
        &self.state
    }

    /// Feed the latest status map and transition.
    ///
    /// Terminal states are absorbing: once the batch resolved, further
    /// observations return the resolved outcome without re-evaluating.
    pub fn observe(&mut self, statuses: &StatusMap) -> RoundOutcome {
        match &self.state {
            BatchState::AllDone => return RoundOutcome::AllDone,
            BatchState::Failed(status) => return RoundOutcome::Failed(status.clone()),
            BatchState::NoLiveJobs => return RoundOutcome::NoLiveJobs,
            BatchState::Submitted | BatchState::Polling => {}
        }

        let outcome = evaluate(&self.tokens, statuses);
        self.state = match &outcome {
            RoundOutcome::Pending => BatchState::Polling,
            RoundOutcome::AllDone => BatchState::AllDone,
            RoundOutcome::Failed(status) => BatchState::Failed(status.clone()),
            RoundOutcome::NoLiveJobs => BatchState::NoLiveJobs,
        };
        outcome
    }

    /// Tokens not yet in terminal success, for progress reporting.
    ///
    /// A token absent from the status map counts as pending.
    pub fn pending_tokens(&self, statuses: &StatusMap) -> Vec<String> {
        self.tokens
            .iter()
            .filter(|token| !statuses.get(*token).is_some_and(JobStatus::is_done))
            .cloned()
            .collect()
    }
}

/// Apply the transition rules to one round's status map
fn evaluate(tokens: &[String], statuses: &StatusMap) -> RoundOutcome {
    if let Some(status) = tokens
        .iter()
        .filter_map(|token| statuses.get(token))
        .find(|status| status.is_failure())
    {
        return RoundOutcome::Failed(status.status.clone());
    }

    let all_missing = !tokens.is_empty()
        && tokens
            .iter()
            .all(|token| statuses.get(token).is_some_and(JobStatus::is_missing_partition));
    if all_missing {
        return RoundOutcome::NoLiveJobs;
    }

    let all_done = tokens
        .iter()
        .all(|token| statuses.get(token).is_some_and(JobStatus::is_done));
    if all_done {
        return RoundOutcome::AllDone;
    }

    RoundOutcome::Pending
}

#[cfg(test)]
mod tests;
