//! Job batch types
//!
//! These types model the pre-aggregations jobs API payloads and the
//! lifecycle of one submitted batch.

use crate::types::JsonValue;
use serde::Deserialize;
use std::collections::HashMap;

/// Terminal success status reported per job
pub const STATUS_DONE: &str = "done";

/// Blocked/no-data status: the job has no partition to build
pub const STATUS_MISSING_PARTITION: &str = "missing_partition";

/// Substring marking a failed job; the remote appends the reason after it
pub const FAILURE_MARKER: &str = "failure";

/// Status entry for one job token
#[derive(Debug, Clone, Deserialize)]
pub struct JobStatus {
    /// Status text (`done`, `missing_partition`, `processing`,
    /// `scheduled`, or `failure: <reason>`)
    pub status: String,

    /// Pre-aggregation table the job materializes
    #[serde(default)]
    pub table: Option<String>,

    /// Selector the job was scheduled for
    #[serde(default)]
    pub selector: JsonValue,
}

impl JobStatus {
    /// Check if this job reached terminal success
    pub fn is_done(&self) -> bool {
        self.status == STATUS_DONE
    }

    /// Check if this job reported the failure marker
    pub fn is_failure(&self) -> bool {
        self.status.contains(FAILURE_MARKER)
    }

    /// Check if this job is blocked with no partition to build
    pub fn is_missing_partition(&self) -> bool {
        self.status == STATUS_MISSING_PARTITION
    }
}

/// Latest statuses keyed by job token
pub type StatusMap = HashMap<String, JobStatus>;

/// Lifecycle state of a job batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchState {
    /// Tokens obtained, no statuses fetched yet
    Submitted,
    /// Statuses fetched at least once, jobs still running
    Polling,
    /// Every job reached terminal success
    AllDone,
    /// Some job reported the failure marker (carries its status text)
    Failed(String),
    /// Every job is blocked with no partition to build
    NoLiveJobs,
}

impl BatchState {
    /// Check if the batch is in a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::AllDone | Self::Failed(_) | Self::NoLiveJobs)
    }
}

/// Outcome of one poll round over a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundOutcome {
    /// Mixed in-progress/success statuses; keep polling
    Pending,
    /// Every job reported terminal success
    AllDone,
    /// A job reported the failure marker (carries its status text)
    Failed(String),
    /// Every job reported missing partitions; nothing live to wait on
    NoLiveJobs,
}
