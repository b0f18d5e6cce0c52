//! Tests for the job status aggregator

use super::*;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;

fn tokens(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("token-{i}")).collect()
}

fn status_map(statuses: &[&str]) -> StatusMap {
    statuses
        .iter()
        .enumerate()
        .map(|(i, status)| {
            (
                format!("token-{i}"),
                JobStatus {
                    status: (*status).to_string(),
                    table: Some(format!("preaggs.orders_{i}")),
                    selector: json!({}),
                },
            )
        })
        .collect()
}

#[test_case(&["done", "done", "done"], RoundOutcome::AllDone; "all done completes")]
#[test_case(&["processing", "scheduled", "done"], RoundOutcome::Pending; "mixed keeps polling")]
#[test_case(&["processing", "processing", "processing"], RoundOutcome::Pending; "all in progress keeps polling")]
#[test_case(
    &["done", "done", "failure: returned error"],
    RoundOutcome::Failed("failure: returned error".to_string());
    "failure marker fails the batch"
)]
#[test_case(
    &["missing_partition", "missing_partition", "missing_partition"],
    RoundOutcome::NoLiveJobs;
    "all missing partitions is a distinct failure"
)]
#[test_case(
    &["missing_partition", "done", "processing"],
    RoundOutcome::Pending;
    "some missing partitions keeps polling"
)]
#[test_case(
    &["missing_partition", "missing_partition", "done"],
    RoundOutcome::Pending;
    "missing partitions mixed with done keeps polling"
)]
fn test_round_evaluation(statuses: &[&str], expected: RoundOutcome) {
    let mut batch = JobBatch::new(tokens(statuses.len()));
    assert_eq!(batch.observe(&status_map(statuses)), expected);
}

#[test]
fn test_failure_wins_over_missing_partitions() {
    // Rule order: the failure check runs before the all-missing check
    let mut batch = JobBatch::new(tokens(2));
    let outcome = batch.observe(&status_map(&["missing_partition", "failure: oom"]));
    assert_eq!(outcome, RoundOutcome::Failed("failure: oom".to_string()));
}

#[test]
fn test_failure_fails_even_with_jobs_still_in_progress() {
    let mut batch = JobBatch::new(tokens(3));
    let outcome = batch.observe(&status_map(&["processing", "failure: returned error", "done"]));
    assert_eq!(
        outcome,
        RoundOutcome::Failed("failure: returned error".to_string())
    );
    assert_eq!(
        batch.state(),
        &BatchState::Failed("failure: returned error".to_string())
    );
}

#[test]
fn test_token_absent_from_status_map_counts_as_pending() {
    let mut batch = JobBatch::new(tokens(3));
    // Only two of three tokens reported back
    let outcome = batch.observe(&status_map(&["done", "done"]));
    assert_eq!(outcome, RoundOutcome::Pending);
}

#[test]
fn test_transitions_submitted_to_polling_to_all_done() {
    let mut batch = JobBatch::new(tokens(2));
    assert_eq!(batch.state(), &BatchState::Submitted);

    assert_eq!(
        batch.observe(&status_map(&["processing", "processing"])),
        RoundOutcome::Pending
    );
    assert_eq!(batch.state(), &BatchState::Polling);

    assert_eq!(
        batch.observe(&status_map(&["done", "processing"])),
        RoundOutcome::Pending
    );
    assert_eq!(batch.state(), &BatchState::Polling);

    assert_eq!(
        batch.observe(&status_map(&["done", "done"])),
        RoundOutcome::AllDone
    );
    assert_eq!(batch.state(), &BatchState::AllDone);
}

#[test]
fn test_terminal_states_are_absorbing() {
    let mut batch = JobBatch::new(tokens(1));
    assert_eq!(
        batch.observe(&status_map(&["failure: oom"])),
        RoundOutcome::Failed("failure: oom".to_string())
    );

    // A later observation cannot move the batch out of Failed
    assert_eq!(
        batch.observe(&status_map(&["done"])),
        RoundOutcome::Failed("failure: oom".to_string())
    );
    assert_eq!(batch.state(), &BatchState::Failed("failure: oom".to_string()));
}

#[test]
fn test_pending_tokens_recomputed_per_round() {
    let batch = JobBatch::new(tokens(3));

    let pending = batch.pending_tokens(&status_map(&["done", "processing", "scheduled"]));
    assert_eq!(pending, vec!["token-1".to_string(), "token-2".to_string()]);

    let pending = batch.pending_tokens(&status_map(&["done", "done", "done"]));
    assert!(pending.is_empty());

    // Tokens the API did not report on stay pending
    let pending = batch.pending_tokens(&status_map(&["done"]));
    assert_eq!(pending, vec!["token-1".to_string(), "token-2".to_string()]);
}

#[test]
fn test_full_token_set_is_kept_for_requerying() {
    let mut batch = JobBatch::new(tokens(3));
    batch.observe(&status_map(&["done", "processing", "processing"]));
    // The original set is re-sent each round, never narrowed
    assert_eq!(batch.tokens().len(), 3);
}

#[test]
fn test_status_payload_deserialization() {
    let payload = json!({
        "be598e318484848cbb06291baa59ca3a": {
            "table": "preaggs.e_commerce__manual_updates20201201",
            "status": "missing_partition",
            "selector": {
                "cubes": ["ECommerce"],
                "timezones": ["UTC"],
            },
        }
    });

    let statuses: StatusMap = serde_json::from_value(payload).unwrap();
    let status = &statuses["be598e318484848cbb06291baa59ca3a"];
    assert!(status.is_missing_partition());
    assert!(!status.is_done());
    assert!(!status.is_failure());
    assert_eq!(
        status.table.as_deref(),
        Some("preaggs.e_commerce__manual_updates20201201")
    );
}

#[test]
fn test_job_status_predicates() {
    let done = JobStatus {
        status: STATUS_DONE.to_string(),
        table: None,
        selector: json!(null),
    };
    assert!(done.is_done());

    let failed = JobStatus {
        status: "failure: returned error".to_string(),
        table: None,
        selector: json!(null),
    };
    assert!(failed.is_failure());
    assert!(!failed.is_done());
}
