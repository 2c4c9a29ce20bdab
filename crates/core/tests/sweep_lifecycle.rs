//! Sweep lifecycle integration tests.
//!
//! These tests drive the full directory -> collect -> dispose sequence
//! against the mock helpdesk client:
//! - Bucket assignment and resolve ordering
//! - Pagination across multiple pages
//! - Disposal accounting with mixed outcomes
//! - Fatal vs. degraded error paths

use prbsweep_core::{
    run_sweep, Config, DisposalConfig, DisposalOutcome, HelpdeskConfig, HelpdeskError,
    MissingFieldPolicy, SweepError, TriageConfig, TriageError,
    testing::{fixtures, MockHelpdesk, UpdateBehavior},
};

fn test_config() -> Config {
    Config {
        helpdesk: HelpdeskConfig {
            base_url: "https://example.freshservice.com".to_string(),
            api_key: "test-key".to_string(),
            timeout_secs: 30,
            page_size: 100,
        },
        triage: TriageConfig {
            cutoff_year: 2022,
            offboarded_departments: vec![300, 400],
            open_status_max: 1,
            missing_field_policy: MissingFieldPolicy::Abort,
        },
        disposal: DisposalConfig { resolved_status: 6 },
    }
}

#[tokio::test]
async fn sweep_resolves_three_buckets_and_keeps_the_rest() {
    let mock = MockHelpdesk::new();
    mock.set_departments(vec![
        fixtures::department(300, "Offboarded Inc"),
        fixtures::department(500, "Acme Corp"),
    ])
    .await;
    mock.set_problem_pages(vec![vec![
        fixtures::problem(10, 1, "2021-05-01T00:00:00Z", 500, "Access"),
        fixtures::problem(11, 1, "2023-01-01T00:00:00Z", 0, "Access"),
        fixtures::problem(12, 1, "2023-01-01T00:00:00Z", 500, "Patching Event"),
        fixtures::problem(13, 1, "2023-01-01T00:00:00Z", 500, "Access"),
        fixtures::problem(14, 2, "2023-01-01T00:00:00Z", 500, "Access"),
    ]])
    .await;

    let report = run_sweep(&mock, &test_config()).await.unwrap();

    assert_eq!(report.buckets.old, vec![10]);
    assert_eq!(report.buckets.offboarded, vec![11]);
    assert_eq!(report.buckets.patching, vec![12]);
    assert_eq!(report.buckets.keep, vec![13]);
    assert_eq!(report.disposal.closed(), 3);
    assert!(report.disposal.not_closed().is_empty());

    // The keep ticket and the closed ticket were never updated.
    let updated: Vec<u64> = mock
        .recorded_updates()
        .await
        .into_iter()
        .map(|(id, _)| id)
        .collect();
    assert_eq!(updated, vec![10, 11, 12]);
}

#[tokio::test]
async fn sweep_collects_across_pages_in_traversal_order() {
    let mock = MockHelpdesk::new();
    mock.set_problem_pages(vec![
        vec![
            fixtures::problem(1, 1, "2021-01-01T00:00:00Z", 500, "Access"),
            fixtures::problem(2, 1, "2023-01-01T00:00:00Z", 500, "Access"),
        ],
        vec![
            fixtures::problem(3, 1, "2021-06-01T00:00:00Z", 500, "Access"),
            fixtures::problem(4, 1, "2023-01-01T00:00:00Z", 300, "Access"),
        ],
    ])
    .await;

    let report = run_sweep(&mock, &test_config()).await.unwrap();

    assert_eq!(mock.requested_pages().await, vec![1, 2]);
    // Oldest page first, API order within a page.
    assert_eq!(report.buckets.old, vec![1, 3]);
    assert_eq!(report.buckets.offboarded, vec![4]);
    assert_eq!(report.buckets.keep, vec![2]);
}

#[tokio::test]
async fn sweep_records_every_disposal_outcome() {
    let mock = MockHelpdesk::new();
    mock.set_problem_pages(vec![vec![
        fixtures::problem(10, 1, "2021-05-01T00:00:00Z", 500, "Access"),
        fixtures::problem(11, 1, "2023-01-01T00:00:00Z", 0, "Access"),
        fixtures::problem(12, 1, "2023-01-01T00:00:00Z", 500, "Patching Event"),
    ]])
    .await;
    mock.set_update_behavior(11, UpdateBehavior::EchoMismatch(999))
        .await;
    mock.set_update_behavior(12, UpdateBehavior::FailStatus(503, "unavailable".to_string()))
        .await;

    let report = run_sweep(&mock, &test_config()).await.unwrap();

    assert_eq!(report.disposal.attempted(), 3);
    assert_eq!(report.disposal.closed(), 1);
    assert_eq!(report.disposal.not_closed(), vec![11, 12]);
    assert_eq!(
        report.disposal.outcomes[1].1,
        DisposalOutcome::EchoMismatch { echoed: 999 }
    );
    assert!(matches!(
        &report.disposal.outcomes[2].1,
        DisposalOutcome::Failed { error } if error.contains("503")
    ));
}

#[tokio::test]
async fn sweep_aborts_on_unclassifiable_record() {
    let mock = MockHelpdesk::new();
    mock.set_problem_pages(vec![vec![prbsweep_core::helpdesk::Problem {
        id: Some(77),
        status: Some(1),
        ..Default::default()
    }]])
    .await;

    let result = run_sweep(&mock, &test_config()).await;

    assert!(matches!(
        result,
        Err(SweepError::Triage(TriageError::MissingField {
            field: "created_at",
            id: Some(77),
        }))
    ));
    assert_eq!(mock.update_count().await, 0);
}

#[tokio::test]
async fn sweep_with_skip_policy_drops_only_the_broken_record() {
    let mock = MockHelpdesk::new();
    mock.set_problem_pages(vec![vec![
        prbsweep_core::helpdesk::Problem {
            id: Some(77),
            status: Some(1),
            ..Default::default()
        },
        fixtures::problem(78, 1, "2020-01-01T00:00:00Z", 500, "Access"),
    ]])
    .await;

    let mut config = test_config();
    config.triage.missing_field_policy = MissingFieldPolicy::Skip;

    let report = run_sweep(&mock, &config).await.unwrap();

    assert_eq!(report.buckets.old, vec![78]);
    assert_eq!(report.disposal.closed(), 1);
}

#[tokio::test]
async fn sweep_fails_fast_on_read_error() {
    let mock = MockHelpdesk::new();
    mock.set_next_problems_error(HelpdeskError::Api {
        status: 429,
        body: "rate limited".to_string(),
    })
    .await;

    let result = run_sweep(&mock, &test_config()).await;

    assert!(matches!(
        result,
        Err(SweepError::Triage(TriageError::Helpdesk(
            HelpdeskError::Api { status: 429, .. }
        )))
    ));
    assert_eq!(mock.update_count().await, 0);
}

#[tokio::test]
async fn sweep_proceeds_when_directory_fetch_fails() {
    let mock = MockHelpdesk::new();
    mock.set_next_departments_error(HelpdeskError::ConnectionFailed(
        "no route to host".to_string(),
    ))
    .await;
    mock.set_problem_pages(vec![vec![fixtures::problem(
        5,
        1,
        "2023-01-01T00:00:00Z",
        300,
        "Access",
    )]])
    .await;

    let report = run_sweep(&mock, &test_config()).await.unwrap();

    assert_eq!(report.buckets.offboarded, vec![5]);
    assert_eq!(report.disposal.closed(), 1);
}

#[tokio::test]
async fn sweep_with_no_open_tickets_updates_nothing() {
    let mock = MockHelpdesk::new();
    mock.set_problem_pages(vec![vec![
        fixtures::problem(1, 2, "2021-01-01T00:00:00Z", 500, "Access"),
        fixtures::problem(2, 3, "2021-01-01T00:00:00Z", 500, "Access"),
    ]])
    .await;

    let report = run_sweep(&mock, &test_config()).await.unwrap();

    assert_eq!(report.buckets.total(), 0);
    assert_eq!(report.disposal.attempted(), 0);
    assert_eq!(mock.update_count().await, 0);
}
