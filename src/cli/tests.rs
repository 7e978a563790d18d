//! Tests for command dispatch.

use rstest::rstest;
use serde_json::json;
use stash_pulls::{PullRequestService, StashConfig, StashError, TransportResponse};

use super::run;
use super::test_utils::CapturingTransport;

const ROOT: &str = "rest/api/1.0/projects/PRJ/repos/repo/pull-requests";

fn config(command: Option<&str>, pr_number: Option<u64>) -> StashConfig {
    StashConfig {
        repo: Some("PRJ/repo".to_owned()),
        command: command.map(ToOwned::to_owned),
        pr_number,
        ..StashConfig::default()
    }
}

async fn run_with(
    config: &StashConfig,
    transport: CapturingTransport,
) -> (Result<(), StashError>, String, Vec<String>) {
    let service = PullRequestService::new(transport.clone());
    let mut buffer = Vec::new();
    let result = run(config, &service, &mut buffer).await;
    let output = String::from_utf8(buffer).expect("output should be UTF-8");
    (result, output, transport.paths())
}

#[tokio::test]
async fn show_fetches_single_pull_request() {
    let transport = CapturingTransport::answering(Ok(TransportResponse::json(
        200,
        json!({ "id": 42, "title": "Tidy", "state": "OPEN" }),
    )));

    let (result, output, paths) = run_with(&config(None, Some(42)), transport).await;

    assert_eq!(result, Ok(()));
    assert_eq!(paths, vec![format!("{ROOT}/42")]);
    assert!(output.contains("PR #42 [open]"), "unexpected output: {output}");
}

#[tokio::test]
async fn list_is_default_without_number() {
    let transport = CapturingTransport::answering(Ok(TransportResponse::json(
        200,
        json!({ "isLastPage": false, "values": [{ "id": 1, "title": "One" }] }),
    )));

    let (result, output, paths) = run_with(&config(None, None), transport).await;

    assert_eq!(result, Ok(()));
    assert_eq!(paths, vec![format!("{ROOT}?state=OPEN&limit=25")]);
    assert!(output.contains("--page 2"), "unexpected output: {output}");
}

#[rstest]
#[case::comments("comments", "activities")]
#[case::commits("commits", "commits")]
#[case::changes("changes", "changes")]
#[tokio::test]
async fn pull_request_listings_use_their_endpoint(#[case] command: &str, #[case] endpoint: &str) {
    let transport = CapturingTransport::answering(Ok(TransportResponse::json(
        200,
        json!({ "isLastPage": true, "values": [] }),
    )));

    let (result, _, paths) = run_with(&config(Some(command), Some(5)), transport).await;

    assert_eq!(result, Ok(()));
    assert_eq!(paths, vec![format!("{ROOT}/5/{endpoint}?limit=25")]);
}

#[tokio::test]
async fn missing_number_fails_before_any_request() {
    let transport = CapturingTransport::default();

    let (result, _, paths) = run_with(&config(Some("commits"), None), transport).await;

    assert!(
        matches!(result, Err(StashError::Configuration { .. })),
        "expected Configuration, got {result:?}"
    );
    assert!(paths.is_empty());
}

#[tokio::test]
async fn service_errors_are_returned() {
    let transport = CapturingTransport::answering(Err(StashError::Authentication {
        message: "bad token".to_owned(),
    }));

    let (result, output, _) = run_with(&config(Some("show"), Some(1)), transport).await;

    assert_eq!(
        result,
        Err(StashError::Authentication {
            message: "bad token".to_owned()
        })
    );
    assert!(output.is_empty());
}
