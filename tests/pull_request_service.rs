//! End-to-end tests of the pull request service over HTTP.

use rstest::{fixture, rstest};
use serde_json::{Value, json};
use stash_pulls::{
    CommentInput, CommentKind, HttpTransport, HttpTransportConfig, ListOptions, PageHints,
    PullRequestInput, PullRequestListOptions, PullRequestService, PullRequestStateFilter,
    StashError,
};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ROOT: &str = "/rest/api/1.0/projects/PRJ/repos/repo/pull-requests";

#[fixture]
fn pull_request_json() -> Value {
    json!({
        "id": 12,
        "version": 0,
        "title": "Add login",
        "description": "Implements OAuth",
        "state": "OPEN",
        "open": true,
        "closed": false,
        "createdDate": 1_700_000_000_999_i64,
        "updatedDate": 1_700_000_100_000_i64,
        "fromRef": {
            "id": "refs/heads/feature-x",
            "displayId": "feature-x",
            "latestCommit": "aaa111",
            "repository": { "slug": "repo", "project": { "key": "PRJ" } }
        },
        "toRef": {
            "id": "refs/heads/main",
            "displayId": "main",
            "latestCommit": "bbb222",
            "repository": { "slug": "repo", "project": { "key": "PRJ" } }
        },
        "author": {
            "user": {
                "name": "jane",
                "emailAddress": "jane@example.com",
                "displayName": "Jane Doe",
                "slug": "jane"
            },
            "role": "AUTHOR"
        },
        "links": { "self": [{ "href": "https://stash.example.com/projects/PRJ/repos/repo/pull-requests/12" }] }
    })
}

fn service_for(server: &MockServer) -> PullRequestService<HttpTransport> {
    let transport = HttpTransport::new(HttpTransportConfig::new(
        server.uri(),
        Some("token-123".to_owned()),
    ))
    .expect("transport should build");
    PullRequestService::new(transport)
}

#[rstest]
#[tokio::test]
async fn find_reads_pull_request(pull_request_json: Value) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{ROOT}/12")))
        .and(header("authorization", "Bearer token-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(pull_request_json))
        .expect(1)
        .mount(&server)
        .await;

    let (pr, response) = service_for(&server)
        .find("PRJ/repo", 12)
        .await
        .expect("find should succeed");

    assert_eq!(response.status, 200);
    assert_eq!(pr.number, 12);
    assert_eq!(pr.git_ref, "refs/pull-requests/12/from");
    assert_eq!(pr.fork, "PRJ/repo");
    assert_eq!(pr.created.timestamp(), 1_700_000_000);
    assert!(!pr.merged);
    assert!(!pr.closed);
}

#[rstest]
#[tokio::test]
async fn list_sends_paging_and_returns_hints(pull_request_json: Value) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ROOT))
        .and(query_param("state", "ALL"))
        .and(query_param("start", "10"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "size": 1,
            "limit": 10,
            "start": 10,
            "isLastPage": false,
            "nextPageStart": 20,
            "values": [pull_request_json]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let options = PullRequestListOptions {
        page: 2,
        size: 10,
        state: PullRequestStateFilter::All,
    };
    let (prs, response) = service_for(&server)
        .list("PRJ/repo", &options)
        .await
        .expect("list should succeed");

    assert_eq!(prs.len(), 1);
    assert_eq!(response.page, PageHints { first: 1, next: 3 });
}

#[tokio::test]
async fn list_comments_flattens_activity_feed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{ROOT}/12/activities")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "isLastPage": true,
            "values": [
                {
                    "id": 100,
                    "action": "COMMENTED",
                    "commentAction": "ADDED",
                    "comment": {
                        "id": 1,
                        "text": "Looks off",
                        "author": { "slug": "bob", "displayName": "Bob" },
                        "comments": [
                            { "id": 2, "text": "Fixed", "comments": [{ "id": 3, "text": "Thanks" }] }
                        ]
                    },
                    "commentAnchor": {
                        "fromHash": "aaa111",
                        "toHash": "bbb222",
                        "line": 8,
                        "lineType": "ADDED",
                        "fileType": "TO",
                        "path": "src/auth.rs"
                    }
                },
                { "id": 101, "action": "RESCOPED", "fromHash": "x", "toHash": "y" },
                { "id": 102, "action": "APPROVED" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (comments, response) = service_for(&server)
        .list_comments("PRJ/repo", 12, &ListOptions::default())
        .await
        .expect("list_comments should succeed");

    let ids: Vec<u64> = comments.iter().map(|comment| comment.id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(
        comments.first().map(|comment| comment.kind()),
        Some(CommentKind::Code)
    );
    assert_eq!(comments.get(1).and_then(|comment| comment.parent_id()), Some(1));
    assert!(!response.page.has_next());
}

#[rstest]
#[tokio::test]
async fn create_round_trips_branches(pull_request_json: Value) {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ROOT))
        .and(body_partial_json(json!({
            "title": "Add login",
            "fromRef": { "id": "refs/heads/feature-x" },
            "toRef": { "id": "refs/heads/main", "repository": { "slug": "repo" } }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(pull_request_json))
        .expect(1)
        .mount(&server)
        .await;

    let input = PullRequestInput {
        title: "Add login".to_owned(),
        body: "Implements OAuth".to_owned(),
        source: "feature-x".to_owned(),
        target: "refs/heads/main".to_owned(),
    };
    let (pr, response) = service_for(&server)
        .create("PRJ/repo", &input)
        .await
        .expect("create should succeed");

    assert_eq!(response.status, 201);
    assert_eq!(pr.title, input.title);
    assert_eq!(pr.source, "feature-x");
    assert_eq!(pr.target, "main");
}

#[tokio::test]
async fn create_comment_posts_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("{ROOT}/12/comments")))
        .and(body_partial_json(json!({ "text": "Ship it" })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "id": 77, "text": "Ship it" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (comment, _) = service_for(&server)
        .create_comment(
            "PRJ/repo",
            12,
            &CommentInput {
                body: "Ship it".to_owned(),
            },
        )
        .await
        .expect("create_comment should succeed");

    assert_eq!(comment.id, 77);
    assert_eq!(comment.kind(), CommentKind::General);
}

#[rstest]
#[case::merge("merge")]
#[case::decline("decline")]
#[tokio::test]
async fn state_changes_post_to_endpoint(#[case] endpoint: &str) {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("{ROOT}/12/{endpoint}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 12 })))
        .expect(1)
        .mount(&server)
        .await;
    let service = service_for(&server);

    let response = if endpoint == "merge" {
        service.merge("PRJ/repo", 12).await
    } else {
        service.close("PRJ/repo", 12).await
    }
    .expect("state change should succeed");

    assert_eq!(response.status, 200);
}

#[tokio::test]
async fn delete_comment_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let result = service_for(&server).delete_comment("PRJ/repo", 12, 1);

    assert!(result.is_err_and(|error| error.is_unsupported()));
}

#[tokio::test]
async fn missing_pull_request_reports_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{ROOT}/404")))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "errors": [{
                "context": null,
                "message": "Pull request 404 is not in PRJ/repo.",
                "exceptionName": "com.atlassian.bitbucket.pull.NoSuchPullRequestException"
            }]
        })))
        .mount(&server)
        .await;

    let result = service_for(&server).find("PRJ/repo", 404).await;

    match result {
        Err(StashError::Api { status, message }) => {
            assert_eq!(status, 404);
            assert!(message.contains("is not in PRJ/repo"), "message: {message}");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}
