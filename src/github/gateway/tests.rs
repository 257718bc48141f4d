//! Tests for the GraphQL conversation gateway against a mock server.

type FixtureResult<T> = Result<T, Box<dyn std::error::Error>>;

use std::time::Duration;

use rstest::{fixture, rstest};
use serde_json::{Value, json};
use tokio::runtime::Runtime;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{ConversationGateway, OctocrabConversationGateway};
use crate::github::classifier::MinimizeClassifier;
use crate::github::error::TalkError;
use crate::github::ids::{CommentId, ThreadId};
use crate::github::locator::{
    PersonalAccessToken, PullRequestLocator, PullRequestNumber, RepositoryLocator,
};
use crate::github::reaction::ReactionContent;

const GRAPHQL_PATH: &str = "/api/graphql";

struct GatewayFixture {
    runtime: Runtime,
    server: MockServer,
    gateway: OctocrabConversationGateway,
}

impl GatewayFixture {
    fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    fn respond_to(&self, operation: &str, response: ResponseTemplate) {
        self.block_on(
            Mock::given(method("POST"))
                .and(path(GRAPHQL_PATH))
                .and(body_partial_json(json!({ "operationName": operation })))
                .respond_with(response)
                .mount(&self.server),
        );
    }
}

fn build_fixture(timeout: Duration) -> FixtureResult<GatewayFixture> {
    let token = PersonalAccessToken::new("valid-token")?;
    let runtime = Runtime::new()?;
    let server = runtime.block_on(MockServer::start());
    let _guard = runtime.enter();
    let gateway =
        OctocrabConversationGateway::new(&token, &format!("{}/api", server.uri()), timeout)?;
    Ok(GatewayFixture {
        runtime,
        server,
        gateway,
    })
}

#[fixture]
fn gateway_fixture() -> FixtureResult<GatewayFixture> {
    build_fixture(Duration::from_secs(5))
}

fn pull_request() -> PullRequestLocator {
    let repository = RepositoryLocator::parse("octo/talk").expect("valid repository");
    PullRequestLocator::new(repository, PullRequestNumber::new(7).expect("positive"))
}

fn data(value: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "data": value }))
}

fn thread_json(id: &str, resolved: bool) -> Value {
    json!({
        "id": id,
        "isResolved": resolved,
        "isCollapsed": false,
        "isOutdated": false,
        "path": "src/main.rs",
        "line": 12,
        "diffSide": "RIGHT",
        "subjectType": "LINE",
        "resolvedBy": null,
        "viewerCanResolve": true,
        "viewerCanUnresolve": false,
        "viewerCanReply": true,
        "comments": {
            "totalCount": 1,
            "nodes": [{
                "id": "PRRC_first",
                "databaseId": 101,
                "body": "Please handle the error",
                "createdAt": "2025-11-02T10:15:00Z",
                "author": { "login": "alice" },
                "isMinimized": false,
                "reactionGroups": [
                    { "content": "THUMBS_UP", "users": { "totalCount": 2 }, "viewerHasReacted": false }
                ]
            }]
        }
    })
}

#[rstest]
fn list_threads_returns_threads_in_remote_order(gateway_fixture: FixtureResult<GatewayFixture>) {
    let fixture = gateway_fixture.expect("fixture should succeed");
    fixture.block_on(
        Mock::given(method("POST"))
            .and(path(GRAPHQL_PATH))
            .and(body_partial_json(json!({
                "operationName": "ListThreads",
                "variables": { "owner": "octo", "name": "talk", "number": 7 }
            })))
            .respond_with(data(json!({
                "repository": { "pullRequest": { "reviewThreads": {
                    "totalCount": 2,
                    "nodes": [thread_json("PRRT_b", false), thread_json("PRRT_a", true)]
                }}}
            })))
            .mount(&fixture.server),
    );

    let threads = fixture
        .block_on(fixture.gateway.list_threads(&pull_request()))
        .expect("request should succeed");

    let ids: Vec<&str> = threads.iter().map(|thread| thread.id.as_str()).collect();
    assert_eq!(ids, vec!["PRRT_b", "PRRT_a"]);
    let first = threads.first().expect("first thread");
    assert_eq!(first.preview(), Some("Please handle the error"));
    assert_eq!(first.reaction_count(), 2);
}

#[rstest]
fn list_threads_maps_graphql_not_found(gateway_fixture: FixtureResult<GatewayFixture>) {
    let fixture = gateway_fixture.expect("fixture should succeed");
    fixture.respond_to(
        "ListThreads",
        ResponseTemplate::new(200).set_body_json(json!({
            "data": { "repository": null },
            "errors": [{
                "type": "NOT_FOUND",
                "message": "Could not resolve to a Repository with the name 'octo/talk'."
            }]
        })),
    );

    let error = fixture
        .block_on(fixture.gateway.list_threads(&pull_request()))
        .expect_err("request should fail");

    assert!(
        matches!(error, TalkError::ResourceNotFound { ref message } if message.contains("octo/talk")),
        "unexpected error {error:?}"
    );
}

#[rstest]
fn list_threads_maps_missing_pull_request_without_errors(
    gateway_fixture: FixtureResult<GatewayFixture>,
) {
    let fixture = gateway_fixture.expect("fixture should succeed");
    fixture.respond_to(
        "ListThreads",
        data(json!({ "repository": { "pullRequest": null } })),
    );

    let error = fixture
        .block_on(fixture.gateway.list_threads(&pull_request()))
        .expect_err("request should fail");

    assert_eq!(
        error,
        TalkError::ResourceNotFound {
            message: "pull request octo/talk#7".to_owned()
        }
    );
}

#[rstest]
#[case::unauthorised(401, "Bad credentials", "authentication failed")]
#[case::rate_limited(403, "API rate limit exceeded for user", "rate limit exceeded")]
#[case::bad_gateway(502, "Bad Gateway", "GitHub API unavailable")]
fn http_failures_are_classified(
    gateway_fixture: FixtureResult<GatewayFixture>,
    #[case] status: u16,
    #[case] message: &str,
    #[case] expected_fragment: &str,
) {
    let fixture = gateway_fixture.expect("fixture should succeed");
    fixture.respond_to(
        "ResolveThread",
        ResponseTemplate::new(status).set_body_json(json!({
            "message": message,
            "documentation_url": "https://docs.github.com/graphql"
        })),
    );
    let thread = ThreadId::parse("PRRT_x").expect("valid thread id");

    let error = fixture
        .block_on(fixture.gateway.resolve_thread(&thread))
        .expect_err("request should fail");

    let rendered = error.to_string();
    assert!(
        rendered.contains(expected_fragment),
        "expected {expected_fragment:?} in {rendered:?}"
    );
}

#[rstest]
#[case::bad_gateway(502)]
#[case::unavailable(503)]
#[case::gateway_timeout(504)]
fn server_errors_are_sent_once_and_reported_unavailable(
    gateway_fixture: FixtureResult<GatewayFixture>,
    #[case] status: u16,
) {
    let fixture = gateway_fixture.expect("fixture should succeed");
    fixture.respond_to(
        "ResolveThread",
        ResponseTemplate::new(status).set_body_json(json!({ "message": "Server Error" })),
    );
    let thread = ThreadId::parse("PRRT_x").expect("valid thread id");

    let error = fixture
        .block_on(fixture.gateway.resolve_thread(&thread))
        .expect_err("request should fail");

    assert!(
        matches!(error, TalkError::ServiceUnavailable { .. }),
        "unexpected error: {error:?}"
    );
    let requests = fixture
        .block_on(fixture.server.received_requests())
        .expect("request recording enabled");
    assert_eq!(requests.len(), 1);
}

#[rstest]
fn resolve_thread_returns_receipt(gateway_fixture: FixtureResult<GatewayFixture>) {
    let fixture = gateway_fixture.expect("fixture should succeed");
    fixture.block_on(
        Mock::given(method("POST"))
            .and(path(GRAPHQL_PATH))
            .and(body_partial_json(json!({
                "operationName": "ResolveThread",
                "variables": { "input": { "threadId": "PRRT_x" } }
            })))
            .respond_with(data(json!({
                "resolveReviewThread": { "thread": { "id": "PRRT_x", "isResolved": true } }
            })))
            .expect(1)
            .mount(&fixture.server),
    );
    let thread = ThreadId::parse("PRRT_x").expect("valid thread id");

    let receipt = fixture
        .block_on(fixture.gateway.resolve_thread(&thread))
        .expect("request should succeed");

    assert_eq!(receipt.thread_id, "PRRT_x");
    assert!(receipt.is_resolved);
}

#[rstest]
fn reply_returns_new_comment_id(gateway_fixture: FixtureResult<GatewayFixture>) {
    let fixture = gateway_fixture.expect("fixture should succeed");
    fixture.block_on(
        Mock::given(method("POST"))
            .and(path(GRAPHQL_PATH))
            .and(body_partial_json(json!({
                "operationName": "AddReply",
                "variables": { "input": {
                    "pullRequestReviewThreadId": "PRRT_x",
                    "body": "Fixed in abc123"
                }}
            })))
            .respond_with(data(json!({
                "addPullRequestReviewThreadReply": { "comment": { "id": "PRRC_new" } }
            })))
            .mount(&fixture.server),
    );
    let thread = ThreadId::parse("PRRT_x").expect("valid thread id");

    let receipt = fixture
        .block_on(fixture.gateway.reply_to_thread(&thread, "Fixed in abc123"))
        .expect("request should succeed");

    assert_eq!(receipt.comment_id, "PRRC_new");
}

#[rstest]
fn reactions_send_canonical_content(gateway_fixture: FixtureResult<GatewayFixture>) {
    let fixture = gateway_fixture.expect("fixture should succeed");
    fixture.block_on(
        Mock::given(method("POST"))
            .and(path(GRAPHQL_PATH))
            .and(body_partial_json(json!({
                "operationName": "RemoveReaction",
                "variables": { "input": { "subjectId": "IC_a", "content": "ROCKET" } }
            })))
            .respond_with(data(json!({ "removeReaction": { "reaction": { "content": "ROCKET" } } })))
            .expect(1)
            .mount(&fixture.server),
    );
    let comment = CommentId::parse("IC_a").expect("valid comment id");

    fixture
        .block_on(fixture.gateway.remove_reaction(&comment, ReactionContent::Rocket))
        .expect("request should succeed");
}

#[rstest]
fn minimize_reports_reason(gateway_fixture: FixtureResult<GatewayFixture>) {
    let fixture = gateway_fixture.expect("fixture should succeed");
    fixture.respond_to(
        "MinimizeComment",
        data(json!({
            "minimizeComment": {
                "minimizedComment": { "isMinimized": true, "minimizedReason": "resolved" }
            }
        })),
    );
    let comment = CommentId::parse("PRRC_a").expect("valid comment id");

    let receipt = fixture
        .block_on(
            fixture
                .gateway
                .minimize_comment(&comment, MinimizeClassifier::Resolved),
        )
        .expect("request should succeed");

    assert!(receipt.is_minimized);
    assert_eq!(receipt.reason.as_deref(), Some("resolved"));
}

#[rstest]
fn unminimize_maps_permission_errors(gateway_fixture: FixtureResult<GatewayFixture>) {
    let fixture = gateway_fixture.expect("fixture should succeed");
    fixture.respond_to(
        "UnminimizeComment",
        ResponseTemplate::new(200).set_body_json(json!({
            "data": { "unminimizeComment": null },
            "errors": [{ "type": "FORBIDDEN", "message": "Viewer cannot unminimize" }]
        })),
    );
    let comment = CommentId::parse("PRRC_a").expect("valid comment id");

    let error = fixture
        .block_on(fixture.gateway.unminimize_comment(&comment))
        .expect_err("request should fail");

    assert!(matches!(error, TalkError::PermissionDenied { .. }));
}

#[rstest]
fn thread_lookup_converts_node(gateway_fixture: FixtureResult<GatewayFixture>) {
    let fixture = gateway_fixture.expect("fixture should succeed");
    let mut node = thread_json("PRRT_x", false);
    if let Some(object) = node.as_object_mut() {
        object.insert("__typename".to_owned(), json!("PullRequestReviewThread"));
    }
    fixture.respond_to("ThreadNode", data(json!({ "node": node })));
    let thread = ThreadId::parse("PRRT_x").expect("valid thread id");

    let result = fixture
        .block_on(fixture.gateway.thread(&thread))
        .expect("request should succeed");

    assert_eq!(result.id, "PRRT_x");
    assert_eq!(result.comments.len(), 1);
}

#[rstest]
#[case::missing_node(json!({ "data": { "node": null } }))]
#[case::not_found_error(json!({
    "data": { "node": null },
    "errors": [{ "type": "NOT_FOUND", "message": "Could not resolve to a node with the global id of 'PRRT_x'" }]
}))]
#[case::wrong_type(json!({ "data": { "node": { "__typename": "Issue" } } }))]
fn thread_lookup_reports_missing_threads(
    gateway_fixture: FixtureResult<GatewayFixture>,
    #[case] body: Value,
) {
    let fixture = gateway_fixture.expect("fixture should succeed");
    fixture.respond_to("ThreadNode", ResponseTemplate::new(200).set_body_json(body));
    let thread = ThreadId::parse("PRRT_x").expect("valid thread id");

    let error = fixture
        .block_on(fixture.gateway.thread(&thread))
        .expect_err("request should fail");

    assert_eq!(
        error,
        TalkError::ThreadNotFound {
            id: "PRRT_x".to_owned()
        }
    );
}

#[rstest]
#[case::found(json!({ "repository": { "pullRequests": { "totalCount": 1, "nodes": [{ "number": 42 }] } } }), Some(42))]
#[case::none(json!({ "repository": { "pullRequests": { "totalCount": 0, "nodes": [] } } }), None)]
fn branch_lookup_returns_first_open_pull_request(
    gateway_fixture: FixtureResult<GatewayFixture>,
    #[case] body: Value,
    #[case] expected: Option<u64>,
) {
    let fixture = gateway_fixture.expect("fixture should succeed");
    fixture.block_on(
        Mock::given(method("POST"))
            .and(path(GRAPHQL_PATH))
            .and(body_partial_json(json!({
                "operationName": "PullRequestForBranch",
                "variables": { "head": "feature/threads" }
            })))
            .respond_with(data(body))
            .mount(&fixture.server),
    );
    let repository = RepositoryLocator::parse("octo/talk").expect("valid repository");

    let number = fixture
        .block_on(
            fixture
                .gateway
                .pull_request_for_branch(&repository, "feature/threads"),
        )
        .expect("request should succeed");

    assert_eq!(number.map(PullRequestNumber::get), expected);
}

#[rstest]
fn slow_responses_time_out() {
    let fixture = build_fixture(Duration::from_millis(200)).expect("fixture should succeed");
    fixture.respond_to(
        "ListThreads",
        data(json!({})).set_delay(Duration::from_secs(2)),
    );

    let error = fixture
        .block_on(fixture.gateway.list_threads(&pull_request()))
        .expect_err("request should time out");

    assert!(
        matches!(error, TalkError::ServiceUnavailable { ref message } if message.contains("timed out")),
        "unexpected error {error:?}"
    );
}
