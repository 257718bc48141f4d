//! GraphQL payloads served by the mock GitHub API.

use serde_json::{Value, json};
use wiremock::ResponseTemplate;

/// Path Octocrab posts GraphQL operations to under an `/api` base.
pub(crate) const GRAPHQL_PATH: &str = "/api/graphql";

fn comment(id: &str, author: &str, body: &str, reactions: &Value) -> Value {
    json!({
        "id": id,
        "databaseId": 1,
        "body": body,
        "createdAt": "2025-11-02T10:15:00Z",
        "author": { "login": author },
        "isMinimized": false,
        "reactionGroups": reactions
    })
}

fn thread(
    id: &str,
    path: &str,
    line: Option<u32>,
    resolved_by: Option<&str>,
    comments: &[Value],
) -> Value {
    let subject_type = if line.is_some() { "LINE" } else { "FILE" };
    json!({
        "id": id,
        "isResolved": resolved_by.is_some(),
        "isCollapsed": false,
        "isOutdated": false,
        "path": path,
        "line": line,
        "diffSide": "RIGHT",
        "subjectType": subject_type,
        "resolvedBy": resolved_by.map(|login| json!({ "login": login })),
        "viewerCanResolve": true,
        "viewerCanUnresolve": true,
        "viewerCanReply": true,
        "comments": { "totalCount": comments.len(), "nodes": comments }
    })
}

fn reaction(content: &str, count: u32) -> Value {
    json!({ "content": content, "users": { "totalCount": count }, "viewerHasReacted": false })
}

/// The first `count` of four representative threads, in remote order.
///
/// `PRRT_2` and `PRRT_4` are resolved; `PRRT_3` is a file-level thread.
pub(crate) fn review_threads_response(count: usize) -> ResponseTemplate {
    let threads: Vec<Value> = [
        thread(
            "PRRT_1",
            "src/main.rs",
            Some(12),
            None,
            &[
                comment(
                    "PRRC_1a",
                    "alice",
                    "Please handle the error here\nIt can panic",
                    &json!([reaction("THUMBS_UP", 2)]),
                ),
                comment("PRRC_1b", "bob", "Will do", &json!([])),
            ],
        ),
        thread(
            "PRRT_2",
            "src/lib.rs",
            Some(7),
            Some("bob"),
            &[comment("PRRC_2a", "carol", "Typo in doc comment", &json!([]))],
        ),
        thread(
            "PRRT_3",
            "README.md",
            None,
            None,
            &[comment("PRRC_3a", "alice", "Mention the config file", &json!([]))],
        ),
        thread(
            "PRRT_4",
            "src/cli/mod.rs",
            Some(88),
            Some("alice"),
            &[comment(
                "PRRC_4a",
                "dave",
                "Nice refactor",
                &json!([reaction("ROCKET", 1), reaction("EYES", 0)]),
            )],
        ),
    ]
    .into_iter()
    .take(count)
    .collect();

    ResponseTemplate::new(200).set_body_json(json!({
        "data": {
            "repository": {
                "pullRequest": {
                    "reviewThreads": { "totalCount": threads.len(), "nodes": threads }
                }
            }
        }
    }))
}

/// GraphQL error payload for a pull request that does not exist.
pub(crate) fn not_found_response() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "data": { "repository": { "pullRequest": null } },
        "errors": [{
            "type": "NOT_FOUND",
            "path": ["repository", "pullRequest"],
            "message": "Could not resolve to a PullRequest with the number of 42."
        }]
    }))
}
