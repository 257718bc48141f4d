//! Conversation model for pull request review threads.
//!
//! Types prefixed with `Api` are internal deserialisation targets matching
//! GitHub's GraphQL response shapes; they convert into the public domain
//! types below. Conversion is lenient: missing or unparseable timestamps
//! become `None`, deleted authors become `ghost`, and reaction groups with no
//! reactors or an unknown content value are dropped.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::reaction::ReactionContent;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// A GitHub account referenced by a thread or comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Login handle without the `@`.
    pub login: String,
}

impl User {
    /// Creates a user from a login handle.
    #[must_use]
    pub fn new(login: impl Into<String>) -> Self {
        Self {
            login: login.into(),
        }
    }

    /// Placeholder for comments whose author account was deleted.
    #[must_use]
    pub fn ghost() -> Self {
        Self::new("ghost")
    }
}

/// Side of the diff a thread is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffSide {
    /// The base (removed) side.
    Left,
    /// The head (added) side.
    Right,
}

impl DiffSide {
    fn from_remote(value: &str) -> Option<Self> {
        match value {
            "LEFT" => Some(Self::Left),
            "RIGHT" => Some(Self::Right),
            _ => None,
        }
    }
}

/// Granularity of a thread's anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectType {
    /// Anchored to one or more lines.
    Line,
    /// Anchored to the whole file.
    File,
}

impl SubjectType {
    fn from_remote(value: &str) -> Option<Self> {
        match value {
            "LINE" => Some(Self::Line),
            "FILE" => Some(Self::File),
            _ => None,
        }
    }
}

/// What the viewer may do with a thread.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThreadPermissions {
    /// Viewer may resolve the thread.
    pub can_resolve: bool,
    /// Viewer may unresolve the thread.
    pub can_unresolve: bool,
    /// Viewer may reply to the thread.
    pub can_reply: bool,
}

/// What the viewer may do with a comment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommentPermissions {
    /// Viewer may react to the comment.
    pub can_react: bool,
    /// Viewer may edit the comment.
    pub can_update: bool,
    /// Viewer may delete the comment.
    pub can_delete: bool,
    /// Viewer may hide the comment.
    pub can_minimize: bool,
}

/// Aggregated reactions of one kind on a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReactionGroup {
    /// Reaction kind.
    pub content: ReactionContent,
    /// Number of users who reacted. Always positive.
    pub total_count: u32,
    /// Whether the authenticated user is among them.
    pub viewer_has_reacted: bool,
}

/// Reference to the comment another comment replies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentRef {
    /// Node ID of the referenced comment.
    pub id: String,
}

/// A single comment within a review thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Node ID (`PRRC_…` or `IC_…`).
    pub id: String,
    /// Legacy numeric ID, informational only.
    pub database_id: Option<u64>,
    /// Markdown body.
    pub body: String,
    /// File path for review comments.
    pub path: Option<String>,
    /// Diff position for review comments.
    pub position: Option<u32>,
    /// Diff hunk for review comments.
    pub diff_hunk: Option<String>,
    /// Creation time, `None` when absent or unparseable.
    pub created_at: Option<DateTime<Utc>>,
    /// Last edit time, `None` when absent or unparseable.
    pub updated_at: Option<DateTime<Utc>>,
    /// Comment author.
    pub author: User,
    /// Author's relationship to the repository, e.g. `MEMBER`.
    pub author_association: Option<String>,
    /// The comment this one replies to.
    pub reply_to: Option<CommentRef>,
    /// Whether the comment is hidden.
    pub is_minimized: bool,
    /// Reason the comment was hidden, e.g. `resolved`.
    pub minimized_reason: Option<String>,
    /// Non-empty reaction groups in remote order.
    pub reaction_groups: Vec<ReactionGroup>,
    /// Viewer permissions.
    pub permissions: CommentPermissions,
}

impl Comment {
    /// Creates a comment with the given identity and body and no metadata.
    #[must_use]
    pub fn new(id: impl Into<String>, author: User, body: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            database_id: None,
            body: body.into(),
            path: None,
            position: None,
            diff_hunk: None,
            created_at: None,
            updated_at: None,
            author,
            author_association: None,
            reply_to: None,
            is_minimized: false,
            minimized_reason: None,
            reaction_groups: Vec::new(),
            permissions: CommentPermissions::default(),
        }
    }

    /// Total reactions across all groups.
    #[must_use]
    pub fn reaction_count(&self) -> u32 {
        self.reaction_groups.iter().map(|group| group.total_count).sum()
    }

    /// Whether the comment is hidden with the given reason (case-insensitive).
    #[must_use]
    pub fn is_minimized_as(&self, reason: &str) -> bool {
        self.is_minimized
            && self
                .minimized_reason
                .as_deref()
                .is_some_and(|actual| actual.eq_ignore_ascii_case(reason))
    }
}

/// A review thread anchored to a file in a pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thread {
    /// Node ID (`PRRT_…`).
    pub id: String,
    /// Whether the thread is resolved.
    pub is_resolved: bool,
    /// Whether the thread is collapsed in the web UI.
    pub is_collapsed: bool,
    /// Whether the anchor no longer matches the current diff.
    pub is_outdated: bool,
    /// File path the thread is anchored to.
    pub path: String,
    /// End line of the anchor, absent for file-level threads.
    pub line: Option<u32>,
    /// Start line of a multi-line anchor.
    pub start_line: Option<u32>,
    /// Diff side of the anchor.
    pub diff_side: Option<DiffSide>,
    /// Anchor granularity.
    pub subject_type: Option<SubjectType>,
    /// Who resolved the thread.
    pub resolved_by: Option<User>,
    /// Viewer permissions.
    pub permissions: ThreadPermissions,
    /// Comments in conversation order.
    pub comments: Vec<Comment>,
}

impl Thread {
    /// Creates an unresolved thread with no comments.
    #[must_use]
    pub fn new(id: impl Into<String>, path: impl Into<String>, line: Option<u32>) -> Self {
        Self {
            id: id.into(),
            is_resolved: false,
            is_collapsed: false,
            is_outdated: false,
            path: path.into(),
            line,
            start_line: None,
            diff_side: None,
            subject_type: None,
            resolved_by: None,
            permissions: ThreadPermissions::default(),
            comments: Vec::new(),
        }
    }

    /// The comment that opened the thread.
    #[must_use]
    pub fn first_comment(&self) -> Option<&Comment> {
        self.comments.first()
    }

    /// Body of the first comment, if any.
    #[must_use]
    pub fn preview(&self) -> Option<&str> {
        self.first_comment().map(|comment| comment.body.as_str())
    }

    /// Whether any comment was written by `login` (case-sensitive).
    #[must_use]
    pub fn has_commenter(&self, login: &str) -> bool {
        self.comments
            .iter()
            .any(|comment| comment.author.login == login)
    }

    /// Reaction totals across all comments, non-zero kinds in canonical
    /// order.
    #[must_use]
    pub fn reaction_totals(&self) -> Vec<(ReactionContent, u32)> {
        ReactionContent::ALL
            .into_iter()
            .filter_map(|content| {
                let total: u32 = self
                    .comments
                    .iter()
                    .flat_map(|comment| comment.reaction_groups.iter())
                    .filter(|group| group.content == content)
                    .map(|group| group.total_count)
                    .sum();
                (total > 0).then_some((content, total))
            })
            .collect()
    }

    /// Total reactions across all comments.
    #[must_use]
    pub fn reaction_count(&self) -> u32 {
        self.comments.iter().map(Comment::reaction_count).sum()
    }
}

/// Confirmation of a posted reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyReceipt {
    /// Node ID of the new comment.
    pub comment_id: String,
}

/// Confirmation of a resolve or unresolve mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionReceipt {
    /// Node ID of the thread.
    pub thread_id: String,
    /// Resolution state after the mutation.
    pub is_resolved: bool,
}

/// Confirmation of a hide or unhide mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinimizeReceipt {
    /// Whether the comment is now hidden.
    pub is_minimized: bool,
    /// Reason reported by GitHub, if hidden.
    pub reason: Option<String>,
}

fn parse_timestamp(value: Option<&str>) -> Option<DateTime<Utc>> {
    value
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|parsed| parsed.with_timezone(&Utc))
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiUser {
    pub(crate) login: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
pub(crate) struct ApiConnection<T> {
    #[serde(default)]
    pub(crate) total_count: u32,
    #[serde(default)]
    pub(crate) nodes: Vec<T>,
}

impl<T> Default for ApiConnection<T> {
    fn default() -> Self {
        Self {
            total_count: 0,
            nodes: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiCount {
    #[serde(default)]
    pub(crate) total_count: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiReactionGroup {
    pub(crate) content: String,
    pub(crate) users: ApiCount,
    #[serde(default)]
    pub(crate) viewer_has_reacted: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiCommentRef {
    pub(crate) id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiComment {
    pub(crate) id: String,
    pub(crate) database_id: Option<u64>,
    #[serde(default)]
    pub(crate) body: String,
    pub(crate) path: Option<String>,
    pub(crate) position: Option<u32>,
    pub(crate) diff_hunk: Option<String>,
    pub(crate) created_at: Option<String>,
    pub(crate) updated_at: Option<String>,
    pub(crate) author: Option<ApiUser>,
    pub(crate) author_association: Option<String>,
    pub(crate) reply_to: Option<ApiCommentRef>,
    #[serde(default)]
    pub(crate) is_minimized: bool,
    pub(crate) minimized_reason: Option<String>,
    #[serde(default)]
    pub(crate) reaction_groups: Vec<ApiReactionGroup>,
    #[serde(default)]
    pub(crate) viewer_can_react: bool,
    #[serde(default)]
    pub(crate) viewer_can_update: bool,
    #[serde(default)]
    pub(crate) viewer_can_delete: bool,
    #[serde(default)]
    pub(crate) viewer_can_minimize: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiThread {
    pub(crate) id: String,
    #[serde(default)]
    pub(crate) is_resolved: bool,
    #[serde(default)]
    pub(crate) is_collapsed: bool,
    #[serde(default)]
    pub(crate) is_outdated: bool,
    #[serde(default)]
    pub(crate) path: String,
    pub(crate) line: Option<u32>,
    pub(crate) start_line: Option<u32>,
    pub(crate) diff_side: Option<String>,
    pub(crate) subject_type: Option<String>,
    pub(crate) resolved_by: Option<ApiUser>,
    #[serde(default)]
    pub(crate) viewer_can_resolve: bool,
    #[serde(default)]
    pub(crate) viewer_can_unresolve: bool,
    #[serde(default)]
    pub(crate) viewer_can_reply: bool,
    #[serde(default)]
    pub(crate) comments: ApiConnection<ApiComment>,
}

impl From<ApiUser> for User {
    fn from(value: ApiUser) -> Self {
        Self { login: value.login }
    }
}

impl ApiReactionGroup {
    fn into_group(self) -> Option<ReactionGroup> {
        let content = ReactionContent::from_canonical(&self.content)?;
        (self.users.total_count > 0).then_some(ReactionGroup {
            content,
            total_count: self.users.total_count,
            viewer_has_reacted: self.viewer_has_reacted,
        })
    }
}

impl From<ApiComment> for Comment {
    fn from(value: ApiComment) -> Self {
        Self {
            created_at: parse_timestamp(value.created_at.as_deref()),
            updated_at: parse_timestamp(value.updated_at.as_deref()),
            id: value.id,
            database_id: value.database_id,
            body: value.body,
            path: value.path,
            position: value.position,
            diff_hunk: value.diff_hunk,
            author: value.author.map_or_else(User::ghost, User::from),
            author_association: value.author_association,
            reply_to: value.reply_to.map(|reply| CommentRef { id: reply.id }),
            is_minimized: value.is_minimized,
            minimized_reason: value.minimized_reason,
            reaction_groups: value
                .reaction_groups
                .into_iter()
                .filter_map(ApiReactionGroup::into_group)
                .collect(),
            permissions: CommentPermissions {
                can_react: value.viewer_can_react,
                can_update: value.viewer_can_update,
                can_delete: value.viewer_can_delete,
                can_minimize: value.viewer_can_minimize,
            },
        }
    }
}

impl From<ApiThread> for Thread {
    fn from(value: ApiThread) -> Self {
        Self {
            diff_side: value.diff_side.as_deref().and_then(DiffSide::from_remote),
            subject_type: value
                .subject_type
                .as_deref()
                .and_then(SubjectType::from_remote),
            id: value.id,
            is_resolved: value.is_resolved,
            is_collapsed: value.is_collapsed,
            is_outdated: value.is_outdated,
            path: value.path,
            line: value.line,
            start_line: value.start_line,
            resolved_by: value.resolved_by.map(User::from),
            permissions: ThreadPermissions {
                can_resolve: value.viewer_can_resolve,
                can_unresolve: value.viewer_can_unresolve,
                can_reply: value.viewer_can_reply,
            },
            comments: value.comments.nodes.into_iter().map(Comment::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::{ApiThread, DiffSide, SubjectType, Thread};
    use crate::github::reaction::ReactionContent;

    fn thread_from(value: serde_json::Value) -> Thread {
        let api: ApiThread = serde_json::from_value(value).expect("ApiThread should deserialise");
        api.into()
    }

    #[rstest]
    fn converts_full_thread_payload() {
        let thread = thread_from(json!({
            "id": "PRRT_kwDOQN97u85gQeTN",
            "isResolved": true,
            "isCollapsed": false,
            "isOutdated": true,
            "path": "src/lib.rs",
            "line": 42,
            "startLine": 40,
            "diffSide": "RIGHT",
            "subjectType": "LINE",
            "resolvedBy": { "login": "alice" },
            "viewerCanResolve": false,
            "viewerCanUnresolve": true,
            "viewerCanReply": true,
            "comments": {
                "totalCount": 1,
                "nodes": [{
                    "id": "PRRC_kwDOQN97u86UHqK7",
                    "databaseId": 2_486_231_843_u64,
                    "body": "Consider a newtype here",
                    "createdAt": "2025-11-02T10:15:00Z",
                    "author": { "login": "bob" },
                    "reactionGroups": [
                        { "content": "ROCKET", "users": { "totalCount": 2 }, "viewerHasReacted": true },
                        { "content": "EYES", "users": { "totalCount": 0 }, "viewerHasReacted": false }
                    ]
                }]
            }
        }));

        assert_eq!(thread.id, "PRRT_kwDOQN97u85gQeTN");
        assert!(thread.is_resolved);
        assert!(thread.is_outdated);
        assert_eq!(thread.line, Some(42));
        assert_eq!(thread.start_line, Some(40));
        assert_eq!(thread.diff_side, Some(DiffSide::Right));
        assert_eq!(thread.subject_type, Some(SubjectType::Line));
        assert_eq!(
            thread.resolved_by.as_ref().map(|user| user.login.as_str()),
            Some("alice")
        );
        assert!(thread.permissions.can_unresolve);

        let comment = thread.first_comment().expect("one comment");
        assert_eq!(comment.database_id, Some(2_486_231_843));
        assert!(comment.created_at.is_some());
        assert_eq!(comment.reaction_groups.len(), 1, "zero-count group dropped");
        assert_eq!(thread.reaction_totals(), vec![(ReactionContent::Rocket, 2)]);
    }

    #[rstest]
    fn tolerates_missing_optional_fields() {
        let thread = thread_from(json!({
            "id": "PRRT_file",
            "path": "README.md",
            "line": null,
            "comments": {
                "nodes": [{
                    "id": "PRRC_a",
                    "body": "file-level note",
                    "createdAt": "not a timestamp",
                    "author": null,
                    "reactionGroups": [
                        { "content": "SPARKLES", "users": { "totalCount": 3 } }
                    ]
                }]
            }
        }));

        assert_eq!(thread.line, None);
        assert!(!thread.is_resolved);
        let comment = thread.first_comment().expect("one comment");
        assert_eq!(comment.created_at, None);
        assert_eq!(comment.author.login, "ghost");
        assert!(comment.reaction_groups.is_empty(), "unknown content dropped");
    }

    #[rstest]
    fn thread_without_comments_has_no_preview() {
        let thread = thread_from(json!({ "id": "PRRT_empty", "path": "a.rs" }));
        assert!(thread.comments.is_empty());
        assert_eq!(thread.preview(), None);
        assert!(thread.reaction_totals().is_empty());
    }

    #[rstest]
    fn reaction_totals_follow_canonical_order() {
        let thread = thread_from(json!({
            "id": "PRRT_x",
            "path": "a.rs",
            "comments": { "nodes": [
                { "id": "PRRC_1", "body": "a", "reactionGroups": [
                    { "content": "EYES", "users": { "totalCount": 1 } },
                    { "content": "THUMBS_UP", "users": { "totalCount": 1 } }
                ]},
                { "id": "PRRC_2", "body": "b", "reactionGroups": [
                    { "content": "THUMBS_UP", "users": { "totalCount": 2 } }
                ]}
            ]}
        }));

        assert_eq!(
            thread.reaction_totals(),
            vec![(ReactionContent::ThumbsUp, 3), (ReactionContent::Eyes, 1)]
        );
        assert_eq!(thread.reaction_count(), 4);
    }
}
