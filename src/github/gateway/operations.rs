//! Catalogue of the GraphQL operations gh-talk sends.
//!
//! Each operation is a zero-sized type naming its document, variables, and
//! response shape, so the transport can stay generic and each operation can
//! be tested against a recorded JSON payload.

use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};

use crate::github::classifier::MinimizeClassifier;
use crate::github::models::{ApiConnection, ApiThread};
use crate::github::reaction::ReactionContent;

/// Maximum review threads fetched per pull request.
pub(crate) const THREAD_PAGE_SIZE: u32 = 100;
/// Maximum comments fetched per thread.
pub(crate) const COMMENT_PAGE_SIZE: u32 = 50;

/// A typed GraphQL document.
pub(crate) trait GraphQlOperation {
    /// Operation name sent as `operationName` and used in logs.
    const NAME: &'static str;
    /// The GraphQL document.
    const DOCUMENT: &'static str;
    /// Variables serialised alongside the document.
    type Variables: Serialize + Send + Sync;
    /// Shape of the `data` member of the response.
    type Response: DeserializeOwned + Send;
}

/// Request body posted to `/graphql`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GraphQlPayload<'a, V> {
    query: &'static str,
    variables: &'a V,
    operation_name: &'static str,
}

impl<'a, V: Serialize> GraphQlPayload<'a, V> {
    pub(crate) const fn new<O>(variables: &'a V) -> Self
    where
        O: GraphQlOperation<Variables = V>,
    {
        Self {
            query: O::DOCUMENT,
            variables,
            operation_name: O::NAME,
        }
    }
}

/// One entry of the GraphQL `errors` array.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GraphQlError {
    pub(crate) message: String,
    #[serde(rename = "type")]
    pub(crate) kind: Option<String>,
}

/// Envelope of every GraphQL response.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
pub(crate) struct GraphQlResponse<T> {
    pub(crate) data: Option<T>,
    #[serde(default)]
    pub(crate) errors: Vec<GraphQlError>,
}

macro_rules! with_thread_fields {
    ($head:literal, $tail:literal) => {
        concat!(
            $head,
            r"
  id
  isResolved
  isCollapsed
  isOutdated
  path
  line
  startLine
  diffSide
  subjectType
  resolvedBy { login }
  viewerCanResolve
  viewerCanUnresolve
  viewerCanReply
  comments(first: 50) {
    totalCount
    nodes {
      id
      databaseId
      body
      path
      position
      diffHunk
      createdAt
      updatedAt
      author { login }
      authorAssociation
      replyTo { id }
      isMinimized
      minimizedReason
      reactionGroups {
        content
        users(first: 1) { totalCount }
        viewerHasReacted
      }
      viewerCanReact
      viewerCanUpdate
      viewerCanDelete
      viewerCanMinimize
    }
  }
",
            $tail
        )
    };
}

/// Lists review threads of a pull request.
pub(crate) struct ListThreads;

#[derive(Debug, Serialize)]
pub(crate) struct ListThreadsVariables {
    pub(crate) owner: String,
    pub(crate) name: String,
    pub(crate) number: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListThreadsData {
    pub(crate) repository: Option<RepositoryThreads>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RepositoryThreads {
    pub(crate) pull_request: Option<PullRequestThreads>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PullRequestThreads {
    pub(crate) review_threads: ApiConnection<ApiThread>,
}

impl GraphQlOperation for ListThreads {
    const NAME: &'static str = "ListThreads";
    const DOCUMENT: &'static str = with_thread_fields!(
        "query ListThreads($owner: String!, $name: String!, $number: Int!) {
  repository(owner: $owner, name: $name) {
    pullRequest(number: $number) {
      reviewThreads(first: 100) {
        totalCount
        nodes {",
        "        }
      }
    }
  }
}"
    );
    type Variables = ListThreadsVariables;
    type Response = ListThreadsData;
}

/// Fetches one review thread by node ID.
pub(crate) struct ThreadNode;

#[derive(Debug, Serialize)]
pub(crate) struct NodeVariables {
    pub(crate) id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ThreadNodeData {
    pub(crate) node: Option<serde_json::Value>,
}

impl GraphQlOperation for ThreadNode {
    const NAME: &'static str = "ThreadNode";
    const DOCUMENT: &'static str = with_thread_fields!(
        "query ThreadNode($id: ID!) {
  node(id: $id) {
    __typename
    ... on PullRequestReviewThread {",
        "    }
  }
}"
    );
    type Variables = NodeVariables;
    type Response = ThreadNodeData;
}

/// Finds the open pull request whose head is a branch.
pub(crate) struct PullRequestForBranch;

#[derive(Debug, Serialize)]
pub(crate) struct PullRequestForBranchVariables {
    pub(crate) owner: String,
    pub(crate) name: String,
    pub(crate) head: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PullRequestForBranchData {
    pub(crate) repository: Option<RepositoryPullRequests>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RepositoryPullRequests {
    pub(crate) pull_requests: ApiConnection<PullRequestNumberNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PullRequestNumberNode {
    pub(crate) number: u64,
}

impl GraphQlOperation for PullRequestForBranch {
    const NAME: &'static str = "PullRequestForBranch";
    const DOCUMENT: &'static str = r"query PullRequestForBranch($owner: String!, $name: String!, $head: String!) {
  repository(owner: $owner, name: $name) {
    pullRequests(headRefName: $head, states: OPEN, first: 1) {
      totalCount
      nodes { number }
    }
  }
}";
    type Variables = PullRequestForBranchVariables;
    type Response = PullRequestForBranchData;
}

/// Wraps mutation inputs as `{ "input": … }`.
#[derive(Debug, Serialize)]
pub(crate) struct InputVariables<T> {
    pub(crate) input: T,
}

/// Posts a reply to a review thread.
pub(crate) struct AddReply;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddReplyInput {
    pub(crate) pull_request_review_thread_id: String,
    pub(crate) body: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddReplyData {
    pub(crate) add_pull_request_review_thread_reply: Option<AddReplyPayload>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddReplyPayload {
    pub(crate) comment: Option<NodeId>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NodeId {
    pub(crate) id: String,
}

impl GraphQlOperation for AddReply {
    const NAME: &'static str = "AddReply";
    const DOCUMENT: &'static str = r"mutation AddReply($input: AddPullRequestReviewThreadReplyInput!) {
  addPullRequestReviewThreadReply(input: $input) {
    comment { id }
  }
}";
    type Variables = InputVariables<AddReplyInput>;
    type Response = AddReplyData;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ThreadInput {
    pub(crate) thread_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ThreadState {
    pub(crate) id: String,
    pub(crate) is_resolved: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ThreadStatePayload {
    pub(crate) thread: Option<ThreadState>,
}

/// Resolves a review thread.
pub(crate) struct ResolveThread;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ResolveThreadData {
    pub(crate) resolve_review_thread: Option<ThreadStatePayload>,
}

impl GraphQlOperation for ResolveThread {
    const NAME: &'static str = "ResolveThread";
    const DOCUMENT: &'static str = r"mutation ResolveThread($input: ResolveReviewThreadInput!) {
  resolveReviewThread(input: $input) {
    thread { id isResolved }
  }
}";
    type Variables = InputVariables<ThreadInput>;
    type Response = ResolveThreadData;
}

/// Reopens a review thread.
pub(crate) struct UnresolveThread;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UnresolveThreadData {
    pub(crate) unresolve_review_thread: Option<ThreadStatePayload>,
}

impl GraphQlOperation for UnresolveThread {
    const NAME: &'static str = "UnresolveThread";
    const DOCUMENT: &'static str = r"mutation UnresolveThread($input: UnresolveReviewThreadInput!) {
  unresolveReviewThread(input: $input) {
    thread { id isResolved }
  }
}";
    type Variables = InputVariables<ThreadInput>;
    type Response = UnresolveThreadData;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReactionInput {
    pub(crate) subject_id: String,
    pub(crate) content: ReactionContent,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReactionPayload {
    pub(crate) reaction: Option<IgnoredAny>,
}

/// Adds a reaction to a comment.
pub(crate) struct AddReaction;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddReactionData {
    pub(crate) add_reaction: Option<ReactionPayload>,
}

impl GraphQlOperation for AddReaction {
    const NAME: &'static str = "AddReaction";
    const DOCUMENT: &'static str = r"mutation AddReaction($input: AddReactionInput!) {
  addReaction(input: $input) {
    reaction { content }
  }
}";
    type Variables = InputVariables<ReactionInput>;
    type Response = AddReactionData;
}

/// Removes the viewer's reaction from a comment.
pub(crate) struct RemoveReaction;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RemoveReactionData {
    pub(crate) remove_reaction: Option<ReactionPayload>,
}

impl GraphQlOperation for RemoveReaction {
    const NAME: &'static str = "RemoveReaction";
    const DOCUMENT: &'static str = r"mutation RemoveReaction($input: RemoveReactionInput!) {
  removeReaction(input: $input) {
    reaction { content }
  }
}";
    type Variables = InputVariables<ReactionInput>;
    type Response = RemoveReactionData;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MinimizedState {
    #[serde(default)]
    pub(crate) is_minimized: bool,
    pub(crate) minimized_reason: Option<String>,
}

/// Hides a comment.
pub(crate) struct MinimizeComment;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MinimizeInput {
    pub(crate) subject_id: String,
    pub(crate) classifier: MinimizeClassifier,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MinimizePayload {
    pub(crate) minimized_comment: Option<MinimizedState>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MinimizeCommentData {
    pub(crate) minimize_comment: Option<MinimizePayload>,
}

impl GraphQlOperation for MinimizeComment {
    const NAME: &'static str = "MinimizeComment";
    const DOCUMENT: &'static str = r"mutation MinimizeComment($input: MinimizeCommentInput!) {
  minimizeComment(input: $input) {
    minimizedComment { isMinimized minimizedReason }
  }
}";
    type Variables = InputVariables<MinimizeInput>;
    type Response = MinimizeCommentData;
}

/// Unhides a comment.
pub(crate) struct UnminimizeComment;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SubjectInput {
    pub(crate) subject_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UnminimizePayload {
    pub(crate) unminimized_comment: Option<MinimizedState>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UnminimizeCommentData {
    pub(crate) unminimize_comment: Option<UnminimizePayload>,
}

impl GraphQlOperation for UnminimizeComment {
    const NAME: &'static str = "UnminimizeComment";
    const DOCUMENT: &'static str = r"mutation UnminimizeComment($input: UnminimizeCommentInput!) {
  unminimizeComment(input: $input) {
    unminimizedComment { isMinimized minimizedReason }
  }
}";
    type Variables = InputVariables<SubjectInput>;
    type Response = UnminimizeCommentData;
}
