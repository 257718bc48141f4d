//! Octocrab-backed implementation of [`ConversationGateway`].

use std::time::{Duration, Instant};

use async_trait::async_trait;
use octocrab::Octocrab;

use super::ConversationGateway;
use super::client::build_octocrab_client;
use super::error_mapping::{map_graphql_errors, map_octocrab_error};
use super::operations::{
    AddReaction, AddReply, AddReplyInput, COMMENT_PAGE_SIZE, GraphQlOperation, GraphQlPayload,
    GraphQlResponse, InputVariables, ListThreads, ListThreadsVariables, MinimizeComment,
    MinimizeInput, MinimizedState, NodeVariables, PullRequestForBranch,
    PullRequestForBranchVariables, ReactionInput, RemoveReaction, ResolveThread, SubjectInput,
    THREAD_PAGE_SIZE, ThreadInput, ThreadNode, ThreadState, UnminimizeComment, UnresolveThread,
};
use crate::github::classifier::MinimizeClassifier;
use crate::github::error::TalkError;
use crate::github::ids::{CommentId, ThreadId};
use crate::github::locator::{
    PersonalAccessToken, PullRequestLocator, PullRequestNumber, RepositoryLocator,
};
use crate::github::models::{ApiThread, MinimizeReceipt, ReplyReceipt, ResolutionReceipt, Thread};
use crate::github::reaction::ReactionContent;

const REVIEW_THREAD_TYPENAME: &str = "PullRequestReviewThread";

/// Sends catalogued GraphQL operations through Octocrab.
pub struct OctocrabConversationGateway {
    client: Octocrab,
    timeout: Duration,
}

impl OctocrabConversationGateway {
    /// Creates a gateway for the given token and API base URL.
    ///
    /// Must be called inside a Tokio runtime context.
    ///
    /// # Errors
    ///
    /// Returns [`TalkError::Configuration`] when the Octocrab client cannot be
    /// built.
    pub fn new(
        token: &PersonalAccessToken,
        api_base: &str,
        timeout: Duration,
    ) -> Result<Self, TalkError> {
        let client = build_octocrab_client(token, api_base)?;
        Ok(Self { client, timeout })
    }

    async fn execute<O: GraphQlOperation>(
        &self,
        variables: &O::Variables,
    ) -> Result<O::Response, TalkError> {
        let payload = GraphQlPayload::new::<O>(variables);
        let started = Instant::now();
        let outcome = tokio::time::timeout(
            self.timeout,
            self.client.graphql::<GraphQlResponse<O::Response>>(&payload),
        )
        .await;
        tracing::debug!(operation = O::NAME, elapsed = ?started.elapsed(), "GraphQL request finished");

        let response = match outcome {
            Err(_) => {
                return Err(TalkError::ServiceUnavailable {
                    message: format!(
                        "{} timed out after {}s",
                        O::NAME,
                        self.timeout.as_secs()
                    ),
                });
            }
            Ok(Err(error)) => return Err(map_octocrab_error(O::NAME, &error)),
            Ok(Ok(response)) => response,
        };

        if !response.errors.is_empty() {
            let error = map_graphql_errors(O::NAME, &response.errors);
            tracing::debug!(operation = O::NAME, %error, "GraphQL errors returned");
            return Err(error);
        }
        response.data.ok_or_else(|| TalkError::UnknownRemoteError {
            message: format!("{}: response contained no data", O::NAME),
        })
    }

    async fn set_resolution<O>(
        &self,
        thread: &ThreadId,
        select: fn(O::Response) -> Option<ThreadState>,
    ) -> Result<ResolutionReceipt, TalkError>
    where
        O: GraphQlOperation<Variables = InputVariables<ThreadInput>>,
    {
        let variables = InputVariables {
            input: ThreadInput {
                thread_id: thread.as_str().to_owned(),
            },
        };
        let state = select(self.execute::<O>(&variables).await?).ok_or_else(|| {
            missing_payload(O::NAME)
        })?;
        Ok(ResolutionReceipt {
            thread_id: state.id,
            is_resolved: state.is_resolved,
        })
    }

    async fn react<O>(&self, subject: &CommentId, content: ReactionContent) -> Result<(), TalkError>
    where
        O: GraphQlOperation<Variables = InputVariables<ReactionInput>>,
    {
        let variables = InputVariables {
            input: ReactionInput {
                subject_id: subject.as_str().to_owned(),
                content,
            },
        };
        self.execute::<O>(&variables).await.map(drop)
    }
}

fn missing_payload(operation: &str) -> TalkError {
    TalkError::UnknownRemoteError {
        message: format!("{operation}: mutation returned no payload"),
    }
}

fn minimize_receipt(state: Option<MinimizedState>, operation: &str) -> Result<MinimizeReceipt, TalkError> {
    let minimized = state.ok_or_else(|| missing_payload(operation))?;
    Ok(MinimizeReceipt {
        is_minimized: minimized.is_minimized,
        reason: minimized.minimized_reason,
    })
}

fn warn_if_truncated(pull_request: &PullRequestLocator, total: u32, threads: &[ApiThread]) {
    let fetched = threads.len();
    if usize::try_from(total).is_ok_and(|count| count > fetched) {
        tracing::warn!(
            pull_request = %pull_request,
            total,
            fetched,
            limit = THREAD_PAGE_SIZE,
            "pull request has more review threads than are fetched"
        );
    }
    for thread in threads {
        let comments = thread.comments.nodes.len();
        if usize::try_from(thread.comments.total_count).is_ok_and(|count| count > comments) {
            tracing::warn!(
                thread = %thread.id,
                total = thread.comments.total_count,
                fetched = comments,
                limit = COMMENT_PAGE_SIZE,
                "thread has more comments than are fetched"
            );
        }
    }
}

#[async_trait]
impl ConversationGateway for OctocrabConversationGateway {
    async fn list_threads(
        &self,
        pull_request: &PullRequestLocator,
    ) -> Result<Vec<Thread>, TalkError> {
        let repository = pull_request.repository();
        let variables = ListThreadsVariables {
            owner: repository.owner().as_str().to_owned(),
            name: repository.repository().as_str().to_owned(),
            number: pull_request.number().get(),
        };
        let data = self.execute::<ListThreads>(&variables).await?;
        let connection = data
            .repository
            .and_then(|repo| repo.pull_request)
            .map(|pr| pr.review_threads)
            .ok_or_else(|| TalkError::ResourceNotFound {
                message: format!("pull request {pull_request}"),
            })?;

        warn_if_truncated(pull_request, connection.total_count, &connection.nodes);
        Ok(connection.nodes.into_iter().map(Thread::from).collect())
    }

    async fn thread(&self, thread: &ThreadId) -> Result<Thread, TalkError> {
        let not_found = || TalkError::ThreadNotFound {
            id: thread.as_str().to_owned(),
        };
        let variables = NodeVariables {
            id: thread.as_str().to_owned(),
        };
        let data = match self.execute::<ThreadNode>(&variables).await {
            Ok(data) => data,
            Err(TalkError::ResourceNotFound { .. }) => return Err(not_found()),
            Err(error) => return Err(error),
        };

        let node = data.node.ok_or_else(not_found)?;
        let typename = node.get("__typename").and_then(serde_json::Value::as_str);
        if typename != Some(REVIEW_THREAD_TYPENAME) {
            return Err(not_found());
        }
        let api: ApiThread =
            serde_json::from_value(node).map_err(|error| TalkError::UnknownRemoteError {
                message: format!("{}: unexpected thread shape: {error}", ThreadNode::NAME),
            })?;
        Ok(api.into())
    }

    async fn reply_to_thread(
        &self,
        thread: &ThreadId,
        body: &str,
    ) -> Result<ReplyReceipt, TalkError> {
        let variables = InputVariables {
            input: AddReplyInput {
                pull_request_review_thread_id: thread.as_str().to_owned(),
                body: body.to_owned(),
            },
        };
        let comment = self
            .execute::<AddReply>(&variables)
            .await?
            .add_pull_request_review_thread_reply
            .and_then(|payload| payload.comment)
            .ok_or_else(|| missing_payload(AddReply::NAME))?;
        Ok(ReplyReceipt {
            comment_id: comment.id,
        })
    }

    async fn resolve_thread(&self, thread: &ThreadId) -> Result<ResolutionReceipt, TalkError> {
        self.set_resolution::<ResolveThread>(thread, |data| {
            data.resolve_review_thread.and_then(|payload| payload.thread)
        })
        .await
    }

    async fn unresolve_thread(&self, thread: &ThreadId) -> Result<ResolutionReceipt, TalkError> {
        self.set_resolution::<UnresolveThread>(thread, |data| {
            data.unresolve_review_thread.and_then(|payload| payload.thread)
        })
        .await
    }

    async fn add_reaction(
        &self,
        subject: &CommentId,
        content: ReactionContent,
    ) -> Result<(), TalkError> {
        self.react::<AddReaction>(subject, content).await
    }

    async fn remove_reaction(
        &self,
        subject: &CommentId,
        content: ReactionContent,
    ) -> Result<(), TalkError> {
        self.react::<RemoveReaction>(subject, content).await
    }

    async fn minimize_comment(
        &self,
        comment: &CommentId,
        classifier: MinimizeClassifier,
    ) -> Result<MinimizeReceipt, TalkError> {
        let variables = InputVariables {
            input: MinimizeInput {
                subject_id: comment.as_str().to_owned(),
                classifier,
            },
        };
        let data = self.execute::<MinimizeComment>(&variables).await?;
        minimize_receipt(
            data.minimize_comment
                .and_then(|payload| payload.minimized_comment),
            MinimizeComment::NAME,
        )
    }

    async fn unminimize_comment(&self, comment: &CommentId) -> Result<MinimizeReceipt, TalkError> {
        let variables = InputVariables {
            input: SubjectInput {
                subject_id: comment.as_str().to_owned(),
            },
        };
        let data = self.execute::<UnminimizeComment>(&variables).await?;
        minimize_receipt(
            data.unminimize_comment
                .and_then(|payload| payload.unminimized_comment),
            UnminimizeComment::NAME,
        )
    }

    async fn pull_request_for_branch(
        &self,
        repository: &RepositoryLocator,
        branch: &str,
    ) -> Result<Option<PullRequestNumber>, TalkError> {
        let variables = PullRequestForBranchVariables {
            owner: repository.owner().as_str().to_owned(),
            name: repository.repository().as_str().to_owned(),
            head: branch.to_owned(),
        };
        let data = self.execute::<PullRequestForBranch>(&variables).await?;
        let number = data
            .repository
            .and_then(|repo| repo.pull_requests.nodes.into_iter().next())
            .map(|node| node.number);
        number.map(PullRequestNumber::new).transpose()
    }
}
