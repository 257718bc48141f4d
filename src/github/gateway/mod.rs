//! Gateway for reading and mutating review conversations.
//!
//! [`ConversationGateway`] is the only seam through which gh-talk talks to
//! GitHub. Command handlers depend on the trait so tests can substitute a
//! mock that proves no remote call happens, while
//! [`OctocrabConversationGateway`] sends the GraphQL operations catalogued in
//! `operations` through Octocrab.

mod client;
mod error_mapping;
mod graphql;
mod operations;

pub use graphql::OctocrabConversationGateway;

use async_trait::async_trait;

use crate::github::classifier::MinimizeClassifier;
use crate::github::error::TalkError;
use crate::github::ids::{CommentId, ThreadId};
use crate::github::locator::{PullRequestLocator, PullRequestNumber, RepositoryLocator};
use crate::github::models::{MinimizeReceipt, ReplyReceipt, ResolutionReceipt, Thread};
use crate::github::reaction::ReactionContent;

/// Remote operations on pull request review conversations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConversationGateway: Send + Sync {
    /// Fetch review threads in remote order, capped at 100 threads with 50
    /// comments each.
    async fn list_threads(&self, pull_request: &PullRequestLocator)
    -> Result<Vec<Thread>, TalkError>;

    /// Fetch a single review thread.
    async fn thread(&self, thread: &ThreadId) -> Result<Thread, TalkError>;

    /// Post a reply to a thread.
    async fn reply_to_thread(&self, thread: &ThreadId, body: &str)
    -> Result<ReplyReceipt, TalkError>;

    /// Mark a thread resolved.
    async fn resolve_thread(&self, thread: &ThreadId) -> Result<ResolutionReceipt, TalkError>;

    /// Mark a thread unresolved.
    async fn unresolve_thread(&self, thread: &ThreadId) -> Result<ResolutionReceipt, TalkError>;

    /// Add the viewer's reaction to a comment.
    async fn add_reaction(
        &self,
        subject: &CommentId,
        content: ReactionContent,
    ) -> Result<(), TalkError>;

    /// Remove the viewer's reaction from a comment.
    async fn remove_reaction(
        &self,
        subject: &CommentId,
        content: ReactionContent,
    ) -> Result<(), TalkError>;

    /// Hide a comment.
    async fn minimize_comment(
        &self,
        comment: &CommentId,
        classifier: MinimizeClassifier,
    ) -> Result<MinimizeReceipt, TalkError>;

    /// Unhide a comment.
    async fn unminimize_comment(&self, comment: &CommentId) -> Result<MinimizeReceipt, TalkError>;

    /// Find the open pull request whose head is `branch`.
    async fn pull_request_for_branch(
        &self,
        repository: &RepositoryLocator,
        branch: &str,
    ) -> Result<Option<PullRequestNumber>, TalkError>;
}

#[cfg(test)]
mod tests;
