//! GitHub review conversation access.
//!
//! This module owns the identifier taxonomy, the conversation model, the
//! reaction and minimize enums, and the gateway that turns intents into
//! GraphQL operations. Errors are mapped into [`TalkError`] so callers can
//! surface precise failures without exposing Octocrab internals.

pub mod classifier;
pub mod error;
pub mod gateway;
pub mod ids;
pub mod locator;
pub mod models;
pub mod reaction;

pub use classifier::MinimizeClassifier;
pub use error::{ExpectedIdentifier, TalkError};
pub use gateway::{ConversationGateway, OctocrabConversationGateway};
pub use ids::{CommentId, CommentKind, IdentifierKind, ThreadId};
pub use locator::{
    PersonalAccessToken, PullRequestLocator, PullRequestNumber, RepositoryLocator,
    RepositoryName, RepositoryOwner,
};
pub use models::{
    Comment, MinimizeReceipt, ReactionGroup, ReplyReceipt, ResolutionReceipt, Thread, User,
};
pub use reaction::ReactionContent;

#[cfg(test)]
pub use gateway::MockConversationGateway;
