//! gh-talk library crate for managing pull request review conversations.
//!
//! The library validates thread and comment node IDs, models review threads
//! fetched over GitHub's GraphQL API, and turns command-line intents (reply,
//! resolve, react, hide) into gateway calls. Handlers in [`cli`] depend only
//! on [`ConversationGateway`], so they run unchanged against Octocrab or a
//! test double.

pub mod cli;
pub mod config;
pub mod conversation;
pub mod github;
pub mod local;
pub mod output;
pub mod prompt;

pub use config::TalkConfig;
pub use github::{
    CommentId, ConversationGateway, MinimizeClassifier, OctocrabConversationGateway,
    PersonalAccessToken, PullRequestLocator, ReactionContent, TalkError, Thread, ThreadId,
};
