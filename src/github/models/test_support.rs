//! Test helpers for constructing conversation fixtures.
//!
//! # Examples
//!
//! ```
//! use gh_talk::github::models::test_support::{ThreadFixtureExt, comment, resolved_thread};
//!
//! let thread = resolved_thread("PRRT_a", "src/lib.rs", Some(3), "alice")
//!     .with_comment(comment("PRRC_a", "bob", "Fixed"));
//! assert!(thread.is_resolved);
//! assert_eq!(thread.comments.len(), 1);
//! ```

use chrono::{TimeZone, Utc};

use super::{Comment, ReactionGroup, Thread, User};
use crate::github::reaction::ReactionContent;

/// Creates a comment authored by `author` at a fixed timestamp.
#[must_use]
pub fn comment(id: &str, author: &str, body: &str) -> Comment {
    let mut comment = Comment::new(id, User::new(author), body);
    comment.created_at = Utc.with_ymd_and_hms(2025, 11, 2, 10, 15, 0).single();
    comment
}

/// Creates an unresolved thread with no comments.
#[must_use]
pub fn open_thread(id: &str, path: &str, line: Option<u32>) -> Thread {
    Thread::new(id, path, line)
}

/// Creates a thread resolved by `resolver`.
#[must_use]
pub fn resolved_thread(id: &str, path: &str, line: Option<u32>, resolver: &str) -> Thread {
    let mut thread = Thread::new(id, path, line);
    thread.is_resolved = true;
    thread.resolved_by = Some(User::new(resolver));
    thread
}

/// Creates a reaction group with the given count.
#[must_use]
pub const fn reactions(content: ReactionContent, total_count: u32) -> ReactionGroup {
    ReactionGroup {
        content,
        total_count,
        viewer_has_reacted: false,
    }
}

/// Fluent helpers for assembling fixtures.
pub trait ThreadFixtureExt {
    /// Appends a comment.
    #[must_use]
    fn with_comment(self, comment: Comment) -> Self;
}

impl ThreadFixtureExt for Thread {
    fn with_comment(mut self, comment: Comment) -> Self {
        self.comments.push(comment);
        self
    }
}

/// Fluent helpers for comment fixtures.
pub trait CommentFixtureExt {
    /// Appends a reaction group.
    #[must_use]
    fn with_reactions(self, group: ReactionGroup) -> Self;

    /// Marks the comment as hidden with `reason`.
    #[must_use]
    fn minimized(self, reason: &str) -> Self;
}

impl CommentFixtureExt for Comment {
    fn with_reactions(mut self, group: ReactionGroup) -> Self {
        self.reaction_groups.push(group);
        self
    }

    fn minimized(mut self, reason: &str) -> Self {
        self.is_minimized = true;
        self.minimized_reason = Some(reason.to_owned());
        self
    }
}

/// Four threads covering open, resolved, file-level, and reacted cases.
///
/// ```
/// use gh_talk::github::models::test_support::sample_threads;
///
/// let threads = sample_threads();
/// assert_eq!(threads.len(), 4);
/// assert_eq!(threads.iter().filter(|thread| thread.is_resolved).count(), 1);
/// ```
#[must_use]
pub fn sample_threads() -> Vec<Thread> {
    vec![
        open_thread("PRRT_one", "src/main.rs", Some(12))
            .with_comment(
                comment("PRRC_one", "alice", "Please handle the error here\nIt can panic")
                    .with_reactions(reactions(ReactionContent::ThumbsUp, 2)),
            )
            .with_comment(comment("PRRC_two", "bob", "Will do")),
        resolved_thread("PRRT_two", "src/lib.rs", Some(7), "bob")
            .with_comment(comment("PRRC_three", "carol", "Typo in doc comment")),
        open_thread("PRRT_three", "README.md", None)
            .with_comment(comment("PRRC_four", "alice", "Mention the config file")),
        open_thread("PRRT_four", "src/cli/mod.rs", Some(88)).with_comment(
            comment("PRRC_five", "dave", "Nice refactor")
                .with_reactions(reactions(ReactionContent::Rocket, 1))
                .with_reactions(reactions(ReactionContent::ThumbsUp, 1)),
        ),
    ]
}
