//! Selection of comments to hide after threads are resolved.

use crate::github::classifier::MinimizeClassifier;
use crate::github::error::TalkError;
use crate::github::ids::CommentId;
use crate::github::models::Thread;

/// Comments eligible for hiding in resolved threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupPlan {
    /// Number of resolved threads seen.
    pub resolved_threads: usize,
    /// Opening comments to hide, in thread order.
    pub comments: Vec<CommentId>,
}

impl CleanupPlan {
    /// Picks the opening comment of every resolved thread unless it is
    /// already hidden as resolved.
    ///
    /// # Errors
    ///
    /// Returns an identifier error if the remote returned a comment id that
    /// is not a valid comment node id.
    pub fn from_threads(threads: &[Thread]) -> Result<Self, TalkError> {
        let resolved = || threads.iter().filter(|thread| thread.is_resolved);
        let comments = resolved()
            .filter_map(Thread::first_comment)
            .filter(|comment| !comment.is_minimized_as(MinimizeClassifier::Resolved.as_str()))
            .map(|comment| CommentId::parse(&comment.id))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            resolved_threads: resolved().count(),
            comments,
        })
    }

    /// Whether nothing needs hiding.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }
}
