//! Thread filtering for listings.
//!
//! Filters compose with AND and never reorder: the output is the input with
//! non-matching threads removed.

use crate::github::error::TalkError;
use crate::github::models::Thread;

/// Which threads to show by resolution state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolutionFilter {
    /// Only unresolved threads.
    #[default]
    Unresolved,
    /// Only resolved threads.
    Resolved,
    /// Every thread.
    All,
}

impl ResolutionFilter {
    /// Builds the filter from the mutually exclusive listing flags.
    ///
    /// # Errors
    ///
    /// Returns [`TalkError::Configuration`] when more than one flag is set.
    pub fn from_flags(unresolved: bool, resolved: bool, all: bool) -> Result<Self, TalkError> {
        match (unresolved, resolved, all) {
            (_, false, false) => Ok(Self::Unresolved),
            (false, true, false) => Ok(Self::Resolved),
            (false, false, true) => Ok(Self::All),
            _ => Err(TalkError::Configuration {
                message: "--unresolved, --resolved, and --all are mutually exclusive".to_owned(),
            }),
        }
    }

    /// Whether a thread with the given state passes.
    #[must_use]
    pub const fn admits(self, is_resolved: bool) -> bool {
        match self {
            Self::Unresolved => !is_resolved,
            Self::Resolved => is_resolved,
            Self::All => true,
        }
    }
}

/// Combined filter criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThreadFilter {
    /// Resolution state filter.
    pub resolution: ResolutionFilter,
    /// Keep threads where some comment is by this login (case-sensitive).
    pub author: Option<String>,
    /// Keep threads anchored to exactly this path.
    pub path: Option<String>,
}

impl ThreadFilter {
    /// Whether the thread satisfies every criterion.
    #[must_use]
    pub fn matches(&self, thread: &Thread) -> bool {
        self.resolution.admits(thread.is_resolved)
            && self
                .author
                .as_deref()
                .is_none_or(|login| thread.has_commenter(login))
            && self
                .path
                .as_deref()
                .is_none_or(|path| thread.path == path)
    }

    /// Keeps matching threads in their original order.
    #[must_use]
    pub fn apply(&self, threads: Vec<Thread>) -> Vec<Thread> {
        threads
            .into_iter()
            .filter(|thread| self.matches(thread))
            .collect()
    }
}
