//! Aggregate counts over a pull request's review threads.

use std::io::{self, Write};

use crate::github::locator::PullRequestLocator;
use crate::github::models::Thread;

/// Counts summarising one pull request's review conversation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThreadStatistics {
    /// Number of threads.
    pub total: usize,
    /// Resolved threads.
    pub resolved: usize,
    /// Unresolved threads.
    pub unresolved: usize,
    /// Comments across all threads.
    pub comments: usize,
    /// Reactions across all comments.
    pub reactions: u64,
}

impl ThreadStatistics {
    /// Tallies the given threads.
    #[must_use]
    pub fn from_threads(threads: &[Thread]) -> Self {
        threads.iter().fold(Self::default(), |stats, thread| {
            let (resolved, unresolved) = if thread.is_resolved { (1, 0) } else { (0, 1) };
            Self {
                total: stats.total.saturating_add(1),
                resolved: stats.resolved.saturating_add(resolved),
                unresolved: stats.unresolved.saturating_add(unresolved),
                comments: stats.comments.saturating_add(thread.comments.len()),
                reactions: stats
                    .reactions
                    .saturating_add(u64::from(thread.reaction_count())),
            }
        })
    }

    /// Whether every thread is resolved and at least one exists.
    #[must_use]
    pub const fn all_resolved(&self) -> bool {
        self.total > 0 && self.unresolved == 0
    }

    /// Writes the one-line summary.
    ///
    /// # Errors
    ///
    /// Propagates write failures.
    pub fn write_compact(
        &self,
        pull_request: &PullRequestLocator,
        out: &mut dyn Write,
    ) -> io::Result<()> {
        writeln!(
            out,
            "PR {pull_request}: {} threads ({} resolved, {} unresolved), {} comments, {} reactions",
            self.total, self.resolved, self.unresolved, self.comments, self.reactions
        )
    }

    /// Writes the sectioned summary.
    ///
    /// # Errors
    ///
    /// Propagates write failures.
    pub fn write_detailed(
        &self,
        pull_request: &PullRequestLocator,
        out: &mut dyn Write,
    ) -> io::Result<()> {
        writeln!(out, "PR: {pull_request}\n")?;

        writeln!(out, "Threads:")?;
        writeln!(out, "  Total:      {}", self.total)?;
        let resolved_marker = if self.all_resolved() { " ✓ All resolved!" } else { "" };
        writeln!(out, "  Resolved:   {}{resolved_marker}", self.resolved)?;
        let unresolved_marker = match (self.unresolved, self.total) {
            (0, 0) => "",
            (0, _) => " ✓",
            _ => " ⚠️  Needs attention",
        };
        writeln!(out, "  Unresolved: {}{unresolved_marker}", self.unresolved)?;

        writeln!(out, "\nComments:")?;
        writeln!(out, "  Total:      {}", self.comments)?;

        writeln!(out, "\nReactions:")?;
        writeln!(out, "  Total:      {}", self.reactions)?;

        write!(out, "\nOverall Status: ")?;
        if self.all_resolved() {
            writeln!(out, "✓ All feedback addressed")
        } else if self.unresolved > 0 {
            writeln!(out, "⚠️  {} thread(s) need attention", self.unresolved)
        } else {
            writeln!(out, "No review threads found")
        }
    }
}
