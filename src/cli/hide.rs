//! `hide` and `unhide`: minimize comments or restore them.

use clap::Args;

use super::CommandIo;
use crate::conversation::bulk::{self, BulkPlan, FailurePolicy};
use crate::github::classifier::MinimizeClassifier;
use crate::github::error::TalkError;
use crate::github::gateway::ConversationGateway;
use crate::github::ids::{CommentId, parse_all};

/// Arguments for `hide`.
#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct HideArgs {
    /// Comments to hide.
    #[arg(required = true, value_name = "COMMENT_ID")]
    pub comments: Vec<String>,

    /// Reason: spam, abuse, off-topic, outdated, duplicate, or resolved.
    #[arg(long, default_value = "off-topic")]
    pub reason: String,
}

/// Arguments for `unhide`.
#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct UnhideArgs {
    /// Comment to restore.
    #[arg(value_name = "COMMENT_ID")]
    pub comment: String,
}

impl HideArgs {
    /// Checks the reason and every comment id.
    ///
    /// # Errors
    ///
    /// Returns [`TalkError::InvalidClassifier`] or the first invalid id.
    pub fn validate(&self) -> Result<(), TalkError> {
        MinimizeClassifier::parse(&self.reason)?;
        parse_all(&self.comments, CommentId::parse).map(drop)
    }
}

impl UnhideArgs {
    /// Checks the comment id.
    ///
    /// # Errors
    ///
    /// Returns the identifier error.
    pub fn validate(&self) -> Result<(), TalkError> {
        CommentId::parse(&self.comment).map(drop)
    }
}

/// Hides every comment, continuing past failures.
///
/// # Errors
///
/// Returns [`TalkError::InvalidClassifier`] or an identifier error before
/// any request, and [`TalkError::BulkIncomplete`] when any comment failed.
pub async fn run_hide<G>(
    args: &HideArgs,
    gateway: &G,
    io: &mut CommandIo<'_>,
) -> Result<(), TalkError>
where
    G: ConversationGateway + ?Sized,
{
    let classifier = MinimizeClassifier::parse(&args.reason)?;
    let comments = parse_all(&args.comments, CommentId::parse)?;
    let lowered = classifier.as_str().to_lowercase();
    let plan = BulkPlan {
        policy: FailurePolicy::ContinueOnError,
        action: "hide",
        tally_label: "comment(s) hidden",
    };
    let reason = lowered.as_str();
    bulk::execute(
        comments,
        plan,
        |comment| async move {
            gateway.minimize_comment(&comment, classifier).await?;
            Ok::<_, TalkError>(format!("✓ Hidden comment {comment} (reason: {reason})"))
        },
        io.out,
        io.err,
    )
    .await?
    .into_result()
    .map(drop)
}

/// Restores one hidden comment.
///
/// # Errors
///
/// Returns an identifier error before any request, or the remote failure.
pub async fn run_unhide<G>(
    args: &UnhideArgs,
    gateway: &G,
    io: &mut CommandIo<'_>,
) -> Result<(), TalkError>
where
    G: ConversationGateway + ?Sized,
{
    let comment = CommentId::parse(&args.comment)?;
    gateway.unminimize_comment(&comment).await?;
    writeln!(io.out, "✓ Unhidden comment {comment}")?;
    Ok(())
}
