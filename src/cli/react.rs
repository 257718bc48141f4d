//! `react`: add or remove one reaction on several comments.

use clap::Args;

use super::CommandIo;
use crate::conversation::bulk::{self, BulkPlan, FailurePolicy};
use crate::github::error::{ExpectedIdentifier, TalkError};
use crate::github::gateway::ConversationGateway;
use crate::github::ids::{CommentId, parse_all};
use crate::github::reaction::ReactionContent;

/// Arguments for `react`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
pub struct ReactArgs {
    /// Comment IDs followed by the reaction, e.g. `PRRC_x IC_y 👍`.
    #[arg(required = true, num_args = 2.., value_name = "COMMENT_ID... EMOJI")]
    pub targets: Vec<String>,

    /// Remove the reaction instead of adding it.
    #[arg(long)]
    pub remove: bool,
}

impl ReactArgs {
    /// Splits the targets into validated comment IDs and the reaction.
    ///
    /// # Errors
    ///
    /// Returns the first invalid comment ID, or
    /// [`TalkError::UnknownReaction`] when the final value names no
    /// reaction.
    pub fn parse_targets(&self) -> Result<(Vec<CommentId>, ReactionContent), TalkError> {
        let Some((emoji, raw_comments)) = self.targets.split_last() else {
            return Err(TalkError::EmptyIdentifier {
                expected: ExpectedIdentifier::Comment,
            });
        };
        let comments = parse_all(raw_comments, CommentId::parse)?;
        if comments.is_empty() {
            return Err(TalkError::EmptyIdentifier {
                expected: ExpectedIdentifier::Comment,
            });
        }
        Ok((comments, ReactionContent::parse(emoji)?))
    }
}

/// Adds or removes the reaction on every comment, continuing past failures.
///
/// # Errors
///
/// Returns validation errors before any request, and
/// [`TalkError::BulkIncomplete`] when any comment failed.
pub async fn run<G>(
    args: &ReactArgs,
    gateway: &G,
    io: &mut CommandIo<'_>,
) -> Result<(), TalkError>
where
    G: ConversationGateway + ?Sized,
{
    let (comments, content) = args.parse_targets()?;
    let remove = args.remove;
    let plan = BulkPlan {
        policy: FailurePolicy::ContinueOnError,
        action: if remove {
            "remove reaction from"
        } else {
            "add reaction to"
        },
        tally_label: "comments processed",
    };
    bulk::execute(
        comments,
        plan,
        |comment| async move {
            let glyph = content.glyph();
            if remove {
                gateway.remove_reaction(&comment, content).await?;
                Ok::<_, TalkError>(format!("✓ Removed {glyph} reaction from {comment}"))
            } else {
                gateway.add_reaction(&comment, content).await?;
                Ok(format!("✓ Added {glyph} reaction to {comment}"))
            }
        },
        io.out,
        io.err,
    )
    .await?
    .into_result()
    .map(drop)
}
