//! `cleanup`: hide the opening comment of every resolved thread.

use clap::Args;

use super::{CommandIo, RepositoryContext};
use crate::conversation::CleanupPlan;
use crate::conversation::bulk::{self, BulkPlan, FailurePolicy};
use crate::github::classifier::MinimizeClassifier;
use crate::github::error::TalkError;
use crate::github::gateway::ConversationGateway;

/// Arguments for `cleanup`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Args)]
pub struct CleanupArgs {
    /// Skip the confirmation prompt.
    #[arg(short = 'y', long)]
    pub yes: bool,
}

/// Hides resolved threads' opening comments as `RESOLVED`.
///
/// Declining the confirmation prints `Cancelled` and succeeds.
///
/// # Errors
///
/// Returns pull request resolution and listing failures, and
/// [`TalkError::BulkIncomplete`] when any comment could not be hidden.
pub async fn run<G>(
    args: CleanupArgs,
    context: &RepositoryContext,
    gateway: &G,
    io: &mut CommandIo<'_>,
) -> Result<(), TalkError>
where
    G: ConversationGateway + ?Sized,
{
    let pull_request = context.pull_request(gateway).await?;
    let threads = gateway.list_threads(&pull_request).await?;
    let plan = CleanupPlan::from_threads(&threads)?;

    if plan.is_empty() {
        if plan.resolved_threads == 0 {
            writeln!(io.out, "No resolved threads found")?;
        } else {
            writeln!(
                io.out,
                "No comments to hide (resolved threads may already be cleaned up)"
            )?;
        }
        return Ok(());
    }

    let count = plan.comments.len();
    writeln!(
        io.out,
        "Found {} resolved thread(s) with {count} comment(s) to hide",
        plan.resolved_threads
    )?;
    if !args.yes {
        writeln!(io.out, "\nAbout to hide {count} comment(s) in resolved threads")?;
        if !io.prompter.confirm("Continue?", true)? {
            writeln!(io.out, "Cancelled")?;
            return Ok(());
        }
    }

    let bulk_plan = BulkPlan {
        policy: FailurePolicy::ContinueOnError,
        action: "hide",
        tally_label: "comment(s) in resolved threads hidden",
    };
    bulk::execute(
        plan.comments,
        bulk_plan,
        |comment| async move {
            gateway
                .minimize_comment(&comment, MinimizeClassifier::Resolved)
                .await?;
            Ok::<_, TalkError>(format!("✓ Hidden comment {comment}"))
        },
        io.out,
        io.err,
    )
    .await?
    .into_result()
    .map(drop)
}
