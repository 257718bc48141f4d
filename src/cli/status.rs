//! `status`: summarise a pull request's review threads.

use clap::Args;

use super::{CommandIo, RepositoryContext};
use crate::conversation::ThreadStatistics;
use crate::github::error::TalkError;
use crate::github::gateway::ConversationGateway;

/// Arguments for `status`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Args)]
pub struct StatusArgs {
    /// Print a single summary line.
    #[arg(long)]
    pub compact: bool,
}

/// Prints thread, comment, and reaction counts.
///
/// # Errors
///
/// Returns pull request resolution failures and remote failures.
pub async fn run<G>(
    args: StatusArgs,
    context: &RepositoryContext,
    gateway: &G,
    io: &mut CommandIo<'_>,
) -> Result<(), TalkError>
where
    G: ConversationGateway + ?Sized,
{
    let pull_request = context.pull_request(gateway).await?;
    let threads = gateway.list_threads(&pull_request).await?;
    let stats = ThreadStatistics::from_threads(&threads);
    tracing::debug!(
        pull_request = %pull_request,
        total = stats.total,
        unresolved = stats.unresolved,
        "computed thread statistics"
    );
    if args.compact {
        stats.write_compact(&pull_request, io.out)?;
    } else {
        stats.write_detailed(&pull_request, io.out)?;
    }
    Ok(())
}
