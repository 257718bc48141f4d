//! `reply`: post a reply to a review thread.

use clap::Args;

use super::selection::pick_unresolved_thread;
use super::{CommandIo, RepositoryContext};
use crate::github::error::TalkError;
use crate::github::gateway::ConversationGateway;
use crate::github::ids::ThreadId;

/// Arguments for `reply`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
pub struct ReplyArgs {
    /// Thread to reply to; chosen interactively when omitted.
    #[arg(value_name = "THREAD_ID")]
    pub thread: Option<String>,

    /// Reply text.
    #[arg(value_name = "MESSAGE")]
    pub message: Option<String>,

    /// Reply text, as an alternative to the positional argument.
    #[arg(short = 'm', long = "message", value_name = "MESSAGE", conflicts_with = "message")]
    pub message_flag: Option<String>,

    /// Resolve the thread after replying.
    #[arg(long)]
    pub resolve: bool,
}

impl ReplyArgs {
    /// Checks whatever was given on the command line.
    ///
    /// # Errors
    ///
    /// Returns identifier errors and [`TalkError::EmptyMessage`] for a
    /// blank message argument.
    pub fn validate(&self) -> Result<(), TalkError> {
        if let Some(thread) = self.thread.as_deref() {
            ThreadId::parse(thread)?;
        }
        let message = self.message.as_deref().or(self.message_flag.as_deref());
        if message.is_some_and(|text| text.trim().is_empty()) {
            return Err(TalkError::EmptyMessage);
        }
        Ok(())
    }
}

/// Replies to one thread, prompting for whatever was not given.
///
/// # Errors
///
/// Returns identifier errors before any request, [`TalkError::EmptyMessage`]
/// for a blank reply, and gateway errors. A failed resolve after a
/// successful reply is reported with that context.
pub async fn run<G>(
    args: ReplyArgs,
    context: &RepositoryContext,
    gateway: &G,
    io: &mut CommandIo<'_>,
) -> Result<(), TalkError>
where
    G: ConversationGateway + ?Sized,
{
    let thread = match args.thread.as_deref() {
        Some(value) => ThreadId::parse(value)?,
        None => pick_unresolved_thread(context, gateway, io).await?,
    };

    let message = match args.message.or(args.message_flag) {
        Some(text) => text,
        None => io.prompter.input("Reply message:")?,
    };
    if message.trim().is_empty() {
        return Err(TalkError::EmptyMessage);
    }

    let receipt = gateway.reply_to_thread(&thread, &message).await?;
    tracing::debug!(thread = %thread, comment = %receipt.comment_id, "reply posted");
    writeln!(io.out, "✓ Replied to thread {thread}")?;

    if args.resolve {
        gateway
            .resolve_thread(&thread)
            .await
            .map_err(|error| error.with_context("replied successfully but failed to resolve"))?;
        writeln!(io.out, "✓ Resolved thread")?;
    }
    Ok(())
}
