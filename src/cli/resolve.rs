//! `resolve` and `unresolve`: change thread resolution state.
//!
//! Both stop at the first failure. Selecting more than one thread asks for
//! confirmation unless `--yes` is given.

use clap::Args;

use super::selection::pick_threads;
use super::{CommandIo, RepositoryContext};
use crate::conversation::bulk::{self, BulkPlan, FailurePolicy};
use crate::conversation::ResolutionFilter;
use crate::github::error::TalkError;
use crate::github::gateway::ConversationGateway;
use crate::github::ids::{ThreadId, parse_all};

/// Arguments for `resolve`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
pub struct ResolveArgs {
    /// Threads to resolve; chosen interactively when omitted.
    #[arg(value_name = "THREAD_ID")]
    pub threads: Vec<String>,

    /// Reply posted to each thread before resolving it.
    #[arg(short = 'm', long, value_name = "MESSAGE")]
    pub message: Option<String>,

    /// Skip confirmation for multiple threads.
    #[arg(short = 'y', long)]
    pub yes: bool,
}

/// Arguments for `unresolve`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
pub struct UnresolveArgs {
    /// Threads to unresolve; chosen interactively when omitted.
    #[arg(value_name = "THREAD_ID")]
    pub threads: Vec<String>,

    /// Skip confirmation for multiple threads.
    #[arg(short = 'y', long)]
    pub yes: bool,
}

impl ResolveArgs {
    /// Checks thread ids and the message before anything is sent.
    ///
    /// # Errors
    ///
    /// Returns [`TalkError::EmptyMessage`] for a blank message and the
    /// first invalid thread id.
    pub fn validate(&self) -> Result<(), TalkError> {
        if self
            .message
            .as_deref()
            .is_some_and(|text| text.trim().is_empty())
        {
            return Err(TalkError::EmptyMessage);
        }
        parse_all(&self.threads, ThreadId::parse).map(drop)
    }
}

impl UnresolveArgs {
    /// Checks thread ids before anything is sent.
    ///
    /// # Errors
    ///
    /// Returns the first invalid thread id.
    pub fn validate(&self) -> Result<(), TalkError> {
        parse_all(&self.threads, ThreadId::parse).map(drop)
    }
}

async fn targets<G>(
    values: &[String],
    selectable: ResolutionFilter,
    context: &RepositoryContext,
    gateway: &G,
    io: &mut CommandIo<'_>,
) -> Result<Vec<ThreadId>, TalkError>
where
    G: ConversationGateway + ?Sized,
{
    if values.is_empty() {
        pick_threads(selectable, context, gateway, io).await
    } else {
        parse_all(values, ThreadId::parse)
    }
}

fn confirm_many(
    verb: &str,
    count: usize,
    skip: bool,
    io: &mut CommandIo<'_>,
) -> Result<(), TalkError> {
    if count <= 1 || skip {
        return Ok(());
    }
    if io.prompter.confirm(&format!("{verb} {count} threads?"), false)? {
        Ok(())
    } else {
        Err(TalkError::Cancelled)
    }
}

/// Resolves threads, optionally replying to each first.
///
/// # Errors
///
/// Returns validation errors before any mutation, [`TalkError::Cancelled`]
/// when confirmation is declined, and the first mutation failure wrapped
/// with its thread id.
pub async fn run_resolve<G>(
    args: ResolveArgs,
    context: &RepositoryContext,
    gateway: &G,
    io: &mut CommandIo<'_>,
) -> Result<(), TalkError>
where
    G: ConversationGateway + ?Sized,
{
    if args
        .message
        .as_deref()
        .is_some_and(|text| text.trim().is_empty())
    {
        return Err(TalkError::EmptyMessage);
    }
    let threads = targets(
        &args.threads,
        ResolutionFilter::Unresolved,
        context,
        gateway,
        io,
    )
    .await?;
    confirm_many("Resolve", threads.len(), args.yes, io)?;

    let message = args.message.as_deref();
    let plan = BulkPlan {
        policy: FailurePolicy::FailFast,
        action: "resolve",
        tally_label: "threads resolved",
    };
    bulk::execute(
        threads,
        plan,
        |thread| async move {
            if let Some(body) = message {
                gateway
                    .reply_to_thread(&thread, body)
                    .await
                    .map_err(|error| error.with_context("failed to add message"))?;
            }
            gateway.resolve_thread(&thread).await?;
            Ok::<_, TalkError>(format!("✓ Resolved {thread}"))
        },
        io.out,
        io.err,
    )
    .await
    .map(drop)
}

/// Unresolves threads.
///
/// # Errors
///
/// Returns validation errors before any mutation, [`TalkError::Cancelled`]
/// when confirmation is declined, and the first mutation failure wrapped
/// with its thread id.
pub async fn run_unresolve<G>(
    args: &UnresolveArgs,
    context: &RepositoryContext,
    gateway: &G,
    io: &mut CommandIo<'_>,
) -> Result<(), TalkError>
where
    G: ConversationGateway + ?Sized,
{
    let threads = targets(
        &args.threads,
        ResolutionFilter::Resolved,
        context,
        gateway,
        io,
    )
    .await?;
    confirm_many("Unresolve", threads.len(), args.yes, io)?;

    let plan = BulkPlan {
        policy: FailurePolicy::FailFast,
        action: "unresolve",
        tally_label: "threads unresolved",
    };
    bulk::execute(
        threads,
        plan,
        |thread| async move {
            gateway.unresolve_thread(&thread).await?;
            Ok::<_, TalkError>(format!("✓ Unresolved {thread}"))
        },
        io.out,
        io.err,
    )
    .await
    .map(drop)
}
