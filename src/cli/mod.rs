//! Command table and per-command handlers.
//!
//! Each leaf command owns its clap arguments and a handler generic over
//! [`ConversationGateway`], so handlers run unchanged against Octocrab or a
//! mock:
//! - [`list`]: List review threads
//! - [`reply`]: Reply to a thread
//! - [`resolve`]: Resolve and unresolve threads
//! - [`react`]: Add or remove reactions
//! - [`hide`]: Hide and unhide comments
//! - [`show`]: Show one thread's conversation
//! - [`status`]: Summarise a pull request's threads
//! - [`cleanup`]: Hide opening comments of resolved threads

use std::io::Write;

use clap::{Args, Parser, Subcommand};

use crate::github::error::TalkError;
use crate::github::gateway::ConversationGateway;
use crate::output::TerminalInfo;
use crate::prompt::Prompter;

pub mod cleanup;
pub mod context;
pub mod hide;
pub mod list;
pub mod react;
pub mod reply;
pub mod resolve;
mod selection;
pub mod show;
pub mod status;

#[cfg(test)]
pub mod test_utils;

pub use context::RepositoryContext;

/// Manage GitHub pull request review conversations from the terminal.
#[derive(Debug, Parser)]
#[command(name = "gh-talk", version, about)]
pub struct Cli {
    /// Options shared by every command.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Repository and pull request selection shared by every command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
pub struct GlobalArgs {
    /// Repository as `[HOST/]OWNER/REPO`.
    #[arg(short = 'R', long, global = true, value_name = "[HOST/]OWNER/REPO")]
    pub repo: Option<String>,

    /// Pull request number; defaults to the current branch's pull request.
    #[arg(long, global = true, value_name = "NUMBER")]
    pub pr: Option<u64>,
}

/// Leaf commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List conversation entities.
    #[command(subcommand)]
    List(ListCommand),
    /// Reply to a review thread.
    Reply(reply::ReplyArgs),
    /// Resolve review threads.
    Resolve(resolve::ResolveArgs),
    /// Unresolve review threads.
    Unresolve(resolve::UnresolveArgs),
    /// Add or remove a reaction on comments.
    React(react::ReactArgs),
    /// Hide comments.
    Hide(hide::HideArgs),
    /// Unhide a comment.
    Unhide(hide::UnhideArgs),
    /// Show a thread with all of its comments.
    Show(show::ShowArgs),
    /// Summarise review threads on a pull request.
    Status(status::StatusArgs),
    /// Hide the opening comments of resolved threads.
    Cleanup(cleanup::CleanupArgs),
}

impl Command {
    /// Checks arguments that need no repository, token, or network.
    ///
    /// Called before the token is resolved and the client is built.
    ///
    /// # Errors
    ///
    /// Returns the first local validation error of the command.
    pub fn validate(&self) -> Result<(), TalkError> {
        match self {
            Self::List(ListCommand::Threads(args)) => args.validate(),
            Self::Reply(args) => args.validate(),
            Self::Resolve(args) => args.validate(),
            Self::Unresolve(args) => args.validate(),
            Self::React(args) => args.parse_targets().map(drop),
            Self::Hide(args) => args.validate(),
            Self::Unhide(args) => args.validate(),
            Self::Show(args) => args.validate(),
            Self::Status(_) | Self::Cleanup(_) => Ok(()),
        }
    }
}

/// `list` subcommands.
#[derive(Debug, Subcommand)]
pub enum ListCommand {
    /// List review threads.
    Threads(list::ListThreadsArgs),
}

/// Streams and prompts available to a handler.
pub struct CommandIo<'a> {
    /// Primary output.
    pub out: &'a mut dyn Write,
    /// Warnings and per-target failures.
    pub err: &'a mut dyn Write,
    /// Interactive input.
    pub prompter: &'a mut dyn Prompter,
    /// Properties of the output terminal.
    pub terminal: TerminalInfo,
}

/// Runs one command to completion.
///
/// # Errors
///
/// Returns whatever the command's handler returns.
pub async fn dispatch<G>(
    command: Command,
    context: &RepositoryContext,
    gateway: &G,
    io: &mut CommandIo<'_>,
) -> Result<(), TalkError>
where
    G: ConversationGateway + ?Sized,
{
    match command {
        Command::List(ListCommand::Threads(args)) => list::run(&args, context, gateway, io).await,
        Command::Reply(args) => reply::run(args, context, gateway, io).await,
        Command::Resolve(args) => resolve::run_resolve(args, context, gateway, io).await,
        Command::Unresolve(args) => resolve::run_unresolve(&args, context, gateway, io).await,
        Command::React(args) => react::run(&args, gateway, io).await,
        Command::Hide(args) => hide::run_hide(&args, gateway, io).await,
        Command::Unhide(args) => hide::run_unhide(&args, gateway, io).await,
        Command::Show(args) => show::run(&args, gateway, io).await,
        Command::Status(args) => status::run(args, context, gateway, io).await,
        Command::Cleanup(args) => cleanup::run(args, context, gateway, io).await,
    }
}
