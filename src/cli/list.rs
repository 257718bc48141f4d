//! `list threads`: show review threads on a pull request.

use clap::Args;

use super::{CommandIo, RepositoryContext};
use crate::conversation::{ResolutionFilter, ThreadFilter};
use crate::github::error::TalkError;
use crate::github::gateway::ConversationGateway;
use crate::output::{self, JsonFields};

/// Arguments for `list threads`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Args)]
pub struct ListThreadsArgs {
    /// Show only unresolved threads (the default).
    #[arg(long)]
    pub unresolved: bool,

    /// Show only resolved threads.
    #[arg(long)]
    pub resolved: bool,

    /// Show all threads.
    #[arg(long)]
    pub all: bool,

    /// Keep threads where this login wrote a comment.
    #[arg(long, value_name = "LOGIN")]
    pub author: Option<String>,

    /// Keep threads on this file path.
    #[arg(long = "file", value_name = "PATH")]
    pub file: Option<String>,

    /// Output format: table, json, or tsv.
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Output JSON with only these comma-separated fields.
    #[arg(long, value_name = "FIELDS")]
    pub json: Option<String>,
}

impl ListThreadsArgs {
    /// Builds the filter described by the flags.
    ///
    /// # Errors
    ///
    /// Returns [`TalkError::Configuration`] when resolution flags conflict.
    pub fn filter(&self) -> Result<ThreadFilter, TalkError> {
        Ok(ThreadFilter {
            resolution: ResolutionFilter::from_flags(self.unresolved, self.resolved, self.all)?,
            author: self.author.clone(),
            path: self.file.clone(),
        })
    }

    /// Checks the flags without contacting GitHub.
    ///
    /// # Errors
    ///
    /// Returns conflicting resolution flags, unknown formats, and unknown
    /// JSON fields.
    pub fn validate(&self) -> Result<(), TalkError> {
        self.filter()?;
        if let Some(fields) = self.json.as_deref() {
            JsonFields::parse(fields)?;
        }
        if let Some(format) = self.format.as_deref() {
            format.parse::<output::OutputFormat>()?;
        }
        Ok(())
    }
}

/// Lists threads matching `args`.
///
/// # Errors
///
/// Returns flag validation errors before any request, then context and
/// gateway errors.
pub async fn run<G>(
    args: &ListThreadsArgs,
    context: &RepositoryContext,
    gateway: &G,
    io: &mut CommandIo<'_>,
) -> Result<(), TalkError>
where
    G: ConversationGateway + ?Sized,
{
    let filter = args.filter()?;
    let fields = args.json.as_deref().map(JsonFields::parse).transpose()?;
    let format = output::select_format(args.format.as_deref(), fields.is_some(), io.terminal)?;

    let pull_request = context.pull_request(gateway).await?;
    let threads = filter.apply(gateway.list_threads(&pull_request).await?);
    tracing::debug!(pull_request = %pull_request, shown = threads.len(), "threads filtered");

    if threads.is_empty() {
        writeln!(io.out, "No threads found in {pull_request}")?;
        return Ok(());
    }
    output::write_threads(&threads, format, fields.as_ref(), io.terminal, io.out)
}
