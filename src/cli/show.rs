//! `show`: print one thread's full conversation.

use std::io::{self, Write};

use clap::Args;

use super::CommandIo;
use crate::github::error::TalkError;
use crate::github::gateway::ConversationGateway;
use crate::github::ids::ThreadId;
use crate::github::models::{Comment, Thread};
use crate::output::{file_line, status_label};

const SEPARATOR: &str = "─────────────────────────────────────────────────────";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

/// Arguments for `show`.
#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct ShowArgs {
    /// Thread to display.
    #[arg(value_name = "THREAD_ID")]
    pub thread: String,
}

impl ShowArgs {
    /// Checks the thread id.
    ///
    /// # Errors
    ///
    /// Returns the identifier error.
    pub fn validate(&self) -> Result<(), TalkError> {
        ThreadId::parse(&self.thread).map(drop)
    }
}

/// Fetches and prints a thread.
///
/// # Errors
///
/// Returns an identifier error before any request,
/// [`TalkError::ThreadNotFound`] when the thread does not exist, or the
/// remote failure.
pub async fn run<G>(args: &ShowArgs, gateway: &G, io: &mut CommandIo<'_>) -> Result<(), TalkError>
where
    G: ConversationGateway + ?Sized,
{
    let id = ThreadId::parse(&args.thread)?;
    let thread = gateway.thread(&id).await?;
    write_thread(&thread, io.out)?;
    Ok(())
}

fn write_thread(thread: &Thread, out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "Thread: {}", thread.id)?;
    writeln!(out, "File:   {}", file_line(thread))?;
    writeln!(out, "Status: {}", status_label(thread))?;
    if thread.is_outdated {
        writeln!(out, "⚠️  Outdated (code has changed since comment)")?;
    }

    writeln!(out, "\nConversation ({} comments):\n", thread.comments.len())?;
    for comment in &thread.comments {
        writeln!(out, "{SEPARATOR}")?;
        write_comment(comment, out)?;
    }
    writeln!(out, "{SEPARATOR}")
}

fn write_comment(comment: &Comment, out: &mut dyn Write) -> io::Result<()> {
    write!(out, "@{}", comment.author.login)?;
    match comment.created_at {
        Some(created_at) => write!(out, " · {}", created_at.format(TIMESTAMP_FORMAT))?,
        None => write!(out, " · unknown time")?,
    }
    if comment.reply_to.is_some() {
        write!(out, " (in reply)")?;
    }
    if comment.is_minimized {
        let reason = comment
            .minimized_reason
            .as_deref()
            .map_or_else(String::new, |value| format!(": {}", value.to_lowercase()));
        write!(out, " [hidden{reason}]")?;
    }
    writeln!(out, "\n\n{}", comment.body)?;

    let reactions: Vec<String> = comment
        .reaction_groups
        .iter()
        .filter(|group| group.total_count > 0)
        .map(|group| format!("{} {}", group.content.glyph(), group.total_count))
        .collect();
    if !reactions.is_empty() {
        writeln!(out, "\nReactions: {}", reactions.join(" "))?;
    }
    writeln!(out)
}
