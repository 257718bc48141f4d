//! Interactive thread selection shared by `reply`, `resolve`, and
//! `unresolve`.

use super::{CommandIo, RepositoryContext};
use crate::conversation::ResolutionFilter;
use crate::github::error::TalkError;
use crate::github::gateway::ConversationGateway;
use crate::github::ids::ThreadId;
use crate::github::models::Thread;
use crate::output::{file_line, single_line, truncate};

const OPTION_PREVIEW_LIMIT: usize = 50;

fn option_label(thread: &Thread, with_status: bool) -> String {
    let preview = truncate(
        &single_line(thread.preview().unwrap_or_default()),
        OPTION_PREVIEW_LIMIT,
    );
    let location = file_line(thread);
    if with_status {
        let marker = if thread.is_resolved { "✓" } else { "○" };
        format!("{marker} {location} - {preview}")
    } else {
        format!("{location} - {preview}")
    }
}

async fn candidates<G>(
    resolution: ResolutionFilter,
    context: &RepositoryContext,
    gateway: &G,
) -> Result<Vec<Thread>, TalkError>
where
    G: ConversationGateway + ?Sized,
{
    let pull_request = context.pull_request(gateway).await?;
    let threads: Vec<Thread> = gateway
        .list_threads(&pull_request)
        .await?
        .into_iter()
        .filter(|thread| resolution.admits(thread.is_resolved))
        .collect();
    if threads.is_empty() {
        let state = if resolution == ResolutionFilter::Resolved {
            "resolved"
        } else {
            "unresolved"
        };
        return Err(TalkError::NoCandidates {
            state: state.to_owned(),
        });
    }
    Ok(threads)
}

fn thread_id(thread: &Thread) -> Result<ThreadId, TalkError> {
    ThreadId::parse(&thread.id)
}

/// Lets the user pick one unresolved thread.
pub(super) async fn pick_unresolved_thread<G>(
    context: &RepositoryContext,
    gateway: &G,
    io: &mut CommandIo<'_>,
) -> Result<ThreadId, TalkError>
where
    G: ConversationGateway + ?Sized,
{
    let threads = candidates(ResolutionFilter::Unresolved, context, gateway).await?;
    let options: Vec<String> = threads
        .iter()
        .map(|thread| option_label(thread, false))
        .collect();
    let index = io
        .prompter
        .select("Select thread:", &options)?
        .ok_or(TalkError::NothingSelected)?;
    threads
        .get(index)
        .ok_or(TalkError::NothingSelected)
        .and_then(thread_id)
}

/// Lets the user pick any number of threads in the given state.
pub(super) async fn pick_threads<G>(
    resolution: ResolutionFilter,
    context: &RepositoryContext,
    gateway: &G,
    io: &mut CommandIo<'_>,
) -> Result<Vec<ThreadId>, TalkError>
where
    G: ConversationGateway + ?Sized,
{
    let threads = candidates(resolution, context, gateway).await?;
    let options: Vec<String> = threads
        .iter()
        .map(|thread| option_label(thread, true))
        .collect();
    let indices = io.prompter.multi_select("Select threads:", &options)?;
    if indices.is_empty() {
        return Err(TalkError::NothingSelected);
    }
    indices
        .into_iter()
        .filter_map(|index| threads.get(index))
        .map(thread_id)
        .collect()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::option_label;
    use crate::github::models::test_support::sample_threads;

    #[rstest]
    fn labels_show_location_and_flattened_preview() {
        let threads = sample_threads();
        let labels: Vec<String> = threads
            .iter()
            .map(|thread| option_label(thread, true))
            .collect();
        assert_eq!(
            labels,
            vec![
                "○ src/main.rs:12 - Please handle the error here It can panic",
                "✓ src/lib.rs:7 - Typo in doc comment",
                "○ README.md:0 - Mention the config file",
                "○ src/cli/mod.rs:88 - Nice refactor",
            ]
        );
    }
}
