//! Shared test utilities for command handler tests.

use std::io::Cursor;

use super::{CommandIo, RepositoryContext};
use crate::github::locator::{PullRequestLocator, PullRequestNumber, RepositoryLocator};
use crate::output::TerminalInfo;
use crate::prompt::LinePrompter;

/// Captures a handler's output and feeds it scripted answers.
pub struct Harness {
    /// Captured primary output.
    pub out: Vec<u8>,
    /// Captured error output.
    pub err: Vec<u8>,
    /// Prompter answering from the script.
    pub prompter: LinePrompter<Cursor<Vec<u8>>, Vec<u8>>,
    /// Terminal reported to the handler.
    pub terminal: TerminalInfo,
}

impl Harness {
    /// A piped harness with no answers.
    pub fn new() -> Self {
        Self::with_answers("")
    }

    /// A piped harness answering prompts from `script`, one line each.
    pub fn with_answers(script: &str) -> Self {
        Self {
            out: Vec::new(),
            err: Vec::new(),
            prompter: LinePrompter::new(Cursor::new(script.as_bytes().to_vec()), Vec::new()),
            terminal: TerminalInfo::piped(),
        }
    }

    /// Borrows the streams for one handler call.
    pub fn io(&mut self) -> CommandIo<'_> {
        CommandIo {
            out: &mut self.out,
            err: &mut self.err,
            prompter: &mut self.prompter,
            terminal: self.terminal,
        }
    }

    /// Primary output as text.
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.out).into_owned()
    }

    /// Error output as text.
    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.err).into_owned()
    }

    /// Everything the prompter displayed.
    pub fn prompts(&self) -> String {
        String::from_utf8_lossy(self.prompter.writer()).into_owned()
    }
}

/// `octo/widgets#42`.
pub fn pull_request() -> PullRequestLocator {
    let repository = RepositoryLocator::parse("octo/widgets").expect("valid repository");
    PullRequestLocator::new(repository, PullRequestNumber::new(42).expect("non-zero number"))
}

/// A context pinned to [`pull_request`].
pub fn context() -> RepositoryContext {
    RepositoryContext::for_pull_request(&pull_request())
}
