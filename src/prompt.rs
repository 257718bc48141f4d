//! Line-based interactive prompts.
//!
//! Prompts are written to one stream and answers read a line at a time from
//! another, so the same implementation drives a terminal and scripted tests.
//! An empty answer to a selection means nothing was chosen.

use std::io::{BufRead, Write};

use crate::github::error::TalkError;

/// Asks the user for input.
pub trait Prompter {
    /// Reads one line of free text, without the trailing newline.
    ///
    /// # Errors
    ///
    /// Returns [`TalkError::Io`] when the streams fail.
    fn input(&mut self, message: &str) -> Result<String, TalkError>;

    /// Picks at most one option; `None` when the answer is empty.
    ///
    /// # Errors
    ///
    /// Returns [`TalkError::Configuration`] for an answer that names no
    /// option, or [`TalkError::Io`] when the streams fail.
    fn select(&mut self, message: &str, options: &[String]) -> Result<Option<usize>, TalkError>;

    /// Picks any number of options, in ascending order without duplicates.
    ///
    /// # Errors
    ///
    /// Returns [`TalkError::Configuration`] for an answer that names no
    /// option, or [`TalkError::Io`] when the streams fail.
    fn multi_select(&mut self, message: &str, options: &[String])
    -> Result<Vec<usize>, TalkError>;

    /// Asks a yes/no question; an empty answer takes `default`.
    ///
    /// # Errors
    ///
    /// Returns [`TalkError::Io`] when the streams fail.
    fn confirm(&mut self, message: &str, default: bool) -> Result<bool, TalkError>;
}

/// [`Prompter`] over a buffered reader and a writer.
#[derive(Debug)]
pub struct LinePrompter<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    /// Creates a prompter reading answers from `reader` and writing prompts
    /// to `writer`.
    pub const fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// The prompt stream.
    pub const fn writer(&self) -> &W {
        &self.writer
    }

    fn ask(&mut self, prompt: &str) -> Result<String, TalkError> {
        write!(self.writer, "{prompt}")?;
        self.writer.flush()?;
        let mut answer = String::new();
        self.reader.read_line(&mut answer)?;
        Ok(answer.trim_end_matches(['\r', '\n']).to_owned())
    }

    fn list_options(&mut self, message: &str, options: &[String]) -> Result<(), TalkError> {
        writeln!(self.writer, "{message}")?;
        for (index, option) in options.iter().enumerate() {
            writeln!(self.writer, "  {}. {option}", index.saturating_add(1))?;
        }
        Ok(())
    }
}

fn parse_choice(token: &str, count: usize) -> Result<usize, TalkError> {
    token
        .parse::<usize>()
        .ok()
        .filter(|choice| (1..=count).contains(choice))
        .map(|choice| choice.saturating_sub(1))
        .ok_or_else(|| TalkError::Configuration {
            message: format!("invalid selection `{token}`: choose a number from 1 to {count}"),
        })
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn input(&mut self, message: &str) -> Result<String, TalkError> {
        self.ask(&format!("{message} "))
    }

    fn select(&mut self, message: &str, options: &[String]) -> Result<Option<usize>, TalkError> {
        self.list_options(message, options)?;
        let answer = self.ask("Select a number (empty to cancel): ")?;
        let choice = answer.trim();
        if choice.is_empty() {
            return Ok(None);
        }
        parse_choice(choice, options.len()).map(Some)
    }

    fn multi_select(
        &mut self,
        message: &str,
        options: &[String],
    ) -> Result<Vec<usize>, TalkError> {
        self.list_options(message, options)?;
        let answer = self.ask("Select numbers separated by commas or spaces, or `all`: ")?;
        if answer.trim().eq_ignore_ascii_case("all") {
            return Ok((0..options.len()).collect());
        }
        let mut choices = answer
            .split(|character: char| character == ',' || character.is_whitespace())
            .filter(|token| !token.is_empty())
            .map(|token| parse_choice(token, options.len()))
            .collect::<Result<Vec<_>, _>>()?;
        choices.sort_unstable();
        choices.dedup();
        Ok(choices)
    }

    fn confirm(&mut self, message: &str, default: bool) -> Result<bool, TalkError> {
        let hint = if default { "Y/n" } else { "y/N" };
        let answer = self.ask(&format!("{message} ({hint}): "))?;
        Ok(match answer.trim().to_ascii_lowercase().as_str() {
            "" => default,
            "y" | "yes" => true,
            _ => false,
        })
    }
}
