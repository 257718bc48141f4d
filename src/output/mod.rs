//! Rendering of thread listings as table, TSV, or JSON.
//!
//! Format selection follows a fixed precedence: an explicit `--format`, then
//! `json` when `--json` fields were given, then `table` on a terminal and
//! `tsv` otherwise.

pub mod json;
pub mod table;
pub mod terminal;
pub mod truncate;
pub mod tsv;

use std::fmt;
use std::io::Write;
use std::str::FromStr;

pub use json::JsonFields;
pub use table::Table;
pub use terminal::TerminalInfo;
pub use truncate::{single_line, truncate};

use crate::github::error::TalkError;
use crate::github::models::Thread;

const TABLE_PREVIEW_LIMIT: usize = 50;
const TABLE_HEADERS: [&str; 6] = ["ID", "FILE:LINE", "STATUS", "COMMENTS", "REACTIONS", "PREVIEW"];

/// Listing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Aligned human-readable table.
    Table,
    /// Pretty-printed JSON array.
    Json,
    /// Tab-separated values with a header row.
    Tsv,
}

impl OutputFormat {
    /// Lower-case name as accepted on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Json => "json",
            Self::Tsv => "tsv",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = TalkError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "tsv" => Ok(Self::Tsv),
            other => Err(TalkError::UnknownFormat {
                format: other.to_owned(),
            }),
        }
    }
}

/// Chooses the output format.
///
/// # Errors
///
/// Returns [`TalkError::UnknownFormat`] when `explicit` names no known
/// format.
pub fn select_format(
    explicit: Option<&str>,
    json_fields_given: bool,
    terminal: TerminalInfo,
) -> Result<OutputFormat, TalkError> {
    match explicit {
        Some(name) => name.parse(),
        None if json_fields_given => Ok(OutputFormat::Json),
        None if terminal.is_terminal => Ok(OutputFormat::Table),
        None => Ok(OutputFormat::Tsv),
    }
}

/// `path:line`; file-level threads use line `0` as TSV and JSON do.
#[must_use]
pub fn file_line(thread: &Thread) -> String {
    format!("{}:{}", thread.path, thread.line.unwrap_or_default())
}

/// Resolution badge shown in tables.
#[must_use]
pub fn status_label(thread: &Thread) -> String {
    match (thread.is_resolved, &thread.resolved_by) {
        (true, Some(user)) => format!("✓ RESOLVED by @{}", user.login),
        (true, None) => "✓ RESOLVED".to_owned(),
        (false, _) => "○ OPEN".to_owned(),
    }
}

/// Non-zero reaction totals as `<glyph> <count>` pairs.
#[must_use]
pub fn reaction_summary(thread: &Thread) -> String {
    thread
        .reaction_totals()
        .into_iter()
        .map(|(content, count)| format!("{} {count}", content.glyph()))
        .collect::<Vec<_>>()
        .join(" ")
}

fn table_row(thread: &Thread) -> Vec<String> {
    vec![
        thread.id.clone(),
        file_line(thread),
        status_label(thread),
        thread.comments.len().to_string(),
        reaction_summary(thread),
        truncate(
            &single_line(thread.preview().unwrap_or_default()),
            TABLE_PREVIEW_LIMIT,
        ),
    ]
}

/// Writes threads in the chosen format.
///
/// # Errors
///
/// Returns [`TalkError::Io`] when writing or JSON encoding fails.
pub fn write_threads(
    threads: &[Thread],
    format: OutputFormat,
    fields: Option<&JsonFields>,
    terminal: TerminalInfo,
    out: &mut dyn Write,
) -> Result<(), TalkError> {
    match format {
        OutputFormat::Table => {
            let mut table = Table::new(TABLE_HEADERS);
            for thread in threads {
                table.push_row(table_row(thread));
            }
            table.write_to(out, terminal.width.map(usize::from))?;
            Ok(())
        }
        OutputFormat::Tsv => tsv::write_threads(threads, out).map_err(TalkError::from),
        OutputFormat::Json => json::write_threads(threads, fields, out),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{
        OutputFormat, TerminalInfo, file_line, reaction_summary, select_format, status_label,
        write_threads,
    };
    use crate::github::error::TalkError;
    use crate::github::models::test_support::sample_threads;

    #[rstest]
    #[case::explicit_wins(Some("tsv"), true, TerminalInfo::interactive(80), OutputFormat::Tsv)]
    #[case::json_fields(None, true, TerminalInfo::interactive(80), OutputFormat::Json)]
    #[case::terminal(None, false, TerminalInfo::interactive(80), OutputFormat::Table)]
    #[case::piped(None, false, TerminalInfo::piped(), OutputFormat::Tsv)]
    fn selects_format_by_precedence(
        #[case] explicit: Option<&str>,
        #[case] json_fields: bool,
        #[case] terminal: TerminalInfo,
        #[case] expected: OutputFormat,
    ) {
        assert_eq!(select_format(explicit, json_fields, terminal), Ok(expected));
    }

    #[rstest]
    fn unknown_format_lists_valid_names() {
        let error = select_format(Some("yaml"), false, TerminalInfo::piped())
            .expect_err("yaml is not supported");
        assert_eq!(
            error,
            TalkError::UnknownFormat {
                format: "yaml".to_owned()
            }
        );
        assert!(error.to_string().contains("table, json, tsv"));
    }

    #[rstest]
    fn labels_describe_thread_state() {
        let threads = sample_threads();
        let labels: Vec<String> = threads.iter().map(status_label).collect();
        assert_eq!(
            labels,
            vec!["○ OPEN", "✓ RESOLVED by @bob", "○ OPEN", "○ OPEN"]
        );
        let locations: Vec<String> = threads.iter().map(file_line).collect();
        assert_eq!(
            locations,
            vec!["src/main.rs:12", "src/lib.rs:7", "README.md:0", "src/cli/mod.rs:88"]
        );
    }

    #[rstest]
    fn reactions_follow_canonical_order() {
        let threads = sample_threads();
        let summaries: Vec<String> = threads.iter().map(reaction_summary).collect();
        assert_eq!(summaries, vec!["👍 2", "", "", "👍 1 🚀 1"]);
    }

    #[rstest]
    fn table_shows_one_row_per_thread() {
        let mut out = Vec::new();
        write_threads(
            &sample_threads(),
            OutputFormat::Table,
            None,
            TerminalInfo::interactive(200),
            &mut out,
        )
        .expect("write to buffer");
        let text = String::from_utf8(out).expect("utf8 output");
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 5);
        let header = lines.first().copied().unwrap_or_default();
        assert!(header.starts_with("ID          FILE:LINE"));
        assert!(header.ends_with("PREVIEW"));
        let first = lines.get(1).copied().unwrap_or_default();
        assert!(first.starts_with("PRRT_one    src/main.rs:12"));
        assert!(first.ends_with("Please handle the error here It can panic"));
        assert!(lines.iter().any(|line| line.contains("✓ RESOLVED by @bob")));
    }
}
