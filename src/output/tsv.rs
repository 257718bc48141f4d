//! Tab-separated thread listing for scripts.

use std::io::{self, Write};

use crate::github::models::Thread;

const HEADER: [&str; 6] = ["ID", "Path", "Line", "IsResolved", "CommentCount", "Preview"];

/// Replaces characters that would break a TSV record.
fn sanitise(value: &str) -> String {
    value.replace(['\t', '\n', '\r'], " ")
}

/// Writes one header row and one row per thread.
///
/// # Errors
///
/// Propagates write failures.
pub fn write_threads(threads: &[Thread], out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "{}", HEADER.join("\t"))?;
    for thread in threads {
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}\t{}",
            sanitise(&thread.id),
            sanitise(&thread.path),
            thread.line.unwrap_or_default(),
            thread.is_resolved,
            thread.comments.len(),
            sanitise(thread.preview().unwrap_or_default()),
        )?;
    }
    Ok(())
}
