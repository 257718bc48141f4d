//! Aligned plain-text tables.
//!
//! Columns are padded to their widest cell by display width and separated
//! by a two-space gutter. The final column is never padded and is the one
//! shortened when a terminal width is known.

use std::io::{self, Write};

use unicode_width::UnicodeWidthStr;

use super::truncate::truncate;

const GUTTER: &str = "  ";
const MIN_LAST_COLUMN: usize = 10;

/// A table of string cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Creates an empty table with the given headers.
    #[must_use]
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Appends a row. Missing cells render empty; extra cells are ignored.
    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    fn column_widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(index, header)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(index))
                    .map(|cell| cell.width())
                    .chain(std::iter::once(header.width()))
                    .max()
                    .unwrap_or_default()
            })
            .collect()
    }

    /// Writes the table, shortening the last column to fit `max_width`.
    ///
    /// # Errors
    ///
    /// Propagates write failures.
    pub fn write_to(&self, out: &mut dyn Write, max_width: Option<usize>) -> io::Result<()> {
        let widths = self.column_widths();
        let last_budget = max_width.map(|total| last_column_budget(&widths, total));

        write_row(out, &self.headers, &widths, last_budget)?;
        for row in &self.rows {
            write_row(out, row, &widths, last_budget)?;
        }
        Ok(())
    }
}

fn last_column_budget(widths: &[usize], total: usize) -> usize {
    let leading: usize = widths
        .iter()
        .rev()
        .skip(1)
        .map(|width| width.saturating_add(GUTTER.len()))
        .sum();
    total.saturating_sub(leading).max(MIN_LAST_COLUMN)
}

fn write_row<S: AsRef<str>>(
    out: &mut dyn Write,
    cells: &[S],
    widths: &[usize],
    last_budget: Option<usize>,
) -> io::Result<()> {
    let last = widths.len().saturating_sub(1);
    let mut line = String::new();
    for (index, width) in widths.iter().enumerate() {
        let cell = cells.get(index).map_or("", AsRef::as_ref);
        if index == last {
            match last_budget {
                Some(budget) if cell.width() > budget => line.push_str(&fit_width(cell, budget)),
                _ => line.push_str(cell),
            }
        } else {
            line.push_str(cell);
            let padding = width.saturating_sub(cell.width());
            line.extend(std::iter::repeat_n(' ', padding));
            line.push_str(GUTTER);
        }
    }
    writeln!(out, "{}", line.trim_end())
}

/// Truncates by characters until the display width fits.
fn fit_width(cell: &str, budget: usize) -> String {
    let mut limit = budget;
    loop {
        let candidate = truncate(cell, limit);
        if candidate.width() <= budget || limit == 0 {
            return candidate;
        }
        limit = limit.saturating_sub(1);
    }
}
