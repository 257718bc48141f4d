//! JSON thread listing, optionally projected onto named fields.

use std::io::Write;

use serde::Serialize;
use serde_json::{Map, Value};

use super::truncate::truncate;
use crate::github::error::TalkError;
use crate::github::models::Thread;

const PREVIEW_LIMIT: usize = 100;

/// Field names accepted by `--json`.
pub const FIELD_NAMES: [&str; 9] = [
    "id",
    "path",
    "line",
    "isResolved",
    "isOutdated",
    "commentCount",
    "preview",
    "resolvedBy",
    "comments",
];

/// Serialised view of one thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadRecord<'a> {
    /// Thread node id.
    pub id: &'a str,
    /// File path.
    pub path: &'a str,
    /// Anchor line, `0` when absent.
    pub line: u32,
    /// Resolution state.
    pub is_resolved: bool,
    /// Present only when the thread is outdated.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_outdated: bool,
    /// Number of comments.
    pub comment_count: usize,
    /// First comment body, shortened.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
    /// Login of whoever resolved the thread.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_by: Option<&'a str>,
    /// Comment node ids in order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<&'a str>,
}

impl<'a> From<&'a Thread> for ThreadRecord<'a> {
    fn from(thread: &'a Thread) -> Self {
        Self {
            id: &thread.id,
            path: &thread.path,
            line: thread.line.unwrap_or_default(),
            is_resolved: thread.is_resolved,
            is_outdated: thread.is_outdated,
            comment_count: thread.comments.len(),
            preview: thread
                .preview()
                .filter(|body| !body.is_empty())
                .map(|body| truncate(body, PREVIEW_LIMIT)),
            resolved_by: thread.resolved_by.as_ref().map(|user| user.login.as_str()),
            comments: thread.comments.iter().map(|comment| comment.id.as_str()).collect(),
        }
    }
}

/// A validated `--json` field selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFields(Vec<String>);

impl JsonFields {
    /// Parses a comma-separated field list.
    ///
    /// # Errors
    ///
    /// Returns [`TalkError::Configuration`] for an empty list or an unknown
    /// field name.
    pub fn parse(input: &str) -> Result<Self, TalkError> {
        let fields: Vec<String> = input
            .split(',')
            .map(str::trim)
            .filter(|field| !field.is_empty())
            .map(str::to_owned)
            .collect();
        if fields.is_empty() {
            return Err(TalkError::Configuration {
                message: format!(
                    "--json requires at least one field\n\nAvailable fields: {}",
                    FIELD_NAMES.join(", ")
                ),
            });
        }
        if let Some(unknown) = fields
            .iter()
            .find(|field| !FIELD_NAMES.contains(&field.as_str()))
        {
            return Err(TalkError::Configuration {
                message: format!(
                    "unknown JSON field: {unknown}\n\nAvailable fields: {}",
                    FIELD_NAMES.join(", ")
                ),
            });
        }
        Ok(Self(fields))
    }

    /// The selected names in input order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.0
    }

    fn project(&self, record: Value) -> Value {
        let Value::Object(source) = record else {
            return record;
        };
        let projected: Map<String, Value> = self
            .0
            .iter()
            .filter_map(|name| source.get(name).map(|value| (name.clone(), value.clone())))
            .collect();
        Value::Object(projected)
    }
}

/// Writes threads as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns [`TalkError::Io`] when serialisation or writing fails.
pub fn write_threads(
    threads: &[Thread],
    fields: Option<&JsonFields>,
    out: &mut dyn Write,
) -> Result<(), TalkError> {
    let records = threads
        .iter()
        .map(|thread| serde_json::to_value(ThreadRecord::from(thread)))
        .collect::<Result<Vec<_>, _>>()
        .map_err(json_error)?;
    let document: Vec<Value> = match fields {
        Some(selection) => records
            .into_iter()
            .map(|record| selection.project(record))
            .collect(),
        None => records,
    };
    serde_json::to_writer_pretty(&mut *out, &document).map_err(json_error)?;
    writeln!(out)?;
    Ok(())
}

fn json_error(error: serde_json::Error) -> TalkError {
    TalkError::Io {
        message: format!("failed to encode JSON: {error}"),
    }
}
