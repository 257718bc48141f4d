//! Identifier taxonomy for GitHub conversation nodes.
//!
//! GitHub exposes review threads and comments through opaque, namespaced
//! node IDs. This module classifies arbitrary strings into the identifier
//! kinds understood by gh-talk and validates them before any request is sent.
//! Identifiers are never rewritten: parsing either accepts the input verbatim
//! or rejects it.

use std::fmt;

use super::error::{ExpectedIdentifier, TalkError};

/// Namespace prefix for pull request review threads.
pub const THREAD_ID_PREFIX: &str = "PRRT_";
/// Namespace prefix for pull request review comments.
pub const REVIEW_COMMENT_ID_PREFIX: &str = "PRRC_";
/// Namespace prefix for issue (conversation tab) comments.
pub const ISSUE_COMMENT_ID_PREFIX: &str = "IC_";

/// Classification of an arbitrary identifier string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierKind {
    /// A review thread node ID.
    Thread,
    /// A review comment node ID.
    ReviewComment,
    /// An issue comment node ID.
    IssueComment,
    /// A legacy numeric database ID.
    LegacyNumeric,
    /// A URL or web reference.
    Reference,
    /// Anything else, including the empty string.
    Unknown,
}

/// Returns true iff `value` is non-empty and consists solely of ASCII digits.
///
/// ```
/// use gh_talk::github::ids::is_numeric_id;
///
/// assert!(is_numeric_id("2486231843"));
/// assert!(!is_numeric_id("PRRT_x"));
/// assert!(!is_numeric_id(""));
/// ```
#[must_use]
pub fn is_numeric_id(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|byte| byte.is_ascii_digit())
}

fn looks_like_reference(value: &str) -> bool {
    value.contains("http") || value.contains("github.com")
}

/// Classifies an identifier without validating it for any particular use.
#[must_use]
pub fn classify(value: &str) -> IdentifierKind {
    if value.starts_with(THREAD_ID_PREFIX) {
        IdentifierKind::Thread
    } else if value.starts_with(REVIEW_COMMENT_ID_PREFIX) {
        IdentifierKind::ReviewComment
    } else if value.starts_with(ISSUE_COMMENT_ID_PREFIX) {
        IdentifierKind::IssueComment
    } else if is_numeric_id(value) {
        IdentifierKind::LegacyNumeric
    } else if looks_like_reference(value) {
        IdentifierKind::Reference
    } else {
        IdentifierKind::Unknown
    }
}

fn rejection(value: &str, expected: ExpectedIdentifier) -> TalkError {
    if value.is_empty() {
        return TalkError::EmptyIdentifier { expected };
    }
    match classify(value) {
        IdentifierKind::Reference => TalkError::UnsupportedReference {
            expected,
            value: value.to_owned(),
        },
        IdentifierKind::LegacyNumeric => TalkError::LegacyNumericId {
            expected,
            value: value.to_owned(),
        },
        _ => TalkError::InvalidFormat {
            expected,
            value: value.to_owned(),
        },
    }
}

/// A validated review thread node ID.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ThreadId(String);

impl ThreadId {
    /// Validates a thread identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TalkError::EmptyIdentifier`] for an empty string,
    /// [`TalkError::UnsupportedReference`] for URLs,
    /// [`TalkError::LegacyNumericId`] for numeric database IDs, and
    /// [`TalkError::InvalidFormat`] for anything else lacking `PRRT_`.
    pub fn parse(value: &str) -> Result<Self, TalkError> {
        if classify(value) == IdentifierKind::Thread {
            Ok(Self(value.to_owned()))
        } else {
            Err(rejection(value, ExpectedIdentifier::Thread))
        }
    }

    /// Borrow the raw node ID.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ThreadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The two namespaces a comment identifier may belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentKind {
    /// A comment within a review thread.
    Review,
    /// A top-level pull request or issue comment.
    Issue,
}

/// A validated comment node ID.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommentId {
    value: String,
    kind: CommentKind,
}

impl CommentId {
    /// Validates a comment identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TalkError::EmptyIdentifier`] for an empty string,
    /// [`TalkError::UnsupportedReference`] for URLs,
    /// [`TalkError::LegacyNumericId`] for numeric database IDs, and
    /// [`TalkError::InvalidFormat`] for anything else lacking `PRRC_` or
    /// `IC_`.
    pub fn parse(value: &str) -> Result<Self, TalkError> {
        let kind = match classify(value) {
            IdentifierKind::ReviewComment => CommentKind::Review,
            IdentifierKind::IssueComment => CommentKind::Issue,
            _ => return Err(rejection(value, ExpectedIdentifier::Comment)),
        };
        Ok(Self {
            value: value.to_owned(),
            kind,
        })
    }

    /// Borrow the raw node ID.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.value.as_str()
    }

    /// Namespace of the comment.
    #[must_use]
    pub const fn kind(&self) -> CommentKind {
        self.kind
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// Validates every input in order, stopping at the first invalid one.
///
/// # Errors
///
/// Returns the validation error of the first invalid identifier.
pub fn parse_all<T>(
    values: &[String],
    parse: impl Fn(&str) -> Result<T, TalkError>,
) -> Result<Vec<T>, TalkError> {
    values.iter().map(|value| parse(value)).collect()
}
