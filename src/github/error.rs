//! Error types exposed by the conversation layer.
//!
//! Variants fall into three groups: identifier validation failures detected
//! before any request is sent, local input validation failures, and remote
//! failures classified from GitHub's GraphQL error payload or HTTP status.
//! Each variant renders a remediation hint after a blank line so the CLI can
//! print the message verbatim.

use thiserror::Error;

/// The kind of identifier a caller was expected to supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedIdentifier {
    /// A review thread identifier (`PRRT_…`).
    Thread,
    /// A review comment or issue comment identifier (`PRRC_…` or `IC_…`).
    Comment,
}

impl ExpectedIdentifier {
    /// Human-readable noun used in error messages.
    #[must_use]
    pub const fn noun(self) -> &'static str {
        match self {
            Self::Thread => "thread ID",
            Self::Comment => "comment ID",
        }
    }

    /// Example of the expected format.
    #[must_use]
    pub const fn example(self) -> &'static str {
        match self {
            Self::Thread => "PRRT_kwDOQN97u85gQeTN",
            Self::Comment => "PRRC_kwDOQN97u86UHqK7 or IC_kwDOQN97u87PVA8l",
        }
    }
}

/// Errors surfaced while validating input or talking to GitHub.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TalkError {
    /// An identifier argument was empty.
    #[error("{} required", .expected.noun())]
    EmptyIdentifier {
        /// Which identifier was expected.
        expected: ExpectedIdentifier,
    },

    /// An identifier did not carry the required namespace prefix.
    #[error(
        "invalid {} format: {value}\n\nExpected format: {}\nRun 'gh-talk list threads' to see available IDs",
        .expected.noun(),
        .expected.example()
    )]
    InvalidFormat {
        /// Which identifier was expected.
        expected: ExpectedIdentifier,
        /// The rejected input.
        value: String,
    },

    /// A URL was supplied where an identifier is required.
    #[error(
        "URL references are not supported: {value}\n\nUse the full {} instead (expected format: {})\nRun 'gh-talk list threads' to see available IDs",
        .expected.noun(),
        .expected.example()
    )]
    UnsupportedReference {
        /// Which identifier was expected.
        expected: ExpectedIdentifier,
        /// The rejected input.
        value: String,
    },

    /// A numeric database identifier was supplied where a node ID is required.
    #[error(
        "invalid {}: {value}\n\nYou provided a numeric database ID, but gh-talk requires node IDs\n\nTo find the correct node ID:\n  gh-talk list threads --pr <PR>\n\nExpected format: {}",
        .expected.noun(),
        .expected.example()
    )]
    LegacyNumericId {
        /// Which identifier was expected.
        expected: ExpectedIdentifier,
        /// The rejected input.
        value: String,
    },

    /// The reaction could not be mapped to a GitHub reaction.
    #[error("invalid emoji: {input}\n\nSupported reactions:\n{supported}")]
    UnknownReaction {
        /// The rejected input.
        input: String,
        /// Pre-rendered list of supported reactions.
        supported: String,
    },

    /// The output format is not recognised.
    #[error("unknown format: {format}\n\nValid formats: table, json, tsv")]
    UnknownFormat {
        /// The rejected format name.
        format: String,
    },

    /// The minimize classifier is not recognised.
    #[error(
        "invalid reason: {reason}\n\nValid reasons: spam, abuse, off-topic, outdated, duplicate, resolved"
    )]
    InvalidClassifier {
        /// The rejected reason.
        reason: String,
    },

    /// A reply body was empty.
    #[error("message cannot be empty")]
    EmptyMessage,

    /// Interactive selection returned nothing where at least one item was
    /// required.
    #[error("no threads selected")]
    NothingSelected,

    /// Interactive selection had no candidate threads to offer.
    #[error("no {state} threads found")]
    NoCandidates {
        /// Resolution state that was searched, e.g. `unresolved`.
        state: String,
    },

    /// The user declined a confirmation or interrupted the command.
    #[error("cancelled")]
    Cancelled,

    /// The requested thread was not found.
    #[error("thread not found: {id}\n\nRun 'gh-talk list threads' to see available threads")]
    ThreadNotFound {
        /// The missing thread identifier.
        id: String,
    },

    /// No authentication token was configured.
    #[error(
        "GitHub token is required\n\nSet GH_TOKEN or GITHUB_TOKEN, or add `token` to .gh-talk.toml"
    )]
    MissingToken,

    /// The repository argument could not be parsed.
    #[error("invalid repository format: {value}\n\nUse --repo OWNER/REPO or HOST/OWNER/REPO")]
    InvalidRepository {
        /// The rejected repository argument.
        value: String,
    },

    /// No pull request could be determined.
    #[error("{message}\n\nUse --pr NUMBER to specify a PR")]
    MissingPullRequest {
        /// Why the pull request could not be determined.
        message: String,
    },

    /// Local repository discovery failed.
    #[error(
        "could not determine repository: {message}\n\nRun this from a git repository or use --repo OWNER/REPO"
    )]
    LocalDiscovery {
        /// Details about the discovery failure.
        message: String,
    },

    /// Configuration could not be loaded or is inconsistent.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },

    /// The thread, comment, or repository does not exist.
    #[error(
        "resource not found: {message}\n\nThe thread, comment, or resource may have been deleted"
    )]
    ResourceNotFound {
        /// Message returned by GitHub.
        message: String,
    },

    /// The viewer lacks permission for the operation.
    #[error(
        "permission denied: {message}\n\nYou may not have access to this repository or resource"
    )]
    PermissionDenied {
        /// Message returned by GitHub.
        message: String,
    },

    /// GitHub rejected the input.
    #[error("validation failed: {message}")]
    ValidationFailed {
        /// Message returned by GitHub.
        message: String,
    },

    /// The API rate limit was reached.
    #[error("rate limit exceeded: {message}\n\nGitHub API rate limit reached. Try again later")]
    RateLimited {
        /// Message returned by GitHub.
        message: String,
    },

    /// The token was missing, expired, or rejected.
    #[error("authentication failed: {message}\n\nRun 'gh auth login' or refresh GH_TOKEN")]
    Unauthenticated {
        /// Message returned by GitHub.
        message: String,
    },

    /// GitHub could not be reached or answered with a gateway error.
    #[error("GitHub API unavailable: {message}\n\nTry again in a few moments")]
    ServiceUnavailable {
        /// Transport or status detail.
        message: String,
    },

    /// Any remote failure that does not fit a more specific variant.
    #[error("GitHub API error: {message}")]
    UnknownRemoteError {
        /// Message returned by GitHub.
        message: String,
    },

    /// A failure annotated with the target it applied to.
    #[error("{context}: {source}")]
    Operation {
        /// What was being attempted, e.g. `failed to resolve PRRT_x`.
        context: String,
        /// The underlying failure.
        source: Box<TalkError>,
    },

    /// Some targets of a bulk operation failed.
    #[error("{failed} of {total} operations failed")]
    BulkIncomplete {
        /// Number of targets that failed.
        failed: usize,
        /// Number of targets attempted.
        total: usize,
    },
}

impl TalkError {
    /// Wraps the error with a description of the target it applied to.
    #[must_use]
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::Operation {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Returns true when the error was produced by local validation, before
    /// any request was sent.
    #[must_use]
    pub const fn is_local_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyIdentifier { .. }
                | Self::InvalidFormat { .. }
                | Self::UnsupportedReference { .. }
                | Self::LegacyNumericId { .. }
                | Self::UnknownReaction { .. }
                | Self::UnknownFormat { .. }
                | Self::InvalidClassifier { .. }
                | Self::EmptyMessage
        )
    }
}

impl From<std::io::Error> for TalkError {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: error.to_string(),
        }
    }
}
