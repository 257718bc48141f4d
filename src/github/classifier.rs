//! Reasons accepted when hiding (minimizing) a comment.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::TalkError;

/// GitHub's `ReportedContentClassifiers` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MinimizeClassifier {
    /// Unsolicited or promotional content.
    Spam,
    /// Abusive or harassing content.
    Abuse,
    /// Content unrelated to the discussion.
    OffTopic,
    /// Content superseded by later changes.
    Outdated,
    /// Content repeated elsewhere.
    Duplicate,
    /// Feedback that has been addressed.
    Resolved,
}

impl MinimizeClassifier {
    /// Every classifier in the order they are documented.
    pub const ALL: [Self; 6] = [
        Self::Spam,
        Self::Abuse,
        Self::OffTopic,
        Self::Outdated,
        Self::Duplicate,
        Self::Resolved,
    ];

    /// The GitHub enum value, e.g. `OFF_TOPIC`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Spam => "SPAM",
            Self::Abuse => "ABUSE",
            Self::OffTopic => "OFF_TOPIC",
            Self::Outdated => "OUTDATED",
            Self::Duplicate => "DUPLICATE",
            Self::Resolved => "RESOLVED",
        }
    }

    /// Parses a reason such as `off-topic`, `OFF_TOPIC`, or `Resolved`.
    ///
    /// # Errors
    ///
    /// Returns [`TalkError::InvalidClassifier`] for anything else.
    pub fn parse(reason: &str) -> Result<Self, TalkError> {
        let normalised = reason.trim().to_uppercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|classifier| classifier.as_str() == normalised)
            .ok_or_else(|| TalkError::InvalidClassifier {
                reason: reason.to_owned(),
            })
    }
}

impl FromStr for MinimizeClassifier {
    type Err = TalkError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl fmt::Display for MinimizeClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
