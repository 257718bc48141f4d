//! Reaction content and emoji alias resolution.
//!
//! Users may type a glyph (`👍`), a name (`thumbs_up`), a shortcode
//! (`:+1:`), or the canonical GitHub enum value (`THUMBS_UP`). All forms
//! resolve to one of the eight [`ReactionContent`] kinds GitHub accepts.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::TalkError;

/// The eight reaction kinds GitHub supports, in canonical display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReactionContent {
    /// 👍
    ThumbsUp,
    /// 👎
    ThumbsDown,
    /// 😄
    Laugh,
    /// 🎉
    Hooray,
    /// 😕
    Confused,
    /// ❤️
    Heart,
    /// 🚀
    Rocket,
    /// 👀
    Eyes,
}

const ALIASES: &[(&str, ReactionContent)] = &[
    ("👍", ReactionContent::ThumbsUp),
    ("thumbs_up", ReactionContent::ThumbsUp),
    (":thumbs_up:", ReactionContent::ThumbsUp),
    (":+1:", ReactionContent::ThumbsUp),
    ("+1", ReactionContent::ThumbsUp),
    ("👎", ReactionContent::ThumbsDown),
    ("thumbs_down", ReactionContent::ThumbsDown),
    (":thumbs_down:", ReactionContent::ThumbsDown),
    (":-1:", ReactionContent::ThumbsDown),
    ("-1", ReactionContent::ThumbsDown),
    ("😄", ReactionContent::Laugh),
    ("laugh", ReactionContent::Laugh),
    (":laugh:", ReactionContent::Laugh),
    (":smile:", ReactionContent::Laugh),
    ("🎉", ReactionContent::Hooray),
    ("hooray", ReactionContent::Hooray),
    (":hooray:", ReactionContent::Hooray),
    (":tada:", ReactionContent::Hooray),
    ("😕", ReactionContent::Confused),
    ("confused", ReactionContent::Confused),
    (":confused:", ReactionContent::Confused),
    ("❤️", ReactionContent::Heart),
    ("❤", ReactionContent::Heart),
    ("heart", ReactionContent::Heart),
    (":heart:", ReactionContent::Heart),
    ("🚀", ReactionContent::Rocket),
    ("rocket", ReactionContent::Rocket),
    (":rocket:", ReactionContent::Rocket),
    ("👀", ReactionContent::Eyes),
    ("eyes", ReactionContent::Eyes),
    (":eyes:", ReactionContent::Eyes),
];

impl ReactionContent {
    /// All reaction kinds in canonical order.
    pub const ALL: [Self; 8] = [
        Self::ThumbsUp,
        Self::ThumbsDown,
        Self::Laugh,
        Self::Hooray,
        Self::Confused,
        Self::Heart,
        Self::Rocket,
        Self::Eyes,
    ];

    /// The GitHub enum value, e.g. `THUMBS_UP`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ThumbsUp => "THUMBS_UP",
            Self::ThumbsDown => "THUMBS_DOWN",
            Self::Laugh => "LAUGH",
            Self::Hooray => "HOORAY",
            Self::Confused => "CONFUSED",
            Self::Heart => "HEART",
            Self::Rocket => "ROCKET",
            Self::Eyes => "EYES",
        }
    }

    /// The emoji glyph for this reaction.
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::ThumbsUp => "👍",
            Self::ThumbsDown => "👎",
            Self::Laugh => "😄",
            Self::Hooray => "🎉",
            Self::Confused => "😕",
            Self::Heart => "❤️",
            Self::Rocket => "🚀",
            Self::Eyes => "👀",
        }
    }

    /// Looks up a canonical enum value such as `ROCKET`.
    #[must_use]
    pub fn from_canonical(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|content| content.as_str() == value)
    }

    /// Resolves user input into a reaction.
    ///
    /// ```
    /// use gh_talk::github::reaction::ReactionContent;
    ///
    /// assert_eq!(ReactionContent::parse(" :tada: ").ok(), Some(ReactionContent::Hooray));
    /// assert_eq!(ReactionContent::parse("rocket").ok(), Some(ReactionContent::Rocket));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`TalkError::UnknownReaction`] listing the supported reactions
    /// when the input matches no alias or canonical value.
    pub fn parse(input: &str) -> Result<Self, TalkError> {
        let trimmed = input.trim();
        let lowered = trimmed.to_lowercase();
        if let Some((_, content)) = ALIASES.iter().find(|(alias, _)| *alias == lowered) {
            return Ok(*content);
        }
        Self::from_canonical(&trimmed.to_uppercase()).ok_or_else(|| TalkError::UnknownReaction {
            input: input.to_owned(),
            supported: supported_reactions(),
        })
    }
}

impl fmt::Display for ReactionContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps a canonical enum value to its glyph, echoing unknown values.
#[must_use]
pub fn glyph_for_content(value: &str) -> String {
    ReactionContent::from_canonical(value).map_or_else(|| value.to_owned(), |c| c.glyph().to_owned())
}

fn supported_reactions() -> String {
    ReactionContent::ALL
        .into_iter()
        .map(|content| format!("  {} {}", content.glyph(), content.as_str().to_lowercase()))
        .collect::<Vec<_>>()
        .join("\n")
}
