//! Application configuration loaded from files and the environment.
//!
//! Values are merged with ortho-config's layered approach. Command-line
//! global flags (`--repo`, `--pr`) are parsed separately by the command
//! table and take precedence over anything loaded here.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.gh-talk.toml` in the current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `GH_TALK_TOKEN`, `GH_TALK_REPO`, and so on
//! 4. **Command-line global flags**
//!
//! The token additionally falls back to `GH_TOKEN` and then `GITHUB_TOKEN`
//! when no layer provides one.
//!
//! # Configuration File
//!
//! ```toml
//! token = "ghp_example"
//! repo = "octocat/hello-world"
//! remote = "upstream"
//! request_timeout_seconds = 60
//! log_level = "debug"
//! ```

use std::env;
use std::ffi::OsString;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::github::error::TalkError;
use crate::github::locator::{PersonalAccessToken, RepositoryLocator};

/// Environment variables consulted, in order, when no token is configured.
pub const TOKEN_FALLBACK_VARIABLES: [&str; 2] = ["GH_TOKEN", "GITHUB_TOKEN"];

const DEFAULT_REMOTE: &str = "origin";
const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;
const DEFAULT_LOG_LEVEL: &str = "warn";

/// Application configuration supporting environment and file sources.
///
/// # Environment Variables
///
/// - `GH_TALK_TOKEN`, `GH_TOKEN`, or `GITHUB_TOKEN`: Authentication token
/// - `GH_TALK_REPO`: Default repository as `[HOST/]OWNER/REPO`
/// - `GH_TALK_API_BASE`: GitHub API base URL override
/// - `GH_TALK_REMOTE`: Git remote used for repository discovery
/// - `GH_TALK_REQUEST_TIMEOUT_SECONDS`: Per-request timeout
/// - `GH_TALK_LOG_LEVEL`: Default tracing filter
///
/// # Example
///
/// ```no_run
/// use gh_talk::TalkConfig;
///
/// let config = TalkConfig::load_without_cli().expect("failed to load configuration");
/// let token = config.resolve_token().expect("token required");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "GH_TALK",
    discovery(
        dotfile_name = ".gh-talk.toml",
        config_file_name = "gh-talk.toml",
        app_name = "gh-talk"
    )
)]
pub struct TalkConfig {
    /// Personal access token for GitHub API authentication.
    #[ortho_config()]
    pub token: Option<String>,

    /// Repository used when `--repo` is not given.
    #[ortho_config()]
    pub repo: Option<String>,

    /// API base URL overriding the one derived from the repository host.
    #[ortho_config()]
    pub api_base: Option<String>,

    /// Git remote inspected during local discovery.
    #[ortho_config()]
    pub remote: String,

    /// Disables reading the repository and branch from the local checkout.
    ///
    /// `ortho_config` does not load boolean values from the environment, so
    /// this is only honoured from the configuration file.
    #[ortho_config()]
    pub no_local_discovery: bool,

    /// Upper bound on a single GitHub request, in seconds.
    #[ortho_config()]
    pub request_timeout_seconds: u64,

    /// Tracing filter used when `RUST_LOG` is unset.
    #[ortho_config()]
    pub log_level: String,
}

impl Default for TalkConfig {
    fn default() -> Self {
        Self {
            token: None,
            repo: None,
            api_base: None,
            remote: DEFAULT_REMOTE.to_owned(),
            no_local_discovery: false,
            request_timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECONDS,
            log_level: DEFAULT_LOG_LEVEL.to_owned(),
        }
    }
}

impl TalkConfig {
    /// Loads defaults, configuration files, and environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`TalkError::Configuration`] when a source cannot be parsed.
    pub fn load_without_cli() -> Result<Self, TalkError> {
        Self::load_from_iter([OsString::from(env!("CARGO_PKG_NAME"))]).map_err(|error| {
            TalkError::Configuration {
                message: error.to_string(),
            }
        })
    }

    /// Resolves the token from configuration, then `GH_TOKEN`, then
    /// `GITHUB_TOKEN`.
    ///
    /// # Errors
    ///
    /// Returns [`TalkError::MissingToken`] when no source provides a
    /// non-empty value.
    pub fn resolve_token(&self) -> Result<PersonalAccessToken, TalkError> {
        let configured = self
            .token
            .clone()
            .filter(|token| !token.trim().is_empty());
        let value = configured
            .or_else(|| {
                TOKEN_FALLBACK_VARIABLES
                    .iter()
                    .filter_map(|name| env::var(name).ok())
                    .find(|token| !token.trim().is_empty())
            })
            .ok_or(TalkError::MissingToken)?;
        PersonalAccessToken::new(value)
    }

    /// Per-request timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Parses the configured API base override, if any.
    ///
    /// # Errors
    ///
    /// Returns [`TalkError::Configuration`] when the value is not a URL.
    pub fn api_base_override(&self) -> Result<Option<Url>, TalkError> {
        self.api_base
            .as_deref()
            .map(|value| {
                Url::parse(value).map_err(|error| TalkError::Configuration {
                    message: format!("invalid api_base `{value}`: {error}"),
                })
            })
            .transpose()
    }

    /// Parses the configured default repository, if any.
    ///
    /// # Errors
    ///
    /// Returns [`TalkError::InvalidRepository`] when the value is malformed.
    pub fn repository(&self) -> Result<Option<RepositoryLocator>, TalkError> {
        self.repo.as_deref().map(RepositoryLocator::parse).transpose()
    }

    /// Checks that configured values are usable.
    ///
    /// # Errors
    ///
    /// Returns [`TalkError::Configuration`] for a zero timeout, an empty
    /// remote name, or an unparseable API base, and
    /// [`TalkError::InvalidRepository`] for a malformed `repo`.
    pub fn validate(&self) -> Result<(), TalkError> {
        if self.request_timeout_seconds == 0 {
            return Err(TalkError::Configuration {
                message: "request_timeout_seconds must be greater than zero".to_owned(),
            });
        }
        if self.remote.trim().is_empty() {
            return Err(TalkError::Configuration {
                message: "remote must name a git remote".to_owned(),
            });
        }
        self.api_base_override()?;
        self.repository()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests;
