//! Octocrab client construction.

use http::Uri;
use octocrab::Octocrab;
use octocrab::service::middleware::retry::RetryConfig;

use crate::github::error::TalkError;
use crate::github::locator::PersonalAccessToken;

use super::error_mapping::map_octocrab_error;

/// Builds an authenticated Octocrab client for the given API base URL.
///
/// Requests are sent once; failed mutations are never replayed.
///
/// # Errors
///
/// Returns [`TalkError::Configuration`] when the base URI cannot be parsed
/// or the client cannot be constructed.
pub(super) fn build_octocrab_client(
    token: &PersonalAccessToken,
    api_base: &str,
) -> Result<Octocrab, TalkError> {
    let base_uri: Uri = api_base
        .parse::<Uri>()
        .map_err(|error| TalkError::Configuration {
            message: format!("invalid API base {api_base}: {error}"),
        })?;

    Octocrab::builder()
        .personal_token(token.as_ref())
        .add_retry_config(RetryConfig::None)
        .base_uri(base_uri)
        .map_err(|error| TalkError::Configuration {
            message: format!("build client failed: {error}"),
        })?
        .build()
        .map_err(|error| map_octocrab_error("build client", &error))
}
