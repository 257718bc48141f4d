//! Repository and pull request identity wrappers.

use std::fmt;

use url::Url;

use super::error::TalkError;
use crate::local::GitHubOrigin;

const GITHUB_COM: &str = "github.com";
/// API base for github.com.
pub const PUBLIC_API_BASE: &str = "https://api.github.com";

/// Repository owner wrapper to avoid stringly typed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOwner(String);

impl RepositoryOwner {
    fn new(value: &str, input: &str) -> Result<Self, TalkError> {
        if value.is_empty() {
            return Err(TalkError::InvalidRepository {
                value: input.to_owned(),
            });
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the owner value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository name wrapper to prevent parameter mix-ups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName(String);

impl RepositoryName {
    fn new(value: &str, input: &str) -> Result<Self, TalkError> {
        if value.is_empty() {
            return Err(TalkError::InvalidRepository {
                value: input.to_owned(),
            });
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the repository name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Pull request number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PullRequestNumber(u64);

impl PullRequestNumber {
    /// Validates that the number is positive.
    ///
    /// # Errors
    ///
    /// Returns [`TalkError::Configuration`] for zero.
    pub fn new(value: u64) -> Result<Self, TalkError> {
        if value == 0 {
            return Err(TalkError::Configuration {
                message: "pull request number must be positive".to_owned(),
            });
        }
        Ok(Self(value))
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PullRequestNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Personal access token wrapper enforcing presence.
#[derive(Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`TalkError::MissingToken`] when the supplied string is blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, TalkError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TalkError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PersonalAccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PersonalAccessToken(***)")
    }
}

impl AsRef<str> for PersonalAccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

/// Derives the API base for a host: the public API for `github.com`, and
/// `https://HOST[:PORT]/api` for Enterprise (GraphQL lives at `/api/graphql`).
fn api_base_for_host(host: &str, port: Option<u16>) -> Result<Url, TalkError> {
    let raw = if host.eq_ignore_ascii_case(GITHUB_COM) {
        PUBLIC_API_BASE.to_owned()
    } else {
        match port {
            Some(port_number) => format!("https://{host}:{port_number}/api"),
            None => format!("https://{host}/api"),
        }
    };
    Url::parse(&raw).map_err(|error| TalkError::Configuration {
        message: format!("invalid API base for host {host}: {error}"),
    })
}

/// A repository on GitHub or GitHub Enterprise.
///
/// ```
/// use gh_talk::github::locator::RepositoryLocator;
///
/// let locator = RepositoryLocator::parse("octo/talk").expect("valid repository");
/// assert_eq!(locator.slug(), "octo/talk");
/// assert_eq!(locator.api_base().as_str(), "https://api.github.com/");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLocator {
    api_base: Url,
    owner: RepositoryOwner,
    repository: RepositoryName,
}

impl RepositoryLocator {
    /// Parses `OWNER/REPO` or `HOST/OWNER/REPO`.
    ///
    /// # Errors
    ///
    /// Returns [`TalkError::InvalidRepository`] for any other shape.
    pub fn parse(input: &str) -> Result<Self, TalkError> {
        let invalid = || TalkError::InvalidRepository {
            value: input.to_owned(),
        };
        let segments: Vec<&str> = input.trim().split('/').collect();
        let (host, owner, repository) = match segments.as_slice() {
            [owner, repository] => (GITHUB_COM, *owner, *repository),
            [host, owner, repository] if !host.is_empty() => (*host, *owner, *repository),
            _ => return Err(invalid()),
        };

        Ok(Self {
            api_base: api_base_for_host(host, None)?,
            owner: RepositoryOwner::new(owner, input)?,
            repository: RepositoryName::new(repository, input)?,
        })
    }

    /// Builds a locator from a discovered remote.
    ///
    /// # Errors
    ///
    /// Returns [`TalkError::InvalidRepository`] when the owner or name is
    /// empty.
    pub fn from_github_origin(origin: &GitHubOrigin) -> Result<Self, TalkError> {
        let display = format!("{}/{}", origin.owner(), origin.repository());
        Ok(Self {
            api_base: api_base_for_host(origin.host(), origin.port())?,
            owner: RepositoryOwner::new(origin.owner(), &display)?,
            repository: RepositoryName::new(origin.repository(), &display)?,
        })
    }

    /// Replaces the derived API base, e.g. from configuration.
    #[must_use]
    pub fn with_api_base(self, api_base: Url) -> Self {
        Self { api_base, ..self }
    }

    /// API base URL.
    #[must_use]
    pub const fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Repository owner.
    #[must_use]
    pub const fn owner(&self) -> &RepositoryOwner {
        &self.owner
    }

    /// Repository name.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryName {
        &self.repository
    }

    /// `owner/repo`.
    #[must_use]
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner.as_str(), self.repository.as_str())
    }
}

/// A pull request within a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestLocator {
    repository: RepositoryLocator,
    number: PullRequestNumber,
}

impl PullRequestLocator {
    /// Combines a repository and a pull request number.
    #[must_use]
    pub const fn new(repository: RepositoryLocator, number: PullRequestNumber) -> Self {
        Self { repository, number }
    }

    /// The repository containing the pull request.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryLocator {
        &self.repository
    }

    /// Pull request number.
    #[must_use]
    pub const fn number(&self) -> PullRequestNumber {
        self.number
    }

    /// API base URL.
    #[must_use]
    pub const fn api_base(&self) -> &Url {
        self.repository.api_base()
    }
}

impl fmt::Display for PullRequestLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.repository.slug(), self.number)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{PersonalAccessToken, PullRequestLocator, PullRequestNumber, RepositoryLocator};
    use crate::github::error::TalkError;
    use crate::local::GitHubOrigin;

    #[rstest]
    #[case::public("octo/talk", "https://api.github.com/")]
    #[case::enterprise("ghe.example.com/octo/talk", "https://ghe.example.com/api")]
    fn parses_repository_arguments(#[case] input: &str, #[case] api_base: &str) {
        let locator = RepositoryLocator::parse(input).expect("valid repository");
        assert_eq!(locator.owner().as_str(), "octo");
        assert_eq!(locator.repository().as_str(), "talk");
        assert_eq!(locator.api_base().as_str(), api_base);
    }

    #[rstest]
    #[case::bare("talk")]
    #[case::empty_owner("/talk")]
    #[case::empty_name("octo/")]
    #[case::too_long("a/b/c/d")]
    #[case::url("https://github.com/octo/talk")]
    fn rejects_malformed_repository_arguments(#[case] input: &str) {
        assert_eq!(
            RepositoryLocator::parse(input),
            Err(TalkError::InvalidRepository {
                value: input.to_owned()
            })
        );
    }

    #[rstest]
    fn enterprise_origin_keeps_port() {
        let origin = GitHubOrigin::Enterprise {
            host: "ghe.example.com".to_owned(),
            port: Some(8443),
            owner: "org".to_owned(),
            repository: "service".to_owned(),
        };
        let locator = RepositoryLocator::from_github_origin(&origin).expect("valid origin");
        assert_eq!(locator.api_base().as_str(), "https://ghe.example.com:8443/api");
    }

    #[rstest]
    fn pull_request_displays_as_reference() {
        let repository = RepositoryLocator::parse("octo/talk").expect("valid repository");
        let number = PullRequestNumber::new(42).expect("positive number");
        let locator = PullRequestLocator::new(repository, number);
        assert_eq!(locator.to_string(), "octo/talk#42");
    }

    #[rstest]
    fn zero_pull_request_number_is_rejected() {
        assert!(matches!(
            PullRequestNumber::new(0),
            Err(TalkError::Configuration { .. })
        ));
    }

    #[rstest]
    fn token_is_trimmed_and_redacted() {
        let token = PersonalAccessToken::new("  ghp_secret \n").expect("token present");
        assert_eq!(token.value(), "ghp_secret");
        assert!(!format!("{token:?}").contains("ghp_secret"));
        assert_eq!(PersonalAccessToken::new("   "), Err(TalkError::MissingToken));
    }
}
