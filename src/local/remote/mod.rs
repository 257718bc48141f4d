//! Git remote URL parsing.
//!
//! Accepts SCP-style SSH (`git@host:owner/repo.git`) and URL-style
//! (`https://`, `ssh://`, `git://`) remotes. Hosts other than `github.com`
//! are treated as GitHub Enterprise.

use super::error::LocalDiscoveryError;

/// Owner and repository parsed from a remote URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitHubOrigin {
    /// A `github.com` repository.
    GitHubCom {
        /// Repository owner (user or organisation).
        owner: String,
        /// Repository name.
        repository: String,
    },
    /// A GitHub Enterprise repository.
    Enterprise {
        /// Enterprise host, e.g. `ghe.example.com`.
        host: String,
        /// Non-default port, if any.
        port: Option<u16>,
        /// Repository owner (user or organisation).
        owner: String,
        /// Repository name.
        repository: String,
    },
}

impl GitHubOrigin {
    /// Repository owner.
    #[must_use]
    pub fn owner(&self) -> &str {
        match self {
            Self::GitHubCom { owner, .. } | Self::Enterprise { owner, .. } => owner,
        }
    }

    /// Repository name.
    #[must_use]
    pub fn repository(&self) -> &str {
        match self {
            Self::GitHubCom { repository, .. } | Self::Enterprise { repository, .. } => repository,
        }
    }

    /// Host serving the repository.
    #[must_use]
    pub fn host(&self) -> &str {
        match self {
            Self::GitHubCom { .. } => "github.com",
            Self::Enterprise { host, .. } => host,
        }
    }

    /// Port for Enterprise hosts on a non-default port.
    #[must_use]
    pub const fn port(&self) -> Option<u16> {
        match self {
            Self::GitHubCom { .. } => None,
            Self::Enterprise { port, .. } => *port,
        }
    }
}

/// Parses a remote URL into a [`GitHubOrigin`].
///
/// ```
/// use gh_talk::local::parse_github_remote;
///
/// let origin = parse_github_remote("git@github.com:octo/talk.git").expect("valid remote");
/// assert_eq!(origin.owner(), "octo");
/// assert_eq!(origin.repository(), "talk");
/// ```
///
/// # Errors
///
/// Returns [`LocalDiscoveryError::InvalidRemoteUrl`] when the URL has no
/// host or its path is not exactly `owner/repo`.
pub fn parse_github_remote(url: &str) -> Result<GitHubOrigin, LocalDiscoveryError> {
    let trimmed = url.trim();
    scp_style(trimmed)
        .or_else(|| url_style(trimmed))
        .ok_or_else(|| LocalDiscoveryError::InvalidRemoteUrl {
            url: url.to_owned(),
        })
}

fn scp_style(url: &str) -> Option<GitHubOrigin> {
    if url.contains("://") {
        return None;
    }
    let (user_host, path) = url.split_once(':')?;
    let (_, host) = user_host.split_once('@')?;
    origin_from_parts(host, None, path)
}

fn url_style(url: &str) -> Option<GitHubOrigin> {
    let parsed = url::Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    origin_from_parts(host, parsed.port(), parsed.path())
}

fn origin_from_parts(host: &str, port: Option<u16>, path: &str) -> Option<GitHubOrigin> {
    if host.is_empty() {
        return None;
    }
    let mut segments = path.trim_matches('/').split('/');
    let owner = segments.next().filter(|segment| !segment.is_empty())?;
    let raw_repository = segments.next()?;
    if segments.next().is_some() {
        return None;
    }
    let repository = raw_repository
        .strip_suffix(".git")
        .unwrap_or(raw_repository);
    if repository.is_empty() {
        return None;
    }

    if host.eq_ignore_ascii_case("github.com") {
        Some(GitHubOrigin::GitHubCom {
            owner: owner.to_owned(),
            repository: repository.to_owned(),
        })
    } else {
        Some(GitHubOrigin::Enterprise {
            host: host.to_owned(),
            port,
            owner: owner.to_owned(),
            repository: repository.to_owned(),
        })
    }
}
