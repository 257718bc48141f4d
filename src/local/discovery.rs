//! Repository and branch discovery through git2.

use std::path::{Path, PathBuf};

use git2::{ErrorCode, Repository};

use super::error::LocalDiscoveryError;
use super::remote::{GitHubOrigin, parse_github_remote};

/// A local checkout whose remote points at GitHub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalRepository {
    workdir: PathBuf,
    origin: GitHubOrigin,
    remote_name: String,
    branch: Option<String>,
}

impl LocalRepository {
    /// Path to the working directory.
    #[must_use]
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Parsed remote.
    #[must_use]
    pub const fn origin(&self) -> &GitHubOrigin {
        &self.origin
    }

    /// Repository owner.
    #[must_use]
    pub fn owner(&self) -> &str {
        self.origin.owner()
    }

    /// Repository name.
    #[must_use]
    pub fn repository(&self) -> &str {
        self.origin.repository()
    }

    /// Remote used for discovery.
    #[must_use]
    pub fn remote_name(&self) -> &str {
        &self.remote_name
    }

    /// Checked-out branch, `None` when HEAD is detached.
    #[must_use]
    pub fn branch(&self) -> Option<&str> {
        self.branch.as_deref()
    }
}

/// Searches upward from `start_path` for a repository and parses the URL of
/// `remote_name`.
///
/// # Errors
///
/// Returns [`LocalDiscoveryError::NotARepository`] outside a work tree,
/// [`LocalDiscoveryError::NoRemotes`] or
/// [`LocalDiscoveryError::RemoteNotFound`] when the remote is missing, and
/// [`LocalDiscoveryError::InvalidRemoteUrl`] when its URL has no
/// `owner/repo` path.
pub fn discover_repository(
    start_path: &Path,
    remote_name: &str,
) -> Result<LocalRepository, LocalDiscoveryError> {
    let repo = Repository::discover(start_path).map_err(|error| {
        if error.code() == ErrorCode::NotFound {
            LocalDiscoveryError::NotARepository
        } else {
            LocalDiscoveryError::from(error)
        }
    })?;
    let workdir = repo
        .workdir()
        .map(Path::to_path_buf)
        .ok_or(LocalDiscoveryError::NotARepository)?;
    let origin = remote_origin(&repo, remote_name)?;
    let branch = current_branch(&repo);
    tracing::debug!(
        workdir = %workdir.display(),
        remote = remote_name,
        branch = branch.as_deref().unwrap_or("(detached)"),
        "discovered local repository"
    );

    Ok(LocalRepository {
        workdir,
        origin,
        remote_name: remote_name.to_owned(),
        branch,
    })
}

fn remote_origin(repo: &Repository, remote_name: &str) -> Result<GitHubOrigin, LocalDiscoveryError> {
    if repo.remotes()?.is_empty() {
        return Err(LocalDiscoveryError::NoRemotes);
    }

    let remote = repo.find_remote(remote_name).map_err(|error| {
        if error.code() == ErrorCode::NotFound {
            LocalDiscoveryError::RemoteNotFound {
                name: remote_name.to_owned(),
            }
        } else {
            LocalDiscoveryError::from(error)
        }
    })?;

    let url = remote
        .url()
        .ok_or_else(|| LocalDiscoveryError::InvalidRemoteUrl {
            url: "(no URL)".to_owned(),
        })?;
    parse_github_remote(url)
}

/// Reads the branch HEAD points at, including unborn branches in fresh
/// repositories.
fn current_branch(repo: &Repository) -> Option<String> {
    match repo.head() {
        Ok(head) if head.is_branch() => head.shorthand().map(str::to_owned),
        Ok(_) => None,
        Err(error) if error.code() == ErrorCode::UnbornBranch => repo
            .find_reference("HEAD")
            .ok()
            .and_then(|head| head.symbolic_target().map(str::to_owned))
            .and_then(|target| target.strip_prefix("refs/heads/").map(str::to_owned)),
        Err(_) => None,
    }
}
