//! Repository and pull request resolution for commands.
//!
//! The repository comes from `--repo`, then the configured `repo`, then the
//! configured git remote of the local checkout. The pull request number
//! comes from `--pr`, then from the open pull request whose head is the
//! current branch. Resolution failures are kept until a command actually
//! needs the value, so commands that only take node ids run anywhere.

use std::path::Path;

use url::Url;

use super::GlobalArgs;
use crate::config::TalkConfig;
use crate::github::error::TalkError;
use crate::github::gateway::ConversationGateway;
use crate::github::locator::{
    PUBLIC_API_BASE, PullRequestLocator, PullRequestNumber, RepositoryLocator,
};
use crate::local::discover_repository;

/// What a command knows about its target repository.
#[derive(Debug, Clone)]
pub struct RepositoryContext {
    repository: Result<RepositoryLocator, TalkError>,
    pull_request: Option<PullRequestNumber>,
    branch: Option<String>,
    api_base: Url,
}

impl RepositoryContext {
    /// Resolves flags and configuration, discovering the local checkout at
    /// `start` when needed.
    ///
    /// # Errors
    ///
    /// Returns [`TalkError::InvalidRepository`] for a malformed explicit
    /// repository, [`TalkError::Configuration`] for a zero `--pr` or a bad
    /// API base. Discovery failures are deferred.
    pub fn resolve(
        global: &GlobalArgs,
        config: &TalkConfig,
        start: &Path,
    ) -> Result<Self, TalkError> {
        let api_override = config.api_base_override()?;
        let pull_request = global.pr.map(PullRequestNumber::new).transpose()?;
        let explicit = global
            .repo
            .as_deref()
            .or(config.repo.as_deref())
            .map(RepositoryLocator::parse)
            .transpose()?;

        let local = if config.no_local_discovery {
            None
        } else {
            discover_repository(start, &config.remote)
                .inspect_err(|error| tracing::debug!(%error, "local discovery failed"))
                .ok()
        };
        let branch = local
            .as_ref()
            .and_then(|repo| repo.branch().map(str::to_owned));

        let repository = match (explicit, local) {
            (Some(repository), _) => Ok(repository),
            (None, Some(local_repo)) => RepositoryLocator::from_github_origin(local_repo.origin()),
            (None, None) => Err(TalkError::LocalDiscovery {
                message: discovery_hint(config),
            }),
        }
        .map(|repository| match &api_override {
            Some(api_base) => repository.with_api_base(api_base.clone()),
            None => repository,
        });

        let api_base = match (&repository, api_override) {
            (_, Some(api_base)) => api_base,
            (Ok(repository), None) => repository.api_base().clone(),
            (Err(_), None) => public_api_base()?,
        };

        Ok(Self {
            repository,
            pull_request,
            branch,
            api_base,
        })
    }

    /// A context pinned to one pull request.
    #[must_use]
    pub fn for_pull_request(pull_request: &PullRequestLocator) -> Self {
        Self {
            api_base: pull_request.api_base().clone(),
            repository: Ok(pull_request.repository().clone()),
            pull_request: Some(pull_request.number()),
            branch: None,
        }
    }

    /// A context that looks the pull request up from `branch`.
    #[must_use]
    pub fn for_branch(repository: RepositoryLocator, branch: impl Into<String>) -> Self {
        Self {
            api_base: repository.api_base().clone(),
            repository: Ok(repository),
            pull_request: None,
            branch: Some(branch.into()),
        }
    }

    /// API base the gateway should talk to.
    #[must_use]
    pub const fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// The target repository.
    ///
    /// # Errors
    ///
    /// Returns the deferred resolution failure.
    pub fn repository(&self) -> Result<&RepositoryLocator, TalkError> {
        self.repository.as_ref().map_err(Clone::clone)
    }

    /// The target pull request, asking GitHub for the current branch's pull
    /// request when no number was given.
    ///
    /// # Errors
    ///
    /// Returns the deferred repository failure,
    /// [`TalkError::MissingPullRequest`] when no pull request can be found,
    /// or the gateway's error.
    pub async fn pull_request<G>(&self, gateway: &G) -> Result<PullRequestLocator, TalkError>
    where
        G: ConversationGateway + ?Sized,
    {
        let repository = self.repository()?.clone();
        let number = match self.pull_request {
            Some(number) => number,
            None => self.pull_request_for_branch(gateway, &repository).await?,
        };
        Ok(PullRequestLocator::new(repository, number))
    }

    async fn pull_request_for_branch<G>(
        &self,
        gateway: &G,
        repository: &RepositoryLocator,
    ) -> Result<PullRequestNumber, TalkError>
    where
        G: ConversationGateway + ?Sized,
    {
        let branch = self
            .branch
            .as_deref()
            .ok_or_else(|| TalkError::MissingPullRequest {
                message: "no PR found for current branch".to_owned(),
            })?;
        let number = gateway
            .pull_request_for_branch(repository, branch)
            .await?
            .ok_or_else(|| TalkError::MissingPullRequest {
                message: format!("no PR found for current branch `{branch}`"),
            })?;
        tracing::debug!(branch, pull_request = %number, "resolved pull request from branch");
        Ok(number)
    }
}

fn discovery_hint(config: &TalkConfig) -> String {
    if config.no_local_discovery {
        "local discovery is disabled".to_owned()
    } else {
        format!("no GitHub remote named `{}` found", config.remote)
    }
}

fn public_api_base() -> Result<Url, TalkError> {
    Url::parse(PUBLIC_API_BASE).map_err(|error| TalkError::Configuration {
        message: format!("invalid API base: {error}"),
    })
}
