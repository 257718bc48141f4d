//! Local Git repository discovery.
//!
//! gh-talk infers the target repository from the configured remote (normally
//! `origin`) and the pull request from the checked-out branch when neither is
//! given on the command line.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use gh_talk::local::discover_repository;
//!
//! if let Ok(local) = discover_repository(Path::new("."), "origin") {
//!     let branch = local.branch().unwrap_or("(detached)");
//!     tracing::info!(owner = local.owner(), repo = local.repository(), branch);
//! }
//! ```

mod discovery;
mod error;
mod remote;

pub use discovery::{LocalRepository, discover_repository};
pub use error::LocalDiscoveryError;
pub use remote::{GitHubOrigin, parse_github_remote};
