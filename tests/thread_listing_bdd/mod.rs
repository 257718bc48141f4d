//! Support modules for the thread listing BDD tests.

pub(crate) mod fixtures;
#[path = "../support/runtime.rs"]
pub(crate) mod runtime;
pub(crate) mod state;

pub(crate) use fixtures::{GRAPHQL_PATH, not_found_response, review_threads_response};
pub(crate) use state::{ListingRequest, ListingState, run_listing};
