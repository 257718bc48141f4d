//! Scenario state and the listing runner for the thread listing BDD tests.

use std::io::Cursor;
use std::time::Duration;

use gh_talk::cli::list::{self, ListThreadsArgs};
use gh_talk::cli::{CommandIo, RepositoryContext};
use gh_talk::github::{PullRequestNumber, RepositoryLocator};
use gh_talk::output::TerminalInfo;
use gh_talk::prompt::LinePrompter;
use gh_talk::{OctocrabConversationGateway, PersonalAccessToken, PullRequestLocator, TalkError};
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use wiremock::MockServer;

use super::runtime::SharedRuntime;

#[derive(ScenarioState, Default)]
pub(crate) struct ListingState {
    pub(crate) runtime: Slot<SharedRuntime>,
    pub(crate) server: Slot<MockServer>,
    pub(crate) pull_request: Slot<PullRequestLocator>,
    pub(crate) output: Slot<String>,
    pub(crate) error: Slot<TalkError>,
}

/// Options the user passes to `list threads`.
#[derive(Debug, Default)]
pub(crate) struct ListingRequest {
    pub(crate) all: bool,
    pub(crate) format: Option<String>,
    pub(crate) json: Option<String>,
}

/// Parses `owner/repo#number`.
pub(crate) fn parse_pull_request(reference: &str) -> PullRequestLocator {
    let (repository, number) = reference
        .split_once('#')
        .unwrap_or_else(|| panic!("expected owner/repo#number, got {reference}"));
    let locator = RepositoryLocator::parse(repository)
        .unwrap_or_else(|error| panic!("invalid repository {repository}: {error}"));
    let parsed = number
        .parse::<u64>()
        .ok()
        .and_then(|value| PullRequestNumber::new(value).ok())
        .unwrap_or_else(|| panic!("invalid pull request number {number}"));
    PullRequestLocator::new(locator, parsed)
}

/// Runs `list threads` against the mock server and records the outcome.
pub(crate) fn run_listing(listing_state: &ListingState, request: ListingRequest) {
    let runtime = listing_state
        .runtime
        .get()
        .unwrap_or_else(|| panic!("runtime not initialised"));
    let api_base = listing_state
        .server
        .with_ref(|server| format!("{}/api", server.uri()))
        .unwrap_or_else(|| panic!("mock server not initialised"));
    let pull_request = listing_state
        .pull_request
        .get()
        .unwrap_or_else(|| panic!("pull request not chosen"));

    let args = ListThreadsArgs {
        all: request.all,
        format: request.format,
        json: request.json,
        ..ListThreadsArgs::default()
    };
    let context = RepositoryContext::for_pull_request(&pull_request);
    let mut out = Vec::new();
    let mut err = Vec::new();
    let mut prompter = LinePrompter::new(Cursor::new(Vec::new()), Vec::new());

    let result = runtime.block_on(async {
        let token = PersonalAccessToken::new("test-token")?;
        let gateway =
            OctocrabConversationGateway::new(&token, &api_base, Duration::from_secs(5))?;
        let mut io = CommandIo {
            out: &mut out,
            err: &mut err,
            prompter: &mut prompter,
            terminal: TerminalInfo::piped(),
        };
        list::run(&args, &context, &gateway, &mut io).await
    });

    listing_state
        .output
        .set(String::from_utf8_lossy(&out).into_owned());
    if let Err(error) = result {
        listing_state.error.set(error);
    }
}
