//! gh-talk CLI entrypoint.

use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use gh_talk::cli::{self, Cli, CommandIo, RepositoryContext};
use gh_talk::output::TerminalInfo;
use gh_talk::prompt::LinePrompter;
use gh_talk::{OctocrabConversationGateway, TalkConfig, TalkError};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            writeln!(io::stderr().lock(), "✗ {error}").ok();
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Cli) -> Result<(), TalkError> {
    let config = TalkConfig::load_without_cli()?;
    config.validate()?;
    init_tracing(&config.log_level);
    args.command.validate()?;

    let context = RepositoryContext::resolve(&args.global, &config, Path::new("."))?;
    let token = config.resolve_token()?;
    let gateway = OctocrabConversationGateway::new(
        &token,
        context.api_base().as_str(),
        config.request_timeout(),
    )?;

    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr();
    let mut prompter = LinePrompter::new(io::stdin().lock(), io::stderr());
    let mut command_io = CommandIo {
        out: &mut stdout,
        err: &mut stderr,
        prompter: &mut prompter,
        terminal: TerminalInfo::detect(),
    };

    tokio::select! {
        outcome = cli::dispatch(args.command, &context, &gateway, &mut command_io) => outcome,
        _ = tokio::signal::ctrl_c() => {
            tracing::debug!("interrupted");
            Err(TalkError::Cancelled)
        }
    }
}

/// Installs a stderr subscriber filtered by `RUST_LOG`, else `fallback`.
fn init_tracing(fallback: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
