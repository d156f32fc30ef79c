use clap::Parser;
use std::io::IsTerminal;
use tracing::debug;
use repo_search::{
    cli::{self, Cli, Command},
    config::Config,
    http::build_client,
    search::Searcher,
    utils::init_logger,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger();

    let opts = Cli::parse();

    // Load configuration
    let config = Config::from_env()?;
    debug!(host = %config.search.host, "Configuration loaded");

    let client = build_client(&config.http)?;
    let searcher = Searcher::from_config(client, &config.search);

    let stdout = std::io::stdout();
    let tty = stdout.is_terminal();
    let mut out = stdout.lock();

    match opts.command {
        Command::Repos(args) => cli::run_repos(&args, &searcher, &mut out, tty).await,
    }
}
