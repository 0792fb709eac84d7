//! Seedling CLI entry point.
//!
//! Binary name: `seedling`
//!
//! Parses CLI arguments, sets up tracing, initializes the database and seed
//! service, then dispatches to the command handler.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let directives = seedling_observe::tracing_setup::verbosity_directives(cli.verbose, cli.quiet);
    if let Err(e) = seedling_observe::tracing_setup::init_tracing(directives, cli.otel) {
        eprintln!("Warning: failed to initialize tracing: {e}");
    }

    let result = run(cli).await;
    seedling_observe::tracing_setup::shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        // Commands that don't need app state
        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            generate(shell, &mut cmd, "seedling", &mut std::io::stdout());
        }
        Commands::Demo => cli::demo::run(cli.json)?,

        Commands::Apply {
            file,
            strict,
            dry_run,
        } => {
            let state = load_state(strict.then_some(true)).await?;
            cli::apply::apply_seed(&state, &file, dry_run, cli.json).await?;
        }
        Commands::Show => cli::inspect::show(&load_state(None).await?, cli.json).await?,
        Commands::Get { category, id } => {
            let state = load_state(None).await?;
            cli::inspect::get(&state, category, &id, cli.json).await?;
        }
        Commands::Check => cli::inspect::check(&load_state(None).await?, cli.json).await?,
        Commands::History => cli::inspect::history(&load_state(None).await?, cli.json).await?,
    }

    Ok(())
}

async fn load_state(strict_override: Option<bool>) -> anyhow::Result<AppState> {
    let state = AppState::init(strict_override).await?;
    tracing::debug!(config = ?state.config, "configuration loaded");
    Ok(state)
}
