mod interactive;
mod pick;
mod render;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use whatlunch_core::{Genre, SearchStrategy};

#[derive(Debug, Parser)]
#[command(name = "whatlunch")]
#[command(about = "Pick a random restaurant near you for lunch")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Pick one restaurant and exit
    Pick {
        /// Place name or address to search around (e.g. "서울시청")
        #[arg(long)]
        location: String,
        /// Food genre: korean, japanese, chinese, western, other or random
        #[arg(long)]
        genre: Genre,
        #[command(flatten)]
        search: SearchArgs,
    },
    /// Step through location, genre and re-rolls at a prompt (the default)
    Interactive {
        #[command(flatten)]
        search: SearchArgs,
    },
    /// List the supported genres
    Genres,
}

/// Overrides for the configured search defaults.
#[derive(Debug, Clone, Copy, Default, clap::Args)]
struct SearchArgs {
    /// Search radius in meters (1-20000)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=20_000))]
    radius: Option<u32>,
    /// How to query the places index: keyword or category
    #[arg(long)]
    strategy: Option<SearchStrategy>,
    /// Seed the random picks for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Interactive {
        search: SearchArgs::default(),
    });

    if matches!(command, Commands::Genres) {
        print!("{}", render::genres());
        return Ok(());
    }

    let config = whatlunch_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match command {
        Commands::Pick {
            location,
            genre,
            search,
        } => pick::run_pick(&config, &location, genre, search).await,
        Commands::Interactive { search } => interactive::run_interactive(&config, search).await,
        Commands::Genres => Ok(()),
    }
}

#[cfg(test)]
mod tests;
