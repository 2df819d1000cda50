mod config;
mod error;
mod history;
mod http;
mod jokes;
mod stats;

use anyhow::Result;
use clap::Parser;
use config::Config;
use history::{FetchOutcome, FetchStats};
use jokes::JokesClient;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Parser)]
#[command(
    name = "jokebox",
    about = "Fetch jokes from the Official Joke API — one at a time, by the batch, or by kind"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Fetch and print one joke
    Tell {
        /// Joke kind (programming, general, knock-knock, ...)
        #[arg(short, long)]
        kind: Option<String>,

        /// Fetch a specific joke by id instead of a random one
        #[arg(long, conflicts_with_all = ["kind", "any"])]
        id: Option<i64>,

        /// Pull from the full pool instead of the configured kind
        #[arg(long)]
        any: bool,

        /// Path to config file
        #[arg(short, long, default_value = "config.toml")]
        config: PathBuf,
    },

    /// Fetch a batch of jokes and summarize it
    Batch {
        /// Joke kind (programming, general, knock-knock, ...)
        #[arg(short, long)]
        kind: Option<String>,

        /// How many jokes to print
        #[arg(short = 'n', long)]
        count: Option<usize>,

        /// Path to config file
        #[arg(short, long, default_value = "config.toml")]
        config: PathBuf,
    },

    /// List joke kinds the API serves
    Kinds {
        /// Path to config file
        #[arg(short, long, default_value = "config.toml")]
        config: PathBuf,
    },

    /// Show per-kind fetch success rates from local history
    Stats {
        /// Path to config file
        #[arg(short, long, default_value = "config.toml")]
        config: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jokebox=info".parse().unwrap()),
        )
        .init();

    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Tell {
            kind,
            id,
            any,
            config,
        } => tell(&config, kind, id, any).await,
        Command::Batch {
            kind,
            count,
            config,
        } => batch(&config, kind, count).await,
        Command::Kinds { config } => kinds(&config).await,
        Command::Stats { config } => show_stats(&config),
    }
}

fn load_config(path: &Path) -> Result<Config> {
    let config = Config::load_or_default(path)?;
    config.validate()?;
    Ok(config)
}

async fn tell(config_path: &Path, kind: Option<String>, id: Option<i64>, any: bool) -> Result<()> {
    let config = load_config(config_path)?;
    let client = JokesClient::from_config(&config)?;

    // Id and any-kind fetches are not tied to a kind, so they stay out of
    // the per-kind history.
    if let Some(id) = id {
        println!("{}", client.by_id(id).await?);
        return Ok(());
    }
    if any {
        println!("{}", client.random().await?);
        return Ok(());
    }

    let kind = kind.unwrap_or_else(|| config.fetch.default_kind.clone());
    let result = client.random_of(&kind).await;
    record_outcome(&config, &kind, result.is_ok());

    let joke = result?;
    println!("{joke}");
    Ok(())
}

async fn batch(config_path: &Path, kind: Option<String>, count: Option<usize>) -> Result<()> {
    let config = load_config(config_path)?;
    let client = JokesClient::from_config(&config)?;
    let kind = kind.unwrap_or_else(|| config.fetch.default_kind.clone());
    let count = count.unwrap_or(config.fetch.batch_size);

    let result = client.batch_of(&kind, count).await;
    record_outcome(&config, &kind, result.is_ok());

    let jokes = result?;
    for joke in &jokes {
        println!("{joke}\n");
    }
    println!("{}", stats::summarize(&jokes)?);
    Ok(())
}

async fn kinds(config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    let client = JokesClient::from_config(&config)?;

    for kind in client.kinds().await? {
        println!("{kind}");
    }
    Ok(())
}

fn show_stats(config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    let stats = FetchStats::load_or_default(&config.history.dir);

    if stats.total_attempts == 0 {
        println!("No fetch history yet");
        return Ok(());
    }

    for kind in stats.known_kinds() {
        let (_, attempts) = stats.per_kind[kind];
        match stats.success_rate(kind) {
            Some(rate) => println!("{kind}: {:.0}% of {attempts} fetches", rate * 100.0),
            None => println!("{kind}: n/a"),
        }
    }
    println!("total: {} fetches", stats.total_attempts);
    Ok(())
}

/// Best-effort history write; a failed save is logged, never fatal.
fn record_outcome(config: &Config, kind: &str, success: bool) {
    if !config.history.enabled {
        return;
    }
    let outcome = if success {
        FetchOutcome::Success
    } else {
        FetchOutcome::Failure
    };

    let mut stats = FetchStats::load_or_default(&config.history.dir);
    stats.record(kind, outcome);
    if let Err(e) = stats.save(&config.history.dir) {
        warn!(error = %e, dir = %config.history.dir.display(), "failed to save fetch history");
    }
}
