//! Scratch Game CLI
//!
//! Plays one round from a config file and prints the result as JSON.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use scratch_game::{play, DeterministicRng, GameConfig, VERSION};

#[derive(Parser)]
#[command(name = "scratch-game", version, about = "Play one round of a matrix scratch card game")]
struct Cli {
    /// Path to the game configuration (JSON)
    #[arg(long, env = "SCRATCH_CONFIG")]
    config: PathBuf,

    /// Bet amount
    #[arg(long = "betting-amount")]
    betting_amount: u64,

    /// Seed for a reproducible play
    #[arg(long, conflicts_with = "seed_phrase")]
    seed: Option<u64>,

    /// Seed phrase for a reproducible play
    #[arg(long)]
    seed_phrase: Option<String>,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries only the result.
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    let cli = Cli::parse();
    debug!("Scratch Game v{}", VERSION);

    let config = GameConfig::load(&cli.config)
        .with_context(|| format!("invalid config or config not found: {}", cli.config.display()))?;

    let mut rng = match (cli.seed, cli.seed_phrase.as_deref()) {
        (Some(seed), _) => DeterministicRng::new(seed),
        (None, Some(phrase)) => DeterministicRng::from_phrase(phrase),
        (None, None) => {
            let (rng, seed) = DeterministicRng::from_entropy();
            info!(seed, "seeded from entropy");
            rng
        }
    };

    let result = play(&config, cli.betting_amount, &mut rng)?;
    println!("{}", result.to_json_pretty()?);

    Ok(())
}
