use std::time::Duration;

use clap::{Parser, Subcommand};

use huni_engine::{EmptyPoiStore, EngineConfig, LivabilityEngine, MemoryCache};

#[derive(Debug, Parser)]
#[command(name = "huni")]
#[command(about = "Urban livability scoring from public map data")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Score a coordinate and print the result as JSON.
    Score {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
        /// Display address for the report; defaults to the coordinate.
        #[arg(long)]
        address: Option<String>,
        /// Also print a one-paragraph narrative summary.
        #[arg(long)]
        summary: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Score {
            lat,
            lng,
            address,
            summary,
        } => {
            let config = EngineConfig::load_from_env()?;
            let cache = MemoryCache::new(
                config.cache_capacity,
                Duration::from_secs(config.cache_ttl_secs),
            );
            let engine = LivabilityEngine::new(config, cache, EmptyPoiStore)?;

            let address = address.unwrap_or_else(|| format!("{lat}, {lng}"));
            let outcome = engine.score(lat, lng, &address).await?;

            println!("{}", serde_json::to_string_pretty(&outcome.result)?);
            if summary {
                println!();
                println!("{}", huni_engine::render_summary(&outcome.result));
            }
        }
    }

    Ok(())
}
