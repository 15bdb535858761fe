//! home-cache - inspect and maintain a file-backed home cache
//!
//! Operates on the JSON store file the cache persists to, with the
//! foreground gate held open.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use home_cache::{spawn_sweep_task, AlwaysForeground, Config, FileStore, HomeCache};

#[derive(Debug, Parser)]
#[command(name = "home-cache", version, about = "Inspect and maintain the home screen cache")]
struct Cli {
    /// Path to the store file (overrides HOME_CACHE_PATH)
    #[arg(long, short)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the fresh cached payloads as JSON
    Show,
    /// Remove both cached entries
    Clear,
    /// Evict stale entries
    Sweep,
    /// Keep sweeping stale entries every HOME_CACHE_SWEEP_INTERVAL seconds until interrupted
    Watch,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "home_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(path) = cli.store {
        config.store_path = path;
    }
    info!(
        "Configuration loaded: store={}, ttl={}ms",
        config.store_path.display(),
        config.ttl_ms
    );

    let store = Arc::new(FileStore::new(&config.store_path));
    let cache: HomeCache = HomeCache::from_config(&config, store, Arc::new(AlwaysForeground));

    match cli.command {
        Command::Show => {
            let output = json!({
                "transactions": cache.load_transactions().await,
                "stats": cache.load_stats().await,
            });
            let rendered =
                serde_json::to_string_pretty(&output).context("Failed to render cache contents")?;
            println!("{rendered}");
        }
        Command::Clear => {
            cache
                .try_clear_all()
                .await
                .context("Failed to clear the home cache")?;
            info!("Home cache cleared");
        }
        Command::Sweep => {
            let evicted = cache
                .try_purge_stale()
                .await
                .context("Failed to sweep the home cache")?;
            info!("Sweep complete: {} stale entries evicted", evicted);
        }
        Command::Watch => {
            let period = config.sweep_period();
            let sweep_handle = spawn_sweep_task(Arc::new(cache), period);
            info!("Watching home cache, sweeping every {:?}", period);

            tokio::signal::ctrl_c()
                .await
                .context("Failed to install Ctrl+C handler")?;
            sweep_handle.abort();
            info!("Received Ctrl+C, sweep task stopped");
        }
    }

    Ok(())
}
