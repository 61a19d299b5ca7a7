use clap::{Parser, Subcommand};
use std::sync::Arc;
use tk_core::storage::{Storage, SupabaseStorage};
use tk_sync::apis::{EventSource, TammKreizApi};
use tk_sync::config::{CategoryMode, SyncConfig};
use tk_sync::observability::logging::init_logging;
use tk_sync::pipeline::SyncRunner;
use tk_sync::server;
use tracing::info;

#[derive(Parser)]
#[command(name = "tk-sync")]
#[command(about = "Syncs Tamm Kreiz event listings into the app backend")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Maximum events refreshed per run
    #[arg(long, default_value_t = 100)]
    max_events: usize,

    /// Detail fetches issued concurrently per chunk
    #[arg(long, default_value_t = 20)]
    chunk_size: usize,

    /// Skip events older than this many days; 0 disables the filter
    #[arg(long, default_value_t = 30)]
    recency_days: i64,

    /// How the event category column is filled
    #[arg(long, value_enum, default_value = "sub-category-code")]
    category_mode: CategoryMode,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one sync pass and exit
    Sync,
    /// Serve the HTTP trigger endpoint
    Serve {
        #[arg(long, default_value_t = 8000)]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_logging();

    let cli = Cli::parse();

    let config = SyncConfig {
        max_events_per_run: cli.max_events,
        fetch_chunk_size: cli.chunk_size,
        recency_window_days: (cli.recency_days > 0).then_some(cli.recency_days),
        category_mode: cli.category_mode,
    };

    let source: Arc<dyn EventSource> = Arc::new(TammKreizApi::from_env());
    let storage: Arc<dyn Storage> = Arc::new(SupabaseStorage::from_env()?);
    let runner = SyncRunner::new(source, storage, config);

    match cli.command {
        Commands::Sync => {
            let report = runner.run().await?;
            info!(
                "sync complete: {} of {} remote events refreshed",
                report.updated, report.scanned
            );
            println!("{}", report.message());
        }
        Commands::Serve { port } => {
            server::serve(Arc::new(runner), port).await?;
        }
    }

    Ok(())
}
