use anyhow::{Context, Result};
use app::config::{Cli, Command, normalize_sqlite_url, prepare_sqlite_file};
use app::{AppState, server};
use clap::Parser;
use services::AppServices;
use storage::repository::Storage;
use storage::sqlite::SqliteRepository;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

async fn run(cli: Cli) -> Result<()> {
    let db_url = normalize_sqlite_url(&cli.db)?;

    // Open + migrate SQLite at startup. Keep this in the binary glue so core/services stay pure.
    prepare_sqlite_file(&db_url)?;
    let repo = SqliteRepository::connect(&db_url)
        .await
        .with_context(|| format!("opening {db_url}"))?;
    repo.migrate().await.context("migrating database")?;
    let storage = Storage::from_sqlite(repo.clone());
    let services = AppServices::from_storage(&storage);
    let progress = services.progress();

    let outcome = match cli.command() {
        Command::Serve => {
            let listener = TcpListener::bind(cli.addr)
                .await
                .with_context(|| format!("binding {}", cli.addr))?;
            server::serve(listener, AppState::new(progress), server::shutdown_signal())
                .await
                .context("serving HTTP")
        }
        Command::Status => {
            let overview = progress.module_overview().await?;
            for entry in &overview {
                let mark = if entry.completed { "x" } else { " " };
                println!("[{mark}] {:<12} {}", entry.module.id, entry.module.tagline);
            }
            println!("Progress: {}", progress.summary().await?);
            Ok(())
        }
        Command::Complete { module } => {
            progress.mark_module_complete(&module).await?;
            println!("{} marked complete", module.trim());
            Ok(())
        }
        Command::Reset { module } => {
            progress.reset_module(&module).await?;
            println!("{} reset", module.trim());
            Ok(())
        }
    };

    repo.close().await;
    info!("database closed");
    outcome
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    info!("academy v{} starting", env!("CARGO_PKG_VERSION"));

    if let Err(err) = run(cli).await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err:#}");
        std::process::exit(2);
    }
}
