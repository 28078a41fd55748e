use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sleepr_api::config::AppConfig;
use sleepr_api::database::DatabaseManager;
use sleepr_api::middleware::RateLimiter;
use sleepr_api::{build_app, AppState};

#[derive(Parser)]
#[command(name = "sleepr-api")]
#[command(about = "Sleepr fantasy football API server")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve {
        #[arg(long, help = "Listen port, overrides PORT")]
        port: Option<u16>,
    },

    #[command(about = "Apply the bundled database schema and exit")]
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present so DATABASE_URL, JWT_SECRET etc. are picked up locally.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let mut config = AppConfig::from_env().context("failed to load configuration")?;

    match cli.command.unwrap_or(Commands::Serve { port: None }) {
        Commands::Migrate => migrate(&config).await,
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            serve(config).await
        }
    }
}

async fn migrate(config: &AppConfig) -> Result<()> {
    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to database")?;
    DatabaseManager::apply_schema(&pool).await.context("failed to apply schema")?;
    Ok(())
}

async fn serve(config: AppConfig) -> Result<()> {
    tracing::info!(environment = %config.environment, "Starting Sleepr API");

    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to database")?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    let window = std::time::Duration::from_secs(config.api.rate_limit_window_secs.max(1));

    let state = AppState::new(config, pool);
    tokio::spawn(prune_rate_limits(state.rate_limiter.clone(), window));

    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

/// Background job: forget clients that have gone quiet for a full window.
async fn prune_rate_limits(limiter: Arc<dyn RateLimiter>, window: std::time::Duration) {
    let mut interval = tokio::time::interval(window);
    loop {
        interval.tick().await;
        limiter.prune_idle().await;
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install Ctrl+C handler: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down...");
}
