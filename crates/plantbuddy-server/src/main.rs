use anyhow::Result;
use clap::Parser;
use infrastructure::{AppConfig, Database};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use plantbuddy_server::{api, setup_app_state};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding default.toml and <RUN_MODE>.toml
    #[arg(long, default_value = "config")]
    config_dir: String,

    /// API Port, overrides the configured one
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,plantbuddy_server=debug,infrastructure=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenv::dotenv().ok();
    let args = Args::parse();
    info!("🌱 PlantBuddy Server Starting...");

    // 1. Load configuration
    let mut config = AppConfig::load(&args.config_dir)?;
    if let Some(port) = args.port {
        config.port = port;
    }

    // 2. Open the store (creates tables and sensor catalog)
    info!("Opening database at {}...", config.database.url);
    let database = Database::connect(&config.database).await?;
    info!("✅ Database ready");

    // 3. Start API Server
    let app = api::create_router(setup_app_state(database.clone()));
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("🚀 API Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    database.close().await;
    info!("Shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
    }
}
