use anyhow::Result;
use tracing::info;

use e_helpdesk_api::{app, config, middleware, services};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = config::Config::load()?;

    middleware::logging::init_logging(&config.logging);
    middleware::init_metrics();

    info!("Starting E-Helpdesk API v{}", env!("CARGO_PKG_VERSION"));

    // The fleet and snapshot databases are external read-only systems
    // and may be unreachable at boot; connect lazily so the service can
    // come up and report degraded health instead of crash-looping.
    let databases = persistence::db::Databases {
        fleet: persistence::db::create_pool_lazy(&config.databases.fleet.to_pool_config())?,
        helpdesk: persistence::db::create_pool(&config.databases.helpdesk.to_pool_config()).await?,
        snapshot: persistence::db::create_pool_lazy(&config.databases.snapshot.to_pool_config())?,
    };

    let storage = services::storage::build_storage(&config.storage)?;

    let addr = config.socket_addr();
    let app = app::create_app(config, databases, storage);

    info!("Server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
