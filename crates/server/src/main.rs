use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use deskproxy_core::{
    load_config, validate_config, AggregatorSettings, FreshdeskClient, StatusTable,
    TicketAggregator,
};
use deskproxy_server::api::create_router;
use deskproxy_server::state::AppState;

/// Config file picked up from the working directory when present.
const DEFAULT_CONFIG_FILE: &str = "config.toml";

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // An explicit path must exist; the default one is optional.
    let config_path = match std::env::var("DESKPROXY_CONFIG") {
        Ok(path) => Some(PathBuf::from(path)),
        Err(_) => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            default.exists().then_some(default)
        }
    };

    match &config_path {
        Some(path) => info!("Loading configuration from {:?}", path),
        None => info!("No config file, using defaults and environment"),
    }
    let config = load_config(config_path.as_deref()).context("Failed to load configuration")?;

    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!("Freshdesk domain: {}", config.freshdesk.domain);
    if config.freshdesk.api_key.is_empty() {
        warn!("FRESHDESK_API_KEY is not set, upstream requests will be rejected");
    }

    let client = FreshdeskClient::new(&config.freshdesk)
        .context("Failed to create Freshdesk client")?;
    info!("Freshdesk client targeting {}", client.base_url());

    let aggregator = TicketAggregator::new(
        Arc::new(client),
        StatusTable::freshdesk(),
        AggregatorSettings::from(&config.freshdesk),
    );
    info!(
        "Ticket aggregator ready (source: {}, {} statuses, {} per page, max {} pages)",
        aggregator.source_name(),
        aggregator.statuses().len(),
        aggregator.settings().per_page,
        aggregator.settings().max_pages
    );

    // Create app state
    let state = Arc::new(AppState::new(config.clone(), Arc::new(aggregator)));

    // Create router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
