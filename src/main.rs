//! PF-WENSLO-ARLON HTTP server.

use tracing::info;
use tracing_subscriber::EnvFilter;

use pf_wenslo_arlon::adapters::{app_router, AnalysisHandlers};
use pf_wenslo_arlon::config::{AppConfig, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config.server);

    let addr = config.server.bind_addr()?;
    let handlers = AnalysisHandlers::from_config(&config.analysis);
    let app = app_router(handlers, &config.server);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        %addr,
        environment = ?config.server.environment,
        decision_sheet = %config.analysis.decision_sheet,
        "Listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Installs the global subscriber. `RUST_LOG` overrides `server.log_level`.
fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    if server.is_production() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .pretty()
            .init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
