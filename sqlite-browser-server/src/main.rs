use anyhow::Context;
use clap::Parser;
use config::Environment;
use sqlite_browser::SqliteBrowserLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

mod logging;
mod settings;

use settings::{Cli, ENVIRONMENT_PREFIX};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = settings::load(&cli, Environment::with_prefix(ENVIRONMENT_PREFIX))
        .context("Failed to load configuration")?;

    logging::init_logging(&config.log_level)?;

    let app = SqliteBrowserLayer::from_config(&config)
        .into_router()
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        );

    let address = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind to {}", address))?;

    tracing::info!("SQLite browser running at http://{}", listener.local_addr()?);
    tracing::info!("{} known database(s) configured", config.databases.len());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(error) => {
            // Without a signal handler the server runs until killed
            tracing::error!("Failed to listen for shutdown signal: {}", error);
            std::future::pending::<()>().await;
        }
    }
}
