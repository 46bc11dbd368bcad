//! Postboard API server.

use anyhow::Context;
use postboard_api_rest::{create_app, AppState};
use postboard_common::{config::AppConfig, telemetry::init_tracing};
use tokio::{net::TcpListener, signal};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = AppConfig::load().context("Failed to load configuration")?;
    init_tracing(&settings.telemetry)?;

    let state = AppState::from_settings(&settings).await?;
    let app = create_app(state.clone());

    let address = settings.server_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    info!(
        address = %address,
        storage = ?settings.storage.provider,
        max_file_size = settings.storage.max_file_size,
        "Postboard API listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    state.close().await;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
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

    info!("Received shutdown signal");
}
