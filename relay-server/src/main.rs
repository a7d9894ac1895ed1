//! Social Relay web server.
//!
//! Serves the liveness, feed, relay and webhook routes until SIGINT/SIGTERM.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::{net::TcpListener, signal};
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use social_relay::{router, AppState, Config, TelegramClient, TracingSink};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = Config::from_env();
    info!(
        port = config.port,
        telegram_token_configured = config.telegram_bot_token.is_some(),
        api_secret_configured = config.api_secret.is_some(),
        telegram_api_base = %config.telegram_api_base,
        request_timeout_ms = config.request_timeout_ms,
        "relay_config_loaded"
    );

    let relay = TelegramClient::new(&config).context("Failed to create Telegram client")?;
    let addr = config.listen_addr();
    let app = router(AppState::new(config, Arc::new(relay), Arc::new(TracingSink)));

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(address = %addr, "relay_listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Relay server error")?;

    info!("relay_stopped");
    Ok(())
}

/// JSON logs, filtered by `RUST_LOG` (default `info`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().flatten_event(true))
        .init();
}

/// Resolves on SIGINT or SIGTERM. A signal handler that cannot be
/// installed is logged and never fires.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "relay_sigint_handler_failed");
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
                error!(error = %e, "relay_sigterm_handler_failed");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let signal_name = tokio::select! {
        _ = ctrl_c => "SIGINT",
        _ = terminate => "SIGTERM",
    };

    info!(signal = signal_name, "relay_shutting_down");
}
