pub mod api;
pub mod converter;
pub mod core;
pub mod providers;

use anyhow::{Context, Result, bail};
use axum::Router;
use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tracing::{debug, info};

use crate::api::{AppState, app_router};
use crate::converter::CurrencyConverter;
use crate::core::RatesProvider;
use crate::core::config::AppConfig;
use crate::providers::{FixedRatesProvider, OpenExchangeRatesProvider};

pub const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(10);

/// Which rates source backs the converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatesSource {
    OpenExchange,
    Fixed,
}

pub fn build_rates_provider(
    config: &AppConfig,
    source: RatesSource,
) -> Result<Arc<dyn RatesProvider>> {
    let provider: Arc<dyn RatesProvider> = match source {
        RatesSource::OpenExchange => {
            let app_id = config.app_id()?;
            let base_url = &config.providers.open_exchange.base_url;
            Arc::new(
                OpenExchangeRatesProvider::new(base_url, app_id)
                    .context("Failed to create rates provider")?,
            )
        }
        RatesSource::Fixed => Arc::new(FixedRatesProvider::default()),
    };
    info!(?source, "Rates provider initialized");
    Ok(provider)
}

pub fn build_app(config: &AppConfig, source: RatesSource) -> Result<Router> {
    let provider = build_rates_provider(config, source)?;
    let converter = Arc::new(CurrencyConverter::new(provider));
    info!("Currency converter initialized");

    Ok(app_router(AppState::new(
        converter,
        config.request_timeout(),
    )))
}

pub async fn run(config_path: Option<&str>, source: RatesSource) -> Result<()> {
    let config = AppConfig::load(config_path)?;
    debug!(
        port = ?config.server.port,
        base_url = %config.providers.open_exchange.base_url,
        "Loaded config"
    );
    info!("Application config loaded successfully");

    let router = build_app(&config, source)?;
    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Could not bind server to {addr}"))?;
    info!("Listening on {}", addr);

    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let server = axum::serve(listener, router).with_graceful_shutdown(async {
        stop_rx.await.ok();
    });
    let mut server = tokio::spawn(server.into_future());

    tokio::select! {
        joined = &mut server => {
            joined.context("Server task failed")??;
            bail!("Server stopped unexpectedly");
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received, shutting down application...");
        }
    }

    stop_tx.send(()).ok();
    match tokio::time::timeout(SHUTDOWN_TIMEOUT, server).await {
        Ok(joined) => joined.context("Server task failed")??,
        Err(_) => bail!(
            "Application forced to shutdown after {}s",
            SHUTDOWN_TIMEOUT.as_secs()
        ),
    }
    info!("Server is off");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.ok();
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Could not install SIGTERM handler");
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
}
