pub mod error;
pub mod handlers;
pub mod validation;

use axum::{Router, routing::get};
use std::{sync::Arc, time::Duration};
use tower_http::trace::TraceLayer;

use crate::converter::Converter;

#[derive(Clone)]
pub struct AppState {
    pub converter: Arc<dyn Converter>,
    /// Upper bound for a converter call; the call is dropped once it passes.
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(converter: Arc<dyn Converter>, request_timeout: Duration) -> Self {
        AppState {
            converter,
            request_timeout,
        }
    }
}

pub async fn healthz() -> &'static str {
    "ok"
}

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/rates", get(handlers::get_rates))
        .route("/exchange", get(handlers::exchange_crypto_currencies))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
