use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::time::Duration;
use thiserror::Error;
use tracing::error;

use crate::core::ConverterError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Converter(#[from] ConverterError),
    #[error("{0}")]
    BadRequest(String),
    #[error("Request did not complete within {}s", .0.as_secs_f64())]
    Timeout(Duration),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Converter(ConverterError::Provider(e)) => {
                error!(error = %e, "Rates provider failed")
            }
            _ => error!(error = %self, "Request rejected"),
        }
        // Every failure is a 400 with an empty body
        (StatusCode::BAD_REQUEST, Json(json!({}))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
