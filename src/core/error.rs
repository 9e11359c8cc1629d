//! Error types shared by providers, the converter and the HTTP layer

use thiserror::Error;

/// Failure while obtaining rates from an upstream source.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Request error: {0}")]
    Request(#[source] reqwest::Error),
    #[error("Request to rates provider timed out")]
    Timeout,
    #[error("Unexpected status code {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Failed to decode rates response: {0}")]
    Decode(String),
    #[error("Invalid rate {rate} for currency: {code}")]
    InvalidRate { code: String, rate: String },
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout
        } else if err.is_decode() {
            ProviderError::Decode(err.to_string())
        } else {
            ProviderError::Request(err)
        }
    }
}

#[derive(Error, Debug)]
pub enum ConverterError {
    #[error("{0}")]
    Validation(String),
    #[error("currency: {code} not found in {table} rates")]
    NotFound { code: String, table: &'static str },
    #[error("error during fetching exchange rates: {0}")]
    Provider(#[from] ProviderError),
}

impl ConverterError {
    pub fn not_found(code: &str, table: &'static str) -> Self {
        ConverterError::NotFound {
            code: code.to_string(),
            table,
        }
    }
}

pub type Result<T, E = ConverterError> = std::result::Result<T, E>;
