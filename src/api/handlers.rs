use axum::{
    Json,
    extract::{FromRequestParts, Query, State},
    http::request::Parts,
};
use tracing::debug;

use super::AppState;
use super::error::{ApiError, ApiResult};
use super::validation::{normalize_currencies, parse_amount};
use crate::core::error::Result as ConverterResult;
use crate::core::{ConvertedRate, ExchangedCryptoCurrency};

/// Query string pairs in request order. A repeated key resolves to its first value.
#[derive(Debug, Default)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn first(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First value of `key`, treating a blank value as missing.
    pub fn required(&self, key: &str) -> Option<&str> {
        self.first(key).filter(|v| !v.trim().is_empty())
    }
}

impl<S> FromRequestParts<S> for QueryParams
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?;
        Ok(QueryParams(pairs))
    }
}

async fn within_deadline<T>(
    state: &AppState,
    call: impl Future<Output = ConverterResult<T>>,
) -> ApiResult<T> {
    match tokio::time::timeout(state.request_timeout, call).await {
        Ok(result) => Ok(result?),
        Err(_) => Err(ApiError::Timeout(state.request_timeout)),
    }
}

pub async fn get_rates(
    State(state): State<AppState>,
    query: QueryParams,
) -> ApiResult<Json<Vec<ConvertedRate>>> {
    let param = query.required("currencies").ok_or_else(|| {
        ApiError::BadRequest(r#"url parameter "currencies" not provided"#.to_string())
    })?;

    let currencies = normalize_currencies(param)?;
    let rates = within_deadline(&state, state.converter.get_currencies_rates(&currencies)).await?;
    Ok(Json(rates))
}

pub async fn exchange_crypto_currencies(
    State(state): State<AppState>,
    query: QueryParams,
) -> ApiResult<Json<ExchangedCryptoCurrency>> {
    let (from, to, amount) = match (
        query.required("from"),
        query.required("to"),
        query.required("amount"),
    ) {
        (Some(from), Some(to), Some(amount)) => (from, to, amount),
        (from, to, amount) => {
            return Err(ApiError::BadRequest(format!(
                "missing one of parameters: from, to or amount. parameters: from: {}, to: {}, amount: {}",
                from.unwrap_or_default(),
                to.unwrap_or_default(),
                amount.unwrap_or_default()
            )));
        }
    };

    let amount = parse_amount(amount)?;
    let from = from.trim().to_uppercase();
    let to = to.trim().to_uppercase();
    debug!(%from, %to, %amount, "Exchanging crypto currencies");

    let exchanged = within_deadline(
        &state,
        state.converter.convert_crypto_currencies(&from, &to, amount),
    )
    .await?;
    Ok(Json(exchanged))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn params_of(uri: &str) -> ApiResult<QueryParams> {
        let (mut parts, _) = Request::builder().uri(uri).body(()).unwrap().into_parts();
        QueryParams::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_repeated_key_takes_first_value() {
        let params = params_of("/rates?currencies=USD,GBP&currencies=EUR").await.unwrap();
        assert_eq!(params.first("currencies"), Some("USD,GBP"));
    }

    #[tokio::test]
    async fn test_blank_value_is_missing() {
        let params = params_of("/exchange?from=&from=WBTC&to=%20&amount=1").await.unwrap();
        assert_eq!(params.first("from"), Some(""));
        assert_eq!(params.required("from"), None);
        assert_eq!(params.required("to"), None);
        assert_eq!(params.required("amount"), Some("1"));
        assert_eq!(params.required("missing"), None);
    }

    #[tokio::test]
    async fn test_no_query_string() {
        let params = params_of("/rates").await.unwrap();
        assert_eq!(params.first("currencies"), None);
    }
}
