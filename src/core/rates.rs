//! Rate sources and the values that flow out of conversions

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::error::ProviderError;

/// Currency code to rate, every rate relative to USD.
pub type FiatRateTable = HashMap<String, Decimal>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CryptoCurrencyInfo {
    pub rate_to_usd: Decimal,
    pub decimal_places: u32,
}

pub type CryptoRateTable = HashMap<&'static str, CryptoCurrencyInfo>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertedRate {
    pub from: String,
    pub to: String,
    pub rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangedCryptoCurrency {
    pub from: String,
    pub to: String,
    pub amount: Decimal,
}

#[async_trait]
pub trait RatesProvider: Send + Sync {
    /// Fetches a fresh fiat rate table. Never served from a cache.
    async fn get_exchange_rates(&self) -> Result<FiatRateTable, ProviderError>;

    fn get_crypto_exchange_rates(&self) -> &CryptoRateTable;
}
