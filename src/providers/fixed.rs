//! A rates provider serving fixed data, for tests and offline runs.

use async_trait::async_trait;
use rust_decimal_macros::dec;

use super::crypto::crypto_rates;
use crate::core::{CryptoRateTable, FiatRateTable, ProviderError, RatesProvider};

#[derive(Debug, Clone)]
pub struct FixedRatesProvider {
    fiat: FiatRateTable,
}

impl FixedRatesProvider {
    pub fn new(fiat: FiatRateTable) -> Self {
        FixedRatesProvider { fiat }
    }
}

impl Default for FixedRatesProvider {
    fn default() -> Self {
        FixedRatesProvider::new(FiatRateTable::from([
            ("EUR".to_string(), dec!(0.861355)),
            ("GBP".to_string(), dec!(0.743283)),
            ("USD".to_string(), dec!(1)),
        ]))
    }
}

#[async_trait]
impl RatesProvider for FixedRatesProvider {
    async fn get_exchange_rates(&self) -> Result<FiatRateTable, ProviderError> {
        Ok(self.fiat.clone())
    }

    fn get_crypto_exchange_rates(&self) -> &CryptoRateTable {
        crypto_rates()
    }
}
