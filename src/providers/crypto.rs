use rust_decimal_macros::dec;
use std::sync::LazyLock;

use crate::core::{CryptoCurrencyInfo, CryptoRateTable};

static CRYPTO_RATES: LazyLock<CryptoRateTable> = LazyLock::new(|| {
    CryptoRateTable::from([
        (
            "BEER",
            CryptoCurrencyInfo {
                rate_to_usd: dec!(0.00002461),
                decimal_places: 18,
            },
        ),
        (
            "FLOKI",
            CryptoCurrencyInfo {
                rate_to_usd: dec!(0.0001428),
                decimal_places: 18,
            },
        ),
        (
            "GATE",
            CryptoCurrencyInfo {
                rate_to_usd: dec!(6.87),
                decimal_places: 18,
            },
        ),
        (
            "USDT",
            CryptoCurrencyInfo {
                rate_to_usd: dec!(0.999),
                decimal_places: 6,
            },
        ),
        (
            "WBTC",
            CryptoCurrencyInfo {
                rate_to_usd: dec!(57037.22),
                decimal_places: 8,
            },
        ),
    ])
});

/// The process-wide crypto rate table, keyed by uppercase symbol.
pub fn crypto_rates() -> &'static CryptoRateTable {
    &CRYPTO_RATES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_keyed_by_uppercase_symbols() {
        let rates = crypto_rates();
        assert_eq!(rates.len(), 5);
        assert!(rates.keys().all(|k| k.chars().all(|c| c.is_ascii_uppercase())));
        assert_eq!(rates["USDT"].decimal_places, 6);
        assert_eq!(rates["WBTC"].rate_to_usd, dec!(57037.22));
    }

    #[test]
    fn test_table_is_shared() {
        assert!(std::ptr::eq(crypto_rates(), crypto_rates()));
    }
}
