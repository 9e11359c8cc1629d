//! Cross-rate derivation between fiat currencies and crypto exchange via a USD bridge.

use async_trait::async_trait;
use rust_decimal::prelude::Signed;
use rust_decimal::{Decimal, RoundingStrategy};
use std::sync::Arc;
use tracing::debug;

use crate::core::error::{ConverterError, ProviderError, Result};
use crate::core::{ConvertedRate, ExchangedCryptoCurrency, FiatRateTable, RatesProvider};

/// Fractional digits kept by every division.
pub const DIVISION_PRECISION: u32 = 16;

#[async_trait]
pub trait Converter: Send + Sync {
    /// Rates for every ordered pair of `currencies`. Expects deduplicated
    /// uppercase codes; a single code yields no pairs.
    async fn get_currencies_rates(&self, currencies: &[String]) -> Result<Vec<ConvertedRate>>;

    async fn convert_crypto_currencies(
        &self,
        from: &str,
        to: &str,
        amount: Decimal,
    ) -> Result<ExchangedCryptoCurrency>;
}

pub struct CurrencyConverter {
    rates_provider: Arc<dyn RatesProvider>,
}

impl CurrencyConverter {
    pub fn new(rates_provider: Arc<dyn RatesProvider>) -> Self {
        CurrencyConverter { rates_provider }
    }
}

/// Divides and rounds half away from zero to `DIVISION_PRECISION` digits,
/// deciding midpoints against the exact quotient.
fn div_precise(dividend: Decimal, divisor: Decimal) -> Option<Decimal> {
    let quotient = dividend.checked_div(divisor)?;
    let truncated = quotient.round_dp_with_strategy(DIVISION_PRECISION, RoundingStrategy::ToZero);
    let half_step = Decimal::new(5, DIVISION_PRECISION + 1);

    // checked_div rounds to 28 significant digits, which can land exactly on a midpoint
    if (quotient - truncated).abs() == half_step {
        let midpoint = truncated + half_step * quotient.signum();
        if let Some(product) = midpoint.checked_mul(divisor) {
            if product.abs() > dividend.abs() {
                return Some(truncated);
            }
        }
    }

    Some(quotient.round_dp_with_strategy(DIVISION_PRECISION, RoundingStrategy::MidpointAwayFromZero))
}

fn validate_currencies(currencies: &[String], rates: &FiatRateTable) -> Result<()> {
    match currencies.iter().find(|c| !rates.contains_key(c.as_str())) {
        Some(missing) => Err(ConverterError::not_found(missing, "openexchangerates.org")),
        None => Ok(()),
    }
}

/// Both directions of every unordered pair, rates left at zero.
fn currency_pairs_to_exchange(currencies: &[String]) -> Vec<ConvertedRate> {
    let n = currencies.len();
    let mut pairs = Vec::with_capacity(n * n.saturating_sub(1));

    for (i, a) in currencies.iter().enumerate() {
        for b in &currencies[i + 1..] {
            pairs.push(ConvertedRate {
                from: a.clone(),
                to: b.clone(),
                rate: Decimal::ZERO,
            });
            pairs.push(ConvertedRate {
                from: b.clone(),
                to: a.clone(),
                rate: Decimal::ZERO,
            });
        }
    }

    pairs
}

#[async_trait]
impl Converter for CurrencyConverter {
    async fn get_currencies_rates(&self, currencies: &[String]) -> Result<Vec<ConvertedRate>> {
        let rates = self.rates_provider.get_exchange_rates().await?;
        validate_currencies(currencies, &rates)?;

        let mut pairs = currency_pairs_to_exchange(currencies);
        for pair in &mut pairs {
            let from_rate = rates[&pair.from];
            pair.rate = div_precise(rates[&pair.to], from_rate).ok_or_else(|| {
                ProviderError::InvalidRate {
                    code: pair.from.clone(),
                    rate: from_rate.to_string(),
                }
            })?;
        }

        debug!(currencies = ?currencies, pairs = pairs.len(), "Derived cross rates");
        Ok(pairs)
    }

    async fn convert_crypto_currencies(
        &self,
        from: &str,
        to: &str,
        amount: Decimal,
    ) -> Result<ExchangedCryptoCurrency> {
        let rates = self.rates_provider.get_crypto_exchange_rates();

        let currency_from = rates
            .get(from)
            .ok_or_else(|| ConverterError::not_found(from, "crypto currency"))?;
        let currency_to = rates
            .get(to)
            .ok_or_else(|| ConverterError::not_found(to, "crypto currency"))?;

        let usd = amount
            .checked_mul(currency_from.rate_to_usd)
            .ok_or_else(|| ConverterError::Validation(format!("amount {amount} is out of range")))?;
        let result = div_precise(usd, currency_to.rate_to_usd)
            .ok_or_else(|| ProviderError::InvalidRate {
                code: to.to_string(),
                rate: currency_to.rate_to_usd.to_string(),
            })?
            .round_dp_with_strategy(
                currency_to.decimal_places,
                RoundingStrategy::MidpointAwayFromZero,
            );

        Ok(ExchangedCryptoCurrency {
            from: from.to_string(),
            to: to.to_string(),
            amount: result,
        })
    }
}
