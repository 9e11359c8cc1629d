use rust_decimal::Decimal;
use std::collections::HashSet;
use std::str::FromStr;

use crate::core::error::{ConverterError, Result};

/// Splits a comma separated list into distinct uppercase codes, first
/// occurrence order kept. At least two distinct codes are required.
pub fn normalize_currencies(raw: &str) -> Result<Vec<String>> {
    let mut seen = HashSet::new();
    let currencies: Vec<String> = raw
        .split(',')
        .map(|c| c.trim().to_uppercase())
        .filter(|c| !c.is_empty())
        .filter(|c| seen.insert(c.clone()))
        .collect();

    if currencies.len() < 2 {
        return Err(ConverterError::Validation(format!(
            "not enough currencies to exchange provided, currencies: {raw}"
        )));
    }
    Ok(currencies)
}

pub fn parse_amount(raw: &str) -> Result<Decimal> {
    let raw = raw.trim();
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| {
            ConverterError::Validation(format!(
                "could not parse parameter amount to decimal. amount: {raw}"
            ))
        })
}
