//! Core business logic abstractions

pub mod config;
pub mod error;
pub mod log;
pub mod rates;

// Re-export main types for cleaner imports
pub use error::{ConverterError, ProviderError};
pub use rates::{
    ConvertedRate, CryptoCurrencyInfo, CryptoRateTable, ExchangedCryptoCurrency, FiatRateTable,
    RatesProvider,
};
