pub mod crypto;
pub mod fixed;
pub mod open_exchange;

pub use fixed::FixedRatesProvider;
pub use open_exchange::OpenExchangeRatesProvider;
