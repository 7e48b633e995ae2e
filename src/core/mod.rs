//! Core business logic abstractions

pub mod config;
pub mod currency;
pub mod error;
pub mod history;
pub mod log;
pub mod provider;
pub mod rates;

// Re-export main types for cleaner imports
pub use error::RateError;
pub use history::HistoryPoint;
pub use provider::{DailyRates, RateProvider};
pub use rates::RateTable;
