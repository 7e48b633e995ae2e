//! Rate provider abstraction.

use crate::core::rates::RateTable;
use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};

/// Per-symbol rate snapshots keyed by calendar date, ascending.
pub type DailyRates = BTreeMap<NaiveDate, HashMap<String, f64>>;

#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Fetches the latest anchor-based rate table. The anchor code is
    /// always present in the result, defaulted to 1.0 when the provider
    /// omits it.
    async fn latest_rates(&self) -> Result<RateTable>;

    /// Fetches `days` consecutive calendar days of two-symbol snapshots,
    /// today going backward inclusive. One request per day, sequential;
    /// any single day's failure aborts the whole fetch.
    async fn historical_rates(&self, base: &str, quote: &str, days: u32) -> Result<DailyRates>;
}
