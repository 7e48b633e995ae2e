//! The single source of truth for "what are today's rates" and "what is
//! the historical cross-rate series". Owns the in-memory tables; the CLI
//! only reads snapshots.

use anyhow::Result;
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use tracing::{debug, info};

use crate::core::currency;
use crate::core::error::RateError;
use crate::core::history::{self, HistoryPoint};
use crate::core::provider::RateProvider;
use crate::core::rates::RateTable;
use crate::store::{CachedRates, SettingsStore};

pub struct RateRepository<'a> {
    provider: &'a dyn RateProvider,
    store: &'a SettingsStore,
    /// Grows monotonically as live responses introduce new codes.
    currencies: BTreeSet<String>,
    mock_rates: RateTable,
    live_rates: Option<RateTable>,
}

impl<'a> RateRepository<'a> {
    pub fn new(provider: &'a dyn RateProvider, store: &'a SettingsStore) -> Result<Self> {
        let cached = store.cached_rates()?;

        let mut currencies: BTreeSet<String> =
            currency::baseline_codes().map(String::from).collect();
        currencies.extend(cached.currencies);

        let mock_rates = RateTable::mock(currencies.iter().cloned());
        Ok(RateRepository {
            provider,
            store,
            currencies,
            mock_rates,
            live_rates: cached.live,
        })
    }

    /// Pure cache read, never performs I/O. Live mode degrades to the mock
    /// table until a sync has ever succeeded.
    pub fn rates(&self, use_mock: bool) -> &RateTable {
        if use_mock {
            &self.mock_rates
        } else {
            self.live_rates.as_ref().unwrap_or(&self.mock_rates)
        }
    }

    pub fn has_live_rates(&self) -> bool {
        self.live_rates.is_some()
    }

    /// Sorted, duplicate-free codes of the table `rates` resolves to.
    pub fn currency_codes(&self, use_mock: bool) -> Vec<String> {
        self.rates(use_mock).codes()
    }

    pub fn last_sync(&self) -> Result<Option<DateTime<Utc>>> {
        Ok(self.store.settings()?.last_sync)
    }

    /// Fetches the latest live table and replaces all derived state: the
    /// currency set absorbs new codes, the mock table is regenerated, the
    /// live table is swapped wholesale and the sync timestamp persisted.
    /// On failure nothing changes and the error propagates.
    pub async fn sync_live_rates(&mut self) -> Result<&RateTable> {
        let table = self.provider.latest_rates().await?;

        // Stage everything first; fields are only touched once the fetch
        // and both store writes have succeeded.
        let mut currencies = self.currencies.clone();
        currencies.extend(table.codes());
        let mock_rates = RateTable::mock(currencies.iter().cloned());

        let mut settings = self.store.settings()?;
        settings.last_sync = Some(Utc::now());
        self.store.save_settings(&settings)?;
        self.store.save_cached_rates(&CachedRates {
            live: Some(table.clone()),
            currencies: currencies.clone(),
        })?;

        self.currencies = currencies;
        self.mock_rates = mock_rates;
        info!(codes = self.currencies.len(), "Live rates synced");
        Ok(self.live_rates.insert(table))
    }

    /// Historical cross-rate series, oldest first, ending today. Mock mode
    /// is generated locally; live mode fetches one day per request. A live
    /// day missing either symbol is skipped, not an error.
    pub async fn historical_rates(
        &self,
        base: &str,
        quote: &str,
        days: u32,
        use_mock: bool,
    ) -> Result<Vec<HistoryPoint>> {
        if days < 1 {
            return Err(RateError::InvalidDayCount(i64::from(days)).into());
        }

        if use_mock {
            let cross_rate = self.mock_rates.rate(base, quote);
            return Ok(history::synthetic_series(
                cross_rate,
                days,
                Utc::now().date_naive(),
            ));
        }

        let daily = self.provider.historical_rates(base, quote, days).await?;
        let mut points = Vec::with_capacity(daily.len());
        for (date, rates) in daily {
            let (Some(base_rate), Some(quote_rate)) = (rates.get(base), rates.get(quote)) else {
                debug!(%date, "skipping day missing a requested symbol");
                continue;
            };
            points.push(HistoryPoint {
                date,
                rate: quote_rate / base_rate,
            });
        }
        Ok(points)
    }
}
