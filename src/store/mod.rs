//! Persistent application state, kept as JSON documents in a fjall
//! keyspace. Holds the user settings plus the rate cache that survives
//! between CLI invocations.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use fjall::{Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::debug;

use crate::core::rates::RateTable;

pub const DEFAULT_FAVOURITES: [&str; 3] = ["CHF", "EUR", "USD"];

const SETTINGS_KEY: &str = "settings";
const RATES_KEY: &str = "rates";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThemeMode::Light => write!(f, "light"),
            ThemeMode::Dark => write!(f, "dark"),
        }
    }
}

/// User-facing settings. Missing or never-written keys fall back to the
/// defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_key: Option<String>,
    pub mock_mode: bool,
    pub premium: bool,
    /// Ordered, always exactly three codes.
    pub favourites: Vec<String>,
    pub last_sync: Option<DateTime<Utc>>,
    /// `None` follows the terminal/system appearance.
    pub theme: Option<ThemeMode>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            api_key: None,
            mock_mode: true,
            premium: false,
            favourites: DEFAULT_FAVOURITES.map(String::from).to_vec(),
            last_sync: None,
            theme: None,
        }
    }
}

/// Repository state cached across CLI invocations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CachedRates {
    pub live: Option<RateTable>,
    pub currencies: BTreeSet<String>,
}

/// Key-value store over a single fjall partition.
pub struct SettingsStore {
    keyspace: Keyspace,
    partition: PartitionHandle,
}

impl SettingsStore {
    pub fn open(path: &Path) -> Result<Self> {
        std::fs::create_dir_all(path)
            .with_context(|| format!("Failed to create data directory: {}", path.display()))?;

        let keyspace = fjall::Config::new(path.join("state"))
            .open()
            .with_context(|| format!("Failed to open settings store at {}", path.display()))?;
        let partition = keyspace.open_partition("state", PartitionCreateOptions::default())?;
        Ok(SettingsStore {
            keyspace,
            partition,
        })
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.partition.get(key)? {
            Some(raw) => {
                debug!("Store HIT for key: {key}");
                Ok(Some(serde_json::from_slice(&raw)?))
            }
            None => {
                debug!("Store MISS for key: {key}");
                Ok(None)
            }
        }
    }

    fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        self.partition.insert(key, serde_json::to_vec(value)?)?;
        self.keyspace.persist(PersistMode::SyncAll)?;
        debug!("Store PUT for key: {key}");
        Ok(())
    }

    pub fn settings(&self) -> Result<Settings> {
        Ok(self.read(SETTINGS_KEY)?.unwrap_or_default())
    }

    pub fn save_settings(&self, settings: &Settings) -> Result<()> {
        self.write(SETTINGS_KEY, settings)
    }

    pub fn cached_rates(&self) -> Result<CachedRates> {
        Ok(self.read(RATES_KEY)?.unwrap_or_default())
    }

    pub fn save_cached_rates(&self, cached: &CachedRates) -> Result<()> {
        self.write(RATES_KEY, cached)
    }
}
