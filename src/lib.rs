pub mod cli;
pub mod core;
pub mod providers;
pub mod repository;
pub mod store;

use anyhow::{Result, bail};
use tracing::{debug, info};

use crate::core::config::AppConfig;
use crate::providers::FixerProvider;
use crate::repository::RateRepository;
use crate::store::{SettingsStore, ThemeMode};

#[derive(Debug)]
pub enum AppCommand {
    Convert {
        amount: String,
        from: String,
        to: String,
    },
    Multi {
        amount: String,
        /// Base followed by quotes; the favourite triple when empty.
        currencies: Vec<String>,
        rotate: u32,
    },
    History {
        from: String,
        to: String,
        days: u32,
    },
    Sync,
    ShowSettings,
    SetApiKey {
        key: String,
    },
    SetMockMode {
        enabled: bool,
    },
    SetPremium {
        enabled: bool,
    },
    SetFavourites {
        codes: Vec<String>,
    },
    SetTheme {
        theme: Option<ThemeMode>,
    },
}

pub async fn run_command(
    command: AppCommand,
    config_path: Option<&str>,
    force_live: bool,
) -> Result<()> {
    info!("valuta starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load_or_default()?,
    };
    debug!("Loaded config: {config:#?}");

    let store = SettingsStore::open(&config.default_data_path()?)?;
    let settings = store.settings()?;

    match command {
        AppCommand::ShowSettings => cli::settings::show(&store),
        AppCommand::SetApiKey { key } => cli::settings::set_api_key(&store, &key),
        AppCommand::SetMockMode { enabled } => cli::settings::set_mock_mode(&store, enabled),
        AppCommand::SetPremium { enabled } => cli::settings::set_premium(&store, enabled),
        AppCommand::SetFavourites { codes } => cli::settings::set_favourites(&store, &codes),
        AppCommand::SetTheme { theme } => cli::settings::set_theme(&store, theme),
        rate_command => {
            let use_mock = !force_live && settings.mock_mode;
            let provider =
                FixerProvider::new(config.base_url(), settings.api_key.clone(), settings.premium)?;
            let mut repo = RateRepository::new(&provider, &store)?;

            match rate_command {
                AppCommand::Convert { amount, from, to } => {
                    let (from, to) = (from.to_uppercase(), to.to_uppercase());
                    cli::convert::display(repo.rates(use_mock), &amount, &from, &to);
                    Ok(())
                }
                AppCommand::Multi {
                    amount,
                    currencies,
                    rotate,
                } => {
                    let codes: Vec<String> = if currencies.is_empty() {
                        settings.favourites.clone()
                    } else {
                        currencies.iter().map(|c| c.to_uppercase()).collect()
                    };
                    let Some((base, quotes)) = codes.split_first() else {
                        bail!("no currencies to convert between");
                    };
                    cli::multi::display(repo.rates(use_mock), base, &amount, quotes, rotate);
                    Ok(())
                }
                AppCommand::History { from, to, days } => {
                    let (from, to) = (from.to_uppercase(), to.to_uppercase());
                    cli::history::run(&repo, &from, &to, days, use_mock).await
                }
                AppCommand::Sync => cli::sync::run(&mut repo).await,
                _ => unreachable!("settings commands are handled above"),
            }
        }
    }
}
