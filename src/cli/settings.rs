use anyhow::{Result, bail};

use crate::cli::ui::{self, StyleType};
use crate::store::{SettingsStore, ThemeMode};

/// Renders the current settings. The API key is shown masked.
pub fn show(store: &SettingsStore) -> Result<()> {
    let settings = store.settings()?;

    let mut out = ui::new_styled_table();
    out.set_header(vec![ui::header_cell("Setting"), ui::header_cell("Value")]);
    out.add_row(vec![
        "API key".to_string(),
        settings
            .api_key
            .as_deref()
            .map_or_else(|| "not set".to_string(), mask_key),
    ]);
    out.add_row(vec![
        "Mock mode".to_string(),
        on_off(settings.mock_mode).to_string(),
    ]);
    out.add_row(vec![
        "Premium plan".to_string(),
        on_off(settings.premium).to_string(),
    ]);
    out.add_row(vec!["Favourites".to_string(), settings.favourites.join(", ")]);
    out.add_row(vec![
        "Last sync".to_string(),
        settings.last_sync.map_or_else(
            || "never".to_string(),
            |ts| ts.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        ),
    ]);
    out.add_row(vec![
        "Theme".to_string(),
        settings
            .theme
            .map_or_else(|| "system".to_string(), |t| t.to_string()),
    ]);
    println!("{out}");
    Ok(())
}

pub fn set_api_key(store: &SettingsStore, key: &str) -> Result<()> {
    if key.trim().is_empty() {
        bail!("API key must not be empty");
    }
    let mut settings = store.settings()?;
    settings.api_key = Some(key.trim().to_string());
    store.save_settings(&settings)?;
    confirm("API key updated");
    Ok(())
}

pub fn set_mock_mode(store: &SettingsStore, enabled: bool) -> Result<()> {
    let mut settings = store.settings()?;
    settings.mock_mode = enabled;
    store.save_settings(&settings)?;
    confirm(&format!("Mock mode {}", on_off(enabled)));
    Ok(())
}

pub fn set_premium(store: &SettingsStore, enabled: bool) -> Result<()> {
    let mut settings = store.settings()?;
    settings.premium = enabled;
    store.save_settings(&settings)?;
    confirm(&format!("Premium plan {}", on_off(enabled)));
    Ok(())
}

/// Replaces the favourite triple. The list is ordered and always exactly
/// three codes long.
pub fn set_favourites(store: &SettingsStore, codes: &[String]) -> Result<()> {
    if codes.len() != 3 {
        bail!("favourites must be exactly 3 currency codes, got {}", codes.len());
    }
    let normalized: Vec<String> = codes.iter().map(|c| c.to_uppercase()).collect();
    let mut settings = store.settings()?;
    settings.favourites = normalized.clone();
    store.save_settings(&settings)?;
    confirm(&format!("Favourites set to {}", normalized.join(", ")));
    Ok(())
}

pub fn set_theme(store: &SettingsStore, theme: Option<ThemeMode>) -> Result<()> {
    let mut settings = store.settings()?;
    settings.theme = theme;
    store.save_settings(&settings)?;
    let label = theme.map_or_else(|| "system".to_string(), |t| t.to_string());
    confirm(&format!("Theme set to {label}"));
    Ok(())
}

fn confirm(message: &str) {
    println!("{}", ui::style_text(message, StyleType::Value));
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "on" } else { "off" }
}

fn mask_key(key: &str) -> String {
    let visible: String = key.chars().take(4).collect();
    format!("{visible}…")
}
