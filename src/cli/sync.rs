use anyhow::Result;

use crate::cli::ui::{self, StyleType};
use crate::repository::RateRepository;

/// Forces a live fetch and reports the refreshed table.
pub async fn run(repo: &mut RateRepository<'_>) -> Result<()> {
    let spinner = ui::new_spinner("Fetching latest rates".to_string());
    let result = repo.sync_live_rates().await;
    spinner.finish_and_clear();

    let table = result?;
    println!(
        "{} {} currencies",
        ui::style_text("Synced", StyleType::Value),
        table.len()
    );
    if let Some(timestamp) = repo.last_sync()? {
        let line = format!("Last sync: {}", timestamp.format("%Y-%m-%d %H:%M:%S UTC"));
        println!("{}", ui::style_text(&line, StyleType::Subtle));
    }
    Ok(())
}
