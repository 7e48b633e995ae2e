use anyhow::Result;

use crate::cli::ui::{self, StyleType};
use crate::core::rates;
use crate::repository::RateRepository;

/// Fetches and renders the historical cross-rate series for a pair.
pub async fn run(
    repo: &RateRepository<'_>,
    from: &str,
    to: &str,
    days: u32,
    use_mock: bool,
) -> Result<()> {
    let points = if use_mock {
        repo.historical_rates(from, to, days, true).await?
    } else {
        let spinner = ui::new_spinner(format!("Fetching {days} days of {from}/{to} rates"));
        let result = repo.historical_rates(from, to, days, false).await;
        spinner.finish_and_clear();
        result?
    };

    let title = format!("{from}/{to} over {days} days");
    println!("{}", ui::style_text(&title, StyleType::Title));

    if points.is_empty() {
        println!("{}", ui::style_text("No data for this range", StyleType::Error));
        return Ok(());
    }

    let mut out = ui::new_styled_table();
    out.set_header(vec![ui::header_cell("Date"), ui::header_cell("Rate")]);
    for point in &points {
        out.add_row(vec![
            comfy_table::Cell::new(point.date.format("%Y-%m-%d").to_string()),
            ui::amount_cell(&rates::format_rate(point.rate)),
        ]);
    }
    println!("{out}");

    let values: Vec<f64> = points.iter().map(|p| p.rate).collect();
    println!("{}", ui::sparkline(&values));

    let low = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let high = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if let Some(latest) = values.last() {
        let summary = format!(
            "low {}  high {}  latest {}",
            rates::format_rate(low),
            rates::format_rate(high),
            rates::format_rate(*latest)
        );
        println!("{}", ui::style_text(&summary, StyleType::Subtle));
    }

    Ok(())
}
