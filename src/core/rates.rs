//! Rate tables and cross-rate arithmetic.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Anchor-relative rate table: ISO currency code mapped to the number of
/// units of that currency per one unit of the anchor. The anchor itself
/// always maps to exactly 1.0. Tables are replaced wholesale on sync and
/// never patched in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    rates: BTreeMap<String, f64>,
}

impl RateTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rates(rates: BTreeMap<String, f64>) -> Self {
        Self { rates }
    }

    /// Builds the deterministic synthetic table used in mock mode: codes
    /// sorted ascending, first code mapped to 1.00, each following code
    /// exactly 0.01 higher.
    pub fn mock<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let sorted: BTreeSet<String> = codes.into_iter().map(Into::into).collect();
        let rates = sorted
            .into_iter()
            .enumerate()
            .map(|(i, code)| (code, 1.0 + i as f64 * 0.01))
            .collect();
        Self { rates }
    }

    pub fn get(&self, code: &str) -> Option<f64> {
        self.rates.get(code).copied()
    }

    pub fn insert(&mut self, code: &str, rate: f64) {
        self.rates.insert(code.to_string(), rate);
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// All codes in the table, lexicographically ascending.
    pub fn codes(&self) -> Vec<String> {
        self.rates.keys().cloned().collect()
    }

    /// Anchor-relative rate for `code`. A code missing from the table
    /// behaves as if pegged 1:1 to the anchor.
    fn anchor_rate(&self, code: &str) -> f64 {
        match self.rates.get(code) {
            Some(rate) => *rate,
            None => {
                debug!(code, "code missing from rate table, assuming anchor parity");
                1.0
            }
        }
    }

    /// Cross rate between two codes: `table[to] / table[from]`.
    pub fn rate(&self, from: &str, to: &str) -> f64 {
        self.anchor_rate(to) / self.anchor_rate(from)
    }

    pub fn convert(&self, amount: f64, from: &str, to: &str) -> f64 {
        amount * self.rate(from, to)
    }
}

/// Parses a user-typed amount, accepting both `.` and `,` as the decimal
/// separator. Unparsable input is a soft failure, not an error.
pub fn parse_amount(input: &str) -> Option<f64> {
    input
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// On-screen amount formatting, 2 decimal places.
pub fn format_amount(value: f64) -> String {
    format!("{value:.2}")
}

/// Informational unit-rate formatting, 6 decimal places.
pub fn format_rate(value: f64) -> String {
    format!("{value:.6}")
}

/// One row of the multi-currency view.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRow {
    pub code: String,
    pub amount: f64,
}

/// Multi-currency view model. The first row is the base; every other row
/// is derived from it against a rate table.
#[derive(Debug, Clone)]
pub struct MultiConversion {
    rows: Vec<ConversionRow>,
}

impl MultiConversion {
    pub fn new(base_code: &str, base_amount: f64, quotes: &[String]) -> Self {
        let mut rows = Vec::with_capacity(quotes.len() + 1);
        rows.push(ConversionRow {
            code: base_code.to_string(),
            amount: base_amount,
        });
        rows.extend(quotes.iter().map(|code| ConversionRow {
            code: code.clone(),
            amount: 0.0,
        }));
        Self { rows }
    }

    pub fn rows(&self) -> &[ConversionRow] {
        &self.rows
    }

    /// Recomputes every dependent row from the first row.
    pub fn recalculate(&mut self, table: &RateTable) {
        let Some(base) = self.rows.first().cloned() else {
            return;
        };
        for row in self.rows.iter_mut().skip(1) {
            row.amount = table.convert(base.amount, &base.code, &row.code);
        }
    }

    /// Cyclic shift: the last row becomes the new base. Amounts keep their
    /// rotated values until `recalculate` is called.
    pub fn rotate(&mut self) {
        self.rows.rotate_right(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> RateTable {
        RateTable::from_rates(BTreeMap::from([
            ("CHF".to_string(), 0.96),
            ("EUR".to_string(), 1.0),
            ("GBP".to_string(), 0.85),
            ("USD".to_string(), 1.08),
        ]))
    }

    #[test]
    fn test_rate_is_reciprocal() {
        let table = sample_table();
        for a in ["CHF", "EUR", "GBP", "USD"] {
            for b in ["CHF", "EUR", "GBP", "USD"] {
                let product = table.rate(a, b) * table.rate(b, a);
                assert!((product - 1.0).abs() < 1e-12, "{a}/{b}: {product}");
            }
            assert_eq!(table.rate(a, a), 1.0);
        }
    }

    #[test]
    fn test_convert_round_trips() {
        let table = sample_table();
        let amount = 123.45;
        let there = table.convert(amount, "CHF", "USD");
        let back = table.convert(there, "USD", "CHF");
        assert!((back - amount).abs() < 1e-9);
    }

    #[test]
    fn test_missing_code_pegged_to_anchor() {
        let table = sample_table();
        assert_eq!(table.rate("XXX", "EUR"), 1.0);
        assert_eq!(table.convert(50.0, "XXX", "YYY"), 50.0);
    }

    #[test]
    fn test_mock_table_is_deterministic() {
        let codes = ["USD", "CHF", "EUR", "CHF"];
        let first = RateTable::mock(codes);
        let second = RateTable::mock(codes);
        assert_eq!(first, second);

        assert_eq!(first.codes(), vec!["CHF", "EUR", "USD"]);
        assert_eq!(first.get("CHF"), Some(1.00));
        assert_eq!(first.get("EUR"), Some(1.01));
        assert_eq!(first.get("USD"), Some(1.02));
    }

    #[test]
    fn test_mock_table_increments_by_hundredth() {
        let table = RateTable::mock(["AAA", "BBB", "CCC", "DDD", "EEE"]);
        let codes = table.codes();
        for pair in codes.windows(2) {
            let step = table.get(&pair[1]).unwrap() - table.get(&pair[0]).unwrap();
            assert!((step - 0.01).abs() < 1e-12);
        }
    }

    #[test]
    fn test_parse_amount_accepts_both_separators() {
        assert_eq!(parse_amount("12.5"), Some(12.5));
        assert_eq!(parse_amount("12,5"), Some(12.5));
        assert_eq!(parse_amount(" 100 "), Some(100.0));
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("1.2.3"), None);
    }

    #[test]
    fn test_formatting_precision() {
        assert_eq!(format_amount(95.2381), "95.24");
        assert_eq!(format_rate(0.952380952), "0.952381");
    }

    #[test]
    fn test_rotation_moves_last_row_to_front() {
        let quotes = vec!["EUR".to_string(), "USD".to_string(), "GBP".to_string()];
        let mut multi = MultiConversion::new("CHF", 100.0, &quotes);
        multi.rows = vec![
            ConversionRow { code: "CHF".into(), amount: 100.0 },
            ConversionRow { code: "EUR".into(), amount: 107.0 },
            ConversionRow { code: "USD".into(), amount: 94.0 },
            ConversionRow { code: "GBP".into(), amount: 121.0 },
        ];

        multi.rotate();

        let codes: Vec<&str> = multi.rows().iter().map(|r| r.code.as_str()).collect();
        let amounts: Vec<f64> = multi.rows().iter().map(|r| r.amount).collect();
        assert_eq!(codes, vec!["GBP", "CHF", "EUR", "USD"]);
        assert_eq!(amounts, vec![121.0, 100.0, 107.0, 94.0]);

        let table = sample_table();
        multi.recalculate(&table);

        assert_eq!(multi.rows()[0].amount, 121.0);
        for (i, code) in ["CHF", "EUR", "USD"].iter().enumerate() {
            let expected = table.convert(121.0, "GBP", code);
            assert!((multi.rows()[i + 1].amount - expected).abs() < 1e-12);
        }
    }
}
