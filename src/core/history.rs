//! Historical cross-rate series.

use chrono::{Duration, NaiveDate};

/// A single point of a historical series. Never mutated after creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoryPoint {
    pub date: NaiveDate,
    pub rate: f64,
}

/// Generates the mock-mode series: `days` points ending at `today`, oldest
/// first, spread symmetrically around `cross_rate` in steps of 0.15% per
/// day. The middle of an odd-length series is the unperturbed cross rate.
pub fn synthetic_series(cross_rate: f64, days: u32, today: NaiveDate) -> Vec<HistoryPoint> {
    let mid = (days.saturating_sub(1)) as f64 / 2.0;
    (0..days)
        .map(|j| {
            let factor = 1.0 + (j as f64 - mid) * 0.0015;
            let date = today - Duration::days((days - 1 - j) as i64);
            HistoryPoint {
                date,
                rate: cross_rate * factor,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_five_day_series_spread() {
        let today = day("2024-03-15");
        let rate = 2.0;
        let points = synthetic_series(rate, 5, today);

        let expected_factors = [0.997, 0.9985, 1.0, 1.0015, 1.003];
        assert_eq!(points.len(), 5);
        for (i, (point, factor)) in points.iter().zip(expected_factors).enumerate() {
            assert!(
                (point.rate - rate * factor).abs() < 1e-12,
                "point {i}: {} vs {}",
                point.rate,
                rate * factor
            );
            assert_eq!(point.date, today - Duration::days(4 - i as i64));
        }
    }

    #[test]
    fn test_single_day_series_is_unperturbed() {
        let today = day("2024-03-15");
        let points = synthetic_series(1.5, 1, today);
        assert_eq!(points, vec![HistoryPoint { date: today, rate: 1.5 }]);
    }

    #[test]
    fn test_even_length_series_straddles_the_rate() {
        let points = synthetic_series(1.0, 4, day("2024-03-15"));
        let factors: Vec<f64> = points.iter().map(|p| p.rate).collect();
        assert!((factors[0] - 0.99775).abs() < 1e-12);
        assert!((factors[3] - 1.00225).abs() < 1e-12);
        // No point sits exactly on the unperturbed rate.
        assert!(factors.iter().all(|f| (f - 1.0).abs() > 1e-6));
    }
}
