//! Synthetic Traffic Data
//!
//! Seeded generator for the daily traffic history and an unseeded generator
//! for the downloadable sample CSV.

use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::error::{DataError, DataResult};
use super::types::{TrafficRow, TrafficSeries, HISTORY_DAYS};

/// Default RNG seed for the traffic history
pub const DEFAULT_SEED: u64 = 7;

/// Default number of rows in the sample CSV
pub const SAMPLE_ROWS: usize = 30;

/// Deterministic traffic history generator
#[derive(Debug, Clone)]
pub struct TrafficGenerator {
    seed: u64,
    days: usize,
}

impl Default for TrafficGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl TrafficGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            days: HISTORY_DAYS,
        }
    }

    /// Set the number of daily rows
    pub fn with_days(mut self, days: usize) -> Self {
        self.days = days;
        self
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate the history ending at `today` (inclusive).
    ///
    /// Columns are drawn in order (visitors, bounce, ctr, signup rate), so
    /// the values only depend on the seed and the row count.
    pub fn generate(&self, today: NaiveDate) -> TrafficSeries {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let n = self.days;

        let visitors: Vec<u32> = (0..n).map(|_| rng.gen_range(80..450)).collect();
        let bounce: Vec<f64> = (0..n).map(|_| rng.gen_range(25.0..65.0)).collect();
        let ctr: Vec<f64> = (0..n).map(|_| rng.gen_range(0.8..6.2)).collect();
        let signup_rate: Vec<f64> = (0..n).map(|_| rng.gen_range(0.05..0.18)).collect();

        let first = today - Duration::days(n.saturating_sub(1) as i64);

        let rows = (0..n)
            .map(|i| TrafficRow {
                date: first + Duration::days(i as i64),
                visitors: visitors[i],
                bounce: bounce[i],
                ctr: ctr[i],
                signups: (visitors[i] as f64 * signup_rate[i]) as u32,
            })
            .collect();

        TrafficSeries::new(rows)
    }
}

/// Build the downloadable sample CSV (`date,visitors,signups`).
///
/// Rows cover the `rows` days ending at `today`.
pub fn sample_csv<R: Rng + ?Sized>(rng: &mut R, today: NaiveDate, rows: usize) -> DataResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["date", "visitors", "signups"])?;

    let first = today - Duration::days(rows.saturating_sub(1) as i64);
    for i in 0..rows {
        let date = first + Duration::days(i as i64);
        let visitors: u32 = rng.gen_range(50..350);
        let signups: u32 = rng.gen_range(0..60);
        writer.write_record([
            date.format("%Y-%m-%d").to_string(),
            visitors.to_string(),
            signups.to_string(),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|e| DataError::Io(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
    }

    #[test]
    fn test_history_shape_and_dates() {
        let series = TrafficGenerator::default().generate(today());
        assert_eq!(series.len(), HISTORY_DAYS);

        let rows = series.rows();
        assert_eq!(rows.last().unwrap().date, today());
        assert_eq!(rows[0].date, today() - Duration::days(60));
        assert!(rows.windows(2).all(|w| w[1].date - w[0].date == Duration::days(1)));
    }

    #[test]
    fn test_history_value_ranges() {
        let series = TrafficGenerator::default().generate(today());
        for row in series.rows() {
            assert!((80..450).contains(&row.visitors));
            assert!((25.0..65.0).contains(&row.bounce));
            assert!((0.8..6.2).contains(&row.ctr));
            assert!(row.signups as f64 <= row.visitors as f64 * 0.18);
            assert!(row.signups as f64 >= (row.visitors as f64 * 0.05).floor());
        }
    }

    #[test]
    fn test_same_seed_same_series() {
        let a = TrafficGenerator::new(7).generate(today());
        let b = TrafficGenerator::new(7).generate(today());
        assert_eq!(a, b);

        let c = TrafficGenerator::new(8).generate(today());
        assert_ne!(a, c);
    }

    #[test]
    fn test_seven_day_sums_match_tail() {
        let series = TrafficGenerator::default().generate(today());
        let summary = series.summary();

        let tail = &series.rows()[series.len() - 7..];
        let visitors: u64 = tail.iter().map(|r| r.visitors as u64).sum();
        let signups: u64 = tail.iter().map(|r| r.signups as u64).sum();

        assert_eq!(summary.visitors, visitors);
        assert_eq!(summary.signups, signups);
    }

    #[test]
    fn test_sample_csv() {
        let mut rng = StdRng::seed_from_u64(1);
        let csv = sample_csv(&mut rng, today(), SAMPLE_ROWS).unwrap();

        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let headers: Vec<&str> = reader.headers().unwrap().iter().collect();
        assert_eq!(headers, vec!["date", "visitors", "signups"]);

        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), SAMPLE_ROWS);
        assert_eq!(&records[SAMPLE_ROWS - 1][0], "2024-06-30");
        assert_eq!(&records[0][0], "2024-06-01");
        for record in &records {
            let visitors: u32 = record[1].parse().unwrap();
            let signups: u32 = record[2].parse().unwrap();
            assert!((50..350).contains(&visitors));
            assert!(signups < 60);
        }
    }
}
