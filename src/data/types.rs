//! Core data types for the dashboard's traffic data
//!
//! - `TrafficRow`: one day of site traffic
//! - `TrafficSeries`: the ordered daily history shown on Overview and Analytics
//! - `TrafficSummary`: aggregates over a slice of rows

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::{DataError, DataResult};

/// Number of daily rows in the synthetic history (today and the 60 days before)
pub const HISTORY_DAYS: usize = 61;

/// Smallest window the Analytics slider allows
pub const MIN_WINDOW_DAYS: usize = 7;

/// Largest window the Analytics slider allows
pub const MAX_WINDOW_DAYS: usize = 60;

/// Slider position on first render
pub const DEFAULT_WINDOW_DAYS: usize = 30;

/// Rows used for the Overview KPI tiles
pub const SUMMARY_DAYS: usize = 7;

/// Rows plotted in the Overview traffic snapshot
pub const SNAPSHOT_DAYS: usize = 30;

/// A single day of traffic
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrafficRow {
    pub date: NaiveDate,
    pub visitors: u32,
    /// Bounce rate in percent
    pub bounce: f64,
    /// Click-through rate in percent
    pub ctr: f64,
    pub signups: u32,
}

/// Aggregates shown as metric tiles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrafficSummary {
    pub visitors: u64,
    pub signups: u64,
    pub avg_bounce: f64,
    pub avg_ctr: f64,
}

impl TrafficSummary {
    /// Summarize a slice of rows. Means are 0.0 for an empty slice.
    pub fn from_rows(rows: &[TrafficRow]) -> Self {
        let visitors = rows.iter().map(|r| r.visitors as u64).sum();
        let signups = rows.iter().map(|r| r.signups as u64).sum();

        let (avg_bounce, avg_ctr) = if rows.is_empty() {
            (0.0, 0.0)
        } else {
            let n = rows.len() as f64;
            (
                rows.iter().map(|r| r.bounce).sum::<f64>() / n,
                rows.iter().map(|r| r.ctr).sum::<f64>() / n,
            )
        };

        Self {
            visitors,
            signups,
            avg_bounce,
            avg_ctr,
        }
    }
}

/// Ordered (oldest first) daily traffic history
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrafficSeries {
    rows: Vec<TrafficRow>,
}

impl TrafficSeries {
    /// Create a series from rows already sorted by date
    pub fn new(rows: Vec<TrafficRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[TrafficRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The last `n` rows (all rows if `n` exceeds the length)
    pub fn tail(&self, n: usize) -> &[TrafficRow] {
        let start = self.rows.len().saturating_sub(n);
        &self.rows[start..]
    }

    /// Rows selected by the Analytics day slider.
    ///
    /// The requested day count is clamped to the slider range first. At the
    /// slider maximum the whole history is returned.
    pub fn window(&self, days: usize) -> &[TrafficRow] {
        let days = clamp_window(days);
        if days >= MAX_WINDOW_DAYS {
            return &self.rows;
        }
        self.tail(days)
    }

    /// KPI aggregates over the last seven days
    pub fn summary(&self) -> TrafficSummary {
        TrafficSummary::from_rows(self.tail(SUMMARY_DAYS))
    }

    /// Serialize all rows as CSV with a header row
    pub fn to_csv(&self) -> DataResult<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(["date", "visitors", "bounce", "ctr", "signups"])?;
        for row in &self.rows {
            writer.write_record([
                row.date.format("%Y-%m-%d").to_string(),
                row.visitors.to_string(),
                format!("{:.4}", row.bounce),
                format!("{:.4}", row.ctr),
                row.signups.to_string(),
            ])?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| DataError::Io(e.into_error()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Clamp a requested day count into the slider range
pub fn clamp_window(days: usize) -> usize {
    days.clamp(MIN_WINDOW_DAYS, MAX_WINDOW_DAYS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(len: usize) -> TrafficSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        TrafficSeries::new(
            (0..len)
                .map(|i| TrafficRow {
                    date: start + chrono::Duration::days(i as i64),
                    visitors: 100 + i as u32,
                    bounce: 30.0 + i as f64,
                    ctr: 1.0,
                    signups: i as u32,
                })
                .collect(),
        )
    }

    #[test]
    fn test_window_minimum_returns_last_seven() {
        let s = series(HISTORY_DAYS);
        let w = s.window(MIN_WINDOW_DAYS);
        assert_eq!(w.len(), 7);
        assert_eq!(w, &s.rows()[HISTORY_DAYS - 7..]);
    }

    #[test]
    fn test_window_maximum_returns_all_rows() {
        let s = series(HISTORY_DAYS);
        assert_eq!(s.window(MAX_WINDOW_DAYS).len(), HISTORY_DAYS);
    }

    #[test]
    fn test_window_clamps_out_of_range() {
        let s = series(HISTORY_DAYS);
        assert_eq!(s.window(0).len(), 7);
        assert_eq!(s.window(3).len(), 7);
        assert_eq!(s.window(1000).len(), HISTORY_DAYS);
        assert_eq!(s.window(30).len(), 30);
    }

    #[test]
    fn test_tail_longer_than_series() {
        let s = series(5);
        assert_eq!(s.tail(30).len(), 5);
    }

    #[test]
    fn test_summary_uses_last_seven_rows() {
        let s = series(10);
        let summary = s.summary();
        let expected_visitors: u64 = (3..10).map(|i| 100 + i as u64).sum();
        let expected_signups: u64 = (3..10).sum();
        assert_eq!(summary.visitors, expected_visitors);
        assert_eq!(summary.signups, expected_signups);
        assert!((summary.avg_bounce - 36.0).abs() < 1e-9);
        assert!((summary.avg_ctr - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_summary_empty() {
        let summary = TrafficSummary::from_rows(&[]);
        assert_eq!(summary.visitors, 0);
        assert_eq!(summary.avg_bounce, 0.0);
    }

    #[test]
    fn test_to_csv_header_and_rows() {
        let csv = series(2).to_csv().unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("date,visitors,bounce,ctr,signups"));
        assert_eq!(lines.next(), Some("2024-01-01,100,30.0000,1.0000,0"));
        assert_eq!(lines.count(), 1);
    }
}
