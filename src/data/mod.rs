//! Dashboard data layer
//!
//! Everything the pages compute on, with no web dependencies:
//!
//! - [`types`]: traffic rows, series and window selection
//! - [`synthetic`]: seeded traffic history and the sample CSV
//! - [`table`]: CSV parsing, profiling and cleaning
//! - [`error`]: data layer errors

pub mod error;
pub mod synthetic;
pub mod table;
pub mod types;

pub use error::{DataError, DataResult};
pub use synthetic::{sample_csv, TrafficGenerator, DEFAULT_SEED, SAMPLE_ROWS};
pub use table::{
    CleanReport, ColumnKind, ColumnProfile, DataTable, FilledColumn, TableProfile, NA_TOKENS,
};
pub use types::{
    clamp_window, TrafficRow, TrafficSeries, TrafficSummary, DEFAULT_WINDOW_DAYS, HISTORY_DAYS,
    MAX_WINDOW_DAYS, MIN_WINDOW_DAYS, SNAPSHOT_DAYS, SUMMARY_DAYS,
};
