//! Hi-Fi Dashboard CLI
//!
//! Command-line access to the dashboard's data tools:
//! - Generate the sample CSV
//! - Profile and clean CSV files
//! - Print the synthetic traffic series
//! - Check a running server

use chrono::Local;
use clap::{Parser, Subcommand};
use hifi_dashboard::data::{
    clamp_window, sample_csv, DataTable, TableProfile, TrafficGenerator, TrafficRow,
    DEFAULT_SEED, DEFAULT_WINDOW_DAYS, SAMPLE_ROWS,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "hifi-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Data tools for the Hi-Fi Dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Dashboard server URL
    #[arg(long, default_value = "http://localhost:8501", global = true)]
    pub url: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a sample CSV with random values
    Sample {
        /// Number of rows
        #[arg(short, long, default_value_t = SAMPLE_ROWS)]
        rows: usize,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print shape, columns and null counts of a CSV
    Profile {
        /// Path to CSV file
        path: PathBuf,
    },

    /// Drop duplicate rows and fill numeric nulls with the column median
    Clean {
        /// Path to CSV file
        path: PathBuf,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the most recent days of the synthetic traffic series
    Traffic {
        /// Days to show (7-60)
        #[arg(short, long, default_value_t = DEFAULT_WINDOW_DAYS)]
        days: usize,
        /// Series seed
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,
        /// Print CSV instead of a table
        #[arg(long)]
        csv: bool,
    },

    /// Show the status of a running dashboard
    Status,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Sample { rows, output } => {
            let csv = sample_csv(&mut rand::thread_rng(), Local::now().date_naive(), rows)?;
            write_output(output.as_deref(), &csv)?;
        }

        Commands::Profile { path } => {
            let table = DataTable::from_path(&path)?;
            print!("{}", format_profile(&table.profile()));
        }

        Commands::Clean { path, output } => {
            let table = DataTable::from_path(&path)?;
            let report = table.clean();

            eprintln!(
                "Removed {} duplicate rows ({} -> {})",
                report.duplicates_removed(),
                report.rows_before,
                report.rows_after
            );
            for column in &report.filled_columns {
                eprintln!(
                    "  {}: filled {} nulls with median {}",
                    column.name, column.filled, column.median
                );
            }

            write_output(output.as_deref(), &report.table.to_csv_string()?)?;
        }

        Commands::Traffic { days, seed, csv } => {
            let series = TrafficGenerator::new(seed).generate(Local::now().date_naive());
            let rows = series.window(clamp_window(days));

            if csv {
                print!("{}", hifi_dashboard::TrafficSeries::new(rows.to_vec()).to_csv()?);
            } else {
                print!("{}", format_traffic_table(rows));
                let summary = series.summary();
                println!();
                println!(
                    "Last 7 days: {} visitors, {} signups, {:.1}% bounce, {:.2}% CTR",
                    summary.visitors, summary.signups, summary.avg_bounce, summary.avg_ctr
                );
            }
        }

        Commands::Status => {
            let client = reqwest::Client::new();
            let response = client.get(format!("{}/health", cli.url)).send().await;

            match response {
                Ok(resp) if resp.status().is_success() => {
                    let health: serde_json::Value = resp.json().await?;

                    println!("Hi-Fi Dashboard v{}", env!("CARGO_PKG_VERSION"));
                    println!();
                    println!(
                        "Server Status: {}",
                        health["status"].as_str().unwrap_or("unknown")
                    );
                    if let Some(version) = health["version"].as_str() {
                        println!("Server Version: {}", version);
                    }
                    if let Some(sessions) = health["sessions"].as_u64() {
                        println!("Live Sessions: {}", sessions);
                    }
                    if let Some(uptime) = health["uptime_seconds"].as_u64() {
                        println!("Uptime: {}", format_duration(uptime));
                    }
                }
                Ok(resp) => {
                    eprintln!("Server returned error: {}", resp.status());
                    std::process::exit(1);
                }
                Err(e) => {
                    eprintln!("Cannot connect to the dashboard at {}", cli.url);
                    eprintln!("Error: {}", e);
                    eprintln!();
                    eprintln!("Make sure the server is running:");
                    eprintln!("  cargo run --bin hifi-dashboard");
                    std::process::exit(1);
                }
            }
        }

        Commands::Config { output } => {
            let config = hifi_dashboard::generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

fn write_output(path: Option<&Path>, content: &str) -> std::io::Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)?;
            eprintln!("Wrote {:?}", path);
        }
        None => print!("{}", content),
    }
    Ok(())
}

fn format_profile(profile: &TableProfile) -> String {
    let mut out = format!("Shape: ({}, {})\n\n", profile.rows, profile.columns);

    let width = profile
        .column_profiles
        .iter()
        .map(|c| c.name.len())
        .max()
        .unwrap_or(0)
        .max("Column".len());

    out.push_str(&format!("{:<width$} | {:<7} | Nulls\n", "Column", "Kind", width = width));
    out.push_str(&format!("{}\n", "-".repeat(width + 18)));
    for column in &profile.column_profiles {
        out.push_str(&format!(
            "{:<width$} | {:<7} | {}\n",
            column.name,
            column.kind.to_string(),
            column.nulls,
            width = width
        ));
    }
    out
}

fn format_traffic_table(rows: &[TrafficRow]) -> String {
    let mut out = format!(
        "{:<12} | {:>8} | {:>8} | {:>6} | {:>7}\n",
        "Date", "Visitors", "Bounce %", "CTR %", "Signups"
    );
    out.push_str(&format!("{}\n", "-".repeat(53)));
    for row in rows {
        out.push_str(&format!(
            "{:<12} | {:>8} | {:>8.1} | {:>6.2} | {:>7}\n",
            row.date.format("%Y-%m-%d"),
            row.visitors,
            row.bounce,
            row.ctr,
            row.signups
        ));
    }
    out
}

fn format_duration(seconds: u64) -> String {
    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        format!("{}m {}s", seconds / 60, seconds % 60)
    } else if seconds < 86400 {
        format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
    } else {
        format!("{}d {}h", seconds / 86400, (seconds % 86400) / 3600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_format_profile() {
        let table = DataTable::from_bytes(b"name,age\nann,\nbob,30\n").unwrap();
        let out = format_profile(&table.profile());
        assert!(out.starts_with("Shape: (2, 2)"));
        assert!(out.contains("age    | numeric | 1"));
        assert!(out.contains("name   | text    | 0"));
    }

    #[test]
    fn test_clean_round_trip_through_files() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.csv");
        let output = dir.path().join("out.csv");
        std::fs::write(&input, "k,v\na,1\na,1\nb,\n").unwrap();

        let report = DataTable::from_path(&input).unwrap().clean();
        write_output(Some(&output), &report.table.to_csv_string().unwrap()).unwrap();

        assert_eq!(std::fs::read_to_string(&output).unwrap(), "k,v\na,1\nb,1\n");
    }

    #[test]
    fn test_traffic_table_rows() {
        let series =
            TrafficGenerator::default().generate(NaiveDate::from_ymd_opt(2024, 6, 30).unwrap());
        let out = format_traffic_table(series.window(7));
        assert_eq!(out.lines().count(), 9);
        assert!(out.contains("2024-06-30"));
        assert!(!out.contains("2024-06-23"));
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(42), "42s");
        assert_eq!(format_duration(125), "2m 5s");
        assert_eq!(format_duration(7260), "2h 1m");
        assert_eq!(format_duration(90000), "1d 1h");
    }
}
