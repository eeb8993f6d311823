//! Tabular Data
//!
//! In-memory CSV table used by the Data page: parse an upload, profile it,
//! clean it (drop duplicate rows, fill numeric nulls with the column median)
//! and write it back out.
//!
//! Missing values follow the usual CSV conventions: empty cells and the
//! tokens in [`NA_TOKENS`] are null. A column is numeric when it has at least
//! one non-null cell and every non-null cell parses as a number.

use serde::Serialize;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use super::error::{DataError, DataResult};

/// Cell values read as missing
pub const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Inferred type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// Every non-null cell is a number
    Numeric,
    /// At least one non-null cell is not a number
    Text,
    /// All cells are null
    Empty,
}

impl std::fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnKind::Numeric => write!(f, "numeric"),
            ColumnKind::Text => write!(f, "text"),
            ColumnKind::Empty => write!(f, "empty"),
        }
    }
}

/// A parsed CSV table. `None` cells are missing values.
#[derive(Debug, Clone, PartialEq)]
pub struct DataTable {
    columns: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

/// Null count for one column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnProfile {
    pub name: String,
    pub kind: ColumnKind,
    pub nulls: usize,
}

/// Quick profile of a table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableProfile {
    pub rows: usize,
    pub columns: usize,
    pub column_profiles: Vec<ColumnProfile>,
}

impl TableProfile {
    pub fn column_names(&self) -> Vec<&str> {
        self.column_profiles.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn total_nulls(&self) -> usize {
        self.column_profiles.iter().map(|c| c.nulls).sum()
    }
}

/// A numeric column whose nulls were replaced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilledColumn {
    pub name: String,
    pub median: f64,
    pub filled: usize,
}

/// Outcome of [`DataTable::clean`]
#[derive(Debug, Clone)]
pub struct CleanReport {
    pub table: DataTable,
    pub rows_before: usize,
    pub rows_after: usize,
    pub filled_columns: Vec<FilledColumn>,
}

impl CleanReport {
    pub fn duplicates_removed(&self) -> usize {
        self.rows_before - self.rows_after
    }
}

/// Hashable identity of a cell used for duplicate detection
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum CellKey {
    Null,
    Number(u64),
    Text(String),
}

/// Whether a raw cell counts as missing
pub fn is_missing(raw: &str) -> bool {
    NA_TOKENS.contains(&raw)
}

/// Numeric value of a cell. NaN spellings outside [`NA_TOKENS`] (`NAN`,
/// `+nan`) are text, not numbers.
fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

impl DataTable {
    /// Build a table directly from column names and rows
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        Self { columns, rows }
    }

    /// Parse CSV from any reader
    pub fn from_reader<R: Read>(reader: R) -> DataResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let blank_header =
            headers.len() == 1 && headers[0].trim_start_matches('\u{feff}').is_empty();
        if headers.is_empty() || blank_header {
            return Err(DataError::EmptyInput);
        }

        let columns = dedupe_column_names(
            headers
                .iter()
                .enumerate()
                .map(|(i, h)| {
                    let h = if i == 0 { h.trim_start_matches('\u{feff}') } else { h };
                    if h.is_empty() {
                        format!("Unnamed: {}", i)
                    } else {
                        h.to_string()
                    }
                })
                .collect(),
        );
        let width = columns.len();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            if record.len() > width {
                return Err(DataError::RaggedRow {
                    line: record.position().map(|p| p.line()).unwrap_or(0),
                    expected: width,
                    found: record.len(),
                });
            }

            let mut row: Vec<Option<String>> = record
                .iter()
                .map(|cell| {
                    if is_missing(cell) {
                        None
                    } else {
                        Some(cell.to_string())
                    }
                })
                .collect();
            row.resize(width, None);
            rows.push(row);
        }

        Ok(Self { columns, rows })
    }

    /// Parse CSV from raw bytes (an uploaded file)
    pub fn from_bytes(bytes: &[u8]) -> DataResult<Self> {
        Self::from_reader(bytes)
    }

    /// Parse CSV from a file on disk
    pub fn from_path(path: &Path) -> DataResult<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Option<String>>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.row_count(), self.column_count())
    }

    /// Infer the kind of the column at `index`
    pub fn column_kind(&self, index: usize) -> ColumnKind {
        let mut seen_value = false;
        for row in &self.rows {
            if let Some(cell) = &row[index] {
                if parse_number(cell).is_none() {
                    return ColumnKind::Text;
                }
                seen_value = true;
            }
        }
        if seen_value {
            ColumnKind::Numeric
        } else {
            ColumnKind::Empty
        }
    }

    pub fn column_kinds(&self) -> Vec<ColumnKind> {
        (0..self.columns.len()).map(|i| self.column_kind(i)).collect()
    }

    /// Missing values per column, in column order
    pub fn null_counts(&self) -> Vec<(String, usize)> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let nulls = self.rows.iter().filter(|row| row[i].is_none()).count();
                (name.clone(), nulls)
            })
            .collect()
    }

    /// Shape, column names, kinds and null counts
    pub fn profile(&self) -> TableProfile {
        let kinds = self.column_kinds();
        let column_profiles = self
            .null_counts()
            .into_iter()
            .zip(kinds)
            .map(|((name, nulls), kind)| ColumnProfile { name, kind, nulls })
            .collect();

        TableProfile {
            rows: self.row_count(),
            columns: self.column_count(),
            column_profiles,
        }
    }

    /// Median of the non-null values of a numeric column
    pub fn median(&self, index: usize) -> Option<f64> {
        let mut values: Vec<f64> = self
            .rows
            .iter()
            .filter_map(|row| row[index].as_deref().and_then(parse_number))
            .collect();
        if values.is_empty() {
            return None;
        }

        values.sort_by(|a, b| a.total_cmp(b));
        let mid = values.len() / 2;
        if values.len() % 2 == 0 {
            let (lower, upper) = (values[mid - 1], values[mid]);
            let mean = (lower + upper) / 2.0;
            // -inf and inf straddling the middle average to NaN
            Some(if mean.is_nan() { lower } else { mean })
        } else {
            Some(values[mid])
        }
    }

    /// Remove duplicate rows, keeping the first occurrence.
    ///
    /// Numeric cells compare by value, so `1` and `1.0` are the same cell.
    pub fn drop_duplicates(&self) -> DataTable {
        let kinds = self.column_kinds();
        let mut seen = HashSet::new();
        let rows = self
            .rows
            .iter()
            .filter(|row| seen.insert(row_key(row, &kinds)))
            .cloned()
            .collect();

        DataTable {
            columns: self.columns.clone(),
            rows,
        }
    }

    /// Drop duplicates, then fill nulls in numeric columns with the median
    /// of the deduplicated column.
    pub fn clean(&self) -> CleanReport {
        let mut table = self.drop_duplicates();
        let kinds = table.column_kinds();
        let mut filled_columns = Vec::new();

        for (index, kind) in kinds.iter().enumerate() {
            if *kind != ColumnKind::Numeric {
                continue;
            }

            let nulls = table.rows.iter().filter(|row| row[index].is_none()).count();
            if nulls == 0 {
                continue;
            }

            let Some(median) = table.median(index) else {
                continue;
            };
            let integral = table.rows.iter().all(|row| {
                row[index]
                    .as_deref()
                    .map(|cell| cell.trim().parse::<i64>().is_ok())
                    .unwrap_or(true)
            });
            let fill = format_fill(median, integral);

            for row in &mut table.rows {
                if row[index].is_none() {
                    row[index] = Some(fill.clone());
                }
            }

            filled_columns.push(FilledColumn {
                name: table.columns[index].clone(),
                median,
                filled: nulls,
            });
        }

        CleanReport {
            rows_before: self.row_count(),
            rows_after: table.row_count(),
            table,
            filled_columns,
        }
    }

    /// Write the table as CSV (header row first, nulls as empty cells)
    pub fn write_csv<W: std::io::Write>(&self, writer: W) -> DataResult<()> {
        let mut writer = csv::Writer::from_writer(writer);
        writer.write_record(&self.columns)?;
        for row in &self.rows {
            writer.write_record(row.iter().map(|cell| cell.as_deref().unwrap_or("")))?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Serialize the table to a CSV string
    pub fn to_csv_string(&self) -> DataResult<String> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

fn row_key(row: &[Option<String>], kinds: &[ColumnKind]) -> Vec<CellKey> {
    row.iter()
        .zip(kinds)
        .map(|(cell, kind)| match (cell, kind) {
            (None, _) => CellKey::Null,
            (Some(raw), ColumnKind::Numeric) => match parse_number(raw) {
                // -0.0 and 0.0 are the same value
                Some(v) if v == 0.0 => CellKey::Number(0.0f64.to_bits()),
                Some(v) => CellKey::Number(v.to_bits()),
                None => CellKey::Text(raw.clone()),
            },
            (Some(raw), _) => CellKey::Text(raw.clone()),
        })
        .collect()
}

fn format_fill(median: f64, integral: bool) -> String {
    if median.fract() == 0.0 && median.is_finite() {
        if integral {
            format!("{}", median as i64)
        } else {
            format!("{:.1}", median)
        }
    } else {
        format!("{}", median)
    }
}

/// Suffix repeated header names: `a, a, a` becomes `a, a.1, a.2`
fn dedupe_column_names(names: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::with_capacity(names.len());

    for name in names {
        let mut candidate = name.clone();
        let mut n = 1;
        while seen.contains(&candidate) {
            candidate = format!("{}.{}", name, n);
            n += 1;
        }
        seen.insert(candidate.clone());
        out.push(candidate);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(csv: &str) -> DataTable {
        DataTable::from_bytes(csv.as_bytes()).unwrap()
    }

    #[test]
    fn test_shape_and_columns() {
        let table = parse("name,age,score\nann,31,7.5\nbob,25,8.0\n");
        assert_eq!(table.shape(), (2, 3));
        assert_eq!(table.columns(), &["name", "age", "score"]);
    }

    #[test]
    fn test_null_counts() {
        let table = parse("a,b,c\n1,,x\nNA,2,\n3,4,null\n");
        let nulls = table.null_counts();
        assert_eq!(
            nulls,
            vec![
                ("a".to_string(), 1),
                ("b".to_string(), 1),
                ("c".to_string(), 2)
            ]
        );
        assert_eq!(table.profile().total_nulls(), 4);
    }

    #[test]
    fn test_column_kinds() {
        let table = parse("n,t,e,m\n1,x,,2\n2.5,y,,abc\n");
        assert_eq!(
            table.column_kinds(),
            vec![
                ColumnKind::Numeric,
                ColumnKind::Text,
                ColumnKind::Empty,
                ColumnKind::Text
            ]
        );
    }

    #[test]
    fn test_short_rows_are_padded() {
        let table = parse("a,b,c\n1,2\n");
        assert_eq!(table.rows()[0], vec![Some("1".to_string()), Some("2".to_string()), None]);
    }

    #[test]
    fn test_long_rows_are_rejected() {
        let err = DataTable::from_bytes(b"a,b\n1,2,3\n").unwrap_err();
        assert!(matches!(
            err,
            DataError::RaggedRow {
                expected: 2,
                found: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_empty_input_is_rejected() {
        assert!(matches!(
            DataTable::from_bytes(b"").unwrap_err(),
            DataError::EmptyInput
        ));
    }

    #[test]
    fn test_invalid_utf8_is_rejected() {
        let err = DataTable::from_bytes(b"a,b\n\xff,1\n").unwrap_err();
        assert!(matches!(err, DataError::Encoding { .. }));
    }

    #[test]
    fn test_bom_and_duplicate_headers() {
        let table = parse("\u{feff}id,x,x,\n1,2,3,4\n");
        assert_eq!(table.columns(), &["id", "x", "x.1", "Unnamed: 3"]);
    }

    #[test]
    fn test_drop_duplicates_keeps_first() {
        let table = parse("k,v\na,1\nb,2\na,1.0\na,1\nb,3\n");
        let deduped = table.drop_duplicates();
        assert_eq!(deduped.row_count(), 3);
        assert_eq!(deduped.rows()[0], vec![Some("a".to_string()), Some("1".to_string())]);
    }

    #[test]
    fn test_nulls_compare_equal_for_duplicates() {
        let table = parse("k,v\na,\na,NA\n");
        assert_eq!(table.drop_duplicates().row_count(), 1);
    }

    #[test]
    fn test_median() {
        let table = parse("v\n3\n1\n\n2\n10\n");
        assert_eq!(table.median(0), Some(2.5));

        let table = parse("v\n3\n1\n2\n");
        assert_eq!(table.median(0), Some(2.0));
    }

    #[test]
    fn test_clean_fills_numeric_nulls_with_median() {
        let table = parse("name,age,score\nann,30,1.5\nbob,,2.5\ncat,40,\ndan,50,3.5\n");
        let report = table.clean();

        assert_eq!(report.duplicates_removed(), 0);
        assert_eq!(report.table.rows()[1][1].as_deref(), Some("40"));
        assert_eq!(report.table.rows()[2][2].as_deref(), Some("2.5"));
        assert_eq!(report.filled_columns.len(), 2);
        assert_eq!(report.filled_columns[0].name, "age");
        assert_eq!(report.filled_columns[0].filled, 1);
    }

    #[test]
    fn test_clean_leaves_text_nulls() {
        let table = parse("name,age\n,30\nbob,\n");
        let report = table.clean();
        assert_eq!(report.table.rows()[0][0], None);
        assert_eq!(report.table.rows()[1][1].as_deref(), Some("30"));
    }

    #[test]
    fn test_clean_removes_duplicates_before_median() {
        // Median over the deduplicated column is 2 (1, 2, 3), not 1
        let table = parse("k,v\na,1\na,1\na,1\nb,2\nc,3\nd,\n");
        let report = table.clean();
        assert_eq!(report.duplicates_removed(), 2);
        assert_eq!(report.rows_after, 4);
        assert_eq!(report.table.rows()[3][1].as_deref(), Some("2"));
    }

    #[test]
    fn test_clean_invariants() {
        let inputs = [
            "a,b\n1,\n1,\n,2\nx,3\n",
            "a,b,c\n1,2,3\n1,2,3\n,,\n4,,6\n",
            "only\n\nNA\n5\n5\n",
            "t\nfoo\nfoo\nbar\n",
            "v,k\ninf,a\n-inf,b\n,c\n",
            "v\n-inf\ninf\n2\n\n",
            "v\nNAN\n+nan\n\n",
        ];

        for input in inputs {
            let table = parse(input);
            let report = table.clean();
            assert!(report.rows_after <= report.rows_before);

            // The written file must read back without numeric nulls too
            let reparsed = parse(&report.table.to_csv_string().unwrap());
            for ((name, nulls), kind) in reparsed.null_counts().iter().zip(reparsed.column_kinds()) {
                if kind == ColumnKind::Numeric {
                    assert_eq!(*nulls, 0, "column {} of {:?} reads back with nulls", name, input);
                }
            }

            let cleaned = &report.table;
            for (index, kind) in cleaned.column_kinds().iter().enumerate() {
                if *kind == ColumnKind::Numeric {
                    assert!(
                        cleaned.rows().iter().all(|row| row[index].is_some()),
                        "numeric column {} still has nulls for input {:?}",
                        index,
                        input
                    );
                }
            }
        }
    }

    #[test]
    fn test_opposite_infinities_fill_with_lower_middle() {
        let report = parse("v,k\ninf,a\n-inf,b\n,c\n").clean();
        assert_eq!(report.filled_columns[0].median, f64::NEG_INFINITY);
        assert_eq!(
            report.table.to_csv_string().unwrap(),
            "v,k\ninf,a\n-inf,b\n-inf,c\n"
        );
    }

    #[test]
    fn test_only_listed_tokens_are_missing() {
        assert!(is_missing("NaN"));
        assert!(is_missing("-nan"));
        assert!(!is_missing("NAN"));
        assert!(!is_missing("+nan"));

        let table = parse("v\nNAN\n+nan\n");
        assert_eq!(table.null_counts(), vec![("v".to_string(), 0)]);
        assert_eq!(table.column_kind(0), ColumnKind::Text);
    }

    #[test]
    fn test_csv_output() {
        let table = parse("a,b\n1,\n\"x,y\",2\n");
        let out = table.to_csv_string().unwrap();
        assert_eq!(out, "a,b\n1,\n\"x,y\",2\n");
    }

    #[test]
    fn test_format_fill() {
        assert_eq!(format_fill(4.0, true), "4");
        assert_eq!(format_fill(4.0, false), "4.0");
        assert_eq!(format_fill(2.5, true), "2.5");
    }
}
