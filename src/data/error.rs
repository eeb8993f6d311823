//! Data layer error types
//!
//! Errors raised while reading, profiling, cleaning or writing tabular data.

use thiserror::Error;

/// Errors that can occur in the data layer
#[derive(Error, Debug)]
pub enum DataError {
    /// The CSV reader or writer failed
    #[error("CSV error: {0}")]
    Csv(String),

    /// Input is not valid UTF-8
    #[error("Invalid encoding on line {line}: file must be UTF-8")]
    Encoding { line: u64 },

    /// A data row has more fields than the header
    #[error("Line {line}: expected {expected} fields, saw {found}")]
    RaggedRow {
        line: u64,
        expected: usize,
        found: usize,
    },

    /// No header row was found
    #[error("No columns to parse from file")]
    EmptyInput,

    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<csv::Error> for DataError {
    fn from(err: csv::Error) -> Self {
        let message = err.to_string();
        match err.into_kind() {
            csv::ErrorKind::Utf8 { pos, .. } => DataError::Encoding {
                line: pos.map(|p| p.line()).unwrap_or(0),
            },
            csv::ErrorKind::Io(io) => DataError::Io(io),
            _ => DataError::Csv(message),
        }
    }
}

/// Result type alias for data operations
pub type DataResult<T> = Result<T, DataError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DataError::RaggedRow {
            line: 4,
            expected: 2,
            found: 3,
        };
        assert_eq!(err.to_string(), "Line 4: expected 2 fields, saw 3");

        let err = DataError::EmptyInput;
        assert_eq!(err.to_string(), "No columns to parse from file");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let data_err: DataError = io_err.into();
        assert!(matches!(data_err, DataError::Io(_)));
    }

    #[test]
    fn test_utf8_error_maps_to_encoding() {
        let bytes: &[u8] = b"name\n\xff\xfe\n";
        let mut reader = csv::Reader::from_reader(bytes);
        let err = reader
            .records()
            .find_map(|r| r.err())
            .expect("invalid utf-8 must fail");
        let data_err: DataError = err.into();
        assert!(matches!(data_err, DataError::Encoding { .. }));
    }
}
