//! Error types for Data Modeler
//!
//! Every recoverable failure in the application ends up as an `AppError`,
//! which the shell turns into a modal message via `user_message()`.

use thiserror::Error;

/// Which selector an arity check applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

/// Main error type for Data Modeler operations
#[derive(Error, Debug)]
pub enum AppError {
    /// File I/O error
    #[error("Failed to access file: {0}")]
    FileIo(#[from] std::io::Error),

    /// Polars data processing error
    #[error("Data processing error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Unsupported file format
    #[error("Unsupported file format: {extension}")]
    UnsupportedFormat { extension: String },

    /// No dataset registered under this key
    #[error("Dataset '{key}' is not loaded")]
    DatasetNotFound { key: String },

    /// Column not found in data
    #[error("Column '{column}' not found in dataset")]
    ColumnNotFound { column: String },

    /// Wrong number of X or Y selections for a plot kind
    #[error("{plot} needs {expected} {axis}-argument, got {actual}")]
    Arity {
        plot: &'static str,
        axis: Axis,
        expected: usize,
        actual: usize,
    },

    /// Column actions operate on exactly one selected column
    #[error("Must select exactly 1 column, got {actual}")]
    SelectionCount { actual: usize },

    /// Plot kind label not recognized
    #[error("Unknown plot type: {0}")]
    UnknownPlotKind(String),

    /// Time field name not recognized
    #[error("Unexpected time field: {0}")]
    UnknownTimeField(String),

    /// Operation needs a datetime column
    #[error("Column '{column}' is not a date-time column")]
    NotTemporal { column: String },

    /// A value could not be read as a date-time
    #[error("Cannot parse '{value}' in column '{column}' as a date-time")]
    DateTimeParse { column: String, value: String },

    /// Operation needs numeric values
    #[error("Column '{column}' has no numeric values")]
    NonNumeric { column: String },
}

/// Result type alias for Data Modeler operations
pub type Result<T> = std::result::Result<T, AppError>;

/// UI-friendly error message formatting
impl AppError {
    /// Get a user-friendly error message suitable for the modal dialog
    pub fn user_message(&self) -> String {
        match self {
            AppError::FileIo(e) => format!("File error: {}", e),
            AppError::Polars(e) => format!("Data error: {}", e),
            AppError::Json(e) => format!("Settings file error: {}", e),
            AppError::UnsupportedFormat { extension } => {
                format!("Unsupported file format: '.{}'", extension)
            }
            AppError::DatasetNotFound { key } => format!("No dataset named '{}'", key),
            AppError::ColumnNotFound { column } => format!("Column '{}' not found", column),
            AppError::DateTimeParse { column, value } => {
                format!("Column '{}': cannot read '{}' as a date-time", column, value)
            }
            // The display text is already written for the user
            other => other.to_string(),
        }
    }

    /// Get a short title for the error (window heading)
    pub fn title(&self) -> &'static str {
        match self {
            AppError::FileIo(_) => "File Error",
            AppError::Polars(_) => "Data Error",
            AppError::Json(_) => "Settings Error",
            AppError::UnsupportedFormat { .. } => "Unsupported Format",
            AppError::DatasetNotFound { .. } => "Dataset Not Found",
            AppError::ColumnNotFound { .. } => "Column Not Found",
            AppError::Arity { .. } => "Plot Arguments",
            AppError::SelectionCount { .. } => "Column Selection",
            AppError::UnknownPlotKind(_) => "Unknown Plot",
            AppError::UnknownTimeField(_) => "Invalid Argument",
            AppError::NotTemporal { .. } => "Type Error",
            AppError::DateTimeParse { .. } => "Date-Time Error",
            AppError::NonNumeric { .. } => "Type Error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = AppError::ColumnNotFound {
            column: "Temperature".to_string(),
        };
        assert_eq!(err.user_message(), "Column 'Temperature' not found");
        assert_eq!(err.title(), "Column Not Found");

        let err = AppError::Arity {
            plot: "BoxPlot",
            axis: Axis::Y,
            expected: 1,
            actual: 3,
        };
        assert_eq!(err.user_message(), "BoxPlot needs 1 y-argument, got 3");

        let err = AppError::SelectionCount { actual: 0 };
        assert_eq!(err.user_message(), "Must select exactly 1 column, got 0");
    }

    #[test]
    fn test_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::FileIo(_)));
    }
}
