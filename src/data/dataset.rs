use polars::prelude::*;
use std::path::{Path, PathBuf};

use crate::constants::data::INFER_SCHEMA_ROWS;
use crate::error::{AppError, Result};

/// Dataset wraps a materialized Polars DataFrame loaded from a CSV file
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Table shown in the grid and handed to the plots
    frame: DataFrame,
    /// Original file path
    file_path: Option<PathBuf>,
}

impl Dataset {
    /// Load a CSV file with a header row
    pub fn load(path: &Path) -> Result<Self> {
        profiling::scope!("load_dataset");

        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_lowercase();
        if extension != "csv" {
            return Err(AppError::UnsupportedFormat { extension });
        }

        let frame = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
            .with_try_parse_dates(true)
            .finish()?
            .collect()?;

        Ok(Self {
            frame,
            file_path: Some(path.to_path_buf()),
        })
    }

    /// Create a Dataset from an already-built DataFrame
    pub fn from_dataframe(frame: DataFrame, path: Option<PathBuf>) -> Self {
        Self {
            frame,
            file_path: path,
        }
    }

    /// Registry key for a file: its base name
    pub fn key_for_path(path: &Path) -> String {
        path.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string())
    }

    pub fn dataframe(&self) -> &DataFrame {
        &self.frame
    }

    /// Get column values as a Series
    pub fn column_values(&self, col: &str) -> Result<Series> {
        self.frame
            .column(col)
            .map(|c| c.as_materialized_series().clone())
            .map_err(|_| AppError::ColumnNotFound {
                column: col.to_string(),
            })
    }

    /// Insert a column, replacing any existing column with the same name
    pub fn put_column(&mut self, series: Series) -> Result<()> {
        self.frame.with_column(series)?;
        Ok(())
    }

    /// Get all column names in table order
    pub fn column_names(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    pub fn has_column(&self, col: &str) -> bool {
        self.frame.column(col).is_ok()
    }

    /// Get the number of rows
    pub fn height(&self) -> usize {
        self.frame.height()
    }

    /// Get the number of columns
    pub fn width(&self) -> usize {
        self.frame.width()
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Check if a column is a datetime or date type
    pub fn is_temporal_column(&self, col: &str) -> bool {
        self.column_values(col)
            .map(|s| matches!(s.dtype(), DataType::Datetime(_, _) | DataType::Date))
            .unwrap_or(false)
    }

    /// Get a column's values as f64
    /// Missing and non-numeric values become NaN
    /// Datetime/Date columns become Unix timestamps (seconds since epoch)
    pub fn column_as_f64(&self, col: &str) -> Result<Vec<f64>> {
        let series = self.column_values(col)?;

        if matches!(series.dtype(), DataType::Datetime(_, _) | DataType::Date) {
            let millis = series
                .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?
                .cast(&DataType::Int64)?;
            return Ok(millis
                .i64()?
                .into_iter()
                .map(|opt| opt.map(|ms| ms as f64 / 1000.0).unwrap_or(f64::NAN))
                .collect());
        }

        if let Ok(str_series) = series.str() {
            return Ok(str_series
                .into_iter()
                .map(|opt| opt.and_then(|s| s.trim().parse::<f64>().ok()).unwrap_or(f64::NAN))
                .collect());
        }

        match series.cast(&DataType::Float64) {
            Ok(s) => Ok(s
                .f64()?
                .into_iter()
                .map(|opt| opt.unwrap_or(f64::NAN))
                .collect()),
            Err(_) => Ok(vec![f64::NAN; series.len()]),
        }
    }

    /// Get a column's values rendered as text; missing values are `None`
    pub fn column_as_strings(&self, col: &str) -> Result<Vec<Option<String>>> {
        let series = self.column_values(col)?;

        if let Ok(str_series) = series.str() {
            return Ok(str_series
                .into_iter()
                .map(|opt| opt.map(str::to_string))
                .collect());
        }

        let str_series = series.cast(&DataType::String)?;
        Ok(str_series
            .str()?
            .into_iter()
            .map(|opt| opt.map(str::to_string))
            .collect())
    }

    /// Whether a column holds numbers (integer or float)
    pub fn is_numeric_column(&self, col: &str) -> bool {
        self.column_values(col)
            .map(|s| s.dtype().is_integer() || s.dtype().is_float())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_dataset_csv_loading() {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "x,y,z").unwrap();
        writeln!(file, "1,2,3").unwrap();
        writeln!(file, "4,5,6").unwrap();
        writeln!(file, "7,8,9").unwrap();
        file.flush().unwrap();

        let ds = Dataset::load(file.path()).unwrap();

        assert_eq!(ds.height(), 3);
        assert_eq!(ds.width(), 3);
        assert_eq!(ds.column_names(), vec!["x", "y", "z"]);
        assert_eq!(ds.column_as_f64("x").unwrap(), vec![1.0, 4.0, 7.0]);
        assert_eq!(ds.column_as_f64("y").unwrap(), vec![2.0, 5.0, 8.0]);
        assert!(ds.is_numeric_column("z"));
    }

    #[test]
    fn test_dataset_rejects_other_extensions() {
        let file = Builder::new().suffix(".parquet").tempfile().unwrap();
        let err = Dataset::load(file.path()).unwrap_err();
        assert!(matches!(err, AppError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_dataset_datetime_parsing() {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "date,value").unwrap();
        writeln!(file, "2024-01-01,10.5").unwrap();
        writeln!(file, "2024-01-02,15.3").unwrap();
        writeln!(file, "2024-01-03,12.8").unwrap();
        file.flush().unwrap();

        let ds = Dataset::load(file.path()).unwrap();
        assert!(ds.is_temporal_column("date"), "Date column should be detected as datetime");
        assert!(!ds.is_temporal_column("value"));

        let timestamps = ds.column_as_f64("date").unwrap();
        assert_eq!(timestamps, vec![1704067200.0, 1704153600.0, 1704240000.0]);
        assert_eq!(ds.column_as_f64("value").unwrap(), vec![10.5, 15.3, 12.8]);
    }

    #[test]
    fn test_strings_and_missing_values() {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "name,score").unwrap();
        writeln!(file, "a,1").unwrap();
        writeln!(file, "b,").unwrap();
        file.flush().unwrap();

        let ds = Dataset::load(file.path()).unwrap();
        assert_eq!(
            ds.column_as_strings("name").unwrap(),
            vec![Some("a".to_string()), Some("b".to_string())]
        );
        assert_eq!(
            ds.column_as_strings("score").unwrap(),
            vec![Some("1".to_string()), None]
        );
        let scores = ds.column_as_f64("score").unwrap();
        assert_eq!(scores[0], 1.0);
        assert!(scores[1].is_nan());
    }

    #[test]
    fn test_missing_column() {
        let frame = df!("a" => [1i64, 2]).unwrap();
        let ds = Dataset::from_dataframe(frame, None);
        assert!(matches!(
            ds.column_as_f64("b"),
            Err(AppError::ColumnNotFound { .. })
        ));
    }

    #[test]
    fn test_key_for_path_is_base_name() {
        assert_eq!(Dataset::key_for_path(Path::new("/tmp/data/sales.csv")), "sales.csv");
    }
}
