//! UI interaction state

use crate::data::Dataset;
use crate::error::AppError;

/// Message waiting in the modal error dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorNotice {
    pub title: String,
    pub message: String,
}

impl From<&AppError> for ErrorNotice {
    fn from(err: &AppError) -> Self {
        Self {
            title: err.title().to_string(),
            message: err.user_message(),
        }
    }
}

/// Cell text of the current dataset, rebuilt whenever the data changes
#[derive(Debug, Clone, Default)]
pub struct TableCache {
    /// Column headers in table order
    pub headers: Vec<String>,
    /// Column-major cell text
    pub cells: Vec<Vec<String>>,
    /// Number of rows
    pub rows: usize,
    /// Data version the cache was built from
    version: Option<u64>,
}

impl TableCache {
    /// Check if cache is valid for the current data version
    pub fn is_valid(&self, data_version: u64) -> bool {
        self.version == Some(data_version)
    }

    pub fn rebuild(&mut self, dataset: Option<&Dataset>, data_version: u64) {
        profiling::scope!("rebuild_table_cache");

        self.version = Some(data_version);
        let Some(ds) = dataset else {
            self.headers.clear();
            self.cells.clear();
            self.rows = 0;
            return;
        };

        self.headers = ds.column_names();
        self.rows = ds.height();
        self.cells = self
            .headers
            .iter()
            .map(|col| match ds.column_as_strings(col) {
                Ok(values) => values.into_iter().map(Option::unwrap_or_default).collect(),
                Err(e) => {
                    log::warn!("Cannot render column '{}': {}", col, e);
                    vec![String::new(); ds.height()]
                }
            })
            .collect();
    }

    pub fn cell(&self, col: usize, row: usize) -> &str {
        self.cells
            .get(col)
            .and_then(|c| c.get(row))
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// Apply a click to a multi-select list: a plain click selects only `item`,
/// `toggle` (Ctrl held) adds or removes it
pub fn click_select(selection: &mut Vec<String>, item: &str, toggle: bool) {
    if toggle {
        if let Some(pos) = selection.iter().position(|c| c == item) {
            selection.remove(pos);
        } else {
            selection.push(item.to_string());
        }
    } else {
        *selection = vec![item.to_string()];
    }
}

/// UI state manages grid selection, the error dialog and cache versions
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Error shown in the modal dialog until dismissed
    pub error: Option<ErrorNotice>,

    /// Columns selected in the data grid header, in click order
    pub selected_columns: Vec<String>,

    /// Rendered cell text of the current dataset
    pub table: TableCache,

    /// Data version counter (increments on load, transform and dataset switch)
    pub data_version: u64,
}

impl UiState {
    /// Increment data version (call after the current data changed)
    pub fn on_data_changed(&mut self) {
        self.data_version += 1;
    }

    /// Set an error message
    pub fn set_error(&mut self, err: &AppError) {
        self.error = Some(ErrorNotice::from(err));
    }

    /// Clear the current error message
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Grid header click
    pub fn click_column(&mut self, column: &str, toggle: bool) {
        click_select(&mut self.selected_columns, column, toggle);
    }

    pub fn is_column_selected(&self, column: &str) -> bool {
        self.selected_columns.iter().any(|c| c == column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    #[test]
    fn test_click_column_selection() {
        let mut ui = UiState::default();
        ui.click_column("a", false);
        ui.click_column("b", true);
        assert_eq!(ui.selected_columns, vec!["a", "b"]);

        ui.click_column("a", true);
        assert_eq!(ui.selected_columns, vec!["b"]);

        ui.click_column("c", false);
        assert_eq!(ui.selected_columns, vec!["c"]);
        assert!(ui.is_column_selected("c"));
    }

    #[test]
    fn test_table_cache_rebuild() {
        let frame = df!("n" => [Some(1i64), None], "s" => ["p", "q"]).unwrap();
        let ds = Dataset::from_dataframe(frame, None);

        let mut cache = TableCache::default();
        assert!(!cache.is_valid(0));
        cache.rebuild(Some(&ds), 3);
        assert!(cache.is_valid(3));
        assert_eq!(cache.headers, vec!["n", "s"]);
        assert_eq!(cache.rows, 2);
        assert_eq!(cache.cell(0, 0), "1");
        assert_eq!(cache.cell(0, 1), "");
        assert_eq!(cache.cell(1, 1), "q");
        assert_eq!(cache.cell(5, 5), "");

        cache.rebuild(None, 4);
        assert_eq!(cache.rows, 0);
        assert!(cache.headers.is_empty());
    }

    #[test]
    fn test_error_notice_from_error() {
        let mut ui = UiState::default();
        ui.set_error(&AppError::SelectionCount { actual: 2 });
        let notice = ui.error.clone().unwrap();
        assert_eq!(notice.title, "Column Selection");
        assert_eq!(notice.message, "Must select exactly 1 column, got 2");
        ui.clear_error();
        assert!(ui.error.is_none());
    }
}
