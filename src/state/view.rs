//! Plot control state

use crate::plot::PlotKind;

/// View state holds the plot selector values and display toggles
#[derive(Debug, Clone)]
pub struct ViewState {
    /// Chart type picked in the selector
    pub plot_kind: PlotKind,

    /// Columns selected in the X list, in click order
    pub x_columns: Vec<String>,

    /// Columns selected in the Y list, in click order
    pub y_columns: Vec<String>,

    /// Grid visibility
    pub show_grid: bool,

    /// Canvas revision the plot bounds were last fitted to
    pub fitted_revision: Option<u64>,

    /// Font size currently applied to the egui style
    pub applied_font_size: Option<i32>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            plot_kind: PlotKind::default(),
            x_columns: Vec::new(),
            y_columns: Vec::new(),
            show_grid: true,
            fitted_revision: None,
            applied_font_size: None,
        }
    }
}

impl ViewState {
    /// Drop selections that name columns no longer present
    pub fn retain_columns(&mut self, columns: &[String]) {
        self.x_columns.retain(|c| columns.contains(c));
        self.y_columns.retain(|c| columns.contains(c));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retain_columns() {
        let mut view = ViewState {
            x_columns: vec!["t".to_string(), "gone".to_string()],
            y_columns: vec!["gone".to_string()],
            ..ViewState::default()
        };
        view.retain_columns(&["t".to_string(), "a".to_string()]);
        assert_eq!(view.x_columns, vec!["t"]);
        assert!(view.y_columns.is_empty());
    }
}
