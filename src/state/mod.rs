//! Application state management
//!
//! This module groups the shell's state into the loaded data, the persisted
//! settings, the chart being shown, and transient UI interaction state.

mod ui;
mod view;

pub use ui::{UiState, click_select};
pub use view::ViewState;

use std::path::PathBuf;

use crate::data::{Dataset, DatasetRegistry};
use crate::plot::Canvas;
use crate::settings::Settings;

/// Main application state container
pub struct AppState {
    /// Every dataset loaded this session
    pub registry: DatasetRegistry,

    /// Key of the dataset shown in the grid and used for plotting
    pub current: Option<String>,

    /// Persisted user settings
    pub settings: Settings,

    /// Where `settings` is written after each change
    pub settings_path: PathBuf,

    /// Chart drawn by the plot panel
    pub canvas: Canvas,

    /// Plot controls
    pub view: ViewState,

    /// UI interaction state
    pub ui: UiState,
}

impl AppState {
    pub fn new(settings: Settings, settings_path: PathBuf) -> Self {
        Self {
            registry: DatasetRegistry::new(),
            current: None,
            settings,
            settings_path,
            canvas: Canvas::placeholder(),
            view: ViewState::default(),
            ui: UiState::default(),
        }
    }

    /// Check if data is loaded
    pub fn has_data(&self) -> bool {
        self.current_dataset().is_some()
    }

    pub fn current_dataset(&self) -> Option<&Dataset> {
        self.current
            .as_deref()
            .and_then(|key| self.registry.get(key).ok())
    }

    /// Column names of the current dataset
    pub fn column_names(&self) -> Vec<String> {
        self.current_dataset()
            .map(|ds| ds.column_names())
            .unwrap_or_default()
    }
}
