use std::path::{Path, PathBuf};

use crate::data::{ColumnAction, Dataset};
use crate::error::{AppError, Result};
use crate::plot::{self, PlotRequest};
use crate::settings::Settings;
use crate::state::AppState;

pub struct DataModeler {
    pub state: AppState,
}

impl DataModeler {
    /// Start with the settings stored at `settings_path`
    ///
    /// A settings file that cannot be read is reported and replaced by the
    /// defaults for this session.
    pub fn new(settings_path: PathBuf) -> Self {
        let (settings, load_error) = match Settings::load(&settings_path) {
            Ok(settings) => (settings, None),
            Err(e) => (Settings::default(), Some(e)),
        };

        let mut app = Self {
            state: AppState::new(settings, settings_path),
        };
        if let Some(e) = load_error {
            app.report(e);
        }
        app
    }

    /// Log a failure and queue it for the modal dialog
    pub fn report(&mut self, err: AppError) {
        log::warn!("{}", err);
        self.state.ui.set_error(&err);
    }

    fn save_settings(&self) -> Result<()> {
        self.state.settings.save(&self.state.settings_path)
    }

    /// Ask for a CSV file and load it
    pub fn pick_and_load_csv(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .set_title("Get data file")
            .set_directory(&self.state.settings.pathdata)
            .add_filter("CSV File", &["csv"])
            .pick_file()
        {
            if let Err(e) = self.load_csv(&path) {
                self.report(e);
            }
        }
    }

    /// Load a CSV into the registry under its base name and make it current
    pub fn load_csv(&mut self, path: &Path) -> Result<()> {
        let dataset = Dataset::load(path)?;
        let key = Dataset::key_for_path(path);
        log::info!(
            "Loaded '{}' ({} rows x {} columns)",
            key,
            dataset.height(),
            dataset.width()
        );

        self.state.registry.put(key.clone(), dataset);
        self.select_dataset(&key);

        // The data stays loaded even if the directory cannot be remembered
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            self.state.settings.pathdata = dir.to_path_buf();
            if let Err(e) = self.save_settings() {
                self.report(e);
            }
        }
        Ok(())
    }

    /// Show another loaded dataset in the grid and column lists
    pub fn select_dataset(&mut self, key: &str) {
        self.state.current = Some(key.to_string());
        self.state.ui.selected_columns.clear();
        self.refresh_columns();
    }

    /// Re-read column names after the current data changed
    pub fn refresh_columns(&mut self) {
        let columns = self.state.column_names();
        self.state.view.retain_columns(&columns);
        self.state
            .ui
            .selected_columns
            .retain(|c| columns.contains(c));
        self.state.ui.on_data_changed();
    }

    /// Run a context-menu action on the grid's selected columns
    pub fn apply_column_action(&mut self, action: ColumnAction) -> Result<()> {
        let key = self
            .state
            .current
            .clone()
            .ok_or_else(|| AppError::DatasetNotFound { key: String::new() })?;
        let dataset = self.state.registry.get_mut(&key)?;
        action.apply(dataset, &self.state.ui.selected_columns)?;
        self.refresh_columns();
        Ok(())
    }

    /// Plot request for the current selector values
    pub fn plot_request(&self) -> Option<PlotRequest> {
        Some(PlotRequest {
            kind: self.state.view.plot_kind,
            x_labels: self.state.view.x_columns.clone(),
            y_labels: self.state.view.y_columns.clone(),
            dataset: self.state.current.clone()?,
        })
    }

    /// Draw the selected plot onto the canvas
    pub fn plot_selected(&mut self) -> Result<()> {
        let Some(request) = self.plot_request() else {
            return Ok(());
        };
        plot::dispatch(&request, &self.state.registry, &mut self.state.canvas)
    }

    /// Grow or shrink the UI font and persist the new size
    pub fn change_font_size(&mut self, delta: i32) -> Result<()> {
        self.state.settings.adjust_font_size(delta);
        log::info!("New font size {}", self.state.settings.fontsize);
        self.save_settings()
    }
}
