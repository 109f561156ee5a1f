//! Application-wide constants and default values
//!
//! This module centralizes the magic numbers and default values used throughout
//! the application.

/// Settings defaults
pub mod settings {
    /// Font size (points) used when no settings file exists
    pub const DEFAULT_FONT_SIZE: i32 = 15;

    /// Data directory used when no settings file exists
    pub const DEFAULT_DATA_DIR: &str = "./";

    /// Smallest font size the +/- keys can reach
    pub const MIN_FONT_SIZE: i32 = 1;
}

/// Statistics defaults
pub mod stats {
    /// Multiplier on the IQR for box plot whiskers
    pub const WHISKER_IQR: f64 = 1.5;

    /// Number of evaluation points along a violin's density curve
    pub const KDE_GRID_SIZE: usize = 100;

    /// Bandwidths the violin extends past the data range
    pub const KDE_CUT: f64 = 2.0;
}

/// Plotting and visualization defaults
pub mod plot {
    /// Width of a box or violin along the category axis
    pub const GROUP_WIDTH: f64 = 0.8;

    /// Dash length for autocorrelation series
    pub const DASH_LENGTH: f32 = 6.0;

    /// Marker radius for autocorrelation points
    pub const MARKER_RADIUS: f32 = 3.0;
}

/// UI layout defaults
pub mod layout {
    /// Left panel (plot controls) default width
    pub const CONTROL_PANEL_WIDTH: f32 = 220.0;

    /// Data grid default height
    pub const DATA_PANEL_HEIGHT: f32 = 260.0;

    /// Data grid row height
    pub const TABLE_ROW_HEIGHT: f32 = 18.0;

    /// Table header row height
    pub const TABLE_HEADER_HEIGHT: f32 = 22.0;

    /// Height of each X/Y column list
    pub const COLUMN_LIST_HEIGHT: f32 = 160.0;
}

/// Data loading constants
pub mod data {
    /// Rows sampled when inferring the CSV schema
    pub const INFER_SCHEMA_ROWS: usize = 100;
}

/// Configuration file paths
pub mod config {
    /// Settings file name, resolved against the working directory
    pub const SETTINGS_FILE: &str = "settings.json";
}
