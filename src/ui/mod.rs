mod controls;
mod data_table;
mod message_dialog;
mod plot;
mod toolbar;

pub use controls::render_controls_panel;
pub use data_table::render_data_table_panel;
pub use message_dialog::render_message_dialog;
pub use plot::{render_plot, series_color};
pub use toolbar::render_toolbar;
