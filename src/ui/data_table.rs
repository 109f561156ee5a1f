use egui_extras::{Column, TableBuilder};

use crate::app::DataModeler;
use crate::constants::layout::{TABLE_HEADER_HEIGHT, TABLE_ROW_HEIGHT};
use crate::data::ColumnAction;

/// Render the data grid for the current dataset
///
/// Header clicks select columns (Ctrl+click toggles); right-clicking a header
/// opens the column actions, which run on the selected columns.
pub fn render_data_table_panel(
    app: &mut DataModeler,
    ctx: &eframe::egui::Context,
    ui: &mut eframe::egui::Ui,
) {
    profiling::scope!("render_data_table");

    let data_version = app.state.ui.data_version;
    if !app.state.ui.table.is_valid(data_version) {
        let mut table = std::mem::take(&mut app.state.ui.table);
        table.rebuild(app.state.current_dataset(), data_version);
        app.state.ui.table = table;
    }

    if app.state.ui.table.headers.is_empty() {
        ui.centered_and_justified(|ui| {
            ui.label("Load a CSV file (File > Load CSV, Ctrl+O, or drag and drop)");
        });
        return;
    }

    let ctrl_held = ctx.input(|i| i.modifiers.ctrl || i.modifiers.command);
    let mut clicked: Option<String> = None;
    let mut action: Option<ColumnAction> = None;

    let ui_state = &app.state.ui;
    let table = &ui_state.table;

    ui.horizontal(|ui| {
        ui.label(format!("{} rows x {} columns", table.rows, table.headers.len()));
        if !ui_state.selected_columns.is_empty() {
            ui.separator();
            ui.label(format!("Selected: {}", ui_state.selected_columns.join(", ")));
        }
    });
    ui.separator();

    eframe::egui::ScrollArea::horizontal().show(ui, |ui| {
        TableBuilder::new(ui)
            .striped(true)
            .cell_layout(eframe::egui::Layout::left_to_right(eframe::egui::Align::Center))
            .column(Column::initial(45.0).resizable(false))
            .columns(
                Column::initial(100.0).resizable(true).clip(true),
                table.headers.len(),
            )
            .header(TABLE_HEADER_HEIGHT, |mut header| {
                header.col(|ui| {
                    ui.strong("#");
                });
                for name in &table.headers {
                    header.col(|ui| {
                        let selected = ui_state.is_column_selected(name);
                        let label = eframe::egui::RichText::new(name).strong();
                        let response = ui.selectable_label(selected, label);
                        if response.clicked() {
                            clicked = Some(name.clone());
                        }
                        response.context_menu(|ui| {
                            for item in ColumnAction::all() {
                                if ui.button(item.label()).clicked() {
                                    action = Some(item);
                                    ui.close();
                                }
                            }
                        });
                    });
                }
            })
            .body(|body| {
                body.rows(TABLE_ROW_HEIGHT, table.rows, |mut row| {
                    let row_idx = row.index();
                    row.col(|ui| {
                        ui.label(format!("{}", row_idx + 1));
                    });
                    for col_idx in 0..table.headers.len() {
                        row.col(|ui| {
                            ui.label(table.cell(col_idx, row_idx));
                        });
                    }
                });
            });
    });

    if let Some(name) = clicked {
        app.state.ui.click_column(&name, ctrl_held);
    }
    if let Some(action) = action {
        if let Err(e) = app.apply_column_action(action) {
            app.report(e);
        }
    }
}
