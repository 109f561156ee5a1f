use crate::app::DataModeler;
use crate::constants::layout::COLUMN_LIST_HEIGHT;
use crate::plot::PlotKind;
use crate::state::click_select;
use crate::ui::series_color;

/// Render the plot controls (left sidebar): dataset, X and Y columns, plot type
pub fn render_controls_panel(
    app: &mut DataModeler,
    ctx: &eframe::egui::Context,
    ui: &mut eframe::egui::Ui,
) {
    let ctrl_held = ctx.input(|i| i.modifiers.ctrl || i.modifiers.command);

    ui.heading("Dataset");
    let current = app.state.current.clone().unwrap_or_default();
    let mut picked = None;
    eframe::egui::ComboBox::from_id_salt("dataset")
        .selected_text(&current)
        .width(ui.available_width())
        .show_ui(ui, |ui| {
            for key in app.state.registry.keys() {
                if ui.selectable_label(*key == current, key).clicked() && *key != current {
                    picked = Some(key.clone());
                }
            }
        });
    if let Some(key) = picked {
        app.select_dataset(&key);
    }

    let columns = app.state.column_names();

    ui.separator();
    ui.heading("X");
    column_list(ui, "x_columns", &columns, &mut app.state.view.x_columns, ctrl_held, false);

    ui.separator();
    ui.heading("Y");
    column_list(ui, "y_columns", &columns, &mut app.state.view.y_columns, ctrl_held, true);

    ui.separator();
    ui.heading("Plot");
    eframe::egui::ComboBox::from_id_salt("plot_kind")
        .selected_text(app.state.view.plot_kind.label())
        .width(ui.available_width())
        .show_ui(ui, |ui| {
            for kind in PlotKind::ALL {
                ui.selectable_value(&mut app.state.view.plot_kind, kind, kind.label());
            }
        });

    ui.add_space(4.0);
    ui.horizontal(|ui| {
        let plot = ui.add_enabled(app.state.has_data(), eframe::egui::Button::new("📈 Plot"));
        if plot.clicked() {
            if let Err(e) = app.plot_selected() {
                app.report(e);
            }
        }
        ui.checkbox(&mut app.state.view.show_grid, "Grid");
    });
}

/// Multi-select column list; click selects one column, Ctrl+click toggles
fn column_list(
    ui: &mut eframe::egui::Ui,
    id: &str,
    columns: &[String],
    selection: &mut Vec<String>,
    ctrl_held: bool,
    mark_colors: bool,
) {
    eframe::egui::ScrollArea::vertical()
        .id_salt(id)
        .max_height(COLUMN_LIST_HEIGHT)
        .auto_shrink([false, true])
        .show(ui, |ui| {
            for column in columns {
                let position = selection.iter().position(|c| c == column);
                let response = ui.selectable_label(position.is_some(), column);

                if let (true, Some(pos)) = (mark_colors, position) {
                    ui.painter().circle_filled(
                        response.rect.right_center() - eframe::egui::vec2(8.0, 0.0),
                        4.0,
                        series_color(pos),
                    );
                }

                if response.clicked() {
                    click_select(selection, column, ctrl_held);
                }
            }
        });
}
