use crate::app::DataModeler;

/// Render the menu bar along the top of the window
pub fn render_toolbar(app: &mut DataModeler, ui: &mut eframe::egui::Ui) {
    eframe::egui::MenuBar::new().ui(ui, |ui| {
        ui.menu_button("File", |ui| {
            let load = eframe::egui::Button::new("📁 Load CSV").shortcut_text("Ctrl+O");
            if ui.add(load).clicked() {
                ui.close();
                app.pick_and_load_csv();
            }
        });

        ui.separator();

        // Display current file using Option combinator
        app.state
            .current_dataset()
            .and_then(|ds| ds.file_path())
            .map(|file| ui.label(format!("File: {}", file.display())));

        ui.with_layout(
            eframe::egui::Layout::right_to_left(eframe::egui::Align::Center),
            |ui| {
                ui.label(format!("Font {} (+/-)", app.state.settings.fontsize));
            },
        );
    });
}
