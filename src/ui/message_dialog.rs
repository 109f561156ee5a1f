use crate::app::DataModeler;

/// Modal dialog for the pending error, if any
pub fn render_message_dialog(app: &mut DataModeler, ctx: &eframe::egui::Context) {
    let Some(notice) = app.state.ui.error.clone() else {
        return;
    };

    let modal = eframe::egui::Modal::new(eframe::egui::Id::new("message_dialog")).show(ctx, |ui| {
        ui.set_max_width(360.0);
        ui.heading(format!("⚠ {}", notice.title));
        ui.separator();
        ui.label(&notice.message);
        ui.add_space(8.0);
        ui.vertical_centered(|ui| ui.button("OK").clicked()).inner
    });

    let dismissed = modal.inner
        || modal.should_close()
        || ctx.input(|i| i.key_pressed(eframe::egui::Key::Enter));
    if dismissed {
        app.state.ui.clear_error();
    }
}
