#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use std::path::PathBuf;

use eframe::App;
use eframe::egui::{self, CentralPanel, Key, Modifiers, TopBottomPanel};
use egui_extras::{Size, StripBuilder};

mod app;
mod constants;
mod data;
mod error;
mod plot;
mod settings;
mod state;
mod ui;

use app::DataModeler;
use constants::layout::{CONTROL_PANEL_WIDTH, DATA_PANEL_HEIGHT};

/// Keyboard requests gathered from one frame's input
#[derive(Default)]
struct Shortcuts {
    font_delta: i32,
    open_file: bool,
    dropped: Vec<PathBuf>,
}

impl DataModeler {
    /// Scale every text style from the configured font size
    fn apply_font_size(&mut self, ctx: &egui::Context) {
        let size = self.state.settings.fontsize;
        if self.state.view.applied_font_size == Some(size) {
            return;
        }

        let base = size as f32;
        ctx.all_styles_mut(|style| {
            for (text_style, font_id) in style.text_styles.iter_mut() {
                font_id.size = match text_style {
                    egui::TextStyle::Heading => base * 1.4,
                    egui::TextStyle::Small => base * 0.75,
                    _ => base,
                };
            }
        });
        self.state.view.applied_font_size = Some(size);
    }

    fn read_shortcuts(ctx: &egui::Context) -> Shortcuts {
        ctx.input_mut(|i| {
            let mut shortcuts = Shortcuts {
                open_file: i.consume_key(Modifiers::COMMAND, Key::O),
                ..Shortcuts::default()
            };
            if !i.modifiers.command {
                if i.key_pressed(Key::Plus) || i.key_pressed(Key::Equals) {
                    shortcuts.font_delta += 1;
                }
                if i.key_pressed(Key::Minus) {
                    shortcuts.font_delta -= 1;
                }
            }
            shortcuts.dropped = i
                .raw
                .dropped_files
                .iter()
                .filter_map(|f| f.path.clone())
                .collect();
            shortcuts
        })
    }
}

impl App for DataModeler {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        profiling::finish_frame!();

        let shortcuts = Self::read_shortcuts(ctx);
        if shortcuts.font_delta != 0 {
            if let Err(e) = self.change_font_size(shortcuts.font_delta) {
                self.report(e);
            }
        }
        if shortcuts.open_file {
            self.pick_and_load_csv();
        }
        for path in shortcuts.dropped {
            if let Err(e) = self.load_csv(&path) {
                self.report(e);
            }
        }

        self.apply_font_size(ctx);

        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            ui::render_toolbar(self, ui);
        });

        // Main layout using StripBuilder
        CentralPanel::default().show(ctx, |ui| {
            StripBuilder::new(ui)
                .size(Size::exact(CONTROL_PANEL_WIDTH))
                .size(Size::remainder())
                .horizontal(|mut strip| {
                    // Left panel: plot controls
                    strip.cell(|ui| {
                        egui::ScrollArea::vertical()
                            .id_salt("controls")
                            .show(ui, |ui| ui::render_controls_panel(self, ctx, ui));
                    });

                    // Plot above, data grid below
                    strip.cell(|ui| {
                        StripBuilder::new(ui)
                            .size(Size::remainder())
                            .size(Size::exact(DATA_PANEL_HEIGHT))
                            .vertical(|mut strip| {
                                strip.cell(|ui| ui::render_plot(self, ui));
                                strip.cell(|ui| {
                                    ui.separator();
                                    ui::render_data_table_panel(self, ctx, ui);
                                });
                            });
                    });
                });
        });

        ui::render_message_dialog(self, ctx);
    }
}

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    log::info!("Starting Data Modeler v{}", env!("CARGO_PKG_VERSION"));

    #[cfg(feature = "profile-with-puffin")]
    let _puffin_server = {
        puffin::set_scopes_on(true);
        let addr = format!("127.0.0.1:{}", puffin_http::DEFAULT_PORT);
        match puffin_http::Server::new(&addr) {
            Ok(server) => {
                log::info!("Puffin server listening on {}", addr);
                Some(server)
            }
            Err(e) => {
                log::warn!("Could not start puffin server: {}", e);
                None
            }
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 500.0])
            .with_title("Data Modeler")
            .with_drag_and_drop(true),
        ..Default::default()
    };

    let settings_path = PathBuf::from(constants::config::SETTINGS_FILE);
    eframe::run_native(
        "Data Modeler",
        options,
        Box::new(|_| Ok(Box::new(DataModeler::new(settings_path)))),
    )
}
