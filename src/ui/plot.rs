use chrono::{DateTime, Utc};
use egui_plot::{BoxElem, BoxPlot, BoxSpread, HLine, Line, Plot, PlotUi, Points, Polygon};

use crate::app::DataModeler;
use crate::constants::plot::{DASH_LENGTH, GROUP_WIDTH, MARKER_RADIUS};
use crate::plot::{Canvas, SeriesStyle, Trace};

/// Color of the `index`-th series, cycling through a ten-color palette
pub fn series_color(index: usize) -> eframe::egui::Color32 {
    let colors = [
        eframe::egui::Color32::from_rgb(31, 119, 180),  // Blue
        eframe::egui::Color32::from_rgb(255, 127, 14),  // Orange
        eframe::egui::Color32::from_rgb(44, 160, 44),   // Green
        eframe::egui::Color32::from_rgb(214, 39, 40),   // Red
        eframe::egui::Color32::from_rgb(148, 103, 189), // Purple
        eframe::egui::Color32::from_rgb(140, 86, 75),   // Brown
        eframe::egui::Color32::from_rgb(227, 119, 194), // Pink
        eframe::egui::Color32::from_rgb(127, 127, 127), // Gray
        eframe::egui::Color32::from_rgb(188, 189, 34),  // Olive
        eframe::egui::Color32::from_rgb(23, 190, 207),  // Cyan
    ];
    colors[index % colors.len()]
}

const REFERENCE_COLOR: eframe::egui::Color32 = eframe::egui::Color32::from_rgb(255, 105, 180);

/// Render the canvas into the main plot area
pub fn render_plot(app: &mut DataModeler, ui: &mut eframe::egui::Ui) {
    profiling::scope!("render_plot");

    let canvas = &app.state.canvas;

    if let Some(title) = &canvas.title {
        ui.vertical_centered(|ui| {
            ui.heading(title);
        });
    }

    let mut plot = Plot::new("plot")
        .show_grid(app.state.view.show_grid)
        .height(ui.available_height().max(200.0));

    if app.state.view.fitted_revision != Some(canvas.revision()) {
        plot = plot.reset();
        app.state.view.fitted_revision = Some(canvas.revision());
    }

    if canvas.show_legend {
        plot = plot.legend(egui_plot::Legend::default().position(egui_plot::Corner::RightTop));
    }
    if let Some(label) = &canvas.x_label {
        plot = plot.x_axis_label(label.clone());
    }
    if let Some(label) = &canvas.y_label {
        plot = plot.y_axis_label(label.clone());
    }

    if !canvas.categories.is_empty() {
        let categories = canvas.categories.clone();
        plot = plot.x_axis_formatter(move |mark, _range| category_at(&categories, mark.value));
    } else if canvas.x_temporal {
        plot = plot
            .x_axis_formatter(|mark, _range| {
                timestamp_label(mark.value, "%Y-%m-%d\n%H:%M:%S")
                    .unwrap_or_else(|| format!("{:.2}", mark.value))
            })
            .label_formatter(|name, value| {
                let x = timestamp_label(value.x, "%Y-%m-%d %H:%M:%S")
                    .unwrap_or_else(|| format!("{:.3}", value.x));
                if name.is_empty() {
                    format!("{}\n{:.2}", x, value.y)
                } else {
                    format!("{}\n{}\n{:.2}", name, x, value.y)
                }
            });
    }

    plot.show(ui, |plot_ui| draw_traces(plot_ui, canvas));
}

/// Format seconds since the Unix epoch, keeping fractional seconds
fn timestamp_label(value: f64, format: &str) -> Option<String> {
    let secs = value.floor() as i64;
    let nanos = ((value.fract() * 1_000_000_000.0) as u32).min(999_999_999);
    DateTime::<Utc>::from_timestamp(secs, nanos).map(|dt| dt.format(format).to_string())
}

/// Tick text for a categorical axis: only integer positions carry a label
fn category_at(categories: &[String], value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    categories.get(rounded as usize).cloned().unwrap_or_default()
}

fn draw_traces(plot_ui: &mut PlotUi, canvas: &Canvas) {
    let mut series_index = 0;

    for trace in canvas.traces() {
        match trace {
            Trace::Series {
                name,
                points,
                style,
            } => {
                let color = series_color(series_index);
                series_index += 1;
                match style {
                    SeriesStyle::Solid => {
                        plot_ui.line(Line::new(name.as_str(), points.clone()).color(color));
                    }
                    SeriesStyle::DashedMarkers => {
                        plot_ui.line(
                            Line::new(name.as_str(), points.clone())
                                .color(color)
                                .style(egui_plot::LineStyle::Dashed { length: DASH_LENGTH }),
                        );
                        plot_ui.points(
                            Points::new(name.as_str(), points.clone())
                                .radius(MARKER_RADIUS)
                                .color(color),
                        );
                    }
                }
            }
            Trace::Reference { y } => {
                plot_ui.hline(
                    HLine::new("", *y)
                        .color(REFERENCE_COLOR)
                        .style(egui_plot::LineStyle::Dashed { length: DASH_LENGTH }),
                );
            }
            Trace::Box {
                position,
                category,
                summary,
            } => {
                let color = series_color(*position as usize);
                let spread = BoxSpread::new(
                    summary.lower_whisker,
                    summary.q1,
                    summary.median,
                    summary.q3,
                    summary.upper_whisker,
                );
                let elem = BoxElem::new(*position, spread)
                    .box_width(GROUP_WIDTH)
                    .name(category.as_str());
                plot_ui.box_plot(BoxPlot::new(category.as_str(), vec![elem]).color(color));

                if !summary.outliers.is_empty() {
                    let outliers: Vec<[f64; 2]> =
                        summary.outliers.iter().map(|&v| [*position, v]).collect();
                    plot_ui.points(
                        Points::new(category.as_str(), outliers)
                            .radius(MARKER_RADIUS)
                            .shape(egui_plot::MarkerShape::Diamond)
                            .color(color),
                    );
                }
            }
            Trace::Violin {
                position,
                category,
                profile,
                median,
            } => {
                let color = series_color(*position as usize);
                let half = GROUP_WIDTH / 2.0;
                let right = profile.points.iter().map(|&[v, d]| [*position + half * d, v]);
                let left = profile
                    .points
                    .iter()
                    .rev()
                    .map(|&[v, d]| [*position - half * d, v]);
                let outline: Vec<[f64; 2]> = right.chain(left).collect();

                plot_ui.polygon(
                    Polygon::new(category.as_str(), outline)
                        .fill_color(color.gamma_multiply(0.5))
                        .stroke(eframe::egui::Stroke::new(1.0, color)),
                );
                plot_ui.points(
                    Points::new(category.as_str(), vec![[*position, *median]])
                        .radius(MARKER_RADIUS)
                        .color(eframe::egui::Color32::WHITE),
                );
            }
        }
    }
}
