//! Plot dispatch: turns a plot request into traces on the canvas

pub mod canvas;

pub use canvas::{Canvas, SeriesStyle, Trace};

use std::collections::HashMap;
use std::str::FromStr;

use crate::data::stats;
use crate::data::{Dataset, DatasetRegistry};
use crate::error::{AppError, Axis, Result};

/// Chart types offered by the plot-kind selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlotKind {
    #[default]
    Line,
    Autocorrelation,
    PartialAutocorrelation,
    Box,
    Violin,
}

impl PlotKind {
    pub const ALL: [PlotKind; 5] = [
        PlotKind::Line,
        PlotKind::Autocorrelation,
        PlotKind::PartialAutocorrelation,
        PlotKind::Box,
        PlotKind::Violin,
    ];

    /// Name shown in the selector and in error messages
    pub fn label(self) -> &'static str {
        match self {
            PlotKind::Line => "1D Plot",
            PlotKind::Autocorrelation => "Autocorrelation",
            PlotKind::PartialAutocorrelation => "Partial Autocorrelation",
            PlotKind::Box => "BoxPlot",
            PlotKind::Violin => "ViolinPlot",
        }
    }

    /// Validate the selections and draw onto an already cleared canvas
    fn draw(self, dataset: &Dataset, x: &[String], y: &[String], canvas: &mut Canvas) -> Result<()> {
        match self {
            PlotKind::Line => {
                let x = exactly_one(self, Axis::X, x)?;
                draw_lines(dataset, x, y, canvas)
            }
            PlotKind::Autocorrelation => draw_correlogram(dataset, y, canvas, self, stats::acf),
            PlotKind::PartialAutocorrelation => {
                draw_correlogram(dataset, y, canvas, self, stats::pacf)
            }
            PlotKind::Box | PlotKind::Violin => {
                let x = exactly_one(self, Axis::X, x)?;
                let y = exactly_one(self, Axis::Y, y)?;
                draw_distributions(self, dataset, x, y, canvas)
            }
        }
    }
}

impl FromStr for PlotKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        PlotKind::ALL
            .into_iter()
            .find(|kind| kind.label() == s)
            .ok_or_else(|| AppError::UnknownPlotKind(s.to_string()))
    }
}

impl std::fmt::Display for PlotKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything needed to draw one chart; built fresh for each Plot click
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotRequest {
    pub kind: PlotKind,
    pub x_labels: Vec<String>,
    pub y_labels: Vec<String>,
    pub dataset: String,
}

/// Clear the canvas and draw `request` onto it
///
/// The canvas is cleared before any validation, so a failed request leaves
/// it empty rather than showing the previous chart.
pub fn dispatch(request: &PlotRequest, registry: &DatasetRegistry, canvas: &mut Canvas) -> Result<()> {
    profiling::scope!("plot_dispatch");

    canvas.clear();
    let dataset = registry.get(&request.dataset)?;
    request
        .kind
        .draw(dataset, &request.x_labels, &request.y_labels, canvas)?;

    log::info!(
        "Drew {} of {:?} against {:?} from '{}'",
        request.kind,
        request.y_labels,
        request.x_labels,
        request.dataset
    );
    Ok(())
}

fn exactly_one<'a>(kind: PlotKind, axis: Axis, labels: &'a [String]) -> Result<&'a str> {
    match labels {
        [label] => Ok(label.as_str()),
        _ => Err(AppError::Arity {
            plot: kind.label(),
            axis,
            expected: 1,
            actual: labels.len(),
        }),
    }
}

/// Distinct values of a text column and the category index of every row
///
/// Numeric columns order their categories numerically, everything else by
/// first appearance. Missing values map to `None`.
fn categorize(dataset: &Dataset, column: &str) -> Result<(Vec<String>, Vec<Option<usize>>)> {
    let values = dataset.column_as_strings(column)?;

    let mut categories: Vec<String> = Vec::new();
    for value in values.iter().flatten() {
        if !categories.contains(value) {
            categories.push(value.clone());
        }
    }
    if dataset.is_numeric_column(column) {
        categories.sort_by(|a, b| {
            let a = a.parse::<f64>().unwrap_or(f64::NAN);
            let b = b.parse::<f64>().unwrap_or(f64::NAN);
            a.total_cmp(&b)
        });
    }

    let index: HashMap<&str, usize> = categories
        .iter()
        .enumerate()
        .map(|(i, c)| (c.as_str(), i))
        .collect();
    let rows = values
        .iter()
        .map(|v| v.as_deref().and_then(|v| index.get(v).copied()))
        .collect();
    Ok((categories, rows))
}

/// Column values as f64, refusing columns where nothing reads as a number
fn numeric_values(dataset: &Dataset, column: &str) -> Result<Vec<f64>> {
    let values = dataset.column_as_f64(column)?;
    if !values.is_empty() && values.iter().all(|v| !v.is_finite()) {
        return Err(AppError::NonNumeric {
            column: column.to_string(),
        });
    }
    Ok(values)
}

fn draw_lines(dataset: &Dataset, x: &str, ys: &[String], canvas: &mut Canvas) -> Result<()> {
    let xs: Vec<f64> = if dataset.is_numeric_column(x) || dataset.is_temporal_column(x) {
        canvas.x_temporal = dataset.is_temporal_column(x);
        dataset.column_as_f64(x)?
    } else {
        let (categories, rows) = categorize(dataset, x)?;
        canvas.categories = categories;
        rows.into_iter()
            .map(|row| row.map(|i| i as f64).unwrap_or(f64::NAN))
            .collect()
    };

    let columns = ys
        .iter()
        .map(|y| dataset.column_as_f64(y))
        .collect::<Result<Vec<_>>>()?;

    for (y, values) in ys.iter().zip(columns) {
        let points = xs
            .iter()
            .zip(values)
            .filter(|(xv, yv)| xv.is_finite() && yv.is_finite())
            .map(|(&xv, yv)| [xv, yv])
            .collect();
        canvas.push(Trace::Series {
            name: y.clone(),
            points,
            style: SeriesStyle::Solid,
        });
    }

    canvas.x_label = Some(x.to_string());
    canvas.show_legend = true;
    Ok(())
}

fn draw_correlogram(
    dataset: &Dataset,
    ys: &[String],
    canvas: &mut Canvas,
    kind: PlotKind,
    correlate: fn(&[f64], Option<usize>) -> Vec<f64>,
) -> Result<()> {
    let columns = ys
        .iter()
        .map(|y| numeric_values(dataset, y))
        .collect::<Result<Vec<_>>>()?;

    canvas.push(Trace::Reference { y: 0.0 });

    for (y, values) in ys.iter().zip(columns) {
        let points = correlate(&values, None)
            .into_iter()
            .enumerate()
            .map(|(lag, r)| [lag as f64, r])
            .collect();
        canvas.push(Trace::Series {
            name: y.clone(),
            points,
            style: SeriesStyle::DashedMarkers,
        });
    }

    canvas.title = Some(kind.label().to_string());
    canvas.x_label = Some("Lag".to_string());
    canvas.show_legend = true;
    Ok(())
}

fn draw_distributions(
    kind: PlotKind,
    dataset: &Dataset,
    x: &str,
    y: &str,
    canvas: &mut Canvas,
) -> Result<()> {
    let values = numeric_values(dataset, y)?;
    let (categories, rows) = categorize(dataset, x)?;
    let mut groups: Vec<Vec<f64>> = vec![Vec::new(); categories.len()];
    for (row, value) in rows.into_iter().zip(values) {
        if let Some(i) = row {
            groups[i].push(value);
        }
    }

    for (i, (category, group)) in categories.iter().zip(&groups).enumerate() {
        let Some(summary) = stats::box_summary(group) else {
            continue;
        };
        let position = i as f64;
        let trace = match kind {
            PlotKind::Violin => {
                let Some(profile) = stats::violin_profile(group) else {
                    continue;
                };
                Trace::Violin {
                    position,
                    category: category.clone(),
                    profile,
                    median: summary.median,
                }
            }
            _ => Trace::Box {
                position,
                category: category.clone(),
                summary,
            },
        };
        canvas.push(trace);
    }

    canvas.categories = categories;
    canvas.x_label = Some(x.to_string());
    canvas.y_label = Some(y.to_string());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn registry() -> DatasetRegistry {
        let frame = df!(
            "t" => [0i64, 1, 2, 3, 4, 5],
            "a" => [1.0, 3.0, 2.0, 5.0, 4.0, 6.0],
            "b" => [2.0, 2.5, 2.0, 3.0, 1.0, 0.5],
            "group" => ["x", "y", "x", "y", "z", "x"]
        )
        .unwrap();
        let mut registry = DatasetRegistry::new();
        registry.put("data.csv", Dataset::from_dataframe(frame, None));
        registry
    }

    fn request(kind: PlotKind, x: &[&str], y: &[&str]) -> PlotRequest {
        PlotRequest {
            kind,
            x_labels: x.iter().map(|s| s.to_string()).collect(),
            y_labels: y.iter().map(|s| s.to_string()).collect(),
            dataset: "data.csv".to_string(),
        }
    }

    fn references(canvas: &Canvas) -> usize {
        canvas
            .traces()
            .iter()
            .filter(|t| matches!(t, Trace::Reference { .. }))
            .count()
    }

    #[test]
    fn test_line_draws_one_series_per_y() {
        let registry = registry();
        for ys in [vec![], vec!["a"], vec!["a", "b"]] {
            let mut canvas = Canvas::placeholder();
            canvas.push(Trace::Reference { y: 0.0 });

            dispatch(&request(PlotKind::Line, &["t"], &ys), &registry, &mut canvas).unwrap();
            assert_eq!(canvas.series_count(), ys.len());
            assert_eq!(canvas.series_names(), ys);
            assert_eq!(references(&canvas), 0, "nothing stale survives");
            assert_eq!(canvas.x_label.as_deref(), Some("t"));
        }
    }

    #[test]
    fn test_line_points() {
        let registry = registry();
        let mut canvas = Canvas::new();
        dispatch(&request(PlotKind::Line, &["t"], &["a"]), &registry, &mut canvas).unwrap();
        match &canvas.traces()[0] {
            Trace::Series { points, style, .. } => {
                assert_eq!(points[0], [0.0, 1.0]);
                assert_eq!(points[5], [5.0, 6.0]);
                assert_eq!(*style, SeriesStyle::Solid);
            }
            other => panic!("unexpected trace {:?}", other),
        }
    }

    #[test]
    fn test_line_requires_one_x() {
        let registry = registry();
        for xs in [vec![], vec!["t", "a"]] {
            let mut canvas = Canvas::placeholder();
            let err = dispatch(&request(PlotKind::Line, &xs, &["a"]), &registry, &mut canvas)
                .unwrap_err();
            assert_eq!(
                err.user_message(),
                format!("1D Plot needs 1 x-argument, got {}", xs.len())
            );
            assert!(canvas.is_empty(), "failed plot leaves the canvas cleared");
        }
    }

    #[test]
    fn test_line_with_text_x_uses_categories() {
        let registry = registry();
        let mut canvas = Canvas::new();
        dispatch(&request(PlotKind::Line, &["group"], &["a"]), &registry, &mut canvas).unwrap();
        assert_eq!(canvas.categories, vec!["x", "y", "z"]);
        match &canvas.traces()[0] {
            Trace::Series { points, .. } => assert_eq!(points[4], [2.0, 4.0]),
            other => panic!("unexpected trace {:?}", other),
        }
    }

    #[test]
    fn test_correlograms_always_draw_zero_line() {
        let registry = registry();
        for kind in [PlotKind::Autocorrelation, PlotKind::PartialAutocorrelation] {
            for (xs, ys) in [(vec![], vec![]), (vec!["t", "b"], vec!["a"]), (vec![], vec!["a", "b"])] {
                let mut canvas = Canvas::placeholder();
                dispatch(&request(kind, &xs, &ys), &registry, &mut canvas).unwrap();
                assert_eq!(references(&canvas), 1);
                assert!(matches!(canvas.traces()[0], Trace::Reference { y } if y == 0.0));
                assert_eq!(canvas.series_count(), ys.len());
                assert_eq!(canvas.title.as_deref(), Some(kind.label()));
            }
        }
    }

    #[test]
    fn test_autocorrelation_series_starts_at_one() {
        let registry = registry();
        let mut canvas = Canvas::new();
        dispatch(&request(PlotKind::Autocorrelation, &[], &["a"]), &registry, &mut canvas).unwrap();
        match &canvas.traces()[1] {
            Trace::Series { points, style, .. } => {
                assert_eq!(points[0], [0.0, 1.0]);
                assert_eq!(points.len(), 6);
                assert_eq!(*style, SeriesStyle::DashedMarkers);
            }
            other => panic!("unexpected trace {:?}", other),
        }
    }

    #[test]
    fn test_box_and_violin_arity() {
        let registry = registry();
        for kind in [PlotKind::Box, PlotKind::Violin] {
            let bad: [(&[&str], &[&str]); 4] = [
                (&[], &["a"]),
                (&["group", "t"], &["a"]),
                (&["group"], &[]),
                (&["group"], &["a", "b"]),
            ];
            for (xs, ys) in bad {
                let mut canvas = Canvas::placeholder();
                let err = dispatch(&request(kind, xs, ys), &registry, &mut canvas).unwrap_err();
                assert!(matches!(err, AppError::Arity { .. }));
                assert!(err.user_message().starts_with(kind.label()));
                assert!(canvas.is_empty());
            }

            let mut canvas = Canvas::new();
            dispatch(&request(kind, &["group"], &["a"]), &registry, &mut canvas).unwrap();
            assert_eq!(canvas.traces().len(), 3);
            assert_eq!(canvas.categories, vec!["x", "y", "z"]);
        }
    }

    #[test]
    fn test_y_arity_message_names_the_plot() {
        let registry = registry();
        let mut canvas = Canvas::new();
        let err = dispatch(&request(PlotKind::Violin, &["group"], &["a", "b"]), &registry, &mut canvas)
            .unwrap_err();
        assert_eq!(err.user_message(), "ViolinPlot needs 1 y-argument, got 2");
    }

    #[test]
    fn test_box_groups_by_category() {
        let registry = registry();
        let mut canvas = Canvas::new();
        dispatch(&request(PlotKind::Box, &["group"], &["a"]), &registry, &mut canvas).unwrap();

        let Trace::Box { position, category, summary } = &canvas.traces()[0] else {
            panic!("expected a box");
        };
        // x rows hold a = 1, 2, 6
        assert_eq!(*position, 0.0);
        assert_eq!(category, "x");
        assert_eq!(summary.median, 2.0);
        assert_eq!(canvas.y_label.as_deref(), Some("a"));
    }

    #[test]
    fn test_numeric_categories_sort_numerically() {
        let frame = df!("k" => [10i64, 2, 10, 2, 1], "v" => [1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        let mut registry = DatasetRegistry::new();
        registry.put("data.csv", Dataset::from_dataframe(frame, None));

        let mut canvas = Canvas::new();
        dispatch(&request(PlotKind::Violin, &["k"], &["v"]), &registry, &mut canvas).unwrap();
        assert_eq!(canvas.categories, vec!["1", "2", "10"]);
    }

    #[test]
    fn test_text_values_are_not_distributions() {
        let registry = registry();
        let mut canvas = Canvas::new();
        let err = dispatch(&request(PlotKind::Box, &["t"], &["group"]), &registry, &mut canvas)
            .unwrap_err();
        assert!(matches!(err, AppError::NonNumeric { .. }));
    }

    #[test]
    fn test_text_values_have_no_correlogram() {
        let registry = registry();
        for kind in [PlotKind::Autocorrelation, PlotKind::PartialAutocorrelation] {
            let mut canvas = Canvas::placeholder();
            let err = dispatch(&request(kind, &[], &["a", "group"]), &registry, &mut canvas)
                .unwrap_err();
            assert!(matches!(err, AppError::NonNumeric { ref column } if column == "group"));
            assert!(canvas.is_empty());
        }
    }

    #[test]
    fn test_missing_later_y_leaves_canvas_empty() {
        let registry = registry();
        let mut canvas = Canvas::placeholder();
        let req = request(PlotKind::Line, &["t"], &["a", "b", "missing"]);
        let err = dispatch(&req, &registry, &mut canvas).unwrap_err();
        assert!(matches!(err, AppError::ColumnNotFound { ref column } if column == "missing"));
        assert!(canvas.is_empty());
        assert!(canvas.series_names().is_empty());
    }

    #[test]
    fn test_unknown_dataset_and_column() {
        let registry = registry();
        let mut canvas = Canvas::placeholder();
        let mut req = request(PlotKind::Line, &["t"], &["missing"]);
        assert!(matches!(
            dispatch(&req, &registry, &mut canvas),
            Err(AppError::ColumnNotFound { .. })
        ));

        req.dataset = "other.csv".to_string();
        assert!(matches!(
            dispatch(&req, &registry, &mut canvas),
            Err(AppError::DatasetNotFound { .. })
        ));
        assert!(canvas.is_empty());
    }

    #[test]
    fn test_plot_kind_labels_round_trip() {
        for kind in PlotKind::ALL {
            assert_eq!(kind.label().parse::<PlotKind>().unwrap(), kind);
        }
        assert!(matches!(
            "Scatter".parse::<PlotKind>(),
            Err(AppError::UnknownPlotKind(_))
        ));
    }
}
