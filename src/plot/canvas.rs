//! Retained description of the chart the plot panel draws every frame

use crate::data::stats::{BoxSummary, ViolinProfile};

/// How a data series is stroked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesStyle {
    /// Plain line
    Solid,
    /// Dashed line with a marker at every point
    DashedMarkers,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Trace {
    /// A named line; the legend entry is its name
    Series {
        name: String,
        points: Vec<[f64; 2]>,
        style: SeriesStyle,
    },
    /// Horizontal reference line across the whole plot
    Reference { y: f64 },
    /// Box of one category, centered at `position` on the X axis
    Box {
        position: f64,
        category: String,
        summary: BoxSummary,
    },
    /// Violin of one category, centered at `position` on the X axis
    Violin {
        position: f64,
        category: String,
        profile: ViolinProfile,
        median: f64,
    },
}

#[derive(Debug, Clone, Default)]
pub struct Canvas {
    pub title: Option<String>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    /// X values are Unix timestamps in seconds
    pub x_temporal: bool,
    /// Tick labels for integer X positions
    pub categories: Vec<String>,
    pub show_legend: bool,
    traces: Vec<Trace>,
    /// Bumped on every clear so the view can refit its bounds
    revision: u64,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canvas shown before anything has been plotted
    pub fn placeholder() -> Self {
        let mut canvas = Self::new();
        let ys = [10.0, 1.0, 20.0, 3.0, 40.0];
        canvas.push(Trace::Series {
            name: String::new(),
            points: ys.iter().enumerate().map(|(x, &y)| [x as f64, y]).collect(),
            style: SeriesStyle::Solid,
        });
        canvas
    }

    /// Remove every trace and label
    pub fn clear(&mut self) {
        let revision = self.revision + 1;
        *self = Self {
            revision,
            ..Self::default()
        };
    }

    pub fn push(&mut self, trace: Trace) {
        self.traces.push(trace);
    }

    pub fn traces(&self) -> &[Trace] {
        &self.traces
    }

    /// Number of data series (reference lines, boxes and violins excluded)
    pub fn series_count(&self) -> usize {
        self.traces
            .iter()
            .filter(|t| matches!(t, Trace::Series { .. }))
            .count()
    }

    pub fn series_names(&self) -> Vec<&str> {
        self.traces
            .iter()
            .filter_map(|t| match t {
                Trace::Series { name, .. } => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }
}
