use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Points
// ---------------------------------------------------------------------------

/// One projected `(year, value)` pair. `value` is `None` for a missing cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub year: i32,
    pub value: Option<f64>,
}

/// The most recent point with a value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatestPoint {
    pub year: i32,
    pub value: f64,
}

/// What to do with points whose value is missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NullPolicy {
    /// Keep them; renderers draw a gap.
    #[default]
    Retain,
    /// Drop them from `points`.
    Skip,
}

// ---------------------------------------------------------------------------
// Layout configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AxisSpec {
    pub title: String,
    /// Offer a range brush / slider over this axis.
    pub range_slider: bool,
    pub show_grid: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LegendOrientation {
    Horizontal,
    Vertical,
}

/// Legend placement is always the top-right corner, above the plot area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendSpec {
    pub title: String,
    pub orientation: LegendOrientation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineShape {
    Linear,
    Spline,
}

/// Hover tooltip showing the exact point under the cursor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HoverSpec {
    pub x_label: String,
    pub y_label: String,
    /// One tooltip for all series at the hovered x position.
    pub unified: bool,
}

impl HoverSpec {
    pub fn tooltip(&self, year: i32, value: f64) -> String {
        format!("{}: {year}\n{}: {value}", self.x_label, self.y_label)
    }

    /// Hover label for a plot position; empty when the cursor is not over a
    /// named series.
    pub fn label(&self, series: &str, x: f64, y: f64) -> String {
        if series.is_empty() {
            return String::new();
        }
        self.tooltip(x.round() as i32, y)
    }
}

// ---------------------------------------------------------------------------
// Warnings
// ---------------------------------------------------------------------------

/// Non-fatal condition of a built chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SeriesWarning {
    /// The selected country matched no row.
    EmptySeries { country: String },
    /// Rows exist but the metric has no value in any of them.
    AllNull { country: String, metric: String },
}

impl fmt::Display for SeriesWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeriesWarning::EmptySeries { country } => write!(f, "No data for {country}"),
            SeriesWarning::AllNull { country, metric } => {
                write!(f, "No {metric} values recorded for {country}")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// ChartSpec
// ---------------------------------------------------------------------------

/// Declarative description of one line chart, independent of any renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    /// Column the values were read from.
    pub metric: String,
    pub title: String,
    pub y_axis_label: String,
    pub points: Vec<SeriesPoint>,
    pub latest_point: Option<LatestPoint>,
    /// Set exactly when `latest_point` is.
    pub annotation_text: Option<String>,
    pub x_axis: AxisSpec,
    pub y_axis: AxisSpec,
    pub legend: LegendSpec,
    pub hover: HoverSpec,
    pub line_shape: LineShape,
    pub markers: bool,
    pub warning: Option<SeriesWarning>,
}

impl ChartSpec {
    /// Runs of consecutive non-null points as `[year, value]` pairs.
    ///
    /// A null point ends the current run, so a line drawn per run shows the
    /// missing years as a gap.
    pub fn segments(&self) -> Vec<Vec<[f64; 2]>> {
        let mut segments = Vec::new();
        let mut current = Vec::new();
        for point in &self.points {
            match point.value {
                Some(value) => current.push([point.year as f64, value]),
                None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
                None => {}
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        segments
    }

    /// Number of points that carry a value.
    pub fn value_count(&self) -> usize {
        self.points.iter().filter(|p| p.value.is_some()).count()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
