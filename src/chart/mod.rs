//! Chart layer: declarative line-chart specs built from a country series.
//!
//! ```text
//!   CountrySeries ──► builder::build(metric, title, y label) ──► ChartSpec
//!                     panels::build_dashboard  (× DASHBOARD_PANELS)
//! ```
//!
//! A [`ChartSpec`] holds data and layout settings only; drawing it is left to
//! the renderer.

pub mod builder;
pub mod panels;
pub mod spec;

pub use builder::{build, build_with, LATEST_VALUE_TEXT};
pub use panels::{build_dashboard, ChartPanel, PanelChart, DASHBOARD_PANELS};
pub use spec::{
    AxisSpec, ChartSpec, HoverSpec, LatestPoint, LegendOrientation, LegendSpec, LineShape,
    NullPolicy, SeriesPoint, SeriesWarning,
};
