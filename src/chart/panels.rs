use serde::Serialize;

use super::builder::build;
use super::spec::ChartSpec;
use crate::data::CountrySeries;
use crate::error::UnknownMetricError;

/// One fixed chart of the dashboard page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChartPanel {
    /// Section heading shown above the chart.
    pub heading: &'static str,
    pub metric: &'static str,
    pub title: &'static str,
    pub y_axis_label: &'static str,
}

/// The five time series shown for every country, in page order.
pub const DASHBOARD_PANELS: [ChartPanel; 5] = [
    ChartPanel {
        heading: "Population Over Time",
        metric: "pop",
        title: "Population over Time",
        y_axis_label: "Population",
    },
    ChartPanel {
        heading: "Hydro Energy Production Over Time",
        metric: "hydro_ej",
        title: "Hydro Energy Production (Exajoules)",
        y_axis_label: "Exajoules",
    },
    ChartPanel {
        heading: "Nuclear Energy Production Over Time",
        metric: "nuclear_ej",
        title: "Nuclear Energy Production (Exajoules)",
        y_axis_label: "Exajoules",
    },
    ChartPanel {
        heading: "Renewable Energy Production Over Time",
        metric: "ren_power_ej",
        title: "Renewable Energy Production (Exajoules)",
        y_axis_label: "Exajoules",
    },
    ChartPanel {
        heading: "Solar Energy Production Over Time",
        metric: "solar_ej",
        title: "Solar Energy Production (Exajoules)",
        y_axis_label: "Exajoules",
    },
];

/// A panel together with its built chart or the reason it could not be built.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelChart {
    pub panel: ChartPanel,
    pub chart: Result<ChartSpec, UnknownMetricError>,
}

/// Build every dashboard panel for `series`.
///
/// Panels are independent: a metric missing from the dataset fails only its
/// own panel.
pub fn build_dashboard(series: &CountrySeries<'_>) -> Vec<PanelChart> {
    DASHBOARD_PANELS
        .iter()
        .map(|panel| {
            let chart = build(series, panel.metric, panel.title, panel.y_axis_label);
            match &chart {
                Ok(spec) => {
                    if let Some(warning) = &spec.warning {
                        log::warn!("{}: {warning}", panel.heading);
                    }
                }
                Err(e) => log::warn!("{}: {e}", panel.heading),
            }
            PanelChart {
                panel: *panel,
                chart,
            }
        })
        .collect()
}
