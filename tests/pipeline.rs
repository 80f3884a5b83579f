//! End-to-end pipeline: file on disk → dataset → country series → chart specs.

use std::path::PathBuf;

use energy_dashboard::chart::{build, build_dashboard, LatestPoint};
use energy_dashboard::data::{distinct_countries, filter_country, load};
use energy_dashboard::LoadError;
use tempfile::TempDir;

fn write_panel(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("Panel_format.csv");
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn two_row_file_charts_both_points() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_panel(&dir, "Country,Year,pop\nX,2000,10\nX,2001,12");

    let dataset = load(&path).unwrap();
    assert_eq!(dataset.len(), 2);

    let series = filter_country(&dataset, "X");
    assert_eq!(series.len(), 2);

    let spec = build(&series, "pop", "Population over Time", "Population").unwrap();
    let points: Vec<(i32, Option<f64>)> = spec.points.iter().map(|p| (p.year, p.value)).collect();
    assert_eq!(points, [(2000, Some(10.0)), (2001, Some(12.0))]);
    assert_eq!(
        spec.latest_point,
        Some(LatestPoint {
            year: 2001,
            value: 12.0
        })
    );
    assert_eq!(spec.annotation_text.as_deref(), Some("Latest Value"));
}

#[test]
fn unknown_country_charts_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_panel(&dir, "Country,Year,pop\nX,2000,10\nX,2001,12");

    let dataset = load(&path).unwrap();
    assert!(!distinct_countries(&dataset).iter().any(|c| c == "Y"));

    let series = filter_country(&dataset, "Y");
    assert!(series.is_empty());

    let spec = build(&series, "pop", "Population over Time", "Population").unwrap();
    assert!(spec.points.is_empty());
    assert_eq!(spec.latest_point, None);
    assert_eq!(spec.annotation_text, None);
}

#[test]
fn load_failures_are_categorised() {
    let dir = tempfile::tempdir().unwrap();

    let missing = dir.path().join("nope.csv");
    assert!(matches!(load(&missing), Err(LoadError::NotFound { .. })));

    let header_only = write_panel(&dir, "Country,Year,pop\n");
    assert!(matches!(load(&header_only), Err(LoadError::EmptyData { .. })));

    let no_year = write_panel(&dir, "Country,pop\nX,10\n");
    let err = load(&no_year).unwrap_err();
    assert!(matches!(err, LoadError::Schema { .. }));
    assert_eq!(err.column(), Some("Year"));
}

#[test]
fn dashboard_for_realistic_panel() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_panel(
        &dir,
        "Country,Year,Region,pop,hydro_ej,nuclear_ej,ren_power_ej,solar_ej\n\
         Norway,2019,Europe,5347896,1.21,,0.06,0.0003\n\
         Norway,2020,Europe,5379475,1.28,,0.09,0.0004\n\
         Norway,2021,Europe,5408320,1.24,,0.11,\n\
         Japan,2021,Asia Pacific,125681593,0.72,0.58,0.38,0.78\n",
    );

    let dataset = load(&path).unwrap();
    let countries: Vec<&str> = distinct_countries(&dataset).iter().map(String::as_str).collect();
    assert_eq!(countries, ["Norway", "Japan"]);

    let charts = build_dashboard(&filter_country(&dataset, "Norway"));
    assert_eq!(charts.len(), 5);

    let by_metric = |metric: &str| {
        charts
            .iter()
            .find(|c| c.panel.metric == metric)
            .and_then(|c| c.chart.as_ref().ok())
            .unwrap()
    };

    assert_eq!(by_metric("pop").points.len(), 3);
    assert!(by_metric("nuclear_ej").latest_point.is_none());
    assert!(by_metric("nuclear_ej").warning.is_some());

    let solar = by_metric("solar_ej");
    assert_eq!(
        solar.latest_point,
        Some(LatestPoint {
            year: 2020,
            value: 0.0004
        })
    );
}
