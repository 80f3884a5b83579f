use super::spec::{
    AxisSpec, ChartSpec, HoverSpec, LatestPoint, LegendOrientation, LegendSpec, LineShape,
    NullPolicy, SeriesPoint, SeriesWarning,
};
use crate::data::CountrySeries;
use crate::error::UnknownMetricError;

/// Text placed next to the latest point.
pub const LATEST_VALUE_TEXT: &str = "Latest Value";

const X_AXIS_TITLE: &str = "Year";
const LEGEND_TITLE: &str = "Legend";

/// Build the chart of `metric` over `series`, retaining null points.
pub fn build(
    series: &CountrySeries<'_>,
    metric: &str,
    title: &str,
    y_axis_label: &str,
) -> Result<ChartSpec, UnknownMetricError> {
    build_with(series, metric, title, y_axis_label, NullPolicy::default())
}

/// [`build`] with an explicit [`NullPolicy`].
///
/// The latest point is the last row in series order with a value, so trailing
/// null years never hide an earlier reading. An empty or all-null series gives
/// a chart without latest point or annotation.
pub fn build_with(
    series: &CountrySeries<'_>,
    metric: &str,
    title: &str,
    y_axis_label: &str,
    policy: NullPolicy,
) -> Result<ChartSpec, UnknownMetricError> {
    if !series.has_metric(metric) {
        return Err(UnknownMetricError::new(metric));
    }

    let projected = series
        .records()
        .iter()
        .map(|r| {
            r.metric(metric).map(|value| SeriesPoint {
                year: r.year(),
                value,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let latest_point = projected.iter().rev().find_map(|p| {
        p.value.map(|value| LatestPoint {
            year: p.year,
            value,
        })
    });

    let warning = if series.is_empty() {
        Some(SeriesWarning::EmptySeries {
            country: series.country().to_string(),
        })
    } else if latest_point.is_none() {
        Some(SeriesWarning::AllNull {
            country: series.country().to_string(),
            metric: metric.to_string(),
        })
    } else {
        None
    };

    let points = match policy {
        NullPolicy::Retain => projected,
        NullPolicy::Skip => projected.into_iter().filter(|p| p.value.is_some()).collect(),
    };

    Ok(ChartSpec {
        metric: metric.to_string(),
        title: title.to_string(),
        y_axis_label: y_axis_label.to_string(),
        points,
        latest_point,
        annotation_text: latest_point.map(|_| LATEST_VALUE_TEXT.to_string()),
        x_axis: AxisSpec {
            title: X_AXIS_TITLE.to_string(),
            range_slider: true,
            show_grid: true,
        },
        y_axis: AxisSpec {
            title: y_axis_label.to_string(),
            range_slider: false,
            show_grid: true,
        },
        legend: LegendSpec {
            title: LEGEND_TITLE.to_string(),
            orientation: LegendOrientation::Horizontal,
        },
        hover: HoverSpec {
            x_label: X_AXIS_TITLE.to_string(),
            y_label: "Value".to_string(),
            unified: true,
        },
        line_shape: LineShape::Spline,
        markers: true,
        warning,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter_country;
    use crate::data::model::fixtures::{dataset, record};
    use crate::data::Dataset;

    fn two_rows() -> Dataset {
        dataset(
            &["pop"],
            vec![
                record("X", 2000, &[("pop", Some(10.0))]),
                record("X", 2001, &[("pop", Some(12.0))]),
            ],
        )
    }

    fn values(spec: &ChartSpec) -> Vec<(i32, Option<f64>)> {
        spec.points.iter().map(|p| (p.year, p.value)).collect()
    }

    #[test]
    fn projects_points_and_annotates_latest() {
        let ds = two_rows();
        let series = filter_country(&ds, "X");
        let spec = build(&series, "pop", "Population over Time", "Population").unwrap();

        assert_eq!(values(&spec), [(2000, Some(10.0)), (2001, Some(12.0))]);
        assert_eq!(
            spec.latest_point,
            Some(LatestPoint {
                year: 2001,
                value: 12.0
            })
        );
        assert_eq!(spec.annotation_text.as_deref(), Some("Latest Value"));
        assert_eq!(spec.title, "Population over Time");
        assert_eq!(spec.y_axis.title, "Population");
        assert_eq!(spec.x_axis.title, "Year");
        assert!(spec.x_axis.range_slider);
        assert_eq!(spec.warning, None);
    }

    #[test]
    fn empty_series_has_no_points_and_no_annotation() {
        let ds = two_rows();
        let series = filter_country(&ds, "Y");
        let spec = build(&series, "pop", "Population over Time", "Population").unwrap();

        assert!(spec.points.is_empty());
        assert_eq!(spec.latest_point, None);
        assert_eq!(spec.annotation_text, None);
        assert_eq!(
            spec.warning,
            Some(SeriesWarning::EmptySeries {
                country: "Y".to_string()
            })
        );
        assert!(spec.segments().is_empty());
    }

    #[test]
    fn latest_point_skips_trailing_nulls() {
        let ds = dataset(
            &["solar_ej"],
            vec![
                record("X", 2018, &[("solar_ej", None)]),
                record("X", 2019, &[("solar_ej", Some(0.3))]),
                record("X", 2020, &[("solar_ej", None)]),
                record("X", 2021, &[("solar_ej", None)]),
            ],
        );
        let series = filter_country(&ds, "X");
        let spec = build(&series, "solar_ej", "Solar", "Exajoules").unwrap();

        assert_eq!(
            spec.latest_point,
            Some(LatestPoint {
                year: 2019,
                value: 0.3
            })
        );
        assert_eq!(spec.points.len(), 4);
        assert_eq!(spec.value_count(), 1);
    }

    #[test]
    fn infinite_values_chart_as_nulls() {
        let ds = dataset(
            &["wind_ej"],
            vec![
                record("X", 2019, &[("wind_ej", Some(0.7))]),
                record("X", 2020, &[("wind_ej", Some(f64::INFINITY))]),
                record("X", 2021, &[("wind_ej", Some(f64::NEG_INFINITY))]),
            ],
        );
        let series = filter_country(&ds, "X");
        let spec = build(&series, "wind_ej", "Wind", "Exajoules").unwrap();

        assert_eq!(values(&spec), [(2019, Some(0.7)), (2020, None), (2021, None)]);
        assert_eq!(
            spec.latest_point,
            Some(LatestPoint {
                year: 2019,
                value: 0.7
            })
        );

        let json: serde_json::Value = serde_json::from_str(&spec.to_json().unwrap()).unwrap();
        assert_eq!(json["latest_point"]["value"], 0.7);
    }

    #[test]
    fn all_null_metric_warns_without_annotation() {
        let ds = dataset(
            &["nuclear_ej"],
            vec![
                record("Norway", 2000, &[("nuclear_ej", None)]),
                record("Norway", 2001, &[("nuclear_ej", None)]),
            ],
        );
        let series = filter_country(&ds, "Norway");
        let spec = build(&series, "nuclear_ej", "Nuclear", "Exajoules").unwrap();

        assert_eq!(spec.points.len(), 2);
        assert_eq!(spec.latest_point, None);
        assert_eq!(spec.annotation_text, None);
        assert_eq!(
            spec.warning,
            Some(SeriesWarning::AllNull {
                country: "Norway".to_string(),
                metric: "nuclear_ej".to_string()
            })
        );
    }

    #[test]
    fn skip_policy_drops_nulls_but_keeps_latest() {
        let ds = dataset(
            &["hydro_ej"],
            vec![
                record("X", 2000, &[("hydro_ej", Some(1.0))]),
                record("X", 2001, &[("hydro_ej", None)]),
                record("X", 2002, &[("hydro_ej", Some(2.0))]),
                record("X", 2003, &[("hydro_ej", None)]),
            ],
        );
        let series = filter_country(&ds, "X");
        let retained = build(&series, "hydro_ej", "Hydro", "Exajoules").unwrap();
        let skipped =
            build_with(&series, "hydro_ej", "Hydro", "Exajoules", NullPolicy::Skip).unwrap();

        assert_eq!(values(&skipped), [(2000, Some(1.0)), (2002, Some(2.0))]);
        assert_eq!(skipped.latest_point, retained.latest_point);
        assert_eq!(retained.segments(), [vec![[2000.0, 1.0]], vec![[2002.0, 2.0]]]);
        assert_eq!(skipped.segments(), [vec![[2000.0, 1.0], [2002.0, 2.0]]]);
    }

    #[test]
    fn unknown_metric_fails_even_for_empty_series() {
        let ds = two_rows();
        let filled = filter_country(&ds, "X");
        let empty = filter_country(&ds, "Y");

        for series in [&filled, &empty] {
            let err = build(series, "wind_ej", "Wind", "Exajoules").unwrap_err();
            assert_eq!(err, UnknownMetricError::new("wind_ej"));
        }
    }

    #[test]
    fn text_column_charts_as_nulls() {
        let mut r = record("X", 2000, &[]);
        r.values.insert(
            "Region".to_string(),
            crate::data::CellValue::String("Europe".to_string()),
        );
        let ds = dataset(&["Region"], vec![r]);
        let series = filter_country(&ds, "X");
        let spec = build(&series, "Region", "Region", "").unwrap();
        assert_eq!(values(&spec), [(2000, None)]);
        assert!(spec.latest_point.is_none());
    }

    #[test]
    fn hover_and_json_describe_the_chart() {
        let ds = two_rows();
        let series = filter_country(&ds, "X");
        let spec = build(&series, "pop", "Population over Time", "Population").unwrap();

        assert_eq!(spec.hover.tooltip(2001, 12.0), "Year: 2001\nValue: 12");
        assert_eq!(spec.hover.label("pop", 2000.6, 12.0), "Year: 2001\nValue: 12");
        assert_eq!(spec.hover.label("", 2000.0, 10.0), "");

        let json: serde_json::Value = serde_json::from_str(&spec.to_json().unwrap()).unwrap();
        assert_eq!(json["metric"], "pop");
        assert_eq!(json["latest_point"]["year"], 2001);
        assert_eq!(json["annotation_text"], "Latest Value");
        assert_eq!(json["legend"]["orientation"], "horizontal");
        assert_eq!(json["points"].as_array().map(Vec::len), Some(2));
    }
}
