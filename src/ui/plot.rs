use eframe::egui::{Align2, Color32, RichText, ScrollArea, Ui};
use egui_plot::{Corner, Legend, Line, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Text};

use energy_dashboard::chart::{ChartSpec, PanelChart};
use energy_dashboard::state::AppState;

const CHART_HEIGHT: f32 = 260.0;

// ---------------------------------------------------------------------------
// Chart column (central panel)
// ---------------------------------------------------------------------------

/// Render every dashboard panel of the selected country.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a dataset to view charts  (File → Open…)");
        });
        return;
    }

    let country = state.selected_country.as_deref().unwrap_or_default();
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(format!("Energy Production Time Series Analysis for {country}"));
    });
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (index, panel) in state.panels.iter().enumerate() {
                panel_section(ui, index, panel);
                ui.add_space(12.0);
            }
        });
}

fn panel_section(ui: &mut Ui, index: usize, panel: &PanelChart) {
    ui.heading(panel.panel.heading);

    let spec = match &panel.chart {
        Ok(spec) => spec,
        Err(e) => {
            ui.label(RichText::new(e.to_string()).color(Color32::RED));
            return;
        }
    };

    ui.horizontal(|ui: &mut Ui| {
        ui.strong(spec.title.as_str());
        if let Some(warning) = &spec.warning {
            ui.label(RichText::new(warning.to_string()).weak());
        }
        if ui.small_button("Copy JSON").clicked() {
            match spec.to_json() {
                Ok(json) => ui.ctx().copy_text(json),
                Err(e) => log::error!("Failed to serialise chart: {e}"),
            }
        }
    });

    chart_plot(ui, index, spec);
}

/// Draw one chart: a line per run of non-null points, point markers, and the
/// annotated latest point.
fn chart_plot(ui: &mut Ui, index: usize, spec: &ChartSpec) {
    let hover = &spec.hover;
    let brush = spec.x_axis.range_slider;

    Plot::new(("chart", index))
        .height(CHART_HEIGHT)
        .legend(Legend::default().position(Corner::RightTop))
        .x_axis_label(spec.x_axis.title.clone())
        .y_axis_label(spec.y_axis.title.clone())
        .show_grid(spec.x_axis.show_grid)
        .allow_drag(brush)
        .allow_zoom(brush)
        .allow_boxed_zoom(brush)
        // The wheel scrolls the chart column instead.
        .allow_scroll(false)
        .label_formatter(move |name, value| hover.label(name, value.x, value.y))
        .show(ui, |plot_ui| {
            for segment in spec.segments() {
                if spec.markers {
                    let markers = Points::new(PlotPoints::from(segment.clone()))
                        .radius(3.0)
                        .name(&spec.title);
                    plot_ui.points(markers);
                }
                let line = Line::new(PlotPoints::from(segment))
                    .name(&spec.title)
                    .width(2.0);
                plot_ui.line(line);
            }

            if let (Some(latest), Some(text)) = (spec.latest_point, &spec.annotation_text) {
                let at = PlotPoint::new(latest.year as f64, latest.value);
                plot_ui.points(
                    Points::new(vec![[at.x, at.y]])
                        .radius(6.0)
                        .shape(MarkerShape::Diamond)
                        .name(text),
                );
                plot_ui.text(Text::new(at, text.as_str()).anchor(Align2::RIGHT_BOTTOM));
            }
        });
}
