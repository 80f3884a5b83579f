use eframe::egui::{self, Color32, RichText, Ui};

use energy_dashboard::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – country selector
// ---------------------------------------------------------------------------

/// Render the left selector panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Energy Dashboard");
    ui.separator();

    // Clone what we need so we can mutate state after the combo box closes.
    let Some(countries) = state.countries().map(<[String]>::to_vec) else {
        ui.label("No dataset loaded.");
        return;
    };

    ui.strong("Select a country");
    let mut selected = state.selected_country.clone().unwrap_or_default();
    egui::ComboBox::from_id_salt("country")
        .selected_text(selected.as_str())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for country in &countries {
                ui.selectable_value(&mut selected, country.clone(), country.as_str());
            }
        });

    if !selected.is_empty() && state.selected_country.as_deref() != Some(selected.as_str()) {
        state.select_country(&selected);
    }

    ui.separator();
    ui.label("Explore trends in energy production across sources and years.");
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} records, {} countries from {}",
                ds.len(),
                ds.countries().len(),
                ds.source().display()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open panel dataset")
        .add_filter("Supported files", &["csv", "tsv", "tab", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("TSV", &["tsv", "tab"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}
