use std::path::Path;

use crate::chart::{build_dashboard, PanelChart};
use crate::data::{distinct_countries, filter_country, load, Dataset};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Identifies the inputs the current panels were built from.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RenderKey {
    dataset_version: u64,
    country: String,
}

/// The dashboard state, independent of rendering.
#[derive(Debug, Default)]
pub struct AppState {
    /// Loaded dataset (None until a file loads successfully).
    pub dataset: Option<Dataset>,

    /// Incremented on every successful load.
    pub dataset_version: u64,

    /// Country whose panels are shown.
    pub selected_country: Option<String>,

    /// Charts for the selected country, one per dashboard panel.
    pub panels: Vec<PanelChart>,

    render_key: Option<RenderKey>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Load `path` and replace the current dataset; on failure the dashboard
    /// is cleared and only the error message remains.
    pub fn load_path(&mut self, path: &Path) {
        match load(path) {
            Ok(dataset) => self.set_dataset(dataset),
            Err(e) => {
                log::error!("Failed to load dataset: {e}");
                self.dataset = None;
                self.selected_country = None;
                self.panels.clear();
                self.render_key = None;
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Ingest a newly loaded dataset and show its first country.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.dataset_version += 1;
        self.selected_country = distinct_countries(&dataset).first().cloned();
        self.dataset = Some(dataset);
        self.status_message = None;
        self.refresh_panels();
    }

    /// Switch the selected country.
    pub fn select_country(&mut self, country: &str) {
        self.selected_country = Some(country.to_string());
        self.refresh_panels();
    }

    /// Distinct countries of the loaded dataset, for the selector.
    pub fn countries(&self) -> Option<&[String]> {
        self.dataset.as_ref().map(distinct_countries)
    }

    /// Rebuild panels unless they already reflect the current dataset
    /// version and country.
    pub fn refresh_panels(&mut self) {
        let (Some(dataset), Some(country)) = (&self.dataset, &self.selected_country) else {
            self.panels.clear();
            self.render_key = None;
            return;
        };

        let key = RenderKey {
            dataset_version: self.dataset_version,
            country: country.clone(),
        };
        if self.render_key.as_ref() == Some(&key) {
            return;
        }

        log::debug!("Building panels for {country} (dataset v{})", key.dataset_version);
        self.panels = build_dashboard(&filter_country(dataset, country));
        self.render_key = Some(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::{dataset, record};

    fn sample() -> Dataset {
        dataset(
            &["pop"],
            vec![
                record("Norway", 2000, &[("pop", Some(4.4))]),
                record("Brazil", 2000, &[("pop", Some(174.0))]),
                record("Brazil", 2001, &[("pop", Some(176.0))]),
            ],
        )
    }

    fn pop_points(state: &AppState) -> usize {
        state.panels[0].chart.as_ref().unwrap().points.len()
    }

    #[test]
    fn new_dataset_selects_first_country_in_file() {
        let mut state = AppState::default();
        state.set_dataset(sample());
        assert_eq!(state.selected_country.as_deref(), Some("Norway"));
        assert_eq!(state.countries().unwrap(), ["Norway", "Brazil"]);
        assert_eq!(state.dataset_version, 1);
        assert_eq!(state.panels.len(), 5);
        assert_eq!(pop_points(&state), 1);
    }

    #[test]
    fn selecting_country_rebuilds_panels() {
        let mut state = AppState::default();
        state.set_dataset(sample());
        state.select_country("Brazil");
        assert_eq!(pop_points(&state), 2);

        state.select_country("Chile");
        assert_eq!(pop_points(&state), 0);
    }

    #[test]
    fn reload_rebuilds_for_same_country() {
        let mut state = AppState::default();
        state.set_dataset(sample());
        assert_eq!(pop_points(&state), 1);

        let reloaded = dataset(
            &["pop"],
            vec![
                record("Norway", 2000, &[("pop", Some(4.4))]),
                record("Norway", 2001, &[("pop", Some(4.5))]),
            ],
        );
        state.set_dataset(reloaded);
        assert_eq!(state.dataset_version, 2);
        assert_eq!(state.selected_country.as_deref(), Some("Norway"));
        assert_eq!(pop_points(&state), 2);
    }

    #[test]
    fn failed_load_clears_dashboard() {
        let mut state = AppState::default();
        state.set_dataset(sample());

        let dir = tempfile::tempdir().unwrap();
        state.load_path(&dir.path().join("missing.csv"));

        assert!(state.dataset.is_none());
        assert!(state.panels.is_empty());
        assert!(state.countries().is_none());
        let message = state.status_message.as_deref().unwrap();
        assert!(message.contains("not found"), "{message}");
    }

    #[test]
    fn load_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("panel.csv");
        std::fs::write(&path, "Country,Year,pop\nX,2000,10\nX,2001,12\n").unwrap();

        let mut state = AppState::default();
        state.load_path(&path);
        assert_eq!(state.selected_country.as_deref(), Some("X"));
        assert_eq!(state.status_message, None);
        assert_eq!(pop_points(&state), 2);
    }
}
