use super::model::{Dataset, Record};

// ---------------------------------------------------------------------------
// CountrySeries – the rows of one country
// ---------------------------------------------------------------------------

/// Rows of one country borrowed from a [`Dataset`], in file order.
///
/// Keeps the dataset's column list so metric keys can still be checked when
/// no row matched.
#[derive(Debug, Clone)]
pub struct CountrySeries<'a> {
    country: String,
    records: Vec<&'a Record>,
    columns: &'a [String],
}

impl<'a> CountrySeries<'a> {
    /// The key this series was filtered by.
    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn records(&self) -> &[&'a Record] {
        &self.records
    }

    /// Whether the source dataset has a column named `metric`.
    pub fn has_metric(&self, metric: &str) -> bool {
        self.columns.iter().any(|c| c == metric)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// `true` when the key matched no row.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Distinct country names in order of first appearance, used to populate the
/// country selector.
pub fn distinct_countries(dataset: &Dataset) -> &[String] {
    dataset.countries()
}

/// Return the rows whose country equals `country` exactly (case-sensitive,
/// no trimming), preserving their original order.
pub fn filter_country<'a>(dataset: &'a Dataset, country: &str) -> CountrySeries<'a> {
    let records: Vec<&Record> = dataset
        .records()
        .iter()
        .filter(|r| r.country == country)
        .collect();

    if records.is_empty() {
        log::warn!("No rows for country '{country}'");
    }

    CountrySeries {
        country: country.to_string(),
        records,
        columns: dataset.columns(),
    }
}
