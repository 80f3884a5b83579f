use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};

use crate::error::UnknownMetricError;

/// Header of the required country column.
pub const COUNTRY_COLUMN: &str = "Country";
/// Header of the required year column.
pub const YEAR_COLUMN: &str = "Year";

// ---------------------------------------------------------------------------
// CellValue – a single cell in a non-key column
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring common dataframe dtypes.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Interpret the value as a number. Text, booleans, nulls and non-finite
    /// floats (NaN, `inf`) yield `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) if v.is_finite() => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the source table
// ---------------------------------------------------------------------------

/// One country-year row.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Country name exactly as it appears in the source.
    pub country: String,
    /// The row's `Year`, normalised to 1 January of that year.
    pub date: NaiveDate,
    /// Every non-key column: column_name → value.
    pub values: BTreeMap<String, CellValue>,
}

impl Record {
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// Numeric value of `metric` for this row.
    ///
    /// Fails when the record has no such column; a present but empty or
    /// non-numeric cell is `Ok(None)`.
    pub fn metric(&self, metric: &str) -> Result<Option<f64>, UnknownMetricError> {
        self.values
            .get(metric)
            .map(CellValue::as_f64)
            .ok_or_else(|| UnknownMetricError::new(metric))
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed table, read-only once built.
///
/// Only the loader constructs datasets, so a `Dataset` always holds at least
/// one record and every record has a country and a year.
#[derive(Debug, Clone)]
pub struct Dataset {
    source: PathBuf,
    records: Vec<Record>,
    columns: Vec<String>,
    countries: Vec<String>,
}

impl Dataset {
    /// Build the country index from loaded records.
    pub(crate) fn from_records(source: PathBuf, columns: Vec<String>, records: Vec<Record>) -> Self {
        let countries = {
            let mut seen = BTreeSet::new();
            records
                .iter()
                .filter(|r| seen.insert(r.country.as_str()))
                .map(|r| r.country.clone())
                .collect()
        };
        Dataset {
            source,
            records,
            columns,
            countries,
        }
    }

    /// Rows in file order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Non-key column names in header order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Distinct country names in order of first appearance.
    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    /// Path the dataset was loaded from.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always `false` for a loaded dataset.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
