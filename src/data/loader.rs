use std::collections::BTreeMap;
use std::fs::File;
use std::io;
use std::path::Path;

use arrow::array::{Array, ArrayRef};
use arrow::util::display::array_value_to_string;
use chrono::{Datelike, NaiveDate};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::model::{CellValue, Dataset, Record, COUNTRY_COLUMN, YEAR_COLUMN};
use crate::error::LoadError;

/// Years outside this range load fine but are logged as suspicious.
const EXPECTED_YEARS: std::ops::RangeInclusive<i32> = 1800..=2100;

/// Loader overrides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Field delimiter for delimited files. Defaults to tab for `.tsv`/`.tab`
    /// and comma otherwise.
    pub delimiter: Option<u8>,
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a panel dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.parquet` / `.pq` – Parquet file with `Country` and `Year` columns
/// * `.tsv` / `.tab`    – tab-delimited text with a header row
/// * anything else      – comma-delimited text with a header row
pub fn load(path: impl AsRef<Path>) -> Result<Dataset, LoadError> {
    load_with(path, LoadOptions::default())
}

/// [`load`] with explicit [`LoadOptions`].
pub fn load_with(path: impl AsRef<Path>, options: LoadOptions) -> Result<Dataset, LoadError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(LoadError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "parquet" | "pq" => load_parquet(path)?,
        "tsv" | "tab" => load_delimited(path, options.delimiter.unwrap_or(b'\t'))?,
        _ => load_delimited(path, options.delimiter.unwrap_or(b','))?,
    };

    log::info!(
        "Loaded {} records for {} countries from {}",
        dataset.len(),
        dataset.countries().len(),
        path.display()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Row assembly shared by both formats
// ---------------------------------------------------------------------------

/// Collects validated records for one source file.
struct TableBuilder<'a> {
    path: &'a Path,
    columns: Vec<String>,
    records: Vec<Record>,
    out_of_range_years: usize,
}

impl<'a> TableBuilder<'a> {
    /// Locate the key columns in `headers`; returns the builder and the
    /// `(country, year)` indices.
    fn new(path: &'a Path, headers: &[String]) -> Result<(Self, usize, usize), LoadError> {
        let country_idx = required_index(path, headers, COUNTRY_COLUMN)?;
        let year_idx = required_index(path, headers, YEAR_COLUMN)?;
        let columns = headers
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != country_idx && *i != year_idx)
            .map(|(_, h)| h.clone())
            .collect();
        let builder = TableBuilder {
            path,
            columns,
            records: Vec::new(),
            out_of_range_years: 0,
        };
        Ok((builder, country_idx, year_idx))
    }

    /// Validate the key cells of data row `row_no` (1-based) and store it.
    fn push(
        &mut self,
        row_no: usize,
        country: &str,
        year: &str,
        values: BTreeMap<String, CellValue>,
    ) -> Result<(), LoadError> {
        if country.trim().is_empty() {
            return Err(self.schema_error(COUNTRY_COLUMN, format!("row {row_no}: empty country")));
        }
        let date = parse_year(year).ok_or_else(|| {
            self.schema_error(YEAR_COLUMN, format!("row {row_no}: '{year}' is not a %Y year"))
        })?;
        if !EXPECTED_YEARS.contains(&date.year()) {
            self.out_of_range_years += 1;
        }
        self.records.push(Record {
            country: country.to_string(),
            date,
            values,
        });
        Ok(())
    }

    fn schema_error(&self, column: &str, reason: String) -> LoadError {
        LoadError::Schema {
            path: self.path.to_path_buf(),
            column: column.to_string(),
            reason,
        }
    }

    fn finish(self) -> Result<Dataset, LoadError> {
        if self.records.is_empty() {
            return Err(LoadError::EmptyData {
                path: self.path.to_path_buf(),
            });
        }
        if self.out_of_range_years > 0 {
            log::warn!(
                "{}: {} rows have a year outside {}..={}",
                self.path.display(),
                self.out_of_range_years,
                EXPECTED_YEARS.start(),
                EXPECTED_YEARS.end()
            );
        }
        Ok(Dataset::from_records(
            self.path.to_path_buf(),
            self.columns,
            self.records,
        ))
    }
}

fn required_index(path: &Path, headers: &[String], name: &str) -> Result<usize, LoadError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| LoadError::Schema {
            path: path.to_path_buf(),
            column: name.to_string(),
            reason: "required column is missing from the header".to_string(),
        })
}

/// Parse a `%Y` year (exactly four ASCII digits) into 1 January of that year.
fn parse_year(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.len() != 4 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year: i32 = raw.parse().ok()?;
    NaiveDate::from_ymd_opt(year, 1, 1)
}

fn guess_cell_type(raw: &str) -> CellValue {
    let s = raw.trim();
    match s {
        "" | "NA" | "NaN" | "nan" | "null" => return CellValue::Null,
        _ => {}
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    if s == "true" || s == "false" {
        return CellValue::Bool(s == "true");
    }
    CellValue::String(raw.to_string())
}

// ---------------------------------------------------------------------------
// Delimited text loader
// ---------------------------------------------------------------------------

/// Header row with column names; `Country` and `Year` are required, every other
/// column is kept as a typed cell.
///
/// Only header names are trimmed. Country cells are kept verbatim so that
/// filtering matches what the file actually contains.
fn load_delimited(path: &Path, delimiter: u8) -> Result<Dataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::Headers)
        .from_path(path)
        .map_err(|e| csv_error(path, e))?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| csv_error(path, e))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    // A zero-byte file has no header at all.
    if headers.iter().all(|h| h.is_empty()) {
        return Err(LoadError::EmptyData {
            path: path.to_path_buf(),
        });
    }

    let (mut table, country_idx, year_idx) = TableBuilder::new(path, &headers)?;

    for (i, result) in reader.records().enumerate() {
        let record = result.map_err(|e| csv_error(path, e))?;

        let mut values = BTreeMap::new();
        for (col_idx, value) in record.iter().enumerate() {
            if col_idx == country_idx || col_idx == year_idx {
                continue;
            }
            values.insert(headers[col_idx].clone(), guess_cell_type(value));
        }

        table.push(
            i + 1,
            record.get(country_idx).unwrap_or(""),
            record.get(year_idx).unwrap_or(""),
            values,
        )?;
    }

    table.finish()
}

fn csv_error(path: &Path, err: csv::Error) -> LoadError {
    let reason = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(source) => io_error(path, source),
        _ => LoadError::Parse {
            path: path.to_path_buf(),
            reason,
        },
    }
}

fn io_error(path: &Path, source: io::Error) -> LoadError {
    let path = path.to_path_buf();
    if source.kind() == io::ErrorKind::NotFound {
        LoadError::NotFound { path }
    } else {
        LoadError::Io { path, source }
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file containing panel data.
///
/// `Country` may be any string column and `Year` any integer or string column;
/// other columns are kept as typed cells.  Works with files written by both
/// **Pandas** (`df.to_parquet()`) and **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Dataset, LoadError> {
    let parse_error = |reason: String| LoadError::Parse {
        path: path.to_path_buf(),
        reason,
    };

    let file = File::open(path).map_err(|e| io_error(path, e))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .map_err(|e| parse_error(format!("reading parquet metadata: {e}")))?;

    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let (mut table, country_idx, year_idx) = TableBuilder::new(path, &headers)?;

    let reader = builder
        .build()
        .map_err(|e| parse_error(format!("building parquet reader: {e}")))?;

    let mut row_no = 0;
    for batch_result in reader {
        let batch = batch_result.map_err(|e| parse_error(format!("reading record batch: {e}")))?;
        let country_col = batch.column(country_idx);
        let year_col = batch.column(year_idx);

        for row in 0..batch.num_rows() {
            row_no += 1;
            let country = cell_text(country_col, row).map_err(parse_error)?;
            let year = cell_text(year_col, row).map_err(parse_error)?;

            let mut values = BTreeMap::new();
            for (col_idx, name) in headers.iter().enumerate() {
                if col_idx == country_idx || col_idx == year_idx {
                    continue;
                }
                let value = extract_cell_value(batch.column(col_idx), row).map_err(parse_error)?;
                values.insert(name.clone(), value);
            }

            table.push(row_no, &country, &year, values)?;
        }
    }

    table.finish()
}

// -- Parquet / Arrow helpers --

/// Text rendering of a cell; nulls render as the empty string.
fn cell_text(col: &ArrayRef, row: usize) -> Result<String, String> {
    if col.is_null(row) {
        return Ok(String::new());
    }
    array_value_to_string(col.as_ref(), row).map_err(|e| format!("row {row}: {e}"))
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell_value(col: &ArrayRef, row: usize) -> Result<CellValue, String> {
    use arrow::array::AsArray;
    use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};

    if col.is_null(row) {
        return Ok(CellValue::Null);
    }
    let value = match col.data_type() {
        DataType::Int32 => CellValue::Integer(col.as_primitive::<Int32Type>().value(row) as i64),
        DataType::Int64 => CellValue::Integer(col.as_primitive::<Int64Type>().value(row)),
        DataType::Float32 => CellValue::Float(col.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Float64 => CellValue::Float(col.as_primitive::<Float64Type>().value(row)),
        DataType::Boolean => CellValue::Bool(col.as_boolean().value(row)),
        DataType::Utf8 => CellValue::String(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => CellValue::String(col.as_string::<i64>().value(row).to_string()),
        // Dictionary strings, decimals and the like: go through their text form.
        _ => guess_cell_type(&cell_text(col, row)?),
    };
    Ok(value)
}
