use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use clap::Parser;
use parquet::arrow::ArrowWriter;

/// Write a synthetic per-country energy panel for trying the dashboard.
#[derive(Debug, Parser)]
struct Args {
    /// Output file; a `.parquet` extension writes Parquet, anything else CSV
    #[arg(default_value = "sample_panel.csv")]
    out: PathBuf,
}

/// Deterministic noise source (SplitMix64), so every run writes the same panel.
struct Jitter {
    state: u64,
}

impl Jitter {
    fn seeded(seed: u64) -> Self {
        Jitter { state: seed }
    }

    /// Uniform sample in `[0, 1)`.
    fn unit(&mut self) -> f64 {
        self.state = self.state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^= z >> 31;
        (z >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Multiplicative factor in `[1 - spread, 1 + spread)`.
    fn around(&mut self, spread: f64) -> f64 {
        1.0 - spread + 2.0 * spread * self.unit()
    }
}

/// Shape of one synthetic country.
struct CountryProfile {
    name: &'static str,
    region: &'static str,
    /// Population in millions in the first year.
    pop_start: f64,
    pop_growth: f64,
    hydro_ej: f64,
    /// First year with nuclear output; `None` means the country never had any.
    nuclear_from: Option<i64>,
    nuclear_ej: f64,
}

const FIRST_YEAR: i64 = 1965;
const LAST_YEAR: i64 = 2022;

const PROFILES: [CountryProfile; 3] = [
    CountryProfile {
        name: "Norway",
        region: "Europe",
        pop_start: 3.7,
        pop_growth: 0.006,
        hydro_ej: 1.1,
        nuclear_from: None,
        nuclear_ej: 0.0,
    },
    CountryProfile {
        name: "Brazil",
        region: "South & Central America",
        pop_start: 84.0,
        pop_growth: 0.017,
        hydro_ej: 0.9,
        nuclear_from: Some(1985),
        nuclear_ej: 0.12,
    },
    CountryProfile {
        name: "Japan",
        region: "Asia Pacific",
        pop_start: 98.0,
        pop_growth: 0.004,
        hydro_ej: 0.8,
        nuclear_from: Some(1966),
        nuclear_ej: 2.4,
    },
];

/// Columns of the panel, in output order.
#[derive(Default)]
struct Panel {
    country: Vec<String>,
    year: Vec<i64>,
    region: Vec<String>,
    pop: Vec<Option<f64>>,
    hydro_ej: Vec<Option<f64>>,
    nuclear_ej: Vec<Option<f64>>,
    ren_power_ej: Vec<Option<f64>>,
    solar_ej: Vec<Option<f64>>,
}

impl Panel {
    fn len(&self) -> usize {
        self.year.len()
    }
}

fn generate(noise: &mut Jitter) -> Panel {
    let mut panel = Panel::default();

    for profile in &PROFILES {
        for year in FIRST_YEAR..=LAST_YEAR {
            let t = (year - FIRST_YEAR) as f64;

            let pop = profile.pop_start * (1.0 + profile.pop_growth).powf(t) * 1.0e6;
            let hydro = profile.hydro_ej * (1.0 + 0.01 * t) * noise.around(0.08);
            let nuclear = match profile.nuclear_from {
                Some(from) if year >= from => {
                    // Output collapses after 2011 in the Japanese profile.
                    let level = if profile.name == "Japan" && year > 2011 { 0.15 } else { 1.0 };
                    Some(profile.nuclear_ej * level * noise.around(0.05))
                }
                Some(_) => Some(0.0),
                None => None,
            };
            let ren_power = (year >= 1990).then(|| 0.01 * (t - 24.0).max(0.0).powf(1.6) * noise.around(0.1));
            // Latest year not yet reported.
            let solar = (2000..LAST_YEAR)
                .contains(&year)
                .then(|| 0.0005 * ((year - 1999) as f64).powf(2.2) * noise.around(0.1));

            panel.country.push(profile.name.to_string());
            panel.year.push(year);
            panel.region.push(profile.region.to_string());
            panel.pop.push(Some(pop.round()));
            panel.hydro_ej.push(Some(hydro));
            panel.nuclear_ej.push(nuclear);
            panel.ren_power_ej.push(ren_power);
            panel.solar_ej.push(solar);
        }
    }

    panel
}

fn cell(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.6}")).unwrap_or_default()
}

fn write_csv(panel: &Panel, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer.write_record([
        "Country",
        "Year",
        "Region",
        "pop",
        "hydro_ej",
        "nuclear_ej",
        "ren_power_ej",
        "solar_ej",
    ])?;
    for i in 0..panel.len() {
        writer.write_record([
            panel.country[i].clone(),
            panel.year[i].to_string(),
            panel.region[i].clone(),
            cell(panel.pop[i]),
            cell(panel.hydro_ej[i]),
            cell(panel.nuclear_ej[i]),
            cell(panel.ren_power_ej[i]),
            cell(panel.solar_ej[i]),
        ])?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(panel: Panel, path: &Path) -> Result<()> {
    let metric = |name: &str| Field::new(name, DataType::Float64, true);
    let schema = Arc::new(Schema::new(vec![
        Field::new("Country", DataType::Utf8, false),
        Field::new("Year", DataType::Int64, false),
        Field::new("Region", DataType::Utf8, false),
        metric("pop"),
        metric("hydro_ej"),
        metric("nuclear_ej"),
        metric("ren_power_ej"),
        metric("solar_ej"),
    ]));

    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(panel.country)),
        Arc::new(Int64Array::from(panel.year)),
        Arc::new(StringArray::from(panel.region)),
        Arc::new(Float64Array::from(panel.pop)),
        Arc::new(Float64Array::from(panel.hydro_ej)),
        Arc::new(Float64Array::from(panel.nuclear_ej)),
        Arc::new(Float64Array::from(panel.ren_power_ej)),
        Arc::new(Float64Array::from(panel.solar_ej)),
    ];
    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;

    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let panel = generate(&mut Jitter::seeded(42));
    let rows = panel.len();

    let is_parquet = args
        .out
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("parquet"));
    if is_parquet {
        write_parquet(panel, &args.out)?;
    } else {
        write_csv(&panel, &args.out)?;
    }

    log::info!("Wrote {rows} rows to {}", args.out.display());
    println!(
        "Wrote {rows} rows ({} countries, {FIRST_YEAR}..={LAST_YEAR}) to {}",
        PROFILES.len(),
        args.out.display()
    );
    Ok(())
}
