//! Per-country energy statistics: load a panel dataset, select a country and
//! describe its time series as renderer-independent line charts.
//!
//! ```no_run
//! use energy_dashboard::chart::build;
//! use energy_dashboard::data::{filter_country, load};
//!
//! let dataset = load("archive/Panel_format.csv")?;
//! let series = filter_country(&dataset, "Norway");
//! let spec = build(&series, "hydro_ej", "Hydro Energy Production (Exajoules)", "Exajoules")?;
//! println!("{}", spec.to_json()?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod chart;
pub mod config;
pub mod data;
pub mod error;
pub mod state;

pub use error::{LoadError, UnknownMetricError};
