//! Data layer: core types, loading, and filtering.
//!
//! Architecture:
//! ```text
//!  .csv / .tsv / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse + validate file → Dataset
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  Dataset  │  Vec<Record>, column list, country index
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  select one country → CountrySeries
//!   └──────────┘
//! ```
pub mod filter;
pub mod loader;
pub mod model;

pub use filter::{distinct_countries, filter_country, CountrySeries};
pub use loader::{load, load_with, LoadOptions};
pub use model::{CellValue, Dataset, Record};
