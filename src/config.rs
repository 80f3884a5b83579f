//! Command line and data-path configuration.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;
use serde::{Deserialize, Serialize};

/// Dataset location used when neither the command line nor the environment
/// names one.
pub const DEFAULT_DATA_PATH: &str = "archive/Panel_format.csv";

/// Environment variable overriding [`DEFAULT_DATA_PATH`].
pub const DATA_PATH_ENV: &str = "ENERGY_DASHBOARD_DATA";

#[derive(Debug, Parser)]
#[command(
    name = "energy-dashboard",
    version,
    about = "Per-country energy production time series"
)]
pub struct Args {
    /// Panel dataset to open (.csv, .tsv or .parquet)
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub data_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
        }
    }
}

impl Config {
    /// Command line argument first, then the environment value, then the default.
    pub fn resolve(cli_path: Option<PathBuf>, env_path: Option<OsString>) -> Self {
        let data_path = cli_path
            .or_else(|| env_path.filter(|p| !p.is_empty()).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));
        Self { data_path }
    }

    pub fn from_args(args: Args) -> Self {
        let config = Self::resolve(args.path, std::env::var_os(DATA_PATH_ENV));
        log::debug!("Using dataset path {}", config.data_path.display());
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_path_wins_over_environment() {
        let config = Config::resolve(Some("cli.csv".into()), Some("env.csv".into()));
        assert_eq!(config.data_path, PathBuf::from("cli.csv"));
    }

    #[test]
    fn environment_used_without_cli_path() {
        let config = Config::resolve(None, Some("env.csv".into()));
        assert_eq!(config.data_path, PathBuf::from("env.csv"));
    }

    #[test]
    fn falls_back_to_default() {
        assert_eq!(Config::resolve(None, None), Config::default());
        assert_eq!(Config::resolve(None, Some(OsString::new())), Config::default());
    }

    #[test]
    fn parses_single_positional_path() {
        let args = Args::try_parse_from(["energy-dashboard", "data/panel.tsv"]).unwrap();
        assert_eq!(args.path, Some(PathBuf::from("data/panel.tsv")));

        let args = Args::try_parse_from(["energy-dashboard"]).unwrap();
        assert_eq!(args.path, None);

        assert!(Args::try_parse_from(["energy-dashboard", "--theme", "dark"]).is_err());
    }
}
