//! Error types for the dataset pipeline.
//!
//! Load-time failures are fatal to a dashboard session; an unknown metric only
//! affects the chart that asked for it.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Dataset not found at path: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("The data file {path} contains no data rows")]
    EmptyData { path: PathBuf },

    #[error("Schema error in {path}, column '{column}': {reason}")]
    Schema {
        path: PathBuf,
        column: String,
        reason: String,
    },

    #[error("Malformed data in {path}: {reason}")]
    Parse { path: PathBuf, reason: String },
}

impl LoadError {
    /// Column the error refers to, when there is one.
    pub fn column(&self) -> Option<&str> {
        match self {
            LoadError::Schema { column, .. } => Some(column),
            _ => None,
        }
    }

    /// Path of the dataset that failed to load.
    pub fn path(&self) -> &std::path::Path {
        match self {
            LoadError::NotFound { path }
            | LoadError::Io { path, .. }
            | LoadError::EmptyData { path }
            | LoadError::Schema { path, .. }
            | LoadError::Parse { path, .. } => path.as_path(),
        }
    }
}

/// A metric key that names no column of the loaded dataset.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("Unknown metric column '{metric}'")]
pub struct UnknownMetricError {
    pub metric: String,
}

impl UnknownMetricError {
    pub fn new(metric: impl Into<String>) -> Self {
        Self {
            metric: metric.into(),
        }
    }
}
