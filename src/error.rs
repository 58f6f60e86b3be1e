use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the analytics layer and startup code.
#[derive(Error, Debug)]
pub enum DashError {
    /// The dataset could not be read or failed validation. Fatal at startup.
    #[error("launch data unavailable at {}: {reason}", path.display())]
    DataUnavailable { path: PathBuf, reason: String },

    /// Payload bounds rejected by the filter.
    #[error("invalid payload range [{min}, {max}] (allowed 0..={ceiling} kg, min <= max)")]
    InvalidRange { min: f64, max: f64, ceiling: f64 },

    /// A selector string that names no site in the dataset.
    #[error("unknown launch site '{0}'")]
    UnknownSite(String),

    #[error("failed to load configuration: {0}")]
    Config(Box<figment::Error>),

    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl From<figment::Error> for DashError {
    fn from(err: figment::Error) -> Self {
        DashError::Config(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, DashError>;
