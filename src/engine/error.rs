//! Error type shared by the simulation pipeline and its collaborators.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SimError>;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("placement {placement} is outside [1, {max}]")]
    InvalidPlacement { placement: u32, max: u32 },

    #[error("starting placement must be at least 1 (got {0})")]
    InvalidStartPlacement(u32),

    #[error("fight threshold must be 'inf' or a placement of at least 1 (got '{0}')")]
    InvalidThreshold(String),

    #[error("unknown rank tier '{0}'")]
    InvalidRankTier(String),

    #[error("{field} must be at least 1 (got {value})")]
    InvalidCount { field: &'static str, value: usize },

    #[error("{field} must be a finite number (got {value})")]
    InvalidProbability { field: &'static str, value: f64 },

    #[error("cannot resample from an empty population")]
    EmptyPopulation,

    #[error("{side} has {count} sessions, at least 2 are needed for a variance estimate")]
    InsufficientSamples { side: &'static str, count: usize },

    #[error("profile '{name}' not found (available: {available:?})")]
    UnknownProfile { name: String, available: Vec<String> },

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    ProfileParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize run summary: {0}")]
    Serialize(#[from] serde_json::Error),
}
