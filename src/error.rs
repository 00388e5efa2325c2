use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("cannot read directory {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read size of {}: {source}", path.display())]
    FileSize {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ScanError {
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::ReadDir { path, .. } | Self::FileSize { path, .. } => path,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be a finite number, got {value}")]
    NotFinite { name: &'static str, value: f32 },

    #[error("min radius must be positive, got {0}")]
    NonPositiveMinRadius(f32),

    #[error("max radius {max} is smaller than min radius {min}")]
    InvertedRadiusBounds { min: f32, max: f32 },

    #[error("seed must be a non-negative integer, got {0:?}")]
    InvalidSeed(String),

    #[error("spread {spread} times window size {window_size} leaves no finite placement range")]
    PlacementOverflow { spread: f32, window_size: f32 },

    #[error("could not determine the home directory; pass a root path explicitly")]
    NoHomeDirectory,
}
