use std::path::PathBuf;

use clap::ValueEnum;
use directories::BaseDirs;

use crate::error::ConfigError;
use crate::tree::RadiusBounds;

pub const WINDOW_SIZE: f32 = 1080.0;
pub const DEFAULT_SEED: u64 = 0;
pub const DEFAULT_GRAVITY: f32 = 1.1;
pub const DEFAULT_REPULSION: f32 = 4000.0;
pub const DEFAULT_SPREAD: f32 = 100.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DumpFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutConfig {
    pub gravity: f32,
    pub repulsion: f32,
    /// Initial placement covers `±spread × window_size` on both axes.
    pub spread: f32,
    pub window_size: f32,
    pub radius: RadiusBounds,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            repulsion: DEFAULT_REPULSION,
            spread: DEFAULT_SPREAD,
            window_size: WINDOW_SIZE,
            radius: RadiusBounds::default(),
        }
    }
}

impl LayoutConfig {
    pub fn validate(self) -> Result<Self, ConfigError> {
        for (name, value) in [
            ("gravity", self.gravity),
            ("repulsion", self.repulsion),
            ("spread", self.spread),
            ("window size", self.window_size),
            ("min radius", self.radius.min),
            ("max radius", self.radius.max),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { name, value });
            }
        }

        // The sampler needs the full width `2 × extent` to be finite.
        if !(self.spread * self.window_size * 2.0).is_finite() {
            return Err(ConfigError::PlacementOverflow {
                spread: self.spread,
                window_size: self.window_size,
            });
        }

        // A zero radius would give the node zero mass in the simulation.
        if self.radius.min <= 0.0 {
            return Err(ConfigError::NonPositiveMinRadius(self.radius.min));
        }
        if self.radius.max < self.radius.min {
            return Err(ConfigError::InvertedRadiusBounds {
                min: self.radius.min,
                max: self.radius.max,
            });
        }
        Ok(self)
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub seed: u64,
    pub root_path: PathBuf,
    pub layout: LayoutConfig,
    pub dump: Option<DumpFormat>,
}

pub fn default_root_path() -> Result<PathBuf, ConfigError> {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().join("Documents").join("Progetti"))
        .ok_or(ConfigError::NoHomeDirectory)
}
