// src/config.rs

use crate::error::{Result, SimError};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Process-wide tunables, fixed for the lifetime of a run.
///
/// Every field has a default, so a JSON config file only needs the keys it
/// changes:
///
/// ```json
/// { "num_bodies": 40, "gravity": 50.0, "seed": 7 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Bodies to seed when no load file is given.
    pub num_bodies: usize,
    /// Save file to start from. Overrides random seeding.
    pub load_path: Option<PathBuf>,
    /// Where the save-state trigger writes.
    pub save_path: PathBuf,
    /// Half the visible world width at zoom 1, also the x range of seeding.
    pub world_half_width: f64,
    /// Half the visible world height at zoom 1, also the y range of seeding.
    pub world_half_height: f64,
    /// Gravitational constant.
    pub gravity: f64,
    pub initial_timescale: f64,
    pub frame_delay_ms: u64,
    /// Per-frame color loss of trail pixels. Only the renderer applies it;
    /// the core reports it in the print-state table.
    pub pixel_decay_rate: u8,
    pub velocity_limit: f64,
    pub mass_limit: f64,
    /// Seed for random bodies. OS entropy when unset.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            num_bodies: 5,
            load_path: None,
            save_path: PathBuf::from("save.csv"),
            world_half_width: 600.0,
            world_half_height: 400.0,
            gravity: 100.0,
            initial_timescale: 0.25,
            frame_delay_ms: 16,
            pixel_decay_rate: 2,
            velocity_limit: 1.0,
            mass_limit: 10.0,
            seed: None,
        }
    }
}

impl SimConfig {
    /// Reads a JSON config file. Missing keys keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let config: SimConfig = serde_json::from_reader(reader)?;
        Ok(config)
    }

    /// The config as pretty-printed JSON, in the same shape `from_json_file`
    /// reads.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        let positive = |value: f64, name: &str| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(SimError::InvalidConfig(format!("{name} must be positive, got {value}")))
            }
        };

        positive(self.world_half_width, "world_half_width")?;
        positive(self.world_half_height, "world_half_height")?;
        positive(self.gravity, "gravity")?;
        positive(self.initial_timescale, "initial_timescale")?;
        positive(self.velocity_limit, "velocity_limit")?;
        positive(self.mass_limit, "mass_limit")?;

        if self.num_bodies == 0 && self.load_path.is_none() {
            return Err(SimError::InvalidConfig(
                "num_bodies must be at least 1 without a load file".to_string(),
            ));
        }
        Ok(())
    }
}
