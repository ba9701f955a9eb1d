//! Configuration types for the simulation.

use crate::error::{Error, Result};
use crate::types::Rule;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// World configuration parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Width of the world grid
    pub width: i32,
    /// Height of the world grid
    pub height: i32,
    /// Transition rule applied each generation
    pub rule: Rule,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 185,
            height: 60,
            rule: Rule::Extended,
        }
    }
}

/// What gets stamped into the world once its population has died out
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReseedConfig {
    /// Number of random cells switched on (duplicates allowed)
    pub random_cells: usize,
    /// Number of distinct catalog lifeforms stamped at random anchors
    pub lifeforms: usize,
}

impl Default for ReseedConfig {
    fn default() -> Self {
        Self {
            random_cells: 100,
            lifeforms: 4,
        }
    }
}

/// Simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Random seed for reproducibility (`None` draws one from the OS)
    pub seed: Option<u64>,
    /// World configuration
    pub world: WorldConfig,
    /// Reseed configuration
    pub reseed: ReseedConfig,
    /// Generations between population metric events (0 disables them)
    pub metrics_interval: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: None,
            world: WorldConfig::default(),
            reseed: ReseedConfig::default(),
            metrics_interval: 100,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        if self.world.width < 1 || self.world.height < 1 {
            return Err(Error::InvalidDimension {
                width: self.world.width,
                height: self.world.height,
            });
        }
        Ok(())
    }
}

/// Terminal front-end configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Delay between generations (milliseconds)
    pub frame_interval_ms: u64,
    /// Size the world to the terminal instead of `simulation.world`
    pub fit_to_terminal: bool,
    /// Stop after this many generations
    pub max_generations: Option<u64>,
    /// Default tracing filter, overridden by `RUST_LOG`
    pub log_filter: String,
    /// Write logs here instead of stderr
    pub log_file: Option<String>,
    /// Simulation configuration
    pub simulation: SimulationConfig,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: 150,
            fit_to_terminal: true,
            max_generations: None,
            log_filter: "warn".to_string(),
            log_file: None,
            simulation: SimulationConfig::default(),
        }
    }
}

impl ConsoleConfig {
    /// Load a JSON config file; absent fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let config: Self = load_json(path.as_ref())?;
        if config.frame_interval_ms == 0 {
            return Err(Error::Config(
                "frame_interval_ms must be greater than 0".to_string(),
            ));
        }
        config.simulation.validate()?;
        Ok(config)
    }
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    debug!(path = %path.display(), "Loading configuration");
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}
