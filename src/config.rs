/// Run configuration loader - parses flompot.toml
///
/// Separates the station list and declustering parameters from code, so
/// stations can be added or parameters retuned without recompiling the
/// tool. One file holds everything the batch driver needs: POT parameters,
/// the data directory, and the `[[station]]` registry.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::model::Station;
use crate::pot::PotParams;

/// Root configuration structure for TOML parsing.
#[derive(Debug, Clone, Deserialize)]
pub struct RunConfig {
    pub parameters: ParameterConfig,
    pub data: DataConfig,
    #[serde(rename = "station", default)]
    pub stations: Vec<StationConfig>,
}

/// POT declustering parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct ParameterConfig {
    /// Empirical quantile for the magnitude threshold, e.g. 0.98.
    pub p_threshold: f64,
    /// Minimum separation between independent peaks, in days.
    pub min_separation_days: i64,
    /// Recession ratio for the flow-ratio criterion, e.g. 0.667.
    pub recession_ratio: f64,
    /// Calendar years to include. Empty means every year present in the
    /// series.
    #[serde(default)]
    pub years: Vec<i32>,
}

impl ParameterConfig {
    pub fn pot_params(&self) -> PotParams {
        PotParams {
            p_threshold: self.p_threshold,
            min_separation_days: self.min_separation_days,
            recession_ratio: self.recession_ratio,
        }
    }
}

/// Where the daily series files live.
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    pub directory: PathBuf,
}

/// One station entry from the registry.
#[derive(Debug, Clone, Deserialize)]
pub struct StationConfig {
    /// Composite numeric code, region * 100000 + sequence.
    pub code: u64,
    pub name: String,
}

impl StationConfig {
    pub fn station(&self) -> Station {
        Station::from_code(self.code)
    }
}

/// Loads and parses the run configuration file.
pub fn load_config(path: &Path) -> Result<RunConfig, Box<dyn std::error::Error>> {
    let contents =
        fs::read_to_string(path).map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    let config = parse_config(&contents)
        .map_err(|e| format!("failed to parse {}: {e}", path.display()))?;
    Ok(config)
}

/// Parses configuration TOML text. Split from `load_config` so tests can
/// use inline fixtures.
pub fn parse_config(contents: &str) -> Result<RunConfig, toml::de::Error> {
    toml::from_str(contents)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
