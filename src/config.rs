use chrono::Duration;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

use crate::catalog::Catalog;
use crate::predict::{
    GroundStation, MaskPoint, PredictError, Sgp4Elements, Sgp4Oracle, TleLoader,
};
use crate::scheduler::{SearchConfig, ThresholdConfig};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid station coordinates: {0}")]
    InvalidStation(String),
    #[error("invalid search settings: {0}")]
    InvalidSearch(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub station: StationConfig,
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub thresholds: ThresholdConfig,
    #[serde(default)]
    pub web: WebConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StationConfig {
    pub name: Option<String>,
    pub coordinates: String,
    #[serde(default)]
    pub altitude_m: f64,
    #[serde(default)]
    pub horizon_mask: Vec<MaskPoint>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// TLE file, or directory of `.tle`/`.txt` files.
    pub tle_path: PathBuf,
    /// Names of the objects to schedule. Every object is active when omitted.
    pub active: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    #[serde(default = "default_step_seconds")]
    pub step_seconds: i64,
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,
    #[serde(default = "default_max_forward_attempts")]
    pub max_forward_attempts: usize,
    #[serde(default = "default_oracle_horizon_hours")]
    pub oracle_horizon_hours: i64,
}

fn default_step_seconds() -> i64 {
    SearchConfig::default().step.num_seconds()
}

fn default_max_steps() -> usize {
    SearchConfig::default().max_steps
}

fn default_max_forward_attempts() -> usize {
    SearchConfig::default().max_forward_attempts
}

fn default_oracle_horizon_hours() -> i64 {
    72
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            step_seconds: default_step_seconds(),
            max_steps: default_max_steps(),
            max_forward_attempts: default_max_forward_attempts(),
            oracle_horizon_hours: default_oracle_horizon_hours(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    pub fn from_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.search_config()?;
        config.ground_station()?;
        Ok(config)
    }

    pub fn ground_station(&self) -> Result<GroundStation, ConfigError> {
        let station = &self.station;
        GroundStation::from_coordinates(&station.coordinates, Some(station.altitude_m))
            .map(|gs| gs.with_horizon_mask(station.horizon_mask.clone()))
            .ok_or_else(|| ConfigError::InvalidStation(station.coordinates.clone()))
    }

    pub fn search_config(&self) -> Result<SearchConfig, ConfigError> {
        let search = &self.search;
        if search.step_seconds <= 0 {
            return Err(ConfigError::InvalidSearch(
                "step_seconds must be positive".into(),
            ));
        }
        if search.max_steps == 0 {
            return Err(ConfigError::InvalidSearch(
                "max_steps must be at least 1".into(),
            ));
        }
        if search.oracle_horizon_hours <= 0 {
            return Err(ConfigError::InvalidSearch(
                "oracle_horizon_hours must be positive".into(),
            ));
        }
        self.oracle_horizon()?;
        Ok(SearchConfig {
            step: Duration::try_seconds(search.step_seconds).ok_or_else(|| {
                ConfigError::InvalidSearch("step_seconds is out of range".into())
            })?,
            max_steps: search.max_steps,
            max_forward_attempts: search.max_forward_attempts,
        })
    }

    fn oracle_horizon(&self) -> Result<Duration, ConfigError> {
        Duration::try_hours(self.search.oracle_horizon_hours).ok_or_else(|| {
            ConfigError::InvalidSearch("oracle_horizon_hours is out of range".into())
        })
    }

    pub fn oracle(&self) -> Result<Sgp4Oracle, ConfigError> {
        Ok(Sgp4Oracle::new(self.ground_station()?).with_search_horizon(self.oracle_horizon()?))
    }

    /// Load the TLE catalog and apply the configured active list.
    pub fn load_catalog(&self) -> Result<Catalog<Sgp4Elements>, PredictError> {
        let mut catalog = TleLoader::new(self.catalog.tle_path.clone()).load()?;
        if let Some(active) = &self.catalog.active {
            for name in catalog.activate_only(active.as_slice()) {
                log::warn!(
                    "Active object {} not found in {}",
                    name,
                    self.catalog.tle_path.display()
                );
            }
        }
        log::info!(
            "Loaded {} objects ({} active) from {}",
            catalog.len(),
            catalog.active().count(),
            self.catalog.tle_path.display()
        );
        Ok(catalog)
    }
}
