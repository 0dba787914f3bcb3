use chrono::Duration;
use serde::Deserialize;
use std::collections::HashMap;

use crate::scheduler::candidate::PassCandidate;
use crate::timeexpr::deserialize_duration;

/// Policy deciding whether a selected pass should arm the rig.
pub trait ThresholdCheck {
    type Config;

    fn check(&self, pass: &PassCandidate, config: &Self::Config) -> bool;
}

/// Run the threshold check on the scheduler's pick. Nothing selected never arms.
pub fn arm_if_qualifying<C: ThresholdCheck>(
    selection: Option<&PassCandidate>,
    check: &C,
    config: &C::Config,
) -> bool {
    let Some(pass) = selection else {
        return false;
    };
    let armed = check.check(pass, config);
    log::info!(
        "{} pass at {} ({:.1}°, {}s): {}",
        pass.object,
        pass.rise,
        pass.max_elevation_deg,
        pass.duration().num_seconds(),
        if armed { "armed" } else { "below thresholds" }
    );
    armed
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Thresholds {
    #[serde(default)]
    pub min_elevation_deg: f64,
    #[serde(default = "Duration::zero", deserialize_with = "deserialize_duration")]
    pub min_duration: Duration,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            min_elevation_deg: 0.0,
            min_duration: Duration::zero(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ThresholdConfig {
    #[serde(flatten)]
    pub default: Thresholds,
    /// Per-object thresholds, keyed by object name.
    #[serde(default)]
    pub overrides: HashMap<String, Thresholds>,
}

impl ThresholdConfig {
    pub fn for_object(&self, name: &str) -> Thresholds {
        self.overrides.get(name).copied().unwrap_or(self.default)
    }
}

/// Arms when the pass climbs high enough and lasts long enough.
#[derive(Debug, Clone, Copy, Default)]
pub struct ElevationDurationCheck;

impl ThresholdCheck for ElevationDurationCheck {
    type Config = ThresholdConfig;

    fn check(&self, pass: &PassCandidate, config: &ThresholdConfig) -> bool {
        let limits = config.for_object(&pass.object);
        pass.max_elevation_deg >= limits.min_elevation_deg
            && pass.duration() >= limits.min_duration
    }
}
