use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::predict::PassWindow;

/// One object's pass competing for the station.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PassCandidate {
    pub object: String,
    pub rise: DateTime<Utc>,
    pub set: DateTime<Utc>,
    pub max_elevation_deg: f64,
}

impl PassCandidate {
    pub fn new(object: &str, window: PassWindow) -> Self {
        Self {
            object: object.to_string(),
            rise: window.rise,
            set: window.set,
            max_elevation_deg: window.max_elevation_deg,
        }
    }

    pub fn window(&self) -> PassWindow {
        PassWindow {
            rise: self.rise,
            set: self.set,
            max_elevation_deg: self.max_elevation_deg,
        }
    }

    pub fn duration(&self) -> Duration {
        self.set - self.rise
    }
}

/// Selected pass together with the threshold gate's decision.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ScheduledPass {
    pub pass: PassCandidate,
    pub armed: bool,
}
