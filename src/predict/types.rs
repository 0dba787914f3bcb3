use chrono::{DateTime, Utc};

/// One visibility window of a tracked object, as seen from the station.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassWindow {
    pub rise: DateTime<Utc>,
    pub set: DateTime<Utc>,
    pub max_elevation_deg: f64,
}

impl PassWindow {
    /// True when `at` lies strictly between rise and set.
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.rise < at && at < self.set
    }
}

/// Look angles and range rate at a single instant.
#[derive(Debug, Clone)]
pub struct InstantState {
    pub timestamp: DateTime<Utc>,
    pub azimuth_deg: f64,
    pub elevation_deg: f64,
    pub range_km: f64,
    pub range_rate_km_s: f64,
}

impl InstantState {
    /// Negative range rate: the object is closing in on the station.
    pub fn is_approaching(&self) -> bool {
        self.range_rate_km_s < 0.0
    }
}
