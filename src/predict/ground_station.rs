use serde::Deserialize;

/// A point of the local horizon mask.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct MaskPoint {
    pub azimuth_deg: f64,
    pub elevation_deg: f64,
}

#[derive(Debug, Clone, Default)]
pub struct GroundStation {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub altitude_m: f64,
    horizon_mask: Vec<MaskPoint>,
}

impl GroundStation {
    pub fn new(latitude_deg: f64, longitude_deg: f64, altitude_m: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
            altitude_m,
            horizon_mask: Vec::new(),
        }
    }

    pub fn from_coordinates(coordinates: &str, altitude_m: Option<f64>) -> Option<Self> {
        let parts: Vec<_> = coordinates.split(',').map(|s| s.trim()).collect();
        if parts.len() < 2 {
            return None;
        }
        let lat: f64 = parts[0].parse().ok()?;
        let lon: f64 = parts[1].parse().ok()?;
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return None;
        }
        Some(Self::new(lat, lon, altitude_m.unwrap_or(0.0)))
    }

    pub fn with_horizon_mask(mut self, mut mask: Vec<MaskPoint>) -> Self {
        for point in &mut mask {
            point.azimuth_deg = point.azimuth_deg.rem_euclid(360.0);
        }
        mask.sort_by(|a, b| a.azimuth_deg.total_cmp(&b.azimuth_deg));
        self.horizon_mask = mask;
        self
    }

    /// Minimum elevation at which an object counts as above the horizon,
    /// interpolated linearly between mask points and wrapping at 360°.
    pub fn horizon_at(&self, azimuth_deg: f64) -> f64 {
        let mask = &self.horizon_mask;
        match mask.len() {
            0 => 0.0,
            1 => mask[0].elevation_deg,
            n => {
                let az = azimuth_deg.rem_euclid(360.0);
                let upper = mask.iter().position(|p| p.azimuth_deg >= az);
                let (lo, hi) = match upper {
                    Some(0) | None => (mask[n - 1], mask[0]),
                    Some(i) => (mask[i - 1], mask[i]),
                };
                let span = (hi.azimuth_deg - lo.azimuth_deg).rem_euclid(360.0);
                if span == 0.0 {
                    return lo.elevation_deg;
                }
                let offset = (az - lo.azimuth_deg).rem_euclid(360.0);
                lo.elevation_deg + (hi.elevation_deg - lo.elevation_deg) * offset / span
            }
        }
    }

    pub fn is_visible(&self, azimuth_deg: f64, elevation_deg: f64) -> bool {
        elevation_deg >= self.horizon_at(azimuth_deg)
    }

    pub fn lat_rad(&self) -> f64 {
        self.latitude_deg.to_radians()
    }

    pub fn lon_rad(&self) -> f64 {
        self.longitude_deg.to_radians()
    }

    pub fn position_ecef_km(&self) -> [f64; 3] {
        // WGS-84 constants
        let a = 6378.137;
        let e2 = 0.00669437999014;
        let lat = self.lat_rad();
        let lon = self.lon_rad();
        let sin_lat = lat.sin();
        let cos_lat = lat.cos();
        let n = a / (1.0 - e2 * sin_lat * sin_lat).sqrt();
        let alt_km = self.altitude_m / 1000.0;
        [
            (n + alt_km) * cos_lat * lon.cos(),
            (n + alt_km) * cos_lat * lon.sin(),
            (n * (1.0 - e2) + alt_km) * sin_lat,
        ]
    }
}
