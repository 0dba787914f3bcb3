use chrono::{DateTime, Utc};
use sgp4::{Constants, Elements};

use crate::predict::error::PredictError;
use crate::predict::ground_station::GroundStation;
use crate::predict::types::InstantState;

/// SGP4 element set plus the propagator constants derived from it.
pub struct Sgp4Elements {
    pub elements: Elements,
    pub constants: Constants,
}

impl Sgp4Elements {
    pub fn from_elements(elements: Elements) -> Result<Self, sgp4::ElementsError> {
        let constants = Constants::from_elements(&elements)?;
        Ok(Self {
            elements,
            constants,
        })
    }

    pub fn norad_id(&self) -> u64 {
        self.elements.norad_id
    }
}

/// Earth's rotation rate (rad/s).
const EARTH_ROTATION_RAD_S: f64 = 7.292_115e-5;

type Vec3 = [f64; 3];

pub fn propagate_sample(
    station: &GroundStation,
    sat: &Sgp4Elements,
    timestamp: DateTime<Utc>,
) -> Result<InstantState, PredictError> {
    let minutes = sat
        .elements
        .datetime_to_minutes_since_epoch(&timestamp.naive_utc())
        .map_err(|e| PredictError::Propagation(e.to_string()))?;

    let prediction = sat
        .constants
        .propagate(minutes)
        .map_err(|e| PredictError::Propagation(e.to_string()))?;

    let gmst =
        sgp4::iau_epoch_to_sidereal_time(sgp4::julian_years_since_j2000(&timestamp.naive_utc()));
    let (position, velocity) = earth_fixed_state(prediction.position, prediction.velocity, gmst);
    let look = look_angles(station, position, velocity);

    if !look.range_km.is_finite() || !look.range_rate_km_s.is_finite() {
        return Err(PredictError::Propagation(format!(
            "non-finite state at {}",
            timestamp
        )));
    }

    Ok(InstantState {
        timestamp,
        azimuth_deg: look.azimuth_deg,
        elevation_deg: look.elevation_deg,
        range_km: look.range_km,
        range_rate_km_s: look.range_rate_km_s,
    })
}

struct LookAngles {
    azimuth_deg: f64,
    elevation_deg: f64,
    range_km: f64,
    range_rate_km_s: f64,
}

/// Look angles from a station to an Earth-fixed position and velocity.
/// The station is at rest in this frame, so the range rate is the
/// satellite velocity projected on the line of sight.
fn look_angles(station: &GroundStation, position: Vec3, velocity: Vec3) -> LookAngles {
    let los = sub(position, station.position_ecef_km());
    let range_km = norm(los);
    if range_km == 0.0 {
        return LookAngles {
            azimuth_deg: 0.0,
            elevation_deg: 90.0,
            range_km,
            range_rate_km_s: 0.0,
        };
    }

    let [east, north, up] = enu_basis(station.lat_rad(), station.lon_rad());
    let local = [dot(los, east), dot(los, north), dot(los, up)];

    LookAngles {
        azimuth_deg: local[0].atan2(local[1]).to_degrees().rem_euclid(360.0),
        elevation_deg: (local[2] / range_km).asin().to_degrees(),
        range_km,
        range_rate_km_s: dot(velocity, los) / range_km,
    }
}

/// TEME state rotated into the Earth-fixed frame. The velocity loses the
/// frame rotation term `omega x r` before being rotated.
fn earth_fixed_state(position: Vec3, velocity: Vec3, gmst: f64) -> (Vec3, Vec3) {
    let spin = [
        -EARTH_ROTATION_RAD_S * position[1],
        EARTH_ROTATION_RAD_S * position[0],
        0.0,
    ];
    (
        rotate_z(position, gmst),
        rotate_z(sub(velocity, spin), gmst),
    )
}

/// Express `v` in a frame turned by `angle` about the z axis.
fn rotate_z(v: Vec3, angle: f64) -> Vec3 {
    let (sin, cos) = angle.sin_cos();
    [cos * v[0] + sin * v[1], cos * v[1] - sin * v[0], v[2]]
}

/// Unit east, north and up vectors at a geodetic latitude/longitude.
fn enu_basis(lat_rad: f64, lon_rad: f64) -> [Vec3; 3] {
    let (sin_lat, cos_lat) = lat_rad.sin_cos();
    let (sin_lon, cos_lon) = lon_rad.sin_cos();
    [
        [-sin_lon, cos_lon, 0.0],
        [-sin_lat * cos_lon, -sin_lat * sin_lon, cos_lat],
        [cos_lat * cos_lon, cos_lat * sin_lon, sin_lat],
    ]
}

fn sub(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn dot(a: Vec3, b: Vec3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn norm(v: Vec3) -> f64 {
    dot(v, v).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn equator_station() -> GroundStation {
        GroundStation::new(0.0, 0.0, 0.0)
    }

    /// A point `offset` km away from the equator station, in ECEF axes.
    fn near_station(offset: Vec3) -> Vec3 {
        let base = equator_station().position_ecef_km();
        [base[0] + offset[0], base[1] + offset[1], base[2] + offset[2]]
    }

    #[test]
    fn basis_at_equator() {
        let [east, north, up] = enu_basis(0.0, 0.0);
        assert!(norm(sub(east, [0.0, 1.0, 0.0])) < 1e-12);
        assert!(norm(sub(north, [0.0, 0.0, 1.0])) < 1e-12);
        assert!(norm(sub(up, [1.0, 0.0, 0.0])) < 1e-12);
    }

    #[test]
    fn rotation_preserves_norm() {
        let v = [7000.0, 10.0, -300.0];
        let rotated = rotate_z(v, 1.234);
        assert!((norm(v) - norm(rotated)).abs() < 1e-9);
        assert_eq!(rotated[2], v[2]);
    }

    #[test]
    fn co_rotating_point_has_no_earth_fixed_velocity() {
        let position = [7000.0, 0.0, 0.0];
        let velocity = [0.0, EARTH_ROTATION_RAD_S * 7000.0, 0.0];
        let (_, fixed) = earth_fixed_state(position, velocity, 0.3);
        assert!(norm(fixed) < 1e-12);
    }

    #[test]
    fn look_angles_to_east() {
        let look = look_angles(
            &equator_station(),
            near_station([500.0, 1000.0, 0.0]),
            [0.0; 3],
        );
        assert!((look.azimuth_deg - 90.0).abs() < 1e-9);
        assert!((look.elevation_deg - 26.565).abs() < 1e-3);
        assert!((look.range_km - 1118.034).abs() < 1e-3);
        assert_eq!(look.range_rate_km_s, 0.0);
    }

    #[test]
    fn range_rate_is_negative_when_closing_in() {
        let look = look_angles(
            &equator_station(),
            near_station([500.0, 1000.0, 0.0]),
            [0.0, -7.0, 0.0],
        );
        assert!(look.range_rate_km_s < 0.0);
        assert!((look.range_rate_km_s + 7.0 * 1000.0 / 1118.034).abs() < 1e-3);
    }

    #[test]
    fn range_rate_is_positive_when_moving_away() {
        let look = look_angles(
            &equator_station(),
            near_station([500.0, 1000.0, 0.0]),
            [0.0, 7.0, 0.0],
        );
        assert!(look.range_rate_km_s > 0.0);
    }

    #[test]
    fn crossing_motion_has_zero_range_rate() {
        let look = look_angles(
            &equator_station(),
            near_station([500.0, 0.0, 0.0]),
            [0.0, 0.0, 7.0],
        );
        assert!(look.range_rate_km_s.abs() < 1e-12);
        assert!((look.elevation_deg - 90.0).abs() < 1e-9);
    }
}
