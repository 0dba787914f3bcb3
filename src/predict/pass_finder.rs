use chrono::{DateTime, Duration, Utc};

use crate::catalog::TrackedObject;
use crate::predict::error::PredictError;
use crate::predict::ground_station::GroundStation;
use crate::predict::oracle::OrbitOracle;
use crate::predict::propagation::{propagate_sample, Sgp4Elements};
use crate::predict::types::{InstantState, PassWindow};

const COARSE_STEP_SECONDS: i64 = 60; // 1 minute for initial scan
const FINE_STEP_SECONDS: i64 = 1; // 1 second for refinement
const DEFAULT_HORIZON_HOURS: i64 = 72;

/// Orbit oracle backed by SGP4 for a single ground station.
#[derive(Debug, Clone)]
pub struct Sgp4Oracle {
    station: GroundStation,
    search_horizon: Duration,
}

impl Sgp4Oracle {
    pub fn new(station: GroundStation) -> Self {
        Self {
            station,
            search_horizon: Duration::hours(DEFAULT_HORIZON_HOURS),
        }
    }

    pub fn with_search_horizon(mut self, horizon: Duration) -> Self {
        self.search_horizon = horizon;
        self
    }

    fn sample(&self, sat: &Sgp4Elements, at: DateTime<Utc>) -> Result<InstantState, PredictError> {
        propagate_sample(&self.station, sat, at)
    }

    fn visible(&self, sat: &Sgp4Elements, at: DateTime<Utc>) -> Result<bool, PredictError> {
        let sample = self.sample(sat, at)?;
        Ok(self
            .station
            .is_visible(sample.azimuth_deg, sample.elevation_deg))
    }

    /// Coarse scan from `from` in steps of `step` until visibility equals
    /// `want_visible`, then bisect the last step down to one second.
    /// Returns the first instant (in scan direction) with the wanted state.
    fn scan_crossing(
        &self,
        sat: &Sgp4Elements,
        from: DateTime<Utc>,
        step: Duration,
        want_visible: bool,
    ) -> Result<Option<DateTime<Utc>>, PredictError> {
        let backwards = step < Duration::zero();
        let horizon = if backwards {
            -self.search_horizon
        } else {
            self.search_horizon
        };
        // the scan stops at the representable range as well
        let limit = from.checked_add_signed(horizon).unwrap_or(if backwards {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        });
        let past_limit = |t: DateTime<Utc>| if backwards { t < limit } else { t > limit };

        let mut prev = from;
        let mut next = from.checked_add_signed(step);
        while let Some(cursor) = next.filter(|t| !past_limit(*t)) {
            if self.visible(sat, cursor)? == want_visible {
                return self.refine_crossing(sat, prev, cursor, want_visible).map(Some);
            }
            prev = cursor;
            next = cursor.checked_add_signed(step);
        }
        Ok(None)
    }

    /// Binary search between `known` (not in the wanted state) and `found`
    /// (in the wanted state).
    fn refine_crossing(
        &self,
        sat: &Sgp4Elements,
        known: DateTime<Utc>,
        found: DateTime<Utc>,
        want_visible: bool,
    ) -> Result<DateTime<Utc>, PredictError> {
        let mut outside = known;
        let mut inside = found;

        while (inside - outside).num_seconds().abs() > FINE_STEP_SECONDS {
            let mid = outside + (inside - outside) / 2;
            if self.visible(sat, mid)? == want_visible {
                inside = mid;
            } else {
                outside = mid;
            }
        }

        Ok(inside)
    }

    /// Highest coarse elevation sample between rise and set.
    fn max_elevation(
        &self,
        sat: &Sgp4Elements,
        rise: DateTime<Utc>,
        set: DateTime<Utc>,
    ) -> Result<f64, PredictError> {
        let step = Duration::seconds(COARSE_STEP_SECONDS);
        let mut max_el = self.sample(sat, rise)?.elevation_deg;
        let mut cursor = rise.checked_add_signed(step);
        while let Some(t) = cursor.filter(|t| *t < set) {
            max_el = max_el.max(self.sample(sat, t)?.elevation_deg);
            cursor = t.checked_add_signed(step);
        }
        max_el = max_el.max(self.sample(sat, set)?.elevation_deg);
        Ok(round2(max_el))
    }

    fn window_from_rise(
        &self,
        sat: &Sgp4Elements,
        rise: DateTime<Utc>,
    ) -> Result<PassWindow, PredictError> {
        let set = self
            .scan_crossing(sat, rise, Duration::seconds(COARSE_STEP_SECONDS), false)?
            .ok_or(PredictError::NoSet)?;
        Ok(PassWindow {
            rise,
            set,
            max_elevation_deg: self.max_elevation(sat, rise, set)?,
        })
    }

    fn rise_after(
        &self,
        sat: &Sgp4Elements,
        after: DateTime<Utc>,
    ) -> Result<DateTime<Utc>, PredictError> {
        let coarse = Duration::seconds(COARSE_STEP_SECONDS);
        let mut from = after;
        if self.visible(sat, after)? {
            // wait for the pass in progress to end first
            from = self
                .scan_crossing(sat, after, coarse, false)?
                .ok_or(PredictError::NoSet)?;
        }
        self.scan_crossing(sat, from, coarse, true)?
            .ok_or(PredictError::NoRise)
    }
}

impl OrbitOracle for Sgp4Oracle {
    type Elements = Sgp4Elements;

    fn propagate(
        &self,
        object: &TrackedObject<Sgp4Elements>,
        at: DateTime<Utc>,
    ) -> Result<PassWindow, PredictError> {
        let sat = &object.elements;
        if self.visible(sat, at)? {
            let rise = self
                .scan_crossing(sat, at, Duration::seconds(-COARSE_STEP_SECONDS), false)?
                .ok_or(PredictError::NoRise)?;
            // scan_crossing returns the first instant below the horizon
            let rise = rise + Duration::seconds(FINE_STEP_SECONDS);
            let window = self.window_from_rise(sat, rise.min(at))?;
            return Ok(window);
        }
        let rise = self.rise_after(sat, at)?;
        self.window_from_rise(sat, rise)
    }

    fn instant_state(
        &self,
        object: &TrackedObject<Sgp4Elements>,
        at: DateTime<Utc>,
    ) -> Result<InstantState, PredictError> {
        self.sample(&object.elements, at)
    }

    fn next_rise_after(
        &self,
        object: &TrackedObject<Sgp4Elements>,
        after: DateTime<Utc>,
    ) -> Result<DateTime<Utc>, PredictError> {
        self.rise_after(&object.elements, after)
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const ISS_LINE1: &str = "1 25544U 98067A   20194.88612269 -.00002218  00000-0 -31515-4 0  9992";
    const ISS_LINE2: &str = "2 25544  51.6461 221.2784 0001413  89.1723 280.4612 15.49507896236008";

    fn iss() -> TrackedObject<Sgp4Elements> {
        let elements = sgp4::Elements::from_tle(
            Some("ISS (ZARYA)".to_string()),
            ISS_LINE1.as_bytes(),
            ISS_LINE2.as_bytes(),
        )
        .unwrap();
        TrackedObject::new("ISS (ZARYA)", Sgp4Elements::from_elements(elements).unwrap())
    }

    fn oracle() -> Sgp4Oracle {
        Sgp4Oracle::new(GroundStation::new(45.0, 7.0, 300.0))
    }

    fn epoch() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 7, 13, 0, 0, 0).unwrap()
    }

    #[test]
    fn window_brackets_or_follows_reference() {
        let sat = iss();
        let window = oracle().propagate(&sat, epoch()).unwrap();

        assert!(window.rise < window.set);
        assert!(window.set > epoch());
        assert!(window.set - window.rise < Duration::minutes(20));
        assert!(window.max_elevation_deg >= 0.0);
        assert!(window.max_elevation_deg <= 90.0);
    }

    #[test]
    fn next_rise_is_strictly_later() {
        let sat = iss();
        let oracle = oracle();
        let first = oracle.next_rise_after(&sat, epoch()).unwrap();
        assert!(first > epoch());

        let second = oracle.next_rise_after(&sat, first).unwrap();
        assert!(second > first);
        // one orbit is roughly 93 minutes
        assert!(second - first >= Duration::minutes(80));
    }

    #[test]
    fn propagate_at_rise_returns_that_pass() {
        let sat = iss();
        let oracle = oracle();
        let rise = oracle.next_rise_after(&sat, epoch()).unwrap();
        let window = oracle.propagate(&sat, rise).unwrap();

        assert!((window.rise - rise).num_seconds().abs() <= 5);
        assert!(window.set > rise);
    }

    #[test]
    fn range_rate_falls_then_rises_over_a_pass() {
        let sat = iss();
        let oracle = oracle();
        let mut rise = oracle.next_rise_after(&sat, epoch()).unwrap();
        let mut window = oracle.propagate(&sat, rise).unwrap();
        // skip grazing passes
        while window.set - window.rise < Duration::minutes(4) {
            rise = oracle.next_rise_after(&sat, rise).unwrap();
            window = oracle.propagate(&sat, rise).unwrap();
        }

        let early = oracle
            .instant_state(&sat, window.rise + Duration::seconds(30))
            .unwrap();
        let late = oracle
            .instant_state(&sat, window.set - Duration::seconds(30))
            .unwrap();
        assert!(early.is_approaching());
        assert!(early.range_rate_km_s < -0.5);
        assert!(late.range_rate_km_s > 0.5);
    }

    #[test]
    fn scan_near_end_of_time_does_not_panic() {
        let sat = iss();
        let near_end = DateTime::<Utc>::MAX_UTC - Duration::minutes(30);
        if let Ok(rise) = oracle().next_rise_after(&sat, near_end) {
            assert!(rise > near_end);
        }
    }

    #[test]
    fn instant_state_is_finite() {
        let state = oracle().instant_state(&iss(), epoch()).unwrap();
        assert!(state.range_km > 0.0);
        assert!(state.range_rate_km_s.is_finite());
        assert!((0.0..360.0).contains(&state.azimuth_deg));
    }

    #[test]
    fn short_horizon_reports_no_rise() {
        let sat = iss();
        let oracle = oracle().with_search_horizon(Duration::minutes(1));
        let mut at = epoch();
        // walk to a moment below the horizon so the scan has to look ahead
        while oracle.instant_state(&sat, at).unwrap().elevation_deg >= 0.0 {
            at += Duration::minutes(5);
        }
        let state = oracle.instant_state(&sat, at + Duration::minutes(1)).unwrap();
        if state.elevation_deg < 0.0 {
            assert!(matches!(
                oracle.next_rise_after(&sat, at),
                Err(PredictError::NoRise)
            ));
        }
    }
}
