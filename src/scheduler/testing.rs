//! Scripted orbit oracle for scheduler tests.

use chrono::{DateTime, Duration, TimeZone, Utc};
use std::cell::Cell;
use std::collections::HashMap;

use crate::catalog::{Catalog, TrackedObject};
use crate::predict::{InstantState, OrbitOracle, PassWindow, PredictError};

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

pub fn mins(m: i64) -> DateTime<Utc> {
    t0() + Duration::minutes(m)
}

pub fn window(rise: i64, set: i64, max_elevation_deg: f64) -> PassWindow {
    PassWindow {
        rise: mins(rise),
        set: mins(set),
        max_elevation_deg,
    }
}

pub fn catalog(names: &[&str]) -> Catalog<()> {
    names.iter().map(|n| TrackedObject::new(*n, ())).collect()
}

#[derive(Default)]
struct Script {
    passes: Vec<PassWindow>,
    range_rate_km_s: f64,
    valid_from: Option<DateTime<Utc>>,
    broken: bool,
    rise_override: Option<DateTime<Utc>>,
}

/// Answers from a fixed list of passes per object name.
#[derive(Default)]
pub struct ScriptedOracle {
    scripts: HashMap<String, Script>,
    pub propagations: Cell<usize>,
    pub rise_queries: Cell<usize>,
    pub state_queries: Cell<usize>,
}

impl ScriptedOracle {
    pub fn new() -> Self {
        Self::default()
    }

    fn script(&mut self, name: &str) -> &mut Script {
        self.scripts.entry(name.to_string()).or_default()
    }

    pub fn passes(mut self, name: &str, passes: &[PassWindow]) -> Self {
        let script = self.script(name);
        script.passes = passes.to_vec();
        script.passes.sort_by_key(|w| w.rise);
        self
    }

    pub fn range_rate(mut self, name: &str, range_rate_km_s: f64) -> Self {
        self.script(name).range_rate_km_s = range_rate_km_s;
        self
    }

    /// Propagation fails for reference instants before `from`.
    pub fn valid_from(mut self, name: &str, from: DateTime<Utc>) -> Self {
        self.script(name).valid_from = Some(from);
        self
    }

    pub fn broken(mut self, name: &str) -> Self {
        self.script(name).broken = true;
        self
    }

    /// `next_rise_after` always answers with `rise`, whatever it is asked.
    pub fn stuck_rise(mut self, name: &str, rise: DateTime<Utc>) -> Self {
        self.script(name).rise_override = Some(rise);
        self
    }

    fn lookup(&self, object: &TrackedObject<()>) -> Result<&Script, PredictError> {
        let script = self
            .scripts
            .get(&object.name)
            .ok_or_else(|| PredictError::Propagation(format!("no elements for {}", object.name)))?;
        if script.broken {
            return Err(PredictError::Propagation("math domain error".into()));
        }
        Ok(script)
    }
}

fn bump(counter: &Cell<usize>) {
    counter.set(counter.get() + 1);
}

impl OrbitOracle for ScriptedOracle {
    type Elements = ();

    fn propagate(
        &self,
        object: &TrackedObject<()>,
        at: DateTime<Utc>,
    ) -> Result<PassWindow, PredictError> {
        bump(&self.propagations);
        let script = self.lookup(object)?;
        if script.valid_from.is_some_and(|from| at < from) {
            return Err(PredictError::Propagation("stale elements".into()));
        }
        script
            .passes
            .iter()
            .find(|w| w.set > at)
            .copied()
            .ok_or(PredictError::NoRise)
    }

    fn instant_state(
        &self,
        object: &TrackedObject<()>,
        at: DateTime<Utc>,
    ) -> Result<InstantState, PredictError> {
        bump(&self.state_queries);
        let script = self.lookup(object)?;
        Ok(InstantState {
            timestamp: at,
            azimuth_deg: 0.0,
            elevation_deg: 0.0,
            range_km: 1000.0,
            range_rate_km_s: script.range_rate_km_s,
        })
    }

    fn next_rise_after(
        &self,
        object: &TrackedObject<()>,
        after: DateTime<Utc>,
    ) -> Result<DateTime<Utc>, PredictError> {
        bump(&self.rise_queries);
        let script = self.lookup(object)?;
        if let Some(rise) = script.rise_override {
            return Ok(rise);
        }
        script
            .passes
            .iter()
            .map(|w| w.rise)
            .find(|rise| *rise > after)
            .ok_or(PredictError::NoRise)
    }
}
