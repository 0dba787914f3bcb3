use chrono::{DateTime, Utc};

use crate::catalog::Catalog;
use crate::predict::OrbitOracle;
use crate::scheduler::candidate::{PassCandidate, ScheduledPass};
use crate::scheduler::error::SchedulerError;
use crate::scheduler::gate::{arm_if_qualifying, ThresholdCheck};
use crate::scheduler::named::find_next_pass_for;
use crate::scheduler::sweep::{find_next_pass, SearchConfig};

/// Binds an oracle and a threshold policy to the pass search.
///
/// The catalog is borrowed per call; callers sharing it with writers must
/// hold a read guard for the duration of the call.
pub struct Scheduler<O, C: ThresholdCheck> {
    oracle: O,
    check: C,
    thresholds: C::Config,
    search: SearchConfig,
}

impl<O: OrbitOracle, C: ThresholdCheck> Scheduler<O, C> {
    pub fn new(oracle: O, check: C, thresholds: C::Config, search: SearchConfig) -> Self {
        Self {
            oracle,
            check,
            thresholds,
            search,
        }
    }

    /// Next pass over all active objects, gated by the thresholds.
    /// `start` defaults to now.
    pub fn next_pass(
        &self,
        catalog: &Catalog<O::Elements>,
        start: Option<DateTime<Utc>>,
    ) -> Option<ScheduledPass> {
        let now = Utc::now();
        self.next_pass_at(catalog, start.unwrap_or(now), now)
    }

    pub fn next_pass_at(
        &self,
        catalog: &Catalog<O::Elements>,
        start: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Option<ScheduledPass> {
        let pass = find_next_pass(catalog, &self.oracle, start, now, &self.search)?;
        let armed = arm_if_qualifying(Some(&pass), &self.check, &self.thresholds);
        Some(ScheduledPass { pass, armed })
    }

    /// Next pass of one object. Never arms: that is left to the caller.
    pub fn next_pass_for(
        &self,
        catalog: &Catalog<O::Elements>,
        name: &str,
        start: Option<DateTime<Utc>>,
    ) -> Result<Option<PassCandidate>, SchedulerError> {
        let now = Utc::now();
        self.next_pass_for_at(catalog, name, start.unwrap_or(now), now)
    }

    pub fn next_pass_for_at(
        &self,
        catalog: &Catalog<O::Elements>,
        name: &str,
        start: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<Option<PassCandidate>, SchedulerError> {
        find_next_pass_for(catalog, &self.oracle, name, start, now, &self.search)
    }
}
