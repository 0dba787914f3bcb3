use chrono::{DateTime, Duration, Utc};

use crate::catalog::Catalog;
use crate::predict::OrbitOracle;
use crate::scheduler::candidate::PassCandidate;
use crate::scheduler::collector::collect_candidates;
use crate::scheduler::selector::select;

pub const DEFAULT_STEP_SECONDS: i64 = 60;
/// 144 steps of 60 s; each step re-anchors every object's search.
pub const DEFAULT_MAX_STEPS: usize = 144;
pub const DEFAULT_MAX_FORWARD_ATTEMPTS: usize = 256;

#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Distance between successive reference instants of a sweep.
    pub step: Duration,
    pub max_steps: usize,
    /// Upper bound on rise-by-rise lookups for a single object.
    pub max_forward_attempts: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            step: Duration::seconds(DEFAULT_STEP_SECONDS),
            max_steps: DEFAULT_MAX_STEPS,
            max_forward_attempts: DEFAULT_MAX_FORWARD_ATTEMPTS,
        }
    }
}

/// Step forward from `start` until some active object yields a candidate,
/// then select among that step's candidates.
///
/// Returns `None` when nothing is active or nothing rises within the sweep.
pub fn find_next_pass<O: OrbitOracle>(
    objects: &Catalog<O::Elements>,
    oracle: &O,
    start: DateTime<Utc>,
    now: DateTime<Utc>,
    search: &SearchConfig,
) -> Option<PassCandidate> {
    if !objects.has_active() {
        log::debug!("No active objects, nothing to schedule");
        return None;
    }

    let mut reference = start;
    for step in 0..search.max_steps {
        let candidates = collect_candidates(objects, oracle, reference, now, search);
        if !candidates.is_empty() {
            log::debug!(
                "Found {} candidate(s) at sweep step {} ({})",
                candidates.len(),
                step,
                reference
            );
            return select(&candidates);
        }
        reference = match reference.checked_add_signed(search.step) {
            Some(next) => next,
            None => {
                log::warn!("Sweep from {} ran past the end of time", start);
                return None;
            }
        };
    }

    log::info!(
        "No pass found within {} steps from {}",
        search.max_steps,
        start
    );
    None
}
