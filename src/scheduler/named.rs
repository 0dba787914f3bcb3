use chrono::{DateTime, Utc};

use crate::catalog::Catalog;
use crate::predict::OrbitOracle;
use crate::scheduler::candidate::PassCandidate;
use crate::scheduler::collector::candidate_for;
use crate::scheduler::error::SchedulerError;
use crate::scheduler::sweep::SearchConfig;

/// Next pass of one named object, whether or not it is active.
///
/// An unknown name is an error; an object with no usable pass is `Ok(None)`.
pub fn find_next_pass_for<O: OrbitOracle>(
    objects: &Catalog<O::Elements>,
    oracle: &O,
    name: &str,
    start: DateTime<Utc>,
    now: DateTime<Utc>,
    search: &SearchConfig,
) -> Result<Option<PassCandidate>, SchedulerError> {
    let object = objects
        .get(name)
        .filter(|_| !name.is_empty())
        .ok_or_else(|| SchedulerError::NotFound(name.to_string()))?;

    Ok(candidate_for(object, oracle, start, now, search))
}
