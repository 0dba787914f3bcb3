use chrono::{DateTime, Utc};

use crate::catalog::{Catalog, TrackedObject};
use crate::predict::{OrbitOracle, PassWindow};
use crate::scheduler::candidate::PassCandidate;
use crate::scheduler::sweep::SearchConfig;

/// Gather at most one pass candidate per active object for `reference`.
///
/// `now` is the wall-clock instant used for range-rate checks, which may
/// differ from `reference` when searching ahead.
pub fn collect_candidates<O: OrbitOracle>(
    objects: &Catalog<O::Elements>,
    oracle: &O,
    reference: DateTime<Utc>,
    now: DateTime<Utc>,
    search: &SearchConfig,
) -> Vec<PassCandidate> {
    objects
        .active()
        .filter_map(|object| candidate_for(object, oracle, reference, now, search))
        .collect()
}

/// Classify one object against `reference`:
///
/// - not yet risen: its upcoming window
/// - up and approaching at `now`: the window in progress
/// - up and receding, or already set: the first later window rising at or
///   after `reference`
pub(crate) fn candidate_for<O: OrbitOracle>(
    object: &TrackedObject<O::Elements>,
    oracle: &O,
    reference: DateTime<Utc>,
    now: DateTime<Utc>,
    search: &SearchConfig,
) -> Option<PassCandidate> {
    let window = propagate_window(object, oracle, reference)?;

    if window.rise >= reference {
        return Some(PassCandidate::new(&object.name, window));
    }

    if window.contains(reference) {
        match oracle.instant_state(object, now) {
            Ok(state) if state.is_approaching() => {
                return Some(PassCandidate::new(&object.name, window));
            }
            Ok(_) => {
                log::debug!("{} is past its peak, looking for its next rise", object.name);
            }
            Err(e) => {
                log::debug!("Skipping {}: {}", object.name, e);
                return None;
            }
        }
    }

    next_window(object, oracle, reference, now, search)
}

fn propagate_window<O: OrbitOracle>(
    object: &TrackedObject<O::Elements>,
    oracle: &O,
    at: DateTime<Utc>,
) -> Option<PassWindow> {
    match oracle.propagate(object, at) {
        Ok(window) if window.rise < window.set => Some(window),
        Ok(window) => {
            log::warn!(
                "Ignoring window of {} with rise {} not before set {}",
                object.name,
                window.rise,
                window.set
            );
            None
        }
        Err(e) => {
            log::debug!("Skipping {}: {}", object.name, e);
            None
        }
    }
}

/// Walk rise by rise from `now` until a window rises at or after `reference`.
fn next_window<O: OrbitOracle>(
    object: &TrackedObject<O::Elements>,
    oracle: &O,
    reference: DateTime<Utc>,
    now: DateTime<Utc>,
    search: &SearchConfig,
) -> Option<PassCandidate> {
    let mut anchor = now;

    for _ in 0..search.max_forward_attempts {
        let rise = match oracle.next_rise_after(object, anchor) {
            Ok(rise) if rise > anchor => rise,
            Ok(rise) => {
                log::warn!(
                    "Next rise of {} at {} is not after {}, giving up",
                    object.name,
                    rise,
                    anchor
                );
                return None;
            }
            Err(e) => {
                log::debug!("No further rise for {}: {}", object.name, e);
                return None;
            }
        };

        let window = propagate_window(object, oracle, rise)?;
        if window.rise >= reference {
            return Some(PassCandidate::new(&object.name, window));
        }
        anchor = rise.max(window.rise);
    }

    log::warn!(
        "No rise of {} at or after {} within {} attempts",
        object.name,
        reference,
        search.max_forward_attempts
    );
    None
}
