mod candidate;
mod collector;
mod engine;
mod error;
mod gate;
mod named;
mod overlap;
mod selector;
mod sweep;
#[cfg(test)]
pub(crate) mod testing;

pub use candidate::{PassCandidate, ScheduledPass};
pub use collector::collect_candidates;
pub use engine::Scheduler;
pub use error::SchedulerError;
pub use gate::{
    arm_if_qualifying, ElevationDurationCheck, ThresholdCheck, ThresholdConfig, Thresholds,
};
pub use named::find_next_pass_for;
pub use overlap::overlaps;
pub use selector::select;
pub use sweep::{find_next_pass, SearchConfig};
