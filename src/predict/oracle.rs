use chrono::{DateTime, Utc};

use crate::catalog::TrackedObject;
use crate::predict::error::PredictError;
use crate::predict::types::{InstantState, PassWindow};

/// Source of orbital geometry for the scheduler.
///
/// Implementations are expected to be deterministic for a given object and
/// instant; the scheduler may ask the same question more than once per query.
pub trait OrbitOracle {
    /// Orbital element set carried by each tracked object.
    type Elements;

    /// Visibility window relevant at `at`: the window in progress if the
    /// object is above the horizon, otherwise the next one.
    fn propagate(
        &self,
        object: &TrackedObject<Self::Elements>,
        at: DateTime<Utc>,
    ) -> Result<PassWindow, PredictError>;

    fn instant_state(
        &self,
        object: &TrackedObject<Self::Elements>,
        at: DateTime<Utc>,
    ) -> Result<InstantState, PredictError>;

    /// First rise strictly after `after`.
    fn next_rise_after(
        &self,
        object: &TrackedObject<Self::Elements>,
        after: DateTime<Utc>,
    ) -> Result<DateTime<Utc>, PredictError>;
}
