mod error;
mod ground_station;
mod oracle;
mod pass_finder;
mod propagation;
mod tle_loader;
mod types;

pub use error::PredictError;
pub use ground_station::{GroundStation, MaskPoint};
pub use oracle::OrbitOracle;
pub use pass_finder::Sgp4Oracle;
pub use propagation::Sgp4Elements;
pub use tle_loader::{parse_tle_content, TleLoader};
pub use types::{InstantState, PassWindow};
