use std::sync::Arc;

use crate::catalog::SharedCatalog;
use crate::predict::{Sgp4Elements, Sgp4Oracle};
use crate::scheduler::{ElevationDurationCheck, Scheduler};

pub type StationScheduler = Scheduler<Sgp4Oracle, ElevationDurationCheck>;

#[derive(Clone)]
pub struct AppState {
    pub catalog: SharedCatalog<Sgp4Elements>,
    pub scheduler: Arc<StationScheduler>,
}

#[cfg(test)]
pub(crate) fn test_state() -> AppState {
    use crate::catalog::Catalog;
    use crate::predict::{parse_tle_content, GroundStation};
    use crate::scheduler::{SearchConfig, ThresholdConfig};

    const TLES: &str = "ISS (ZARYA)
1 25544U 98067A   20194.88612269 -.00002218  00000-0 -31515-4 0  9992
2 25544  51.6461 221.2784 0001413  89.1723 280.4612 15.49507896236008
";
    let catalog: Catalog<Sgp4Elements> = parse_tle_content(TLES, "test.txt")
        .unwrap()
        .into_iter()
        .collect();
    let oracle = Sgp4Oracle::new(GroundStation::new(45.0, 7.0, 300.0));
    let scheduler = Scheduler::new(
        oracle,
        ElevationDurationCheck,
        ThresholdConfig::default(),
        SearchConfig {
            max_steps: 2,
            ..SearchConfig::default()
        },
    );
    AppState {
        catalog: catalog.into_shared(),
        scheduler: Arc::new(scheduler),
    }
}
