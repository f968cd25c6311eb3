//! Hysteresis-margin parameter sweep.

use cs_core::HandoverConfig;
use cs_signal::SignalSource;
use tracing::info;

use crate::{Controller, NoopObserver, SimResult};

/// Outcome of one run of a sweep.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SweepPoint {
    pub margin_db:       f64,
    pub total_handovers: u64,
    pub mean_dropped:    f64,
    pub ping_pongs:      u64,
}

/// Run one independent controller per margin over the same source, with
/// every other setting taken from `base`.
///
/// Points come back in the order of `margins`.  With the `parallel` feature
/// the runs share Rayon's pool; each run is still sequential inside.  The
/// first failing run fails the sweep.
pub fn hysteresis_sweep<S>(
    source:  &S,
    base:    &HandoverConfig,
    margins: &[f64],
) -> SimResult<Vec<SweepPoint>>
where
    S: SignalSource + Sync,
{
    let run_one = |&margin_db: &f64| -> SimResult<SweepPoint> {
        let metrics = Controller::builder(source, base.with_hysteresis(margin_db))
            .build()?
            .run(&mut NoopObserver)?;
        Ok(SweepPoint {
            margin_db,
            total_handovers: metrics.total_handovers(),
            mean_dropped:    metrics.mean_dropped(),
            ping_pongs:      metrics.ping_pongs(),
        })
    };

    #[cfg(not(feature = "parallel"))]
    let points: SimResult<Vec<SweepPoint>> = margins.iter().map(run_one).collect();

    #[cfg(feature = "parallel")]
    let points: SimResult<Vec<SweepPoint>> = {
        use rayon::prelude::*;
        margins.par_iter().map(run_one).collect()
    };

    let points = points?;
    info!(points = points.len(), "hysteresis sweep finished");
    Ok(points)
}
