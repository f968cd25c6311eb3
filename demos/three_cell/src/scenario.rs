//! Scenario file for the three-cell demo.
//!
//! Every field is optional; missing fields take the reference values.
//!
//! ```json
//! {
//!   "users": 200,
//!   "steps": 300,
//!   "handover": { "hysteresis_margin_db": 5.0, "tower_capacity": { "uniform": 60 } },
//!   "path_loss": { "shadowing_sigma_db": 4.0 }
//! }
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use cs_core::{HandoverConfig, SimRng};
use cs_mobility::{MobilityEngine, MobilityParams};
use cs_signal::{PathLossModel, RssiSeries, TowerLayout, TowerSite, compute_rssi, load_rssi_csv};

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub users:            usize,
    pub steps:            usize,
    pub seed:             u64,
    pub mobility:         MobilityParams,
    pub path_loss:        PathLossModel,
    pub handover:         HandoverConfig,
    pub ping_pong_window: u64,
    /// Replaces the built-in three-cell layout.
    pub towers:           Option<Vec<TowerSite>>,
    /// Load measured RSSI from a long-format CSV instead of generating it.
    pub rssi_csv:         Option<PathBuf>,
    pub output_dir:       PathBuf,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            users:            100,
            steps:            500,
            seed:             42,
            mobility:         MobilityParams::default(),
            path_loss:        PathLossModel::default(),
            handover:         HandoverConfig::default(),
            ping_pong_window: 5,
            towers:           None,
            rssi_csv:         None,
            output_dir:       PathBuf::from("output/three_cell"),
        }
    }
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading scenario {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing scenario {}", path.display()))
    }

    pub fn layout(&self) -> Result<TowerLayout> {
        match &self.towers {
            Some(sites) => Ok(TowerLayout::new(sites.iter().cloned())?),
            None => Ok(TowerLayout::three_cell()),
        }
    }

    /// Produce the RSSI tensor: mobility then propagation, each stage with
    /// its own seed drawn from the scenario seed.
    pub fn rssi(&self, layout: &TowerLayout) -> Result<RssiSeries> {
        if let Some(path) = &self.rssi_csv {
            return Ok(load_rssi_csv(path)?);
        }

        let mut rng = SimRng::new(self.seed);
        let mobility_seed = rng.stage_seed();
        let shadow_seed   = rng.stage_seed();

        let positions = MobilityEngine::new(self.mobility.clone(), self.users, mobility_seed)?
            .generate(self.steps);
        Ok(compute_rssi(&positions, layout, &self.path_loss, shadow_seed)?)
    }
}
