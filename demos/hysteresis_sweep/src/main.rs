//! hysteresis_sweep — how the hysteresis margin trades handovers against
//! ping-pong.
//!
//! Generates one RSSI tensor and replays it through an independent
//! controller for each margin.  Time-to-trigger is 1 and capacity unlimited,
//! so the margin is the only thing suppressing handovers.
//!
//! ```text
//! hysteresis_sweep          # table
//! hysteresis_sweep --json   # one JSON array on stdout
//! ```

use std::time::Instant;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cs_core::{HandoverConfig, SimRng, TowerCapacity};
use cs_mobility::{MobilityEngine, MobilityParams};
use cs_signal::{PathLossModel, TowerLayout, compute_rssi};
use cs_sim::hysteresis_sweep;

// ── Constants ─────────────────────────────────────────────────────────────────

const USER_COUNT: usize  = 100;
const STEPS:      usize  = 500;
const SEED:       u64    = 42;
const MARGINS_DB: [f64; 6] = [0.0, 1.0, 2.0, 3.0, 5.0, 10.0];

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_logging();
    let json = std::env::args().any(|a| a == "--json");

    let mut rng = SimRng::new(SEED);
    let mobility_seed = rng.stage_seed();
    let shadow_seed   = rng.stage_seed();

    let positions = MobilityEngine::new(MobilityParams::default(), USER_COUNT, mobility_seed)?
        .generate(STEPS);
    let rssi = compute_rssi(
        &positions,
        &TowerLayout::three_cell(),
        &PathLossModel::default(),
        shadow_seed,
    )?;

    let base = HandoverConfig {
        time_to_trigger_steps: 1,
        tower_capacity:        TowerCapacity::Unlimited,
        ..HandoverConfig::default()
    };

    let t0 = Instant::now();
    let points = hysteresis_sweep(&rssi, &base, &MARGINS_DB)?;
    info!(elapsed_secs = t0.elapsed().as_secs_f64(), "sweep complete");

    if json {
        println!("{}", serde_json::to_string_pretty(&points)?);
        return Ok(());
    }

    println!("=== hysteresis sweep — {USER_COUNT} users, {STEPS} steps, seed {SEED} ===");
    println!();
    println!("{:>10} {:>10} {:>11} {:>13}", "Margin dB", "Handovers", "Ping-pongs", "Mean dropped");
    println!("{}", "-".repeat(47));
    for p in &points {
        println!(
            "{:>10.1} {:>10} {:>11} {:>13.2}",
            p.margin_db, p.total_handovers, p.ping_pongs, p.mean_dropped
        );
    }

    Ok(())
}
