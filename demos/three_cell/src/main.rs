//! three_cell — end-to-end run of the handover & admission controller.
//!
//! Pedestrians wander a 1 km square covered by three small cells.  Their
//! positions drive a log-distance propagation model, and the controller
//! attaches, hands over and drops them step by step.  Step summaries, tower
//! loads and connection events go to CSV.
//!
//! ```text
//! three_cell [scenario.json]
//! RUST_LOG=cs_sim=debug three_cell
//! ```

mod scenario;

use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use cs_core::{TowerId, UNLIMITED_CAPACITY};
use cs_output::{CsvWriter, MetricsObserver};
use cs_signal::SignalSource;
use cs_sim::Controller;

use scenario::Scenario;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_logging();

    let scenario = match std::env::args().nth(1) {
        Some(path) => Scenario::load(Path::new(&path))?,
        None => Scenario::default(),
    };

    println!("=== three_cell — handover & admission control ===");
    println!(
        "Users: {}  |  Steps: {}  |  Seed: {}",
        scenario.users, scenario.steps, scenario.seed
    );
    println!(
        "Margin: {} dB  |  TTT: {} steps  |  Floor: {} dBm",
        scenario.handover.hysteresis_margin_db,
        scenario.handover.time_to_trigger_steps,
        scenario.handover.min_sensitivity_dbm,
    );
    println!();

    // 1. Towers and RSSI.
    let layout = scenario.layout()?;
    let t0 = Instant::now();
    let rssi = scenario.rssi(&layout)?;
    println!(
        "RSSI tensor: {} steps × {} users × {} towers ({:.3} s)",
        rssi.step_count(),
        rssi.user_count(),
        rssi.tower_count(),
        t0.elapsed().as_secs_f64()
    );

    // 2. Controller.
    let mut controller = Controller::builder(&rssi, scenario.handover.clone())
        .ping_pong_window(scenario.ping_pong_window)
        .step_duration_secs(scenario.mobility.step_duration_secs)
        .build()?;

    // 3. Output.
    std::fs::create_dir_all(&scenario.output_dir)?;
    let writer = CsvWriter::new(&scenario.output_dir)?;
    let mut obs = MetricsObserver::new(writer, controller.capacity().to_vec());

    // 4. Run.
    let t0 = Instant::now();
    let metrics = controller.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.take_error() {
        warn!(error = %e, "output incomplete");
    }

    // 5. Summary.
    println!("Run complete in {:.3} s", elapsed.as_secs_f64());
    println!("  total handovers : {}", metrics.total_handovers());
    println!("  ping-pongs      : {}", metrics.ping_pongs());
    println!("  mean dropped    : {:.2} users/step", metrics.mean_dropped());
    println!("  output          : {}", scenario.output_dir.display());
    println!();

    // 6. Per-tower table.
    let served_at_end = |tower: TowerId| {
        controller
            .connections()
            .iter()
            .filter(|c| c.serving() == Some(tower))
            .count()
    };

    println!("{:<4} {:<10} {:>10} {:>6} {:>6}", "Id", "Tower", "Capacity", "Peak", "Final");
    println!("{}", "-".repeat(40));
    let peaks = metrics.peak_loads();
    for (i, (&cap, &peak)) in controller.capacity().iter().zip(&peaks).enumerate() {
        let id   = TowerId(i as u32);
        let name = layout.get(id).map_or("-", |t| t.name.as_str());
        let cap  = if cap == UNLIMITED_CAPACITY { "unlimited".to_owned() } else { cap.to_string() };
        println!("{:<4} {:<10} {:>10} {:>6} {:>6}", i, name, cap, peak, served_at_end(id));
    }

    Ok(())
}
