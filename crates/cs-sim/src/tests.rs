//! Integration tests for cs-sim.

use cs_core::{
    CoreError, HandoverConfig, Step, TowerCapacity, TowerId, UserId, UserRng,
};
use cs_handover::{ConnectionEvent, ConnectionState};
use cs_signal::{RssiSeries, SignalError, SignalResult, SignalSnapshot, SignalSource};

use crate::*;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn config(margin: f64, ttt: u32, capacity: TowerCapacity) -> HandoverConfig {
    HandoverConfig {
        hysteresis_margin_db:  margin,
        time_to_trigger_steps: ttt,
        min_sensitivity_dbm:   -110.0,
        tower_capacity:        capacity,
    }
}

/// Uniform random RSSI in [-120, -50) dBm, reproducible per seed.
fn random_series(steps: usize, users: usize, towers: usize, seed: u64) -> RssiSeries {
    let mut rngs: Vec<UserRng> = (0..users as u32).map(|u| UserRng::new(seed, UserId(u))).collect();
    RssiSeries::from_fn(steps, users, towers, |_, u, _| rngs[u.index()].gen_range(-120.0..-50.0))
}

/// Every user flips between tower 0 and tower 1 every `phase` steps.  User
/// `u`'s favoured tower leads by `2 * (u + 1)` dB.
fn oscillating_series(steps: usize, users: usize, phase: usize) -> RssiSeries {
    RssiSeries::from_fn(steps, users, 2, |t, u, k| {
        let lead = 2.0 * (u.0 as f64 + 1.0);
        let favoured = (t.index() / phase) % 2;
        if k.index() == favoured { -70.0 } else { -70.0 - lead }
    })
}

fn run(source: &RssiSeries, cfg: HandoverConfig) -> MetricsSeries {
    Controller::builder(source, cfg)
        .build()
        .unwrap()
        .run(&mut NoopObserver)
        .unwrap()
}

/// Records every callback in order.
#[derive(Default)]
struct Recorder {
    starts: Vec<Step>,
    events: Vec<(Step, UserId, ConnectionEvent)>,
    ends:   Vec<StepResult>,
    runs:   usize,
}

impl StepObserver for Recorder {
    fn on_step_start(&mut self, step: Step) {
        self.starts.push(step);
    }

    fn on_event(&mut self, step: Step, user: UserId, event: &ConnectionEvent) {
        self.events.push((step, user, *event));
    }

    fn on_step_end(&mut self, result: &StepResult) {
        self.ends.push(result.clone());
    }

    fn on_run_end(&mut self, _metrics: &MetricsSeries) {
        self.runs += 1;
    }
}

/// A source whose `validate` lies: step 2 has the wrong shape.
struct Flaky(RssiSeries);

impl SignalSource for Flaky {
    fn step_count(&self) -> usize {
        self.0.step_count()
    }

    fn user_count(&self) -> usize {
        self.0.user_count()
    }

    fn tower_count(&self) -> usize {
        self.0.tower_count()
    }

    fn snapshot(&self, step: Step) -> SignalResult<SignalSnapshot<'_>> {
        if step == Step(2) {
            return SignalSnapshot::new(step, 1, 1, vec![-60.0]);
        }
        self.0.snapshot(step)
    }

    fn validate(&self) -> SignalResult<()> {
        Ok(())
    }
}

// ── ControllerBuilder validation ──────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_with_everyone_unserved() {
        let rssi = random_series(4, 3, 2, 1);
        let c = Controller::builder(&rssi, HandoverConfig::default()).build().unwrap();
        assert_eq!(c.connections(), &[ConnectionState::Unserved; 3]);
        assert_eq!(c.capacity(), &[40, 40]);
        assert_eq!(c.current_step(), Step(0));
    }

    #[test]
    fn zero_ttt_rejected() {
        let rssi = random_series(4, 3, 2, 1);
        let result = Controller::builder(&rssi, config(3.0, 0, TowerCapacity::Unlimited)).build();
        assert!(matches!(result, Err(SimError::Config(CoreError::ZeroTimeToTrigger(0)))));
    }

    #[test]
    fn capacity_list_must_match_towers() {
        let rssi = random_series(4, 3, 2, 1);
        let cfg = config(3.0, 2, TowerCapacity::PerTower(vec![5, 5, 5]));
        let result = Controller::builder(&rssi, cfg).build();
        assert!(matches!(
            result,
            Err(SimError::Config(CoreError::CapacityCountMismatch { expected: 2, got: 3 }))
        ));
    }

    #[test]
    fn no_towers_rejected() {
        let rssi = RssiSeries::new(3, 2, 0, Vec::new()).unwrap();
        let result = Controller::builder(&rssi, HandoverConfig::default()).build();
        assert!(matches!(result, Err(SimError::Config(CoreError::NoTowers))));
    }

    #[test]
    fn non_finite_sample_rejected_before_any_step() {
        let rssi = RssiSeries::from_fn(5, 2, 2, |t, u, k| {
            if t == Step(3) && u == UserId(1) && k == TowerId(1) { f64::INFINITY } else { -70.0 }
        });
        match Controller::builder(&rssi, HandoverConfig::default()).build() {
            Err(SimError::Input(SignalError::NonFinite { step, user, tower, .. })) => {
                assert_eq!((step, user, tower), (Step(3), UserId(1), TowerId(1)));
            }
            Err(other) => panic!("expected NonFinite, got {other}"),
            Ok(_) => panic!("expected NonFinite"),
        }
    }

    #[test]
    fn non_positive_step_duration_rejected() {
        let rssi = random_series(2, 1, 1, 0);
        let result = Controller::builder(&rssi, HandoverConfig::default())
            .step_duration_secs(0.0)
            .build();
        assert!(matches!(result, Err(SimError::InvalidParam { name: "step_duration_secs", .. })));
    }
}

// ── Step loop ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod controller_tests {
    use super::*;

    #[test]
    fn one_result_per_step() {
        let rssi = random_series(12, 5, 3, 7);
        let m = run(&rssi, HandoverConfig::default());
        assert_eq!(m.len(), 12);
        assert_eq!(m.tower_count(), 3);
        for (t, s) in m.steps().iter().enumerate() {
            assert_eq!(s.step, Step(t as u64));
            assert_eq!(s.load.len(), 3);
            assert_eq!(s.served() + s.dropped, 5);
        }
    }

    #[test]
    fn empty_series_gives_empty_metrics() {
        let rssi = RssiSeries::new(0, 3, 2, Vec::new()).unwrap();
        let m = run(&rssi, HandoverConfig::default());
        assert!(m.is_empty());
        assert_eq!(m.total_handovers(), 0);
        assert_eq!(m.mean_dropped(), 0.0);
    }

    #[test]
    fn greedy_baseline_tracks_strongest_tower() {
        let rssi = random_series(40, 6, 4, 3);
        let cfg = HandoverConfig {
            hysteresis_margin_db:  0.0,
            time_to_trigger_steps: 1,
            min_sensitivity_dbm:   -200.0,
            tower_capacity:        TowerCapacity::Unlimited,
        };
        let mut c = Controller::builder(&rssi, cfg).build().unwrap();
        while let Some(result) = c.step_once(&mut NoopObserver).unwrap() {
            let snap = rssi.snapshot(result.step).unwrap();
            for (u, state) in c.connections().iter().enumerate() {
                let user = UserId(u as u32);
                assert_eq!(state.serving(), cs_handover::best_tower(snap.row(user)));
            }
        }
        assert!(c.is_finished());
        assert!(c.step_once(&mut NoopObserver).unwrap().is_none());
    }

    #[test]
    fn load_never_exceeds_capacity() {
        let rssi = random_series(60, 30, 3, 11);
        let caps = vec![4, 7, 2];
        for ttt in 1..=3 {
            let m = run(&rssi, config(1.0, ttt, TowerCapacity::PerTower(caps.clone())));
            for s in m.steps() {
                for (load, cap) in s.load.iter().zip(&caps) {
                    assert!(load <= cap, "{}: load {load} > {cap}", s.step);
                }
                assert_eq!(s.served() + s.dropped, 30);
            }
        }
    }

    #[test]
    fn single_tower_capacity_one_is_first_come_first_served() {
        let rssi = RssiSeries::from_fn(10, 2, 1, |_, _, _| -60.0);
        let cfg = HandoverConfig {
            hysteresis_margin_db:  0.0,
            time_to_trigger_steps: 1,
            min_sensitivity_dbm:   -200.0,
            tower_capacity:        TowerCapacity::Uniform(1),
        };
        let mut c = Controller::builder(&rssi, cfg).build().unwrap();
        let m = c.run(&mut NoopObserver).unwrap();
        assert!(m.dropped_per_step().iter().all(|&d| d == 1));
        assert!(m.tower_load_series(TowerId(0)).iter().all(|&l| l == 1));
        assert_eq!(c.connections()[0], ConnectionState::connected(TowerId(0)));
        assert_eq!(c.connections()[1], ConnectionState::Unserved);
    }

    #[test]
    fn alternating_by_five_db_never_hands_over() {
        let rssi = RssiSeries::from_fn(50, 1, 2, |t, _, k| {
            if k.index() == t.index() % 2 { -70.0 } else { -75.0 }
        });
        let m = run(&rssi, config(3.0, 2, TowerCapacity::Unlimited));
        assert_eq!(m.total_handovers(), 0);
        assert!(m.dropped_per_step().iter().all(|&d| d == 0));
    }

    #[test]
    fn drop_when_serving_falls_below_floor() {
        let rssi = RssiSeries::from_nested(vec![
            vec![vec![-90.0, -100.0]],
            vec![vec![-112.0, -104.0]],
            vec![vec![-112.0, -104.0]],
        ])
        .unwrap();
        let mut c = Controller::builder(&rssi, config(3.0, 3, TowerCapacity::Unlimited))
            .build()
            .unwrap();
        let m = c.run(&mut NoopObserver).unwrap();
        // Step 1: serving tower 0 is below the floor; the pending move to
        // tower 1 does not save the connection.
        assert_eq!(m.dropped_per_step(), vec![0, 1, 0]);
        // Step 2: a fresh attach takes tower 1 directly.
        assert_eq!(c.connections()[0], ConnectionState::connected(TowerId(1)));
        assert_eq!(m.total_handovers(), 0);
    }

    #[test]
    fn handover_onto_a_weak_tower_counts_before_the_drop() {
        // Both towers are below the floor at step 1; the move to tower 1
        // still qualifies and is counted, then the user is dropped.
        let rssi = RssiSeries::from_nested(vec![
            vec![vec![-100.0, -105.0]],
            vec![vec![-130.0, -115.0]],
        ])
        .unwrap();
        let mut rec = Recorder::default();
        let mut c = Controller::builder(&rssi, config(3.0, 1, TowerCapacity::Unlimited))
            .build()
            .unwrap();
        let m = c.run(&mut rec).unwrap();
        assert_eq!(m.total_handovers(), 1);
        assert_eq!(m.dropped_per_step(), vec![0, 1]);
        assert_eq!(m.tower_load_series(TowerId(1)), vec![0, 0]);
        assert_eq!(c.connections()[0], ConnectionState::Unserved);
        assert_eq!(
            rec.events.last(),
            Some(&(
                Step(1),
                UserId(0),
                ConnectionEvent::HandedOverThenLost { from: TowerId(0), to: TowerId(1) },
            ))
        );
    }

    #[test]
    fn observer_sees_every_step_and_event() {
        let rssi = RssiSeries::from_nested(vec![
            vec![vec![-60.0, -80.0]],
            vec![vec![-80.0, -60.0]],
            vec![vec![-80.0, -60.0]],
        ])
        .unwrap();
        let mut rec = Recorder::default();
        let m = Controller::builder(&rssi, config(3.0, 2, TowerCapacity::Unlimited))
            .build()
            .unwrap()
            .run(&mut rec)
            .unwrap();
        assert_eq!(rec.starts, vec![Step(0), Step(1), Step(2)]);
        assert_eq!(rec.ends.as_slice(), m.steps());
        assert_eq!(rec.runs, 1);
        assert_eq!(
            rec.events,
            vec![
                (Step(0), UserId(0), ConnectionEvent::Attached { tower: TowerId(0) }),
                (Step(2), UserId(0), ConnectionEvent::HandedOver { from: TowerId(0), to: TowerId(1) }),
            ]
        );
        assert_eq!(m.handovers_per_step(), vec![0, 0, 1]);
    }

    #[test]
    fn bad_snapshot_mid_run_aborts_without_metrics() {
        let source = Flaky(RssiSeries::from_fn(5, 2, 2, |_, _, _| -70.0));
        let mut rec = Recorder::default();
        let mut c = Controller::builder(source, HandoverConfig::default()).build().unwrap();
        let err = c.run(&mut rec).unwrap_err();
        assert!(matches!(
            err,
            SimError::Input(SignalError::ShapeMismatch { step: Step(2), what: "user", .. })
        ));
        assert_eq!(rec.ends.len(), 2);
        assert_eq!(rec.runs, 0);
    }

    #[test]
    fn step_times_follow_duration() {
        let rssi = random_series(3, 1, 1, 0);
        let m = Controller::builder(&rssi, HandoverConfig::default())
            .step_duration_secs(0.5)
            .build()
            .unwrap()
            .run(&mut NoopObserver)
            .unwrap();
        let times: Vec<f64> = m.steps().iter().map(|s| s.time_secs).collect();
        assert_eq!(times, vec![0.0, 0.5, 1.0]);
    }
}

// ── Metrics ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod metrics_tests {
    use super::*;

    fn result(step: u64, handovers: u32, dropped: u32, load: Vec<u32>) -> StepResult {
        StepResult { step: Step(step), time_secs: step as f64, handovers, dropped, load }
    }

    #[test]
    fn series_accessors() {
        let mut agg = MetricsAggregator::new(4, 2, 5);
        agg.push(result(0, 0, 2, vec![1, 1]));
        agg.push(result(1, 3, 0, vec![4, 0]));
        agg.push(result(2, 1, 1, vec![2, 1]));
        let m = agg.finish();
        assert_eq!(m.total_handovers(), 4);
        assert_eq!(m.handovers_per_step(), vec![0, 3, 1]);
        assert_eq!(m.dropped_per_step(), vec![2, 0, 1]);
        assert_eq!(m.load_per_step(), vec![vec![1, 1], vec![4, 0], vec![2, 1]]);
        assert_eq!(m.tower_load_series(TowerId(1)), vec![1, 0, 1]);
        assert_eq!(m.peak_loads(), vec![4, 1]);
        assert_eq!(m.peak_load(TowerId(0)), 4);
        assert_eq!(m.peak_load(TowerId(9)), 0);
        assert!((m.mean_dropped() - 1.0).abs() < 1e-12);
        assert_eq!(m.get(Step(1)).unwrap().handovers, 3);
    }

    #[test]
    fn ping_pong_within_window() {
        let mut agg = MetricsAggregator::new(2, 2, 5);
        let (a, b) = (TowerId(0), TowerId(1));
        agg.record_event(Step(1), UserId(0), &ConnectionEvent::HandedOver { from: a, to: b });
        agg.record_event(Step(4), UserId(0), &ConnectionEvent::HandedOver { from: b, to: a });
        // Another user's reverse move does not pair with user 0's.
        agg.record_event(Step(5), UserId(1), &ConnectionEvent::HandedOver { from: a, to: b });
        assert_eq!(agg.series().ping_pongs(), 1);
    }

    #[test]
    fn handover_then_loss_pairs_for_ping_pong() {
        let mut agg = MetricsAggregator::new(1, 2, 5);
        let (a, b) = (TowerId(0), TowerId(1));
        agg.record_event(Step(1), UserId(0), &ConnectionEvent::HandedOver { from: a, to: b });
        agg.record_event(Step(2), UserId(0), &ConnectionEvent::HandedOverThenLost { from: b, to: a });
        assert_eq!(agg.series().ping_pongs(), 1);
    }

    #[test]
    fn ping_pong_outside_window_ignored() {
        let mut agg = MetricsAggregator::new(1, 2, 2);
        let (a, b) = (TowerId(0), TowerId(1));
        agg.record_event(Step(0), UserId(0), &ConnectionEvent::HandedOver { from: a, to: b });
        agg.record_event(Step(3), UserId(0), &ConnectionEvent::HandedOver { from: b, to: a });
        assert_eq!(agg.series().ping_pongs(), 0);
    }

    #[test]
    fn ping_pong_counted_in_a_run() {
        // Greedy settings on a series that flips every two steps.
        let rssi = oscillating_series(12, 1, 2);
        let m = run(&rssi, config(0.0, 1, TowerCapacity::Unlimited));
        // Flips at steps 2, 4, 6, 8, 10; every flip after the first undoes
        // the one before it.
        assert_eq!(m.total_handovers(), 5);
        assert_eq!(m.ping_pongs(), 4);
    }
}

// ── Hysteresis sweep ──────────────────────────────────────────────────────────

#[cfg(test)]
mod sweep_tests {
    use super::*;

    const MARGINS: [f64; 6] = [0.0, 1.0, 2.0, 3.0, 5.0, 10.0];

    #[test]
    fn larger_margin_never_more_handovers() {
        let rssi = oscillating_series(60, 6, 3);
        for ttt in 1..=3 {
            let base = config(0.0, ttt, TowerCapacity::Unlimited);
            let points = hysteresis_sweep(&rssi, &base, &MARGINS).unwrap();
            for pair in points.windows(2) {
                assert!(
                    pair[1].total_handovers <= pair[0].total_handovers,
                    "ttt {ttt}: {:?} then {:?}",
                    pair[0],
                    pair[1]
                );
            }
        }
    }

    #[test]
    fn margin_filters_small_leads() {
        // Leads are 2, 4, …, 12 dB; a margin of m keeps users whose lead
        // exceeds m oscillating.
        let rssi = oscillating_series(30, 6, 3);
        let points = hysteresis_sweep(&rssi, &config(0.0, 1, TowerCapacity::Unlimited), &MARGINS).unwrap();
        let totals: Vec<u64> = points.iter().map(|p| p.total_handovers).collect();
        let flips = 9;
        assert_eq!(totals, vec![6 * flips, 6 * flips, 5 * flips, 5 * flips, 4 * flips, flips]);
    }

    #[test]
    fn points_follow_input_order() {
        let rssi = random_series(20, 4, 3, 2);
        let margins = [10.0, 0.0, 5.0];
        let points = hysteresis_sweep(&rssi, &HandoverConfig::default(), &margins).unwrap();
        let got: Vec<f64> = points.iter().map(|p| p.margin_db).collect();
        assert_eq!(got, margins.to_vec());
    }

    #[test]
    fn sweep_matches_individual_runs() {
        let rssi = random_series(30, 8, 3, 5);
        let base = HandoverConfig::default();
        let points = hysteresis_sweep(&rssi, &base, &[0.0, 4.0]).unwrap();
        for p in points {
            let m = run(&rssi, base.with_hysteresis(p.margin_db));
            assert_eq!(p.total_handovers, m.total_handovers());
            assert_eq!(p.ping_pongs, m.ping_pongs());
            assert_eq!(p.mean_dropped, m.mean_dropped());
        }
    }

    #[test]
    fn invalid_base_fails_the_sweep() {
        let rssi = random_series(5, 2, 2, 0);
        let base = config(0.0, 0, TowerCapacity::Unlimited);
        assert!(hysteresis_sweep(&rssi, &base, &MARGINS).is_err());
    }
}
