//! Unit tests for cs-core primitives.

#[cfg(test)]
mod ids {
    use crate::{TowerId, UserId};

    #[test]
    fn index_roundtrip() {
        let id = UserId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(UserId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(UserId(0) < UserId(1));
        assert!(TowerId(2) > TowerId(1));
    }

    #[test]
    fn invalid_sentinel_is_max() {
        assert_eq!(TowerId::INVALID.0, u32::MAX);
    }

    #[test]
    fn display() {
        assert_eq!(TowerId(7).to_string(), "TowerId(7)");
    }
}

#[cfg(test)]
mod geo {
    use crate::{Area, Point};

    #[test]
    fn distance_is_euclidean() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(300.0, 400.0);
        assert!((a.distance_m(b) - 500.0).abs() < 1e-9);
        assert_eq!(a.distance_m(a), 0.0);
    }

    #[test]
    fn area_clamp_and_contains() {
        let area = Area::new(1000.0);
        assert!(area.contains(Point::new(0.0, 1000.0)));
        assert!(!area.contains(Point::new(-0.1, 10.0)));
        assert_eq!(area.clamp(Point::new(-5.0, 1200.0)), Point::new(0.0, 1000.0));
    }
}

#[cfg(test)]
mod time {
    use crate::{Step, StepClock};

    #[test]
    fn step_arithmetic() {
        assert_eq!(Step(10) + 5, Step(15));
        assert_eq!(Step(15).since(Step(10)), 5);
        assert_eq!(Step(3).since(Step(10)), 0);
        assert_eq!(Step(4).to_string(), "S4");
    }

    #[test]
    fn clock_elapsed() {
        let mut clock = StepClock::new(0.5);
        assert_eq!(clock.elapsed_secs(), 0.0);
        clock.advance();
        clock.advance();
        assert_eq!(clock.current_step, Step(2));
        assert_eq!(clock.elapsed_secs(), 1.0);
    }
}

#[cfg(test)]
mod rng {
    use crate::{SimRng, UserId, UserRng};

    #[test]
    fn same_seed_same_stream() {
        let mut a = UserRng::new(42, UserId(3));
        let mut b = UserRng::new(42, UserId(3));
        let xs: Vec<u64> = (0..8).map(|_| a.random()).collect();
        let ys: Vec<u64> = (0..8).map(|_| b.random()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn different_users_differ() {
        let mut a = UserRng::new(42, UserId(0));
        let mut b = UserRng::new(42, UserId(1));
        assert_ne!(a.random::<u64>(), b.random::<u64>());
    }

    #[test]
    fn gen_range_in_bounds() {
        let mut r = UserRng::new(7, UserId(0));
        for _ in 0..1000 {
            let v: f64 = r.gen_range(1.0..5.0);
            assert!((1.0..5.0).contains(&v));
        }
    }

    #[test]
    fn stage_seeds_are_reproducible() {
        let mut a = SimRng::new(1);
        let mut b = SimRng::new(1);
        assert_eq!(a.stage_seed(), b.stage_seed());
        assert_eq!(a.stage_seed(), b.stage_seed());
    }
}

#[cfg(test)]
mod config {
    use crate::{CoreError, HandoverConfig, TowerCapacity, UNLIMITED_CAPACITY};

    #[test]
    fn default_matches_reference_constants() {
        let cfg = HandoverConfig::default();
        assert_eq!(cfg.hysteresis_margin_db, 3.0);
        assert_eq!(cfg.time_to_trigger_steps, 2);
        assert_eq!(cfg.min_sensitivity_dbm, -110.0);
        assert_eq!(cfg.tower_capacity, TowerCapacity::Uniform(40));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn zero_ttt_rejected() {
        let cfg = HandoverConfig { time_to_trigger_steps: 0, ..HandoverConfig::default() };
        assert!(matches!(cfg.validate(), Err(CoreError::ZeroTimeToTrigger(0))));
    }

    #[test]
    fn non_finite_parameters_rejected() {
        let cfg = HandoverConfig { hysteresis_margin_db: f64::NAN, ..HandoverConfig::default() };
        assert!(matches!(cfg.validate(), Err(CoreError::NonFinite { .. })));

        let cfg = HandoverConfig { min_sensitivity_dbm: f64::NEG_INFINITY, ..HandoverConfig::default() };
        assert!(matches!(cfg.validate(), Err(CoreError::NonFinite { name: "min_sensitivity_dbm", .. })));
    }

    #[test]
    fn negative_hysteresis_accepted() {
        // A negative margin lets any stronger tower qualify; it is not a
        // configuration error.
        let cfg = HandoverConfig::default().with_hysteresis(-1.0);
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.resolve_capacities(3).unwrap(), vec![40, 40, 40]);
    }

    #[test]
    fn capacity_resolution() {
        assert_eq!(TowerCapacity::Uniform(5).resolve(3).unwrap(), vec![5, 5, 5]);
        assert_eq!(TowerCapacity::Unlimited.resolve(2).unwrap(), vec![UNLIMITED_CAPACITY; 2]);
        assert_eq!(TowerCapacity::PerTower(vec![1, 2]).resolve(2).unwrap(), vec![1, 2]);
    }

    #[test]
    fn capacity_list_length_checked() {
        let err = TowerCapacity::PerTower(vec![1, 2]).resolve(3).unwrap_err();
        assert!(matches!(err, CoreError::CapacityCountMismatch { expected: 3, got: 2 }));
    }

    #[test]
    fn zero_towers_rejected() {
        assert!(matches!(TowerCapacity::Uniform(1).resolve(0), Err(CoreError::NoTowers)));
    }
}
