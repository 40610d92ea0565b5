//! Unit tests for ns-core primitives.

#[cfg(test)]
mod ids {
    use crate::{ElementId, PackageId};

    #[test]
    fn ordering() {
        assert!(ElementId(0) < ElementId(1));
        assert!(PackageId(100) > PackageId(99));
    }

    #[test]
    fn display_is_bare_integer() {
        assert_eq!(ElementId(7).to_string(), "7");
        assert_eq!(PackageId(12).to_string(), "12");
    }

    #[test]
    fn parse() {
        assert_eq!("42".parse::<ElementId>().unwrap(), ElementId(42));
        assert!("x1".parse::<ElementId>().is_err());
        assert!("-1".parse::<ElementId>().is_err());
    }

    #[test]
    fn none_sentinel() {
        assert!(PackageId::NONE.is_none());
        assert!(!PackageId(1).is_none());
    }
}

#[cfg(test)]
mod package {
    use std::collections::BTreeSet;

    use crate::{PackageId, PackageIds};

    #[test]
    fn first_ids_are_dense_from_one() {
        let ids = PackageIds::new();
        let p1 = ids.create();
        let p2 = ids.create();
        let p3 = ids.create();
        assert_eq!(
            [p1.id(), p2.id(), p3.id()],
            [PackageId(1), PackageId(2), PackageId(3)]
        );
        assert_eq!(ids.assigned_count(), 3);
    }

    #[test]
    fn dropping_a_package_frees_its_id() {
        let ids = PackageIds::new();
        let p1 = ids.create();
        let p2 = ids.create();
        drop(p1);
        assert!(!ids.is_assigned(PackageId(1)));
        assert_eq!(ids.freed(), vec![PackageId(1)]);
        assert!(ids.is_assigned(p2.id()));
    }

    #[test]
    fn freed_ids_recycled_smallest_first() {
        let ids = PackageIds::new();
        let mut live: Vec<_> = (0..5).map(|_| ids.create()).collect();
        // Free ids 4 and 2 (in that order).
        live.remove(3);
        live.remove(1);
        let a = ids.create();
        let b = ids.create();
        assert_eq!(a.id(), PackageId(2));
        assert_eq!(b.id(), PackageId(4));
    }

    #[test]
    fn reassign_prefers_freed_over_new() {
        let ids = PackageIds::new();
        let a = ids.assign();
        let b = ids.assign();
        let c = ids.assign();
        ids.free(b);
        assert_eq!(ids.assign(), b);
        assert_eq!(ids.assign(), PackageId(c.0 + 1));
        assert_eq!(a, PackageId(1));
    }

    #[test]
    fn next_after_max_when_pool_empty() {
        let ids = PackageIds::new();
        let _a = ids.assign();
        let _b = ids.assign();
        let c = ids.assign();
        ids.free(c);
        // Freed set is {3}; it is recycled before 4 is minted.
        assert_eq!(ids.assign(), c);
        assert_eq!(ids.assign(), PackageId(4));
    }

    #[test]
    fn freeing_zero_or_unassigned_is_noop() {
        let ids = PackageIds::new();
        let _p = ids.create();
        ids.free(PackageId::NONE);
        ids.free(PackageId(99));
        assert_eq!(ids.assigned(), vec![PackageId(1)]);
        assert!(ids.freed().is_empty());
    }

    #[test]
    fn double_free_is_noop() {
        let ids = PackageIds::new();
        let id = ids.assign();
        ids.free(id);
        ids.free(id);
        assert_eq!(ids.freed(), vec![id]);
        assert_eq!(ids.assign(), id);
        assert!(ids.freed().is_empty());
    }

    #[test]
    fn live_ids_always_distinct_and_positive() {
        let ids = PackageIds::new();
        let mut live = Vec::new();
        for round in 0..50u32 {
            live.push(ids.create());
            if round % 3 == 0 {
                let idx = (round as usize * 7) % live.len();
                live.remove(idx);
            }
            let seen: BTreeSet<PackageId> = live.iter().map(|p| p.id()).collect();
            assert_eq!(seen.len(), live.len(), "duplicate id in round {round}");
            assert!(seen.iter().all(|id| id.0 > 0));
        }
    }

    #[test]
    fn package_outliving_allocator_is_harmless() {
        let ids = PackageIds::new();
        let p = ids.create();
        drop(ids);
        assert_eq!(p.id(), PackageId(1));
        drop(p);
    }

    #[test]
    fn display_and_debug() {
        let ids = PackageIds::new();
        let p = ids.create();
        assert_eq!(p.to_string(), "#1");
        assert_eq!(format!("{p:?}"), "Package(#1)");
    }
}

#[cfg(test)]
mod time {
    use crate::time::positive_duration;
    use crate::{CoreError, ElementId, SimClock, SimConfig, Tick};

    #[test]
    fn elapsed_counts_start_tick() {
        assert_eq!(Tick(4).elapsed_since(Tick(4)), 1);
        assert_eq!(Tick(6).elapsed_since(Tick(4)), 3);
        assert_eq!(Tick(3).elapsed_since(Tick(4)), 0);
    }

    #[test]
    fn has_elapsed_boundaries() {
        // A one-tick interval is complete at its own start tick.
        assert!(Tick(7).has_elapsed(Tick(7), 1));
        assert!(!Tick(7).has_elapsed(Tick(7), 2));
        assert!(Tick(8).has_elapsed(Tick(7), 2));
    }

    #[test]
    fn clock_advance() {
        let mut clock = SimClock::new(Tick(1));
        clock.advance();
        clock.advance();
        assert_eq!(clock.current_tick, Tick(3));
        assert_eq!(clock.to_string(), "T3");
    }

    #[test]
    fn sim_config_end_tick() {
        let cfg = SimConfig {
            start_tick:            Tick(1),
            total_ticks:           20,
            seed:                  42,
            report_interval_ticks: 5,
        };
        assert_eq!(cfg.end_tick(), Tick(21));
        assert_eq!(cfg.make_clock().current_tick, Tick(1));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn sim_config_overflow_rejected() {
        let cfg = SimConfig {
            start_tick:  Tick(u64::MAX),
            total_ticks: 1,
            ..SimConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn zero_duration_rejected() {
        assert_eq!(positive_duration("ramp", ElementId(1), 3).unwrap(), 3);
        let err = positive_duration("worker", ElementId(2), 0).unwrap_err();
        assert_eq!(err.to_string(), "worker 2: duration must be positive");
    }
}

#[cfg(test)]
mod rng {
    use crate::{FixedSequence, ProbabilitySource, SimRng};

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = SimRng::new(12345);
        let mut r2 = SimRng::new(12345);
        for _ in 0..100 {
            assert_eq!(r1.probability(), r2.probability());
        }
    }

    #[test]
    fn probabilities_in_unit_interval() {
        let mut rng = SimRng::new(0);
        for _ in 0..1000 {
            let p = rng.probability();
            assert!((0.0..1.0).contains(&p), "got {p}");
        }
    }

    #[test]
    fn fixed_sequence_cycles() {
        let mut seq = FixedSequence::new([0.1, 0.5, 0.9]);
        let drawn: Vec<f64> = (0..5).map(|_| seq.probability()).collect();
        assert_eq!(drawn, vec![0.1, 0.5, 0.9, 0.1, 0.5]);
    }

    #[test]
    fn empty_fixed_sequence_yields_zero() {
        let mut seq = FixedSequence::default();
        assert_eq!(seq.probability(), 0.0);
    }

    #[test]
    fn closures_are_sources() {
        let mut n = 0.0;
        let mut src = move || {
            n += 0.25;
            n
        };
        assert_eq!(src.probability(), 0.25);
        assert_eq!(src.probability(), 0.5);
    }
}
