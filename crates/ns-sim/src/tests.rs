//! Tests for ns-sim.

use ns_core::{ElementId, SimConfig, Tick};
use ns_network::{Network, Ramp, ReceiverId, SenderId, Storehouse, Worker};
use ns_storage::QueueKind;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config(total_ticks: u64) -> SimConfig {
    SimConfig {
        start_tick:            Tick(1),
        total_ticks,
        seed:                  42,
        report_interval_ticks: 1,
    }
}

/// ramp-1 (interval `di`) → store-1.
fn ramp_to_store(di: u32) -> Network {
    let mut net = Network::new();
    net.add_ramp(Ramp::new(ElementId(1), di)).unwrap();
    net.add_storehouse(Storehouse::new(ElementId(1))).unwrap();
    net.link(SenderId::Ramp(ElementId(1)), ReceiverId::Storehouse(ElementId(1))).unwrap();
    net
}

/// ramp-1 (interval 1) → worker-1 (processing `pd`) → store-1.
fn ramp_worker_store(pd: u32) -> Network {
    let mut net = Network::new();
    net.add_ramp(Ramp::new(ElementId(1), 1)).unwrap();
    net.add_worker(Worker::with_queue_kind(ElementId(1), pd, QueueKind::Fifo)).unwrap();
    net.add_storehouse(Storehouse::new(ElementId(1))).unwrap();
    net.link(SenderId::Ramp(ElementId(1)), ReceiverId::Worker(ElementId(1))).unwrap();
    net.link(SenderId::Worker(ElementId(1)), ReceiverId::Storehouse(ElementId(1))).unwrap();
    net
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use ns_core::FixedSequence;

    use super::*;
    use crate::{SimBuilder, SimError};

    #[test]
    fn builds_consistent_network() {
        let sim = SimBuilder::new(test_config(10), ramp_to_store(1)).build().unwrap();
        assert_eq!(sim.current_tick(), Tick(1));
        assert_eq!(sim.network.ramps().len(), 1);
    }

    #[test]
    fn inconsistent_network_rejected() {
        let mut net = Network::new();
        net.add_ramp(Ramp::new(ElementId(7), 1)).unwrap();
        let err = SimBuilder::new(test_config(10), net).build().err().unwrap();
        assert!(matches!(err, SimError::Inconsistent { ramp } if ramp == ElementId(7)));
    }

    #[test]
    fn skip_verification_builds_anyway() {
        let mut net = Network::new();
        net.add_ramp(Ramp::new(ElementId(1), 1)).unwrap();
        let sim = SimBuilder::new(test_config(10), net)
            .skip_verification()
            .probability_source(FixedSequence::constant(0.0))
            .build();
        assert!(sim.is_ok());
    }

    #[test]
    fn overflowing_config_rejected() {
        let config = SimConfig { start_tick: Tick(u64::MAX), ..test_config(2) };
        let err = SimBuilder::new(config, ramp_to_store(1)).build().err().unwrap();
        assert!(matches!(err, SimError::Config(_)));
    }
}

// ── Run loop ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use ns_network::PackageSender;
    use ns_storage::PackageStockpile;

    use super::*;
    use crate::{NoopObserver, SimBuilder, SimObserver, TickSummary};

    #[test]
    fn interval_one_ramp_stores_one_package_per_tick() {
        let mut sim = SimBuilder::new(test_config(10), ramp_to_store(1)).build().unwrap();
        let summary = sim.step().unwrap();
        assert_eq!(summary, TickSummary { passed: 1, stored: 1, in_flight: 0 });
        assert_eq!(sim.current_tick(), Tick(2));
    }

    #[test]
    fn noop_runs_to_end_tick() {
        let mut sim = SimBuilder::new(test_config(5), ramp_to_store(1)).build().unwrap();
        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.current_tick(), Tick(6));
        assert_eq!(sim.network.stored_count(), 5);
    }

    #[test]
    fn slower_ramp_stores_every_third_tick() {
        let mut sim = SimBuilder::new(test_config(9), ramp_to_store(3)).build().unwrap();
        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.network.stored_count(), 3);
    }

    #[test]
    fn run_ticks_ignores_end_tick() {
        let mut sim = SimBuilder::new(test_config(2), ramp_to_store(1)).build().unwrap();
        sim.run_ticks(4, &mut NoopObserver).unwrap();
        assert_eq!(sim.current_tick(), Tick(5));
        assert_eq!(sim.network.stored_count(), 4);
    }

    #[test]
    fn worker_holds_package_for_processing_duration() {
        let mut sim = SimBuilder::new(test_config(10), ramp_worker_store(2)).build().unwrap();

        // T1: delivered, queued, popped into processing.
        sim.step().unwrap();
        let w = sim.network.find_worker_by_id(ElementId(1)).unwrap();
        assert!(w.processing_buffer().is_some());
        assert_eq!(w.processing_start(), Tick(1));

        // T2: second tick of processing; package reaches the outgoing slot.
        sim.step().unwrap();
        let w = sim.network.find_worker_by_id(ElementId(1)).unwrap();
        assert!(w.sending_buffer().is_some());
        assert_eq!(sim.network.stored_count(), 0);

        // T3: passed on to the storehouse.
        sim.step().unwrap();
        assert_eq!(sim.network.stored_count(), 1);
    }

    #[test]
    fn same_seed_same_outcome() {
        fn fan_out() -> Network {
            let mut net = Network::new();
            net.add_ramp(Ramp::new(ElementId(1), 1)).unwrap();
            for id in 1..=3 {
                net.add_storehouse(Storehouse::new(ElementId(id))).unwrap();
                net.link(SenderId::Ramp(ElementId(1)), ReceiverId::Storehouse(ElementId(id)))
                    .unwrap();
            }
            net
        }
        fn counts(sim: &crate::Sim) -> Vec<usize> {
            sim.network.storehouses().iter().map(|s| s.stockpile().len()).collect()
        }

        let mut a = SimBuilder::new(test_config(50), fan_out()).build().unwrap();
        let mut b = SimBuilder::new(test_config(50), fan_out()).build().unwrap();
        a.run(&mut NoopObserver).unwrap();
        b.run(&mut NoopObserver).unwrap();
        assert_eq!(counts(&a), counts(&b));
        assert_eq!(counts(&a).iter().sum::<usize>(), 50);
    }

    #[test]
    fn unrouted_ramp_blocks_instead_of_dropping() {
        let mut net = Network::new();
        net.add_ramp(Ramp::new(ElementId(1), 1)).unwrap();
        let mut sim = SimBuilder::new(test_config(5), net).skip_verification().build().unwrap();
        sim.run(&mut NoopObserver).unwrap();
        assert_eq!(sim.network.in_flight_count(), 2);
        assert_eq!(sim.network.package_ids().assigned_count(), 2);
    }

    // ── Observer hooks ────────────────────────────────────────────────────

    #[derive(Default)]
    struct Recorder {
        starts: Vec<Tick>,
        ends:   Vec<(Tick, usize)>,
        end_of: Option<Tick>,
    }

    impl SimObserver for Recorder {
        fn on_tick_start(&mut self, tick: Tick) {
            self.starts.push(tick);
        }
        fn on_tick_end(&mut self, tick: Tick, _s: &TickSummary, network: &Network) {
            self.ends.push((tick, network.stored_count()));
        }
        fn on_sim_end(&mut self, final_tick: Tick, _network: &Network) {
            self.end_of = Some(final_tick);
        }
    }

    #[test]
    fn observer_called_once_per_tick() {
        let mut sim = SimBuilder::new(test_config(3), ramp_to_store(1)).build().unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();
        assert_eq!(rec.starts, vec![Tick(1), Tick(2), Tick(3)]);
        assert_eq!(rec.ends, vec![(Tick(1), 1), (Tick(2), 2), (Tick(3), 3)]);
        assert_eq!(rec.end_of, Some(Tick(4)));
    }

    #[test]
    fn run_ticks_does_not_signal_end() {
        let mut sim = SimBuilder::new(test_config(3), ramp_to_store(1)).build().unwrap();
        let mut rec = Recorder::default();
        sim.run_ticks(2, &mut rec).unwrap();
        assert_eq!(rec.starts.len(), 2);
        assert_eq!(rec.end_of, None);
    }

    #[test]
    fn pair_observer_forwards_to_both() {
        let mut sim = SimBuilder::new(test_config(2), ramp_to_store(1)).build().unwrap();
        let mut pair = (Recorder::default(), Recorder::default());
        sim.run(&mut pair).unwrap();
        assert_eq!(pair.0.starts, pair.1.starts);
        assert_eq!(pair.0.ends.len(), 2);
        assert_eq!(pair.1.end_of, Some(Tick(3)));
    }

    #[test]
    fn absent_optional_observer_is_silent() {
        let mut sim = SimBuilder::new(test_config(2), ramp_to_store(1)).build().unwrap();
        let mut present = Some(Recorder::default());
        sim.run(&mut present).unwrap();
        assert_eq!(present.map(|r| r.starts.len()), Some(2));

        let mut absent: Option<Recorder> = None;
        sim.run_ticks(2, &mut absent).unwrap();
        assert_eq!(sim.current_tick(), Tick(5));
    }
}
