//! Tests for ns-output.

use ns_core::{FixedSequence, SimConfig, Tick};
use ns_io::parse_network;
use ns_network::Network;
use ns_sim::{Sim, SimBuilder};

// ── Helpers ───────────────────────────────────────────────────────────────────

const LINE: &str = "\
LOADING_RAMP id=1 delivery-interval=1
WORKER id=1 processing-time=2 queue-type=FIFO
STOREHOUSE id=1
LINK src=ramp-1 dest=worker-1
LINK src=worker-1 dest=store-1
";

fn config(total_ticks: u64) -> SimConfig {
    SimConfig { total_ticks, ..SimConfig::default() }
}

fn sim_over(text: &str, total_ticks: u64) -> Sim {
    SimBuilder::new(config(total_ticks), parse_network(text).unwrap())
        .probability_source(FixedSequence::constant(0.0))
        .build()
        .unwrap()
}

fn structure(net: &Network) -> String {
    let mut buf = Vec::new();
    crate::write_structure_report(net, &mut buf).unwrap();
    String::from_utf8(buf).unwrap()
}

// ── Notifications ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod notification_tests {
    use super::*;
    use crate::{IntervalReportNotification, ReportNotification, SpecificTurnsReportNotification};

    fn fired(n: &impl ReportNotification, upto: u64) -> Vec<u64> {
        (1..=upto).filter(|&t| n.should_generate_report(Tick(t))).collect()
    }

    #[test]
    fn interval_one_fires_every_turn() {
        assert_eq!(fired(&IntervalReportNotification::new(1), 4), vec![1, 2, 3, 4]);
    }

    #[test]
    fn interval_fires_on_first_turn_then_every_n() {
        assert_eq!(fired(&IntervalReportNotification::new(3), 10), vec![1, 4, 7, 10]);
    }

    #[test]
    fn interval_zero_and_turn_zero_never_fire() {
        assert!(fired(&IntervalReportNotification::new(0), 10).is_empty());
        assert!(!IntervalReportNotification::new(1).should_generate_report(Tick(0)));
    }

    #[test]
    fn specific_turns() {
        let n = SpecificTurnsReportNotification::new([5, 2, 2]);
        assert_eq!(fired(&n, 6), vec![2, 5]);
        assert_eq!(n.turns().collect::<Vec<_>>(), vec![2, 5]);
    }
}

// ── Reports ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod report_tests {
    use super::*;
    use crate::{ReportObserver, SpecificTurnsReportNotification, write_turn_report};

    #[test]
    fn structure_report_text() {
        let net = parse_network(LINE).unwrap();
        let expected = "\
== LOADING RAMPS ==

LOADING RAMP #1
  Delivery interval: 1
  Receivers:
    worker #1

== WORKERS ==

WORKER #1
  Processing time: 2
  Queue type: FIFO
  Receivers:
    storehouse #1

== STOREHOUSES ==

STOREHOUSE #1

";
        assert_eq!(structure(&net), expected);
    }

    #[test]
    fn structure_report_sorted_by_id() {
        let net = parse_network("STOREHOUSE id=3\nSTOREHOUSE id=1\nSTOREHOUSE id=2\n").unwrap();
        let text = structure(&net);
        let one = text.find("STOREHOUSE #1").unwrap();
        let two = text.find("STOREHOUSE #2").unwrap();
        let three = text.find("STOREHOUSE #3").unwrap();
        assert!(one < two && two < three);
    }

    #[test]
    fn turn_report_after_first_tick() {
        let mut sim = sim_over(LINE, 10);
        sim.step().unwrap();

        let mut buf = Vec::new();
        write_turn_report(&sim.network, &mut buf, Tick(1)).unwrap();
        let expected = "\
=== [ Turn: 1 ] ===

== WORKERS ==

WORKER #1
  PBuffer: #1 (pt = 1)
  Queue: (empty)
  SBuffer: (empty)

== STOREHOUSES ==

STOREHOUSE #1
  Stock: (empty)

";
        assert_eq!(String::from_utf8(buf).unwrap(), expected);
    }

    #[test]
    fn observer_reports_selected_turns_only() {
        let mut sim = sim_over(LINE, 3);
        let mut obs = ReportObserver::new(Vec::new(), SpecificTurnsReportNotification::new([2, 3]));
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none());
        assert_eq!(obs.reports_written(), 2);

        let text = String::from_utf8(obs.into_inner()).unwrap();
        assert!(!text.contains("Turn: 1 "));
        // Turn 2: #1 finished processing, #2 queued behind it.
        assert!(text.contains(
            "=== [ Turn: 2 ] ===\n\n== WORKERS ==\n\nWORKER #1\n  PBuffer: (empty)\n  Queue: #2\n  SBuffer: #1\n"
        ));
        // Turn 3: #1 stored, #2 in processing, #3 queued.
        assert!(text.contains("  PBuffer: #2 (pt = 1)\n  Queue: #3\n  SBuffer: (empty)\n"));
        assert!(text.contains("STOREHOUSE #1\n  Stock: #1\n"));
    }

    /// A sink that rejects every write.
    struct Broken;

    impl std::io::Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("disk full"))
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_error_is_stored_not_raised() {
        let mut sim = sim_over(LINE, 3);
        let mut obs = ReportObserver::new(Broken, crate::IntervalReportNotification::new(1));
        assert!(sim.run(&mut obs).is_ok());
        assert_eq!(obs.reports_written(), 0);
        assert!(matches!(obs.take_error(), Some(crate::OutputError::Io(_))));
        assert!(obs.take_error().is_none());
    }
}

// ── CSV summaries ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_tests {
    use super::*;
    use crate::{CsvSummaryWriter, OutputWriter, SummaryObserver, TickSummaryRow};

    const RAMP_TO_STORE: &str = "\
LOADING_RAMP id=1 delivery-interval=1
STOREHOUSE id=1
LINK src=ramp-1 dest=store-1
";

    #[test]
    fn one_row_per_tick() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ticks.csv");

        let mut sim = sim_over(RAMP_TO_STORE, 3);
        let mut obs = SummaryObserver::new(CsvSummaryWriter::create(&path).unwrap());
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none());
        drop(obs);

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "tick,passed,stored,in_flight,live_packages",
                "1,1,1,0,1",
                "2,1,2,0,2",
                "3,1,3,0,3",
            ]
        );
    }

    #[test]
    fn in_memory_writer() {
        let mut writer = CsvSummaryWriter::from_writer(Vec::new()).unwrap();
        writer
            .write_tick_summary(&TickSummaryRow {
                tick:          7,
                passed:        2,
                stored:        5,
                in_flight:     4,
                live_packages: 9,
            })
            .unwrap();
        writer.finish().unwrap();
        writer.finish().unwrap();
        let text = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert_eq!(text, "tick,passed,stored,in_flight,live_packages\n7,2,5,4,9\n");
    }

    #[test]
    fn live_packages_count_blocked_ramp_output() {
        let mut sim = SimBuilder::new(config(4), parse_network("LOADING_RAMP id=1 delivery-interval=1\n").unwrap())
            .skip_verification()
            .build()
            .unwrap();
        let mut obs = SummaryObserver::new(CsvSummaryWriter::from_writer(Vec::new()).unwrap());
        sim.run(&mut obs).unwrap();
        let text = String::from_utf8(obs.into_writer().into_inner().unwrap()).unwrap();
        assert_eq!(text.lines().last(), Some("4,0,0,2,2"));
    }
}
