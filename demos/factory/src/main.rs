//! factory: load a network definition, verify it, and simulate it.
//!
//! ```bash
//! # Built-in sample network, 10 turns, report every turn
//! factory
//!
//! # Own definition, 100 turns, report every 10th turn, per-tick CSV
//! factory data/factory.txt -t 100 --report-interval 10 --csv ticks.csv
//!
//! # Report only turns 1, 50 and 100 with a fixed seed
//! factory data/factory.txt -t 100 --report-turns 1,50,100 --seed 7
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `warn,ns_sim=info`).

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ns_core::{SimConfig, Tick};
use ns_network::{Network, Node, PackageReceiver};
use ns_output::{
    CsvSummaryWriter, IntervalReportNotification, ReportNotification, ReportObserver,
    SpecificTurnsReportNotification, SummaryObserver, write_structure_report,
};
use ns_sim::SimBuilder;

/// Used when no definition file is given.
const SAMPLE_NETWORK: &str = include_str!("../data/factory.txt");

/// Logistics network simulator
///
/// Packages leave loading ramps, pass through workers and end up in
/// storehouses.  Runs are reproducible for a given seed.
#[derive(Parser, Debug)]
#[command(name = "factory")]
#[command(version, about, long_about = None)]
struct Args {
    /// Network definition file.  Omit to use the built-in sample.
    input: Option<PathBuf>,

    /// Number of turns to simulate
    #[arg(short = 't', long, default_value = "10")]
    turns: u64,

    /// Seed for routing draws.  When omitted, a random seed is used.
    #[arg(long)]
    seed: Option<u64>,

    /// Print a turn report every N turns, starting at turn 1 (0 disables)
    #[arg(long, default_value = "1")]
    report_interval: u64,

    /// Print turn reports on exactly these turns (overrides --report-interval)
    #[arg(long, value_delimiter = ',')]
    report_turns: Vec<u64>,

    /// Write one CSV summary row per turn to this file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write the loaded network back out as a definition file
    #[arg(long)]
    save: Option<PathBuf>,

    /// Simulate even if some ramp cannot reach a storehouse
    #[arg(long)]
    skip_verify: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,ns_sim=info")),
        )
        .init();

    let args = Args::parse();

    // 1. Load.
    let network = load(&args)?;
    info!(
        ramps = network.ramps().len(),
        workers = network.workers().len(),
        storehouses = network.storehouses().len(),
        links = network.links().len(),
        "network loaded"
    );

    if let Some(path) = &args.save {
        ns_io::save_network_file(&network, path)
            .with_context(|| format!("saving definition to {}", path.display()))?;
        println!("Saved definition to {}", path.display());
    }

    // 2. Structure report.
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "=== Network structure ===")?;
    writeln!(stdout)?;
    write_structure_report(&network, &mut stdout)?;
    drop(stdout);

    let unreachable = network.unreachable_ramps();
    if !unreachable.is_empty() && !args.skip_verify {
        let ids: Vec<String> = unreachable.iter().map(ToString::to_string).collect();
        bail!(
            "ramps with no path to a storehouse: {} (use --skip-verify to run anyway)",
            ids.join(", ")
        );
    }

    // 3. Simulate.
    let seed = args.seed.unwrap_or_else(rand::random);
    let config = SimConfig {
        start_tick:            Tick(1),
        total_ticks:           args.turns,
        seed,
        report_interval_ticks: args.report_interval,
    };
    println!("Simulating {} turns with seed {seed}", config.total_ticks);
    println!();

    let mut builder = SimBuilder::new(config, network);
    if args.skip_verify {
        builder = builder.skip_verification();
    }
    let mut sim = builder.build()?;

    let notification: Box<dyn ReportNotification> = if args.report_turns.is_empty() {
        Box::new(IntervalReportNotification::new(sim.config.report_interval_ticks))
    } else {
        Box::new(SpecificTurnsReportNotification::new(args.report_turns.iter().copied()))
    };
    let reports = ReportObserver::new(std::io::stdout().lock(), notification);
    let summary = match &args.csv {
        Some(path) => Some(SummaryObserver::new(
            CsvSummaryWriter::create(path)
                .with_context(|| format!("creating {}", path.display()))?,
        )),
        None => None,
    };

    let mut observer = (reports, summary);
    sim.run(&mut observer)?;

    let (mut reports, summary) = observer;
    if let Some(e) = reports.take_error() {
        return Err(e).context("writing turn reports");
    }
    if let Some(mut summary) = summary {
        if let Some(e) = summary.take_error() {
            return Err(e).context("writing CSV summary");
        }
    }
    let reports_written = reports.reports_written();
    drop(reports);

    // 4. Totals.
    println!("=== Summary ===");
    println!("Turns simulated : {}", args.turns);
    println!("Turn reports    : {reports_written}");
    println!("Stored packages : {}", sim.network.stored_count());
    println!("In flight       : {}", sim.network.in_flight_count());
    for store in sim.network.storehouses() {
        println!("  store-{:<4} {}", store.id().get(), store.packages().count());
    }
    if let Some(path) = &args.csv {
        println!("CSV summary     : {}", path.display());
    }
    Ok(())
}

fn load(args: &Args) -> Result<Network> {
    match &args.input {
        Some(path) => ns_io::load_network_file(path)
            .with_context(|| format!("loading {}", path.display())),
        None => ns_io::parse_network(SAMPLE_NETWORK).context("loading built-in sample network"),
    }
}
