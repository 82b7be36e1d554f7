//! handbench CLI - runs the hand evaluator benchmarks
//!
//! Throughput runs (single-thread and parallel, 5 and 7 cards) followed by a
//! category distribution check against the theoretical frequencies.

mod config;
mod report;

use anyhow::{Context, Result};
use clap::Parser;
use config::{Cli, Command};
use handbench_engine::distribution::{analyze, Distribution};
use handbench_engine::{
    CactusKev, DeckCell, DeckTable, HandSize, RunReport, Seeding, StandardDeck, ThroughputHarness,
    WorkerContext,
};

static DECK: DeckCell = DeckCell::new();

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let deck = DECK
        .initialize(&StandardDeck)
        .context("deck initialization failed")?;
    let scorer = CactusKev::new();

    println!("handbench v{}", env!("CARGO_PKG_VERSION"));
    println!();

    match cli.command.clone().unwrap_or(Command::Bench) {
        Command::Bench => run_suite(&cli, deck, &scorer),
        Command::Throughput { cards, single } => {
            let size = HandSize::try_from(cards).context("unsupported hand size")?;
            let report = throughput(&cli, deck, &scorer, size, single)?;
            let label = format!("{} {}", size, if single { "single-thread" } else { "parallel" });
            report::print_run(&label, &report);
            Ok(())
        }
        Command::Distribution { cards } => {
            let size = HandSize::try_from(cards).context("unsupported hand size")?;
            report::print_distribution(&distribution(&cli, deck, &scorer, size));
            Ok(())
        }
    }
}

fn run_suite(cli: &Cli, deck: &DeckTable, scorer: &CactusKev) -> Result<()> {
    log::info!("{:<32}{:<32}", "hands per run", cli.hands);
    log::info!("{:<32}{:<32}", "parallel workers", cli.workers());

    for single in [true, false] {
        for size in [HandSize::Five, HandSize::Seven] {
            let report = throughput(cli, deck, scorer, size, single)?;
            let label = format!("{} {}", size, if single { "single-thread" } else { "parallel" });
            report::print_run(&label, &report);
        }
    }
    for size in [HandSize::Five, HandSize::Seven] {
        report::print_distribution(&distribution(cli, deck, scorer, size));
    }
    Ok(())
}

fn throughput(
    cli: &Cli,
    deck: &DeckTable,
    scorer: &CactusKev,
    size: HandSize,
    single: bool,
) -> Result<RunReport> {
    let mut harness = ThroughputHarness::new(deck, scorer, cli.harness_config(size));
    let result = if single {
        harness.run_single()
    } else {
        harness.run()
    };
    result.with_context(|| format!("{} throughput run failed", size))
}

fn distribution(cli: &Cli, deck: &DeckTable, scorer: &CactusKev, size: HandSize) -> Distribution {
    let mut ctx = match cli.seeding() {
        Seeding::Fixed(seed) => WorkerContext::new(seed),
        Seeding::Clock => WorkerContext::from_clock(0),
    };
    analyze(deck, scorer, size, cli.samples, &mut ctx)
}
