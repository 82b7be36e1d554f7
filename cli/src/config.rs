//! Command-line and environment configuration

use clap::{Parser, Subcommand};
use handbench_engine::{HandSize, HarnessConfig, Seeding};

#[derive(Debug, Parser)]
#[command(
    name = "handbench",
    version,
    about = "Throughput and distribution benchmarks for a poker hand evaluator"
)]
pub struct Cli {
    /// Hands per throughput run
    #[arg(long, global = true, env = "HANDBENCH_HANDS", default_value_t = 10_000_000)]
    pub hands: u64,

    /// Worker threads for parallel runs (defaults to the number of CPUs)
    #[arg(long, global = true, env = "HANDBENCH_THREADS")]
    pub threads: Option<usize>,

    /// Fixed RNG seed; runs are reproducible when set
    #[arg(long, global = true, env = "HANDBENCH_SEED")]
    pub seed: Option<u64>,

    /// Work units handed out per worker
    #[arg(long, global = true, default_value_t = 16)]
    pub units_per_worker: u64,

    /// Hands drawn by the distribution analyzer
    #[arg(long, global = true, default_value_t = 100_000)]
    pub samples: u64,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Single-thread and parallel throughput for 5 and 7 cards, then distributions
    Bench,
    /// One throughput run
    Throughput {
        /// Cards per hand (5 or 7)
        #[arg(long, default_value_t = 7)]
        cards: usize,
        /// Run on the main thread only
        #[arg(long)]
        single: bool,
    },
    /// One distribution analysis
    Distribution {
        /// Cards per hand (5 or 7)
        #[arg(long, default_value_t = 7)]
        cards: usize,
    },
}

impl Cli {
    pub fn workers(&self) -> usize {
        self.threads.unwrap_or_else(num_cpus::get).max(1)
    }

    pub fn seeding(&self) -> Seeding {
        match self.seed {
            Some(seed) => Seeding::Fixed(seed),
            None => Seeding::Clock,
        }
    }

    pub fn harness_config(&self, hand_size: HandSize) -> HarnessConfig {
        HarnessConfig {
            total_hands: self.hands,
            workers: self.workers(),
            hand_size,
            units_per_worker: self.units_per_worker,
            seeding: self.seeding(),
        }
    }
}
