//! handbench Engine - hand generation and parallel evaluation benchmarking
//!
//! This crate contains the benchmark core: the deck value table, per-worker
//! sampling contexts, the unique-card sampler, the best-of-7 evaluator adapter,
//! the lock-free throughput harness and the category distribution analyzer.
//!
//! Hand scoring and the deck itself are injected collaborators; a Cactus-Kev
//! scorer and the standard 52-card deck are provided for real runs.

pub mod cactus;
pub mod card;
pub mod context;
pub mod deck;
pub mod distribution;
pub mod error;
pub mod evaluator;
pub mod harness;
pub mod rng;
pub mod sampler;
pub mod scoring;

pub use cactus::CactusKev;
pub use context::WorkerContext;
pub use deck::{DeckCell, DeckSource, DeckTable, StandardDeck};
pub use error::{BenchError, Result};
pub use evaluator::Evaluator;
pub use harness::{HarnessConfig, RunReport, Seeding, ThroughputHarness};
pub use sampler::HandSampler;
pub use scoring::{Category, HandScorer, HandSize};
