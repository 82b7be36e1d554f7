//! Error taxonomy for the benchmark engine
//!
//! Every failure here is a configuration or programming defect, never a
//! transient condition, so nothing in the engine retries.

use std::fmt;

/// Errors surfaced by deck initialization, sampling and the throughput harness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BenchError {
    /// The deck source did not yield exactly 52 distinct card values.
    DeckSize {
        /// Number of cards the source produced
        found: usize,
        /// Number of distinct encoded values among them
        distinct: usize,
    },
    /// A draw or evaluation was requested for an unsupported number of cards.
    InvalidHandSize(usize),
    /// The run was cancelled at a chunk boundary before finishing its budget.
    Cancelled { processed: u64, requested: u64 },
    /// The aggregate did not account for every requested hand exactly once.
    AggregateMismatch { processed: u64, requested: u64 },
    /// The worker pool could not be built.
    ThreadPool(String),
}

impl fmt::Display for BenchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BenchError::DeckSize { found, distinct } => write!(
                f,
                "deck source must yield 52 distinct cards (got {} cards, {} distinct)",
                found, distinct
            ),
            BenchError::InvalidHandSize(n) => {
                write!(f, "invalid hand size {}", n)
            }
            BenchError::Cancelled { processed, requested } => write!(
                f,
                "run cancelled after {} of {} hands",
                processed, requested
            ),
            BenchError::AggregateMismatch { processed, requested } => write!(
                f,
                "aggregate counted {} hands but {} were requested",
                processed, requested
            ),
            BenchError::ThreadPool(reason) => {
                write!(f, "failed to build worker pool: {}", reason)
            }
        }
    }
}

impl std::error::Error for BenchError {}

/// Engine-wide result alias
pub type Result<T> = std::result::Result<T, BenchError>;
