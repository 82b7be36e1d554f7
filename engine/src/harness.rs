//! Throughput harness: lock-free work partitioning over a fixed hand budget
//!
//! The total hand count is split into `workers × units_per_worker` units. A
//! single `AtomicU64` of remaining hands is the only coordination point:
//! workers reserve `min(unit, remaining)` hands with a compare-and-swap loop,
//! sample and score them with their own `WorkerContext`, and merge a local
//! checksum into the shared [`Aggregate`] exactly once when they run dry.
//!
//! Workers run on a dedicated rayon pool of exactly `workers` threads, each
//! thread entering the worker loop once via `broadcast`. No lock is held while
//! hands are evaluated.

use crate::context::WorkerContext;
use crate::deck::DeckTable;
use crate::error::{BenchError, Result};
use crate::evaluator::Evaluator;
use crate::rng::mix;
use crate::sampler::HandSampler;
use crate::scoring::{HandScorer, HandSize};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// How worker RNGs are seeded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seeding {
    /// Each worker seeds once from the clock and its index.
    Clock,
    /// Each chunk reseeds from `(seed, chunk index)`, so the checksum depends
    /// only on the seed and the chunk layout, not on which worker won which chunk.
    Fixed(u64),
}

/// Harness parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    pub total_hands: u64,
    pub workers: usize,
    pub hand_size: HandSize,
    /// Work units per worker; more units smooth out load imbalance.
    pub units_per_worker: u64,
    pub seeding: Seeding,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        HarnessConfig {
            total_hands: 10_000_000,
            workers: rayon::current_num_threads(),
            hand_size: HandSize::Seven,
            units_per_worker: 16,
            seeding: Seeding::Clock,
        }
    }
}

/// Lifecycle of a harness run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarnessState {
    Idle,
    WorkDistributed,
    Aggregating,
    Done,
}

/// Shared result of a run. Only ever updated through atomic adds.
#[derive(Debug, Default)]
pub struct Aggregate {
    checksum: AtomicU64,
    processed: AtomicU64,
    contributions: AtomicU64,
}

impl Aggregate {
    /// Fold one worker's totals in. Called exactly once per worker.
    pub fn merge(&self, checksum: u64, processed: u64) {
        self.checksum.fetch_add(checksum, Ordering::Relaxed);
        self.processed.fetch_add(processed, Ordering::Relaxed);
        self.contributions.fetch_add(1, Ordering::AcqRel);
    }

    /// Wrapping sum of every evaluated score
    pub fn checksum(&self) -> u64 {
        self.checksum.load(Ordering::Acquire)
    }

    pub fn processed(&self) -> u64 {
        self.processed.load(Ordering::Acquire)
    }

    pub fn contributions(&self) -> u64 {
        self.contributions.load(Ordering::Acquire)
    }
}

/// Cooperative cancellation flag, checked by workers between chunks
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// A contiguous slice of the hand budget owned by one worker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk {
    /// Position of the chunk in claim order (offset / unit)
    pub index: u64,
    pub len: u64,
}

/// Remaining-hands counter that chunks are claimed from
#[derive(Debug)]
pub struct WorkQueue {
    remaining: AtomicU64,
    total: u64,
    unit: u64,
}

impl WorkQueue {
    pub fn new(total: u64, unit: u64) -> Self {
        WorkQueue {
            remaining: AtomicU64::new(total),
            total,
            unit: unit.max(1),
        }
    }

    /// Split `total` into `units` roughly equal pieces, at least one hand each.
    pub fn partitioned(total: u64, units: u64) -> Self {
        let unit = total.div_ceil(units.max(1));
        Self::new(total, unit)
    }

    pub fn unit(&self) -> u64 {
        self.unit
    }

    /// Reserve the next chunk, or `None` once the budget is exhausted.
    pub fn claim(&self) -> Option<Chunk> {
        let mut current = self.remaining.load(Ordering::Relaxed);
        loop {
            if current == 0 {
                return None;
            }
            let len = self.unit.min(current);
            match self.remaining.compare_exchange_weak(
                current,
                current - len,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => {
                    let offset = self.total - current;
                    return Some(Chunk {
                        index: offset / self.unit,
                        len,
                    });
                }
                Err(observed) => current = observed,
            }
        }
    }
}

/// Outcome of a completed run. Rates are derived, never measured per hand.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub hand_size: HandSize,
    pub workers: usize,
    pub hands: u64,
    pub checksum: u64,
    pub elapsed: Duration,
    /// Hands processed by each worker, indexed by worker
    pub per_worker: Vec<u64>,
}

impl RunReport {
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    pub fn hands_per_sec(&self) -> f64 {
        let secs = self.elapsed_secs();
        if secs > 0.0 {
            self.hands as f64 / secs
        } else {
            0.0
        }
    }

    pub fn nanos_per_hand(&self) -> f64 {
        if self.hands > 0 {
            self.elapsed.as_nanos() as f64 / self.hands as f64
        } else {
            0.0
        }
    }
}

/// Drives sampling and evaluation over a fixed hand budget.
pub struct ThroughputHarness<'d, S> {
    sampler: HandSampler<'d>,
    evaluator: Evaluator<S>,
    config: HarnessConfig,
    cancel: CancelToken,
    state: HarnessState,
}

impl<'d, S: HandScorer> ThroughputHarness<'d, S> {
    pub fn new(deck: &'d DeckTable, scorer: S, config: HarnessConfig) -> Self {
        ThroughputHarness {
            sampler: HandSampler::new(deck),
            evaluator: Evaluator::new(scorer),
            config,
            cancel: CancelToken::new(),
            state: HarnessState::Idle,
        }
    }

    /// Use an externally owned cancellation token.
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn state(&self) -> HarnessState {
        self.state
    }

    /// Run the budget across `config.workers` pool threads.
    pub fn run(&mut self) -> Result<RunReport> {
        let workers = self.config.workers.max(1);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("handbench-worker-{}", i))
            .build()
            .map_err(|e| BenchError::ThreadPool(e.to_string()))?;
        self.execute(workers, |work| pool.broadcast(|ctx| work(ctx.index())))
    }

    /// Run the budget on the calling thread as a single worker.
    pub fn run_single(&mut self) -> Result<RunReport> {
        self.execute(1, |work| vec![work(0)])
    }

    fn execute<D>(&mut self, workers: usize, dispatch: D) -> Result<RunReport>
    where
        D: FnOnce(&(dyn Fn(usize) -> u64 + Sync)) -> Vec<u64>,
    {
        let total = self.config.total_hands;
        let size = self.config.hand_size;
        let seeding = self.config.seeding;
        self.state = HarnessState::Idle;

        let start = Instant::now();
        let units = workers as u64 * self.config.units_per_worker.max(1);
        let queue = WorkQueue::partitioned(total, units);
        let aggregate = Aggregate::default();
        self.state = HarnessState::WorkDistributed;
        log::debug!(
            "{} hands in units of {} across {} workers",
            total,
            queue.unit(),
            workers
        );

        let sampler = self.sampler;
        let evaluator = &self.evaluator;
        let cancel = &self.cancel;
        let queue_ref = &queue;
        let aggregate_ref = &aggregate;
        let work = move |worker: usize| {
            run_worker(worker, queue_ref, sampler, evaluator, size, seeding, cancel, aggregate_ref)
        };

        let per_worker = dispatch(&work);
        let elapsed = start.elapsed();
        self.state = HarnessState::Aggregating;

        let processed = aggregate.processed();
        if self.cancel.is_cancelled() && processed < total {
            log::warn!("run cancelled after {} of {} hands", processed, total);
            return Err(BenchError::Cancelled {
                processed,
                requested: total,
            });
        }
        if processed != total || aggregate.contributions() != workers as u64 {
            return Err(BenchError::AggregateMismatch {
                processed,
                requested: total,
            });
        }

        self.state = HarnessState::Done;
        let report = RunReport {
            hand_size: size,
            workers,
            hands: processed,
            checksum: aggregate.checksum(),
            elapsed,
            per_worker,
        };
        log::info!(
            "{:<32}{:>12} hands {:>10.3}s",
            format!("{} x{} workers", size, workers),
            report.hands,
            report.elapsed_secs()
        );
        Ok(report)
    }
}

/// Claim chunks until the budget runs out, then merge local totals once.
#[allow(clippy::too_many_arguments)]
fn run_worker<S: HandScorer>(
    worker: usize,
    queue: &WorkQueue,
    sampler: HandSampler<'_>,
    evaluator: &Evaluator<S>,
    size: HandSize,
    seeding: Seeding,
    cancel: &CancelToken,
    aggregate: &Aggregate,
) -> u64 {
    let mut ctx = match seeding {
        Seeding::Clock => WorkerContext::from_clock(worker),
        Seeding::Fixed(seed) => WorkerContext::new(mix(seed, worker as u64)),
    };
    let mut checksum = 0u64;
    let mut processed = 0u64;

    while !cancel.is_cancelled() {
        let Some(chunk) = queue.claim() else { break };
        if let Seeding::Fixed(seed) = seeding {
            ctx.reseed(mix(seed, chunk.index));
        }
        let sum = evaluate_chunk(chunk.len, &mut ctx, sampler, evaluator, size);
        checksum = checksum.wrapping_add(sum);
        processed += chunk.len;
    }

    aggregate.merge(checksum, processed);
    processed
}

#[inline]
fn evaluate_chunk<S: HandScorer>(
    len: u64,
    ctx: &mut WorkerContext,
    sampler: HandSampler<'_>,
    evaluator: &Evaluator<S>,
    size: HandSize,
) -> u64 {
    let mut sum = 0u64;
    match size {
        HandSize::Five => {
            for _ in 0..len {
                sum = sum.wrapping_add(evaluator.score5(sampler.draw5(ctx)) as u64);
            }
        }
        HandSize::Seven => {
            for _ in 0..len {
                sum = sum.wrapping_add(evaluator.score_best_of_7(sampler.draw7(ctx)) as u64);
            }
        }
    }
    sum
}
