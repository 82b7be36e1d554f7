//! Per-worker scratch state
//!
//! Each worker builds one `WorkerContext` and threads it through every draw it
//! makes. Contexts are moved into their worker, never shared, so the hot path
//! needs no synchronization.

use crate::deck::DECK_SIZE;
use crate::rng::{mix, XorShift64Star};
use std::time::{SystemTime, UNIX_EPOCH};

/// Private RNG plus the buffers the sampler shuffles into.
#[derive(Debug, Clone)]
pub struct WorkerContext {
    pub(crate) rng: XorShift64Star,
    /// Identity permutation of deck indices between draws
    pub(crate) perm: [u8; DECK_SIZE],
    /// Swap targets of the current draw, replayed backwards to restore `perm`
    pub(crate) undo: [u8; DECK_SIZE],
    /// Sampled card values of the most recent draw
    pub(crate) hand: [u32; DECK_SIZE],
}

impl WorkerContext {
    /// Context with a fixed seed
    pub fn new(seed: u64) -> Self {
        let mut perm = [0u8; DECK_SIZE];
        for (i, slot) in perm.iter_mut().enumerate() {
            *slot = i as u8;
        }
        WorkerContext {
            rng: XorShift64Star::new(seed),
            perm,
            undo: [0u8; DECK_SIZE],
            hand: [0u32; DECK_SIZE],
        }
    }

    /// Context seeded from the clock and the worker index, so workers started
    /// in the same instant still get uncorrelated streams.
    pub fn from_clock(worker: usize) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default();
        Self::new(mix(nanos, worker as u64))
    }

    /// Restart the RNG stream; buffers are left as they are.
    pub fn reseed(&mut self, seed: u64) {
        self.rng.reseed(seed);
    }

    pub fn rng_state(&self) -> u64 {
        self.rng.state()
    }

    /// True when the permutation buffer holds the identity permutation.
    pub fn is_reset(&self) -> bool {
        self.perm.iter().enumerate().all(|(i, &p)| p as usize == i)
    }
}
