//! Unique-card hand sampler
//!
//! Partial Fisher–Yates over the worker's permutation buffer: for each output
//! position j pick k uniformly in [j, 52), swap, and emit the deck value at j.
//! Only the first n cells are ever read, so a draw is O(n). The swap targets go
//! into an undo log and are replayed in reverse afterwards, leaving the buffer
//! as the identity for the next draw without an O(52) reset.

use crate::context::WorkerContext;
use crate::deck::{DeckTable, DECK_SIZE};
use crate::error::{BenchError, Result};

/// Draws distinct cards from a shared, read-only deck table.
#[derive(Debug, Clone, Copy)]
pub struct HandSampler<'d> {
    deck: &'d DeckTable,
}

impl<'d> HandSampler<'d> {
    pub fn new(deck: &'d DeckTable) -> Self {
        HandSampler { deck }
    }

    /// Draw `n` distinct card values into the context's hand buffer.
    ///
    /// `n` must be in `1..=52`; `n == 52` yields the whole deck shuffled.
    pub fn draw<'c>(&self, n: usize, ctx: &'c mut WorkerContext) -> Result<&'c [u32]> {
        if n == 0 || n > DECK_SIZE {
            return Err(BenchError::InvalidHandSize(n));
        }
        self.fill(n, ctx);
        Ok(&ctx.hand[..n])
    }

    /// Draw five distinct values.
    #[inline]
    pub fn draw5(&self, ctx: &mut WorkerContext) -> [u32; 5] {
        self.fill(5, ctx);
        let mut out = [0u32; 5];
        out.copy_from_slice(&ctx.hand[..5]);
        out
    }

    /// Draw seven distinct values.
    #[inline]
    pub fn draw7(&self, ctx: &mut WorkerContext) -> [u32; 7] {
        self.fill(7, ctx);
        let mut out = [0u32; 7];
        out.copy_from_slice(&ctx.hand[..7]);
        out
    }

    #[inline(always)]
    fn fill(&self, n: usize, ctx: &mut WorkerContext) {
        debug_assert!(n <= DECK_SIZE);
        debug_assert!(ctx.is_reset(), "permutation buffer must be identity between draws");
        let WorkerContext { rng, perm, undo, hand } = ctx;

        for j in 0..n {
            let k = j + rng.below((DECK_SIZE - j) as u64) as usize;
            perm.swap(j, k);
            undo[j] = k as u8;
            hand[j] = self.deck.get(perm[j] as usize);
        }

        for j in (0..n).rev() {
            perm.swap(j, undo[j] as usize);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_distinct_and_valid(deck: &DeckTable, values: &[u32]) {
        for (i, &v) in values.iter().enumerate() {
            assert!(deck.contains(v), "value {:#x} not in deck", v);
            for &w in &values[i + 1..] {
                assert_ne!(v, w, "duplicate value {:#x}", v);
            }
        }
    }

    #[test]
    fn test_draws_are_distinct_and_valid() {
        let deck = DeckTable::standard();
        let sampler = HandSampler::new(&deck);
        let mut ctx = WorkerContext::new(12345);
        for _ in 0..10_000 {
            assert_distinct_and_valid(&deck, sampler.draw(5, &mut ctx).unwrap());
            assert_distinct_and_valid(&deck, sampler.draw(7, &mut ctx).unwrap());
            assert_distinct_and_valid(&deck, &sampler.draw5(&mut ctx));
            assert_distinct_and_valid(&deck, &sampler.draw7(&mut ctx));
        }
    }

    #[test]
    fn test_consecutive_draws_on_one_context() {
        let deck = DeckTable::standard();
        let sampler = HandSampler::new(&deck);
        let mut ctx = WorkerContext::new(99);
        let first = sampler.draw(5, &mut ctx).unwrap().to_vec();
        let second = sampler.draw(5, &mut ctx).unwrap().to_vec();
        assert_distinct_and_valid(&deck, &first);
        assert_distinct_and_valid(&deck, &second);
        assert!(ctx.is_reset());
    }

    #[test]
    fn test_undo_log_restores_identity() {
        let deck = DeckTable::standard();
        let sampler = HandSampler::new(&deck);
        let mut ctx = WorkerContext::new(7);
        for n in 1..=DECK_SIZE {
            sampler.draw(n, &mut ctx).unwrap();
            assert!(ctx.is_reset(), "buffer not restored after drawing {}", n);
        }
    }

    #[test]
    fn test_zero_cards_rejected() {
        let deck = DeckTable::standard();
        let sampler = HandSampler::new(&deck);
        let mut ctx = WorkerContext::new(1);
        assert_eq!(sampler.draw(0, &mut ctx), Err(BenchError::InvalidHandSize(0)));
        assert_eq!(sampler.draw(53, &mut ctx), Err(BenchError::InvalidHandSize(53)));
    }

    #[test]
    fn test_full_deck_draw() {
        let deck = DeckTable::standard();
        let sampler = HandSampler::new(&deck);
        let mut ctx = WorkerContext::new(2024);
        let mut drawn = sampler.draw(DECK_SIZE, &mut ctx).unwrap().to_vec();
        let in_order = drawn.as_slice() == deck.values().as_slice();
        drawn.sort_unstable();
        let mut expected = deck.values().to_vec();
        expected.sort_unstable();
        assert_eq!(drawn, expected);
        assert!(!in_order, "52-card draw should be shuffled");
    }

    #[test]
    fn test_same_seed_same_hands() {
        let deck = DeckTable::standard();
        let sampler = HandSampler::new(&deck);
        let mut a = WorkerContext::new(5);
        let mut b = WorkerContext::new(5);
        for _ in 0..100 {
            assert_eq!(sampler.draw7(&mut a), sampler.draw7(&mut b));
        }
    }

    #[test]
    fn test_first_card_roughly_uniform() {
        let deck = DeckTable::standard();
        let sampler = HandSampler::new(&deck);
        let mut ctx = WorkerContext::new(31337);
        let mut counts = std::collections::HashMap::new();
        for _ in 0..52_000 {
            let hand = sampler.draw5(&mut ctx);
            *counts.entry(hand[0]).or_insert(0u32) += 1;
        }
        assert_eq!(counts.len(), DECK_SIZE);
        for (&value, &count) in &counts {
            assert!(count > 800 && count < 1200, "card {:#x} drawn {} times", value, count);
        }
    }
}
