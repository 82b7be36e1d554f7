//! Cactus Kev 5-card scorer
//!
//! Two-path evaluation over Cactus-Kev encoded cards:
//! - Flush: OR of the rank bits indexes the flush table
//! - Non-flush: five distinct ranks index the unique5 table, anything paired
//!   falls back to a binary search over sorted prime products
//!
//! Scores follow the classic 1..=7462 equivalence-class numbering
//! (1 = royal flush, 7462 = 7-5-4-3-2 offsuit). Tables are enumerated once at
//! construction rather than shipped as literals.

use crate::card::RANK_PRIMES;
use crate::scoring::HandScorer;

/// Highest (weakest) valid score
pub const WORST_SCORE: u16 = 7462;

/// Upper bound of each category's score range, strongest first
const CATEGORY_BOUNDS: [u16; 9] = [10, 166, 322, 1599, 1609, 2467, 3325, 6185, 7462];

/// The ten straights as rank masks, ace-high first, wheel last
const STRAIGHTS: [u16; 10] = [
    0x1F00, 0x0F80, 0x07C0, 0x03E0, 0x01F0, 0x00F8, 0x007C, 0x003E, 0x001F, 0x100F,
];

const MASK_SPACE: usize = 1 << 13;
const RANK_BITS: u32 = MASK_SPACE as u32 - 1;

/// Cactus Kev scorer with lookup tables built at construction
#[derive(Debug, Clone)]
pub struct CactusKev {
    flushes: Box<[u16]>,
    unique5: Box<[u16]>,
    /// (prime product, score) for every paired rank pattern, sorted by product
    products: Vec<(u32, u16)>,
}

impl CactusKev {
    /// Build the flush, unique5 and prime-product tables.
    pub fn new() -> Self {
        let mut flushes = vec![0u16; MASK_SPACE].into_boxed_slice();
        let mut unique5 = vec![0u16; MASK_SPACE].into_boxed_slice();

        for (i, &mask) in STRAIGHTS.iter().enumerate() {
            flushes[mask as usize] = 1 + i as u16;
            unique5[mask as usize] = 1600 + i as u16;
        }

        // Distinct-rank sets compare like their masks: a larger mask means a
        // higher top card, then a higher next card, and so on.
        let mut next = 0u16;
        for mask in (0..MASK_SPACE as u16).rev() {
            if mask.count_ones() != 5 || STRAIGHTS.contains(&mask) {
                continue;
            }
            flushes[mask as usize] = 323 + next;
            unique5[mask as usize] = 6186 + next;
            next += 1;
        }
        debug_assert_eq!(next, 1277);

        let mut products = Vec::with_capacity(156 + 156 + 858 + 858 + 2860);
        let p = |r: usize| RANK_PRIMES[r];
        let desc = || (0..13usize).rev();

        let mut score = 11u16;
        // four of a kind, then full house
        for quad in desc() {
            for kicker in desc().filter(|&k| k != quad) {
                products.push((p(quad).pow(4) * p(kicker), score));
                score += 1;
            }
        }
        for trips in desc() {
            for pair in desc().filter(|&k| k != trips) {
                products.push((p(trips).pow(3) * p(pair).pow(2), score));
                score += 1;
            }
        }
        debug_assert_eq!(score, 323);

        score = 1610;
        for trips in desc() {
            for k1 in desc().filter(|&k| k != trips) {
                for k2 in (0..k1).rev().filter(|&k| k != trips) {
                    products.push((p(trips).pow(3) * p(k1) * p(k2), score));
                    score += 1;
                }
            }
        }
        for high in desc() {
            for low in (0..high).rev() {
                for kicker in desc().filter(|&k| k != high && k != low) {
                    products.push((p(high).pow(2) * p(low).pow(2) * p(kicker), score));
                    score += 1;
                }
            }
        }
        for pair in desc() {
            for k1 in desc().filter(|&k| k != pair) {
                for k2 in (0..k1).rev().filter(|&k| k != pair) {
                    for k3 in (0..k2).rev().filter(|&k| k != pair) {
                        products.push((p(pair).pow(2) * p(k1) * p(k2) * p(k3), score));
                        score += 1;
                    }
                }
            }
        }
        debug_assert_eq!(score, 6186);

        products.sort_unstable_by_key(|&(product, _)| product);
        log::trace!("cactus kev tables built ({} paired patterns)", products.len());

        CactusKev {
            flushes,
            unique5,
            products,
        }
    }
}

impl Default for CactusKev {
    fn default() -> Self {
        Self::new()
    }
}

impl HandScorer for CactusKev {
    /// Total over every `u32` input. Values outside the Cactus-Kev encoding
    /// never index past the tables; unknown rank patterns score 0.
    #[inline]
    fn score5(&self, c: [u32; 5]) -> u16 {
        let mask = (((c[0] | c[1] | c[2] | c[3] | c[4]) >> 16) & RANK_BITS) as usize;
        if c[0] & c[1] & c[2] & c[3] & c[4] & 0xF000 != 0 {
            return self.flushes[mask];
        }
        let distinct = self.unique5[mask];
        if distinct != 0 {
            return distinct;
        }
        let product: u64 = c.iter().map(|&v| (v & 0xFF) as u64).product();
        let Ok(product) = u32::try_from(product) else {
            return 0;
        };
        match self.products.binary_search_by_key(&product, |&(p, _)| p) {
            Ok(i) => self.products[i].1,
            Err(_) => 0,
        }
    }

    fn category(&self, score: u16) -> u8 {
        if score == 0 {
            return 0;
        }
        CATEGORY_BOUNDS
            .iter()
            .position(|&bound| score <= bound)
            .map(|i| i as u8 + 1)
            .unwrap_or(0)
    }
}
