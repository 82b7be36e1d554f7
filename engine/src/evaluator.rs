//! Hand evaluator adapter
//!
//! Wraps an opaque [`HandScorer`] to score either a 5-card hand directly or the
//! best 5-card hand inside 7 cards. The 7-card path walks all C(7,5) = 21
//! subsets from a precomputed index table and keeps the minimum score.

use crate::scoring::HandScorer;

/// Every 5-card subset of a 7-card hand, in lexicographic order.
pub const COMBINATIONS: [[usize; 5]; 21] = [
    [0, 1, 2, 3, 4],
    [0, 1, 2, 3, 5],
    [0, 1, 2, 3, 6],
    [0, 1, 2, 4, 5],
    [0, 1, 2, 4, 6],
    [0, 1, 2, 5, 6],
    [0, 1, 3, 4, 5],
    [0, 1, 3, 4, 6],
    [0, 1, 3, 5, 6],
    [0, 1, 4, 5, 6],
    [0, 2, 3, 4, 5],
    [0, 2, 3, 4, 6],
    [0, 2, 3, 5, 6],
    [0, 2, 4, 5, 6],
    [0, 3, 4, 5, 6],
    [1, 2, 3, 4, 5],
    [1, 2, 3, 4, 6],
    [1, 2, 3, 5, 6],
    [1, 2, 4, 5, 6],
    [1, 3, 4, 5, 6],
    [2, 3, 4, 5, 6],
];

/// Scores sampled hands through an injected scorer.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<S> {
    scorer: S,
}

impl<S: HandScorer> Evaluator<S> {
    pub fn new(scorer: S) -> Self {
        Evaluator { scorer }
    }

    pub fn scorer(&self) -> &S {
        &self.scorer
    }

    /// Score a 5-card hand.
    #[inline(always)]
    pub fn score5(&self, cards: [u32; 5]) -> u16 {
        self.scorer.score5(cards)
    }

    /// Score a 7-card hand as the strongest of its 21 five-card subsets.
    ///
    /// Every subset is scored; there is no early exit.
    #[inline]
    pub fn score_best_of_7(&self, cards: [u32; 7]) -> u16 {
        let mut best = u16::MAX;
        for row in COMBINATIONS.iter() {
            let score = self.scorer.score5([
                cards[row[0]],
                cards[row[1]],
                cards[row[2]],
                cards[row[3]],
                cards[row[4]],
            ]);
            if score < best {
                best = score;
            }
        }
        best
    }

    pub fn category(&self, score: u16) -> u8 {
        self.scorer.category(score)
    }
}
