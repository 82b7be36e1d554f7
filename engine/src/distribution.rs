//! Single-threaded hand-category frequency analysis
//!
//! Draws a fixed number of hands, scores them through the evaluator adapter and
//! counts how often each of the nine categories comes up. Scores whose category
//! falls outside 1..=9 are tallied separately instead of landing in a bucket.

use crate::context::WorkerContext;
use crate::deck::DeckTable;
use crate::evaluator::Evaluator;
use crate::sampler::HandSampler;
use crate::scoring::{reference_percentages, Category, HandScorer, HandSize, NUM_CATEGORIES};

/// Category frequency table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distribution {
    pub hand_size: HandSize,
    /// `counts[c - 1]` is the number of hands in category `c`
    counts: [u64; NUM_CATEGORIES],
    /// Hands whose category was outside 1..=9
    rejected: u64,
}

impl Distribution {
    pub fn new(hand_size: HandSize) -> Self {
        Distribution {
            hand_size,
            counts: [0; NUM_CATEGORIES],
            rejected: 0,
        }
    }

    /// Count one hand; out-of-range categories only bump `rejected`.
    pub fn record(&mut self, category: u8) {
        match Category::from_index(category) {
            Some(c) => self.counts[c.index() as usize - 1] += 1,
            None => self.rejected += 1,
        }
    }

    pub fn count(&self, category: Category) -> u64 {
        self.counts[category.index() as usize - 1]
    }

    pub fn counts(&self) -> &[u64; NUM_CATEGORIES] {
        &self.counts
    }

    pub fn rejected(&self) -> u64 {
        self.rejected
    }

    /// Hands that landed in a valid category
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Share of `category` among valid hands, in percent.
    pub fn percentage(&self, category: Category) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.count(category) as f64 * 100.0 / total as f64
    }

    /// Largest absolute gap, in percentage points, to the theoretical frequencies.
    pub fn max_deviation(&self) -> f64 {
        let reference = reference_percentages(self.hand_size);
        Category::ALL
            .iter()
            .zip(reference.iter())
            .map(|(&c, &expected)| (self.percentage(c) - expected).abs())
            .fold(0.0, f64::max)
    }
}

/// Draw `count` hands on the calling thread and tabulate their categories.
pub fn analyze<S: HandScorer>(
    deck: &DeckTable,
    scorer: S,
    hand_size: HandSize,
    count: u64,
    ctx: &mut WorkerContext,
) -> Distribution {
    let sampler = HandSampler::new(deck);
    let evaluator = Evaluator::new(scorer);
    let mut distribution = Distribution::new(hand_size);

    for _ in 0..count {
        let score = match hand_size {
            HandSize::Five => evaluator.score5(sampler.draw5(ctx)),
            HandSize::Seven => evaluator.score_best_of_7(sampler.draw7(ctx)),
        };
        distribution.record(evaluator.category(score));
    }

    log::debug!(
        "{} distribution over {} hands ({} rejected)",
        hand_size,
        count,
        distribution.rejected()
    );
    distribution
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cactus::CactusKev;

    const TOLERANCE_PP: f64 = 0.5;

    /// Uses the first card's rank (0..=12) as the category, so 0, 10, 11
    /// and 12 come out invalid.
    struct RankScorer;

    impl HandScorer for RankScorer {
        fn score5(&self, cards: [u32; 5]) -> u16 {
            ((cards[0] >> 8) & 0xF) as u16
        }

        fn category(&self, score: u16) -> u8 {
            score as u8
        }
    }

    #[test]
    fn test_five_card_frequencies() {
        let deck = DeckTable::standard();
        let mut ctx = WorkerContext::new(20_240_601);
        let dist = analyze(&deck, CactusKev::new(), HandSize::Five, 100_000, &mut ctx);
        assert_eq!(dist.total(), 100_000);
        assert_eq!(dist.rejected(), 0);
        let reference = reference_percentages(HandSize::Five);
        for (category, expected) in Category::ALL.iter().zip(reference.iter()) {
            let got = dist.percentage(*category);
            assert!(
                (got - expected).abs() < TOLERANCE_PP,
                "{}: {:.3}% vs expected {:.3}%",
                category,
                got,
                expected
            );
        }
        assert!(dist.max_deviation() < TOLERANCE_PP);
    }

    #[test]
    fn test_seven_card_frequencies() {
        let deck = DeckTable::standard();
        let mut ctx = WorkerContext::new(77_777);
        let dist = analyze(&deck, CactusKev::new(), HandSize::Seven, 100_000, &mut ctx);
        assert_eq!(dist.total(), 100_000);
        assert_eq!(dist.rejected(), 0);
        let reference = reference_percentages(HandSize::Seven);
        for (category, expected) in Category::ALL.iter().zip(reference.iter()) {
            let got = dist.percentage(*category);
            assert!(
                (got - expected).abs() < TOLERANCE_PP,
                "{}: {:.3}% vs expected {:.3}%",
                category,
                got,
                expected
            );
        }
    }

    #[test]
    fn test_out_of_range_categories_are_rejected() {
        let mut dist = Distribution::new(HandSize::Five);
        dist.record(0);
        dist.record(10);
        dist.record(255);
        dist.record(9);
        assert_eq!(dist.rejected(), 3);
        assert_eq!(dist.total(), 1);
        assert_eq!(dist.count(Category::HighCard), 1);
        assert_eq!(dist.count(Category::OnePair), 0);
    }

    #[test]
    fn test_rejections_do_not_leak_into_buckets() {
        let deck = DeckTable::standard();
        let mut ctx = WorkerContext::new(3);
        let dist = analyze(&deck, RankScorer, HandSize::Five, 12_000, &mut ctx);
        assert_eq!(dist.total() + dist.rejected(), 12_000);
        assert!(dist.rejected() > 0);
        assert!(dist.counts().iter().all(|&c| c > 0));
    }

    #[test]
    fn test_same_seed_same_distribution() {
        let deck = DeckTable::standard();
        let scorer = CactusKev::new();
        let a = analyze(&deck, &scorer, HandSize::Seven, 5_000, &mut WorkerContext::new(11));
        let b = analyze(&deck, &scorer, HandSize::Seven, 5_000, &mut WorkerContext::new(11));
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_distribution() {
        let dist = Distribution::new(HandSize::Seven);
        assert_eq!(dist.percentage(Category::TwoPair), 0.0);
    }
}
