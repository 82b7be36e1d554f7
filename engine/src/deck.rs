//! Deck value table and its one-time initialization
//!
//! The table is loaded from an injected [`DeckSource`] exactly once, validated,
//! and then handed out as an immutable `&DeckTable` to every consumer.

use crate::card::Card;
use crate::error::{BenchError, Result};
use once_cell::sync::OnceCell;

/// Number of cards in a standard deck
pub const DECK_SIZE: usize = 52;

/// One card as reported by a deck source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardDescriptor {
    /// Face rank, 0 = deuce .. 12 = ace
    pub rank: u8,
    /// 0=spades, 1=hearts, 2=diamonds, 3=clubs
    pub suit: u8,
    /// Encoded rank value consumed by the scorer
    pub value: u32,
}

impl From<Card> for CardDescriptor {
    fn from(card: Card) -> Self {
        CardDescriptor {
            rank: card.rank(),
            suit: card.suit(),
            value: card.encode(),
        }
    }
}

/// Supplies the ordered deck the table is built from.
pub trait DeckSource {
    fn cards(&self) -> Vec<CardDescriptor>;
}

/// The 52 Cactus-Kev encoded cards in index order
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardDeck;

impl DeckSource for StandardDeck {
    fn cards(&self) -> Vec<CardDescriptor> {
        (0..DECK_SIZE as u8).map(|i| Card::new(i).into()).collect()
    }
}

/// Immutable table of 52 distinct encoded card values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckTable {
    values: [u32; DECK_SIZE],
}

impl DeckTable {
    /// Load and validate a table from `source`.
    pub fn from_source(source: &dyn DeckSource) -> Result<Self> {
        let cards = source.cards();
        let mut sorted: Vec<u32> = cards.iter().map(|c| c.value).collect();
        sorted.sort_unstable();
        sorted.dedup();
        if cards.len() != DECK_SIZE || sorted.len() != DECK_SIZE {
            return Err(BenchError::DeckSize {
                found: cards.len(),
                distinct: sorted.len(),
            });
        }
        let mut values = [0u32; DECK_SIZE];
        for (slot, card) in values.iter_mut().zip(cards.iter()) {
            *slot = card.value;
        }
        Ok(DeckTable { values })
    }

    /// Table built from [`StandardDeck`]
    pub fn standard() -> Self {
        let cards = StandardDeck.cards();
        let mut values = [0u32; DECK_SIZE];
        for (slot, card) in values.iter_mut().zip(cards.iter()) {
            *slot = card.value;
        }
        DeckTable { values }
    }

    pub fn values(&self) -> &[u32; DECK_SIZE] {
        &self.values
    }

    #[inline(always)]
    pub fn get(&self, index: usize) -> u32 {
        self.values[index]
    }

    pub fn contains(&self, value: u32) -> bool {
        self.values.contains(&value)
    }
}

/// One-time initialization guard for a [`DeckTable`].
///
/// Concurrent `initialize` calls are safe: exactly one runs the source, the
/// rest block until it finishes and observe the same table. A failed load
/// publishes nothing.
#[derive(Debug, Default)]
pub struct DeckCell {
    table: OnceCell<DeckTable>,
}

impl DeckCell {
    pub const fn new() -> Self {
        DeckCell {
            table: OnceCell::new(),
        }
    }

    pub fn initialize(&self, source: &dyn DeckSource) -> Result<&DeckTable> {
        self.table.get_or_try_init(|| {
            let table = DeckTable::from_source(source)?;
            log::debug!("deck table initialized ({} cards)", DECK_SIZE);
            Ok(table)
        })
    }

    /// The published table, or `None` before a successful `initialize`.
    pub fn values(&self) -> Option<&DeckTable> {
        self.table.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingDeck {
        calls: AtomicUsize,
    }

    impl DeckSource for CountingDeck {
        fn cards(&self) -> Vec<CardDescriptor> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            StandardDeck.cards()
        }
    }

    struct ShortDeck;

    impl DeckSource for ShortDeck {
        fn cards(&self) -> Vec<CardDescriptor> {
            let mut cards = StandardDeck.cards();
            cards.pop();
            cards
        }
    }

    struct DuplicateDeck;

    impl DeckSource for DuplicateDeck {
        fn cards(&self) -> Vec<CardDescriptor> {
            let mut cards = StandardDeck.cards();
            cards[51] = cards[0];
            cards
        }
    }

    #[test]
    fn test_standard_table_matches_source() {
        let table = DeckTable::from_source(&StandardDeck).unwrap();
        assert_eq!(table, DeckTable::standard());
        assert_eq!(table.get(0), Card::new(0).encode());
    }

    #[test]
    fn test_wrong_size_is_rejected() {
        let err = DeckTable::from_source(&ShortDeck).unwrap_err();
        assert_eq!(err, BenchError::DeckSize { found: 51, distinct: 51 });
    }

    #[test]
    fn test_duplicates_are_rejected() {
        let err = DeckTable::from_source(&DuplicateDeck).unwrap_err();
        assert_eq!(err, BenchError::DeckSize { found: 52, distinct: 51 });
    }

    #[test]
    fn test_failed_initialize_publishes_nothing() {
        let cell = DeckCell::new();
        assert!(cell.initialize(&ShortDeck).is_err());
        assert!(cell.values().is_none());
        // a later, valid source may still initialize the cell
        assert!(cell.initialize(&StandardDeck).is_ok());
        assert!(cell.values().is_some());
    }

    #[test]
    fn test_concurrent_initialize_loads_once() {
        let cell = DeckCell::new();
        let source = CountingDeck {
            calls: AtomicUsize::new(0),
        };
        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    let table = cell.initialize(&source).unwrap();
                    assert_eq!(table.values().len(), DECK_SIZE);
                });
            }
        });
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);

        // later calls reuse the published table
        let first = cell.initialize(&source).unwrap() as *const DeckTable;
        let second = cell.values().unwrap() as *const DeckTable;
        assert_eq!(first, second);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }
}
