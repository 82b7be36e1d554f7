//! Physical card identity and its Cactus-Kev encoding
//!
//! A `Card` is an index 0-51 (suit * 13 + rank, rank 0 = deuce .. 12 = ace).
//! The engine never scores `Card`s directly: the deck source folds each card
//! into a single `u32` rank value, and everything downstream works on those.

use std::fmt;

/// Prime numbers for each rank (2-A, where 2=index 0, A=index 12)
/// Used for prime product hashing of non-flush hands
pub const RANK_PRIMES: [u32; 13] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41];

const RANK_CHARS: [char; 13] = ['2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K', 'A'];
const SUIT_CHARS: [char; 4] = ['s', 'h', 'd', 'c'];

/// Represents a playing card (0-51, where 0-12 are spades, 13-25 are hearts, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Card(u8);

impl Card {
    /// Create a new card from a value 0-51
    pub fn new(value: u8) -> Self {
        assert!(value < 52, "Card value must be 0-51");
        Card(value)
    }

    /// Create a card from its suit (0=spades, 1=hearts, 2=diamonds, 3=clubs) and rank (0=2 .. 12=A)
    pub fn from_parts(suit: u8, rank: u8) -> Self {
        assert!(suit < 4 && rank < 13, "suit must be 0-3 and rank 0-12");
        Card(suit * 13 + rank)
    }

    /// Get the raw card value (0-51)
    pub fn value(self) -> u8 {
        self.0
    }

    pub fn rank(self) -> u8 {
        self.0 % 13
    }

    pub fn suit(self) -> u8 {
        self.0 / 13
    }

    /// Cactus-Kev encoding:
    ///
    /// ```text
    /// +--------+--------+--------+--------+
    /// |xxxbbbbb|bbbbbbbb|cdhsrrrr|xxpppppp|
    /// +--------+--------+--------+--------+
    /// ```
    /// `b` = one bit per rank, `cdhs` = suit bit, `r` = rank nibble, `p` = rank prime.
    pub fn encode(self) -> u32 {
        let rank = self.rank() as u32;
        let suit_bit = 0x1000u32 << self.suit();
        (1u32 << (16 + rank)) | suit_bit | (rank << 8) | RANK_PRIMES[rank as usize]
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            RANK_CHARS[self.rank() as usize],
            SUIT_CHARS[self.suit() as usize]
        )
    }
}

/// Encode a whitespace-separated hand such as `"As Ks Qs Js Ts"`.
#[cfg(test)]
pub(crate) fn encode_hand<const N: usize>(cards: &str) -> [u32; N] {
    let mut out = [0u32; N];
    let mut tokens = cards.split_whitespace();
    for slot in out.iter_mut() {
        let token = tokens.next().expect("too few cards");
        let mut chars = token.chars();
        let rank = chars
            .next()
            .and_then(|r| RANK_CHARS.iter().position(|&c| c == r))
            .expect("unknown rank");
        let suit = chars
            .next()
            .and_then(|s| SUIT_CHARS.iter().position(|&c| c == s))
            .expect("unknown suit");
        *slot = Card::from_parts(suit as u8, rank as u8).encode();
    }
    assert!(tokens.next().is_none(), "too many cards");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding_fields() {
        // Ace of clubs
        let card = Card::from_parts(3, 12);
        let v = card.encode();
        assert_eq!(v & 0xFF, 41, "prime");
        assert_eq!((v >> 8) & 0xF, 12, "rank nibble");
        assert_eq!(v & 0xF000, 0x8000, "suit bit");
        assert_eq!(v >> 16, 1 << 12, "rank bit");
    }

    #[test]
    fn test_encodings_are_distinct() {
        let mut values: Vec<u32> = (0..52).map(|i| Card::new(i).encode()).collect();
        values.sort_unstable();
        values.dedup();
        assert_eq!(values.len(), 52);
    }

    #[test]
    fn test_display() {
        assert_eq!(Card::from_parts(0, 12).to_string(), "As");
        assert_eq!(Card::from_parts(2, 0).to_string(), "2d");
        assert_eq!(Card::from_parts(1, 8).to_string(), "Th");
    }

    #[test]
    fn test_encode_hand_matches_display() {
        let hand: [u32; 3] = encode_hand("As 2d Th");
        assert_eq!(hand[0], Card::from_parts(0, 12).encode());
        assert_eq!(hand[1], Card::from_parts(2, 0).encode());
        assert_eq!(hand[2], Card::from_parts(1, 8).encode());
    }
}
