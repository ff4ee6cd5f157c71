use std::fmt;
use std::ops::{BitAnd, BitOr, BitXor, Not};

use super::Card;

const FULL_DECK_BITS: u64 = (1 << 52) - 1;

/// A set of cards stored as one bit per card.
///
/// Insert, remove and contains are O(1) with no allocation, which matters in
/// the inner loop of the equity simulation.
#[derive(Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CardBitSet {
    bits: u64,
}

impl CardBitSet {
    /// Creates a new empty `CardBitSet`.
    #[inline]
    pub fn new() -> Self {
        Self { bits: 0 }
    }

    /// All 52 cards.
    #[inline]
    pub fn full_deck() -> Self {
        Self {
            bits: FULL_DECK_BITS,
        }
    }

    /// Inserts a card.
    ///
    /// Returns `true` if the card was not already present.
    #[inline]
    pub fn insert(&mut self, card: Card) -> bool {
        let mask = 1u64 << card.index();
        let was_present = (self.bits & mask) != 0;
        self.bits |= mask;
        !was_present
    }

    /// Removes a card, returning `true` if it was present.
    #[inline]
    pub fn remove(&mut self, card: Card) -> bool {
        let mask = 1u64 << card.index();
        let was_present = (self.bits & mask) != 0;
        self.bits &= !mask;
        was_present
    }

    #[inline]
    pub fn contains(&self, card: Card) -> bool {
        (self.bits & (1u64 << card.index())) != 0
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.bits.count_ones() as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Iterate the cards in deck order (twos first).
    pub fn iter(&self) -> CardBitSetIter {
        CardBitSetIter { bits: self.bits }
    }
}

impl fmt::Debug for CardBitSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(|c| c.to_string())).finish()
    }
}

impl BitOr for CardBitSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self {
            bits: self.bits | rhs.bits,
        }
    }
}

impl BitAnd for CardBitSet {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self {
            bits: self.bits & rhs.bits,
        }
    }
}

impl BitXor for CardBitSet {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self {
        Self {
            bits: self.bits ^ rhs.bits,
        }
    }
}

/// Complement within the 52 card deck.
impl Not for CardBitSet {
    type Output = Self;

    fn not(self) -> Self {
        Self {
            bits: !self.bits & FULL_DECK_BITS,
        }
    }
}

impl FromIterator<Card> for CardBitSet {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        let mut set = CardBitSet::new();
        for card in iter {
            set.insert(card);
        }
        set
    }
}

impl IntoIterator for CardBitSet {
    type Item = Card;
    type IntoIter = CardBitSetIter;

    fn into_iter(self) -> CardBitSetIter {
        self.iter()
    }
}

#[derive(Debug, Clone)]
pub struct CardBitSetIter {
    bits: u64,
}

impl Iterator for CardBitSetIter {
    type Item = Card;

    fn next(&mut self) -> Option<Card> {
        if self.bits == 0 {
            return None;
        }
        let idx = self.bits.trailing_zeros() as usize;
        // Clear the lowest set bit.
        self.bits &= self.bits - 1;
        Card::from_index(idx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.bits.count_ones() as usize;
        (n, Some(n))
    }
}
