use rand::Rng;
use rand::seq::SliceRandom;

use super::{Card, CardBitSet};

/// The undealt part of a 52 card deck laid out flat so it can be sampled
/// without replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatDeck {
    cards: Vec<Card>,
}

impl FlatDeck {
    /// A deck holding every card not in `known`.
    pub fn without(known: CardBitSet) -> Self {
        Self {
            cards: (!known).into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Draw `n` distinct cards at random.
    ///
    /// The deck itself is never shrunk; only the order changes, so the same
    /// deck can be sampled again for the next trial. Returns `None` when the
    /// deck holds fewer than `n` cards.
    pub fn sample<R: Rng + ?Sized>(&mut self, rng: &mut R, n: usize) -> Option<&[Card]> {
        if n > self.cards.len() {
            return None;
        }
        let (drawn, _rest) = self.cards.partial_shuffle(rng, n);
        Some(&*drawn)
    }
}

impl Default for FlatDeck {
    fn default() -> Self {
        Self::without(CardBitSet::new())
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn test_without_removes_known() {
        let known: CardBitSet = Card::parse_many("AsKs").unwrap().into_iter().collect();
        let deck = FlatDeck::without(known);
        assert_eq!(50, deck.len());
        assert_eq!(52, FlatDeck::default().len());
    }

    #[test]
    fn test_sample_is_distinct_and_unknown() {
        let known: CardBitSet = Card::parse_many("AsKsQs").unwrap().into_iter().collect();
        let mut deck = FlatDeck::without(known);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..100 {
            let drawn: CardBitSet = deck.sample(&mut rng, 7).unwrap().iter().copied().collect();
            assert_eq!(7, drawn.count());
            assert!((drawn & known).is_empty());
        }
        assert_eq!(49, deck.len());
    }

    #[test]
    fn test_sample_too_many() {
        let known = !CardBitSet::new();
        let mut deck = FlatDeck::without(known);
        let mut rng = StdRng::seed_from_u64(7);
        assert!(deck.is_empty());
        assert!(deck.sample(&mut rng, 1).is_none());
        assert!(deck.sample(&mut rng, 0).is_some());
    }
}
