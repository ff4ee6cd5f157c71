use std::cmp::Ordering;

use super::{Card, CardBitSet, Hand};

/// Showdown strength of a set of cards.
///
/// Variants are ordered weakest to strongest; the `u32` breaks ties inside a
/// category, so the derived `Ord` is the full showdown order.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Copy)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum Rank {
    HighCard(u32),
    OnePair(u32),
    TwoPair(u32),
    ThreeOfAKind(u32),
    Straight(u32),
    Flush(u32),
    FullHouse(u32),
    FourOfAKind(u32),
    StraightFlush(u32),
}

/// Ace, two, three, four, five.
const WHEEL: u32 = 0b1_0000_0000_1111;

/// Top card of the best straight in a value bit set, with the wheel as 0.
fn rank_straight(value_set: u32) -> Option<u32> {
    // Five consecutive bits survive the shifted AND as one set bit at the
    // bottom of the run.
    let runs =
        value_set & (value_set << 1) & (value_set << 2) & (value_set << 3) & (value_set << 4);
    let idx = runs.leading_zeros();
    if idx < 32 {
        Some(32 - 4 - idx)
    } else if value_set & WHEEL == WHEEL {
        Some(0)
    } else {
        None
    }
}

fn keep_highest(set: u32) -> u32 {
    // Short hands can run out of kickers.
    if set == 0 {
        return 0;
    }
    1 << (32 - set.leading_zeros() - 1)
}

/// Drop low bits until only `to_keep` remain.
fn keep_n(set: u32, to_keep: u32) -> u32 {
    let mut result = set;
    while result.count_ones() > to_keep {
        result &= result - 1;
    }
    result
}

/// Anything that can be ranked at showdown. Works for two to seven cards.
pub trait Rankable {
    fn cards(&self) -> impl Iterator<Item = Card>;

    /// Best five card rank of the cards.
    ///
    /// # Examples
    /// ```
    /// use triboard::core::{Card, Rank, Rankable};
    ///
    /// let cards = Card::parse_many("2h2d8d8sKd6sTh").unwrap();
    /// assert!(matches!(cards.rank(), Rank::TwoPair(_)));
    /// ```
    fn rank(&self) -> Rank {
        let mut value_to_count = [0u8; 13];
        let mut count_to_value = [0u32; 5];
        let mut suit_value_sets = [0u32; 4];
        let mut value_set: u32 = 0;

        for c in self.cards() {
            let v = c.value as u8;
            value_set |= 1 << v;
            value_to_count[v as usize] += 1;
            suit_value_sets[c.suit as usize] |= 1 << v;
        }

        for (value, &count) in value_to_count.iter().enumerate() {
            count_to_value[count as usize] |= 1 << value;
        }

        let trips = count_to_value[3];
        let pairs = count_to_value[2];

        if let Some(flush) = suit_value_sets.iter().find(|sv| sv.count_ones() >= 5) {
            match rank_straight(*flush) {
                Some(top) => Rank::StraightFlush(top),
                None => Rank::Flush(keep_n(*flush, 5)),
            }
        } else if count_to_value[4] != 0 {
            let kicker = keep_highest(value_set ^ count_to_value[4]);
            Rank::FourOfAKind((count_to_value[4] << 13) | kicker)
        } else if trips.count_ones() == 2 {
            // Two sets: the lower one plays as the pair.
            let set = keep_highest(trips);
            Rank::FullHouse((set << 13) | (trips ^ set))
        } else if trips != 0 && pairs != 0 {
            Rank::FullHouse((trips << 13) | keep_highest(pairs))
        } else if let Some(top) = rank_straight(value_set) {
            Rank::Straight(top)
        } else if trips != 0 {
            Rank::ThreeOfAKind((trips << 13) | keep_n(value_set ^ trips, 2))
        } else if pairs.count_ones() >= 2 {
            let top_pairs = keep_n(pairs, 2);
            Rank::TwoPair((top_pairs << 13) | keep_highest(value_set ^ top_pairs))
        } else if pairs != 0 {
            Rank::OnePair((pairs << 13) | keep_n(value_set ^ pairs, 3))
        } else {
            Rank::HighCard(keep_n(value_set, 5))
        }
    }
}

impl Rankable for Vec<Card> {
    fn cards(&self) -> impl Iterator<Item = Card> {
        self.iter().copied()
    }
}

impl Rankable for [Card] {
    fn cards(&self) -> impl Iterator<Item = Card> {
        self.iter().copied()
    }
}

impl Rankable for Hand {
    fn cards(&self) -> impl Iterator<Item = Card> {
        self.iter()
    }
}

impl Rankable for CardBitSet {
    fn cards(&self) -> impl Iterator<Item = Card> {
        self.iter()
    }
}

/// Orders two showdown holdings. Only the ordering matters; callers never
/// look at a numeric strength.
pub trait ShowdownOracle {
    fn compare(&self, ours: &[Card], theirs: &[Card]) -> Ordering;
}

/// Oracle backed by [`Rankable::rank`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RankOracle;

impl ShowdownOracle for RankOracle {
    fn compare(&self, ours: &[Card], theirs: &[Card]) -> Ordering {
        ours.rank().cmp(&theirs.rank())
    }
}
