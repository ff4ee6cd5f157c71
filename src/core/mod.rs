//! Card primitives and the showdown ranker the rest of the crate builds on.

mod card;
pub use self::card::{Card, Suit, Value};

mod card_bit_set;
pub use self::card_bit_set::{CardBitSet, CardBitSetIter};

mod error;
pub use self::error::CardParseError;

mod hand;
pub use self::hand::Hand;

mod deck;
pub use self::deck::FlatDeck;

/// Hand ranking and the showdown comparison seam.
mod rank;
pub use self::rank::{Rank, RankOracle, Rankable, ShowdownOracle};
