use std::fmt;
use std::str::FromStr;

use super::{Card, CardParseError};

/// Two distinct hole cards committed to a single board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "[Card; 2]", into = "[Card; 2]")]
pub struct Hand {
    cards: [Card; 2],
}

impl Hand {
    /// Create a hand, rejecting a repeated card.
    pub fn new(first: Card, second: Card) -> Result<Self, CardParseError> {
        if first == second {
            return Err(CardParseError::DuplicateCard(first));
        }
        Ok(Self {
            cards: [first, second],
        })
    }

    /// Parse a hand from a four character string such as `"AsKd"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use triboard::core::Hand;
    ///
    /// let hand = Hand::new_from_str("AsKd").unwrap();
    /// assert_eq!("AsKd", hand.to_string());
    /// assert!(Hand::new_from_str("AsAs").is_err());
    /// ```
    pub fn new_from_str(s: &str) -> Result<Self, CardParseError> {
        let cards = Card::parse_many(s)?;
        match cards.as_slice() {
            [first, second] => Hand::new(*first, *second),
            _ => Err(CardParseError::WrongCardCount {
                expected: 2,
                found: cards.len(),
            }),
        }
    }

    pub fn cards(&self) -> [Card; 2] {
        self.cards
    }

    pub fn iter(&self) -> impl Iterator<Item = Card> + '_ {
        self.cards.iter().copied()
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    /// True when the two cards share a card.
    pub fn overlaps(&self, other: &Hand) -> bool {
        other.iter().any(|c| self.contains(c))
    }
}

impl TryFrom<[Card; 2]> for Hand {
    type Error = CardParseError;

    fn try_from(cards: [Card; 2]) -> Result<Self, Self::Error> {
        Hand::new(cards[0], cards[1])
    }
}

impl From<Hand> for [Card; 2] {
    fn from(hand: Hand) -> Self {
        hand.cards
    }
}

impl FromStr for Hand {
    type Err = CardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Hand::new_from_str(s)
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.cards[0], self.cards[1])
    }
}
