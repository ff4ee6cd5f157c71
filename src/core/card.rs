use std::fmt;
use std::str::FromStr;

use super::CardParseError;

/// Card rank from two through ace.
///
/// The discriminant doubles as the bit offset used by the hand ranker, so
/// the order here is load bearing.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum Value {
    Two = 0,
    Three = 1,
    Four = 2,
    Five = 3,
    Six = 4,
    Seven = 5,
    Eight = 6,
    Nine = 7,
    Ten = 8,
    Jack = 9,
    Queen = 10,
    King = 11,
    Ace = 12,
}

const VALUES: [Value; 13] = [
    Value::Two,
    Value::Three,
    Value::Four,
    Value::Five,
    Value::Six,
    Value::Seven,
    Value::Eight,
    Value::Nine,
    Value::Ten,
    Value::Jack,
    Value::Queen,
    Value::King,
    Value::Ace,
];

impl Value {
    /// Every value, lowest first.
    pub const fn values() -> [Value; 13] {
        VALUES
    }

    /// Look up a value by its discriminant.
    pub fn from_u8(v: u8) -> Option<Value> {
        VALUES.get(v as usize).copied()
    }

    /// Parse the single character form (`2`..`9`, `T`, `J`, `Q`, `K`, `A`).
    pub fn from_char(c: char) -> Option<Value> {
        match c.to_ascii_uppercase() {
            '2' => Some(Value::Two),
            '3' => Some(Value::Three),
            '4' => Some(Value::Four),
            '5' => Some(Value::Five),
            '6' => Some(Value::Six),
            '7' => Some(Value::Seven),
            '8' => Some(Value::Eight),
            '9' => Some(Value::Nine),
            'T' => Some(Value::Ten),
            'J' => Some(Value::Jack),
            'Q' => Some(Value::Queen),
            'K' => Some(Value::King),
            'A' => Some(Value::Ace),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Value::Two => '2',
            Value::Three => '3',
            Value::Four => '4',
            Value::Five => '5',
            Value::Six => '6',
            Value::Seven => '7',
            Value::Eight => '8',
            Value::Nine => '9',
            Value::Ten => 'T',
            Value::Jack => 'J',
            Value::Queen => 'Q',
            Value::King => 'K',
            Value::Ace => 'A',
        }
    }
}

/// Card suit. Suits never order hands; the derive exists so cards can be
/// sorted for display.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum Suit {
    Spade = 0,
    Club = 1,
    Heart = 2,
    Diamond = 3,
}

const SUITS: [Suit; 4] = [Suit::Spade, Suit::Club, Suit::Heart, Suit::Diamond];

impl Suit {
    pub const fn suits() -> [Suit; 4] {
        SUITS
    }

    pub fn from_u8(s: u8) -> Option<Suit> {
        SUITS.get(s as usize).copied()
    }

    /// Parse `s`, `c`, `h` or `d`, in either case.
    pub fn from_char(c: char) -> Option<Suit> {
        match c.to_ascii_lowercase() {
            's' => Some(Suit::Spade),
            'c' => Some(Suit::Club),
            'h' => Some(Suit::Heart),
            'd' => Some(Suit::Diamond),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Suit::Spade => 's',
            Suit::Club => 'c',
            Suit::Heart => 'h',
            Suit::Diamond => 'd',
        }
    }
}

/// A single playing card.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Card {
    pub value: Value,
    pub suit: Suit,
}

impl Card {
    pub const fn new(value: Value, suit: Suit) -> Self {
        Self { value, suit }
    }

    /// Position of the card in a 52 card deck, `0..52`.
    pub fn index(&self) -> usize {
        (self.value as usize) * 4 + self.suit as usize
    }

    /// Inverse of [`Card::index`].
    pub fn from_index(idx: usize) -> Option<Card> {
        if idx >= 52 {
            return None;
        }
        Some(Card {
            value: Value::from_u8((idx / 4) as u8)?,
            suit: Suit::from_u8((idx % 4) as u8)?,
        })
    }

    /// Parse a whitespace free run of cards such as `"AsKd7h"`.
    ///
    /// Duplicates are not checked here; callers that need distinct cards
    /// use [`super::Hand`] or [`super::CardBitSet`].
    pub fn parse_many(s: &str) -> Result<Vec<Card>, CardParseError> {
        let chars: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        if chars.len() % 2 != 0 {
            return Err(CardParseError::UnparsedCharsRemaining);
        }
        chars
            .chunks(2)
            .map(|pair| {
                let value =
                    Value::from_char(pair[0]).ok_or(CardParseError::UnexpectedValueChar(pair[0]))?;
                let suit =
                    Suit::from_char(pair[1]).ok_or(CardParseError::UnexpectedSuitChar(pair[1]))?;
                Ok(Card::new(value, suit))
            })
            .collect()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value.to_char(), self.suit.to_char())
    }
}

impl FromStr for Card {
    type Err = CardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        let value_char = chars.next().ok_or(CardParseError::TooFewChars)?;
        let suit_char = chars.next().ok_or(CardParseError::TooFewChars)?;
        if chars.next().is_some() {
            return Err(CardParseError::UnparsedCharsRemaining);
        }
        let value =
            Value::from_char(value_char).ok_or(CardParseError::UnexpectedValueChar(value_char))?;
        let suit = Suit::from_char(suit_char).ok_or(CardParseError::UnexpectedSuitChar(suit_char))?;
        Ok(Card::new(value, suit))
    }
}
