use thiserror::Error;

use crate::core::{Card, Value};

#[derive(Error, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum AllocationError {
    #[error("Allocation needs exactly 6 distinct cards, got {count} ({distinct} distinct)")]
    InvalidInput { count: usize, distinct: usize },
}

#[derive(Error, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum EquityError {
    #[error("Deck underflow: a trial needs {needed} unknown cards but only {available} remain")]
    DeckUnderflow { needed: usize, available: usize },

    #[error("A board holds at most 5 cards, got {0}")]
    TooManyBoardCards(usize),

    #[error("Card {0} is known more than once")]
    DuplicateCard(Card),

    #[error("Equity needs at least one trial")]
    NoTrials,
}

#[derive(Error, Debug, PartialEq, Clone, Copy)]
pub enum PairStrengthError {
    #[error("Strength for {first:?}/{second:?} is {strength}, outside [0, 1]")]
    OutOfRange {
        first: Value,
        second: Value,
        strength: f32,
    },

    #[error("Strength table is not symmetric at {first:?}/{second:?}")]
    NotSymmetric { first: Value, second: Value },
}
