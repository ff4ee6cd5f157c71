use thiserror::Error;

use super::Card;

/// Errors from turning text or loose cards into card types.
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum CardParseError {
    #[error("Unexpected value character {0:?}")]
    UnexpectedValueChar(char),
    #[error("Unexpected suit character {0:?}")]
    UnexpectedSuitChar(char),
    #[error("Not enough characters to make a card")]
    TooFewChars,
    #[error("Extra characters after the last card")]
    UnparsedCharsRemaining,
    #[error("Card {0} appears more than once")]
    DuplicateCard(Card),
    #[error("Expected {expected} cards, found {found}")]
    WrongCardCount { expected: usize, found: usize },
}
