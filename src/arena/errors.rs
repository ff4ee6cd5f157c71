use thiserror::Error;

use crate::core::Card;
use crate::holdem::AllocationError;

#[derive(Error, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum BoardContextError {
    #[error("A board shows 0, 3, 4 or 5 cards, got {0}")]
    InvalidBoardSize(usize),

    #[error("Board shows {cards} cards but the street is {street}")]
    StreetMismatch { street: u8, cards: usize },

    #[error("Minimum raise {min} is above maximum raise {max}")]
    RaiseBoundsInverted { min: u32, max: u32 },

    #[error("Duplicate card on the board: {0}")]
    DuplicateCard(Card),
}

/// Errors that can occur while loading or validating bot configuration
#[derive(Debug, Error)]
pub enum BotConfigError {
    /// Invalid probability value (must be between 0.0 and 1.0)
    #[error("Invalid probability value for {name}: {value} (must be between 0.0 and 1.0)")]
    InvalidProbability { name: &'static str, value: f32 },

    #[error("Monte Carlo equity needs at least one trial")]
    InvalidTrials,

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// File I/O error
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Generic validation error
    #[error("Validation error: {0}")]
    ValidationError(String),
}

#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum BotError {
    #[error("Unable to allocate round cards")]
    Allocation(#[from] AllocationError),

    #[error("Player index {0} is not 0 or 1")]
    InvalidPlayer(usize),
}
