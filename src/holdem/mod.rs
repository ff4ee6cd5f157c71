/// Error types for allocation, equity and strength tables.
mod errors;
pub use self::errors::{AllocationError, EquityError, PairStrengthError};

/// Static two card strength lookup used to rank candidate pairs.
mod pair_strength;
/// Export `PairStrengthTable`
pub use self::pair_strength::PairStrengthTable;

/// Module that splits the six round cards into one hand per board.
mod allocation;
/// Export `AllocationEngine` and friends
pub use self::allocation::{
    Allocation, AllocationEngine, AllocationStrategy, NUM_BOARDS, ROUND_CARDS,
};

/// Monte Carlo showdown equity against a random hand.
mod equity;
/// Export `EquityEstimator`
pub use self::equity::{EquityEstimator, FULL_BOARD};
