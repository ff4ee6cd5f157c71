//! Static strength of a two card starting hand, ignoring suits.
//!
//! The built-in numbers are the heads-up all-in equity, in tenths of a
//! percent, of the offsuit (or paired) holding against one random hand. That
//! makes them usable both for ranking candidate pairs during allocation and
//! as a cheap equity seed before any simulation has run.

use std::sync::LazyLock;

use crate::core::{Card, Value};

use super::PairStrengthError;

/// Row `i` holds the hands whose high card has discriminant `i`, one entry per
/// low card from two up to the pair.
const HEADS_UP_PERMILLE: [&[u16]; 13] = [
    &[503],
    &[329, 537],
    &[339, 357, 570],
    &[348, 367, 385, 603],
    &[346, 364, 383, 401, 633],
    &[354, 372, 391, 409, 427, 662],
    &[375, 380, 400, 418, 436, 455, 691],
    &[398, 407, 413, 432, 449, 467, 484, 721],
    &[422, 431, 440, 446, 465, 482, 500, 517, 751],
    &[448, 457, 466, 475, 482, 500, 517, 534, 554, 775],
    &[475, 484, 492, 502, 511, 519, 538, 555, 574, 582, 799],
    &[505, 514, 524, 533, 543, 554, 563, 580, 599, 606, 614, 824],
    &[550, 559, 568, 577, 578, 591, 601, 609, 629, 636, 645, 654, 852],
];

static BUILTIN: LazyLock<PairStrengthTable> = LazyLock::new(|| {
    let mut strengths = [[0.0_f32; 13]; 13];
    for (high, row) in HEADS_UP_PERMILLE.iter().enumerate() {
        for (low, &permille) in row.iter().enumerate() {
            let strength = f32::from(permille) / 1000.0;
            strengths[high][low] = strength;
            strengths[low][high] = strength;
        }
    }
    PairStrengthTable { strengths }
});

/// Symmetric strength lookup keyed by two card values.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "[[f32; 13]; 13]", into = "[[f32; 13]; 13]")]
pub struct PairStrengthTable {
    strengths: [[f32; 13]; 13],
}

impl PairStrengthTable {
    /// Build a custom table. Every entry must be in `[0, 1]` and the matrix
    /// must be symmetric.
    pub fn new(strengths: [[f32; 13]; 13]) -> Result<Self, PairStrengthError> {
        let values = Value::values();
        for (i, row) in strengths.iter().enumerate() {
            for (j, &strength) in row.iter().enumerate() {
                if !(0.0..=1.0).contains(&strength) {
                    return Err(PairStrengthError::OutOfRange {
                        first: values[i],
                        second: values[j],
                        strength,
                    });
                }
                if strength != strengths[j][i] {
                    return Err(PairStrengthError::NotSymmetric {
                        first: values[i],
                        second: values[j],
                    });
                }
            }
        }
        Ok(Self { strengths })
    }

    /// The table compiled into the crate.
    pub fn builtin() -> &'static PairStrengthTable {
        &BUILTIN
    }

    pub fn strength(&self, first: Value, second: Value) -> f32 {
        self.strengths[first as usize][second as usize]
    }

    pub fn card_strength(&self, first: Card, second: Card) -> f32 {
        self.strength(first.value, second.value)
    }
}

impl Default for PairStrengthTable {
    fn default() -> Self {
        BUILTIN.clone()
    }
}

impl TryFrom<[[f32; 13]; 13]> for PairStrengthTable {
    type Error = PairStrengthError;

    fn try_from(strengths: [[f32; 13]; 13]) -> Result<Self, Self::Error> {
        Self::new(strengths)
    }
}

impl From<PairStrengthTable> for [[f32; 13]; 13] {
    fn from(table: PairStrengthTable) -> Self {
        table.strengths
    }
}
