use std::cmp::Ordering;

use rand::Rng;
use tracing::{instrument, trace};

use crate::core::{Card, CardBitSet, FlatDeck, Hand, RankOracle, ShowdownOracle};

use super::EquityError;

/// Cards on a complete board.
pub const FULL_BOARD: usize = 5;

/// Monte Carlo estimate of how often a hand wins at showdown against one
/// random opponent hand.
///
/// Each trial deals the opponent two cards and completes the board from the
/// unknown cards, then asks the [`ShowdownOracle`] who won. Wins score two,
/// ties one, so the result is the share of the pot won on average.
#[derive(Debug, Clone, Copy, Default)]
pub struct EquityEstimator<O = RankOracle> {
    oracle: O,
}

impl EquityEstimator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<O: ShowdownOracle> EquityEstimator<O> {
    pub fn with_oracle(oracle: O) -> Self {
        Self { oracle }
    }

    /// Estimate equity of `hole` given the revealed `board`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rand::{SeedableRng, rngs::StdRng};
    /// use triboard::core::Hand;
    /// use triboard::holdem::EquityEstimator;
    ///
    /// let mut rng = StdRng::seed_from_u64(1);
    /// let hole = Hand::new_from_str("AsAh").unwrap();
    /// let equity = EquityEstimator::new()
    ///     .estimate(&hole, &[], 1_000, &mut rng)
    ///     .unwrap();
    /// assert!(equity > 0.5);
    /// ```
    pub fn estimate<R: Rng + ?Sized>(
        &self,
        hole: &Hand,
        board: &[Card],
        trials: usize,
        rng: &mut R,
    ) -> Result<f32, EquityError> {
        self.estimate_with_dead(hole, board, &[], trials, rng)
    }

    /// Like [`EquityEstimator::estimate`] but `dead` cards are never dealt.
    #[instrument(level = "trace", skip(self, hole, rng), fields(hole = %hole))]
    pub fn estimate_with_dead<R: Rng + ?Sized>(
        &self,
        hole: &Hand,
        board: &[Card],
        dead: &[Card],
        trials: usize,
        rng: &mut R,
    ) -> Result<f32, EquityError> {
        if board.len() > FULL_BOARD {
            return Err(EquityError::TooManyBoardCards(board.len()));
        }

        let mut known = CardBitSet::new();
        for card in hole.iter().chain(board.iter().copied()).chain(dead.iter().copied()) {
            if !known.insert(card) {
                return Err(EquityError::DuplicateCard(card));
            }
        }

        let mut deck = FlatDeck::without(known);
        let needed = (FULL_BOARD - board.len()) + 2;
        if deck.len() < needed {
            return Err(EquityError::DeckUnderflow {
                needed,
                available: deck.len(),
            });
        }
        if trials == 0 {
            return Err(EquityError::NoTrials);
        }

        let mut ours = Vec::with_capacity(FULL_BOARD + 2);
        let mut theirs = Vec::with_capacity(FULL_BOARD + 2);
        let mut score: u64 = 0;

        for _ in 0..trials {
            let drawn = deck.sample(rng, needed).ok_or(EquityError::DeckUnderflow {
                needed,
                available: 0,
            })?;
            let (opponent, community) = drawn.split_at(2);

            ours.clear();
            ours.extend(hole.iter());
            ours.extend_from_slice(board);
            ours.extend_from_slice(community);

            theirs.clear();
            theirs.extend_from_slice(opponent);
            theirs.extend_from_slice(board);
            theirs.extend_from_slice(community);

            score += match self.oracle.compare(&ours, &theirs) {
                Ordering::Greater => 2,
                Ordering::Equal => 1,
                Ordering::Less => 0,
            };
        }

        let equity = score as f64 / (2.0 * trials as f64);
        trace!(trials, equity, "equity estimated");
        Ok(equity as f32)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn cards(s: &str) -> Vec<Card> {
        Card::parse_many(s).unwrap()
    }

    fn hand(s: &str) -> Hand {
        Hand::new_from_str(s).unwrap()
    }

    #[test_log::test]
    fn test_aces_preflop() {
        let mut rng = StdRng::seed_from_u64(420);
        let equity = EquityEstimator::new()
            .estimate(&hand("AsAh"), &[], 10_000, &mut rng)
            .unwrap();
        assert!(equity > 0.5);
        assert_abs_diff_eq!(0.85, equity, epsilon = 0.03);
    }

    #[test]
    fn test_royal_flush_on_river_always_wins() {
        let mut rng = StdRng::seed_from_u64(3);
        let equity = EquityEstimator::new()
            .estimate(&hand("AsKs"), &cards("QsJsTs2d3c"), 500, &mut rng)
            .unwrap();
        assert_eq!(1.0, equity);
    }

    #[test]
    fn test_dead_cards_are_never_dealt() {
        // Only KsKh are left for the opponent, and quad aces beat them.
        let board = cards("AdAc2s3h9d");
        let mut live: CardBitSet = cards("AsAhKsKh").into_iter().collect();
        for card in &board {
            live.insert(*card);
        }
        let dead: Vec<Card> = (!live).into_iter().collect();

        let mut rng = StdRng::seed_from_u64(11);
        let equity = EquityEstimator::new()
            .estimate_with_dead(&hand("AsAh"), &board, &dead, 50, &mut rng)
            .unwrap();
        assert_eq!(1.0, equity);
    }

    #[test]
    fn test_variance_shrinks_with_trials() {
        let estimator = EquityEstimator::new();
        let hole = hand("KdQh");

        let variance = |trials: usize| {
            let samples: Vec<f64> = (0..16)
                .map(|seed| {
                    let mut rng = StdRng::seed_from_u64(seed);
                    f64::from(estimator.estimate(&hole, &[], trials, &mut rng).unwrap())
                })
                .collect();
            let mean = samples.iter().sum::<f64>() / samples.len() as f64;
            samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / (samples.len() - 1) as f64
        };

        let small = variance(100);
        let medium = variance(1_000);
        let large = variance(10_000);
        assert!(small > medium, "{small} <= {medium}");
        assert!(medium > large, "{medium} <= {large}");
    }

    #[test]
    fn test_deck_underflow() {
        let hole = hand("AsAh");
        let board = cards("2c3c4c5c6c");
        let mut known: CardBitSet = board.iter().copied().collect();
        known.insert(Card::parse_many("As").unwrap()[0]);
        known.insert(Card::parse_many("Ah").unwrap()[0]);
        // Leave a single unknown card behind.
        let dead: Vec<Card> = (!known).into_iter().skip(1).collect();

        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            Err(EquityError::DeckUnderflow {
                needed: 2,
                available: 1
            }),
            EquityEstimator::new().estimate_with_dead(&hole, &board, &dead, 10, &mut rng)
        );
    }

    #[test]
    fn test_input_errors() {
        let estimator = EquityEstimator::new();
        let mut rng = StdRng::seed_from_u64(0);
        let hole = hand("AsAh");

        assert_eq!(
            Err(EquityError::NoTrials),
            estimator.estimate(&hole, &[], 0, &mut rng)
        );
        assert_eq!(
            Err(EquityError::TooManyBoardCards(6)),
            estimator.estimate(&hole, &cards("2c3c4c5c6c7c"), 10, &mut rng)
        );
        assert_eq!(
            Err(EquityError::DuplicateCard(cards("As")[0])),
            estimator.estimate(&hole, &cards("2c3cAs"), 10, &mut rng)
        );
    }

    #[derive(Debug, Clone, Copy)]
    struct AlwaysTie;

    impl ShowdownOracle for AlwaysTie {
        fn compare(&self, _ours: &[Card], _theirs: &[Card]) -> Ordering {
            Ordering::Equal
        }
    }

    #[test]
    fn test_custom_oracle() {
        let mut rng = StdRng::seed_from_u64(5);
        let equity = EquityEstimator::with_oracle(AlwaysTie)
            .estimate(&hand("2c7d"), &cards("Ks9h4d"), 200, &mut rng)
            .unwrap();
        assert_eq!(0.5, equity);
    }
}
