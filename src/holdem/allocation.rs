use tracing::{debug, instrument};

use crate::core::{Card, CardBitSet, Hand};

use super::{AllocationError, PairStrengthTable};

/// Number of boards, and so of hands, every round.
pub const NUM_BOARDS: usize = 3;

/// Number of private cards dealt each round.
pub const ROUND_CARDS: usize = 2 * NUM_BOARDS;

/// How candidate pairs are turned into three hands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationStrategy {
    /// Take the strongest pair still possible until three are chosen.
    #[default]
    Greedy,
    /// Try all 15 ways to split six cards and keep the strongest total.
    Exhaustive,
}

/// Three disjoint hands covering the six round cards.
///
/// Hands are kept strongest pair first, in the order they were chosen.
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    hands: [Hand; NUM_BOARDS],
    strengths: [f32; NUM_BOARDS],
}

impl Allocation {
    /// Hands in the order they were selected.
    pub fn hands(&self) -> &[Hand; NUM_BOARDS] {
        &self.hands
    }

    /// Pair strength of each hand, aligned with [`Allocation::hands`].
    pub fn strengths(&self) -> &[f32; NUM_BOARDS] {
        &self.strengths
    }

    pub fn total_strength(&self) -> f32 {
        self.strengths.iter().sum()
    }

    /// Hands and strengths in board order: the selection order reversed, so
    /// board 0 plays the last pair chosen.
    pub fn board_order(&self) -> ([Hand; NUM_BOARDS], [f32; NUM_BOARDS]) {
        let mut hands = self.hands;
        let mut strengths = self.strengths;
        hands.reverse();
        strengths.reverse();
        (hands, strengths)
    }
}

/// One candidate pair, by index into the round's cards.
#[derive(Debug, Clone, Copy)]
struct ScoredPair {
    first: usize,
    second: usize,
    strength: f32,
}

/// Splits the six round cards into three hands using a static pair strength
/// table.
#[derive(Debug, Clone, Default)]
pub struct AllocationEngine {
    table: PairStrengthTable,
    strategy: AllocationStrategy,
}

impl AllocationEngine {
    pub fn new(table: PairStrengthTable, strategy: AllocationStrategy) -> Self {
        Self { table, strategy }
    }

    pub fn table(&self) -> &PairStrengthTable {
        &self.table
    }

    pub fn strategy(&self) -> AllocationStrategy {
        self.strategy
    }

    /// Partition `cards` into three hands. Deterministic for a given table.
    ///
    /// # Examples
    ///
    /// ```
    /// use triboard::core::{Card, Hand};
    /// use triboard::holdem::AllocationEngine;
    ///
    /// let cards = Card::parse_many("AsAh2d2c7h7s").unwrap();
    /// let allocation = AllocationEngine::default().allocate(&cards).unwrap();
    /// assert_eq!(Hand::new_from_str("AsAh").unwrap(), allocation.hands()[0]);
    /// ```
    #[instrument(level = "trace", skip(self))]
    pub fn allocate(&self, cards: &[Card]) -> Result<Allocation, AllocationError> {
        let distinct = cards.iter().copied().collect::<CardBitSet>().count();
        if cards.len() != ROUND_CARDS || distinct != ROUND_CARDS {
            return Err(AllocationError::InvalidInput {
                count: cards.len(),
                distinct,
            });
        }

        let pairs = self.scored_pairs(cards);
        let chosen = match self.strategy {
            AllocationStrategy::Greedy => greedy(&pairs),
            AllocationStrategy::Exhaustive => exhaustive(&pairs),
        };

        let mut hands = Vec::with_capacity(NUM_BOARDS);
        for pair in &chosen {
            let hand = Hand::new(cards[pair.first], cards[pair.second]).map_err(|_| {
                AllocationError::InvalidInput {
                    count: cards.len(),
                    distinct,
                }
            })?;
            hands.push(hand);
        }
        let allocation = Allocation {
            hands: [hands[0], hands[1], hands[2]],
            strengths: [chosen[0].strength, chosen[1].strength, chosen[2].strength],
        };

        debug!(
            strategy = ?self.strategy,
            hands = ?allocation.hands.map(|h| h.to_string()),
            strengths = ?allocation.strengths,
            "allocated round cards"
        );
        Ok(allocation)
    }

    /// All 15 index pairs in lexicographic order.
    fn scored_pairs(&self, cards: &[Card]) -> Vec<ScoredPair> {
        let mut pairs = Vec::with_capacity(15);
        for first in 0..cards.len() - 1 {
            for second in first + 1..cards.len() {
                pairs.push(ScoredPair {
                    first,
                    second,
                    strength: self.table.card_strength(cards[first], cards[second]),
                });
            }
        }
        pairs
    }
}

fn greedy(pairs: &[ScoredPair]) -> [ScoredPair; NUM_BOARDS] {
    let mut ranked = pairs.to_vec();
    // sort_by is stable, so equal strengths keep generation order.
    ranked.sort_by(|a, b| b.strength.total_cmp(&a.strength));

    let mut used = [false; ROUND_CARDS];
    let mut chosen = Vec::with_capacity(NUM_BOARDS);
    for pair in ranked {
        if used[pair.first] || used[pair.second] {
            continue;
        }
        used[pair.first] = true;
        used[pair.second] = true;
        chosen.push(pair);
        if chosen.len() == NUM_BOARDS {
            break;
        }
    }
    // Any two leftover cards always form a candidate, so three are found.
    [chosen[0], chosen[1], chosen[2]]
}

fn exhaustive(pairs: &[ScoredPair]) -> [ScoredPair; NUM_BOARDS] {
    let lookup = |a: usize, b: usize| {
        pairs
            .iter()
            .copied()
            .find(|p| p.first == a.min(b) && p.second == a.max(b))
    };

    let mut best: Option<([ScoredPair; NUM_BOARDS], f32)> = None;
    // Card 0 pairs with one of five partners; the lowest remaining card then
    // pairs with one of three; the last two are forced.
    for partner in 1..ROUND_CARDS {
        let rest: Vec<usize> = (1..ROUND_CARDS).filter(|&i| i != partner).collect();
        for k in 1..rest.len() {
            let tail: Vec<usize> = rest[1..].iter().copied().filter(|&i| i != rest[k]).collect();
            let (Some(a), Some(b), Some(c)) = (
                lookup(0, partner),
                lookup(rest[0], rest[k]),
                lookup(tail[0], tail[1]),
            ) else {
                continue;
            };
            let total = a.strength + b.strength + c.strength;
            if best.as_ref().is_none_or(|(_, t)| total > *t) {
                best = Some(([a, b, c], total));
            }
        }
    }

    let mut chosen = best.map(|(chosen, _)| chosen).unwrap_or_else(|| greedy(pairs));
    chosen.sort_by(|a, b| b.strength.total_cmp(&a.strength));
    chosen
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

    use super::*;
    use crate::core::FlatDeck;

    fn cards(s: &str) -> Vec<Card> {
        Card::parse_many(s).unwrap()
    }

    fn assert_partition(input: &[Card], allocation: &Allocation) {
        let mut seen = CardBitSet::new();
        for hand in allocation.hands() {
            for card in hand.iter() {
                assert!(seen.insert(card), "{card} allocated twice");
            }
        }
        let expected: CardBitSet = input.iter().copied().collect();
        assert_eq!(expected, seen);
    }

    #[test]
    fn test_same_rank_cards_pair_up() {
        let input = cards("AsAh2d2c7h7s");
        let allocation = AllocationEngine::default().allocate(&input).unwrap();

        assert_eq!(
            [
                Hand::new_from_str("AsAh").unwrap(),
                Hand::new_from_str("7h7s").unwrap(),
                Hand::new_from_str("2d2c").unwrap(),
            ],
            *allocation.hands()
        );
        assert!(allocation.strengths()[0] >= allocation.strengths()[1]);
        assert!(allocation.strengths()[1] >= allocation.strengths()[2]);
    }

    #[test]
    fn test_board_order_is_reversed() {
        let input = cards("AsAh2d2c7h7s");
        let allocation = AllocationEngine::default().allocate(&input).unwrap();
        let (hands, strengths) = allocation.board_order();

        assert_eq!(Hand::new_from_str("2d2c").unwrap(), hands[0]);
        assert_eq!(Hand::new_from_str("AsAh").unwrap(), hands[2]);
        assert_eq!(allocation.strengths()[0], strengths[2]);
    }

    #[test]
    fn test_greedy_is_not_always_optimal() {
        // AK is the single best pair, but KQ A2 33 beats AK 33 Q2 in total.
        let input = cards("AsKd3c3hQs2d");
        let greedy = AllocationEngine::default().allocate(&input).unwrap();
        let exhaustive = AllocationEngine::new(
            PairStrengthTable::default(),
            AllocationStrategy::Exhaustive,
        )
        .allocate(&input)
        .unwrap();

        assert_partition(&input, &greedy);
        assert_partition(&input, &exhaustive);
        assert!(exhaustive.total_strength() > greedy.total_strength());
        assert!(greedy.hands().contains(&Hand::new_from_str("AsKd").unwrap()));
        assert!(exhaustive.hands().contains(&Hand::new_from_str("KdQs").unwrap()));
        assert!(exhaustive.hands().contains(&Hand::new_from_str("As2d").unwrap()));
        assert!(exhaustive.hands().contains(&Hand::new_from_str("3c3h").unwrap()));
    }

    #[test]
    fn test_ties_keep_input_order() {
        // Four suits of nine plus two tens: every nine pair ties, so the
        // first two nines in the input pair up first.
        let input = cards("9s9c9h9dTsTc");
        let allocation = AllocationEngine::default().allocate(&input).unwrap();
        assert_eq!(Hand::new_from_str("TsTc").unwrap(), allocation.hands()[0]);
        assert_eq!(Hand::new_from_str("9s9c").unwrap(), allocation.hands()[1]);
        assert_eq!(Hand::new_from_str("9h9d").unwrap(), allocation.hands()[2]);
    }

    #[test]
    fn test_invalid_input() {
        let engine = AllocationEngine::default();
        assert_eq!(
            Err(AllocationError::InvalidInput {
                count: 5,
                distinct: 5
            }),
            engine.allocate(&cards("AsAh2d2c7h"))
        );
        assert_eq!(
            Err(AllocationError::InvalidInput {
                count: 7,
                distinct: 7
            }),
            engine.allocate(&cards("AsAh2d2c7h7s8s"))
        );
        assert_eq!(
            Err(AllocationError::InvalidInput {
                count: 6,
                distinct: 5
            }),
            engine.allocate(&cards("AsAs2d2c7h7s"))
        );
    }

    #[test]
    fn test_random_draws_partition_and_repeat() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut deck = FlatDeck::default();
        let greedy = AllocationEngine::default();
        let exhaustive = AllocationEngine::new(
            PairStrengthTable::default(),
            AllocationStrategy::Exhaustive,
        );

        for _ in 0..500 {
            let mut input = deck.sample(&mut rng, ROUND_CARDS).unwrap().to_vec();
            input.shuffle(&mut rng);

            let first = greedy.allocate(&input).unwrap();
            assert_partition(&input, &first);
            assert_eq!(first, greedy.allocate(&input).unwrap());

            let best = exhaustive.allocate(&input).unwrap();
            assert_partition(&input, &best);
            assert!(best.total_strength() + 1e-6 >= first.total_strength());
        }
    }
}
