//! Per-board betting decisions.
//!
//! The policy looks at one board at a time. It sizes a raise from the pot,
//! compares equity against pot odds, and mixes in randomness so the same
//! spot does not always produce the same action. Chips come out of a
//! [`SpendBudget`] shared by all three boards.

use rand::Rng;
use tracing::{instrument, trace};

use crate::core::Hand;

use super::action::{Action, ActionKind};
use super::board::BoardContext;
use super::budget::SpendBudget;
use super::errors::BotConfigError;

/// Tunable constants of the betting policy.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PolicyConfig {
    /// Share of the pot added to a raise before the flop.
    #[serde(default = "default_preflop_raise_fraction")]
    pub preflop_raise_fraction: f32,
    /// Share of the pot added to a raise from the flop on.
    #[serde(default = "default_postflop_raise_fraction")]
    pub postflop_raise_fraction: f32,
    /// Continuation cost above which the opponent's bet counts as a big one.
    #[serde(default = "default_intimidation_threshold")]
    pub intimidation_threshold: u32,
    /// Equity knocked off when facing a big bet.
    #[serde(default = "default_intimidation_penalty")]
    pub intimidation_penalty: f32,
    /// Equity a hand needs before it may re-raise a bet.
    #[serde(default = "default_raise_floor")]
    pub raise_floor: f32,
}

fn default_preflop_raise_fraction() -> f32 {
    0.4
}

fn default_postflop_raise_fraction() -> f32 {
    0.75
}

fn default_intimidation_threshold() -> u32 {
    5
}

fn default_intimidation_penalty() -> f32 {
    0.15
}

fn default_raise_floor() -> f32 {
    0.5
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            preflop_raise_fraction: default_preflop_raise_fraction(),
            postflop_raise_fraction: default_postflop_raise_fraction(),
            intimidation_threshold: default_intimidation_threshold(),
            intimidation_penalty: default_intimidation_penalty(),
            raise_floor: default_raise_floor(),
        }
    }
}

impl PolicyConfig {
    pub fn validate(&self) -> Result<(), BotConfigError> {
        for (name, fraction) in [
            ("preflop_raise_fraction", self.preflop_raise_fraction),
            ("postflop_raise_fraction", self.postflop_raise_fraction),
        ] {
            if !fraction.is_finite() || fraction < 0.0 {
                return Err(BotConfigError::ValidationError(format!(
                    "{name} must be a non-negative number, got {fraction}"
                )));
            }
        }
        validate_probability("intimidation_penalty", self.intimidation_penalty)?;
        validate_probability("raise_floor", self.raise_floor)?;
        Ok(())
    }
}

fn validate_probability(name: &'static str, value: f32) -> Result<(), BotConfigError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(BotConfigError::InvalidProbability { name, value });
    }
    Ok(())
}

/// Pot-odds betting policy with randomized aggression.
#[derive(Debug, Clone, Default)]
pub struct BettingPolicy {
    config: PolicyConfig,
}

impl BettingPolicy {
    pub fn new(config: PolicyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    /// Choose the action for one board and charge its cost to `budget`.
    ///
    /// `hand` is assigned when the board still needs cards. The result is
    /// always in the board's legal set, except that `Fold` is the answer of
    /// last resort and terminal boards get `Check`.
    #[instrument(
        level = "trace",
        skip(self, ctx, hand, budget, rng),
        fields(street = %ctx.street, remaining = budget.remaining())
    )]
    pub fn decide<R: Rng>(
        &self,
        ctx: &BoardContext,
        hand: Option<Hand>,
        equity: f32,
        budget: &mut SpendBudget,
        rng: &mut R,
    ) -> Action {
        if let Some(hand) = hand
            && ctx.is_legal(ActionKind::Assign)
        {
            return Action::Assign(hand);
        }
        if ctx.terminal {
            return Action::Check;
        }

        let cost = ctx.continuation_cost();
        let pot_total = ctx.pot_total();
        let fraction = if ctx.street.is_preflop() {
            self.config.preflop_raise_fraction
        } else {
            self.config.postflop_raise_fraction
        };

        // The float to int cast truncates toward zero and saturates.
        let raw_target = f64::from(ctx.own_pip)
            + f64::from(cost)
            + f64::from(fraction) * (f64::from(pot_total) + f64::from(cost));
        let target = (raw_target as u32).max(ctx.min_raise).min(ctx.max_raise);
        let raise_cost = target.saturating_sub(ctx.own_pip);

        let (commit, commit_cost) = if ctx.is_legal(ActionKind::Raise) && budget.can_afford(raise_cost)
        {
            (Action::Raise(target), raise_cost)
        } else if ctx.is_legal(ActionKind::Call) && budget.can_afford(cost) {
            (Action::Call, cost)
        } else if ctx.is_legal(ActionKind::Check) {
            (Action::Check, 0)
        } else {
            (Action::Fold, 0)
        };

        let action = if cost > 0 {
            let mut equity = equity;
            if cost > self.config.intimidation_threshold {
                equity = (equity - self.config.intimidation_penalty).max(0.0);
            }
            let pot_odds = cost as f32 / pot_total.saturating_add(cost) as f32;

            if equity >= pot_odds {
                if equity > self.config.raise_floor && rng.random::<f32>() < equity {
                    budget.spend(commit_cost);
                    commit
                } else if ctx.is_legal(ActionKind::Call) && budget.can_afford(cost) {
                    budget.spend(cost);
                    Action::Call
                } else {
                    Action::Fold
                }
            } else {
                Action::Fold
            }
        } else if rng.random::<f32>() < equity {
            budget.spend(commit_cost);
            commit
        } else if ctx.is_legal(ActionKind::Check) {
            Action::Check
        } else {
            Action::Fold
        };

        trace!(%action, cost, pot_total, target, equity, "board decision");
        action
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::arena::action::LegalActions;
    use crate::arena::board::{BoardContextBuilder, Street};
    use crate::core::Card;

    const FACING_BET: [ActionKind; 3] = [ActionKind::Fold, ActionKind::Call, ActionKind::Raise];
    const FIRST_TO_ACT: [ActionKind; 2] = [ActionKind::Check, ActionKind::Raise];

    fn flop() -> Vec<Card> {
        Card::parse_many("Ks9h4d").unwrap()
    }

    #[test]
    fn test_assign_comes_first() {
        let hand = Hand::new_from_str("AsAh").unwrap();
        let ctx = BoardContextBuilder::new()
            .legal([ActionKind::Assign])
            .build()
            .unwrap();
        let mut budget = SpendBudget::new(100);
        let mut rng = StdRng::seed_from_u64(0);

        let action = BettingPolicy::default().decide(&ctx, Some(hand), 0.9, &mut budget, &mut rng);
        assert_eq!(Action::Assign(hand), action);
        assert_eq!(100, budget.remaining());
    }

    #[test]
    fn test_terminal_board_checks() {
        let ctx = BoardContextBuilder::new()
            .pips(0, 40)
            .terminal(true)
            .build()
            .unwrap();
        let mut budget = SpendBudget::new(100);
        let mut rng = StdRng::seed_from_u64(0);

        let action = BettingPolicy::default().decide(&ctx, None, 1.0, &mut budget, &mut rng);
        assert_eq!(Action::Check, action);
        assert_eq!(0, budget.spent());
    }

    #[test_log::test]
    fn test_free_check_with_no_equity() {
        let ctx = BoardContextBuilder::new()
            .cards(flop())
            .pips(0, 0)
            .pot(20)
            .stack(100)
            .raise_bounds(2, 100)
            .legal(FIRST_TO_ACT)
            .build()
            .unwrap();
        let policy = BettingPolicy::default();

        for seed in 0..50 {
            let mut budget = SpendBudget::new(100);
            let mut rng = StdRng::seed_from_u64(seed);
            assert_eq!(
                Action::Check,
                policy.decide(&ctx, None, 0.0, &mut budget, &mut rng)
            );
            assert_eq!(0, budget.spent());
        }
    }

    #[test]
    fn test_strong_hand_never_folds_to_pot_bet() {
        // cost 10 into a pot of 10.
        let ctx = BoardContextBuilder::new()
            .cards(flop())
            .pips(0, 10)
            .pot(0)
            .stack(200)
            .raise_bounds(20, 200)
            .legal(FACING_BET)
            .build()
            .unwrap();
        let policy = BettingPolicy::default();

        for seed in 0..200 {
            let mut budget = SpendBudget::new(200);
            let mut rng = StdRng::seed_from_u64(seed);
            let action = policy.decide(&ctx, None, 1.0, &mut budget, &mut rng);
            assert_ne!(Action::Fold, action);
        }
    }

    #[test]
    fn test_negative_ev_folds() {
        // Pot odds are 0.5 and the big bet knocks equity down to 0.25.
        let ctx = BoardContextBuilder::new()
            .cards(flop())
            .pips(0, 10)
            .stack(200)
            .raise_bounds(20, 200)
            .legal(FACING_BET)
            .build()
            .unwrap();
        let policy = BettingPolicy::default();

        for seed in 0..50 {
            let mut budget = SpendBudget::new(200);
            let mut rng = StdRng::seed_from_u64(seed);
            assert_eq!(
                Action::Fold,
                policy.decide(&ctx, None, 0.4, &mut budget, &mut rng)
            );
            assert_eq!(0, budget.spent());
        }
    }

    #[test]
    fn test_raise_target_is_truncated() {
        // 3 + 5 + 0.4 * (17 + 5) = 16.8
        let ctx = BoardContextBuilder::new()
            .pips(3, 8)
            .pot(6)
            .stack(200)
            .raise_bounds(13, 200)
            .legal(FACING_BET)
            .build()
            .unwrap();
        let mut budget = SpendBudget::new(200);
        let mut rng = StdRng::seed_from_u64(9);

        let action = BettingPolicy::default().decide(&ctx, None, 1.0, &mut budget, &mut rng);
        assert_eq!(Action::Raise(16), action);
        assert_eq!(13, budget.spent());
    }

    #[test]
    fn test_raise_target_is_clipped() {
        let policy = BettingPolicy::default();
        let mut rng = StdRng::seed_from_u64(1);

        // 0.75 * 100 is above the maximum.
        let high = BoardContextBuilder::new()
            .cards(flop())
            .pot(100)
            .stack(200)
            .raise_bounds(10, 50)
            .legal(FIRST_TO_ACT)
            .build()
            .unwrap();
        let mut budget = SpendBudget::new(200);
        assert_eq!(
            Action::Raise(50),
            policy.decide(&high, None, 1.0, &mut budget, &mut rng)
        );
        assert_eq!(50, budget.spent());

        // 0.4 * 4 is below the minimum.
        let low = BoardContextBuilder::new()
            .street(Street::Preflop)
            .pot(4)
            .stack(200)
            .raise_bounds(20, 200)
            .legal(FIRST_TO_ACT)
            .build()
            .unwrap();
        let mut budget = SpendBudget::new(200);
        assert_eq!(
            Action::Raise(20),
            policy.decide(&low, None, 1.0, &mut budget, &mut rng)
        );
    }

    #[test]
    fn test_unaffordable_raise_falls_back_to_call() {
        let ctx = BoardContextBuilder::new()
            .pips(0, 4)
            .pot(4)
            .stack(200)
            .raise_bounds(8, 200)
            .legal(FACING_BET)
            .build()
            .unwrap();
        let mut budget = SpendBudget::new(5);
        let mut rng = StdRng::seed_from_u64(2);

        let action = BettingPolicy::default().decide(&ctx, None, 1.0, &mut budget, &mut rng);
        assert_eq!(Action::Call, action);
        assert_eq!(1, budget.remaining());
    }

    #[test]
    fn test_budget_is_never_overdrawn() {
        let mut rng = StdRng::seed_from_u64(1234);
        let policy = BettingPolicy::default();
        let kinds = [
            ActionKind::Fold,
            ActionKind::Check,
            ActionKind::Call,
            ActionKind::Raise,
        ];
        let streets = [Street::Preflop, Street::Flop, Street::Turn, Street::River];
        let boards = [
            vec![],
            flop(),
            Card::parse_many("Ks9h4d2c").unwrap(),
            Card::parse_many("Ks9h4d2cAh").unwrap(),
        ];

        for _ in 0..2_000 {
            let stack = rng.random_range(0..300);
            let mut budget = SpendBudget::new(stack);
            let mut charged = 0;

            for _ in 0..3 {
                let street_idx = rng.random_range(0..streets.len());
                let own_pip = rng.random_range(0..50);
                let opp_pip = rng.random_range(0..50);
                let min_raise = rng.random_range(0..100);
                let max_raise = rng.random_range(min_raise..min_raise + 200);
                let legal: LegalActions = kinds
                    .iter()
                    .copied()
                    .filter(|_| rng.random_bool(0.6))
                    .collect();
                let ctx = BoardContextBuilder::new()
                    .street(streets[street_idx])
                    .cards(boards[street_idx].clone())
                    .pips(own_pip, opp_pip)
                    .pot(rng.random_range(0..100))
                    .stack(stack)
                    .raise_bounds(min_raise, max_raise)
                    .legal(legal)
                    .build()
                    .unwrap();
                let equity = rng.random::<f32>();

                let before = budget.remaining();
                let action = policy.decide(&ctx, None, equity, &mut budget, &mut rng);
                let cost = match action {
                    Action::Raise(target) => target.saturating_sub(own_pip),
                    Action::Call => ctx.continuation_cost(),
                    _ => 0,
                };
                assert!(cost <= before, "{action} costs {cost} with {before} left");
                assert!(action == Action::Fold || legal.contains(action.kind()));
                charged += cost;
            }
            assert_eq!(charged, budget.spent());
            assert!(budget.spent() <= stack);
        }
    }

    #[test]
    fn test_config_defaults_from_empty_json() {
        let config: PolicyConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(PolicyConfig::default(), config);
        assert_eq!(0.4, config.preflop_raise_fraction);
        assert_eq!(5, config.intimidation_threshold);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let config = PolicyConfig {
            intimidation_penalty: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(BotConfigError::InvalidProbability {
                name: "intimidation_penalty",
                ..
            })
        ));

        let config = PolicyConfig {
            postflop_raise_fraction: -0.1,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(BotConfigError::ValidationError(_))
        ));
    }
}
