use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{debug, instrument, trace, warn};

use crate::arena::action::Action;
use crate::arena::board::{BoardContext, Street};
use crate::arena::budget::SpendBudget;
use crate::arena::errors::{BotConfigError, BotError};
use crate::arena::game_state::{GameState, RoundState, TerminalState, opponent_of};
use crate::arena::policy::BettingPolicy;
use crate::core::{Card, Hand};
use crate::holdem::{AllocationEngine, EquityEstimator, NUM_BOARDS};

use super::{Bot, BotConfig, EquityMode};

/// Equity used when nothing better is known.
pub const NEUTRAL_EQUITY: f32 = 0.5;

/// What the bot remembers between callbacks of a single round.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundContext {
    hands: [Hand; NUM_BOARDS],
    equities: [f32; NUM_BOARDS],
    estimated_on: [Option<Street>; NUM_BOARDS],
}

impl RoundContext {
    /// Hands in board order.
    pub fn hands(&self) -> &[Hand; NUM_BOARDS] {
        &self.hands
    }

    /// Current equity per board.
    pub fn equities(&self) -> &[f32; NUM_BOARDS] {
        &self.equities
    }

    /// Street of the last simulation run for each board, if any.
    pub fn estimated_on(&self) -> &[Option<Street>; NUM_BOARDS] {
        &self.estimated_on
    }

    /// Cards held on every board except `board`.
    fn dead_for(&self, board: usize) -> Vec<Card> {
        self.hands
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != board)
            .flat_map(|(_, hand)| hand.iter())
            .collect()
    }
}

/// Bot that splits its cards with an [`AllocationEngine`] and bets each
/// board with a [`BettingPolicy`].
#[derive(Debug, Clone)]
pub struct RoundOrchestrator<R = StdRng> {
    name: String,
    engine: AllocationEngine,
    estimator: EquityEstimator,
    policy: BettingPolicy,
    equity_mode: EquityMode,
    rng: R,
    round: Option<RoundContext>,
}

impl RoundOrchestrator<StdRng> {
    /// Build a bot from configuration. A configured seed makes the bot
    /// repeatable; otherwise it is seeded from the thread rng.
    pub fn from_config(config: BotConfig) -> Result<Self, BotConfigError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        Self::new(config, rng)
    }
}

impl<R: Rng> RoundOrchestrator<R> {
    pub fn new(config: BotConfig, rng: R) -> Result<Self, BotConfigError> {
        config.validate()?;
        let table = config.pair_strengths.unwrap_or_default();
        Ok(Self {
            name: config.name,
            engine: AllocationEngine::new(table, config.allocation),
            estimator: EquityEstimator::new(),
            policy: BettingPolicy::new(config.policy),
            equity_mode: config.equity,
            rng,
            round: None,
        })
    }

    /// State of the round in progress, if any.
    pub fn round_context(&self) -> Option<&RoundContext> {
        self.round.as_ref()
    }

    fn board_equity(&mut self, board: usize, ctx: &BoardContext, game: &GameState) -> f32 {
        let Some(round) = self.round.as_mut() else {
            return NEUTRAL_EQUITY;
        };
        let EquityMode::MonteCarlo {
            trials,
            clock_floor_secs,
        } = self.equity_mode
        else {
            return round.equities[board];
        };

        if ctx.terminal || round.estimated_on[board] == Some(ctx.street) {
            return round.equities[board];
        }
        if game.game_clock < clock_floor_secs {
            trace!(board, game_clock = game.game_clock, "clock low, keeping cached equity");
            return round.equities[board];
        }

        let dead = round.dead_for(board);
        let equity = match self.estimator.estimate_with_dead(
            &round.hands[board],
            &ctx.cards,
            &dead,
            trials,
            &mut self.rng,
        ) {
            Ok(equity) => equity,
            Err(error) => {
                warn!(board, %error, "equity estimate failed, using neutral equity");
                NEUTRAL_EQUITY
            }
        };
        round.equities[board] = equity;
        round.estimated_on[board] = Some(ctx.street);
        equity
    }
}

impl<R: Rng> Bot for RoundOrchestrator<R> {
    #[instrument(level = "trace", skip(self, game, round), fields(bot = %self.name, round_num = game.round_num))]
    fn handle_new_round(
        &mut self,
        game: &GameState,
        round: &RoundState,
        active: usize,
    ) -> Result<(), BotError> {
        opponent_of(active).ok_or(BotError::InvalidPlayer(active))?;
        let allocation = self.engine.allocate(&round.hands[active])?;
        let (hands, strengths) = allocation.board_order();

        debug!(
            hands = ?hands.map(|h| h.to_string()),
            ?strengths,
            "new round"
        );
        self.round = Some(RoundContext {
            hands,
            equities: strengths,
            estimated_on: [None; NUM_BOARDS],
        });
        Ok(())
    }

    #[instrument(level = "trace", skip(self, game, round), fields(bot = %self.name, street = %round.street))]
    fn get_actions(
        &mut self,
        game: &GameState,
        round: &RoundState,
        active: usize,
    ) -> [Action; NUM_BOARDS] {
        if self.round.is_none() {
            warn!("actions requested without a round in progress");
        }

        let stack = round.stacks.get(active).copied().unwrap_or(0);
        let mut budget = SpendBudget::new(stack);
        let mut actions = [Action::Fold; NUM_BOARDS];

        for (board, action) in actions.iter_mut().enumerate() {
            let Some(ctx) = round.board_context(board, active) else {
                warn!(board, active, "no board view for player, folding");
                continue;
            };
            let hand = self.round.as_ref().map(|r| r.hands[board]);
            let equity = self.board_equity(board, &ctx, game);
            *action = self
                .policy
                .decide(&ctx, hand, equity, &mut budget, &mut self.rng);
        }

        debug!(
            actions = ?actions.map(|a| a.to_string()),
            spent = budget.spent(),
            "actions chosen"
        );
        actions
    }

    fn handle_round_over(&mut self, game: &GameState, terminal: &TerminalState, active: usize) {
        if let Some(opponent) = opponent_of(active) {
            let previous = &terminal.previous_state;
            for (board, state) in previous.boards.iter().enumerate() {
                if let Some(shown) = state.hands[opponent] {
                    trace!(board, %shown, "opponent showed");
                }
            }
            debug!(
                round_num = game.round_num,
                delta = terminal.deltas[active],
                opp_delta = terminal.deltas[opponent],
                street = %previous.street,
                "round over"
            );
        }
        self.round = None;
    }

    fn name(&self) -> &str {
        &self.name
    }
}
