use tracing::{instrument, trace};

use crate::arena::action::{Action, ActionKind};
use crate::arena::budget::SpendBudget;
use crate::arena::errors::BotError;
use crate::arena::game_state::{GameState, RoundState, TerminalState, opponent_of};
use crate::core::Hand;
use crate::holdem::{AllocationEngine, NUM_BOARDS};

use super::Bot;

/// A bot that never puts in more than it has to.
///
/// It splits its cards like the real bot, then checks whenever it can and
/// calls whatever it can afford. Handy as a baseline opponent.
#[derive(Debug, Clone)]
pub struct PassiveBot {
    name: String,
    engine: AllocationEngine,
    hands: Option<[Hand; NUM_BOARDS]>,
}

impl PassiveBot {
    pub fn new(name: impl Into<String>, engine: AllocationEngine) -> Self {
        Self {
            name: name.into(),
            engine,
            hands: None,
        }
    }
}

impl Default for PassiveBot {
    fn default() -> Self {
        PassiveBot::new("passive", AllocationEngine::default())
    }
}

impl Bot for PassiveBot {
    fn handle_new_round(
        &mut self,
        _game: &GameState,
        round: &RoundState,
        active: usize,
    ) -> Result<(), BotError> {
        opponent_of(active).ok_or(BotError::InvalidPlayer(active))?;
        let allocation = self.engine.allocate(&round.hands[active])?;
        self.hands = Some(allocation.board_order().0);
        Ok(())
    }

    #[instrument(level = "trace", skip(self, _game, round), fields(bot = %self.name))]
    fn get_actions(
        &mut self,
        _game: &GameState,
        round: &RoundState,
        active: usize,
    ) -> [Action; NUM_BOARDS] {
        let stack = round.stacks.get(active).copied().unwrap_or(0);
        let mut budget = SpendBudget::new(stack);
        let mut actions = [Action::Fold; NUM_BOARDS];

        for (board, action) in actions.iter_mut().enumerate() {
            let Some(ctx) = round.board_context(board, active) else {
                continue;
            };
            let cost = ctx.continuation_cost();
            *action = match self.hands {
                Some(hands) if ctx.is_legal(ActionKind::Assign) => Action::Assign(hands[board]),
                _ if ctx.terminal => Action::Check,
                _ if ctx.is_legal(ActionKind::Check) => Action::Check,
                _ if ctx.is_legal(ActionKind::Call) && budget.can_afford(cost) => {
                    budget.spend(cost);
                    Action::Call
                }
                _ => Action::Fold,
            };
        }

        trace!(actions = ?actions.map(|a| a.to_string()), "PassiveBot decision");
        actions
    }

    fn handle_round_over(&mut self, _game: &GameState, _terminal: &TerminalState, _active: usize) {
        self.hands = None;
    }

    fn name(&self) -> &str {
        &self.name
    }
}
