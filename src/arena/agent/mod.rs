//! Bots are the decision makers the match engine calls back into. The engine
//! deals, enforces the rules, and keeps score; a bot only answers three
//! callbacks per round.
//!
//! [`RoundOrchestrator`] is the real bot. [`PassiveBot`] is a baseline that
//! never bets.
mod config;
mod orchestrator;
mod passive;

use crate::arena::action::Action;
use crate::arena::errors::BotError;
use crate::arena::game_state::{GameState, RoundState, TerminalState};
use crate::holdem::NUM_BOARDS;

/// This is the trait that you need to implement in order to play a match.
///
/// `active` is the bot's seat, 0 or 1, and indexes the per-player arrays in
/// the round state.
pub trait Bot {
    /// Called once when a round starts, before any actions are requested.
    fn handle_new_round(
        &mut self,
        game: &GameState,
        round: &RoundState,
        active: usize,
    ) -> Result<(), BotError>;

    /// Called every time the engine needs one action per board.
    fn get_actions(
        &mut self,
        game: &GameState,
        round: &RoundState,
        active: usize,
    ) -> [Action; NUM_BOARDS];

    /// Called once when a round ends.
    fn handle_round_over(&mut self, game: &GameState, terminal: &TerminalState, active: usize);

    fn name(&self) -> &str;
}

pub use config::{BotConfig, EquityMode};
pub use orchestrator::{NEUTRAL_EQUITY, RoundContext, RoundOrchestrator};
pub use passive::PassiveBot;
