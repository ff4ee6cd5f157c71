//! Snapshots the match engine hands the bot at each callback.
//!
//! These are plain data. The engine owns the rules; nothing here checks
//! that a state could actually be reached.

use crate::core::{Card, Hand};
use crate::holdem::NUM_BOARDS;

use super::action::LegalActions;
use super::board::{BoardContext, Street};

/// Match-level bookkeeping, valid across rounds.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct GameState {
    /// Chips won or lost since the match started.
    pub bankroll: i64,
    pub opp_bankroll: i64,
    /// Seconds of thinking time left for the whole match.
    pub game_clock: f32,
    /// Starts at 1.
    pub round_num: u32,
}

/// State of one of the three boards.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct BoardState {
    /// Revealed community cards.
    pub cards: Vec<Card>,
    /// Chips each player has put in during the current betting round.
    pub pips: [u32; 2],
    /// Chips from finished betting rounds.
    pub pot: u32,
    /// Minimum and maximum raise-to amounts for the acting player.
    pub raise_bounds: (u32, u32),
    /// Actions the acting player may take here.
    pub legal_actions: LegalActions,
    pub terminal: bool,
    /// Hole cards on this board; the opponent's only once shown.
    pub hands: [Option<Hand>; 2],
}

#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct RoundState {
    /// The engine moves all three boards through the streets together, so
    /// this is the street of every board in the round.
    pub street: Street,
    /// Six private cards per player. The opponent's are usually empty.
    pub hands: [Vec<Card>; 2],
    pub stacks: [u32; 2],
    pub boards: [BoardState; NUM_BOARDS],
}

impl RoundState {
    /// Build the policy's view of `board` for player `active`.
    ///
    /// The context's street is the round's [`RoundState::street`]; only the
    /// cards, pips and pot come from the board itself.
    ///
    /// Returns `None` when either index is out of range.
    pub fn board_context(&self, board: usize, active: usize) -> Option<BoardContext> {
        let state = self.boards.get(board)?;
        let opponent = opponent_of(active)?;
        let (min_raise, max_raise) = state.raise_bounds;
        Some(BoardContext {
            street: self.street,
            cards: state.cards.clone(),
            own_pip: state.pips[active],
            opp_pip: state.pips[opponent],
            pot: state.pot,
            stack: self.stacks[active],
            min_raise,
            max_raise,
            legal: state.legal_actions,
            terminal: state.terminal,
        })
    }
}

/// Result of a finished round.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct TerminalState {
    /// Bankroll change per player.
    pub deltas: [i64; 2],
    /// The round as it stood before payouts.
    pub previous_state: RoundState,
}

/// Index of the other player in a heads-up match.
pub fn opponent_of(active: usize) -> Option<usize> {
    match active {
        0 => Some(1),
        1 => Some(0),
        _ => None,
    }
}
