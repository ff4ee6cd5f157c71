//! Decision core for a three-board hold'em pokerbot.
//!
//! Every round the bot is dealt six cards. It splits them into three hands,
//! one per board, then plays the boards at once out of a single stack.
//!
//! - [`core`] has cards, hands, decks and a showdown ranker.
//! - [`holdem`] turns cards into numbers: pair strengths, the allocation of
//!   six cards to three boards, and Monte Carlo equity.
//! - [`arena`] turns numbers into actions: the betting policy and the bots
//!   the match engine calls back into.
//!
//! ```
//! use triboard::arena::{ActionKind, Bot, BoardState, GameState, RoundState, RoundOrchestrator};
//! use triboard::arena::{Action, BotConfig, LegalActions};
//! use triboard::core::Card;
//!
//! let mut bot = RoundOrchestrator::from_config(BotConfig::default()).unwrap();
//! let board = BoardState {
//!     legal_actions: LegalActions::from([ActionKind::Assign]),
//!     ..Default::default()
//! };
//! let round = RoundState {
//!     hands: [Card::parse_many("AsAh2d2c7h7s").unwrap(), vec![]],
//!     stacks: [400, 400],
//!     boards: [board.clone(), board.clone(), board],
//!     ..Default::default()
//! };
//!
//! bot.handle_new_round(&GameState::default(), &round, 0).unwrap();
//! let actions = bot.get_actions(&GameState::default(), &round, 0);
//! assert!(actions.iter().all(|a| matches!(a, Action::Assign(_))));
//! ```

/// Allow all the core poker functionality to be used
/// externally. Everything in core should be agnostic
/// to poker style.
pub mod core;

/// Card allocation and equity for the three-board game.
pub mod holdem;

/// Bots, betting policy and the state they read.
pub mod arena;
