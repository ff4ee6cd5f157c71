//! The bot side of a three-board match.
//!
//! The match engine owns the rules. It hands the bot a [`GameState`] and a
//! [`RoundState`] and expects one [`Action`] per board back. Everything in
//! here turns those snapshots into decisions:
//!
//! - [`board`] builds the per-board view the policy reads.
//! - [`policy`] decides a single board against a shared [`SpendBudget`].
//! - [`agent`] holds the [`agent::Bot`] trait and the bots themselves.
pub mod action;
pub mod agent;
pub mod board;
pub mod budget;
pub mod errors;
pub mod game_state;
pub mod policy;

pub use action::{Action, ActionKind, LegalActions};
pub use agent::{Bot, BotConfig, EquityMode, PassiveBot, RoundOrchestrator};
pub use board::{BoardContext, BoardContextBuilder, Street};
pub use budget::SpendBudget;
pub use errors::{BoardContextError, BotConfigError, BotError};
pub use game_state::{BoardState, GameState, RoundState, TerminalState};
pub use policy::{BettingPolicy, PolicyConfig};
