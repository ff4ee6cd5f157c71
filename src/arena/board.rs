use std::fmt;

use crate::core::{Card, CardBitSet};

use super::action::{ActionKind, LegalActions};
use super::errors::BoardContextError;

/// Betting stage of a board, numbered by the community cards showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Street {
    #[default]
    Preflop = 0,
    Flop = 3,
    Turn = 4,
    River = 5,
}

impl Street {
    /// Street for a board showing `cards` community cards.
    pub fn from_cards(cards: usize) -> Option<Self> {
        match cards {
            0 => Some(Street::Preflop),
            3 => Some(Street::Flop),
            4 => Some(Street::Turn),
            5 => Some(Street::River),
            _ => None,
        }
    }

    pub fn cards(&self) -> usize {
        *self as usize
    }

    pub fn is_preflop(&self) -> bool {
        *self == Street::Preflop
    }
}

impl TryFrom<u8> for Street {
    type Error = BoardContextError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Street::from_cards(value as usize).ok_or(BoardContextError::InvalidBoardSize(value as usize))
    }
}

impl From<Street> for u8 {
    fn from(street: Street) -> Self {
        street as u8
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Street::Preflop => write!(f, "Preflop"),
            Street::Flop => write!(f, "Flop"),
            Street::Turn => write!(f, "Turn"),
            Street::River => write!(f, "River"),
        }
    }
}

/// Everything the betting policy may look at for one board, from the acting
/// player's side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardContext {
    pub street: Street,
    pub cards: Vec<Card>,
    pub own_pip: u32,
    pub opp_pip: u32,
    /// Chips from earlier betting rounds, not counting the pips.
    pub pot: u32,
    /// Acting player's stack across all boards.
    pub stack: u32,
    pub min_raise: u32,
    pub max_raise: u32,
    pub legal: LegalActions,
    pub terminal: bool,
}

impl BoardContext {
    /// Chips needed to match the opponent on this board.
    pub fn continuation_cost(&self) -> u32 {
        self.opp_pip.saturating_sub(self.own_pip)
    }

    /// Chips in the middle including both pips.
    pub fn pot_total(&self) -> u32 {
        self.own_pip
            .saturating_add(self.opp_pip)
            .saturating_add(self.pot)
    }

    pub fn is_legal(&self, kind: ActionKind) -> bool {
        self.legal.contains(kind)
    }
}

/// Builder for [`BoardContext`] with validation.
///
/// # Example
///
/// ```
/// use triboard::arena::{ActionKind, BoardContextBuilder, Street};
///
/// let ctx = BoardContextBuilder::new()
///     .pips(2, 10)
///     .pot(4)
///     .stack(200)
///     .raise_bounds(18, 200)
///     .legal([ActionKind::Fold, ActionKind::Call, ActionKind::Raise])
///     .build()
///     .unwrap();
///
/// assert_eq!(Street::Preflop, ctx.street);
/// assert_eq!(8, ctx.continuation_cost());
/// assert_eq!(16, ctx.pot_total());
/// ```
#[derive(Debug, Default, Clone)]
pub struct BoardContextBuilder {
    street: Option<Street>,     // Default: derived from the cards
    cards: Vec<Card>,           // Default: no cards
    pips: (u32, u32),           // Default: (0, 0)
    pot: u32,                   // Default: 0
    stack: u32,                 // Default: 0
    raise_bounds: (u32, u32),   // Default: (0, 0)
    legal: LegalActions,        // Default: empty
    terminal: bool,             // Default: false
}

impl BoardContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the street. Defaults to the one matching the board cards.
    pub fn street(mut self, street: Street) -> Self {
        self.street = Some(street);
        self
    }

    pub fn cards(mut self, cards: Vec<Card>) -> Self {
        self.cards = cards;
        self
    }

    /// Own pip then opponent pip.
    pub fn pips(mut self, own: u32, opp: u32) -> Self {
        self.pips = (own, opp);
        self
    }

    pub fn pot(mut self, pot: u32) -> Self {
        self.pot = pot;
        self
    }

    pub fn stack(mut self, stack: u32) -> Self {
        self.stack = stack;
        self
    }

    pub fn raise_bounds(mut self, min: u32, max: u32) -> Self {
        self.raise_bounds = (min, max);
        self
    }

    pub fn legal(mut self, legal: impl Into<LegalActions>) -> Self {
        self.legal = legal.into();
        self
    }

    pub fn terminal(mut self, terminal: bool) -> Self {
        self.terminal = terminal;
        self
    }

    pub fn build(self) -> Result<BoardContext, BoardContextError> {
        let shown = Street::from_cards(self.cards.len())
            .ok_or(BoardContextError::InvalidBoardSize(self.cards.len()))?;
        let street = self.street.unwrap_or(shown);
        if street != shown {
            return Err(BoardContextError::StreetMismatch {
                street: street.into(),
                cards: self.cards.len(),
            });
        }

        let mut seen = CardBitSet::new();
        for card in &self.cards {
            if !seen.insert(*card) {
                return Err(BoardContextError::DuplicateCard(*card));
            }
        }

        let (min_raise, max_raise) = self.raise_bounds;
        if min_raise > max_raise {
            return Err(BoardContextError::RaiseBoundsInverted {
                min: min_raise,
                max: max_raise,
            });
        }

        Ok(BoardContext {
            street,
            cards: self.cards,
            own_pip: self.pips.0,
            opp_pip: self.pips.1,
            pot: self.pot,
            stack: self.stack,
            min_raise,
            max_raise,
            legal: self.legal,
            terminal: self.terminal,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_street_from_cards() {
        assert_eq!(Some(Street::Preflop), Street::from_cards(0));
        assert_eq!(Some(Street::Turn), Street::from_cards(4));
        assert_eq!(None, Street::from_cards(2));
        assert_eq!(5, Street::River.cards());
        assert!(Street::Flop > Street::Preflop);
    }

    #[test]
    fn test_street_serde_is_numeric() {
        assert_eq!("3", serde_json::to_string(&Street::Flop).unwrap());
        assert_eq!(Street::River, serde_json::from_str::<Street>("5").unwrap());
        assert!(serde_json::from_str::<Street>("2").is_err());
    }

    #[test]
    fn test_costs_saturate() {
        let ctx = BoardContextBuilder::new().pips(10, 4).pot(6).build().unwrap();
        assert_eq!(0, ctx.continuation_cost());
        assert_eq!(20, ctx.pot_total());
    }

    #[test]
    fn test_build_validates() {
        assert_eq!(
            Err(BoardContextError::InvalidBoardSize(2)),
            BoardContextBuilder::new()
                .cards(Card::parse_many("AsKs").unwrap())
                .build()
        );
        assert_eq!(
            Err(BoardContextError::StreetMismatch {
                street: 5,
                cards: 3
            }),
            BoardContextBuilder::new()
                .street(Street::River)
                .cards(Card::parse_many("AsKsQs").unwrap())
                .build()
        );
        assert_eq!(
            Err(BoardContextError::RaiseBoundsInverted { min: 10, max: 4 }),
            BoardContextBuilder::new().raise_bounds(10, 4).build()
        );
        assert!(matches!(
            BoardContextBuilder::new()
                .cards(Card::parse_many("AsKsAs").unwrap())
                .build(),
            Err(BoardContextError::DuplicateCard(_))
        ));
    }
}
