use std::fmt;

use crate::core::Hand;

/// What the bot answers for a single board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Action {
    /// Give up the board.
    Fold,
    /// Pass without adding chips.
    Check,
    /// Match the opponent's pip.
    Call,
    /// Raise so our pip on the board becomes the given total.
    Raise(u32),
    /// Commit two cards to the board. Only legal before the board's first
    /// betting round.
    Assign(Hand),
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Fold => ActionKind::Fold,
            Action::Check => ActionKind::Check,
            Action::Call => ActionKind::Call,
            Action::Raise(_) => ActionKind::Raise,
            Action::Assign(_) => ActionKind::Assign,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Fold => write!(f, "fold"),
            Action::Check => write!(f, "check"),
            Action::Call => write!(f, "call"),
            Action::Raise(amount) => write!(f, "raise {amount}"),
            Action::Assign(hand) => write!(f, "assign {hand}"),
        }
    }
}

/// Action without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ActionKind {
    Fold = 0,
    Check = 1,
    Call = 2,
    Raise = 3,
    Assign = 4,
}

impl ActionKind {
    pub const ALL: [ActionKind; 5] = [
        ActionKind::Fold,
        ActionKind::Check,
        ActionKind::Call,
        ActionKind::Raise,
        ActionKind::Assign,
    ];
}

/// Set of action kinds the engine will accept on a board.
///
/// A `u8` bit per kind, so it is `Copy` and needs no allocation.
#[derive(Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LegalActions {
    bits: u8,
}

impl LegalActions {
    #[inline]
    pub fn new() -> Self {
        Self { bits: 0 }
    }

    /// Returns `true` if the kind was not already present.
    #[inline]
    pub fn insert(&mut self, kind: ActionKind) -> bool {
        let mask = 1u8 << kind as u8;
        let was_present = (self.bits & mask) != 0;
        self.bits |= mask;
        !was_present
    }

    #[inline]
    pub fn contains(&self, kind: ActionKind) -> bool {
        (self.bits & (1u8 << kind as u8)) != 0
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.bits.count_ones() as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = ActionKind> + '_ {
        ActionKind::ALL.into_iter().filter(|k| self.contains(*k))
    }
}

impl FromIterator<ActionKind> for LegalActions {
    fn from_iter<T: IntoIterator<Item = ActionKind>>(iter: T) -> Self {
        let mut set = Self::new();
        for kind in iter {
            set.insert(kind);
        }
        set
    }
}

impl<const N: usize> From<[ActionKind; N]> for LegalActions {
    fn from(kinds: [ActionKind; N]) -> Self {
        kinds.into_iter().collect()
    }
}

impl fmt::Debug for LegalActions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl serde::Serialize for LegalActions {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> serde::Deserialize<'de> for LegalActions {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let kinds = Vec::<ActionKind>::deserialize(deserializer)?;
        Ok(kinds.into_iter().collect())
    }
}
