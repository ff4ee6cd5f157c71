/// Chips the bot may still commit during one `get_actions` call.
///
/// Boards are decided one after another against the same budget, so a raise
/// on board 0 shrinks what boards 1 and 2 can afford.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpendBudget {
    stack: u32,
    spent: u32,
}

impl SpendBudget {
    pub fn new(stack: u32) -> Self {
        Self { stack, spent: 0 }
    }

    pub fn remaining(&self) -> u32 {
        self.stack - self.spent
    }

    pub fn spent(&self) -> u32 {
        self.spent
    }

    pub fn can_afford(&self, cost: u32) -> bool {
        cost <= self.remaining()
    }

    /// Commit `cost` chips. Never takes the budget below zero; returns
    /// whether the full amount fit.
    pub fn spend(&mut self, cost: u32) -> bool {
        let fits = self.can_afford(cost);
        self.spent = self.spent.saturating_add(cost).min(self.stack);
        fits
    }
}
