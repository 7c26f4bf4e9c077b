use crate::errors::GameError;

/// Running total of the stake pooled by every player currently in the
/// game, net of the operator share.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    total_stake: f64,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deposit(&mut self, pooled: f64) {
        self.total_stake += pooled;
    }

    pub fn withdraw(&mut self, pooled: f64) {
        self.total_stake -= pooled;
    }

    pub fn total_stake(&self) -> f64 {
        self.total_stake
    }

    /// A holder's cut of the pool, proportional to their coins.
    pub fn share_of_pool(&self, coins: i64, total_coins: i64) -> Result<f64, GameError> {
        if total_coins <= 0 {
            return Err(GameError::NoCoinsInPlay);
        }
        Ok(coins as f64 / total_coins as f64 * self.total_stake)
    }
}
