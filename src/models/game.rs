use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollOutcome {
    pub player_id: String,
    pub dice: u8,
    pub position: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeReceipt {
    pub message: String,
    pub price: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payout {
    pub wallet_addr: String,
    pub usdt: f64,
}

/// End of game split of the pool, payouts ordered by player id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    pub payouts: Vec<Payout>,
    pub winner: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    pub board_size: usize,
    pub round: u64,
    pub player_count: usize,
    pub total_stake: f64,
    pub total_coins: i64,
}
