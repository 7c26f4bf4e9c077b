use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    #[serde(rename = "usdt_locked")]
    pub stake_locked: f64,
    #[serde(rename = "game_coins")]
    pub coins: i64,
    pub wallet_addr: String,
    pub position: usize,
}

impl Player {
    pub fn can_afford(&self, price: i64) -> bool {
        self.coins >= price
    }
}
