use std::collections::BTreeMap;

use crate::{errors::GameError, models::Player};

/// Players keyed by id. Iteration is in ascending id order, which is the
/// order payouts and winner selection rely on.
#[derive(Debug, Clone, Default)]
pub struct PlayerRegistry {
    players: BTreeMap<String, Player>,
}

impl PlayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the player, returning any record it replaced.
    pub fn insert(&mut self, player: Player) -> Option<Player> {
        self.players.insert(player.id.clone(), player)
    }

    pub fn get(&self, id: &str) -> Result<&Player, GameError> {
        self.players
            .get(id)
            .ok_or_else(|| GameError::PlayerNotFound(id.to_string()))
    }

    pub fn get_mut(&mut self, id: &str) -> Result<&mut Player, GameError> {
        self.players
            .get_mut(id)
            .ok_or_else(|| GameError::PlayerNotFound(id.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn total_coins(&self) -> Result<i64, GameError> {
        self.players
            .values()
            .try_fold(0i64, |total, p| total.checked_add(p.coins))
            .ok_or(GameError::CoinOverflow)
    }
}
