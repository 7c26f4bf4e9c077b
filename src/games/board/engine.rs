use rand::Rng;

use crate::{
    config::{GameConfig, MAX_PLAYER_COINS},
    errors::GameError,
    games::board::{
        dice::{DiceRoller, RngDice},
        ledger::Ledger,
        players::PlayerRegistry,
        properties::PropertyRegistry,
    },
    models::{GameSummary, Payout, Player, Property, RollOutcome, Settlement},
};

/// All state of the running game. Callers share it behind a single lock so
/// that every operation below sees and leaves a consistent snapshot.
pub struct GameEngine {
    config: GameConfig,
    players: PlayerRegistry,
    properties: PropertyRegistry,
    ledger: Ledger,
    dice: Box<dyn DiceRoller>,
    round: u64,
}

impl GameEngine {
    /// Prices the board from `rng`, then keeps it for the dice.
    pub fn new<R>(config: GameConfig, mut rng: R) -> Result<Self, GameError>
    where
        R: Rng + Send + 'static,
    {
        config.validate()?;
        let properties =
            PropertyRegistry::init(config.board_size, &config.price_policy, &mut rng);
        Ok(Self::from_parts(config, properties, Box::new(RngDice::new(rng))))
    }

    pub fn with_dice<R, D>(config: GameConfig, rng: &mut R, dice: D) -> Result<Self, GameError>
    where
        R: Rng,
        D: DiceRoller + 'static,
    {
        config.validate()?;
        let properties = PropertyRegistry::init(config.board_size, &config.price_policy, rng);
        Ok(Self::from_parts(config, properties, Box::new(dice)))
    }

    fn from_parts(
        config: GameConfig,
        properties: PropertyRegistry,
        dice: Box<dyn DiceRoller>,
    ) -> Self {
        tracing::info!(
            "Board initialized with {} properties ({:?})",
            properties.len(),
            config.price_policy
        );
        Self {
            config,
            players: PlayerRegistry::new(),
            properties,
            ledger: Ledger::new(),
            dice,
            round: 0,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn total_stake(&self) -> f64 {
        self.ledger.total_stake()
    }

    /// Admits a player. Joining again with a known id replaces the old
    /// record and its pooled stake.
    pub fn add_player(
        &mut self,
        id: &str,
        stake: f64,
        wallet_addr: &str,
    ) -> Result<Player, GameError> {
        if id.trim().is_empty() {
            return Err(GameError::EmptyPlayerId);
        }
        if !stake.is_finite() || stake < self.config.min_stake {
            return Err(GameError::InvalidStake {
                min: self.config.min_stake,
            });
        }

        let coins = self
            .config
            .coins_for_stake(stake)
            .ok_or(GameError::StakeTooLarge {
                max_coins: MAX_PLAYER_COINS,
            })?;

        let player = Player {
            id: id.to_string(),
            stake_locked: stake,
            coins,
            wallet_addr: wallet_addr.to_string(),
            position: self.config.start_position,
        };

        if let Some(replaced) = self.players.insert(player.clone()) {
            tracing::warn!("Player {} rejoined, replacing previous record", id);
            self.ledger
                .withdraw(self.config.pooled_stake(replaced.stake_locked));
        }
        self.ledger.deposit(self.config.pooled_stake(stake));

        Ok(player)
    }

    pub fn get_player(&self, id: &str) -> Result<&Player, GameError> {
        self.players.get(id)
    }

    pub fn list_players(&self) -> Vec<Player> {
        self.players.iter().cloned().collect()
    }

    pub fn properties(&self) -> &[Property] {
        self.properties.all()
    }

    /// Rolls the engine's dice for a known player and moves them.
    pub fn roll(&mut self, player_id: &str) -> Result<RollOutcome, GameError> {
        self.players.get(player_id)?;
        let dice = self.dice.roll();
        let position = self.move_player(player_id, dice)?;

        Ok(RollOutcome {
            player_id: player_id.to_string(),
            dice,
            position,
        })
    }

    pub fn move_player(&mut self, player_id: &str, dice: u8) -> Result<usize, GameError> {
        let board_size = self.properties.len();
        let player = self.players.get_mut(player_id)?;
        player.position = (player.position + dice as usize) % board_size;
        let position = player.position;

        self.round += 1;
        if self.round % self.config.inflation_interval == 0 {
            self.properties.inflate(self.config.inflation_factor);
            tracing::info!(
                "Round {}: property prices inflated by {}",
                self.round,
                self.config.inflation_factor
            );
        }

        Ok(position)
    }

    /// Returns the price paid.
    pub fn buy_property(&mut self, player_id: &str, index: i64) -> Result<i64, GameError> {
        let player = self.players.get_mut(player_id)?;
        let property = self.properties.get_mut(index)?;

        if property.is_owned() {
            return Err(GameError::AlreadyOwned(property.index));
        }
        if !player.can_afford(property.price) {
            return Err(GameError::InsufficientFunds {
                needed: property.price,
                available: player.coins,
            });
        }

        player.coins -= property.price;
        property.owner = Some(player.id.clone());
        tracing::debug!(
            "Player {} bought property {} for {}, {} coins left",
            player.id,
            property.index,
            property.price,
            player.coins
        );

        Ok(property.price)
    }

    /// Returns the refund, half the current price rounded down.
    pub fn sell_property(&mut self, player_id: &str, index: i64) -> Result<i64, GameError> {
        let player = self.players.get_mut(player_id)?;
        let property = self.properties.get_mut(index)?;

        if !property.is_owned_by(player_id) {
            return Err(GameError::NotOwner(property.index));
        }

        let refund = property.resale_value();
        player.coins = player
            .coins
            .checked_add(refund)
            .ok_or(GameError::CoinOverflow)?;
        property.owner = None;

        Ok(refund)
    }

    /// Splits the pool by coin holdings. The winner holds the most coins;
    /// on a tie the lowest player id wins.
    pub fn end_game(&self) -> Result<Settlement, GameError> {
        if self.players.is_empty() {
            return Err(GameError::NoPlayers);
        }
        let total_coins = self.players.total_coins()?;

        let payouts = self
            .players
            .iter()
            .map(|p| -> Result<Payout, GameError> {
                Ok(Payout {
                    wallet_addr: p.wallet_addr.clone(),
                    usdt: self.ledger.share_of_pool(p.coins, total_coins)?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let winner = self
            .players
            .iter()
            .fold(None::<&Player>, |best, p| match best {
                Some(b) if b.coins >= p.coins => Some(b),
                _ => Some(p),
            })
            .map(|p| p.id.clone())
            .ok_or(GameError::NoPlayers)?;

        Ok(Settlement { payouts, winner })
    }

    pub fn summary(&self) -> Result<GameSummary, GameError> {
        Ok(GameSummary {
            board_size: self.properties.len(),
            round: self.round,
            player_count: self.players.len(),
            total_stake: self.ledger.total_stake(),
            total_coins: self.players.total_coins()?,
        })
    }
}
