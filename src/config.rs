use std::{fmt::Display, str::FromStr};

use crate::errors::{AppError, GameError};

/// Most coins a single join may issue. Keeps the sum over thousands of
/// players inside `i64` and the pooled stake finite.
pub const MAX_PLAYER_COINS: i64 = 1_000_000_000_000_000;

/// How each board position is priced when the engine starts.
#[derive(Debug, Clone, PartialEq)]
pub enum PricePolicy {
    Fixed(i64),
    /// Each property draws its own price uniformly from `min..=max`.
    Random { min: i64, max: i64 },
}

/// Rules of one game session. Every revision of the board lives here
/// instead of in constants spread over the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub board_size: usize,
    pub start_position: usize,
    pub price_policy: PricePolicy,
    /// Prices inflate once every `inflation_interval` rounds.
    pub inflation_interval: u64,
    pub inflation_factor: f64,
    pub min_stake: f64,
    pub operator_share_rate: f64,
    pub conversion_rate: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: 61,
            start_position: 0,
            price_policy: PricePolicy::Random { min: 5, max: 20 },
            inflation_interval: 5,
            inflation_factor: 1.1,
            min_stake: 3.0,
            operator_share_rate: 0.2,
            conversion_rate: 1000.0,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        let invalid = |msg: &str| -> Result<(), GameError> {
            Err(GameError::InvalidConfig(msg.to_string()))
        };

        if self.board_size == 0 {
            return invalid("board size must be at least 1");
        }
        if self.start_position >= self.board_size {
            return invalid("start position must be on the board");
        }
        match self.price_policy {
            PricePolicy::Fixed(price) if price < 0 => return invalid("price must not be negative"),
            PricePolicy::Random { min, max } if min < 0 || min > max => {
                return invalid("price range must satisfy 0 <= min <= max");
            }
            _ => {}
        }
        if self.inflation_interval == 0 {
            return invalid("inflation interval must be at least 1");
        }
        if !self.inflation_factor.is_finite() || self.inflation_factor < 1.0 {
            return invalid("inflation factor must be a finite value >= 1.0");
        }
        if !self.min_stake.is_finite() || self.min_stake < 0.0 {
            return invalid("minimum stake must be a finite value >= 0");
        }
        if !(0.0..1.0).contains(&self.operator_share_rate) {
            return invalid("operator share rate must be in [0, 1)");
        }
        if !self.conversion_rate.is_finite() || self.conversion_rate <= 0.0 {
            return invalid("conversion rate must be positive");
        }
        Ok(())
    }

    /// Part of a stake that goes into the shared pool.
    pub fn pooled_stake(&self, stake: f64) -> f64 {
        stake - stake * self.operator_share_rate
    }

    /// Coins granted for a stake, or `None` past `MAX_PLAYER_COINS`. A tiny
    /// tolerance keeps values such as `2.4 * 1000` from flooring to 2399.
    pub fn coins_for_stake(&self, stake: f64) -> Option<i64> {
        let coins = (self.pooled_stake(stake) * self.conversion_rate + 1e-9).floor();
        (coins.is_finite() && coins <= MAX_PLAYER_COINS as f64).then_some(coins as i64)
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rate_limit_per_minute: u32,
    pub rng_seed: Option<u64>,
    pub game: GameConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key/value source; `from_env` passes the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = GameConfig::default();

        let price_policy = match parse_opt::<i64, _>(&lookup, "PRICE_FIXED")? {
            Some(price) => PricePolicy::Fixed(price),
            None => {
                let (default_min, default_max) = match defaults.price_policy {
                    PricePolicy::Random { min, max } => (min, max),
                    PricePolicy::Fixed(price) => (price, price),
                };
                PricePolicy::Random {
                    min: parse_or(&lookup, "PRICE_MIN", default_min)?,
                    max: parse_or(&lookup, "PRICE_MAX", default_max)?,
                }
            }
        };

        let game = GameConfig {
            board_size: parse_or(&lookup, "BOARD_SIZE", defaults.board_size)?,
            start_position: parse_or(&lookup, "START_POSITION", defaults.start_position)?,
            price_policy,
            inflation_interval: parse_or(
                &lookup,
                "INFLATION_INTERVAL",
                defaults.inflation_interval,
            )?,
            inflation_factor: parse_or(&lookup, "INFLATION_FACTOR", defaults.inflation_factor)?,
            min_stake: parse_or(&lookup, "MIN_STAKE", defaults.min_stake)?,
            operator_share_rate: parse_or(
                &lookup,
                "OPERATOR_SHARE_RATE",
                defaults.operator_share_rate,
            )?,
            conversion_rate: parse_or(&lookup, "CONVERSION_RATE", defaults.conversion_rate)?,
        };
        game.validate()
            .map_err(|e| AppError::EnvError(e.to_string()))?;

        let rate_limit_per_minute = parse_or(&lookup, "RATE_LIMIT_PER_MINUTE", 1000u32)?;
        if rate_limit_per_minute == 0 {
            return Err(AppError::EnvError(
                "RATE_LIMIT_PER_MINUTE must be at least 1".into(),
            ));
        }

        Ok(Self {
            port: parse_or(&lookup, "PORT", 8080u16)?,
            rate_limit_per_minute,
            rng_seed: parse_opt(&lookup, "RNG_SEED")?,
            game,
        })
    }
}

fn parse_opt<T, F>(lookup: &F, key: &str) -> Result<Option<T>, AppError>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| AppError::EnvError(format!("Invalid {key} '{raw}': {e}"))),
        _ => Ok(None),
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    Ok(parse_opt(lookup, key)?.unwrap_or(default))
}
