use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Coarse classification of rule violations, reported next to the reason
/// in error bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidInput,
    NotFound,
    StateConflict,
    InsufficientFunds,
}

/// Rule violations raised by the game engine. None of these leave the
/// engine state modified.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GameError {
    #[error("Minimum {min} USDT required")]
    InvalidStake { min: f64 },

    #[error("Stake too large, at most {max_coins} coins may be issued per player")]
    StakeTooLarge { max_coins: i64 },

    #[error("Player id must not be empty")]
    EmptyPlayerId,

    #[error("Player not found: {0}")]
    PlayerNotFound(String),

    #[error("Invalid property index: {0}")]
    InvalidIndex(i64),

    #[error("Property {0} already owned")]
    AlreadyOwned(usize),

    #[error("You do not own property {0}")]
    NotOwner(usize),

    #[error("Insufficient coins: need {needed}, have {available}")]
    InsufficientFunds { needed: i64, available: i64 },

    #[error("No players have joined the game")]
    NoPlayers,

    #[error("No coins left in play, the pool cannot be split")]
    NoCoinsInPlay,

    #[error("Coin total out of range")]
    CoinOverflow,

    #[error("Invalid game config: {0}")]
    InvalidConfig(String),
}

impl GameError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GameError::InvalidStake { .. }
            | GameError::StakeTooLarge { .. }
            | GameError::EmptyPlayerId
            | GameError::InvalidIndex(_)
            | GameError::InvalidConfig(_) => ErrorKind::InvalidInput,
            GameError::PlayerNotFound(_) => ErrorKind::NotFound,
            GameError::AlreadyOwned(_)
            | GameError::NotOwner(_)
            | GameError::NoPlayers
            | GameError::NoCoinsInPlay
            | GameError::CoinOverflow => ErrorKind::StateConflict,
            GameError::InsufficientFunds { .. } => ErrorKind::InsufficientFunds,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Game(#[from] GameError),

    #[error("Env error: {0}")]
    EnvError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal server error")]
    InternalError,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
}

impl AppError {
    pub fn to_response(&self) -> (StatusCode, Json<ErrorBody>) {
        let kind = match self {
            AppError::Game(e) => Some(e.kind()),
            _ => None,
        };
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            // every rule violation is a client error carrying its reason
            AppError::Game(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            AppError::EnvError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            AppError::Io(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            AppError::InternalError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Unexpected server error".into(),
            ),
        };
        (
            status,
            Json(ErrorBody {
                error: message,
                kind,
            }),
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_response().into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!("Rejected request body: {}", rejection.body_text());
        AppError::BadRequest("Invalid request".into())
    }
}
