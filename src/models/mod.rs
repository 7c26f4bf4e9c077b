pub mod game;
pub mod player;
pub mod property;

pub use game::{GameSummary, Payout, RollOutcome, Settlement, TradeReceipt};
pub use player::Player;
pub use property::Property;
