pub mod dice;
pub mod engine;
pub mod ledger;
pub mod players;
pub mod properties;

pub use dice::{DiceRoller, FixedDice, RngDice};
pub use engine::GameEngine;
pub use ledger::Ledger;
pub use players::PlayerRegistry;
pub use properties::PropertyRegistry;
