pub mod game;
pub mod player;
pub mod property;

pub use game::{end_game_handler, game_summary_handler, join_game_handler, roll_dice_handler};
pub use player::{get_player_handler, get_players_handler};
pub use property::{buy_property_handler, get_properties_handler, sell_property_handler};
