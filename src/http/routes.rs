use axum::{
    Router,
    routing::{get, post},
};

use crate::{
    http::handlers::{
        buy_property_handler, end_game_handler, game_summary_handler, get_player_handler,
        get_players_handler, get_properties_handler, join_game_handler, roll_dice_handler,
        sell_property_handler,
    },
    state::AppState,
};

pub fn create_http_routes(state: AppState) -> Router {
    Router::new()
        .route("/join", post(join_game_handler))
        .route("/roll", post(roll_dice_handler))
        .route("/buy", post(buy_property_handler))
        .route("/sell", post(sell_property_handler))
        .route("/end", post(end_game_handler))
        .route("/properties", get(get_properties_handler))
        .route("/players", get(get_players_handler))
        .route("/players/{player_id}", get(get_player_handler))
        .route("/game", get(game_summary_handler))
        .with_state(state)
}
