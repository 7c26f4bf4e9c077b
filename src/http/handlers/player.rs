use axum::{
    Json,
    extract::{Path, State},
};

use crate::{errors::AppError, models::Player, state::AppState};

pub async fn get_players_handler(State(state): State<AppState>) -> Json<Vec<Player>> {
    Json(state.game.lock().await.list_players())
}

pub async fn get_player_handler(
    Path(player_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Player>, AppError> {
    let player = state
        .game
        .lock()
        .await
        .get_player(&player_id)
        .cloned()
        .map_err(|e| {
            tracing::warn!("Error retrieving player {}: {}", player_id, e);
            AppError::NotFound(e.to_string())
        })?;

    Ok(Json(player))
}
