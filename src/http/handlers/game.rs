use axum::{Json, extract::State};
use serde::Deserialize;

use crate::{
    errors::AppError,
    http::extract::JsonBody,
    models::{GameSummary, Player, RollOutcome, Settlement},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct JoinPayload {
    pub player_id: String,
    pub usdt_amount: f64,
    pub wallet_addr: String,
}

#[derive(Debug, Deserialize)]
pub struct RollPayload {
    pub player_id: String,
}

pub async fn join_game_handler(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<JoinPayload>,
) -> Result<Json<Player>, AppError> {
    let player = state
        .game
        .lock()
        .await
        .add_player(&payload.player_id, payload.usdt_amount, &payload.wallet_addr)
        .map_err(|e| {
            tracing::warn!("Player {} failed to join: {}", payload.player_id, e);
            AppError::from(e)
        })?;

    tracing::info!(
        "Player {} joined at position {} with {} coins",
        player.id,
        player.position,
        player.coins
    );
    Ok(Json(player))
}

pub async fn roll_dice_handler(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<RollPayload>,
) -> Result<Json<RollOutcome>, AppError> {
    let outcome = state
        .game
        .lock()
        .await
        .roll(&payload.player_id)
        .map_err(|e| {
            tracing::warn!("Roll rejected for {}: {}", payload.player_id, e);
            AppError::from(e)
        })?;

    tracing::info!(
        "Player {}: dice={}, new position={}",
        outcome.player_id,
        outcome.dice,
        outcome.position
    );
    Ok(Json(outcome))
}

pub async fn end_game_handler(State(state): State<AppState>) -> Result<Json<Settlement>, AppError> {
    let settlement = state.game.lock().await.end_game().map_err(|e| {
        tracing::warn!("Cannot settle game: {}", e);
        AppError::from(e)
    })?;

    tracing::info!(
        "Game settled across {} players, winner {}",
        settlement.payouts.len(),
        settlement.winner
    );
    Ok(Json(settlement))
}

pub async fn game_summary_handler(
    State(state): State<AppState>,
) -> Result<Json<GameSummary>, AppError> {
    let summary = state.game.lock().await.summary().map_err(|e| {
        tracing::error!("Cannot summarize game: {}", e);
        AppError::from(e)
    })?;

    Ok(Json(summary))
}
