use axum::{Json, extract::State};
use serde::Deserialize;

use crate::{
    errors::AppError,
    http::extract::JsonBody,
    models::{Property, TradeReceipt},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct TradePayload {
    pub player_id: String,
    pub property_idx: i64,
}

pub async fn buy_property_handler(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<TradePayload>,
) -> Result<Json<TradeReceipt>, AppError> {
    let price = state
        .game
        .lock()
        .await
        .buy_property(&payload.player_id, payload.property_idx)
        .map_err(|e| {
            tracing::warn!(
                "Player {} could not buy property {}: {}",
                payload.player_id,
                payload.property_idx,
                e
            );
            AppError::from(e)
        })?;

    tracing::info!(
        "Player {} bought property {} for {}",
        payload.player_id,
        payload.property_idx,
        price
    );
    Ok(Json(TradeReceipt {
        message: "Property bought".into(),
        price,
    }))
}

pub async fn sell_property_handler(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<TradePayload>,
) -> Result<Json<TradeReceipt>, AppError> {
    let refund = state
        .game
        .lock()
        .await
        .sell_property(&payload.player_id, payload.property_idx)
        .map_err(|e| {
            tracing::warn!(
                "Player {} could not sell property {}: {}",
                payload.player_id,
                payload.property_idx,
                e
            );
            AppError::from(e)
        })?;

    tracing::info!(
        "Player {} sold property {} for {}",
        payload.player_id,
        payload.property_idx,
        refund
    );
    Ok(Json(TradeReceipt {
        message: "Property sold".into(),
        price: refund,
    }))
}

pub async fn get_properties_handler(State(state): State<AppState>) -> Json<Vec<Property>> {
    Json(state.game.lock().await.properties().to_vec())
}
