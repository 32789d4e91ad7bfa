//! Music player handlers.

use super::{get_bool_param, get_u64_param, require_param};
use crate::server::AppState;
use myindex_core::PlayOrder;
use serde_json::Value;

pub async fn player_status(state: &AppState, _params: &Value) -> myindex_core::Result<Value> {
    Ok(serde_json::to_value(state.api.player_status().await)?)
}

pub async fn player_select(state: &AppState, params: &Value) -> myindex_core::Result<Value> {
    let index: usize = require_param(params, "index", "index")?;
    let status = state.api.player_select(index).await?;
    Ok(serde_json::to_value(status)?)
}

pub async fn player_next(state: &AppState, _params: &Value) -> myindex_core::Result<Value> {
    Ok(serde_json::to_value(state.api.player_next().await)?)
}

pub async fn player_previous(state: &AppState, _params: &Value) -> myindex_core::Result<Value> {
    Ok(serde_json::to_value(state.api.player_previous().await)?)
}

pub async fn player_set_order(state: &AppState, params: &Value) -> myindex_core::Result<Value> {
    let order: PlayOrder = require_param(params, "order", "order")?;
    Ok(serde_json::to_value(state.api.player_set_order(order).await)?)
}

pub async fn player_set_playing(state: &AppState, params: &Value) -> myindex_core::Result<Value> {
    // Omitting the flag toggles playback
    let playing = match get_bool_param(params, "playing", "isPlaying") {
        Some(playing) => playing,
        None => !state.api.player_status().await.is_playing,
    };
    Ok(serde_json::to_value(state.api.player_set_playing(playing).await)?)
}

pub async fn get_current_lyric(state: &AppState, params: &Value) -> myindex_core::Result<Value> {
    let position_ms = get_u64_param(params, "position_ms", "positionMs").unwrap_or(0);
    let line = state.api.current_lyric(position_ms).await?;
    Ok(serde_json::to_value(line)?)
}
