//! Profile & preference handlers.

use super::get_str_param;
use crate::server::AppState;
use serde_json::Value;

pub async fn get_profile(state: &AppState, _params: &Value) -> myindex_core::Result<Value> {
    Ok(serde_json::to_value(state.api.profile())?)
}

pub async fn get_preferences(state: &AppState, _params: &Value) -> myindex_core::Result<Value> {
    let preferences = state.api.preferences().await;
    Ok(serde_json::to_value(preferences)?)
}

pub async fn toggle_theme(state: &AppState, _params: &Value) -> myindex_core::Result<Value> {
    let theme = state.api.toggle_theme().await?;
    Ok(serde_json::to_value(theme)?)
}

pub async fn toggle_lang(state: &AppState, params: &Value) -> myindex_core::Result<Value> {
    let lang = get_str_param(params, "lang", "lang");
    let lang = state.api.toggle_lang(lang).await?;
    Ok(Value::String(lang))
}

pub async fn get_state(state: &AppState, _params: &Value) -> myindex_core::Result<Value> {
    let snapshot = state.api.state().await;
    Ok(serde_json::to_value(snapshot)?)
}
