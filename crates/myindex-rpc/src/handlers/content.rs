//! Content handlers: read a slice, or refresh it and return it.

use crate::server::AppState;
use myindex_core::RefreshOutcome;
use serde::Serialize;
use serde_json::{json, Value};

fn loaded<T: Serialize>(outcome: RefreshOutcome, key: &str, data: T) -> myindex_core::Result<Value> {
    let mut response = json!({
        "success": true,
        "outcome": outcome,
    });
    response[key] = serde_json::to_value(data)?;
    Ok(response)
}

pub async fn get_sayings(state: &AppState, _params: &Value) -> myindex_core::Result<Value> {
    Ok(serde_json::to_value(state.api.sayings().await)?)
}

pub async fn load_sayings(state: &AppState, _params: &Value) -> myindex_core::Result<Value> {
    let outcome = state.api.load_sayings().await?;
    loaded(outcome, "saying", state.api.sayings().await)
}

pub async fn get_gh_repos(state: &AppState, _params: &Value) -> myindex_core::Result<Value> {
    Ok(serde_json::to_value(state.api.gh_repos().await)?)
}

pub async fn load_gh_repos(state: &AppState, _params: &Value) -> myindex_core::Result<Value> {
    let outcome = state.api.load_gh_repos().await?;
    loaded(outcome, "repos", state.api.gh_repos().await)
}

pub async fn get_music(state: &AppState, _params: &Value) -> myindex_core::Result<Value> {
    Ok(serde_json::to_value(state.api.music().await)?)
}

pub async fn load_music(state: &AppState, _params: &Value) -> myindex_core::Result<Value> {
    let outcome = state.api.load_music().await?;
    loaded(outcome, "tracks", state.api.music().await)
}
