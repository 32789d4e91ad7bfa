//! JSON-RPC request handlers, split by domain.

mod content;
mod player;
mod preferences;

use crate::server::AppState;
use crate::wrapper::wrap_response;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use myindex_core::MyIndexError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, error, warn};

// ============================================================================
// JSON-RPC types
// ============================================================================

/// JSON-RPC 2.0 request structure.
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
    pub id: Option<Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
    pub id: Option<Value>,
}

/// JSON-RPC 2.0 error structure.
#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcResponse {
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: Some(result),
            error: None,
            id,
        }
    }

    pub fn error(id: Option<Value>, code: i32, message: String) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(JsonRpcError {
                code,
                message,
                data: None,
            }),
            id,
        }
    }
}

/// JSON-RPC code for an unknown method.
const METHOD_NOT_FOUND: i32 = -32601;

// ============================================================================
// Parameter extraction helpers
// ============================================================================

/// Extract an optional string parameter, supporting both snake_case and camelCase.
pub(crate) fn get_str_param<'a>(params: &'a Value, snake: &str, camel: &str) -> Option<&'a str> {
    params
        .get(snake)
        .or_else(|| params.get(camel))
        .and_then(|v| v.as_str())
}

/// Extract an optional bool parameter, supporting both snake_case and camelCase.
pub(crate) fn get_bool_param(params: &Value, snake: &str, camel: &str) -> Option<bool> {
    params
        .get(snake)
        .or_else(|| params.get(camel))
        .and_then(|v| v.as_bool())
}

/// Extract an optional u64 parameter, supporting both snake_case and camelCase.
pub(crate) fn get_u64_param(params: &Value, snake: &str, camel: &str) -> Option<u64> {
    params
        .get(snake)
        .or_else(|| params.get(camel))
        .and_then(|v| v.as_u64())
}

/// Extract a required parameter of any deserializable type.
pub(crate) fn require_param<T: DeserializeOwned>(
    params: &Value,
    snake: &str,
    camel: &str,
) -> myindex_core::Result<T> {
    let value = params
        .get(snake)
        .or_else(|| params.get(camel))
        .ok_or_else(|| MyIndexError::InvalidParams {
            message: format!("Missing required parameter: {}", snake),
        })?;
    serde_json::from_value(value.clone()).map_err(|e| MyIndexError::InvalidParams {
        message: format!("Invalid parameter {}: {}", snake, e),
    })
}

// ============================================================================
// HTTP endpoints
// ============================================================================

/// Health check endpoint.
pub async fn handle_health() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

/// Main JSON-RPC handler.
pub async fn handle_rpc(
    State(state): State<Arc<AppState>>,
    Json(request): Json<JsonRpcRequest>,
) -> impl IntoResponse {
    let method = &request.method;
    let params = request.params.unwrap_or(Value::Object(Default::default()));
    let id = request.id.clone();

    debug!("RPC call: {}({:?})", method, params);

    // Handle built-in methods
    if method == "health_check" {
        return (
            StatusCode::OK,
            Json(JsonRpcResponse::success(id, json!({"status": "ok"}))),
        );
    }

    let Some(result) = dispatch_method(&state, method, &params).await else {
        warn!("Method not found: {}", method);
        return (
            StatusCode::OK,
            Json(JsonRpcResponse::error(
                id,
                METHOD_NOT_FOUND,
                format!("Method not found: {}", method),
            )),
        );
    };

    match result {
        Ok(value) => {
            let wrapped = wrap_response(method, value);
            (StatusCode::OK, Json(JsonRpcResponse::success(id, wrapped)))
        }
        Err(e) => {
            error!("RPC error for {}: {}", method, e);
            let code = e.to_rpc_error_code();
            (
                StatusCode::OK,
                Json(JsonRpcResponse::error(id, code, e.to_string())),
            )
        }
    }
}

// ============================================================================
// Method dispatcher
// ============================================================================

/// Dispatch a method call to the appropriate domain handler.
///
/// Returns `None` for an unknown method.
async fn dispatch_method(
    state: &AppState,
    method: &str,
    params: &Value,
) -> Option<myindex_core::Result<Value>> {
    let result = match method {
        // Profile & Preferences
        "get_profile" => preferences::get_profile(state, params).await,
        "get_preferences" => preferences::get_preferences(state, params).await,
        "toggle_theme" => preferences::toggle_theme(state, params).await,
        "toggle_lang" => preferences::toggle_lang(state, params).await,
        "get_state" => preferences::get_state(state, params).await,

        // Content
        "get_sayings" => content::get_sayings(state, params).await,
        "load_sayings" => content::load_sayings(state, params).await,
        "get_gh_repos" => content::get_gh_repos(state, params).await,
        "load_gh_repos" => content::load_gh_repos(state, params).await,
        "get_music" => content::get_music(state, params).await,
        "load_music" => content::load_music(state, params).await,

        // Player
        "player_status" => player::player_status(state, params).await,
        "player_select" => player::player_select(state, params).await,
        "player_next" => player::player_next(state, params).await,
        "player_previous" => player::player_previous(state, params).await,
        "player_set_order" => player::player_set_order(state, params).await,
        "player_set_playing" => player::player_set_playing(state, params).await,
        "get_current_lyric" => player::get_current_lyric(state, params).await,

        // Unknown method
        _ => return None,
    };
    Some(result)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_rpc_response_success() {
        let response = JsonRpcResponse::success(Some(json!(1)), json!({"data": "test"}));
        assert!(response.error.is_none());
        assert!(response.result.is_some());
    }

    #[test]
    fn test_json_rpc_response_error() {
        let response = JsonRpcResponse::error(Some(json!(1)), -32600, "Test error".into());
        assert!(response.error.is_some());
        assert!(response.result.is_none());
        assert_eq!(response.error.unwrap().code, -32600);
    }

    #[test]
    fn test_param_helpers_accept_camel_case() {
        let params = json!({"positionMs": 1200, "playing": true, "lang": "en"});
        assert_eq!(get_u64_param(&params, "position_ms", "positionMs"), Some(1200));
        assert_eq!(get_bool_param(&params, "playing", "playing"), Some(true));
        assert_eq!(get_str_param(&params, "lang", "lang"), Some("en"));
    }

    #[test]
    fn test_require_param() {
        let params = json!({"index": 2, "order": "nope"});
        let index: usize = require_param(&params, "index", "index").unwrap();
        assert_eq!(index, 2);

        let missing = require_param::<usize>(&params, "other", "other").unwrap_err();
        assert!(matches!(missing, MyIndexError::InvalidParams { .. }));

        let invalid = require_param::<myindex_core::PlayOrder>(&params, "order", "order");
        assert!(matches!(invalid, Err(MyIndexError::InvalidParams { .. })));
    }
}
