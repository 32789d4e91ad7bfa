//! Response wrapping for the page shell.
//!
//! The page expects responses in the format `{success: bool, ...data}`.
//! Handlers return raw core values; this module wraps them per method.

use serde_json::{json, Value};

/// Wrap API responses to match the page's expected format.
pub fn wrap_response(method: &str, result: Value) -> Value {
    match method {
        // List wrappers
        "get_gh_repos" => {
            json!({
                "success": true,
                "repos": if result.is_null() { json!([]) } else { result }
            })
        }

        "get_music" => {
            json!({
                "success": true,
                "tracks": if result.is_null() { json!([]) } else { result }
            })
        }

        // Dict wrappers
        "get_sayings" => {
            json!({
                "success": true,
                "saying": if result.is_null() { json!({"text": "", "from": ""}) } else { result }
            })
        }

        // Scalar wrappers
        "toggle_theme" => {
            json!({
                "success": true,
                "theme": result
            })
        }

        "toggle_lang" => {
            json!({
                "success": true,
                "lang": result
            })
        }

        // Optional dict methods (null before the first line)
        "get_current_lyric" => {
            json!({
                "success": true,
                "line": result
            })
        }

        // Default: return as-is (load_* results, profile, preferences, state, player status)
        _ => result,
    }
}
