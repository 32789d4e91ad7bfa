//! Integration tests for the myindex-rpc JSON-RPC server.
//!
//! These tests spawn the binary against a temporary data root and check the
//! response shapes the page shell reads. Every outbound endpoint in the test
//! profile points at a closed local port, so no test depends on the network.

use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tempfile::TempDir;
use tokio::io::AsyncBufReadExt;

const DEAD_ENDPOINT: &str = "http://127.0.0.1:1";

/// Create a data root with a site profile whose sources are all unreachable.
fn create_test_env() -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let site = json!({
        "name": "Test Site",
        "sayings": {
            "apis": [{
                "name": "dead",
                "url": format!("{}/quote", DEAD_ENDPOINT),
                "format": {"kind": "plain_text", "from": "nowhere"}
            }],
            "upd_freq": 0
        },
        "github_repos": {
            "user": "someone",
            "api": format!("{}/users/{{user}}/repos", DEAD_ENDPOINT)
        },
        "music": {
            "apis": [format!("{}/meting/", DEAD_ENDPOINT)]
        }
    });
    std::fs::write(temp_dir.path().join("site.json"), site.to_string()).unwrap();
    temp_dir
}

/// Make an RPC call to the server.
async fn rpc_call(port: u16, method: &str, params: Value) -> Result<Value, String> {
    let json = rpc_call_raw(port, method, params).await?;
    if let Some(error) = json.get("error") {
        return Err(error.to_string());
    }
    Ok(json.get("result").cloned().unwrap_or(Value::Null))
}

/// Make an RPC call and return the full JSON-RPC payload.
async fn rpc_call_raw(port: u16, method: &str, params: Value) -> Result<Value, String> {
    let client = reqwest::Client::new();
    let response = client
        .post(format!("http://127.0.0.1:{}/rpc", port))
        .json(&json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": 1
        }))
        .timeout(Duration::from_secs(10))
        .send()
        .await
        .map_err(|e| e.to_string())?;

    response.json::<Value>().await.map_err(|e| e.to_string())
}

/// Check health endpoint.
async fn check_health(port: u16) -> bool {
    let client = reqwest::Client::new();
    if let Ok(response) = client
        .get(format!("http://127.0.0.1:{}/health", port))
        .timeout(Duration::from_secs(5))
        .send()
        .await
    {
        if let Ok(json) = response.json::<Value>().await {
            return json.get("status").and_then(|v| v.as_str()) == Some("ok");
        }
    }
    false
}

/// Wait for server to be ready.
async fn wait_for_server(port: u16, timeout_secs: u64) -> bool {
    let start = std::time::Instant::now();
    while start.elapsed() < Duration::from_secs(timeout_secs) {
        if check_health(port).await {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    false
}

struct RpcServerHandle {
    child: tokio::process::Child,
    port: u16,
    stdout_drain: Option<tokio::task::JoinHandle<()>>,
}

impl RpcServerHandle {
    async fn stop(mut self) {
        if let Some(drain) = self.stdout_drain.take() {
            drain.abort();
        }
        let _ = self.child.kill().await;
        let _ = self.child.wait().await;
    }
}

impl Drop for RpcServerHandle {
    fn drop(&mut self) {
        if let Some(drain) = self.stdout_drain.take() {
            drain.abort();
        }
        let _ = self.child.start_kill();
    }
}

fn rpc_binary() -> Result<PathBuf, String> {
    if let Some(path) = option_env!("CARGO_BIN_EXE_myindex-rpc") {
        return Ok(PathBuf::from(path));
    }
    let current_exe = std::env::current_exe()
        .map_err(|e| format!("failed to resolve current_exe for fallback: {e}"))?;
    let target_debug_dir = current_exe
        .parent()
        .and_then(|p| p.parent())
        .ok_or_else(|| "failed to resolve target/debug directory for fallback".to_string())?;

    let mut fallback = target_debug_dir.join("myindex-rpc");
    if cfg!(target_os = "windows") {
        fallback.set_extension("exe");
    }
    if !fallback.exists() {
        return Err(format!(
            "myindex-rpc binary not found at {}",
            fallback.display()
        ));
    }
    Ok(fallback)
}

/// Start the RPC binary and wait until `/health` is ready.
async fn start_rpc_server(data_root: &Path, extra_args: &[&str]) -> Result<RpcServerHandle, String> {
    let mut child = tokio::process::Command::new(rpc_binary()?)
        .arg("--host")
        .arg("127.0.0.1")
        .arg("--port")
        .arg("0")
        .arg("--data-root")
        .arg(data_root)
        .args(extra_args)
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| format!("failed to spawn myindex-rpc: {e}"))?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| "failed to capture stdout".to_string())?;
    let mut lines = tokio::io::BufReader::new(stdout).lines();

    let mut discovered_port: Option<u16> = None;
    let deadline = tokio::time::Instant::now() + Duration::from_secs(20);
    while tokio::time::Instant::now() < deadline {
        match tokio::time::timeout(Duration::from_millis(250), lines.next_line()).await {
            Ok(Ok(Some(line))) => {
                if let Some(value) = line.strip_prefix("RPC_PORT=") {
                    let parsed = value
                        .trim()
                        .parse::<u16>()
                        .map_err(|e| format!("invalid RPC_PORT value '{value}': {e}"))?;
                    discovered_port = Some(parsed);
                    break;
                }
            }
            Ok(Ok(None)) => break,
            Ok(Err(err)) => return Err(format!("failed to read myindex-rpc stdout: {err}")),
            Err(_) => continue,
        }
    }

    let port =
        discovered_port.ok_or_else(|| "RPC_PORT line not emitted by myindex-rpc".to_string())?;
    if !wait_for_server(port, 15).await {
        return Err(format!("myindex-rpc failed health check on port {port}"));
    }

    let stdout_drain =
        tokio::spawn(async move { while let Ok(Some(_)) = lines.next_line().await {} });

    Ok(RpcServerHandle {
        child,
        port,
        stdout_drain: Some(stdout_drain),
    })
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn test_health_and_profile() {
    let env = create_test_env();
    let server = start_rpc_server(env.path(), &[]).await.unwrap();

    let health = rpc_call(server.port, "health_check", json!({})).await.unwrap();
    assert_eq!(health["status"], "ok");

    let profile = rpc_call(server.port, "get_profile", json!({})).await.unwrap();
    assert_eq!(profile["name"], "Test Site");
    assert_eq!(profile["github_repos"]["user"], "someone");
    assert_eq!(profile["social"].as_array().unwrap().len(), 4);

    server.stop().await;
}

#[tokio::test]
async fn test_preferences_persist_across_restart() {
    let env = create_test_env();
    let server = start_rpc_server(env.path(), &[]).await.unwrap();

    let theme = rpc_call(server.port, "toggle_theme", json!({})).await.unwrap();
    assert_eq!(theme, json!({"success": true, "theme": "dark"}));
    let lang = rpc_call(server.port, "toggle_lang", json!({"lang": "en"})).await.unwrap();
    assert_eq!(lang["lang"], "en");
    server.stop().await;

    let server = start_rpc_server(env.path(), &[]).await.unwrap();
    let prefs = rpc_call(server.port, "get_preferences", json!({})).await.unwrap();
    assert_eq!(prefs, json!({"lang": "en", "theme": "dark"}));
    let lang = rpc_call(server.port, "toggle_lang", json!({})).await.unwrap();
    assert_eq!(lang["lang"], "zh");
    server.stop().await;
}

#[tokio::test]
async fn test_failed_sources_keep_previous_content() {
    let env = create_test_env();
    let server = start_rpc_server(env.path(), &[]).await.unwrap();

    let sayings = rpc_call(server.port, "load_sayings", json!({})).await.unwrap();
    assert_eq!(sayings["outcome"], "unchanged");
    assert_eq!(sayings["saying"], json!({"text": "", "from": ""}));

    let music = rpc_call(server.port, "load_music", json!({})).await.unwrap();
    assert_eq!(music["outcome"], "unchanged");
    assert_eq!(music["tracks"], json!([]));

    // Repository failures surface as JSON-RPC errors
    let repos = rpc_call_raw(server.port, "load_gh_repos", json!({})).await.unwrap();
    assert_eq!(repos["error"]["code"], -32000);
    let listed = rpc_call(server.port, "get_gh_repos", json!({})).await.unwrap();
    assert_eq!(listed, json!({"success": true, "repos": []}));

    let state = rpc_call(server.port, "get_state", json!({})).await.unwrap();
    assert_eq!(
        state["updated_at"],
        json!({"music": 0, "sayings": 0, "gh_repos": 0})
    );

    server.stop().await;
}

#[tokio::test]
async fn test_player_on_empty_playlist() {
    let env = create_test_env();
    let server = start_rpc_server(env.path(), &[]).await.unwrap();

    let status = rpc_call(server.port, "player_status", json!({})).await.unwrap();
    assert_eq!(status["order"], "loop");
    assert_eq!(status["index"], Value::Null);

    let status = rpc_call(server.port, "player_set_order", json!({"order": "random"}))
        .await
        .unwrap();
    assert_eq!(status["order"], "random");

    let lyric = rpc_call(server.port, "get_current_lyric", json!({"position_ms": 1000}))
        .await
        .unwrap();
    assert_eq!(lyric, json!({"success": true, "line": null}));

    let select = rpc_call_raw(server.port, "player_select", json!({"index": 0}))
        .await
        .unwrap();
    assert_eq!(select["error"]["code"], -32005);

    let missing = rpc_call_raw(server.port, "player_set_order", json!({})).await.unwrap();
    assert_eq!(missing["error"]["code"], -32602);

    server.stop().await;
}

#[tokio::test]
async fn test_unknown_method() {
    let env = create_test_env();
    let server = start_rpc_server(env.path(), &[]).await.unwrap();

    let response = rpc_call_raw(server.port, "no_such_method", json!({})).await.unwrap();
    assert_eq!(response["error"]["code"], -32601);
    assert_eq!(response["id"], 1);

    server.stop().await;
}

#[tokio::test]
async fn test_explicit_site_config_path() {
    let env = create_test_env();
    let other = env.path().join("other-site.json");
    std::fs::write(&other, r#"{"name":"Elsewhere"}"#).unwrap();
    let other_arg = other.to_string_lossy().to_string();

    let server = start_rpc_server(env.path(), &["--site-config", &other_arg, "--persist-content"])
        .await
        .unwrap();
    let profile = rpc_call(server.port, "get_profile", json!({})).await.unwrap();
    assert_eq!(profile["name"], "Elsewhere");

    server.stop().await;
}
