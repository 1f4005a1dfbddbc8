//! RPC method handler for the exercise visibility JSON line protocol.
//!
//! Extracted from `rpc_server.rs` so it can be unit-tested independently.
//! `handle_method` dispatches one call to the [`App`].

use serde_json::{json, Value};

use crate::app::App;
use crate::types::entry::RawEntry;
use crate::types::timeline::DateGroup;

/// Dispatch a JSON-RPC method call.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub async fn handle_method(app: &mut App, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        "ping" => Ok(json!({"pong": true})),

        // ─── Timeline ───
        "timeline.reconcile" => {
            let entries: Vec<RawEntry> = field(params, "entries")?;
            let groups: Vec<DateGroup> = match params.get("groups") {
                Some(_) => field(params, "groups")?,
                None => Vec::new(),
            };
            let plan = app.reconcile(&entries, groups).await;
            serde_json::to_value(plan).map_err(|e| e.to_string())
        }
        "timeline.toggle" => {
            let key = params.get("key").and_then(|v| v.as_str()).ok_or("missing key")?;
            let hide = params.get("hide").and_then(|v| v.as_bool()).ok_or("missing hide")?;
            let plan = app.toggle(key, hide).await;
            serde_json::to_value(plan).map_err(|e| e.to_string())
        }
        "timeline.state" => {
            let state = serde_json::to_value(app.state()).map_err(|e| e.to_string())?;
            Ok(json!({"hidden": state}))
        }

        // ─── Settings ───
        "settings.get" => match params.get("key").and_then(|v| v.as_str()) {
            Some(key) => {
                let value = app.settings.get_value(key).await.map_err(|e| e.to_string())?;
                Ok(json!({"key": key, "value": value}))
            }
            None => Ok(Value::Object(app.settings.get_all().await)),
        },
        "settings.set" => {
            let key = params.get("key").and_then(|v| v.as_str()).ok_or("missing key")?;
            let value = params.get("value").cloned().ok_or("missing value")?;
            app.settings.set_value(key, value).await.map_err(|e| e.to_string())?;
            app.reload_config().await;
            Ok(json!({"ok": true}))
        }
        "settings.reset" => {
            app.settings.reset().await.map_err(|e| e.to_string())?;
            app.reload_config().await;
            Ok(json!({"ok": true}))
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}

fn field<T: serde::de::DeserializeOwned>(params: &Value, name: &str) -> Result<T, String> {
    let value = params.get(name).ok_or_else(|| format!("missing {}", name))?;
    serde_json::from_value(value.clone()).map_err(|e| format!("invalid {}: {}", name, e))
}
