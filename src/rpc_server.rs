//! Exercise visibility RPC server: JSON lines over stdin/stdout for the
//! content-script bridge.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"timeline.toggle", "params":{"key":"Math::HW1","hide":true}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}
//!
//! Logs go to stderr; stdout carries only protocol lines.

use std::path::PathBuf;

use serde_json::{json, Value};
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter};

use exercise_visibility::app::App;
use exercise_visibility::platform;
use exercise_visibility::rpc_handler::handle_method;

fn database_path() -> PathBuf {
    match std::env::var("EXERCISE_VISIBILITY_DATA_DIR") {
        Ok(dir) => PathBuf::from(dir).join(exercise_visibility::database::connection::DATABASE_FILE_NAME),
        Err(_) => platform::default_database_path(),
    }
}

fn filter_directive(debug: bool) -> String {
    let level = if debug { "debug" } else { "info" };
    format!("exercise_visibility={}", level)
}

async fn write_line(stdout: &mut io::Stdout, value: &Value) -> std::io::Result<()> {
    stdout.write_all(value.to_string().as_bytes()).await?;
    stdout.write_all(b"\n").await?;
    stdout.flush().await
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Installed before the store opens so migration and open errors are logged.
    // The stored `debug` setting can only raise the level afterwards.
    let env_filter = EnvFilter::try_from_default_env().ok();
    let has_env_filter = env_filter.is_some();
    let (filter, filter_handle) =
        reload::Layer::new(env_filter.unwrap_or_else(|| EnvFilter::new(filter_directive(false))));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let db_path = database_path();
    let mut app = match App::open(&db_path).await {
        Ok(app) => app,
        Err(e) => {
            error!(path = %db_path.display(), error = %e, "Failed to open visibility store");
            return Err(e.into());
        }
    };

    if app.config().debug && !has_env_filter {
        filter_handle.reload(EnvFilter::new(filter_directive(true)))?;
    }
    info!(path = %db_path.display(), debug = app.config().debug, "Visibility store ready");

    let mut stdout = io::stdout();
    write_line(&mut stdout, &json!({"event": "ready", "version": env!("CARGO_PKG_VERSION")})).await?;

    let mut lines = BufReader::new(io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let req: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                write_line(&mut stdout, &json!({"id": null, "error": format!("parse error: {}", e)})).await?;
                continue;
            }
        };

        let id = req.get("id").cloned().unwrap_or(Value::Null);
        let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
        let params = req.get("params").cloned().unwrap_or(json!({}));

        let response = match handle_method(&mut app, method, &params).await {
            Ok(val) => json!({"id": id, "result": val}),
            Err(err) => {
                error!(method, error = %err, "RPC call failed");
                json!({"id": id, "error": err})
            }
        };
        write_line(&mut stdout, &response).await?;
    }

    info!("stdin closed, shutting down");
    Ok(())
}
