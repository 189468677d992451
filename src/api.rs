// src/api.rs
//! HTTP face of the tool-calling contract.
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use tower_http::cors::CorsLayer;
use tracing::warn;

use crate::persona::{manifest, AgentManifest};
use crate::tools::{error_json, tool_declarations, ToolDeclaration, ToolName, Toolbox};

#[derive(Clone)]
pub struct AppState {
    pub toolbox: Arc<Toolbox>,
    /// Outer budget per tool call; the tools themselves never time out.
    pub tool_timeout: Duration,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/manifest", get(get_manifest))
        .route("/tools", get(list_tools))
        .route("/tools/{name}", post(invoke_tool))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

async fn get_manifest() -> Json<AgentManifest> {
    Json(manifest())
}

async fn list_tools() -> Json<Vec<ToolDeclaration>> {
    Json(tool_declarations())
}

async fn invoke_tool(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Bytes,
) -> (StatusCode, Json<Value>) {
    let Some(tool) = ToolName::from_name(&name) else {
        return (
            StatusCode::NOT_FOUND,
            Json(error_json(format!("unknown tool: {name}"))),
        );
    };

    let args = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Null
    } else {
        match serde_json::from_slice::<Value>(&body) {
            Ok(v) => v,
            Err(e) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(error_json(format!("invalid json body: {e}"))),
                )
            }
        }
    };

    let call = state.toolbox.dispatch(tool.as_str(), &args);
    match tokio::time::timeout(state.tool_timeout, call).await {
        Ok(out) => (StatusCode::OK, Json(out)),
        Err(_) => {
            warn!(target: "api", %tool, timeout = ?state.tool_timeout, "tool call timed out");
            (
                StatusCode::OK,
                Json(error_json(format!(
                    "{tool} timed out after {}s",
                    state.tool_timeout.as_secs()
                ))),
            )
        }
    }
}
