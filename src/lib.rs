// src/lib.rs
// Public library surface for the binaries and integration tests.

pub mod api;
pub mod config;
pub mod events;
pub mod jokes;
pub mod logging;
pub mod metrics;
pub mod news;
pub mod persona;
pub mod tools;

// ---- Re-exports for stable public API ----
pub use crate::api::router;
pub use crate::config::KellyConfig;
pub use crate::tools::{ToolName, ToolResult, Toolbox};

use std::sync::Arc;

use axum::Router;
use tracing::info;

/// Build the full app from resolved config: tools, optional `/metrics`.
///
/// Installs the global metrics recorder when `metrics_enabled`, so call it
/// once per process.
pub fn build_app(cfg: &KellyConfig) -> anyhow::Result<Router> {
    let toolbox = Toolbox::from_config(cfg)?;
    info!(
        news_strategy = toolbox.news_strategy(),
        timezone = %cfg.timezone,
        tool_timeout_secs = cfg.tool_timeout_secs,
        "toolbox ready"
    );

    let state = api::AppState {
        toolbox: Arc::new(toolbox),
        tool_timeout: cfg.tool_timeout(),
    };
    let mut app = api::router(state);
    if cfg.metrics_enabled {
        let m = metrics::Metrics::init()?;
        app = app.merge(m.router());
    }
    Ok(app)
}
