//! Chatty Kelly — Binary Entrypoint
//! Boots the Axum HTTP server that exposes the assistant's tools to the agent framework.

use chatty_kelly::{build_app, logging, KellyConfig};
use shuttle_axum::ShuttleAxum;

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();
    logging::init_tracing();

    let cfg = KellyConfig::load_default()?;
    let router = build_app(&cfg)?;

    Ok(router.into())
}
