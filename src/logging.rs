// src/logging.rs
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const ENV_LOG_JSON: &str = "KELLY_LOG_JSON";
const DEFAULT_FILTER: &str = "chatty_kelly=info,news=info,tools=info,api=info,warn";

/// Install a global subscriber. `RUST_LOG` wins over the default filter;
/// `KELLY_LOG_JSON=1` switches to JSON lines.
///
/// Safe to call when a runtime (e.g. Shuttle) already installed one: the
/// second install is skipped.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let json = std::env::var(ENV_LOG_JSON).ok().is_some_and(|v| v == "1");

    let res = if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().compact())
            .try_init()
    };
    if res.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
