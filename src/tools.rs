// src/tools.rs
//! Tool-calling surface handed to the agent framework.
//!
//! Every tool is zero-argument and answers with a [`ToolResult`], which
//! serializes to `{"status": "success", ...payload}` or
//! `{"status": "error", "error_message": "..."}`.

use std::fmt;
use std::sync::Mutex;

use chrono_tz::Tz;
use metrics::counter;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::config::KellyConfig;
use crate::events::{pick_weekend_events, today_in, WeekendEvents};
use crate::jokes::{pick_joke, KiwiJoke};
use crate::news::{NewsError, NewsFetcher, NewsHeadlines};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ToolResult<T> {
    Success(T),
    Error { error_message: String },
}

impl<T> ToolResult<T> {
    pub fn error(msg: impl Into<String>) -> Self {
        Self::Error {
            error_message: msg.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

impl<T: Serialize> ToolResult<T> {
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|e| error_json(format!("encoding result: {e}")))
    }
}

impl From<Result<Vec<String>, NewsError>> for ToolResult<NewsHeadlines> {
    fn from(res: Result<Vec<String>, NewsError>) -> Self {
        match res {
            Ok(headlines) => Self::Success(NewsHeadlines { headlines }),
            Err(e) => Self::error(e.to_string()),
        }
    }
}

/// Bare error result, for callers that fail before reaching a tool.
pub fn error_json(msg: impl Into<String>) -> Value {
    json!({ "status": "error", "error_message": msg.into() })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolName {
    ChchNews,
    WeekendEvents,
    KiwiJoke,
}

impl ToolName {
    pub const ALL: [ToolName; 3] = [ToolName::ChchNews, ToolName::WeekendEvents, ToolName::KiwiJoke];

    pub fn as_str(self) -> &'static str {
        match self {
            ToolName::ChchNews => "get_chch_news",
            ToolName::WeekendEvents => "get_weekend_events",
            ToolName::KiwiJoke => "tell_kiwi_joke",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }

    pub fn description(self) -> &'static str {
        match self {
            ToolName::ChchNews => {
                "Retrieve up to three Christchurch-relevant news headlines. \
                 Returns status, headlines on success, error_message on error."
            }
            ToolName::WeekendEvents => {
                "List three fun things happening in Ōtautahi next weekend. \
                 Returns status, date (Saturday, e.g. \"07 Jun 2025\") and events."
            }
            ToolName::KiwiJoke => "Return one classic Canterbury dad-joke as status and joke.",
        }
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDeclaration {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

/// Function declarations for the agent framework. No tool takes parameters.
pub fn tool_declarations() -> Vec<ToolDeclaration> {
    ToolName::ALL
        .into_iter()
        .map(|t| ToolDeclaration {
            name: t.as_str().to_string(),
            description: t.description().to_string(),
            parameters: json!({ "type": "object", "properties": {} }),
        })
        .collect()
}

/// Omitted, `null` and `{}` all count as "no arguments".
pub fn args_are_empty(args: &Value) -> bool {
    args.is_null() || args.as_object().is_some_and(|o| o.is_empty())
}

/// Owns what the tools need: the news strategy, an injected RNG and the zone.
pub struct Toolbox {
    news: NewsFetcher,
    rng: Mutex<StdRng>,
    tz: Tz,
}

impl Toolbox {
    pub fn new(news: NewsFetcher, rng: StdRng, tz: Tz) -> Self {
        Self {
            news,
            rng: Mutex::new(rng),
            tz,
        }
    }

    pub fn from_config(cfg: &KellyConfig) -> anyhow::Result<Self> {
        let news = NewsFetcher::from_config(cfg)?;
        let rng = match cfg.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(Self::new(news, rng, cfg.tz()?))
    }

    pub fn news_strategy(&self) -> &'static str {
        self.news.strategy_name()
    }

    pub async fn get_chch_news(&self) -> ToolResult<NewsHeadlines> {
        self.news.fetch().await.into()
    }

    pub fn get_weekend_events(&self) -> ToolResult<WeekendEvents> {
        let today = today_in(self.tz);
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        ToolResult::Success(pick_weekend_events(today, &mut *rng))
    }

    pub fn tell_kiwi_joke(&self) -> ToolResult<KiwiJoke> {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        ToolResult::Success(pick_joke(&mut *rng))
    }

    pub async fn invoke(&self, tool: ToolName) -> Value {
        counter!("tool_invocations_total", "tool" => tool.as_str()).increment(1);
        let out = match tool {
            ToolName::ChchNews => self.get_chch_news().await.to_json(),
            ToolName::WeekendEvents => self.get_weekend_events().to_json(),
            ToolName::KiwiJoke => self.tell_kiwi_joke().to_json(),
        };
        debug!(target: "tools", %tool, status = %out["status"], "tool invoked");
        out
    }

    /// Name-based entry point. Unknown tools and stray arguments come back as
    /// error results, never as panics.
    pub async fn dispatch(&self, name: &str, args: &Value) -> Value {
        let Some(tool) = ToolName::from_name(name) else {
            warn!(target: "tools", name, "unknown tool requested");
            return error_json(format!("unknown tool: {name}"));
        };
        if !args_are_empty(args) {
            return error_json(format!("{tool} does not accept arguments"));
        }
        self.invoke(tool).await
    }
}
