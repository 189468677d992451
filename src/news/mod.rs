// src/news/mod.rs
//! Christchurch headline lookup.
//!
//! A [`NewsFetcher`] wraps exactly one [`NewsStrategy`], chosen once at startup:
//! live feeds (keyword-filtered, capped at [`HEADLINE_LIMIT`]) or the canned
//! fallback list when live retrieval is not available.

pub mod fallback;
pub mod feed;
pub mod live;

use async_trait::async_trait;
use metrics::{counter, describe_counter, describe_histogram, histogram};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::KellyConfig;
use fallback::StaticFallbackStrategy;

/// Maximum number of headlines a single lookup returns. Not caller-tunable.
pub const HEADLINE_LIMIT: usize = 3;

/// Lower-case keywords; a title is local if it contains any of them.
pub const LOCAL_KEYWORDS: [&str; 2] = ["christchurch", "canterbury"];

pub const NO_MATCH_MESSAGE: &str = "No Christchurch stories found";

/// A single entry title, kept verbatim apart from entity decoding.
pub type Headline = String;

#[derive(Debug, thiserror::Error)]
pub enum NewsError {
    /// Feed unreachable, non-2xx, or unparseable.
    #[error("{0:#}")]
    Transport(#[from] anyhow::Error),
    #[error("No Christchurch stories found")]
    NoMatch,
}

/// Success payload of the `get_chch_news` tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsHeadlines {
    pub headlines: Vec<Headline>,
}

#[async_trait]
pub trait NewsStrategy: Send + Sync {
    async fn headlines(&self) -> Result<Vec<Headline>, NewsError>;
    fn name(&self) -> &'static str;
}

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "news_fetch_total",
            "News lookups by outcome (success, error, fallback)."
        );
        describe_counter!(
            "news_source_errors_total",
            "Feed sources that failed to fetch or parse."
        );
        describe_histogram!("news_fetch_ms", "End-to-end news lookup time in milliseconds.");
    });
}

pub fn is_local_headline(title: &str) -> bool {
    let lower = title.to_lowercase();
    LOCAL_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// Append local titles from one source to `hits` in source order, stopping
/// as soon as `hits` holds `limit` entries. Returns true once `hits` is full.
pub fn take_local_titles<I>(titles: I, hits: &mut Vec<Headline>, limit: usize) -> bool
where
    I: IntoIterator<Item = String>,
{
    for title in titles {
        if hits.len() >= limit {
            break;
        }
        if is_local_headline(&title) {
            hits.push(title);
        }
    }
    hits.len() >= limit
}

pub struct NewsFetcher {
    strategy: Box<dyn NewsStrategy>,
}

impl NewsFetcher {
    pub fn new(strategy: Box<dyn NewsStrategy>) -> Self {
        Self { strategy }
    }

    /// Pick the strategy for the lifetime of the process.
    ///
    /// Live feeds need both the `live-feeds` cargo feature and
    /// `live_feeds = true` in config; anything else degrades to the canned list.
    pub fn from_config(cfg: &KellyConfig) -> anyhow::Result<Self> {
        if cfg.live_feeds {
            #[cfg(feature = "live-feeds")]
            {
                let strategy = live::LiveFeedStrategy::from_urls(&cfg.feeds)?;
                info!(
                    target: "news",
                    strategy = "live",
                    feeds = cfg.feeds.len(),
                    "news strategy selected"
                );
                return Ok(Self::new(Box::new(strategy)));
            }
            #[cfg(not(feature = "live-feeds"))]
            warn!(
                target: "news",
                "live feeds requested but built without `live-feeds`; using canned headlines"
            );
        }
        info!(target: "news", strategy = "static", "news strategy selected");
        Ok(Self::new(Box::new(StaticFallbackStrategy)))
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Run the selected strategy once. Never returns more than [`HEADLINE_LIMIT`].
    pub async fn fetch(&self) -> Result<Vec<Headline>, NewsError> {
        ensure_metrics_described();
        let t0 = std::time::Instant::now();

        let res = self.strategy.headlines().await.map(|mut hits| {
            hits.truncate(HEADLINE_LIMIT);
            hits
        });

        let ms = t0.elapsed().as_secs_f64() * 1_000.0;
        histogram!("news_fetch_ms").record(ms);

        let outcome = match (&res, self.strategy.name()) {
            (Ok(_), "static") => "fallback",
            (Ok(_), _) => "success",
            (Err(_), _) => "error",
        };
        counter!("news_fetch_total", "outcome" => outcome).increment(1);

        match &res {
            Ok(hits) => info!(
                target: "news",
                strategy = self.strategy.name(),
                returned = hits.len(),
                "news lookup done"
            ),
            Err(e) => warn!(
                target: "news",
                strategy = self.strategy.name(),
                error = %e,
                "news lookup failed"
            ),
        }
        res
    }
}
