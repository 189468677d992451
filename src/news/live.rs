// src/news/live.rs
use anyhow::Result;
use async_trait::async_trait;
use metrics::counter;
use tracing::{debug, warn};

use super::{feed, take_local_titles, Headline, NewsError, NewsStrategy, HEADLINE_LIMIT};

/// One syndication endpoint, yielding entry titles in document order.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch_titles(&self) -> Result<Vec<String>>;
    fn label(&self) -> &str;
}

pub struct RssFeed {
    mode: Mode,
}

enum Mode {
    // Own copy so tests can build from non-'static strings.
    Fixture {
        label: String,
        xml: String,
    },
    #[cfg(feature = "live-feeds")]
    Http {
        url: String,
        client: reqwest::Client,
    },
}

impl RssFeed {
    pub fn from_fixture(label: &str, xml: &str) -> Self {
        Self {
            mode: Mode::Fixture {
                label: label.to_string(),
                xml: xml.to_string(),
            },
        }
    }

    #[cfg(feature = "live-feeds")]
    pub fn from_url(url: &str, client: reqwest::Client) -> Self {
        Self {
            mode: Mode::Http {
                url: url.to_string(),
                client,
            },
        }
    }
}

#[async_trait]
impl FeedSource for RssFeed {
    async fn fetch_titles(&self) -> Result<Vec<String>> {
        match &self.mode {
            Mode::Fixture { xml, .. } => feed::parse_titles(xml),

            #[cfg(feature = "live-feeds")]
            Mode::Http { url, client } => {
                use anyhow::Context;

                let body = client
                    .get(url.as_str())
                    .send()
                    .await
                    .with_context(|| format!("fetching feed {url}"))?
                    .error_for_status()
                    .with_context(|| format!("feed {url} returned an error status"))?
                    .text()
                    .await
                    .with_context(|| format!("reading feed body {url}"))?;
                feed::parse_titles(&body).with_context(|| format!("parsing feed {url}"))
            }
        }
    }

    fn label(&self) -> &str {
        match &self.mode {
            Mode::Fixture { label, .. } => label.as_str(),
            #[cfg(feature = "live-feeds")]
            Mode::Http { url, .. } => url.as_str(),
        }
    }
}

/// Scan sources in order, keeping local titles until [`HEADLINE_LIMIT`] is hit.
///
/// Each source is fetched at most once and only while the cap is not reached.
/// The first failing source aborts the whole scan.
pub async fn collect_local_headlines(
    sources: &[Box<dyn FeedSource>],
) -> Result<Vec<Headline>, NewsError> {
    let mut hits: Vec<Headline> = Vec::with_capacity(HEADLINE_LIMIT);

    for source in sources {
        let titles = match source.fetch_titles().await {
            Ok(t) => t,
            Err(e) => {
                warn!(target: "news", source = source.label(), error = ?e, "feed source failed");
                counter!("news_source_errors_total").increment(1);
                return Err(NewsError::Transport(e));
            }
        };
        let seen = titles.len();
        let full = take_local_titles(titles, &mut hits, HEADLINE_LIMIT);
        debug!(
            target: "news",
            source = source.label(),
            entries = seen,
            matched = hits.len(),
            "feed source scanned"
        );
        if full {
            break;
        }
    }

    if hits.is_empty() {
        return Err(NewsError::NoMatch);
    }
    Ok(hits)
}

pub struct LiveFeedStrategy {
    sources: Vec<Box<dyn FeedSource>>,
}

impl LiveFeedStrategy {
    pub fn new(sources: Vec<Box<dyn FeedSource>>) -> Self {
        Self { sources }
    }

    /// HTTP sources sharing one client, consulted in the given order.
    #[cfg(feature = "live-feeds")]
    pub fn from_urls(urls: &[String]) -> Result<Self> {
        use anyhow::Context;

        let client = reqwest::Client::builder()
            .user_agent(concat!("chatty-kelly/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("building feed http client")?;
        let sources = urls
            .iter()
            .map(|u| Box::new(RssFeed::from_url(u, client.clone())) as Box<dyn FeedSource>)
            .collect();
        Ok(Self::new(sources))
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }
}

#[async_trait]
impl NewsStrategy for LiveFeedStrategy {
    async fn headlines(&self) -> Result<Vec<Headline>, NewsError> {
        collect_local_headlines(&self.sources).await
    }

    fn name(&self) -> &'static str {
        "live"
    }
}
