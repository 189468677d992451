// src/news/fallback.rs
use async_trait::async_trait;

use super::{Headline, NewsError, NewsStrategy, HEADLINE_LIMIT};

/// Canned headlines served when live retrieval is not compiled in or disabled.
pub const FALLBACK_HEADLINES: [&str; 3] = [
    "City council green-lights new riverside cycleway",
    "NZSO to play free concert in Hagley Park",
    "Canterbury Museum unveils pop-up atrium exhibit",
];

/// Always succeeds with the first [`HEADLINE_LIMIT`] canned headlines, in order.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticFallbackStrategy;

#[async_trait]
impl NewsStrategy for StaticFallbackStrategy {
    async fn headlines(&self) -> Result<Vec<Headline>, NewsError> {
        Ok(FALLBACK_HEADLINES
            .iter()
            .take(HEADLINE_LIMIT)
            .map(|h| h.to_string())
            .collect())
    }

    fn name(&self) -> &'static str {
        "static"
    }
}
