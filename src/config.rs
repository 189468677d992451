// src/config.rs
use anyhow::{anyhow, bail, Context, Result};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ENV_CONFIG_PATH: &str = "KELLY_CONFIG_PATH";
pub const ENV_LIVE_FEEDS: &str = "KELLY_LIVE_FEEDS";
pub const ENV_TOOL_TIMEOUT_SECS: &str = "KELLY_TOOL_TIMEOUT_SECS";
pub const ENV_RNG_SEED: &str = "KELLY_RNG_SEED";

pub const DEFAULT_CONFIG_TOML: &str = "config/kelly.toml";
pub const DEFAULT_CONFIG_JSON: &str = "config/kelly.json";

pub const DEFAULT_FEEDS: [&str; 2] = [
    "https://www.stuff.co.nz/rss/national",
    "https://www.rnz.co.nz/rss/national",
];
pub const DEFAULT_TIMEZONE: &str = "Pacific/Auckland";

fn default_feeds() -> Vec<String> {
    DEFAULT_FEEDS.iter().map(|s| s.to_string()).collect()
}
fn default_true() -> bool {
    true
}
fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}
fn default_tool_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KellyConfig {
    /// Feed endpoints, consulted in order.
    #[serde(default = "default_feeds")]
    pub feeds: Vec<String>,
    /// Use live feeds when the build supports it; otherwise canned headlines.
    #[serde(default = "default_true")]
    pub live_feeds: bool,
    /// IANA zone used for "today" in the weekend picker.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Budget the HTTP layer gives a single tool call.
    #[serde(default = "default_tool_timeout_secs")]
    pub tool_timeout_secs: u64,
    /// Fixed seed for reproducible picks (demos); OS entropy when absent.
    #[serde(default)]
    pub rng_seed: Option<u64>,
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,
}

impl Default for KellyConfig {
    fn default() -> Self {
        Self {
            feeds: default_feeds(),
            live_feeds: true,
            timezone: default_timezone(),
            tool_timeout_secs: default_tool_timeout_secs(),
            rng_seed: None,
            metrics_enabled: true,
        }
    }
}

impl KellyConfig {
    /// Load from an explicit path. TOML or JSON, picked by extension.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let cfg: KellyConfig = match ext.as_str() {
            "json" => serde_json::from_str(&content)
                .with_context(|| format!("parsing json config {}", path.display()))?,
            _ => toml::from_str(&content)
                .with_context(|| format!("parsing toml config {}", path.display()))?,
        };
        Ok(cfg)
    }

    /// Resolve config using env var + fallbacks, then apply env overrides:
    /// 1) $KELLY_CONFIG_PATH
    /// 2) config/kelly.toml
    /// 3) config/kelly.json
    /// 4) built-in defaults
    pub fn load_default() -> Result<Self> {
        let mut cfg = if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                bail!("{ENV_CONFIG_PATH} points to non-existent path {}", pb.display());
            }
            Self::load_from(&pb)?
        } else if Path::new(DEFAULT_CONFIG_TOML).exists() {
            Self::load_from(Path::new(DEFAULT_CONFIG_TOML))?
        } else if Path::new(DEFAULT_CONFIG_JSON).exists() {
            Self::load_from(Path::new(DEFAULT_CONFIG_JSON))?
        } else {
            Self::default()
        };
        cfg.apply_env_overrides()?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(raw) = std::env::var(ENV_LIVE_FEEDS) {
            self.live_feeds = parse_flag(&raw)
                .ok_or_else(|| anyhow!("{ENV_LIVE_FEEDS} must be 0/1/true/false, got {raw:?}"))?;
        }
        if let Ok(raw) = std::env::var(ENV_TOOL_TIMEOUT_SECS) {
            self.tool_timeout_secs = raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("{ENV_TOOL_TIMEOUT_SECS}={raw:?}"))?;
        }
        if let Ok(raw) = std::env::var(ENV_RNG_SEED) {
            let seed = raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("{ENV_RNG_SEED}={raw:?}"))?;
            self.rng_seed = Some(seed);
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.live_feeds {
            if self.feeds.is_empty() {
                bail!("live_feeds is on but no feed urls are configured");
            }
            if let Some(i) = self.feeds.iter().position(|f| f.trim().is_empty()) {
                bail!("feeds[{i}] is blank");
            }
        }
        if self.tool_timeout_secs == 0 {
            bail!("tool_timeout_secs must be > 0");
        }
        self.tz()?;
        Ok(())
    }

    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| anyhow!("invalid timezone {:?}: {e}", self.timezone))
    }

    pub fn tool_timeout(&self) -> Duration {
        Duration::from_secs(self.tool_timeout_secs)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn defaults_match_stock_feeds_and_zone() {
        let cfg = KellyConfig::default();
        assert_eq!(cfg.feeds, default_feeds());
        assert_eq!(cfg.tz().unwrap(), chrono_tz::Pacific::Auckland);
        assert!(cfg.live_feeds);
        cfg.validate().unwrap();
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let cfg: KellyConfig = toml::from_str("live_feeds = false\n").unwrap();
        assert!(!cfg.live_feeds);
        assert_eq!(cfg.timezone, DEFAULT_TIMEZONE);
        assert_eq!(cfg.tool_timeout_secs, 10);
    }

    #[test]
    fn flags_parse() {
        assert_eq!(parse_flag(" TRUE "), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn validation_rejects_bad_zone_and_empty_feeds() {
        let bad_tz = KellyConfig {
            timezone: "Mars/Olympus".into(),
            ..KellyConfig::default()
        };
        assert!(bad_tz.validate().is_err());

        let no_feeds = KellyConfig {
            feeds: vec![],
            ..KellyConfig::default()
        };
        assert!(no_feeds.validate().is_err());

        let one_blank = KellyConfig {
            feeds: vec!["https://www.rnz.co.nz/rss/national".into(), "  ".into()],
            ..KellyConfig::default()
        };
        let err = one_blank.validate().unwrap_err();
        assert_eq!(err.to_string(), "feeds[1] is blank");

        let static_only = KellyConfig {
            feeds: vec![],
            live_feeds: false,
            ..KellyConfig::default()
        };
        assert!(static_only.validate().is_ok());
    }

    #[serial_test::serial]
    #[test]
    fn env_overrides_win() {
        env::set_var(ENV_LIVE_FEEDS, "off");
        env::set_var(ENV_RNG_SEED, "1234");
        let mut cfg = KellyConfig::default();
        cfg.apply_env_overrides().unwrap();
        env::remove_var(ENV_LIVE_FEEDS);
        env::remove_var(ENV_RNG_SEED);

        assert!(!cfg.live_feeds);
        assert_eq!(cfg.rng_seed, Some(1234));
    }
}
