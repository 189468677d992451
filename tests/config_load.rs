// tests/config_load.rs
use chatty_kelly::config::{KellyConfig, ENV_CONFIG_PATH, ENV_LIVE_FEEDS};
use chatty_kelly::news::NewsFetcher;
use std::{env, fs};

#[test]
fn parse_toml_and_json_paths() {
    let dir = tempfile::tempdir().unwrap();

    let p_toml = dir.path().join("kelly.toml");
    fs::write(
        &p_toml,
        r#"
feeds = ["https://example.test/a.xml", "https://example.test/b.xml"]
live_feeds = true
timezone = "Pacific/Chatham"
"#,
    )
    .unwrap();
    let t = KellyConfig::load_from(&p_toml).unwrap();
    assert_eq!(t.feeds.len(), 2);
    assert_eq!(t.timezone, "Pacific/Chatham");
    assert_eq!(t.tool_timeout_secs, 10);

    let p_json = dir.path().join("kelly.json");
    fs::write(&p_json, r#"{"live_feeds": false, "rng_seed": 7}"#).unwrap();
    let j = KellyConfig::load_from(&p_json).unwrap();
    assert!(!j.live_feeds);
    assert_eq!(j.rng_seed, Some(7));
    assert_eq!(j.timezone, "Pacific/Auckland");
}

#[test]
fn broken_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("kelly.toml");
    fs::write(&p, "live_feeds = \"sometimes\"").unwrap();
    let err = KellyConfig::load_from(&p).unwrap_err();
    assert!(format!("{err:#}").contains("kelly.toml"));
}

#[serial_test::serial]
#[test]
fn default_uses_env_then_fallbacks() {
    // Isolate CWD so the repo's own config/ does not leak in
    let old = env::current_dir().unwrap();
    let tmp = tempfile::tempdir().unwrap();
    env::set_current_dir(tmp.path()).unwrap();
    env::remove_var(ENV_CONFIG_PATH);
    env::remove_var(ENV_LIVE_FEEDS);

    // 1) Nothing on disk -> defaults
    let d = KellyConfig::load_default().unwrap();
    assert_eq!(d, KellyConfig::default());

    // 2) Fallback TOML in ./config/
    let cfg_dir = tmp.path().join("config");
    fs::create_dir_all(&cfg_dir).unwrap();
    fs::write(cfg_dir.join("kelly.toml"), "tool_timeout_secs = 3\n").unwrap();
    let t = KellyConfig::load_default().unwrap();
    assert_eq!(t.tool_timeout_secs, 3);

    // 3) Env path wins
    let p_env = tmp.path().join("other.json");
    fs::write(&p_env, r#"{"tool_timeout_secs": 42}"#).unwrap();
    env::set_var(ENV_CONFIG_PATH, p_env.display().to_string());
    let e = KellyConfig::load_default().unwrap();
    assert_eq!(e.tool_timeout_secs, 42);

    // 4) Env path to nowhere is an error
    env::set_var(ENV_CONFIG_PATH, tmp.path().join("missing.toml").display().to_string());
    assert!(KellyConfig::load_default().is_err());
    env::remove_var(ENV_CONFIG_PATH);

    env::set_current_dir(&old).unwrap();
}

#[serial_test::serial]
#[test]
fn live_feeds_off_via_env_selects_static_strategy() {
    let old = env::current_dir().unwrap();
    let tmp = tempfile::tempdir().unwrap();
    env::set_current_dir(tmp.path()).unwrap();
    env::remove_var(ENV_CONFIG_PATH);

    env::set_var(ENV_LIVE_FEEDS, "0");
    let cfg = KellyConfig::load_default().unwrap();
    env::remove_var(ENV_LIVE_FEEDS);
    env::set_current_dir(&old).unwrap();

    assert!(!cfg.live_feeds);
    let fetcher = NewsFetcher::from_config(&cfg).unwrap();
    assert_eq!(fetcher.strategy_name(), "static");
}

#[cfg(feature = "live-feeds")]
#[test]
fn live_feeds_on_selects_live_strategy() {
    let fetcher = NewsFetcher::from_config(&KellyConfig::default()).unwrap();
    assert_eq!(fetcher.strategy_name(), "live");
}
