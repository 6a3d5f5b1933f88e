//! # Configuration Tests
//!
//! `schoolbot-cli` is a binary crate, so the config module is included directly by path.

#[path = "../src/config.rs"]
mod config;

use self::config::{get_config, ConfigError};
use schoolbot::constants::DEFAULT_DB_FILE;
use std::env;
use std::sync::Mutex;

// Environment variables are process-global; tests touching them run one at a time.
static ENV_LOCK: Mutex<()> = Mutex::new(());

fn clear_env_vars() {
    env::remove_var("AI_PROVIDER");
    env::remove_var("AI_API_KEY");
    env::remove_var("AI_MODEL");
    env::remove_var("LOCAL_AI_API_URL");
    env::remove_var("LOCAL_AI_API_KEY");
    env::remove_var("DB_URL");
    env::remove_var("SCHOOLBOT_BOT__SCHOOL_NAME");
    env::remove_var("SCHOOLBOT_BOT__NOTICE_LIMIT");
    env::remove_var("SCHOOLBOT_BOT__MATCHING__THRESHOLD");
    env::remove_var("SCHOOLBOT_PROVIDER__TIMEOUT_SECS");
}

#[test]
fn local_template_is_the_default() {
    let _lock = ENV_LOCK.lock().unwrap();
    clear_env_vars();
    env::set_var("LOCAL_AI_API_URL", "http://localhost:1234/v1/chat/completions");
    env::set_var("AI_MODEL", "gemma-3");

    let config = get_config(None).expect("Configuration should load successfully");

    assert_eq!(config.provider.provider, "local");
    assert_eq!(
        config.provider.api_url.as_deref(),
        Some("http://localhost:1234/v1/chat/completions")
    );
    assert_eq!(config.provider.model_name.as_deref(), Some("gemma-3"));
    // Unset placeholders are treated as absent, not as empty strings.
    assert_eq!(config.provider.api_key, None);
    assert_eq!(config.provider.timeout_secs, Some(60));
    assert_eq!(config.db_url, DEFAULT_DB_FILE);
    assert_eq!(config.bot.school_name, "와석초등학교");
    assert_eq!(config.bot.matching.threshold, 1.0);
    assert_eq!(config.bot.notice_limit, 3);

    clear_env_vars();
}

#[test]
fn gemini_template_is_selected_by_ai_provider() {
    let _lock = ENV_LOCK.lock().unwrap();
    clear_env_vars();
    env::set_var("AI_PROVIDER", "gemini");
    env::set_var("AI_API_KEY", "test-api-key");

    let config = get_config(None).expect("Configuration should load successfully");

    assert_eq!(config.provider.provider, "gemini");
    assert_eq!(config.provider.api_key.as_deref(), Some("test-api-key"));
    assert_eq!(config.provider.api_url, None);
    assert_eq!(config.provider.model_name.as_deref(), Some("gemini-2.0-flash"));
    assert_eq!(config.bot.fallback.context_rows, 5);

    clear_env_vars();
}

#[test]
fn environment_overrides_file_values() {
    let _lock = ENV_LOCK.lock().unwrap();
    clear_env_vars();
    env::set_var("LOCAL_AI_API_URL", "http://localhost:1234");
    env::set_var("DB_URL", ":memory:");
    env::set_var("SCHOOLBOT_BOT__MATCHING__THRESHOLD", "2.5");
    env::set_var("SCHOOLBOT_BOT__NOTICE_LIMIT", "5");
    env::set_var("SCHOOLBOT_PROVIDER__TIMEOUT_SECS", "15");

    let config = get_config(None).expect("Configuration should load successfully");

    assert_eq!(config.db_url, ":memory:");
    assert_eq!(config.bot.matching.threshold, 2.5);
    assert_eq!(config.bot.notice_limit, 5);
    assert_eq!(config.provider.timeout_secs, Some(15));
    // Untouched nested values keep their defaults.
    assert_eq!(config.bot.matching.substring, 10.0);

    clear_env_vars();
}

#[test]
fn missing_config_file_is_reported() {
    let _lock = ENV_LOCK.lock().unwrap();
    clear_env_vars();

    let result = get_config(Some("/nonexistent/schoolbot.yml"));

    assert!(matches!(result, Err(ConfigError::NotFound(_))));

    clear_env_vars();
}

#[test]
fn unknown_provider_template_is_reported() {
    let _lock = ENV_LOCK.lock().unwrap();
    clear_env_vars();
    env::set_var("AI_PROVIDER", "bigquery");

    let result = get_config(None);

    assert!(matches!(result, Err(ConfigError::NotFound(msg)) if msg.contains("config.bigquery.yml")));

    clear_env_vars();
}
