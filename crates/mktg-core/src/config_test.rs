use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn build_app_config_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).expect("defaults should be valid");
    assert_eq!(cfg.data_dir, PathBuf::from("."));
    assert_eq!(cfg.log_level, "info");
    assert!(cfg.serpapi_key.is_none());
    assert_eq!(cfg.serpapi_url, "https://serpapi.com/search");
    assert_eq!(cfg.news_timeout_secs, 20);
    assert!(cfg.llm_api_key.is_none());
    assert_eq!(cfg.llm_model, "gemini-2.5-flash");
    assert!((cfg.llm_temperature - 0.7).abs() < f32::EPSILON);
    assert_eq!(cfg.llm_timeout_secs, 120);
    assert_eq!(cfg.embedding_model, "nomic-embed-text");
    assert_eq!(cfg.qdrant_collection, "icp_docs");
    assert!((cfg.relevance_threshold - 0.65).abs() < f32::EPSILON);
    assert_eq!(cfg.relevance_top_k, 10);
    assert_eq!(cfg.topic_max_attempts, 5);
    assert_eq!(cfg.blog_template, BlogTemplate::ThoughtLeadership);
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("MKTG_DATA_DIR", "/srv/mktg");
    map.insert("SERPAPI_KEY", "serp-key");
    map.insert("GEMINI_API_KEY", "gem-key");
    map.insert("MKTG_RELEVANCE_TOP_K", "5");
    map.insert("MKTG_BLOG_TEMPLATE", "standard");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.data_dir, PathBuf::from("/srv/mktg"));
    assert_eq!(cfg.serpapi_key.as_deref(), Some("serp-key"));
    assert_eq!(cfg.llm_api_key.as_deref(), Some("gem-key"));
    assert_eq!(cfg.relevance_top_k, 5);
    assert_eq!(cfg.blog_template, BlogTemplate::Standard);
}

#[test]
fn blank_api_keys_are_treated_as_unset() {
    let mut map = HashMap::new();
    map.insert("SERPAPI_KEY", "  ");
    map.insert("GEMINI_API_KEY", "");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.serpapi_key.is_none());
    assert!(cfg.llm_api_key.is_none());
}

#[test]
fn build_app_config_fails_with_invalid_news_timeout() {
    let mut map = HashMap::new();
    map.insert("MKTG_NEWS_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "MKTG_NEWS_TIMEOUT_SECS"),
        "expected InvalidEnvVar(MKTG_NEWS_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_with_invalid_threshold() {
    let mut map = HashMap::new();
    map.insert("MKTG_RELEVANCE_THRESHOLD", "high");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "MKTG_RELEVANCE_THRESHOLD"),
        "expected InvalidEnvVar(MKTG_RELEVANCE_THRESHOLD), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_topic_attempts() {
    let mut map = HashMap::new();
    map.insert("MKTG_TOPIC_MAX_ATTEMPTS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "MKTG_TOPIC_MAX_ATTEMPTS"),
        "expected InvalidEnvVar(MKTG_TOPIC_MAX_ATTEMPTS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_unknown_blog_template() {
    let mut map = HashMap::new();
    map.insert("MKTG_BLOG_TEMPLATE", "listicle");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "MKTG_BLOG_TEMPLATE"),
        "expected InvalidEnvVar(MKTG_BLOG_TEMPLATE), got: {result:?}"
    );
}

#[test]
fn debug_output_redacts_api_keys() {
    let mut map = HashMap::new();
    map.insert("SERPAPI_KEY", "serp-secret");
    map.insert("GEMINI_API_KEY", "gem-secret");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let debug = format!("{cfg:?}");
    assert!(!debug.contains("serp-secret"));
    assert!(!debug.contains("gem-secret"));
    assert!(debug.contains("[redacted]"));
}
