use std::path::PathBuf;
use std::str::FromStr;

use crate::app_config::{
    AppConfig, BlogTemplate, DEFAULT_RELEVANCE_THRESHOLD, DEFAULT_RELEVANCE_TOP_K,
};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Empty values count as unset so `.env` templates can leave keys blank.
    let optional = |var: &str| -> Option<String> {
        lookup(var).ok().filter(|v| !v.trim().is_empty())
    };

    let raw = |var: &str, default: &str| -> (String, String) {
        (var.to_string(), or_default(var, default))
    };

    let data_dir = PathBuf::from(or_default("MKTG_DATA_DIR", "."));
    let log_level = or_default("MKTG_LOG_LEVEL", "info");

    let serpapi_key = optional("SERPAPI_KEY");
    let serpapi_url = or_default("MKTG_SERPAPI_URL", "https://serpapi.com/search");
    let news_timeout_secs = parse_value::<u64>(raw("MKTG_NEWS_TIMEOUT_SECS", "20"))?;

    let llm_api_key = optional("GEMINI_API_KEY");
    let llm_base_url = or_default(
        "MKTG_LLM_BASE_URL",
        "https://generativelanguage.googleapis.com",
    );
    let llm_model = or_default("MKTG_LLM_MODEL", "gemini-2.5-flash");
    let llm_temperature = parse_value::<f32>(raw("MKTG_LLM_TEMPERATURE", "0.7"))?;
    let llm_timeout_secs = parse_value::<u64>(raw("MKTG_LLM_TIMEOUT_SECS", "120"))?;

    let embedding_url = or_default("MKTG_EMBEDDING_URL", "http://localhost:11434");
    let embedding_model = or_default("MKTG_EMBEDDING_MODEL", "nomic-embed-text");
    let qdrant_url = or_default("MKTG_QDRANT_URL", "http://localhost:6333");
    let qdrant_collection = or_default("MKTG_QDRANT_COLLECTION", "icp_docs");

    let relevance_threshold = parse_value::<f32>(raw(
        "MKTG_RELEVANCE_THRESHOLD",
        &DEFAULT_RELEVANCE_THRESHOLD.to_string(),
    ))?;
    let relevance_top_k = parse_value::<usize>(raw(
        "MKTG_RELEVANCE_TOP_K",
        &DEFAULT_RELEVANCE_TOP_K.to_string(),
    ))?;
    let topic_max_attempts = parse_value::<u32>(raw("MKTG_TOPIC_MAX_ATTEMPTS", "5"))?;
    if topic_max_attempts == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "MKTG_TOPIC_MAX_ATTEMPTS".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    let blog_template =
        parse_value::<BlogTemplate>(raw("MKTG_BLOG_TEMPLATE", "thought_leadership"))?;

    Ok(AppConfig {
        data_dir,
        log_level,
        serpapi_key,
        serpapi_url,
        news_timeout_secs,
        llm_api_key,
        llm_base_url,
        llm_model,
        llm_temperature,
        llm_timeout_secs,
        embedding_url,
        embedding_model,
        qdrant_url,
        qdrant_collection,
        relevance_threshold,
        relevance_top_k,
        topic_max_attempts,
        blog_template,
    })
}

fn parse_value<T>((var, raw): (String, String)) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var,
            reason: e.to_string(),
        })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
