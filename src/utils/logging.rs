//! Logging utilities
//!
//! Subscriber setup and helpers for keeping secrets and large bodies out of logs

use crate::config::LoggingConfig;
use anyhow::{anyhow, Result};
use reqwest::Url;
use tracing_subscriber::EnvFilter;

/// Initialize the global subscriber.
///
/// Logs go to stderr so command output on stdout stays clean.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_new(&config.level)
        .map_err(|e| anyhow!("Invalid log filter '{}': {}", config.level, e))?;

    let subscriber: Box<dyn tracing::Subscriber + Send + Sync> = if config.format == "json" {
        Box::new(
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .finish(),
        )
    } else {
        Box::new(
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .finish(),
        )
    };

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow!("Failed to set tracing subscriber: {}", e))?;

    Ok(())
}

/// Truncate a string with a note about original length
pub fn truncate_content(s: &str, max_chars: usize) -> String {
    let total = s.chars().count();
    if total > max_chars {
        let kept: String = s.chars().take(max_chars).collect();
        format!("{}... ({} chars truncated)", kept, total - max_chars)
    } else {
        s.to_string()
    }
}

/// Replace the value of one query parameter with `***`.
///
/// Unparseable input is returned unchanged.
pub fn redact_query_param(url: &str, param: &str) -> String {
    let mut parsed = match Url::parse(url) {
        Ok(u) => u,
        Err(_) => return url.to_string(),
    };

    if !parsed.query_pairs().any(|(k, _)| k == param) {
        return url.to_string();
    }

    let pairs: Vec<(String, String)> = parsed
        .query_pairs()
        .map(|(k, v)| {
            let value = if k == param { "***".to_string() } else { v.into_owned() };
            (k.into_owned(), value)
        })
        .collect();

    parsed.query_pairs_mut().clear().extend_pairs(pairs);
    parsed.to_string()
}
