//! Search options configuration
//!
//! The options block sent alongside a combined query. Defaults leave every
//! option unset so the service applies its own configuration.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

use crate::result::QueryResult;

/// Search options attached to a combined query
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct SearchOptions {
    /// Number of results per page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_length: Option<u64>,

    /// Echo the resolved query in the response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_query: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_results: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_facets: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<bool>,

    /// Free-form search options (e.g. `unfiltered`, `score-logtfidf`)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub search_option: Vec<String>,
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

impl SearchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page_length(mut self, page_length: u64) -> Self {
        self.page_length = Some(page_length);
        self
    }

    pub fn return_query(mut self, enabled: bool) -> Self {
        self.return_query = Some(enabled);
        self
    }

    pub fn return_results(mut self, enabled: bool) -> Self {
        self.return_results = Some(enabled);
        self
    }

    pub fn return_facets(mut self, enabled: bool) -> Self {
        self.return_facets = Some(enabled);
        self
    }

    pub fn debug(mut self, enabled: bool) -> Self {
        self.debug = Some(enabled);
        self
    }

    pub fn search_option(mut self, option: impl Into<String>) -> Self {
        self.search_option.push(option.into());
        self
    }

    /// Load options from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load options from an arbitrary key lookup (environment-style keys)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut options = Self::default();

        if let Some(v) = lookup("SQ_PAGE_LENGTH") {
            options.page_length = Some(parse_value("SQ_PAGE_LENGTH", &v)?);
        }
        if let Some(v) = lookup("SQ_RETURN_QUERY") {
            options.return_query = Some(parse_bool("SQ_RETURN_QUERY", &v)?);
        }
        if let Some(v) = lookup("SQ_RETURN_RESULTS") {
            options.return_results = Some(parse_bool("SQ_RETURN_RESULTS", &v)?);
        }
        if let Some(v) = lookup("SQ_RETURN_FACETS") {
            options.return_facets = Some(parse_bool("SQ_RETURN_FACETS", &v)?);
        }
        if let Some(v) = lookup("SQ_DEBUG") {
            options.debug = Some(parse_bool("SQ_DEBUG", &v)?);
        }
        if let Some(v) = lookup("SQ_SEARCH_OPTIONS") {
            options.search_option = v
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }

        tracing::debug!(?options, "Loaded search options");
        Ok(options)
    }

    /// The options block as a JSON mapping
    pub fn to_value(&self) -> QueryResult<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// The options block wrapped as `{ "options": { ... } }`
    pub fn envelope(&self) -> QueryResult<Value> {
        let options = self.to_value()?;
        Ok(serde_json::json!({ "options": options }))
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key: key.to_string(),
        message: e.to_string(),
    })
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("expected a boolean, got {:?}", other),
        }),
    }
}
