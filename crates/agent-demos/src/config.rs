//! Configuration for the demos

use crate::error::{DemoError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Model used by the weather/time agent
pub const MISTRAL_7B: &str = "openai/mistral:7b";
/// Model used by the weather team agents
pub const QWEN_8B: &str = "openai/qwen3:8b";
/// Model used by the stock advisor agents
pub const OLLAMA_QWEN_8B: &str = "ollama_chat/qwen3:8b";

/// Environment variable forcing one model string for every agent
pub const MODEL_ENV: &str = "ADK_DEMO_MODEL";
/// Environment variable overriding the DuckDuckGo endpoint
pub const SEARCH_BASE_URL_ENV: &str = "DUCKDUCKGO_BASE_URL";

pub const DEFAULT_SEARCH_BASE_URL: &str = "https://html.duckduckgo.com";

/// Configuration shared by all demos
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Model of the weather/time agent
    pub weather_time_model: String,

    /// Model of the weather team agents (plain and stateful)
    pub team_model: String,

    /// Model of the stock advisor agents
    pub stock_model: String,

    /// DuckDuckGo HTML endpoint root
    pub search_base_url: String,

    /// Results fetched by the mock weather lookup
    pub weather_time_results: usize,

    /// Results fetched by the team weather lookup
    pub team_weather_results: usize,

    /// Results returned by the `duckduckgo_results_json` tool
    pub stock_search_results: usize,

    /// Search request timeout
    pub search_timeout: Duration,

    /// Stock advisor answers with the summarizer's report instead of the first final event
    pub stock_summary_only: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            weather_time_model: MISTRAL_7B.to_string(),
            team_model: QWEN_8B.to_string(),
            stock_model: OLLAMA_QWEN_8B.to_string(),
            search_base_url: DEFAULT_SEARCH_BASE_URL.to_string(),
            weather_time_results: 2,
            team_weather_results: 4,
            stock_search_results: 5,
            search_timeout: Duration::from_secs(30),
            stock_summary_only: false,
        }
    }
}

impl DemoConfig {
    /// Create a new configuration builder
    pub fn builder() -> DemoConfigBuilder {
        DemoConfigBuilder::default()
    }

    /// Defaults with `ADK_DEMO_MODEL` and `DUCKDUCKGO_BASE_URL` applied
    pub fn from_env() -> Result<Self> {
        Self::builder().with_env().build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        for (field, model) in [
            ("weather_time_model", &self.weather_time_model),
            ("team_model", &self.team_model),
            ("stock_model", &self.stock_model),
        ] {
            if model.trim().is_empty() {
                return Err(DemoError::Config(format!("{field} must not be empty")));
            }
        }

        if !(self.search_base_url.starts_with("http://")
            || self.search_base_url.starts_with("https://"))
        {
            return Err(DemoError::Config(format!(
                "search_base_url must be an http(s) URL, got '{}'",
                self.search_base_url
            )));
        }

        if self.weather_time_results == 0
            || self.team_weather_results == 0
            || self.stock_search_results == 0
        {
            return Err(DemoError::Config(
                "search result counts must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for DemoConfig
#[derive(Debug, Default)]
pub struct DemoConfigBuilder {
    weather_time_model: Option<String>,
    team_model: Option<String>,
    stock_model: Option<String>,
    search_base_url: Option<String>,
    weather_time_results: Option<usize>,
    team_weather_results: Option<usize>,
    stock_search_results: Option<usize>,
    search_timeout: Option<Duration>,
    stock_summary_only: Option<bool>,
}

impl DemoConfigBuilder {
    /// Use one model string for every agent
    pub fn model(mut self, model: impl Into<String>) -> Self {
        let model = model.into();
        self.weather_time_model = Some(model.clone());
        self.team_model = Some(model.clone());
        self.stock_model = Some(model);
        self
    }

    pub fn weather_time_model(mut self, model: impl Into<String>) -> Self {
        self.weather_time_model = Some(model.into());
        self
    }

    pub fn team_model(mut self, model: impl Into<String>) -> Self {
        self.team_model = Some(model.into());
        self
    }

    pub fn stock_model(mut self, model: impl Into<String>) -> Self {
        self.stock_model = Some(model.into());
        self
    }

    /// Set the DuckDuckGo endpoint root
    pub fn search_base_url(mut self, url: impl Into<String>) -> Self {
        self.search_base_url = Some(url.into());
        self
    }

    pub fn weather_time_results(mut self, count: usize) -> Self {
        self.weather_time_results = Some(count);
        self
    }

    pub fn team_weather_results(mut self, count: usize) -> Self {
        self.team_weather_results = Some(count);
        self
    }

    pub fn stock_search_results(mut self, count: usize) -> Self {
        self.stock_search_results = Some(count);
        self
    }

    /// Set search request timeout
    pub fn search_timeout(mut self, duration: Duration) -> Self {
        self.search_timeout = Some(duration);
        self
    }

    pub fn stock_summary_only(mut self, enabled: bool) -> Self {
        self.stock_summary_only = Some(enabled);
        self
    }

    /// Apply `ADK_DEMO_MODEL` and `DUCKDUCKGO_BASE_URL` when set
    pub fn with_env(self) -> Self {
        self.with_lookup(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup; blank values are ignored
    pub fn with_lookup(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        if let Some(model) = get(MODEL_ENV) {
            self = self.model(model);
        }
        if let Some(url) = get(SEARCH_BASE_URL_ENV) {
            self.search_base_url = Some(url);
        }
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<DemoConfig> {
        let defaults = DemoConfig::default();

        let config = DemoConfig {
            weather_time_model: self.weather_time_model.unwrap_or(defaults.weather_time_model),
            team_model: self.team_model.unwrap_or(defaults.team_model),
            stock_model: self.stock_model.unwrap_or(defaults.stock_model),
            search_base_url: self
                .search_base_url
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.search_base_url),
            weather_time_results: self
                .weather_time_results
                .unwrap_or(defaults.weather_time_results),
            team_weather_results: self
                .team_weather_results
                .unwrap_or(defaults.team_weather_results),
            stock_search_results: self
                .stock_search_results
                .unwrap_or(defaults.stock_search_results),
            search_timeout: self.search_timeout.unwrap_or(defaults.search_timeout),
            stock_summary_only: self
                .stock_summary_only
                .unwrap_or(defaults.stock_summary_only),
        };

        config.validate()?;
        Ok(config)
    }
}
