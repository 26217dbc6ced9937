use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Environment variable that overrides [`Settings::api_base_url`].
pub const API_URL_ENV: &str = "BUDGET_TRACKER_API_URL";

/// Client configuration. Every field has a default, so a settings file
/// only needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the REST API, including the `/api` prefix.
    pub api_base_url: String,

    /// Per-request timeout (native targets only).
    pub request_timeout_secs: u64,

    /// History window sent to the prediction endpoint.
    pub prediction_months: u32,

    /// How many categories the insights summary ranks.
    pub top_categories: usize,

    /// Symbol prefixed to amounts in generated text (e.g., "₹", "$").
    pub currency_symbol: String,

    /// Transactions listed on the dashboard.
    pub dashboard_recent_transactions: usize,

    /// Months shown in the dashboard income/expense chart.
    pub dashboard_chart_months: usize,

    /// Months covered by the dashboard's trailing income/expense figures.
    pub dashboard_stats_months: usize,

    /// Posts requested per forum page.
    pub forum_page_size: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8083/api".to_string(),
            request_timeout_secs: 30,
            prediction_months: 12,
            top_categories: 3,
            currency_symbol: "₹".to_string(),
            dashboard_recent_transactions: 7,
            dashboard_chart_months: 6,
            dashboard_stats_months: 12,
            forum_page_size: 50,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON document and validate them.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let settings: Settings = serde_json::from_str(json)
            .map_err(|e| CoreError::Config(format!("Failed to parse settings: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file on disk (native only, not WASM).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Self, CoreError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Apply overrides from the process environment.
    pub fn with_env_overrides(mut self) -> Result<Self, CoreError> {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                self.api_base_url = url.trim().to_string();
            }
        }
        self.validate()?;
        Ok(self)
    }

    /// Serialize to pretty JSON, e.g. to write a starter settings file.
    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize settings: {e}")))
    }

    /// Reject settings the client cannot work with.
    pub fn validate(&self) -> Result<(), CoreError> {
        let url = self.api_base_url.trim();
        if url.is_empty() {
            return Err(CoreError::Config("api_base_url must not be empty".into()));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(CoreError::Config(format!(
                "api_base_url must start with http:// or https://, got '{url}'"
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(CoreError::Config("request_timeout_secs must be positive".into()));
        }
        if self.prediction_months == 0 {
            return Err(CoreError::Config("prediction_months must be positive".into()));
        }
        if self.top_categories == 0 {
            return Err(CoreError::Config("top_categories must be positive".into()));
        }
        if self.dashboard_stats_months == 0 {
            return Err(CoreError::Config("dashboard_stats_months must be positive".into()));
        }
        if self.forum_page_size == 0 {
            return Err(CoreError::Config("forum_page_size must be positive".into()));
        }
        Ok(())
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.api_base_url.trim().trim_end_matches('/')
    }
}
