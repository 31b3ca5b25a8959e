//! Process configuration.
//!
//! Credentials and endpoints come from the environment (a `.env` file is
//! honoured). Each external client receives its own section explicitly.

use std::time::Duration;

use crate::api_connection::endpoints::CompletionProviderKind;

pub const FOOD_API_KEY_ENV_VAR: &str = "USDA_API_KEY";
pub const COMPLETION_API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";
pub const FOOD_API_URL_ENV_VAR: &str = "NUTRINOVA_FOOD_API_URL";
pub const COMPLETION_PROVIDER_ENV_VAR: &str = "NUTRINOVA_COMPLETION_PROVIDER";
pub const COMPLETION_URL_ENV_VAR: &str = "NUTRINOVA_COMPLETION_URL";
pub const MODEL_ENV_VAR: &str = "NUTRINOVA_MODEL";
pub const TIMEOUT_ENV_VAR: &str = "NUTRINOVA_HTTP_TIMEOUT_SECS";

pub const DEFAULT_FOOD_API_URL: &str = "https://api.nal.usda.gov/fdc/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_PAGE_SIZE: u32 = 25;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FoodLookupConfig {
    pub api_key: String,
    pub base_url: String,
    pub page_size: u32,
    pub timeout: Duration,
}

impl Default for FoodLookupConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_FOOD_API_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionConfig {
    pub provider: CompletionProviderKind,
    pub api_key: String,
    pub endpoint: String,
    pub model: String,
    pub timeout: Duration,
    /// Sent as `HTTP-Referer` / `X-Title` when talking to OpenRouter.
    pub site_url: String,
    pub app_name: String,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        let provider = CompletionProviderKind::OpenAi;
        Self {
            endpoint: provider.default_endpoint().to_string(),
            provider,
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            site_url: "http://localhost:3000".to_string(),
            app_name: "NutriNova".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppConfig {
    pub food: FoodLookupConfig,
    pub completion: CompletionConfig,
}

impl AppConfig {
    /// Reads the process environment after loading `.env` if one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let timeout = match get(TIMEOUT_ENV_VAR) {
            Some(raw) => {
                let secs: u64 = raw.parse().map_err(|_| ConfigError::InvalidValue {
                    var: TIMEOUT_ENV_VAR.to_string(),
                    reason: format!("'{}' is not a whole number of seconds", raw),
                })?;
                if secs == 0 {
                    return Err(ConfigError::InvalidValue {
                        var: TIMEOUT_ENV_VAR.to_string(),
                        reason: "timeout must be at least one second".to_string(),
                    });
                }
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let provider = match get(COMPLETION_PROVIDER_ENV_VAR) {
            Some(raw) => raw.parse::<CompletionProviderKind>().map_err(|reason| {
                ConfigError::InvalidValue {
                    var: COMPLETION_PROVIDER_ENV_VAR.to_string(),
                    reason,
                }
            })?,
            None => CompletionProviderKind::OpenAi,
        };

        let food_api_key = get(FOOD_API_KEY_ENV_VAR).unwrap_or_default();
        if food_api_key.is_empty() {
            tracing::warn!("{} is not set; food searches will be rejected upstream", FOOD_API_KEY_ENV_VAR);
        }
        let completion_api_key = get(COMPLETION_API_KEY_ENV_VAR).unwrap_or_default();
        if completion_api_key.is_empty() {
            tracing::warn!("{} is not set; AI insights will report an error", COMPLETION_API_KEY_ENV_VAR);
        }

        let defaults = CompletionConfig::default();
        Ok(Self {
            food: FoodLookupConfig {
                api_key: food_api_key,
                base_url: get(FOOD_API_URL_ENV_VAR)
                    .unwrap_or_else(|| DEFAULT_FOOD_API_URL.to_string()),
                page_size: DEFAULT_PAGE_SIZE,
                timeout,
            },
            completion: CompletionConfig {
                provider,
                api_key: completion_api_key,
                endpoint: get(COMPLETION_URL_ENV_VAR)
                    .unwrap_or_else(|| provider.default_endpoint().to_string()),
                model: get(MODEL_ENV_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                timeout,
                site_url: get("SITE_URL").unwrap_or(defaults.site_url),
                app_name: get("APP_NAME").unwrap_or(defaults.app_name),
            },
        })
    }
}
