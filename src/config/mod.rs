#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::{ApiError, Result};
use crate::utils::validation::{validate_base_url, validate_positive_number, Validate};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const BASE_URL_ENV: &str = "FEDERATION_API_BASE_URL";
pub const TIMEOUT_ENV: &str = "FEDERATION_API_TIMEOUT_SECONDS";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub base_url: Option<String>,
    pub timeout_seconds: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            ..Self::default()
        }
    }

    pub fn with_timeout_seconds(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// 從環境變數讀取；缺少 base URL 不視為錯誤，交由每個 API 呼叫回報
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty());

        let timeout_seconds = match std::env::var(TIMEOUT_ENV) {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|e| ApiError::Validation {
                field: TIMEOUT_ENV.to_string(),
                reason: format!("expected a whole number of seconds: {}", e),
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECONDS,
        };

        Ok(Self {
            base_url,
            timeout_seconds,
        })
    }

    /// Later sources win: arguments that are set override the current values.
    pub fn merge(mut self, base_url: Option<String>, timeout_seconds: Option<u64>) -> Self {
        if let Some(url) = base_url.filter(|value| !value.trim().is_empty()) {
            self.base_url = Some(url);
        }
        if let Some(seconds) = timeout_seconds {
            self.timeout_seconds = seconds;
        }
        self
    }
}

impl ConfigProvider for ClientConfig {
    fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<()> {
        if let Some(url) = &self.base_url {
            validate_base_url("base_url", url)?;
        }
        let seconds = i64::try_from(self.timeout_seconds).unwrap_or(i64::MAX);
        validate_positive_number("timeout_seconds", seconds, 1)
    }
}
