use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::webhook::client::WebhookEndpoints;
use crate::webhook::http_client::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS};

/// Upper bound accepted for `webhooks.timeout_secs`.
pub const MAX_TIMEOUT_SECS: u64 = 600;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to config.toml - computed at load time, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    /// UI language for outcome messages (`en`, `fr`)
    #[serde(default = "default_locale")]
    pub locale: String,

    #[serde(default)]
    pub webhooks: WebhookConfig,

    #[serde(default)]
    pub observability: ObservabilityConfig,
}

fn default_locale() -> String {
    "en".into()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            locale: default_locale(),
            webhooks: WebhookConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookConfig {
    /// GET endpoint returning the stored variables and tone list
    #[serde(default = "default_fetch_url")]
    pub fetch_url: String,
    /// POST endpoint persisting the variables
    #[serde(default = "default_save_url")]
    pub save_url: String,
    /// POST endpoint generating content from keywords
    #[serde(default = "default_test_url")]
    pub test_url: String,
    /// POST endpoint refining content from a comment
    #[serde(default = "default_comment_url")]
    pub comment_url: String,
    /// Total request timeout (default: 120)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Connection timeout (default: 10)
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_fetch_url() -> String {
    "http://localhost:5678/webhook/newsletter-variables".into()
}

fn default_save_url() -> String {
    "http://localhost:5678/webhook/newsletter-save".into()
}

fn default_test_url() -> String {
    "http://localhost:5678/webhook/newsletter-test".into()
}

fn default_comment_url() -> String {
    "http://localhost:5678/webhook/newsletter-comment".into()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_connect_timeout_secs() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            fetch_url: default_fetch_url(),
            save_url: default_save_url(),
            test_url: default_test_url(),
            comment_url: default_comment_url(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// tracing level: error, warn, info, debug, trace (default: info)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ObservabilityConfig {
    pub fn level(&self) -> Result<tracing::Level, ConfigError> {
        self.log_level.trim().parse().map_err(|_| {
            ConfigError::Validation(format!(
                "observability.log_level: unknown level `{}`",
                self.log_level
            ))
        })
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        WebhookEndpoints::from_config(&self.webhooks)?;

        if !(1..=MAX_TIMEOUT_SECS).contains(&self.webhooks.timeout_secs) {
            return Err(ConfigError::Validation(format!(
                "webhooks.timeout_secs must be within 1..={MAX_TIMEOUT_SECS}"
            )));
        }
        if self.webhooks.connect_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "webhooks.connect_timeout_secs must be non-zero".into(),
            ));
        }

        self.observability.level()?;
        Ok(())
    }
}
