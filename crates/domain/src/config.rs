//! Sitewrench configuration model.
//!
//! Loaded from a TOML file by the CLI layer. Every field carries a serde
//! default so a missing or partial file still deserializes; `validate()`
//! reports what a usable configuration is still missing.

use serde::{Deserialize, Serialize};
use std::fmt;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Top-level config
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderConfig,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Provider connection
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of the management provider host, e.g. `https://cm01.corp.example`.
    #[serde(default = "d_base_url")]
    pub base_url: String,
    /// Short site identifier the provider exposes its object store under.
    #[serde(default)]
    pub site: String,
    #[serde(default)]
    pub auth: AuthConfig,
    /// Per-request timeout in milliseconds. `0` disables the timeout.
    #[serde(default = "d_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: d_base_url(),
            site: String::new(),
            auth: AuthConfig::default(),
            timeout_ms: d_timeout_ms(),
        }
    }
}

/// How the provider API key is obtained. All fields are optional; the
/// resolution precedence is `key` (plaintext, discouraged), then OS
/// keychain via `service` + `account`, then the `env` variable. A fully
/// empty `AuthConfig` means the store is called unauthenticated.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AuthConfig {
    /// Plaintext API key. Prefer `env` or the keychain fields.
    #[serde(default)]
    pub key: Option<String>,
    /// Environment variable holding the API key.
    #[serde(default)]
    pub env: Option<String>,
    /// OS keychain service name.
    #[serde(default)]
    pub service: Option<String>,
    /// OS keychain account name.
    #[serde(default)]
    pub account: Option<String>,
}

// ── serde default helpers ───────────────────────────────────────────

fn d_base_url() -> String {
    "https://localhost:8530".into()
}
fn d_timeout_ms() -> u64 {
    30_000
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Config validation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Severity level for a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSeverity {
    Error,
    Warning,
}

/// A single configuration validation issue.
#[derive(Debug, Clone)]
pub struct ConfigError {
    pub severity: ConfigSeverity,
    pub field: String,
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            ConfigSeverity::Error => "ERROR",
            ConfigSeverity::Warning => "WARN",
        };
        write!(f, "[{tag}] {}: {}", self.field, self.message)
    }
}

impl Config {
    /// Validate the configuration and return a list of issues.
    ///
    /// Returns an empty vec when everything looks good.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.provider.base_url.is_empty() {
            errors.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "provider.base_url".into(),
                message: "base_url must not be empty".into(),
            });
        } else if !self.provider.base_url.starts_with("http://")
            && !self.provider.base_url.starts_with("https://")
        {
            errors.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "provider.base_url".into(),
                message: format!(
                    "base_url must start with http:// or https:// (got '{}')",
                    self.provider.base_url
                ),
            });
        }

        if self.provider.site.is_empty() {
            errors.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "provider.site".into(),
                message: "site identifier must not be empty".into(),
            });
        }

        if self.provider.auth.key.is_some() {
            errors.push(ConfigError {
                severity: ConfigSeverity::Warning,
                field: "provider.auth.key".into(),
                message: "plaintext API key in config — prefer 'env' or the keychain fields"
                    .into(),
            });
        }

        if self.provider.timeout_ms == 0 {
            errors.push(ConfigError {
                severity: ConfigSeverity::Warning,
                field: "provider.timeout_ms".into(),
                message: "timeout disabled — requests may block indefinitely".into(),
            });
        }

        errors
    }
}
