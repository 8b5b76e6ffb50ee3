use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::CourierError;

/// Top-level Courier configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub courier: CourierConfig,
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub polling: PollingConfig,
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourierConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for CourierConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Bot API client settings. Immutable once a client is built from it.
#[derive(Clone, Serialize, Deserialize)]
pub struct BotConfig {
    #[serde(default)]
    pub token: String,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Report every response to the configured error sink.
    #[serde(default = "default_true")]
    pub log_errors: bool,
    /// Append failed responses to this file. Empty = tracing sink only.
    #[serde(default)]
    pub error_log_path: String,
    /// Skip TLS certificate verification. Only for broken corporate proxies.
    #[serde(default)]
    pub danger_accept_invalid_certs: bool,
    /// Client-side request timeout in seconds (0 = transport default).
    /// Must exceed the long-poll hold when set.
    #[serde(default)]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub proxy: Option<ProxyConfig>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            api_base_url: default_api_base_url(),
            log_errors: true,
            error_log_path: String::new(),
            danger_accept_invalid_certs: false,
            request_timeout_secs: 0,
            proxy: None,
        }
    }
}

// Hand-written so the token never ends up in logs.
impl std::fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotConfig")
            .field("token", &"<redacted>")
            .field("api_base_url", &self.api_base_url)
            .field("log_errors", &self.log_errors)
            .field("error_log_path", &self.error_log_path)
            .field(
                "danger_accept_invalid_certs",
                &self.danger_accept_invalid_certs,
            )
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("proxy", &self.proxy)
            .finish()
    }
}

impl BotConfig {
    /// Config with the given token and defaults everywhere else.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            ..Self::default()
        }
    }

    /// Reject tokens that cannot possibly be valid.
    ///
    /// A bot token looks like `<numeric bot id>:<secret>`.
    pub fn validate(&self) -> Result<(), CourierError> {
        let token = self.token.trim();
        if token.is_empty() {
            return Err(CourierError::Config(
                "bot token is empty. Set [bot].token or TELEGRAM_BOT_TOKEN".into(),
            ));
        }
        let (id, secret) = token
            .split_once(':')
            .ok_or_else(|| CourierError::Config("bot token must look like <id>:<secret>".into()))?;
        if id.is_empty() || !id.chars().all(|c| c.is_ascii_digit()) {
            return Err(CourierError::Config(
                "bot token id part must be numeric".into(),
            ));
        }
        if secret.is_empty() || secret.chars().any(char::is_whitespace) {
            return Err(CourierError::Config(
                "bot token secret part is empty or contains whitespace".into(),
            ));
        }
        if self.api_base_url.trim().is_empty() {
            return Err(CourierError::Config("api_base_url is empty".into()));
        }
        if let Some(proxy) = &self.proxy {
            proxy.validate()?;
        }
        Ok(())
    }
}

/// Proxy scheme, mirrors the `type` key of `[bot.proxy]`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProxyType {
    #[default]
    Http,
    Https,
    Socks5,
    /// SOCKS5 with hostname resolution on the proxy side.
    Socks5h,
}

impl ProxyType {
    pub fn scheme(&self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
            Self::Socks5 => "socks5",
            Self::Socks5h => "socks5h",
        }
    }
}

/// Optional proxy applied to every request. Unset fields keep transport defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyConfig {
    /// Proxy host, with or without a scheme.
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default, rename = "type")]
    pub proxy_type: Option<ProxyType>,
    /// `user:password`.
    #[serde(default)]
    pub auth: Option<String>,
}

impl ProxyConfig {
    pub fn is_empty(&self) -> bool {
        self.url.is_none() && self.port.is_none() && self.proxy_type.is_none() && self.auth.is_none()
    }

    fn validate(&self) -> Result<(), CourierError> {
        if !self.is_empty() && self.url.as_deref().map_or(true, |u| u.trim().is_empty()) {
            return Err(CourierError::Config(
                "proxy settings given without [bot.proxy].url".into(),
            ));
        }
        Ok(())
    }

    /// Full proxy URL, e.g. `socks5://127.0.0.1:1080`. `None` without a host.
    ///
    /// An explicit `type` overrides any scheme written into `url`.
    pub fn proxy_url(&self) -> Option<String> {
        let raw = self.url.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }

        let (written_scheme, host) = match raw.split_once("://") {
            Some((scheme, rest)) => (Some(scheme), rest.trim_end_matches('/')),
            None => (None, raw.trim_end_matches('/')),
        };
        let scheme = match (self.proxy_type, written_scheme) {
            (Some(t), _) => t.scheme(),
            (None, Some(s)) => s,
            (None, None) => ProxyType::default().scheme(),
        };

        let has_port = host
            .rsplit_once(':')
            .is_some_and(|(_, p)| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
            && !host.ends_with(']');

        match self.port {
            Some(port) if !has_port => Some(format!("{scheme}://{host}:{port}")),
            _ => Some(format!("{scheme}://{host}")),
        }
    }

    /// `(user, password)` split from `auth`.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let auth = self.auth.as_deref()?;
        if auth.is_empty() {
            return None;
        }
        Some(auth.split_once(':').unwrap_or((auth, "")))
    }
}

/// Defaults for the `poll` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    #[serde(default = "default_poll_limit")]
    pub limit: u32,
    /// Server-side long-poll hold in seconds.
    #[serde(default)]
    pub timeout: u32,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            limit: default_poll_limit(),
            timeout: 0,
        }
    }
}

// --- Default value functions ---

fn default_log_level() -> String {
    "info".to_string()
}
fn default_api_base_url() -> String {
    "https://api.telegram.org".to_string()
}
fn default_true() -> bool {
    true
}
fn default_poll_limit() -> u32 {
    100
}

/// Load configuration from a TOML file.
///
/// Falls back to defaults if the file does not exist.
pub fn load(path: &str) -> Result<Config, CourierError> {
    let path = Path::new(path);
    if !path.exists() {
        tracing::info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| CourierError::Config(format!("failed to read {}: {}", path.display(), e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| CourierError::Config(format!("failed to parse config: {}", e)))?;

    Ok(config)
}
