use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub freshdesk: FreshdeskConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    5000
}

/// Freshdesk upstream configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FreshdeskConfig {
    /// API key, sent as the Basic auth user with "x" as password.
    #[serde(default)]
    pub api_key: String,
    /// Account subdomain (e.g. "acme" for https://acme.freshdesk.com).
    #[serde(default = "default_domain")]
    pub domain: String,
    /// Overrides the URL derived from `domain`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Tickets requested per page (Freshdesk caps this at 100).
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    /// Timeout applied to every page request, in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
    /// Upper bound on pages walked by a single aggregation.
    ///
    /// Page `max_pages + 1` is never requested, so an account whose tickets
    /// fill exactly `max_pages` full pages also fails with
    /// `PageLimitExceeded`. Keep it above the expected page count.
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,
}

impl FreshdeskConfig {
    /// Base URL the client talks to, without trailing slash.
    pub fn resolved_base_url(&self) -> String {
        match &self.base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("https://{}.freshdesk.com", self.domain),
        }
    }
}

impl Default for FreshdeskConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            domain: default_domain(),
            base_url: None,
            per_page: default_per_page(),
            timeout_secs: default_timeout(),
            max_pages: default_max_pages(),
        }
    }
}

fn default_domain() -> String {
    "suportetryvia".to_string()
}

fn default_per_page() -> u32 {
    100
}

fn default_timeout() -> u32 {
    30
}

fn default_max_pages() -> u32 {
    1000
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub freshdesk: SanitizedFreshdeskConfig,
    pub server: ServerConfig,
}

/// Sanitized Freshdesk config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedFreshdeskConfig {
    pub domain: String,
    pub base_url: String,
    pub api_key_configured: bool,
    pub per_page: u32,
    pub timeout_secs: u32,
    pub max_pages: u32,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        let fd = &config.freshdesk;
        Self {
            freshdesk: SanitizedFreshdeskConfig {
                domain: fd.domain.clone(),
                base_url: fd.resolved_base_url(),
                api_key_configured: !fd.api_key.is_empty(),
                per_page: fd.per_page,
                timeout_secs: fd.timeout_secs,
                max_pages: fd.max_pages,
            },
            server: config.server.clone(),
        }
    }
}
