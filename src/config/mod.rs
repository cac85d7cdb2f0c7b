use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::ofac::OFAC_API_BASE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(anyhow::anyhow!("unknown log format {other:?}, expected text or json")),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub log_format: LogFormat,

    // Sanctions provider
    pub ofac_api_key: String,
    pub ofac_api_url: String,
    pub upstream_timeout: Duration,

    // Throttling of the screening endpoint
    pub rate_limit_capacity: usize,
    pub rate_limit_window: Duration,
    pub rate_limit_max_clients: usize,
    pub rate_limit_sweep_interval: Duration,
    pub trust_forwarded_for: bool,
}

// Hand-written so the API key never reaches the logs.
impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("log_format", &self.log_format)
            .field("ofac_api_key", &"<redacted>")
            .field("ofac_api_url", &self.ofac_api_url)
            .field("upstream_timeout", &self.upstream_timeout)
            .field("rate_limit_capacity", &self.rate_limit_capacity)
            .field("rate_limit_window", &self.rate_limit_window)
            .field("rate_limit_max_clients", &self.rate_limit_max_clients)
            .field("rate_limit_sweep_interval", &self.rate_limit_sweep_interval)
            .field("trust_forwarded_for", &self.trust_forwarded_for)
            .finish()
    }
}

impl Default for AppConfig {
    /// Local defaults with an empty API key.
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8080,
            log_format: LogFormat::Text,
            ofac_api_key: String::new(),
            ofac_api_url: OFAC_API_BASE.into(),
            upstream_timeout: Duration::from_secs(10),
            rate_limit_capacity: 10,
            rate_limit_window: Duration::from_secs(60),
            rate_limit_max_clients: 10_000,
            rate_limit_sweep_interval: Duration::from_secs(60),
            trust_forwarded_for: false,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: parse_or("PORT", defaults.port)?,
            log_format: parse_or("LOG_FORMAT", defaults.log_format)?,

            ofac_api_key: env::var("OFAC_API_KEY")
                .map_err(|_| anyhow::anyhow!("OFAC_API_KEY must be set"))?,
            ofac_api_url: env::var("OFAC_API_URL").unwrap_or(defaults.ofac_api_url),
            upstream_timeout: nonzero_secs(
                "UPSTREAM_TIMEOUT_SECS",
                parse_or("UPSTREAM_TIMEOUT_SECS", 10)?,
            )?,

            rate_limit_capacity: parse_or("RATE_LIMIT_CAPACITY", defaults.rate_limit_capacity)?,
            rate_limit_window: Duration::from_secs(parse_or("RATE_LIMIT_WINDOW_SECS", 60)?),
            rate_limit_max_clients: parse_or(
                "RATE_LIMIT_MAX_CLIENTS",
                defaults.rate_limit_max_clients,
            )?,
            rate_limit_sweep_interval: Duration::from_secs(parse_or("RATE_LIMIT_SWEEP_SECS", 60)?),
            trust_forwarded_for: match env::var("TRUST_FORWARDED_FOR") {
                Ok(raw) => parse_flag("TRUST_FORWARDED_FOR", &raw)?,
                Err(_) => defaults.trust_forwarded_for,
            },
        })
    }
}

/// Parse `key` if set, otherwise fall back. A set but malformed value is an error.
fn parse_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{key} is invalid ({raw:?}): {e}")),
        Err(_) => Ok(default),
    }
}

/// Whole seconds that must be positive.
fn nonzero_secs(key: &str, secs: u64) -> anyhow::Result<Duration> {
    if secs == 0 {
        anyhow::bail!("{key} must be greater than zero");
    }
    Ok(Duration::from_secs(secs))
}

fn parse_flag(key: &str, raw: &str) -> anyhow::Result<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(anyhow::anyhow!("{key} is invalid ({raw:?}): expected true or false")),
    }
}
