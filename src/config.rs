use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

const DEFAULT_BASE_URL: &str = "https://api.razorpay.com/v1";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_ORDERS_PATH: &str = "/tmp/orders.json";
const DEFAULT_CURRENCY: &str = "INR";
const DEFAULT_VENTURE: &str = "CodeZ";
const DEFAULT_GATEWAY_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required setting {0}")]
    Missing(&'static str),
    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Credentials and endpoint for the payment gateway.
#[derive(Clone)]
pub struct GatewayConfig {
    pub key_id: String,
    pub key_secret: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("key_id", &self.key_id)
            .field("key_secret", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Process configuration, read once at startup and passed down explicitly.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub orders_path: PathBuf,
    pub currency: String,
    pub venture: String,
    pub catalog_path: Option<PathBuf>,
    pub static_dir: Option<PathBuf>,
    pub gateway: GatewayConfig,
}

impl AppConfig {
    /// Reads the process environment, after loading `.env` if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let bind_addr = get("CHECKOUT_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                key: "CHECKOUT_BIND_ADDR",
                reason: e.to_string(),
            })?;

        let timeout_secs = match get("CHECKOUT_GATEWAY_TIMEOUT_SECS") {
            Some(raw) => raw.parse::<u64>().map_err(|e| ConfigError::Invalid {
                key: "CHECKOUT_GATEWAY_TIMEOUT_SECS",
                reason: e.to_string(),
            })?,
            None => DEFAULT_GATEWAY_TIMEOUT_SECS,
        };

        let currency = get("CHECKOUT_CURRENCY").unwrap_or_else(|| DEFAULT_CURRENCY.to_string());
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(ConfigError::Invalid {
                key: "CHECKOUT_CURRENCY",
                reason: format!("{currency:?} is not an ISO 4217 code"),
            });
        }

        Ok(Self {
            bind_addr,
            orders_path: get("CHECKOUT_ORDERS_PATH")
                .unwrap_or_else(|| DEFAULT_ORDERS_PATH.to_string())
                .into(),
            currency,
            venture: get("CHECKOUT_VENTURE").unwrap_or_else(|| DEFAULT_VENTURE.to_string()),
            catalog_path: get("CHECKOUT_CATALOG_PATH").map(PathBuf::from),
            static_dir: get("CHECKOUT_STATIC_DIR").map(PathBuf::from),
            gateway: GatewayConfig {
                key_id: required("RAZORPAY_KEY_ID")?,
                key_secret: required("RAZORPAY_KEY_SECRET")?,
                base_url: get("RAZORPAY_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
                timeout: Duration::from_secs(timeout_secs),
            },
        })
    }
}
