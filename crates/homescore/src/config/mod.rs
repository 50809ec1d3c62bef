use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::predictions::UserId;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub auth: AuthConfig,
    pub pricing: PricingConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let sessions = match env::var("APP_SESSION_TOKENS") {
            Ok(raw) => parse_session_tokens(&raw)?,
            Err(_) => Vec::new(),
        };

        let noise_seed = match env::var("APP_PRICING_SEED") {
            Ok(raw) if !raw.trim().is_empty() => Some(
                raw.trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidPricingSeed { value: raw.clone() })?,
            ),
            _ => None,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig {
                log_level,
                include_targets: environment != AppEnvironment::Production,
            },
            auth: AuthConfig { sessions },
            pricing: PricingConfig { noise_seed },
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub include_targets: bool,
}

/// Bearer tokens accepted by the static session authenticator.
#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
    pub sessions: Vec<(String, UserId)>,
}

/// Market-noise source selection for the house estimator.
#[derive(Debug, Clone, Copy, Default)]
pub struct PricingConfig {
    pub noise_seed: Option<u64>,
}

/// Parse `token=user` pairs separated by commas. Blank entries are skipped.
pub fn parse_session_tokens(raw: &str) -> Result<Vec<(String, UserId)>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (token, user) = entry
                .split_once('=')
                .ok_or_else(|| ConfigError::InvalidSessionTokens {
                    entry: entry.to_string(),
                })?;
            let (token, user) = (token.trim(), user.trim());
            if token.is_empty() || user.is_empty() {
                return Err(ConfigError::InvalidSessionTokens {
                    entry: entry.to_string(),
                });
            }
            Ok((token.to_string(), UserId(user.to_string())))
        })
        .collect()
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidSessionTokens { entry: String },
    InvalidPricingSeed { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidSessionTokens { entry } => write!(
                f,
                "APP_SESSION_TOKENS entries must look like token=user_id (found '{}')",
                entry
            ),
            ConfigError::InvalidPricingSeed { value } => {
                write!(f, "APP_PRICING_SEED must be a u64 (found '{}')", value)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidSessionTokens { .. }
            | ConfigError::InvalidPricingSeed { .. } => None,
        }
    }
}
