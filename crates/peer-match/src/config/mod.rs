use std::env;
use std::fmt;
use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::matching::{MatchingConfig, RelatedMajors};

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

/// Top-level configuration for the matching service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub matching: MatchingConfig,
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
        let log_format = LogFormat::from_str(
            &env::var("APP_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string()),
        );

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig {
                log_level,
                format: log_format,
            },
            matching: load_matching_config()?,
        })
    }
}

fn load_matching_config() -> Result<MatchingConfig, ConfigError> {
    let mut matching = MatchingConfig::default();

    if let Some(raw) = non_empty_var("APP_MATCH_MIN_SCORE") {
        matching.ranking.min_score = raw
            .parse::<u8>()
            .ok()
            .filter(|score| *score <= 100)
            .ok_or(ConfigError::InvalidMatchSetting {
                key: "APP_MATCH_MIN_SCORE",
            })?;
    }

    if let Some(raw) = non_empty_var("APP_MATCH_LIMIT") {
        matching.ranking.max_results = raw
            .parse::<usize>()
            .ok()
            .filter(|limit| *limit > 0)
            .ok_or(ConfigError::InvalidMatchSetting {
                key: "APP_MATCH_LIMIT",
            })?;
    }

    if let Some(path) = non_empty_var("APP_RELATED_MAJORS") {
        matching.scoring.related_majors = load_related_majors(PathBuf::from(path))?;
    }

    Ok(matching)
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Read a related-majors table (`{"major": ["related", ...]}`) from disk.
pub fn load_related_majors(path: PathBuf) -> Result<RelatedMajors, ConfigError> {
    let raw = match fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(source) => return Err(ConfigError::RelatedMajorsIo { path, source }),
    };

    serde_json::from_str(&raw).map_err(|source| ConfigError::RelatedMajorsFormat { path, source })
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

/// Output layout of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Full,
}

impl LogFormat {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "full" | "pretty" => Self::Full,
            _ => Self::Compact,
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub format: LogFormat,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost {
        source: std::net::AddrParseError,
    },
    InvalidMatchSetting {
        key: &'static str,
    },
    RelatedMajorsIo {
        path: PathBuf,
        source: std::io::Error,
    },
    RelatedMajorsFormat {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidMatchSetting { key } => match *key {
                "APP_MATCH_MIN_SCORE" => write!(f, "{key} must be an integer between 0 and 100"),
                _ => write!(f, "{key} must be a positive integer"),
            },
            ConfigError::RelatedMajorsIo { path, .. } => {
                write!(f, "unable to read related majors from {}", path.display())
            }
            ConfigError::RelatedMajorsFormat { path, .. } => write!(
                f,
                "related majors file {} must be a JSON object of string arrays",
                path.display()
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidMatchSetting { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::RelatedMajorsIo { source, .. } => Some(source),
            ConfigError::RelatedMajorsFormat { source, .. } => Some(source),
        }
    }
}
