use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required for security")]
    MissingSecret(&'static str),

    #[error("Invalid URL in {key}: {value}")]
    InvalidUrl { key: &'static str, value: String },

    #[error("{key} must be between 1 and {max}, got {value}")]
    OutOfRange { key: &'static str, value: u64, max: u64 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
    pub external: ExternalConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Staging,
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Staging => write!(f, "staging"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub enable_rate_limiting: bool,
    pub rate_limit_requests: u32,
    pub rate_limit_window_secs: u64,
    pub enable_query_sanitizer: bool,
    /// Key clients by the first `X-Forwarded-For` / `X-Real-IP` entry when present.
    pub trust_forwarded_for: bool,
    pub max_request_size_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalConfig {
    pub sleeper_api_url: Url,
}

const DEFAULT_DATABASE_URL: &str = "postgresql://localhost/sleepr?sslmode=disable";
const DEFAULT_SLEEPER_API_URL: &str = "https://api.sleeper.app/v1";

/// Upper bound for token lifetime: one year.
pub const MAX_JWT_EXPIRY_HOURS: u64 = 24 * 366;

fn default_cors_origins() -> Vec<String> {
    [
        "http://localhost:3000",
        "http://localhost:8080",
        "http://127.0.0.1:3000",
        "http://127.0.0.1:8080",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl AppConfig {
    /// Load from the process environment. Fails if `JWT_SECRET` is unset or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load from an arbitrary key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let environment = match get("ENVIRONMENT").or_else(|| get("APP_ENV")).as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            Some("staging") | Some("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        let jwt_secret = get("JWT_SECRET").ok_or(ConfigError::MissingSecret("JWT_SECRET"))?;

        let sleeper_raw = get("SLEEPER_API_BASE_URL").unwrap_or_else(|| DEFAULT_SLEEPER_API_URL.to_string());
        let sleeper_api_url = Url::parse(&sleeper_raw).map_err(|_| ConfigError::InvalidUrl {
            key: "SLEEPER_API_BASE_URL",
            value: sleeper_raw.clone(),
        })?;

        // Set defaults based on environment, then override with specific env vars
        let mut config = match environment {
            Environment::Production => Self::production(jwt_secret, sleeper_api_url),
            Environment::Staging => Self::staging(jwt_secret, sleeper_api_url),
            Environment::Development => Self::development(jwt_secret, sleeper_api_url),
        };
        config.apply_overrides(&get);
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let hours = self.security.jwt_expiry_hours;
        if hours == 0 || hours > MAX_JWT_EXPIRY_HOURS {
            return Err(ConfigError::OutOfRange {
                key: "SECURITY_JWT_EXPIRY_HOURS",
                value: hours,
                max: MAX_JWT_EXPIRY_HOURS,
            });
        }
        Ok(())
    }

    fn apply_overrides<F>(&mut self, get: &F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = get("PORT") {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }

        // Database overrides
        if let Some(v) = get("DATABASE_URL") {
            self.database.url = v;
        }
        if let Some(v) = get("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Some(v) = get("DATABASE_CONNECT_TIMEOUT_SECS") {
            self.database.connect_timeout_secs = v.parse().unwrap_or(self.database.connect_timeout_secs);
        }

        // API overrides
        if let Some(v) = get("API_ENABLE_RATE_LIMITING") {
            self.api.enable_rate_limiting = v.parse().unwrap_or(self.api.enable_rate_limiting);
        }
        if let Some(v) = get("API_RATE_LIMIT_REQUESTS") {
            self.api.rate_limit_requests = v.parse().unwrap_or(self.api.rate_limit_requests);
        }
        if let Some(v) = get("API_RATE_LIMIT_WINDOW_SECS") {
            self.api.rate_limit_window_secs = v.parse().unwrap_or(self.api.rate_limit_window_secs);
        }
        if let Some(v) = get("API_ENABLE_QUERY_SANITIZER") {
            self.api.enable_query_sanitizer = v.parse().unwrap_or(self.api.enable_query_sanitizer);
        }
        if let Some(v) = get("API_TRUST_FORWARDED_FOR") {
            self.api.trust_forwarded_for = v.parse().unwrap_or(self.api.trust_forwarded_for);
        }
        if let Some(v) = get("API_MAX_REQUEST_SIZE_BYTES") {
            self.api.max_request_size_bytes = v.parse().unwrap_or(self.api.max_request_size_bytes);
        }

        // Security overrides
        if let Some(v) = get("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        if let Some(v) = get("SECURITY_JWT_EXPIRY_HOURS") {
            self.security.jwt_expiry_hours = v.parse().unwrap_or(self.security.jwt_expiry_hours);
        }
    }

    fn development(jwt_secret: String, sleeper_api_url: Url) -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig { port: 8080 },
            database: DatabaseConfig {
                url: DEFAULT_DATABASE_URL.to_string(),
                max_connections: 10,
                connect_timeout_secs: 30,
            },
            api: ApiConfig {
                enable_rate_limiting: true,
                rate_limit_requests: 100,
                rate_limit_window_secs: 60,
                enable_query_sanitizer: true,
                // Opt in per deployment; clients can forge these headers.
                trust_forwarded_for: false,
                max_request_size_bytes: 1024 * 1024, // 1MB
            },
            security: SecurityConfig {
                jwt_secret,
                jwt_expiry_hours: 24 * 7, // 1 week
                cors_origins: default_cors_origins(),
            },
            external: ExternalConfig { sleeper_api_url },
        }
    }

    fn staging(jwt_secret: String, sleeper_api_url: Url) -> Self {
        Self {
            environment: Environment::Staging,
            database: DatabaseConfig {
                url: DEFAULT_DATABASE_URL.to_string(),
                max_connections: 20,
                connect_timeout_secs: 10,
            },
            ..Self::development(jwt_secret, sleeper_api_url)
        }
    }

    fn production(jwt_secret: String, sleeper_api_url: Url) -> Self {
        let mut config = Self::development(jwt_secret, sleeper_api_url);
        config.environment = Environment::Production;
        config.database.max_connections = 50;
        config.database.connect_timeout_secs = 5;
        config
    }
}
