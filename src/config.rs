/*
 * Responsibility
 * - Environment/config loading (DATABASE_URL, REDIS_URL, session secret, timeouts)
 * - Validation of required values (startup fails before bootstrap if missing)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
    pub redis_url: String,

    /// Shared secret used to sign and verify session tokens.
    pub session_secret: String,

    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    pub db_max_connections: u32,

    /// Cadence of connection attempts during startup.
    pub reconnect_interval: Duration,
    /// Absolute give-up deadline per dependency, measured from bootstrap entry.
    pub reconnect_timeout: Duration,

    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        let redis_url =
            std::env::var("REDIS_URL").map_err(|_| ConfigError::Missing("REDIS_URL"))?;

        let session_secret =
            std::env::var("SESSION_SECRET").map_err(|_| ConfigError::Missing("SESSION_SECRET"))?;
        if session_secret.trim().is_empty() {
            return Err(ConfigError::Invalid("SESSION_SECRET"));
        }

        let app_env = AppEnv::from_env();

        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let db_max_connections = std::env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(5);

        let reconnect_interval = duration_from_env("RECONNECT_INTERVAL_SECONDS", 3)?;
        let reconnect_timeout = duration_from_env("RECONNECT_TIMEOUT_SECONDS", 30)?;
        let request_timeout = duration_from_env("REQUEST_TIMEOUT_SECONDS", 30)?;

        Ok(Self {
            addr,
            database_url,
            redis_url,
            session_secret,
            app_env,
            cors_allowed_origins,
            db_max_connections,
            reconnect_interval,
            reconnect_timeout,
            request_timeout,
        })
    }
}

fn duration_from_env(key: &'static str, default_secs: u64) -> Result<Duration, ConfigError> {
    match std::env::var(key) {
        Err(_) => Ok(Duration::from_secs(default_secs)),
        Ok(raw) => {
            let secs: u64 = raw.parse().map_err(|_| ConfigError::Invalid(key))?;
            if secs == 0 {
                return Err(ConfigError::Invalid(key));
            }
            Ok(Duration::from_secs(secs))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_default_applies_when_unset() {
        let d = duration_from_env("RECONNECT_TEST_UNSET", 3).unwrap();
        assert_eq!(d, Duration::from_secs(3));
    }

    #[test]
    fn zero_duration_is_rejected() {
        // SAFETY: test-only env mutation, key is unique to this test.
        unsafe { std::env::set_var("RECONNECT_TEST_ZERO", "0") };
        let res = duration_from_env("RECONNECT_TEST_ZERO", 3);
        assert!(matches!(res, Err(ConfigError::Invalid(_))));
    }
}
