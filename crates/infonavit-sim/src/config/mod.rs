use crate::simulator::PropertyType;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

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
    pub simulator: SimulatorConfig,
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

        let property_type = match env::var("APP_SEARCH_PROPERTY_TYPE") {
            Ok(raw) => PropertyType::parse(&raw)
                .ok_or(ConfigError::InvalidPropertyType { value: raw })?,
            Err(_) => PropertyType::default(),
        };

        let session_capacity = parse_session_limit("APP_SESSION_CAPACITY", 10_000)?;
        let session_idle_minutes = parse_session_limit("APP_SESSION_IDLE_MINUTES", 30)?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            simulator: SimulatorConfig {
                default_property_type: property_type,
                session_capacity,
                session_idle_minutes,
            },
        })
    }
}

fn parse_session_limit<T>(name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .ok()
            .filter(|value| *value > T::default())
            .ok_or(ConfigError::InvalidSessionLimit { name }),
        Err(_) => Ok(default),
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
}

/// Simulator defaults applied by the service layer.
#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    pub default_property_type: PropertyType,
    /// Live sessions kept before new ones are refused.
    pub session_capacity: usize,
    /// Sessions untouched for this long are evicted to make room.
    pub session_idle_minutes: u32,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidPropertyType { value: String },
    InvalidSessionLimit { name: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidPropertyType { value } => write!(
                f,
                "APP_SEARCH_PROPERTY_TYPE must be house, apartment, land or commercial (found '{value}')"
            ),
            ConfigError::InvalidSessionLimit { name } => {
                write!(f, "{name} must be a positive whole number")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPropertyType { .. } => None,
            ConfigError::InvalidSessionLimit { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_HOST");
        env::remove_var("APP_PORT");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("APP_SEARCH_PROPERTY_TYPE");
        env::remove_var("APP_SESSION_CAPACITY");
        env::remove_var("APP_SESSION_IDLE_MINUTES");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.simulator.default_property_type, PropertyType::House);
        assert_eq!(config.simulator.session_capacity, 10_000);
        assert_eq!(config.simulator.session_idle_minutes, 30);
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn rejects_invalid_port() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_PORT", "not-a-port");
        let err = AppConfig::load().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort));
        reset_env();
    }

    #[test]
    fn search_property_type_can_be_overridden() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_SEARCH_PROPERTY_TYPE", "departamento");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(
            config.simulator.default_property_type,
            PropertyType::Apartment
        );

        env::set_var("APP_SEARCH_PROPERTY_TYPE", "castle");
        let err = AppConfig::load().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPropertyType { .. }));
        reset_env();
    }

    #[test]
    fn session_limits_must_be_positive() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_SESSION_CAPACITY", "250");
        env::set_var("APP_SESSION_IDLE_MINUTES", "5");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.simulator.session_capacity, 250);
        assert_eq!(config.simulator.session_idle_minutes, 5);

        env::set_var("APP_SESSION_IDLE_MINUTES", "0");
        let err = AppConfig::load().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidSessionLimit {
                name: "APP_SESSION_IDLE_MINUTES"
            }
        ));
        reset_env();
    }
}
