use crate::forecast::{LinearTrendForecaster, DEFAULT_FORECAST_PERIODS, MAX_FORECAST_PERIODS};
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

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
    pub reporting: ReportingConfig,
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

        let leads_csv = env::var("APP_LEADS_CSV")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);
        let forecast_periods = periods_from_env("APP_FORECAST_PERIODS", DEFAULT_FORECAST_PERIODS)?;
        let max_forecast_periods =
            periods_from_env("APP_MAX_FORECAST_PERIODS", MAX_FORECAST_PERIODS)?;
        if forecast_periods > max_forecast_periods {
            return Err(ConfigError::InvalidForecastPeriods);
        }

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            reporting: ReportingConfig {
                leads_csv,
                forecast_periods,
                max_forecast_periods,
            },
        })
    }
}

fn periods_from_env(key: &str, default: usize) -> Result<usize, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<usize>()
            .map_err(|_| ConfigError::InvalidForecastPeriods),
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

/// Defaults for the lead reports.
#[derive(Debug, Clone)]
pub struct ReportingConfig {
    /// Lead sheet used when a command does not name one.
    pub leads_csv: Option<PathBuf>,
    pub forecast_periods: usize,
    /// Longest horizon a caller may request.
    pub max_forecast_periods: usize,
}

impl ReportingConfig {
    /// Trend forecaster bounded by the configured horizon limit.
    pub fn forecaster(&self) -> LinearTrendForecaster {
        LinearTrendForecaster::with_max_periods(self.max_forecast_periods)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidForecastPeriods,
    MissingLeadSheet,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidForecastPeriods => {
                write!(
                    f,
                    "APP_FORECAST_PERIODS and APP_MAX_FORECAST_PERIODS must be non-negative integers, with the default horizon within the maximum"
                )
            }
            ConfigError::MissingLeadSheet => {
                write!(f, "no lead sheet given: pass --csv or set APP_LEADS_CSV")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidForecastPeriods
            | ConfigError::MissingLeadSheet => None,
        }
    }
}
