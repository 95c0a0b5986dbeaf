//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `daywindow.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values. `[[schedules]]` entries seed the in-memory
//! repository at boot.

use serde::Deserialize;

use daywindow_domain::error::DayWindowError;
use daywindow_domain::options::ScheduleOptions;
use daywindow_domain::schedule::Schedule;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Schedules created at boot.
    pub schedules: Vec<ScheduleConfig>,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// One schedule seeded from the config file.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleConfig {
    /// Human-readable name.
    pub name: String,
    /// Target device references (`family.identifier`).
    pub targets: Vec<String>,
    /// Initial options; missing fields use the defaults.
    #[serde(default)]
    pub options: ScheduleOptions,
}

impl ScheduleConfig {
    /// Build the validated domain schedule.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty name, empty targets, or a
    /// malformed target reference.
    pub fn into_schedule(self) -> Result<Schedule, DayWindowError> {
        Schedule::builder()
            .name(self.name)
            .targets(self.targets)
            .options(self.options)
            .build()
    }
}

impl Config {
    /// Load configuration from `daywindow.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("daywindow.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("DAYWINDOW_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("DAYWINDOW_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("DAYWINDOW_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Ok(val) = std::env::var("DAYWINDOW_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "daywindowd=info,daywindow=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert!(config.schedules.is_empty());
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = r#"
            [server]
            host = '127.0.0.1'
            port = 9090

            [logging]
            filter = 'debug'

            [[schedules]]
            name = 'Garden pump'
            targets = ['switch.pump']

            [schedules.options]
            start_time = '06:30:00'
            weekdays = ['mon', 'tue', 'wed', 'thu', 'fri']
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.logging.filter, "debug");
        assert_eq!(config.schedules.len(), 1);
        assert_eq!(config.schedules[0].name, "Garden pump");
        assert_eq!(config.schedules[0].options.start_time, "06:30:00");
        assert_eq!(config.schedules[0].options.weekdays.len(), 5);
    }

    #[test]
    fn should_default_schedule_options_when_omitted() {
        let toml = r"
            [[schedules]]
            name = 'Blinds'
            targets = ['cover.kitchen']
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.schedules[0].options.start_time, "06:00:00");
        assert!(config.schedules[0].options.enabled);
    }

    #[test]
    fn should_build_domain_schedule_from_entry() {
        let entry = ScheduleConfig {
            name: "Blinds".to_string(),
            targets: vec!["cover.kitchen".to_string()],
            options: ScheduleOptions::default(),
        };
        let schedule = entry.into_schedule().unwrap();
        assert_eq!(schedule.name, "Blinds");
    }

    #[test]
    fn should_reject_schedule_entry_with_bad_target() {
        let entry = ScheduleConfig {
            name: "Broken".to_string(),
            targets: vec!["pump".to_string()],
            options: ScheduleOptions::default(),
        };
        assert!(entry.into_schedule().is_err());
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn should_reject_zero_port() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_format_bind_addr() {
        let config = Config::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }
}
