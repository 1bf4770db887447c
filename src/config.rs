//! Environment-driven configuration for the binary.
//!
//! | variable                      | effect                                   |
//! |-------------------------------|------------------------------------------|
//! | `STACK_TABLES_COLOR`          | `auto`, `always` or `never`              |
//! | `STACK_TABLES_RADIX`          | radix of unprefixed stack data (`hex`/`dec`) |
//! | `STACK_TABLES_WIDTHS`         | comma-separated widths accepted manually |
//! | `STACK_TABLES_LOG`            | JSON-lines log file path                 |
//! | `STACK_TABLES_LOG_LEVEL`      | minimum level written to the log         |
//! | `STACK_TABLES_LOG_MAX_BYTES`  | truncate the log past this size          |
//!
//! `NO_COLOR` is honoured by `ColorMode::Auto`.

use std::path::PathBuf;

use thiserror::Error;

use crate::driver::SessionConfig;
use crate::expression::{ExpressionConfig, Radix};
use crate::logging::{FileSink, LogLevel, Logger, LoggingResult};
use crate::render::{ColorMode, RendererSettings};

pub const DEFAULT_LOG_MAX_BYTES: u64 = 1 << 20;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value `{value}` for {key}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub expression: ExpressionConfig,
    pub renderer: RendererSettings,
    pub session: SessionConfig,
    pub log_path: Option<PathBuf>,
    pub log_level: LogLevel,
    pub log_max_bytes: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            expression: ExpressionConfig::default(),
            renderer: RendererSettings::default(),
            session: SessionConfig::default(),
            log_path: None,
            log_level: LogLevel::Info,
            log_max_bytes: DEFAULT_LOG_MAX_BYTES,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup("STACK_TABLES_COLOR") {
            let mode = ColorMode::from_name(&value).ok_or_else(|| invalid("STACK_TABLES_COLOR", &value))?;
            config.renderer = config.renderer.with_color(mode);
        }

        if let Some(value) = lookup("STACK_TABLES_RADIX") {
            let radix = Radix::from_name(&value).ok_or_else(|| invalid("STACK_TABLES_RADIX", &value))?;
            config.expression = config.expression.with_bare_radix(radix);
        }

        if let Some(value) = lookup("STACK_TABLES_WIDTHS") {
            let widths = value
                .split(',')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(|part| part.parse::<usize>().ok().filter(|w| *w > 0))
                .collect::<Option<Vec<_>>>()
                .ok_or_else(|| invalid("STACK_TABLES_WIDTHS", &value))?;
            config.session = config.session.with_allowed_widths(widths);
        }

        if let Some(value) = lookup("STACK_TABLES_LOG") {
            if !value.trim().is_empty() {
                config.log_path = Some(PathBuf::from(value));
            }
        }

        if let Some(value) = lookup("STACK_TABLES_LOG_LEVEL") {
            config.log_level =
                LogLevel::from_name(&value).ok_or_else(|| invalid("STACK_TABLES_LOG_LEVEL", &value))?;
        }

        if let Some(value) = lookup("STACK_TABLES_LOG_MAX_BYTES") {
            config.log_max_bytes = value
                .trim()
                .parse()
                .map_err(|_| invalid("STACK_TABLES_LOG_MAX_BYTES", &value))?;
        }

        Ok(config)
    }

    /// Logger writing to `log_path`, or a disabled logger when unset.
    pub fn logger(&self) -> LoggingResult<Logger> {
        match &self.log_path {
            Some(path) => Ok(Logger::new(FileSink::new(path, self.log_max_bytes)?)
                .with_min_level(self.log_level)),
            None => Ok(Logger::disabled()),
        }
    }
}

fn invalid(key: &'static str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    }
}
