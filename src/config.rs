/// Runtime configuration
///
/// Values come from environment variables, optionally seeded from a `.env`
/// file in the working directory:
///
/// | Variable                  | Default       |
/// |---------------------------|---------------|
/// | `LOG_LEVEL`               | `info`        |
/// | `LOG_FORMAT`              | `pretty`      |
/// | `SHORTEST_PATH_STRATEGY`  | `linear-scan` |
/// | `RECORD_STEPS`            | `false`       |
/// | `IMPORT_MAX_ERRORS`       | unlimited     |

use crate::algorithms::{ShortestPathOptions, ShortestPathStrategy};
use crate::tools::ImportOptions;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}' ({reason})")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            other => Err(format!("unknown log format '{}' (expected json or pretty)", other)),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Json => write!(f, "json"),
            LogFormat::Pretty => write!(f, "pretty"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `isochrone_graph=debug`
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlgorithmConfig {
    pub strategy: ShortestPathStrategy,
    pub record_steps: bool,
}

impl AlgorithmConfig {
    pub fn options(&self) -> ShortestPathOptions {
        ShortestPathOptions {
            strategy: self.strategy,
            record_steps: self.record_steps,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IoConfig {
    /// Cap on line errors kept while loading; `None` keeps all
    pub max_errors: Option<usize>,
}

impl IoConfig {
    pub fn import_options(&self) -> ImportOptions {
        ImportOptions {
            max_errors: self.max_errors,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub logging: LoggingConfig,
    pub algorithm: AlgorithmConfig,
    pub io: IoConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> ConfigResult<Self> {
        // Load .env file if it exists
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup; unset keys take defaults
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            logging: LoggingConfig {
                level: lookup("LOG_LEVEL").unwrap_or(defaults.logging.level),
                format: parse_var(&lookup, "LOG_FORMAT")?.unwrap_or(defaults.logging.format),
            },
            algorithm: AlgorithmConfig {
                strategy: parse_var(&lookup, "SHORTEST_PATH_STRATEGY")?
                    .unwrap_or(defaults.algorithm.strategy),
                record_steps: parse_var(&lookup, "RECORD_STEPS")?
                    .unwrap_or(defaults.algorithm.record_steps),
            },
            io: IoConfig {
                max_errors: parse_var(&lookup, "IMPORT_MAX_ERRORS")?.or(defaults.io.max_errors),
            },
        })
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> ConfigResult<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let Some(value) = lookup(key) else {
        return Ok(None);
    };

    let parsed = value.trim().parse::<T>();
    parsed.map(Some).map_err(|e| ConfigError::InvalidValue {
        key: key.to_string(),
        reason: e.to_string(),
        value,
    })
}

/// Install the global tracing subscriber
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.level));

    match config.format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .try_init()?;
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
                .try_init()?;
        }
    }

    Ok(())
}
