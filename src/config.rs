//! Service configuration from the environment

use std::time::Duration;
use thiserror::Error;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_RESULTS_URL: &str = "http://localhost:80/resultados";
const DEFAULT_REPORT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a number, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
}

/// Runtime configuration for the quiz service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizConfig {
    pub port: u16,
    /// Where finished games are posted
    pub results_url: String,
    pub report_timeout: Duration,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            results_url: DEFAULT_RESULTS_URL.to_string(),
            report_timeout: Duration::from_secs(DEFAULT_REPORT_TIMEOUT_SECS),
        }
    }
}

impl QuizConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from any variable lookup; unset variables take their defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = parse_var(&lookup, "QUIZ_PORT")?.unwrap_or(defaults.port);
        let results_url = lookup("QUIZ_RESULTS_URL").unwrap_or(defaults.results_url);
        let report_timeout = parse_var::<u64>(&lookup, "QUIZ_REPORT_TIMEOUT_SECS")?
            .map_or(defaults.report_timeout, Duration::from_secs);

        Ok(Self {
            port,
            results_url,
            report_timeout,
        })
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError> {
    lookup(var)
        .map(|value| {
            value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidNumber { var, value })
        })
        .transpose()
}
