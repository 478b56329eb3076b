//! Event Tempo configuration loading and validation.
//!
//! This crate provides:
//! - Typed structs for the message-stream and analysis settings
//! - Resolution from environment variables (CLI flags override in the
//!   binary, environment fills the gaps, builtin defaults last)
//! - Semantic validation with actionable messages

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable names recognized by [`Config::from_env`].
pub mod env_vars {
    pub const MQTT_HOST: &str = "TEMPO_MQTT_HOST";
    pub const MQTT_PORT: &str = "TEMPO_MQTT_PORT";
    pub const MQTT_USER: &str = "TEMPO_MQTT_USER";
    pub const MQTT_PASS: &str = "TEMPO_MQTT_PASS";
    pub const MQTT_TOPIC: &str = "TEMPO_MQTT_TOPIC";
    pub const EVENT_LOG: &str = "TEMPO_EVENT_LOG";
    pub const MIN_SAMPLE_SIZE: &str = "TEMPO_MIN_SAMPLE_SIZE";
    pub const MIN_SAMPLE_MODE: &str = "TEMPO_MIN_SAMPLE_MODE";
    pub const MIN_BINS: &str = "TEMPO_MIN_BINS";
}

/// Configuration errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {name}: {reason}")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("invalid configuration: {0}")]
    Semantic(String),
}

/// How a below-threshold sample size is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MinSampleMode {
    /// Log a warning and continue; fit results are flagged as unstable.
    #[default]
    Warn,
    /// Abort the run with `InsufficientData`.
    Fail,
}

impl std::str::FromStr for MinSampleMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "warn" => Ok(MinSampleMode::Warn),
            "fail" => Ok(MinSampleMode::Fail),
            other => Err(format!("expected 'warn' or 'fail', got '{other}'")),
        }
    }
}

/// Connection settings for the message stream.
///
/// The subscriber itself lives outside this workspace; these settings are
/// resolved here so the ingestion collaborator and the analysis CLI share
/// one configuration surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamConfig {
    /// Broker hostname.
    pub host: String,
    /// Broker port.
    pub port: u16,
    /// Username for broker authentication.
    pub username: String,
    /// Password for broker authentication.
    pub password: String,
    /// Topic filter the subscriber listens on.
    pub topic: String,
}

impl Default for StreamConfig {
    fn default() -> Self {
        StreamConfig {
            host: "localhost".to_string(),
            port: 1883,
            username: "admin".to_string(),
            password: "admin".to_string(),
            topic: "test".to_string(),
        }
    }
}

/// Settings for the analysis pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Path of the JSONL event log.
    pub event_log: PathBuf,

    /// Minimum number of interarrival observations required for a
    /// statistically meaningful fit.
    pub min_sample_size: usize,

    /// Enforcement mode for `min_sample_size`.
    pub min_sample_mode: MinSampleMode,

    /// Floor for the Freedman-Diaconis bin count (also the fallback when
    /// the sample has zero interquartile range).
    pub min_bins: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            event_log: PathBuf::from("events.jsonl"),
            min_sample_size: 100,
            min_sample_mode: MinSampleMode::Warn,
            min_bins: 10,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    pub stream: StreamConfig,
    pub analysis: AnalysisConfig,
}

impl Config {
    /// Resolve configuration from the environment, falling back to builtin
    /// defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut cfg = Config::default();

        if let Ok(host) = std::env::var(env_vars::MQTT_HOST) {
            cfg.stream.host = host;
        }
        if let Ok(port) = std::env::var(env_vars::MQTT_PORT) {
            cfg.stream.port = parse_env(env_vars::MQTT_PORT, &port)?;
        }
        if let Ok(user) = std::env::var(env_vars::MQTT_USER) {
            cfg.stream.username = user;
        }
        if let Ok(pass) = std::env::var(env_vars::MQTT_PASS) {
            cfg.stream.password = pass;
        }
        if let Ok(topic) = std::env::var(env_vars::MQTT_TOPIC) {
            cfg.stream.topic = topic;
        }
        if let Ok(path) = std::env::var(env_vars::EVENT_LOG) {
            cfg.analysis.event_log = PathBuf::from(path);
        }
        if let Ok(min) = std::env::var(env_vars::MIN_SAMPLE_SIZE) {
            cfg.analysis.min_sample_size = parse_env(env_vars::MIN_SAMPLE_SIZE, &min)?;
        }
        if let Ok(mode) = std::env::var(env_vars::MIN_SAMPLE_MODE) {
            cfg.analysis.min_sample_mode = parse_env(env_vars::MIN_SAMPLE_MODE, &mode)?;
        }
        if let Ok(bins) = std::env::var(env_vars::MIN_BINS) {
            cfg.analysis.min_bins = parse_env(env_vars::MIN_BINS, &bins)?;
        }

        cfg.validate()?;
        Ok(cfg)
    }

    /// Semantic validation of resolved values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stream.host.is_empty() {
            return Err(ConfigError::Semantic("stream host must not be empty".into()));
        }
        if self.stream.topic.is_empty() {
            return Err(ConfigError::Semantic(
                "topic filter must not be empty".into(),
            ));
        }
        if self.analysis.min_sample_size < 2 {
            return Err(ConfigError::Semantic(
                "min_sample_size must be at least 2 (one interarrival gap)".into(),
            ));
        }
        if self.analysis.min_bins == 0 {
            return Err(ConfigError::Semantic("min_bins must be at least 1".into()));
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(name: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    raw.parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        name,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let cfg = Config::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.stream.port, 1883);
        assert_eq!(cfg.analysis.min_bins, 10);
        assert_eq!(cfg.analysis.min_sample_mode, MinSampleMode::Warn);
    }

    #[test]
    fn rejects_degenerate_minimums() {
        let mut cfg = Config::default();
        cfg.analysis.min_sample_size = 1;
        assert!(cfg.validate().is_err());

        let mut cfg = Config::default();
        cfg.analysis.min_bins = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_empty_topic() {
        let mut cfg = Config::default();
        cfg.stream.topic.clear();
        assert!(matches!(cfg.validate(), Err(ConfigError::Semantic(_))));
    }

    #[test]
    fn min_sample_mode_parses_case_insensitively() {
        assert_eq!("warn".parse(), Ok(MinSampleMode::Warn));
        assert_eq!("Fail".parse(), Ok(MinSampleMode::Fail));
        assert!("abort".parse::<MinSampleMode>().is_err());
    }

    #[test]
    fn min_sample_mode_env_value_maps_through_parse_env() {
        let mode: MinSampleMode = parse_env(env_vars::MIN_SAMPLE_MODE, "fail").unwrap();
        assert_eq!(mode, MinSampleMode::Fail);

        let err = parse_env::<MinSampleMode>(env_vars::MIN_SAMPLE_MODE, "maybe").unwrap_err();
        assert!(err.to_string().contains("TEMPO_MIN_SAMPLE_MODE"));
    }

    #[test]
    fn min_bins_env_value_maps_through_parse_env() {
        let bins: usize = parse_env(env_vars::MIN_BINS, "25").unwrap();
        assert_eq!(bins, 25);
        assert!(parse_env::<usize>(env_vars::MIN_BINS, "-3").is_err());
    }

    #[test]
    fn parse_env_reports_name_and_value() {
        let err = parse_env::<u16>(env_vars::MQTT_PORT, "not-a-port").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("TEMPO_MQTT_PORT"));
        assert!(msg.contains("not-a-port"));
    }
}
