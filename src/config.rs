use std::env;

use chrono::{FixedOffset, Offset, Utc};

use crate::grouping::BATCH_LIMIT;

#[derive(Debug, Clone)]
pub struct Config {
    pub http_bind_addr: String,
    /// Offset used when turning date labels into bucket titles.
    pub utc_offset: FixedOffset,
    pub batch_limit: usize,
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("TIMELINE_UTC_OFFSET_MINUTES must be whole minutes between -1439 and 1439, got {0:?}")]
    InvalidUtcOffset(String),
    #[error("BATCH_LIMIT must be a positive integer, got {0:?}")]
    InvalidBatchLimit(String),
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_bind_addr: "127.0.0.1:8080".to_string(),
            utc_offset: Utc.fix(),
            batch_limit: BATCH_LIMIT,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let http_bind_addr = lookup("HTTP_BIND").unwrap_or(defaults.http_bind_addr);
        let utc_offset = match lookup("TIMELINE_UTC_OFFSET_MINUTES") {
            Some(raw) => parse_utc_offset(&raw)?,
            None => defaults.utc_offset,
        };
        let batch_limit = match lookup("BATCH_LIMIT") {
            Some(raw) => parse_batch_limit(&raw)?,
            None => defaults.batch_limit,
        };

        Ok(Self {
            http_bind_addr,
            utc_offset,
            batch_limit,
        })
    }
}

fn parse_utc_offset(raw: &str) -> Result<FixedOffset, ConfigError> {
    raw.trim()
        .parse::<i32>()
        .ok()
        .filter(|minutes| minutes.abs() < 1440)
        .and_then(|minutes| FixedOffset::east_opt(minutes * 60))
        .ok_or_else(|| ConfigError::InvalidUtcOffset(raw.to_string()))
}

fn parse_batch_limit(raw: &str) -> Result<usize, ConfigError> {
    match raw.trim().parse::<usize>() {
        Ok(0) | Err(_) => Err(ConfigError::InvalidBatchLimit(raw.to_string())),
        Ok(limit) => Ok(limit.min(BATCH_LIMIT)),
    }
}
