//! Command-line configuration for the bot.

use anyhow::{anyhow, Result};
use clap::Parser;
use std::time::Duration;
use tracing::level_filters::LevelFilter;

/// Quantum Reversi player speaking the match protocol on stdin/stdout.
#[derive(Parser, Debug, Clone)]
#[command(name = "bot")]
#[command(about = "Quantum Reversi match bot")]
#[command(
    long_about = "Reads newline-delimited JSON requests from the match host on
stdin and answers each with one line on stdout. Logs go to stderr."
)]
pub struct Config {
    /// Seed for the playout generator; omit to seed from OS entropy.
    /// Two runs with the same seed and transcript play identically.
    #[arg(long)]
    pub seed: Option<u32>,

    /// Wall-clock budget for the whole match, in seconds.
    #[arg(long, default_value_t = 9.8)]
    pub time_limit: f64,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if !self.time_limit.is_finite() || self.time_limit <= 0.0 {
            return Err(anyhow!(
                "time_limit must be a positive number of seconds, got {}",
                self.time_limit
            ));
        }
        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }
        Ok(())
    }

    pub fn time_limit(&self) -> Duration {
        Duration::from_secs_f64(self.time_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            seed: None,
            time_limit: 9.8,
            log_level: "info".into(),
        }
    }

    #[test]
    fn validate_accepts_the_defaults() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn validate_rejects_nonpositive_time_limit() {
        let mut cfg = base_config();
        cfg.time_limit = 0.0;
        assert!(cfg.validate().is_err());
        cfg.time_limit = -1.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_log_level() {
        let mut cfg = base_config();
        cfg.log_level = "loud".into();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("invalid log level"));
    }

    #[test]
    fn time_limit_converts_to_duration() {
        let cfg = base_config();
        assert_eq!(cfg.time_limit(), Duration::from_secs_f64(9.8));
    }
}
