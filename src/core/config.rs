//! Environment-driven configuration
//!
//! All settings come from environment variables (optionally loaded from a
//! `.env` file by the binary). The bot token is an opaque secret and is
//! redacted from Debug output.

use std::fmt;
use std::time::Duration;

use anyhow::{bail, Context, Result};

/// Default scheduler period between reminder scans
pub const DEFAULT_SCHEDULER_PERIOD_HOURS: u64 = 24;

/// Default number of milestones in the project plan
pub const DEFAULT_MILESTONE_PLAN_SIZE: usize = 10;

/// When the scheduler fires its first scan after startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupTick {
    /// Scan immediately at startup, then every period. Useful for catching up
    /// on reminders that came due while the process was down.
    Immediate,
    /// First scan one full period after startup (matches the original
    /// deployment).
    AfterFirstPeriod,
}

/// Runtime configuration for the bot
#[derive(Clone)]
pub struct Config {
    /// Delivery credential for the chat API. Opaque secret, never logged.
    pub bot_token: String,
    /// Webhook endpoint for notification delivery. None = log-only delivery.
    pub notify_api_url: Option<String>,
    /// Path of the durable state file
    pub data_path: String,
    /// Interval between reminder scans
    pub scheduler_period: Duration,
    /// First-tick policy
    pub startup_tick: StartupTick,
    /// Fixed total used for progress reporting
    pub milestone_plan_size: usize,
    /// Default log filter when RUST_LOG is unset
    pub log_level: String,
}

impl Config {
    /// Build configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let bot_token = std::env::var("BOT_TOKEN").unwrap_or_default();
        let notify_api_url = std::env::var("NOTIFY_API_URL").ok().filter(|s| !s.is_empty());

        let data_path = std::env::var("DATA_PATH").unwrap_or_else(|_| "data.json".to_string());

        let period_hours = match std::env::var("SCHEDULER_PERIOD_HOURS") {
            Ok(raw) => raw.parse::<u64>().with_context(|| {
                format!("SCHEDULER_PERIOD_HOURS must be a positive integer, got '{raw}'")
            })?,
            Err(_) => DEFAULT_SCHEDULER_PERIOD_HOURS,
        };
        if period_hours == 0 {
            bail!("SCHEDULER_PERIOD_HOURS must be at least 1");
        }

        let startup_tick = match std::env::var("SCHEDULER_STARTUP_TICK") {
            Ok(raw) => parse_startup_tick(&raw)?,
            Err(_) => StartupTick::AfterFirstPeriod,
        };

        let milestone_plan_size = match std::env::var("MILESTONE_PLAN_SIZE") {
            Ok(raw) => raw.parse::<usize>().with_context(|| {
                format!("MILESTONE_PLAN_SIZE must be a positive integer, got '{raw}'")
            })?,
            Err(_) => DEFAULT_MILESTONE_PLAN_SIZE,
        };

        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Config {
            bot_token,
            notify_api_url,
            data_path,
            scheduler_period: Duration::from_secs(period_hours * 60 * 60),
            startup_tick,
            milestone_plan_size,
            log_level,
        })
    }
}

fn parse_startup_tick(raw: &str) -> Result<StartupTick> {
    match raw.trim().to_lowercase().as_str() {
        "immediate" => Ok(StartupTick::Immediate),
        "delayed" => Ok(StartupTick::AfterFirstPeriod),
        other => bail!("SCHEDULER_STARTUP_TICK must be 'immediate' or 'delayed', got '{other}'"),
    }
}

// Keep the token out of logs and error dumps.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("bot_token", &"<redacted>")
            .field("notify_api_url", &self.notify_api_url)
            .field("data_path", &self.data_path)
            .field("scheduler_period", &self.scheduler_period)
            .field("startup_tick", &self.startup_tick)
            .field("milestone_plan_size", &self.milestone_plan_size)
            .field("log_level", &self.log_level)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_startup_tick() {
        assert_eq!(parse_startup_tick("immediate").unwrap(), StartupTick::Immediate);
        assert_eq!(parse_startup_tick("delayed").unwrap(), StartupTick::AfterFirstPeriod);
        assert_eq!(parse_startup_tick(" Immediate ").unwrap(), StartupTick::Immediate);
        assert!(parse_startup_tick("jittered").is_err());
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = Config {
            bot_token: "super-secret-token".to_string(),
            notify_api_url: None,
            data_path: "data.json".to_string(),
            scheduler_period: Duration::from_secs(60),
            startup_tick: StartupTick::AfterFirstPeriod,
            milestone_plan_size: 10,
            log_level: "info".to_string(),
        };

        let dump = format!("{config:?}");
        assert!(!dump.contains("super-secret-token"));
        assert!(dump.contains("<redacted>"));
    }
}
