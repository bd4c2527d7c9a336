//! Config module contains the top-level config for the app.
use std::env;

use config_crate::{Config as RawConfig, ConfigError, Environment, File};

use moderation::DEFAULT_MISSING_REFERRALS_LIMIT;
use sentry_integration::SentryConfig;

/// Basic settings - HTTP binding address and database DSN
#[derive(Debug, Deserialize, Clone)]
pub struct Server {
    pub host: String,
    pub port: String,
    pub database: String,
    pub thread_count: usize,
}

/// Missing-referral report settings
#[derive(Debug, Deserialize, Clone)]
pub struct Referrals {
    pub missing_limit: usize,
}

impl Default for Referrals {
    fn default() -> Self {
        Self {
            missing_limit: DEFAULT_MISSING_REFERRALS_LIMIT,
        }
    }
}

/// Where viewer sessions find the registry API
#[derive(Debug, Deserialize, Clone)]
pub struct Client {
    pub api_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: Server,
    #[serde(default)]
    pub referrals: Referrals,
    pub client: Client,
    pub sentry: Option<SentryConfig>,
}

impl Config {
    /// Creates config from base.toml, which are overwritten by <env>.toml, where env is one of
    /// development, test, production. After that it could be overwritten by env variables like
    /// OPENCOUPON_SERVER__PORT (this will override `server.port` field in config).
    pub fn new() -> Result<Self, ConfigError> {
        // Optional file specific for environment
        let env = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        Config::with_env(env)
    }

    pub fn with_env(env: impl Into<String>) -> Result<Self, ConfigError> {
        let mut s = RawConfig::new();

        s.merge(File::with_name("config/base"))?;
        s.merge(File::with_name(&format!("config/{}", env.into())).required(false))?;
        s.merge(Environment::with_prefix("OPENCOUPON").separator("__"))?;
        s.try_into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_config() {
        let config = Config::with_env("test").unwrap();
        assert!(config.server.thread_count > 0);
        assert_eq!(config.referrals.missing_limit, DEFAULT_MISSING_REFERRALS_LIMIT);
        assert!(config.sentry.is_none());
    }
}
