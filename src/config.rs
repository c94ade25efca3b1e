use crate::errors::{ConfigError, Error, Result};

pub const DEFAULT_FEED_URL: &str = "https://v2test.gosplan.info/fz44";
pub const DEFAULT_CHECK_INTERVAL_SECS: u64 = 60;
pub const DEFAULT_DATABASE_URL: &str = "tenderwatch.db";

#[derive(Debug, Clone)]
pub struct Config {
    pub feed_base_url: String,
    pub check_interval_secs: u64,
    pub database_url: String,
    pub telegram_token: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let feed_base_url =
            std::env::var("TENDER_FEED_URL").unwrap_or_else(|_| DEFAULT_FEED_URL.to_string());

        let check_interval_secs = match std::env::var("CHECK_INTERVAL") {
            Ok(raw) => raw.parse::<u64>().map_err(|_| {
                Error::Config(ConfigError::InvalidValue(format!(
                    "CHECK_INTERVAL must be a number of seconds, got '{}'",
                    raw
                )))
            })?,
            Err(_) => DEFAULT_CHECK_INTERVAL_SECS,
        };

        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        let telegram_token = std::env::var("TELEGRAM_TOKEN")
            .map_err(|_| Error::Config(ConfigError::MissingKey("TELEGRAM_TOKEN".to_string())))?;

        Ok(Config {
            feed_base_url,
            check_interval_secs,
            database_url,
            telegram_token,
        })
    }
}
