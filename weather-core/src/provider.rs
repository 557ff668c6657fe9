use crate::{Config, WeatherError, WeatherRecord, provider::wttr::WttrProvider};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod wttr;

/// Looks up current conditions for a free-text city query.
///
/// Every call performs at most one outbound request and resolves to either a
/// complete [`WeatherRecord`] or a classified [`WeatherError`].
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn get_weather(&self, city: &str) -> Result<WeatherRecord, WeatherError>;
}

/// Construct the reqwest-backed provider described by `config`.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    config.validate()?;
    Ok(Box::new(WttrProvider::new(config)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_config_accepts_defaults() {
        assert!(provider_from_config(&Config::default()).is_ok());
    }

    #[test]
    fn provider_from_config_rejects_zero_timeout() {
        let cfg = Config { timeout_secs: 0, ..Config::default() };
        let err = provider_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("Timeout"));
    }
}
