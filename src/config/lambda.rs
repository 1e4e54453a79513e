use crate::config::toml_config::{
    validate_provider, DEFAULT_API_AUTHOR, DEFAULT_CASES_URL, DEFAULT_INCIDENCE_URL,
};
use crate::core::{assembler::DEFAULT_MAX_AGE, ConfigProvider};
use crate::domain::model::Thresholds;
use crate::utils::error::{ReportError, Result};
use crate::utils::validation::Validate;
use std::str::FromStr;
use std::time::Duration;

/// Settings for the Lambda deployment, read from environment variables.
#[derive(Debug, Clone)]
pub struct LambdaConfig {
    pub incidence_url: String,
    pub cases_url: String,
    pub api_author: String,
    pub timeout_seconds: u64,
    pub retry_attempts: u32,
    pub cache_max_age: u64,
}

impl LambdaConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            incidence_url: lookup("INCIDENCE_URL")
                .unwrap_or_else(|| DEFAULT_INCIDENCE_URL.to_string()),
            cases_url: lookup("CASES_URL").unwrap_or_else(|| DEFAULT_CASES_URL.to_string()),
            api_author: lookup("API_AUTHOR").unwrap_or_else(|| DEFAULT_API_AUTHOR.to_string()),
            timeout_seconds: parse_var(&lookup, "REQUEST_TIMEOUT_SECONDS", 15)?,
            retry_attempts: parse_var(&lookup, "RETRY_ATTEMPTS", 1)?,
            cache_max_age: parse_var(&lookup, "CACHE_MAX_AGE", DEFAULT_MAX_AGE)?,
        })
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ReportError::ConfigError {
            message: format!("{} must be a non-negative integer, got {:?}", key, raw),
        }),
        None => Ok(default),
    }
}

impl ConfigProvider for LambdaConfig {
    fn incidence_url(&self) -> &str {
        &self.incidence_url
    }

    fn cases_url(&self) -> &str {
        &self.cases_url
    }

    fn thresholds(&self) -> Thresholds {
        Thresholds::default()
    }

    fn api_author(&self) -> &str {
        &self.api_author
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    fn retry_attempts(&self) -> u32 {
        self.retry_attempts
    }

    fn retry_delay(&self) -> Duration {
        Duration::from_millis(500)
    }

    fn cache_max_age(&self) -> u64 {
        self.cache_max_age
    }
}

impl Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)?;
        tracing::info!("✅ Lambda configuration validation passed");
        Ok(())
    }
}
