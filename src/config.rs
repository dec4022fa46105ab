use crate::throttle::RetryPolicy;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

/// Runtime configuration, sourced from the environment. Every knob has a
/// default, so an empty environment yields a working service.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub upstream_url: String,
    /// Ceiling on concurrently in-flight upstream calls.
    pub max_concurrency: usize,
    pub retry_max_attempts: u32,
    pub retry_base_delay: Duration,
    pub retry_max_delay: Duration,
    pub quote_ttl: Duration,
    pub fundamentals_ttl: Duration,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let port = parse_or(&env_map, "PORT", 8080u16)?;

        let upstream_url = env_map
            .get("UPSTREAM_API_URL")
            .cloned()
            .unwrap_or_else(|| "https://query1.finance.yahoo.com".to_string());

        let max_concurrency = parse_or(&env_map, "MAX_CONCURRENCY", 5usize)?;
        if max_concurrency == 0 {
            return Err(ConfigError::InvalidValue(
                "MAX_CONCURRENCY".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        let retry_max_attempts = parse_or(&env_map, "RETRY_MAX_ATTEMPTS", 3u32)?;
        if retry_max_attempts == 0 {
            return Err(ConfigError::InvalidValue(
                "RETRY_MAX_ATTEMPTS".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        let retry_base_delay =
            Duration::from_millis(parse_or(&env_map, "RETRY_BASE_DELAY_MS", 250u64)?);
        let retry_max_delay =
            Duration::from_millis(parse_or(&env_map, "RETRY_MAX_DELAY_MS", 5000u64)?);
        let quote_ttl = Duration::from_millis(parse_or(&env_map, "QUOTE_TTL_MS", 15_000u64)?);
        let fundamentals_ttl = Duration::from_millis(parse_or(
            &env_map,
            "FUNDAMENTALS_TTL_MS",
            12 * 60 * 60 * 1000u64,
        )?);

        Ok(Config {
            port,
            upstream_url,
            max_concurrency,
            retry_max_attempts,
            retry_base_delay,
            retry_max_delay,
            quote_ttl,
            fundamentals_ttl,
        })
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.retry_max_attempts,
            self.retry_base_delay,
            self.retry_max_delay,
        )
    }
}

fn parse_or<T: std::str::FromStr>(
    env_map: &HashMap<String, String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError> {
    match env_map.get(key) {
        Some(raw) => raw.parse::<T>().map_err(|_| {
            ConfigError::InvalidValue(key.to_string(), format!("could not parse {:?}", raw))
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_environment() {
        let config = Config::from_env_map(HashMap::new()).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.max_concurrency, 5);
        assert_eq!(config.retry_max_attempts, 3);
        assert_eq!(config.retry_base_delay, Duration::from_millis(250));
        assert_eq!(config.retry_max_delay, Duration::from_millis(5000));
        assert_eq!(config.quote_ttl, Duration::from_secs(15));
        assert_eq!(config.fundamentals_ttl, Duration::from_secs(12 * 60 * 60));
    }

    #[test]
    fn test_invalid_port() {
        let mut env_map = HashMap::new();
        env_map.insert("PORT".to_string(), "not_a_number".to_string());
        match Config::from_env_map(env_map) {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "PORT"),
            other => panic!("Expected InvalidValue error, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let mut env_map = HashMap::new();
        env_map.insert("MAX_CONCURRENCY".to_string(), "0".to_string());
        match Config::from_env_map(env_map) {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "MAX_CONCURRENCY"),
            other => panic!("Expected InvalidValue error, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_retry_attempts_rejected() {
        let mut env_map = HashMap::new();
        env_map.insert("RETRY_MAX_ATTEMPTS".to_string(), "0".to_string());
        match Config::from_env_map(env_map) {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "RETRY_MAX_ATTEMPTS"),
            other => panic!("Expected InvalidValue error, got {:?}", other),
        }
    }

    #[test]
    fn test_overrides_applied() {
        let mut env_map = HashMap::new();
        env_map.insert("MAX_CONCURRENCY".to_string(), "2".to_string());
        env_map.insert("QUOTE_TTL_MS".to_string(), "30000".to_string());
        env_map.insert(
            "UPSTREAM_API_URL".to_string(),
            "http://localhost:9999".to_string(),
        );
        let config = Config::from_env_map(env_map).unwrap();
        assert_eq!(config.max_concurrency, 2);
        assert_eq!(config.quote_ttl, Duration::from_secs(30));
        assert_eq!(config.upstream_url, "http://localhost:9999");
    }

    #[test]
    fn test_retry_policy_from_config() {
        let config = Config::from_env_map(HashMap::new()).unwrap();
        let policy = config.retry_policy();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.base_delay, Duration::from_millis(250));
    }
}
