use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub anthropic_api_key: String,
    pub tavily_api_key: String,
    /// Root of the public job board (listing search + job posting pages).
    pub job_board_base_url: String,
    pub job_fetch_batch_size: usize,
    pub job_fetch_timeout_secs: u64,
    pub search_max_results: u32,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            tavily_api_key: require_env("TAVILY_API_KEY")?,
            job_board_base_url: std::env::var("JOB_BOARD_BASE_URL")
                .unwrap_or_else(|_| "https://www.linkedin.com".to_string()),
            job_fetch_batch_size: parse_env("JOB_FETCH_BATCH_SIZE", 5)?,
            job_fetch_timeout_secs: parse_env("JOB_FETCH_TIMEOUT_SECS", 30)?,
            search_max_results: parse_env("SEARCH_MAX_RESULTS", 5)?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_defaults_when_unset() {
        let value: usize = parse_env("JOBSCOUT_TEST_UNSET_BATCH", 5).unwrap();
        assert_eq!(value, 5);
    }

    #[test]
    fn test_parse_env_rejects_non_numeric_and_names_key() {
        std::env::set_var("JOBSCOUT_TEST_BAD_PORT", "eighty");
        let err = parse_env::<u16>("JOBSCOUT_TEST_BAD_PORT", 8080).unwrap_err();
        assert!(err.to_string().contains("JOBSCOUT_TEST_BAD_PORT"));
    }

    #[test]
    fn test_require_env_names_missing_key() {
        let err = require_env("JOBSCOUT_TEST_MISSING_KEY").unwrap_err();
        assert!(err.to_string().contains("JOBSCOUT_TEST_MISSING_KEY"));
    }
}
