use crate::env_variable_utils::get_env_var;
use crate::orchestrator::RetryPolicy;
use lazy_static::lazy_static;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_BACKEND_URL: &str = "https://analyseyoutube.onrender.com";
pub const DEFAULT_MAX_ATTEMPTS: u32 = 8;
pub const DEFAULT_RETRY_DELAY_MS: u64 = 3000;
pub const DEFAULT_COMMENT_LIMIT: usize = 50;

lazy_static! {
    pub static ref FETCH_CONFIG: FetchConfig = FetchConfig::from_lookup(get_env_var);
}

/// Runtime settings for the fetch pipeline, read from `window.ENV_CONFIG`.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchConfig {
    pub backend_url: String,
    pub retry: RetryPolicy,
    pub comment_limit: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            retry: RetryPolicy {
                max_attempts: DEFAULT_MAX_ATTEMPTS,
                delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
            },
            comment_limit: DEFAULT_COMMENT_LIMIT,
        }
    }
}

impl FetchConfig {
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let backend_url = lookup("BACKEND_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or(defaults.backend_url);

        let max_attempts = parse_or(
            "RESULTS_MAX_ATTEMPTS",
            lookup("RESULTS_MAX_ATTEMPTS"),
            DEFAULT_MAX_ATTEMPTS,
        )
        .max(1);
        let delay_ms = parse_or(
            "RESULTS_RETRY_DELAY_MS",
            lookup("RESULTS_RETRY_DELAY_MS"),
            DEFAULT_RETRY_DELAY_MS,
        );
        let comment_limit = parse_or(
            "COMMENT_LIMIT",
            lookup("COMMENT_LIMIT"),
            DEFAULT_COMMENT_LIMIT,
        )
        .max(1);

        Self {
            backend_url,
            retry: RetryPolicy {
                max_attempts,
                delay: Duration::from_millis(delay_ms),
            },
            comment_limit,
        }
    }
}

fn parse_or<T: FromStr>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            log::warn!("Ignoring invalid value '{}' for {}", value, key);
            default
        }),
        None => default,
    }
}
