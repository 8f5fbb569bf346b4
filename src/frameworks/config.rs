use std::{env, fmt, time::Duration};
use url::Url;

// Runtime constants read from the environment. Profile behaviour is
// compiled in (see `use_cases::profile`).

const DEFAULT_BOOKING_API_URL: &str = "http://127.0.0.1:8080";
const DEFAULT_LIFECYCLE_USERS: usize = 10;
const DEFAULT_STRESS_USERS: usize = 0;
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5000;

#[derive(Debug)]
pub enum ConfigError {
    InvalidBaseUrl { value: String, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidBaseUrl { value, reason } => {
                write!(f, "BOOKING_API_URL {value:?} is not a usable base url: {reason}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

pub fn booking_api_url() -> Result<Url, ConfigError> {
    let value =
        env::var("BOOKING_API_URL").unwrap_or_else(|_| DEFAULT_BOOKING_API_URL.to_string());
    parse_base_url(&value)
}

pub fn lifecycle_users() -> usize {
    parse_or(env::var("LIFECYCLE_USERS").ok(), DEFAULT_LIFECYCLE_USERS)
}

pub fn stress_users() -> usize {
    parse_or(env::var("STRESS_USERS").ok(), DEFAULT_STRESS_USERS)
}

pub fn request_timeout() -> Duration {
    let millis = parse_or(
        env::var("REQUEST_TIMEOUT_MS").ok(),
        DEFAULT_REQUEST_TIMEOUT_MS,
    );
    Duration::from_millis(millis)
}

pub(crate) fn parse_base_url(value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value).map_err(|e| ConfigError::InvalidBaseUrl {
        value: value.to_string(),
        reason: e.to_string(),
    })?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidBaseUrl {
            value: value.to_string(),
            reason: "expected an http(s) url".to_string(),
        });
    }
    Ok(url)
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, default: T) -> T {
    value
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
