use std::time::Duration;

const DEFAULT_API_URL: &str = "http://localhost:4000";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Connection settings for the remote closer API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL without a trailing slash.
    pub base_url: String,
    /// Optional bearer token attached to every request.
    pub token: Option<String>,
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        ApiConfig {
            base_url,
            token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Load settings from the environment (and a `.env` file if present):
    /// `CLOSER_API_URL`, `CLOSER_API_TOKEN`, `CLOSER_API_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let base_url = match std::env::var("CLOSER_API_URL") {
            Ok(url) if !url.trim().is_empty() => url,
            _ => {
                log::warn!("No CLOSER_API_URL set — using {DEFAULT_API_URL}");
                DEFAULT_API_URL.to_string()
            }
        };

        let token = std::env::var("CLOSER_API_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());

        let timeout_secs = match std::env::var("CLOSER_API_TIMEOUT_SECS") {
            Ok(raw) => parse_timeout_secs(&raw),
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        let mut config = ApiConfig::new(base_url);
        config.token = token;
        config.timeout = Duration::from_secs(timeout_secs);
        config
    }
}

fn parse_timeout_secs(raw: &str) -> u64 {
    match raw.trim().parse::<u64>() {
        Ok(secs) => secs,
        Err(_) => {
            log::warn!(
                "Invalid CLOSER_API_TIMEOUT_SECS '{raw}' — using {DEFAULT_TIMEOUT_SECS}s"
            );
            DEFAULT_TIMEOUT_SECS
        }
    }
}
