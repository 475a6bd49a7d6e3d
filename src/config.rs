use crate::backend::DEFAULT_BASE_URL;
use crate::upload::STATUS_CLEAR_DELAY;
use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

pub const DEFAULT_GREETING: &str = "Hello !!";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub backend_url: String,
    pub status_clear_delay: Duration,
    pub greeting: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BASE_URL.to_string(),
            status_clear_delay: STATUS_CLEAR_DELAY,
            greeting: DEFAULT_GREETING.to_string(),
        }
    }
}

impl ClientConfig {
    /// Read overrides from the environment. Unset variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(url) = lookup("JOBHELPER_BACKEND_URL") {
            let url = url.trim();
            if !url.is_empty() {
                config.backend_url = url.to_string();
            }
        }

        if let Some(raw) = lookup("JOBHELPER_STATUS_CLEAR_MS") {
            let millis: u64 = raw
                .trim()
                .parse()
                .with_context(|| format!("JOBHELPER_STATUS_CLEAR_MS is not a number: {raw:?}"))?;
            config.status_clear_delay = Duration::from_millis(millis);
        }

        if let Some(greeting) = lookup("JOBHELPER_GREETING") {
            config.greeting = greeting;
        }

        Ok(config)
    }
}
