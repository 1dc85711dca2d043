use std::{env, fmt::Display, str::FromStr, time::Duration};

use tracing::{info, warn};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:2000/api";

/// Runtime settings, read from `ORDER_DESK_*` environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct DeskConfig {
    pub api_url: String,
    pub poll_interval: Duration,
    pub tick_interval: Duration,
    pub request_timeout: Duration,
    pub mailbox_size: usize,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            poll_interval: Duration::from_secs(10),
            tick_interval: Duration::from_millis(1000),
            request_timeout: Duration::from_millis(5000),
            mailbox_size: 64,
        }
    }
}

impl DeskConfig {
    pub fn load() -> Self {
        Self::load_from(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source. Missing or
    /// unparsable values fall back to the default.
    pub fn load_from(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_url: String = try_load(&lookup, "ORDER_DESK_API_URL", DEFAULT_API_URL.to_string());
        let poll_secs: u64 = try_load(&lookup, "ORDER_DESK_POLL_SECS", 10);
        let tick_ms: u64 = try_load(&lookup, "ORDER_DESK_TICK_MS", 1000);
        let timeout_ms: u64 = try_load(&lookup, "ORDER_DESK_TIMEOUT_MS", 5000);
        let mailbox_size: usize = try_load(&lookup, "ORDER_DESK_MAILBOX", 64);

        Self {
            api_url,
            poll_interval: Duration::from_secs(poll_secs.max(1)),
            tick_interval: Duration::from_millis(tick_ms.max(1)),
            request_timeout: Duration::from_millis(timeout_ms.max(1)),
            mailbox_size: mailbox_size.max(1),
        }
    }
}

fn try_load<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    let Some(raw) = lookup(key) else {
        info!("{key} not set, using default: {default}");
        return default;
    };
    raw.trim().parse().unwrap_or_else(|e| {
        warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
        default
    })
}
