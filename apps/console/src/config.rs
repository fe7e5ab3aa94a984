use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::services::chat::ChatFailurePolicy;

const DEFAULT_API_BASE_URL: &str = "";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;
const DEFAULT_KPI_DURATION_MS: u64 = 2_000;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum AppProfile {
    Dev,
    Prod,
}

impl AppProfile {
    pub fn from_env(value: Option<String>) -> Self {
        match value.as_deref() {
            Some("prod") | Some("production") => Self::Prod,
            _ => Self::Dev,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Prefix for every backend path. Empty means same origin as the page.
    pub api_base_url: String,
    pub profile: AppProfile,
    pub request_timeout: Duration,
    pub kpi_duration: Duration,
    pub chat_failure_policy: ChatFailurePolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            profile: AppProfile::Dev,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            kpi_duration: Duration::from_millis(DEFAULT_KPI_DURATION_MS),
            chat_failure_policy: ChatFailurePolicy::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        crate::config::load_dotenv();

        Self::from_lookup(read_env)
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("SAFEMAMA_API_BASE_URL") {
            config.api_base_url = url;
        }

        config.profile = AppProfile::from_env(lookup("SAFEMAMA_PROFILE"));

        if let Some(secs) =
            lookup("SAFEMAMA_REQUEST_TIMEOUT_SECS").and_then(|value| value.parse::<u64>().ok())
        {
            config.request_timeout = Duration::from_secs(secs.max(1));
        }

        if let Some(ms) =
            lookup("SAFEMAMA_KPI_DURATION_MS").and_then(|value| value.parse::<u64>().ok())
        {
            config.kpi_duration = Duration::from_millis(ms.max(100));
        }

        if let Some(flag) = lookup("SAFEMAMA_CHAT_RECORD_FAILURES") {
            config.chat_failure_policy = if parse_flag(&flag) {
                ChatFailurePolicy::Record
            } else {
                ChatFailurePolicy::Omit
            };
        }

        config
    }

    pub fn is_production(&self) -> bool {
        self.profile == AppProfile::Prod
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn read_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .or_else(|| option_env_from_build(key).map(|s| s.to_string()))
}

fn option_env_from_build(key: &str) -> Option<&'static str> {
    match key {
        "SAFEMAMA_API_BASE_URL" => option_env!("SAFEMAMA_API_BASE_URL"),
        "SAFEMAMA_PROFILE" => option_env!("SAFEMAMA_PROFILE"),
        "SAFEMAMA_REQUEST_TIMEOUT_SECS" => option_env!("SAFEMAMA_REQUEST_TIMEOUT_SECS"),
        "SAFEMAMA_KPI_DURATION_MS" => option_env!("SAFEMAMA_KPI_DURATION_MS"),
        "SAFEMAMA_CHAT_RECORD_FAILURES" => option_env!("SAFEMAMA_CHAT_RECORD_FAILURES"),
        _ => None,
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_dotenv() {
    if let Err(err) = dotenvy::dotenv() {
        if !matches!(err, dotenvy::Error::Io(ref io_err) if io_err.kind() == std::io::ErrorKind::NotFound)
        {
            tracing::warn!("failed to load .env: {err}");
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[inline]
pub fn load_dotenv() {}
