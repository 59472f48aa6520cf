use once_cell::sync::Lazy;
use serde::{Serialize, Serializer};
use std::env;
use std::fmt;
use std::time::Duration;

use crate::client::Service;

/// Suffix appended to a valid key to derive a key the services must reject
pub const INVALID_KEY_SUFFIX: &str = "Invalid123";

pub const DEFAULT_GEOCODER_URL: &str = "https://geocode-maps.yandex.ru/1.x";
pub const DEFAULT_SEARCH_URL: &str = "https://search-maps.yandex.ru/v1";
const DEFAULT_GEOCODER_KEY: &str = "b6406238-38e9-4bc0-ac07-5bca9de0e327";
const DEFAULT_SEARCH_KEY: &str = "99d471d5-cb8f-4d4e-b915-6fb3717e217b";

/// Opaque API token. Formatting only ever shows a short prefix.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Derive a key the upstream must reject as invalid
    pub fn invalid(&self) -> Self {
        Self(format!("{}{}", self.0, INVALID_KEY_SUFFIX))
    }

    pub fn masked(&self) -> String {
        let prefix: String = self.0.chars().take(4).collect();
        format!("{}…", prefix)
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey({})", self.masked())
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

impl Serialize for ApiKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.masked())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceConfig {
    pub base_url: String,
    pub api_key: ApiKey,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProbeConfig {
    pub geocoder: ServiceConfig,
    pub search: ServiceConfig,
    /// Per-request timeout; `None` leaves the HTTP client default in place
    pub timeout: Option<Duration>,
    /// Report upstream contract violations as failures instead of skips
    pub strict: bool,
    /// Maximum number of cases the runner keeps in flight
    pub jobs: usize,
}

impl ProbeConfig {
    pub fn from_env() -> Self {
        Self::defaults().with_env_overrides()
    }

    /// Session constants for both services
    pub fn defaults() -> Self {
        Self {
            geocoder: ServiceConfig {
                base_url: DEFAULT_GEOCODER_URL.to_string(),
                api_key: ApiKey::new(DEFAULT_GEOCODER_KEY),
            },
            search: ServiceConfig {
                base_url: DEFAULT_SEARCH_URL.to_string(),
                api_key: ApiKey::new(DEFAULT_SEARCH_KEY),
            },
            timeout: None,
            strict: false,
            jobs: 1,
        }
    }

    fn with_env_overrides(mut self) -> Self {
        // Geocoder overrides
        if let Ok(v) = env::var("GEOPROBE_GEOCODER_URL") {
            self.geocoder.base_url = v;
        }
        if let Ok(v) = env::var("GEOPROBE_GEOCODER_KEY") {
            self.geocoder.api_key = ApiKey::new(v);
        }

        // Search overrides
        if let Ok(v) = env::var("GEOPROBE_SEARCH_URL") {
            self.search.base_url = v;
        }
        if let Ok(v) = env::var("GEOPROBE_SEARCH_KEY") {
            self.search.api_key = ApiKey::new(v);
        }

        // Runner overrides
        if let Ok(v) = env::var("GEOPROBE_TIMEOUT_SECS") {
            if let Ok(secs) = v.parse::<u64>() {
                self.timeout = Some(Duration::from_secs(secs));
            }
        }
        if let Ok(v) = env::var("GEOPROBE_STRICT") {
            self.strict = parse_flag(&v).unwrap_or(self.strict);
        }
        if let Ok(v) = env::var("GEOPROBE_JOBS") {
            self.jobs = v.parse().ok().filter(|n| *n > 0).unwrap_or(self.jobs);
        }

        self
    }

    /// Point both services at a different host, keeping keys and runner settings
    pub fn with_base_urls(mut self, geocoder: impl Into<String>, search: impl Into<String>) -> Self {
        self.geocoder.base_url = geocoder.into();
        self.search.base_url = search.into();
        self
    }

    pub fn service(&self, service: Service) -> &ServiceConfig {
        match service {
            Service::Geocoder => &self.geocoder,
            Service::Search => &self.search,
        }
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self::defaults()
    }
}

/// Boolean switch as written in the environment: `1`/`true`/`yes` or `0`/`false`/`no`
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}

/// True when the environment variable is set to an enabled flag
pub fn env_flag(name: &str) -> bool {
    env::var(name).ok().and_then(|v| parse_flag(&v)).unwrap_or(false)
}

// Session-wide config, read once on first use
pub static CONFIG: Lazy<ProbeConfig> = Lazy::new(ProbeConfig::from_env);

pub fn config() -> &'static ProbeConfig {
    &CONFIG
}
