//! Runtime configuration.

use serde::{Deserialize, Serialize};

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Environment variable overriding the API base URL.
pub const ENV_API_URL: &str = "LIS_API_URL";
/// Environment variable toggling the demo seed (`0`, `false`, `no`, `off` disable).
pub const ENV_SEED_DEMO: &str = "LIS_SEED_DEMO";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, uniffi::Record)]
#[serde(default)]
pub struct LisConfig {
    /// Base URL of the record API
    pub api_url: String,
    /// Start collections from demo data
    pub seed_demo_data: bool,
}

impl Default for LisConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            seed_demo_data: true,
        }
    }
}

impl LisConfig {
    /// Defaults overridden by `LIS_API_URL` / `LIS_SEED_DEMO`.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(url) = lookup(ENV_API_URL).filter(|u| !u.trim().is_empty()) {
            config.api_url = url.trim().to_string();
        }
        if let Some(flag) = lookup(ENV_SEED_DEMO) {
            config.seed_demo_data = !matches!(
                flag.trim().to_ascii_lowercase().as_str(),
                "0" | "false" | "no" | "off"
            );
        }
        config
    }
}
