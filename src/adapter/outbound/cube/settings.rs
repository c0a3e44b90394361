//! Cube API connection settings.

use serde::Deserialize;

/// Path of the pre-aggregation refresh endpoint, relative to the base URL.
pub const REFRESH_PATH: &str = "/cubejs-api/v1/pre-aggregations/refresh";

/// Token used when neither the config file nor `CUBEJS_API_SECRET` set one.
pub const PLACEHOLDER_API_TOKEN: &str = "CHANGE_ME_IN_PRODUCTION";

/// Environment variable overriding [`CubeConfig::api_token`].
pub const API_TOKEN_ENV: &str = "CUBEJS_API_SECRET";

/// Cube refresh client configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CubeConfig {
    /// Base URL of the Cube API service.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Cube whose pre-aggregations are refreshed after a forecast.
    #[serde(default = "default_cube")]
    pub cube: String,
    /// Whole-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Secret used to sign the token sent in the `Authorization` header.
    #[serde(default = "default_api_token")]
    pub api_token: String,
}

fn default_base_url() -> String {
    "http://cube:4000".into()
}

fn default_cube() -> String {
    "MlPrediccionVentas".into()
}

const fn default_timeout_secs() -> u64 {
    60
}

fn default_api_token() -> String {
    PLACEHOLDER_API_TOKEN.into()
}

impl CubeConfig {
    /// Full URL of the refresh endpoint.
    #[must_use]
    pub fn refresh_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), REFRESH_PATH)
    }

    /// True while the insecure default token is in use.
    #[must_use]
    pub fn uses_placeholder_token(&self) -> bool {
        self.api_token == PLACEHOLDER_API_TOKEN
    }
}

impl Default for CubeConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            cube: default_cube(),
            timeout_secs: default_timeout_secs(),
            api_token: default_api_token(),
        }
    }
}
