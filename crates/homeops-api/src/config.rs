use std::net::Ipv4Addr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
pub struct ServerConfig {
    pub listen_address: Ipv4Addr,
    pub port: u16,
}

#[derive(Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
pub struct HassConfig {
    pub url: Url,
    /// Name of the environment variable holding the bearer token. The token
    /// itself is never part of the configuration file.
    pub token_env: String,
    pub timeout_secs: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub hass: HassConfig,
}

impl HassConfig {
    /// Base url with a trailing slash, so relative endpoints like `states`
    /// are resolved below it instead of replacing the last path segment.
    #[must_use]
    pub fn api_base(&self) -> Url {
        let mut url = self.url.clone();
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        url
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
