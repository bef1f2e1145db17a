use camino::Utf8Path;
use config::{Config, ConfigError};

pub use homeops_api::config::*;

pub const ENV_PORT: &str = "HOMEOPS_PORT";
pub const ENV_CORE_API_BASE: &str = "HOMEOPS_CORE_API_BASE";

pub fn parse(filename: &Utf8Path) -> Result<AppConfig, ConfigError> {
    parse_with_env(filename, |key| std::env::var(key).ok())
}

/// Load defaults, then `filename` (if it exists), then environment overrides
/// looked up through `env`.
pub fn parse_with_env(
    filename: &Utf8Path,
    env: impl Fn(&str) -> Option<String>,
) -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        .set_default("server.listen_address", "0.0.0.0")?
        .set_default("server.port", 8099)?
        .set_default("hass.url", "http://supervisor/core/api")?
        .set_default("hass.token_env", "SUPERVISOR_TOKEN")?
        .set_default("hass.timeout_secs", 10)?
        .add_source(config::File::with_name(filename.as_str()).required(false))
        .set_override_option("server.port", env(ENV_PORT))?
        .set_override_option("hass.url", env(ENV_CORE_API_BASE))?
        .build()?;

    settings.try_deserialize()
}
