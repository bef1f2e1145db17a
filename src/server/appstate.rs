use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::backend::hass::{HassClient, StateSource};
use crate::config::AppConfig;
use crate::error::ApiResult;

#[derive(Clone)]
pub struct AppState {
    conf: Arc<AppConfig>,
    source: Arc<dyn StateSource>,
    started: Instant,
}

impl AppState {
    /// Build the state for a real Home Assistant backend.
    ///
    /// Fails if the configured token variable is missing, so no request is
    /// ever served without credentials.
    pub fn from_config(config: AppConfig) -> ApiResult<Self> {
        let client = HassClient::new(&config.hass)?;
        log::info!("Using Home Assistant API at [{}]", client.base_url());
        Ok(Self::new(config, Arc::new(client)))
    }

    #[must_use]
    pub fn new(config: AppConfig, source: Arc<dyn StateSource>) -> Self {
        Self {
            conf: Arc::new(config),
            source,
            started: Instant::now(),
        }
    }

    #[must_use]
    pub fn config(&self) -> Arc<AppConfig> {
        self.conf.clone()
    }

    #[must_use]
    pub fn source(&self) -> Arc<dyn StateSource> {
        self.source.clone()
    }

    #[must_use]
    pub fn uptime(&self) -> Duration {
        self.started.elapsed()
    }
}
