use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

use homeops_api::config::HassConfig;

use crate::backend::hass::{Snapshot, StateSource};
use crate::error::{ApiError, ApiResult};
use crate::model::hass::{EntityStateRecord, HassCoreConfig};

pub struct HassClient {
    base_url: Url,
    http: reqwest::Client,
    token: String,
}

impl HassClient {
    /// Build a client from configuration, reading the bearer token from the
    /// environment variable named by `conf.token_env`.
    pub fn new(conf: &HassConfig) -> ApiResult<Self> {
        let token = std::env::var(&conf.token_env).unwrap_or_default();
        Self::with_token(conf, &token)
    }

    pub fn with_token(conf: &HassConfig, token: &str) -> ApiResult<Self> {
        let token = token.trim();
        if token.is_empty() {
            return Err(ApiError::MissingToken(conf.token_env.clone()));
        }

        if conf.timeout_secs == 0 {
            return Err(ApiError::service_error(
                "hass.timeout_secs must be at least 1 second",
            ));
        }

        let http = reqwest::Client::builder().timeout(conf.timeout()).build()?;

        Ok(Self {
            base_url: conf.api_base(),
            http,
            token: token.to_string(),
        })
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint_url(&self, endpoint: &str) -> ApiResult<Url> {
        Ok(self.base_url.join(endpoint.trim_start_matches('/'))?)
    }

    async fn check_status(
        response: reqwest::Response,
        action: &str,
    ) -> ApiResult<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        let details = if status == StatusCode::UNAUTHORIZED {
            format!("{status}. Verify the Home Assistant token")
        } else if body.is_empty() {
            format!("{status}")
        } else {
            format!("{status}: {body}")
        };

        Err(ApiError::UpstreamStatus {
            action: action.to_string(),
            status,
            details,
        })
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> ApiResult<T> {
        let url = self.endpoint_url(endpoint)?;
        log::trace!("GET {url}");
        let response = self.http.get(url).bearer_auth(&self.token).send().await?;
        let response = Self::check_status(response, &format!("GET /{endpoint}")).await?;
        Ok(response.json().await?)
    }

    pub async fn get_core_config(&self) -> ApiResult<HassCoreConfig> {
        self.get("config").await
    }

    pub async fn get_states(&self) -> ApiResult<Vec<EntityStateRecord>> {
        self.get("states").await
    }
}

#[async_trait]
impl StateSource for HassClient {
    async fn fetch_snapshot(&self) -> ApiResult<Snapshot> {
        let config = self.get_core_config().await?;
        let states = self.get_states().await?;
        Ok(Snapshot { config, states })
    }
}
