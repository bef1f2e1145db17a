mod client;

use async_trait::async_trait;

use crate::error::ApiResult;
use crate::model::hass::{EntityStateRecord, HassCoreConfig};

pub use self::client::HassClient;

/// One complete fetch of `/config` and `/states`.
#[derive(Clone, Debug, Default)]
pub struct Snapshot {
    pub config: HassCoreConfig,
    pub states: Vec<EntityStateRecord>,
}

/// Source of snapshots for the doctor.
///
/// Implemented by [`HassClient`] for the real Home Assistant API.
#[async_trait]
pub trait StateSource: Send + Sync {
    async fn fetch_snapshot(&self) -> ApiResult<Snapshot>;
}
