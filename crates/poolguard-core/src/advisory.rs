// ── Maintenance advice ──
//
// Sends the current chemistry and stock to a language model and returns its
// free-text plan. The session treats every failure here as recoverable.

use async_trait::async_trait;
use poolguard_api::AdvisoryClient;
use poolguard_api::transport::TransportConfig;
use tracing::debug;

use crate::config::{AdvisoryConfig, SiteProfile};
use crate::error::CoreError;
use crate::model::{InventoryItem, PoolStatus};

/// Something that can turn a status snapshot into advice.
#[async_trait]
pub trait Advisor: Send + Sync + 'static {
    async fn get_advice(
        &self,
        status: &PoolStatus,
        inventory: &[InventoryItem],
    ) -> Result<String, CoreError>;
}

/// Advisor backed by a `generateContent` endpoint.
pub struct AdvisoryService {
    client: AdvisoryClient,
    site: SiteProfile,
    pool_volume_m3: f64,
}

impl AdvisoryService {
    pub fn new(
        config: &AdvisoryConfig,
        site: SiteProfile,
        pool_volume_m3: f64,
    ) -> Result<Self, CoreError> {
        let transport = TransportConfig::with_timeout(config.timeout);
        let client = AdvisoryClient::from_api_key(
            config.base_url.as_str(),
            &config.model,
            &config.api_key,
            &transport,
        )
        .map_err(|e| CoreError::Config {
            message: format!("cannot build advisory client: {e}"),
        })?;
        Ok(Self::from_client(client, site, pool_volume_m3))
    }

    pub fn from_client(client: AdvisoryClient, site: SiteProfile, pool_volume_m3: f64) -> Self {
        Self {
            client,
            site,
            pool_volume_m3,
        }
    }
}

#[async_trait]
impl Advisor for AdvisoryService {
    async fn get_advice(
        &self,
        status: &PoolStatus,
        inventory: &[InventoryItem],
    ) -> Result<String, CoreError> {
        let prompt = build_prompt(&self.site, self.pool_volume_m3, status, inventory)?;
        debug!(model = self.client.model(), chars = prompt.len(), "requesting advice");
        self.client
            .generate_text(&prompt)
            .await
            .map_err(CoreError::advisory)
    }
}

/// Prompt text for one advice request.
pub fn build_prompt(
    site: &SiteProfile,
    pool_volume_m3: f64,
    status: &PoolStatus,
    inventory: &[InventoryItem],
) -> Result<String, CoreError> {
    let stock = serde_json::to_string(inventory)
        .map_err(|e| CoreError::Internal(format!("cannot serialize inventory: {e}")))?;
    let climate = &site.climate;

    Ok(format!(
        "Act as a pool maintenance expert for coastal desert climates.\n\
         Location: {location}.\n\
         Climate: evaporation {evaporation}, UV index {uv}, coastal salinity {salinity}.\n\
         Pool volume: {volume} m3.\n\
         Current status: pH {ph}, chlorine {chlorine} ppm, water state: {state}.\n\
         Available inventory: {stock}.\n\
         \n\
         Give a step-by-step action plan to correct the water state and the pH.\n\
         Compute exact quantities for {volume} m3.\n\
         Include advice on evaporation at this location and on coastal fog.\n\
         Format: Markdown.",
        location = site.location,
        evaporation = climate.evaporation_rate,
        uv = climate.uv_index,
        salinity = climate.coastal_salinity,
        volume = pool_volume_m3,
        ph = status.ph,
        chlorine = status.chlorine,
        state = status.water_state,
    ))
}
