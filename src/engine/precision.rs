use std::sync::Arc;

use moka::future::Cache;
use tracing::debug;

use crate::contract::{ContractError, TokenContract};
use crate::types::AssetId;

const CACHE_CAPACITY: u64 = 1_024;

/// Token decimals, fetched once per token and run.
pub struct PrecisionCache {
    contract: Arc<dyn TokenContract>,
    cache: Cache<AssetId, u8>
}

impl PrecisionCache {
    pub fn new(contract: Arc<dyn TokenContract>) -> Self {
        Self {
            contract,
            cache: Cache::new(CACHE_CAPACITY)
        }
    }

    pub async fn decimals(&self, asset_id: AssetId) -> Result<u8, ContractError> {
        if let Some(decimals) = self.cache.get(&asset_id).await {
            return Ok(decimals);
        }

        let decimals = self.contract.decimals(asset_id).await?;
        debug!("tokenId [{asset_id}] has {decimals} decimals");

        self.cache.insert(asset_id, decimals).await;

        Ok(decimals)
    }
}
