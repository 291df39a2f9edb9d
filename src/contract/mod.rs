mod arc200;
mod errors;
#[cfg(test)]
mod tests;

use async_trait::async_trait;

use crate::models::{TransferAttempt, TransferRequest};
use crate::types::AssetId;

pub use arc200::Arc200Contract;
pub use errors::ContractError;

/// The fungible token interface the pipeline drives.
#[async_trait]
pub trait TokenContract: Send + Sync {
    /// Decimal places of the token's display unit.
    async fn decimals(&self, asset_id: AssetId) -> Result<u8, ContractError>;

    /// Builds, without submitting, the transactions that move `request.amount` to the recipient.
    async fn transfer(&self, request: &TransferRequest) -> Result<TransferAttempt, ContractError>;
}
