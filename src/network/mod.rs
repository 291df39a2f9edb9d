mod algod;
mod api;
mod errors;
mod indexer;
#[cfg(test)]
mod tests;

use async_trait::async_trait;

use crate::types::{Address, Round};

pub use algod::{AlgodClient, ResourcesAccessed};
pub use errors::NetworkError;
pub use indexer::IndexerClient;

/// Read access to account state on the indexing service.
#[async_trait]
pub trait AccountLookup: Send + Sync {
    /// The account's signature type, `None` when the account is unknown or has none.
    async fn signature_type(&self, address: &Address) -> Result<Option<String>, NetworkError>;
}

/// Broadcast and confirmation of signed transactions on the execution node.
#[async_trait]
pub trait TransactionSubmitter: Send + Sync {
    /// Submits the signed transactions as one batch, returning the id the node reports.
    async fn send_raw(&self, signed: &[Vec<u8>]) -> Result<String, NetworkError>;

    /// Blocks until `txid` is confirmed, giving up after `rounds` rounds.
    async fn wait_for_confirmation(&self, txid: &str, rounds: Round) -> Result<Round, NetworkError>;
}
