use thiserror::Error;

use crate::chain::EncodingError;
use crate::network::NetworkError;

#[derive(Debug, Error)]
pub enum ContractError {
    #[error("Contract error: {method} failed: {detail}")]
    CallFailed {
        method: &'static str,
        detail: String
    },
    #[error("Contract error: {method} returned no value")]
    MissingReturn {
        method: &'static str
    },
    #[error("Contract error: {0}")]
    Network(#[from] NetworkError),
    #[error("Contract error: {0}")]
    Encoding(#[from] EncodingError)
}
