use thiserror::Error;

use crate::chain::EncodingError;
use crate::types::Round;

#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Network error: [{url}] responded with status {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String
    },
    #[error("Network error: transaction [{txid}] was rejected: {reason}")]
    Rejected {
        txid: String,
        reason: String
    },
    #[error("Network error: transaction [{txid}] was not confirmed after {rounds} rounds")]
    NotConfirmed {
        txid: String,
        rounds: Round
    },
    #[error("Network error: {0}")]
    Encoding(#[from] EncodingError),
    #[error("Network error: invalid response: {0}")]
    InvalidResponse(String)
}
