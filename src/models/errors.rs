use std::io;

use thiserror::Error;

use crate::chain::EncodingError;
use crate::contract::ContractError;
use crate::models::DisbursementRecord;
use crate::network::NetworkError;
use crate::types::{Address, AmountError, AssetId};

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("Submission error: {0}")]
    Encoding(#[from] EncodingError),
    #[error("Submission error: {0}")]
    Network(#[from] NetworkError)
}

/// A condition that halts the whole run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Account lookup failed for tokenId [{asset_id}] address [{recipient}]: {source}")]
    AccountLookup {
        asset_id: AssetId,
        recipient: Address,
        source: NetworkError
    },
    #[error("Failed to get arc200_decimals for tokenId [{asset_id}] address [{recipient}]: {source}")]
    Decimals {
        asset_id: AssetId,
        recipient: Address,
        source: ContractError
    },
    #[error("Invalid amount for tokenId [{asset_id}] address [{recipient}]: {source}")]
    Amount {
        asset_id: AssetId,
        recipient: Address,
        source: AmountError
    },
    #[error("Failed to transfer arc200 tokenId [{asset_id}] to address [{recipient}] after {attempts} attempts: {detail}")]
    TransferExhausted {
        asset_id: AssetId,
        recipient: Address,
        attempts: u32,
        detail: String
    },
    #[error("Failed to submit transfer of tokenId [{asset_id}] to address [{recipient}]: {source}")]
    Submission {
        asset_id: AssetId,
        recipient: Address,
        source: SubmissionError
    },
    #[error("Failed to write audit log for tokenId [{asset_id}] address [{recipient}]: {source}")]
    AuditLog {
        asset_id: AssetId,
        recipient: Address,
        source: io::Error
    }
}

impl PipelineError {
    pub fn account_lookup(record: &DisbursementRecord, source: NetworkError) -> Self {
        Self::AccountLookup { asset_id: record.asset_id, recipient: record.recipient, source }
    }

    pub fn decimals(record: &DisbursementRecord, source: ContractError) -> Self {
        Self::Decimals { asset_id: record.asset_id, recipient: record.recipient, source }
    }

    pub fn amount(record: &DisbursementRecord, source: AmountError) -> Self {
        Self::Amount { asset_id: record.asset_id, recipient: record.recipient, source }
    }

    pub fn transfer_exhausted(record: &DisbursementRecord, attempts: u32, detail: String) -> Self {
        Self::TransferExhausted { asset_id: record.asset_id, recipient: record.recipient, attempts, detail }
    }

    pub fn submission(record: &DisbursementRecord, source: SubmissionError) -> Self {
        Self::Submission { asset_id: record.asset_id, recipient: record.recipient, source }
    }

    pub fn audit_log(record: &DisbursementRecord, source: io::Error) -> Self {
        Self::AuditLog { asset_id: record.asset_id, recipient: record.recipient, source }
    }

    /// The failure detail without the record coordinates, for the audit log line.
    pub fn reason(&self) -> String {
        match self {
            Self::AccountLookup { source, .. } => format!("account lookup failed: {source}"),
            Self::Decimals { source, .. } => format!("failed to get arc200_decimals: {source}"),
            Self::Amount { source, .. } => source.to_string(),
            Self::TransferExhausted { attempts, detail, .. } => {
                format!("failed to transfer arc200 after {attempts} attempts: {detail}")
            },
            Self::Submission { source, .. } => format!("failed to submit transaction: {source}"),
            Self::AuditLog { source, .. } => format!("failed to write audit log: {source}")
        }
    }
}
