use std::sync::Arc;

use crate::chain::OperatorIdentity;
use crate::contract::TokenContract;
use crate::network::{AccountLookup, TransactionSubmitter};
use crate::storage::AuditLog;
use crate::types::Round;

pub const DEFAULT_RETRY_PAYMENT: u64 = 285_000;
pub const DEFAULT_CONFIRMATION_ROUNDS: Round = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisbursementPolicy {
    /// Payment sent to the token application with the second and last transfer attempt.
    pub retry_payment: u64,
    pub confirmation_rounds: Round
}

impl Default for DisbursementPolicy {
    fn default() -> Self {
        Self {
            retry_payment: DEFAULT_RETRY_PAYMENT,
            confirmation_rounds: DEFAULT_CONFIRMATION_ROUNDS
        }
    }
}

/// Everything a run needs, built once at startup and handed to the pipeline.
pub struct DisbursementContext {
    pub operator: Arc<OperatorIdentity>,
    pub accounts: Arc<dyn AccountLookup>,
    pub contract: Arc<dyn TokenContract>,
    pub ledger: Arc<dyn TransactionSubmitter>,
    pub audit: AuditLog,
    pub policy: DisbursementPolicy
}
