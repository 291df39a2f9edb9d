use std::sync::Arc;

use tracing::warn;

use crate::contract::TokenContract;
use crate::models::{TransferAttempt, TransferRequest};
use crate::types::{Address, AssetId, BaseUnits};

pub const MAX_ATTEMPTS: u32 = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct TransferExhausted {
    pub attempts: u32,
    pub detail: String
}

/// Builds a transfer, retrying exactly once with a payment to the token application.
pub struct TransferExecutor {
    contract: Arc<dyn TokenContract>,
    retry_payment: u64
}

impl TransferExecutor {
    pub fn new(contract: Arc<dyn TokenContract>, retry_payment: u64) -> Self {
        Self { contract, retry_payment }
    }

    pub async fn execute(&self, asset_id: AssetId, recipient: Address, amount: BaseUnits) -> Result<TransferAttempt, TransferExhausted> {
        let mut request = TransferRequest {
            asset_id,
            recipient,
            amount,
            payment_amount: None
        };

        let first = self.attempt(&request).await;

        if first.success {
            return Ok(first);
        }

        warn!(
            "Transfer of tokenId [{}] to [{}] failed: {}. Retrying with a payment of {}",
            asset_id, recipient, describe(&first), self.retry_payment
        );

        request.payment_amount = Some(self.retry_payment);
        let second = self.attempt(&request).await;

        if second.success {
            return Ok(second);
        }

        Err(TransferExhausted {
            attempts: MAX_ATTEMPTS,
            detail: describe(&second)
        })
    }

    async fn attempt(&self, request: &TransferRequest) -> TransferAttempt {
        match self.contract.transfer(request).await {
            Ok(attempt) => attempt,
            Err(error) => TransferAttempt::rejected(error.to_string(), request.payment_amount)
        }
    }
}

fn describe(attempt: &TransferAttempt) -> String {
    attempt.detail.clone().unwrap_or_else(|| "transfer was not accepted".to_string())
}
