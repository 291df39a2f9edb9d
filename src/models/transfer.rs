use crate::types::{Address, AssetId, BaseUnits};

#[derive(Debug, Clone, PartialEq)]
pub struct TransferRequest {
    pub asset_id: AssetId,
    pub recipient: Address,
    pub amount: BaseUnits,
    /// Payment to the token's application account sent ahead of the call, only set on retry.
    pub payment_amount: Option<u64>
}

/// The result of building (not yet submitting) a transfer.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferAttempt {
    pub success: bool,
    /// Base64 encoded unsigned transactions, in group order.
    pub txns: Vec<String>,
    pub payment_amount: Option<u64>,
    /// Why the attempt was refused, when it was.
    pub detail: Option<String>
}

impl TransferAttempt {
    pub fn accepted(txns: Vec<String>, payment_amount: Option<u64>) -> Self {
        Self {
            success: true,
            txns,
            payment_amount,
            detail: None
        }
    }

    pub fn rejected(detail: impl Into<String>, payment_amount: Option<u64>) -> Self {
        Self {
            success: false,
            txns: Vec::new(),
            payment_amount,
            detail: Some(detail.into())
        }
    }
}
