use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use data_encoding::BASE32_NOPAD;
use serde::{Deserialize, Serialize};
use serde_bytes::ByteBuf;

use crate::chain::errors::EncodingError;
use crate::chain::OperatorIdentity;
use crate::types::{sha512_256, Address, AssetId, Round};

const PAYMENT: &str = "pay";
const APPLICATION_CALL: &str = "appl";
const VALIDITY_WINDOW: Round = 1000;

/// Network parameters every new transaction is stamped with.
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestedParams {
    pub genesis_id: String,
    pub genesis_hash: Vec<u8>,
    pub last_round: Round,
    pub min_fee: u64
}

/// A reference to an application box the call is allowed to touch.
///
/// `index` is 0 for the called application itself, otherwise the 1-based
/// position in the foreign applications list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxReference {
    #[serde(rename = "i", skip_serializing_if = "is_zero")]
    pub index: u64,
    #[serde(rename = "n", skip_serializing_if = "Option::is_none")]
    pub name: Option<ByteBuf>
}

/// An unsigned transaction.
///
/// Fields are declared in key order and empty fields are skipped, so serializing
/// with named msgpack maps yields the canonical encoding that is hashed and signed.
/// Decoding refuses fields this type does not model, since dropping them would
/// change what gets signed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Transaction {
    #[serde(rename = "amt", skip_serializing_if = "Option::is_none")]
    pub amount: Option<u64>,
    #[serde(rename = "apaa", skip_serializing_if = "Vec::is_empty")]
    pub app_arguments: Vec<ByteBuf>,
    #[serde(rename = "apat", skip_serializing_if = "Vec::is_empty")]
    pub app_accounts: Vec<Address>,
    #[serde(rename = "apbx", skip_serializing_if = "Vec::is_empty")]
    pub app_boxes: Vec<BoxReference>,
    #[serde(rename = "apfa", skip_serializing_if = "Vec::is_empty")]
    pub app_foreign_apps: Vec<AssetId>,
    #[serde(rename = "apid", skip_serializing_if = "Option::is_none")]
    pub app_id: Option<AssetId>,
    #[serde(rename = "fee", skip_serializing_if = "Option::is_none")]
    pub fee: Option<u64>,
    #[serde(rename = "fv", skip_serializing_if = "Option::is_none")]
    pub first_valid: Option<Round>,
    #[serde(rename = "gen", skip_serializing_if = "String::is_empty")]
    pub genesis_id: String,
    #[serde(rename = "gh", skip_serializing_if = "Option::is_none")]
    pub genesis_hash: Option<ByteBuf>,
    #[serde(rename = "grp", skip_serializing_if = "Option::is_none")]
    pub group: Option<ByteBuf>,
    #[serde(rename = "lv", skip_serializing_if = "Option::is_none")]
    pub last_valid: Option<Round>,
    #[serde(rename = "rcv", skip_serializing_if = "Option::is_none")]
    pub receiver: Option<Address>,
    #[serde(rename = "snd")]
    pub sender: Address,
    #[serde(rename = "type")]
    pub kind: String
}

impl Transaction {
    pub fn payment(params: &SuggestedParams, sender: Address, receiver: Address, amount: u64) -> Self {
        Self {
            amount: (amount > 0).then_some(amount),
            receiver: Some(receiver),
            kind: PAYMENT.to_string(),
            ..Self::stamped(params, sender)
        }
    }

    pub fn application_call(params: &SuggestedParams, sender: Address, app_id: AssetId, arguments: Vec<Vec<u8>>) -> Self {
        Self {
            app_arguments: arguments.into_iter().map(ByteBuf::from).collect(),
            app_id: Some(app_id),
            kind: APPLICATION_CALL.to_string(),
            ..Self::stamped(params, sender)
        }
    }

    fn stamped(params: &SuggestedParams, sender: Address) -> Self {
        Self {
            fee: Some(params.min_fee),
            first_valid: Some(params.last_round),
            last_valid: Some(params.last_round + VALIDITY_WINDOW),
            genesis_id: params.genesis_id.clone(),
            genesis_hash: Some(ByteBuf::from(params.genesis_hash.clone())),
            sender,
            ..Self::default()
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>, EncodingError> {
        Ok(rmp_serde::to_vec_named(self)?)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, EncodingError> {
        Ok(rmp_serde::from_slice(bytes)?)
    }

    pub fn to_base64(&self) -> Result<String, EncodingError> {
        Ok(STANDARD.encode(self.encode()?))
    }

    pub fn from_base64(payload: &str) -> Result<Self, EncodingError> {
        Self::decode(&STANDARD.decode(payload)?)
    }

    pub fn raw_id(&self) -> Result<[u8; 32], EncodingError> {
        Ok(sha512_256(&[b"TX", &self.encode()?]))
    }

    pub fn id(&self) -> Result<String, EncodingError> {
        Ok(BASE32_NOPAD.encode(&self.raw_id()?))
    }

    pub fn sign(self, identity: &OperatorIdentity) -> Result<SignedTransaction, EncodingError> {
        let mut message = b"TX".to_vec();
        message.extend_from_slice(&self.encode()?);
        let signature = identity.sign(&message);

        Ok(SignedTransaction {
            signature: Some(ByteBuf::from(signature.to_vec())),
            transaction: self
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedTransaction {
    #[serde(rename = "sig", default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<ByteBuf>,
    #[serde(rename = "txn")]
    pub transaction: Transaction
}

impl SignedTransaction {
    /// Wraps a transaction without a signature, as accepted by simulation.
    pub fn unsigned(transaction: Transaction) -> Self {
        Self { signature: None, transaction }
    }

    pub fn id(&self) -> Result<String, EncodingError> {
        self.transaction.id()
    }

    pub fn encode(&self) -> Result<Vec<u8>, EncodingError> {
        Ok(rmp_serde::to_vec_named(self)?)
    }
}

#[derive(Serialize)]
struct TransactionGroup {
    #[serde(rename = "txlist")]
    transaction_ids: Vec<ByteBuf>
}

/// Binds transactions into an atomic group. Any existing group id is replaced.
///
/// A single transaction is left ungrouped.
pub fn assign_group(transactions: &mut [Transaction]) -> Result<(), EncodingError> {
    for transaction in transactions.iter_mut() {
        transaction.group = None;
    }

    if transactions.len() < 2 {
        return Ok(());
    }

    let transaction_ids = transactions.iter()
        .map(|transaction| transaction.raw_id().map(|id| ByteBuf::from(id.to_vec())))
        .collect::<Result<Vec<_>, _>>()?;

    let payload = rmp_serde::to_vec_named(&TransactionGroup { transaction_ids })?;
    let group = sha512_256(&[b"TG", &payload]);

    for transaction in transactions.iter_mut() {
        transaction.group = Some(ByteBuf::from(group.to_vec()));
    }

    Ok(())
}

fn is_zero(value: &u64) -> bool {
    *value == 0
}
