use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::chain::{EncodingError, SignedTransaction, SuggestedParams, Transaction};
use crate::config::ApiEndpoint;
use crate::network::api::ApiClient;
use crate::network::{NetworkError, TransactionSubmitter};
use crate::types::Round;

const TOKEN_HEADER: &str = "X-Algo-API-Token";
const BINARY: &str = "application/x-binary";
const MSGPACK: &str = "application/msgpack";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct TransactionParams {
    genesis_id: String,
    genesis_hash: String,
    last_round: Round,
    min_fee: u64
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct NodeStatus {
    last_round: Round
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct PendingTransaction {
    #[serde(default)]
    confirmed_round: Option<Round>,
    #[serde(default)]
    pool_error: String
}

#[derive(Debug, Deserialize)]
struct BroadcastResponse {
    #[serde(rename = "txId")]
    txid: String
}

#[derive(Debug, Serialize)]
struct SimulateRequest {
    #[serde(rename = "allow-empty-signatures")]
    allow_empty_signatures: bool,
    #[serde(rename = "allow-unnamed-resources")]
    allow_unnamed_resources: bool,
    #[serde(rename = "txn-groups")]
    txn_groups: Vec<SimulateRequestGroup>
}

#[derive(Debug, Serialize)]
struct SimulateRequestGroup {
    txns: Vec<SignedTransaction>
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct SimulateResponse {
    #[serde(default)]
    txn_groups: Vec<SimulationResult>
}

/// The evaluation of one transaction group by the node's simulator.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct SimulationResult {
    pub failure_message: Option<String>,
    pub txn_results: Vec<SimulatedTransaction>,
    pub unnamed_resources_accessed: Option<ResourcesAccessed>
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct SimulatedTransaction {
    pub txn_result: SimulatedEffects,
    pub unnamed_resources_accessed: Option<ResourcesAccessed>
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SimulatedEffects {
    pub logs: Vec<String>
}

/// Resources touched during simulation that the group did not reference explicitly.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ResourcesAccessed {
    pub accounts: Vec<String>,
    pub apps: Vec<u64>,
    pub boxes: Vec<BoxAccess>,
    pub extra_box_refs: u64
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct BoxAccess {
    pub app: u64,
    /// Base64 box name.
    pub name: String
}

impl SimulationResult {
    pub fn failure(&self) -> Option<&str> {
        self.failure_message.as_deref().filter(|message| !message.is_empty())
    }

    /// Decoded logs of the last transaction in the group.
    pub fn last_logs(&self) -> Result<Vec<Vec<u8>>, NetworkError> {
        let Some(last) = self.txn_results.last() else {
            return Ok(Vec::new());
        };

        last.txn_result.logs.iter()
            .map(|log| STANDARD.decode(log).map_err(|error| NetworkError::from(EncodingError::from(error))))
            .collect()
    }

    /// Group level and per transaction resources, merged.
    pub fn resources(&self) -> ResourcesAccessed {
        let mut merged = ResourcesAccessed::default();
        let all = self.unnamed_resources_accessed.iter()
            .chain(self.txn_results.iter().filter_map(|result| result.unnamed_resources_accessed.as_ref()));

        for resources in all {
            merged.accounts.extend(resources.accounts.iter().cloned());
            merged.apps.extend(resources.apps.iter().copied());
            merged.boxes.extend(resources.boxes.iter().cloned());
            merged.extra_box_refs += resources.extra_box_refs;
        }

        merged
    }
}

/// Client for the execution node (algod) REST API.
pub struct AlgodClient {
    api: ApiClient
}

impl AlgodClient {
    pub fn new(endpoint: &ApiEndpoint, timeout: Duration) -> Result<Self, NetworkError> {
        Ok(Self {
            api: ApiClient::new(endpoint, TOKEN_HEADER, timeout)?
        })
    }

    pub async fn suggested_params(&self) -> Result<SuggestedParams, NetworkError> {
        let params: TransactionParams = self.api.get_json("/v2/transactions/params").await?;
        let genesis_hash = STANDARD.decode(&params.genesis_hash).map_err(EncodingError::from)?;

        Ok(SuggestedParams {
            genesis_id: params.genesis_id,
            genesis_hash,
            last_round: params.last_round,
            min_fee: params.min_fee
        })
    }

    /// Evaluates a single group without signatures and without committing it.
    pub async fn simulate(&self, transactions: &[Transaction]) -> Result<SimulationResult, NetworkError> {
        let request = SimulateRequest {
            allow_empty_signatures: true,
            allow_unnamed_resources: true,
            txn_groups: vec![SimulateRequestGroup {
                txns: transactions.iter().cloned().map(SignedTransaction::unsigned).collect()
            }]
        };
        let body = rmp_serde::to_vec_named(&request).map_err(EncodingError::from)?;
        let response: SimulateResponse = self.api
            .post_bytes("/v2/transactions/simulate?format=json", MSGPACK, body)
            .await?;

        response.txn_groups.into_iter().next()
            .ok_or_else(|| NetworkError::InvalidResponse("simulation returned no transaction groups".to_string()))
    }
}

#[async_trait]
impl TransactionSubmitter for AlgodClient {
    async fn send_raw(&self, signed: &[Vec<u8>]) -> Result<String, NetworkError> {
        let response: BroadcastResponse = self.api
            .post_bytes("/v2/transactions", BINARY, signed.concat())
            .await?;

        Ok(response.txid)
    }

    async fn wait_for_confirmation(&self, txid: &str, rounds: Round) -> Result<Round, NetworkError> {
        let status: NodeStatus = self.api.get_json("/v2/status").await?;
        let start_round = status.last_round + 1;
        let mut current_round = start_round;

        while current_round < start_round + rounds {
            match self.api.get_json::<PendingTransaction>(&format!("/v2/transactions/pending/{txid}?format=json")).await {
                Ok(pending) => {
                    if let Some(confirmed_round) = pending.confirmed_round.filter(|round| *round > 0) {
                        return Ok(confirmed_round);
                    }

                    if !pending.pool_error.is_empty() {
                        return Err(NetworkError::Rejected {
                            txid: txid.to_string(),
                            reason: pending.pool_error
                        });
                    }
                },
                Err(error) => {
                    //NOTE: The node may not know the transaction yet, keep waiting until the round budget runs out
                    debug!("Pending lookup for [{txid}] failed: {error}");
                }
            }

            let _: NodeStatus = self.api
                .get_json(&format!("/v2/status/wait-for-block-after/{current_round}"))
                .await?;
            current_round += 1;
        }

        Err(NetworkError::NotConfirmed {
            txid: txid.to_string(),
            rounds
        })
    }
}
