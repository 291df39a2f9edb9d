use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::ApiEndpoint;
use crate::network::api::ApiClient;
use crate::network::{AccountLookup, NetworkError};
use crate::types::Address;

const TOKEN_HEADER: &str = "X-Indexer-API-Token";

#[derive(Debug, Deserialize)]
struct AccountResponse {
    account: AccountState
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct AccountState {
    #[serde(default)]
    sig_type: Option<String>
}

pub struct IndexerClient {
    api: ApiClient
}

impl IndexerClient {
    pub fn new(endpoint: &ApiEndpoint, timeout: Duration) -> Result<Self, NetworkError> {
        Ok(Self {
            api: ApiClient::new(endpoint, TOKEN_HEADER, timeout)?
        })
    }
}

#[async_trait]
impl AccountLookup for IndexerClient {
    async fn signature_type(&self, address: &Address) -> Result<Option<String>, NetworkError> {
        let response: Option<AccountResponse> = self.api
            .get_json_if_found(&format!("/v2/accounts/{address}?exclude=all"))
            .await?;

        Ok(response
            .and_then(|response| response.account.sig_type)
            .filter(|sig_type| !sig_type.is_empty()))
    }
}
