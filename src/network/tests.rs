use super::{AccountLookup, AlgodClient, IndexerClient, NetworkError, TransactionSubmitter};

use std::time::Duration;

use anyhow::Result;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_bytes, header, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::chain::{SuggestedParams, Transaction};
use crate::config::ApiEndpoint;
use crate::types::Address;

const TIMEOUT: Duration = Duration::from_secs(5);

fn endpoint(server: &MockServer, token: &str) -> Result<ApiEndpoint> {
    Ok(ApiEndpoint {
        url: Url::parse(&server.uri())?,
        token: token.to_string()
    })
}

fn recipient() -> Address {
    Address::from_public_key([5u8; 32])
}

async fn mount_status(server: &MockServer, last_round: u64) {
    Mock::given(method("GET"))
        .and(path("/v2/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "last-round": last_round })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/v2/status/wait-for-block-after/\d+$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "last-round": last_round + 1 })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_indexer_reports_signature_type_of_known_accounts() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/v2/accounts/{}", recipient())))
        .and(header("X-Indexer-API-Token", "indexer-secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "account": { "address": recipient().to_string(), "amount": 1000, "sig-type": "sig" },
            "current-round": 12
        })))
        .expect(1)
        .mount(&server)
        .await;

    let indexer = IndexerClient::new(&endpoint(&server, "indexer-secret")?, TIMEOUT)?;

    assert_eq!(indexer.signature_type(&recipient()).await?, Some("sig".to_string()));

    Ok(())
}

#[tokio::test]
async fn test_indexer_treats_unsigned_and_unknown_accounts_as_without_authorization() -> Result<()> {
    let server = MockServer::start().await;
    let unknown = Address::from_public_key([6u8; 32]);

    Mock::given(method("GET"))
        .and(path(format!("/v2/accounts/{}", recipient())))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "account": { "address": recipient().to_string(), "amount": 0 }
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/v2/accounts/{unknown}")))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "no accounts found" })))
        .mount(&server)
        .await;

    let indexer = IndexerClient::new(&endpoint(&server, "")?, TIMEOUT)?;

    assert_eq!(indexer.signature_type(&recipient()).await?, None);
    assert_eq!(indexer.signature_type(&unknown).await?, None);

    Ok(())
}

#[tokio::test]
async fn test_indexer_server_errors_are_surfaced() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let indexer = IndexerClient::new(&endpoint(&server, "")?, TIMEOUT)?;
    let result = indexer.signature_type(&recipient()).await;

    assert!(matches!(result, Err(NetworkError::Status { status: 500, .. })));

    Ok(())
}

#[tokio::test]
async fn test_algod_decodes_suggested_params() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/transactions/params"))
        .and(header("X-Algo-API-Token", "algod-secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "consensus-version": "future",
            "fee": 0,
            "genesis-hash": "CQkJCQkJCQkJCQkJCQkJCQkJCQkJCQkJCQkJCQkJCQk=",
            "genesis-id": "voitest-v1",
            "last-round": 5000,
            "min-fee": 1000
        })))
        .mount(&server)
        .await;

    let algod = AlgodClient::new(&endpoint(&server, "algod-secret")?, TIMEOUT)?;
    let params = algod.suggested_params().await?;

    assert_eq!(params, SuggestedParams {
        genesis_id: "voitest-v1".to_string(),
        genesis_hash: vec![9u8; 32],
        last_round: 5000,
        min_fee: 1000
    });

    Ok(())
}

#[tokio::test]
async fn test_algod_simulation_exposes_failures_logs_and_resources() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/transactions/simulate"))
        .and(header("Content-Type", "application/msgpack"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "version": 2,
            "last-round": 5000,
            "txn-groups": [{
                "failure-message": "",
                "txn-results": [
                    { "txn-result": { "pool-error": "" } },
                    {
                        "txn-result": { "logs": ["AQID", "FR98dYA="] },
                        "unnamed-resources-accessed": { "boxes": [{ "app": 42, "name": "AAE=" }] }
                    }
                ],
                "unnamed-resources-accessed": { "accounts": [recipient().to_string()], "extra-box-refs": 1 }
            }]
        })))
        .mount(&server)
        .await;

    let algod = AlgodClient::new(&endpoint(&server, "")?, TIMEOUT)?;
    let call = Transaction { app_id: Some(42), kind: "appl".to_string(), ..Transaction::default() };
    let result = algod.simulate(&[call]).await?;

    assert_eq!(result.failure(), None);
    assert_eq!(result.last_logs()?, vec![vec![1, 2, 3], vec![0x15, 0x1f, 0x7c, 0x75, 0x80]]);

    let resources = result.resources();

    assert_eq!(resources.accounts, vec![recipient().to_string()]);
    assert_eq!(resources.boxes.len(), 1);
    assert_eq!(resources.boxes[0].app, 42);
    assert_eq!(resources.extra_box_refs, 1);

    Ok(())
}

#[tokio::test]
async fn test_algod_broadcasts_concatenated_signed_transactions() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/transactions"))
        .and(header("Content-Type", "application/x-binary"))
        .and(body_bytes(vec![1u8, 2, 3, 4, 5]))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "txId": "FIRSTTXID" })))
        .expect(1)
        .mount(&server)
        .await;

    let algod = AlgodClient::new(&endpoint(&server, "")?, TIMEOUT)?;
    let txid = algod.send_raw(&[vec![1, 2], vec![3, 4, 5]]).await?;

    assert_eq!(txid, "FIRSTTXID");

    Ok(())
}

#[tokio::test]
async fn test_algod_rejected_broadcast_is_an_error() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/transactions"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "message": "overspend" })))
        .mount(&server)
        .await;

    let algod = AlgodClient::new(&endpoint(&server, "")?, TIMEOUT)?;
    let result = algod.send_raw(&[vec![1]]).await;

    assert!(matches!(result, Err(NetworkError::Status { status: 400, .. })));

    Ok(())
}

#[tokio::test]
async fn test_confirmation_returns_the_confirmed_round() -> Result<()> {
    let server = MockServer::start().await;
    mount_status(&server, 100).await;

    Mock::given(method("GET"))
        .and(path("/v2/transactions/pending/TXONE"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "confirmed-round": 101, "pool-error": "" })))
        .mount(&server)
        .await;

    let algod = AlgodClient::new(&endpoint(&server, "")?, TIMEOUT)?;

    assert_eq!(algod.wait_for_confirmation("TXONE", 4).await?, 101);

    Ok(())
}

#[tokio::test]
async fn test_confirmation_fails_on_pool_error() -> Result<()> {
    let server = MockServer::start().await;
    mount_status(&server, 100).await;

    Mock::given(method("GET"))
        .and(path("/v2/transactions/pending/TXBAD"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "pool-error": "transaction already in ledger" })))
        .mount(&server)
        .await;

    let algod = AlgodClient::new(&endpoint(&server, "")?, TIMEOUT)?;
    let result = algod.wait_for_confirmation("TXBAD", 4).await;

    assert!(matches!(result, Err(NetworkError::Rejected { ref reason, .. }) if reason == "transaction already in ledger"));

    Ok(())
}

#[tokio::test]
async fn test_confirmation_gives_up_after_the_round_budget() -> Result<()> {
    let server = MockServer::start().await;
    mount_status(&server, 100).await;

    Mock::given(method("GET"))
        .and(path("/v2/transactions/pending/TXSLOW"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "pool-error": "" })))
        .expect(4)
        .mount(&server)
        .await;

    let algod = AlgodClient::new(&endpoint(&server, "")?, TIMEOUT)?;
    let result = algod.wait_for_confirmation("TXSLOW", 4).await;

    assert!(matches!(result, Err(NetworkError::NotConfirmed { rounds: 4, .. })));

    Ok(())
}
