use super::{Arc200Contract, ContractError, TokenContract};

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::chain::{assign_group, method_selector, Transaction};
use crate::config::ApiEndpoint;
use crate::models::TransferRequest;
use crate::network::AlgodClient;
use crate::types::{Address, BaseUnits};

const TOKEN: u64 = 42;

fn operator() -> Address {
    Address::from_public_key([1u8; 32])
}

fn recipient() -> Address {
    Address::from_public_key([2u8; 32])
}

fn return_log(value: u8) -> String {
    STANDARD.encode([0x15, 0x1f, 0x7c, 0x75, value])
}

async fn start_node(simulation: Value) -> Result<(MockServer, Arc200Contract)> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/transactions/params"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "genesis-hash": STANDARD.encode([7u8; 32]),
            "genesis-id": "voitest-v1",
            "last-round": 200,
            "min-fee": 1000
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v2/transactions/simulate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(simulation))
        .mount(&server)
        .await;

    let endpoint = ApiEndpoint { url: Url::parse(&server.uri())?, token: String::new() };
    let algod = Arc::new(AlgodClient::new(&endpoint, Duration::from_secs(5))?);

    Ok((server, Arc200Contract::new(algod, operator())))
}

fn request(payment_amount: Option<u64>) -> Result<TransferRequest> {
    Ok(TransferRequest {
        asset_id: TOKEN,
        recipient: recipient(),
        amount: BaseUnits::from_display(Decimal::from_str("1.23")?, 6)?,
        payment_amount
    })
}

#[tokio::test]
async fn test_decimals_are_read_from_the_return_log() -> Result<()> {
    let (_server, contract) = start_node(json!({
        "txn-groups": [{ "txn-results": [{ "txn-result": { "logs": [return_log(6)] } }] }]
    })).await?;

    assert_eq!(contract.decimals(TOKEN).await?, 6);

    Ok(())
}

#[tokio::test]
async fn test_decimals_failure_is_reported() -> Result<()> {
    let (_server, contract) = start_node(json!({
        "txn-groups": [{ "failure-message": "logic eval error: assert failed", "txn-results": [] }]
    })).await?;

    assert!(matches!(contract.decimals(TOKEN).await, Err(ContractError::CallFailed { .. })));

    let (_server, contract) = start_node(json!({
        "txn-groups": [{ "txn-results": [{ "txn-result": { "logs": [] } }] }]
    })).await?;

    assert!(matches!(contract.decimals(TOKEN).await, Err(ContractError::MissingReturn { .. })));

    Ok(())
}

#[tokio::test]
async fn test_transfer_builds_a_plain_call_without_payment() -> Result<()> {
    let (_server, contract) = start_node(json!({
        "txn-groups": [{ "txn-results": [{ "txn-result": { "logs": [return_log(0x80)] } }] }]
    })).await?;

    let attempt = contract.transfer(&request(None)?).await?;

    assert!(attempt.success);
    assert_eq!(attempt.txns.len(), 1);

    let call = Transaction::from_base64(&attempt.txns[0])?;

    assert_eq!(call.kind, "appl");
    assert_eq!(call.app_id, Some(TOKEN));
    assert_eq!(call.sender, operator());
    assert!(call.group.is_none());
    assert_eq!(call.app_arguments[0].as_slice(), method_selector("arc200_transfer(address,uint256)bool").as_slice());
    assert_eq!(call.app_arguments[1].as_slice(), recipient().as_bytes().as_slice());
    assert_eq!(call.app_arguments[2].as_slice(), request(None)?.amount.to_uint256().as_slice());

    Ok(())
}

#[tokio::test]
async fn test_transfer_with_payment_builds_a_funded_group_with_resources() -> Result<()> {
    let box_name = STANDARD.encode(recipient().as_bytes());
    let (_server, contract) = start_node(json!({
        "txn-groups": [{
            "txn-results": [
                { "txn-result": {} },
                {
                    "txn-result": { "logs": [return_log(0x80)] },
                    "unnamed-resources-accessed": { "boxes": [{ "app": TOKEN, "name": box_name }] }
                }
            ],
            "unnamed-resources-accessed": { "accounts": [recipient().to_string()] }
        }]
    })).await?;

    let attempt = contract.transfer(&request(Some(285_000))?).await?;

    assert!(attempt.success);
    assert_eq!(attempt.payment_amount, Some(285_000));
    assert_eq!(attempt.txns.len(), 2);

    let payment = Transaction::from_base64(&attempt.txns[0])?;
    let call = Transaction::from_base64(&attempt.txns[1])?;

    assert_eq!(payment.kind, "pay");
    assert_eq!(payment.amount, Some(285_000));
    assert_eq!(payment.receiver, Some(Address::for_application(TOKEN)));
    assert_eq!(call.app_accounts, vec![recipient()]);
    assert_eq!(call.app_boxes.len(), 1);
    assert_eq!(call.app_boxes[0].index, 0);
    assert_eq!(call.app_boxes[0].name.as_deref().map(|name| name.as_slice()), Some(recipient().as_bytes().as_slice()));

    let mut regrouped = vec![payment.clone(), call.clone()];
    assign_group(&mut regrouped)?;

    assert!(payment.group.is_some());
    assert_eq!(payment.group, call.group);
    assert_eq!(regrouped[0].group, payment.group);

    Ok(())
}

#[tokio::test]
async fn test_transfer_refused_by_the_simulator_is_a_failed_attempt() -> Result<()> {
    let (_server, contract) = start_node(json!({
        "txn-groups": [{ "failure-message": "transaction rejected by ApprovalProgram", "txn-results": [] }]
    })).await?;

    let attempt = contract.transfer(&request(None)?).await?;

    assert!(!attempt.success);
    assert!(attempt.txns.is_empty());
    assert_eq!(attempt.detail.as_deref(), Some("transaction rejected by ApprovalProgram"));

    let (_server, contract) = start_node(json!({
        "txn-groups": [{ "txn-results": [{ "txn-result": { "logs": [return_log(0)] } }] }]
    })).await?;

    assert!(!contract.transfer(&request(None)?).await?.success);

    Ok(())
}
