//! Bridge client against a mock REST gateway, through the real retrying transport

use std::path::PathBuf;
use std::sync::Arc;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use chain_bridge::chain::{BridgeClient, BridgeError, Keyring, StaticKeys};
use chain_bridge::config::{BridgeConfig, HttpConfig};

const SIGNER: &str = "human1integration";

fn http_config(max_retries: u32) -> HttpConfig {
    HttpConfig {
        max_retries,
        initial_backoff_ms: 0,
        max_backoff_ms: 0,
        timeout_secs: 5,
    }
}

fn client_for(host: &str, max_retries: u32) -> BridgeClient {
    let cfg = BridgeConfig {
        chain_id: "human_1-1".to_string(),
        chain_host: host.to_string(),
        chain_rpc: "127.0.0.1:26657".to_string(),
        chain_home_folder: PathBuf::from("/tmp/bridge"),
        tx_data_path: "/humans/bridge/transaction_data".to_string(),
    };
    let keys = StaticKeys::new(SIGNER, Keyring::new("test", cfg.chain_home_folder.clone(), "bridge"));
    BridgeClient::new(Arc::new(keys), &cfg, &http_config(max_retries), "bridge", "", "").unwrap()
}

fn latest_block(height: u64) -> serde_json::Value {
    serde_json::json!({
        "block_id": {"hash": "AA=="},
        "block": {"header": {"chain_id": "human_1-1", "height": height.to_string()}}
    })
}

#[tokio::test]
async fn test_block_height_fetched_once_within_ttl() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cosmos/base/tendermint/v1beta1/blocks/latest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(latest_block(777)))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server.uri(), 0);
    assert_eq!(client.block_height().await.unwrap(), 777);
    assert_eq!(client.block_height().await.unwrap(), 777);
}

#[tokio::test]
async fn test_server_error_is_retried_then_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cosmos/base/tendermint/v1beta1/blocks/latest"))
        .respond_with(ResponseTemplate::new(500).set_body_string("node is syncing"))
        .expect(3)
        .mount(&server)
        .await;

    let client = client_for(&server.uri(), 2);
    let err = client.block_height().await.unwrap_err();

    assert!(err.is_transport());
    assert!(matches!(err, BridgeError::Status { .. }));
    let msg = err.to_string();
    assert!(msg.contains("500 Internal Server Error"), "{}", msg);
    assert!(msg.contains("node is syncing"), "{}", msg);
}

#[tokio::test]
async fn test_not_found_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such account"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server.uri(), 3);
    let err = client.account_number_and_sequence().await.unwrap_err();
    assert_eq!(err.status(), Some(reqwest::StatusCode::NOT_FOUND));
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/cosmos/auth/v1beta1/accounts/{}", SIGNER)))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"account\": "))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server.uri(), 3);
    let err = client.account_number_and_sequence().await.unwrap_err();
    assert!(err.is_decode(), "{}", err);
    assert!(!err.is_transport());
}

#[tokio::test]
async fn test_account_and_sequence_lease() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/cosmos/auth/v1beta1/accounts/{}", SIGNER)))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "account": {
                "@type": "/ethermint.types.v1.EthAccount",
                "base_account": {"address": SIGNER, "account_number": "11", "sequence": "20"},
                "code_hash": "0x00"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server.uri(), 0);
    let lease = client.lock_sequence().await.unwrap();
    assert_eq!((lease.account_number(), lease.sequence()), (11, 20));
    assert_eq!(lease.confirm(), 21);
    assert_eq!(client.lock_sequence().await.unwrap().sequence(), 21);
}

#[tokio::test]
async fn test_tx_data_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/humans/bridge/transaction_data/Ethereum"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "transactionData": [{
                "index": "0x5c504ed432cb51138bcf09aa5e8a410dd4a1e204ef84bfed1be16dfba1b22060",
                "originChain": "Ethereum",
                "targetChain": "HUMANS",
                "amount": "2500000",
                "status": "confirmed"
            }],
            "pagination": {"next_key": null, "total": "1"}
        })))
        .mount(&server)
        .await;

    let client = client_for(&server.uri(), 0);
    let list = client.tx_data_list("Ethereum").await.unwrap();
    assert_eq!(list.transaction_data.len(), 1);

    let entry = &list.transaction_data[0];
    assert_eq!(entry.origin_chain, "Ethereum");
    assert_eq!(
        entry.tx_id().unwrap().as_str(),
        "0X5C504ED432CB51138BCF09AA5E8A410DD4A1E204EF84BFED1BE16DFBA1B22060"
    );
}

#[tokio::test]
async fn test_unreachable_host_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(&addr.to_string(), 1);
    let err = client.block_height().await.unwrap_err();
    assert!(err.is_transport(), "{}", err);
    assert!(matches!(err, BridgeError::Transport { .. }));
}
