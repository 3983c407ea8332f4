//! `HttpWalletApi` against the fake service.

use picpay_tui::{
    config::Config,
    domain::wallet::{RawAccountType, TransferRequest, WalletCreationRequest},
    infra::api::{ApiErrorKind, HttpWalletApi, WalletApi},
};
use serde_json::json;

use super::server::FakeService;

fn client(base_url: &str) -> HttpWalletApi {
    HttpWalletApi::new(Config::new(Some(base_url), false)).unwrap()
}

#[tokio::test]
async fn test_list_wallets_keeps_raw_types() {
    let service = FakeService::with_wallets(json!([
        {"id": "a", "fullName": "Loja", "cpf": "1", "email": "l@x.com", "type": "Shopkeeper", "balance": 10.0},
        {"id": 2, "fullName": "Ana", "cpf": "2", "email": "a@x.com", "type": 1, "balance": 2.5}
    ]));
    let api = client(&service.spawn().await);

    let records = api.list_wallets().await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(
        records[0].account_type,
        Some(RawAccountType::Label("Shopkeeper".to_string()))
    );
    assert_eq!(records[1].id.as_deref(), Some("2"));
    assert_eq!(records[1].account_type, Some(RawAccountType::Code(1)));
}

#[tokio::test]
async fn test_create_wallet_posts_camel_case_body() {
    let service = FakeService::default();
    let api = client(&service.spawn().await);

    api.create_wallet(&WalletCreationRequest {
        full_name: "Ana Souza".into(),
        cpf: "12345678900".into(),
        email: "ana@example.com".into(),
        password: "hunter2".into(),
        account_type: 0,
        initial_balance: 100.0,
    })
    .await
    .unwrap();

    let requests = service.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].0, "POST /wallets");
    assert_eq!(
        requests[0].1,
        json!({
            "fullName": "Ana Souza",
            "cpf": "12345678900",
            "email": "ana@example.com",
            "password": "hunter2",
            "type": 0,
            "initialBalance": 100.0
        })
    );
}

#[tokio::test]
async fn test_rejection_carries_server_message() {
    let service = FakeService::default();
    service.update(|s| s.reject_transfer = Some("insufficient funds".to_string()));
    let api = client(&service.spawn().await);

    let err = api
        .transfer(&TransferRequest {
            payer_id: "a".into(),
            payee_id: "b".into(),
            value: 5.0,
        })
        .await
        .unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::Remote { status: 400 });
    assert_eq!(err.message.as_deref(), Some("insufficient funds"));
}

#[tokio::test]
async fn test_bare_server_error_has_no_message() {
    let service = FakeService::default();
    service.update(|s| s.crash = true);
    let api = client(&service.spawn().await);

    let err = api.list_wallets().await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Remote { status: 500 });
    assert_eq!(err.message, None);
}

#[tokio::test]
async fn test_malformed_list_is_a_decode_error() {
    let service = FakeService::default();
    service.update(|s| s.malformed_list = true);
    let api = client(&service.spawn().await);

    let err = api.list_wallets().await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Decode);
}

#[tokio::test]
async fn test_unreachable_service_is_a_transport_error() {
    // Grab a free port and release it so nothing is listening there.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);

    let api = client(&format!("http://{address}"));
    let err = api.list_wallets().await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Transport);
    assert_eq!(err.message, None);
}
