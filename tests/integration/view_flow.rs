//! The view controller driving the real HTTP client.

use picpay_tui::{
    config::Config,
    controller::{
        Command, TRANSFER_COMPLETED, TRANSFER_FAILED, WALLET_CREATED, WalletView, dispatch,
    },
    infra::{api::HttpWalletApi, store::MemoryStore},
};
use serde_json::json;

use super::server::FakeService;

async fn setup(service: &FakeService) -> (WalletView, HttpWalletApi) {
    let base_url = service.spawn().await;
    let api = HttpWalletApi::new(Config::new(Some(&base_url), false)).unwrap();
    let view = WalletView::new(Box::new(MemoryStore::default()));
    (view, api)
}

/// Run a command and every follow-up it triggers.
async fn settle(view: &mut WalletView, api: &HttpWalletApi, mut next: Option<Command>) {
    while let Some(command) = next {
        next = view.apply(dispatch(api, command).await);
    }
}

fn count(service: &FakeService, request: &str) -> usize {
    service
        .requests()
        .iter()
        .filter(|(name, _)| name == request)
        .count()
}

#[tokio::test]
async fn test_create_wallet_round_trip() {
    let service = FakeService::default();
    let (mut view, api) = setup(&service).await;

    let command = view.init();
    settle(&mut view, &api, Some(command)).await;
    assert!(view.wallets.is_empty());

    view.wallet_form.full_name = "Loja do Zé".into();
    view.wallet_form.cpf = "11122233344".into();
    view.wallet_form.email = "ze@loja.com".into();
    view.wallet_form.password = "segredo".into();
    view.wallet_form.account_type = "0".into();
    view.wallet_form.initial_balance = "250,00".into();

    let command = view.on_create_wallet();
    settle(&mut view, &api, command).await;

    assert_eq!(view.success_message.as_deref(), Some(WALLET_CREATED));
    assert_eq!(view.error_message, None);
    assert!(!view.loading);
    assert_eq!(view.wallet_form.full_name, "");
    assert_eq!(view.wallet_form.account_type, "0");
    assert_eq!(view.wallet_form.initial_balance, "0");

    // One list at startup, exactly one reload after the creation.
    assert_eq!(count(&service, "GET /wallets"), 2);
    assert_eq!(view.wallets.len(), 1);
    assert_eq!(view.wallets[0].account_type, 0);
    assert_eq!(view.wallets[0].balance, 250.0);
}

#[tokio::test]
async fn test_transfer_between_listed_wallets() {
    let service = FakeService::with_wallets(json!([
        {"id": "w1", "fullName": "Ana", "cpf": "1", "email": "a@x.com", "type": "usuário", "balance": 100.0},
        {"id": "w2", "fullName": "Loja", "cpf": "2", "email": "l@x.com", "type": "lojista", "balance": 0.0}
    ]));
    let (mut view, api) = setup(&service).await;
    let command = view.load_wallets();
    settle(&mut view, &api, Some(command)).await;

    assert!(view.use_as_payer(0));
    assert!(view.use_as_payee(1));
    view.transfer_form.value = "40".into();

    let command = view.on_transfer();
    settle(&mut view, &api, command).await;

    assert_eq!(view.success_message.as_deref(), Some(TRANSFER_COMPLETED));
    assert_eq!(view.transfer_form.value, "0");
    assert_eq!(view.wallets[0].balance, 60.0);
    assert_eq!(view.wallets[1].balance, 40.0);
    assert!(view.wallets[1].is_shopkeeper());
    assert_eq!(
        service.requests().last().map(|(name, _)| name.as_str()),
        Some("GET /wallets")
    );
}

#[tokio::test]
async fn test_transfer_rejections() {
    let service = FakeService::default();
    service.update(|s| s.reject_transfer = Some("insufficient funds".to_string()));
    let (mut view, api) = setup(&service).await;

    view.transfer_form.payer_id = "w1".into();
    view.transfer_form.payee_id = "w2".into();
    view.transfer_form.value = "1000".into();

    let command = view.on_transfer();
    settle(&mut view, &api, command).await;
    assert_eq!(view.error_message.as_deref(), Some("insufficient funds"));
    assert!(!view.loading);
    assert_eq!(count(&service, "GET /wallets"), 0);

    service.update(|s| s.reject_transfer = Some(String::new()));
    let command = view.on_transfer();
    settle(&mut view, &api, command).await;
    assert_eq!(view.error_message.as_deref(), Some(TRANSFER_FAILED));

    service.update(|s| {
        s.reject_transfer = None;
        s.crash = true;
    });
    let command = view.on_transfer();
    settle(&mut view, &api, command).await;
    assert_eq!(view.error_message.as_deref(), Some(TRANSFER_FAILED));
    assert_eq!(view.wallets, Vec::new());
}

#[tokio::test]
async fn test_invalid_form_never_reaches_the_service() {
    let service = FakeService::default();
    let (mut view, api) = setup(&service).await;

    view.wallet_form.cpf = "11122233344".into();
    view.wallet_form.email = "ze@loja.com".into();
    view.wallet_form.password = "segredo".into();

    let command = view.on_create_wallet();
    assert!(command.is_none());
    settle(&mut view, &api, command).await;

    assert!(service.requests().is_empty());
    assert!(service.wallets().is_empty());
    assert_eq!(view.error_message, None);
}
