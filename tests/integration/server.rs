//! Fake wallet service built on axum.

use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use tokio::net::TcpListener;

#[derive(Default)]
pub struct ServiceState {
    pub wallets: Vec<Value>,
    pub requests: Vec<(String, Value)>,
    /// Answer `POST /wallets` with 400 and this message.
    pub reject_wallets: Option<String>,
    /// Answer `POST /transfer` with 400 and this message.
    pub reject_transfer: Option<String>,
    /// Answer every call with a bare 500.
    pub crash: bool,
    /// Answer `GET /wallets` with something that is not a list.
    pub malformed_list: bool,
    next_id: usize,
}

#[derive(Clone, Default)]
pub struct FakeService {
    pub state: Arc<Mutex<ServiceState>>,
}

impl FakeService {
    pub fn with_wallets(wallets: Value) -> Self {
        let service = Self::default();
        {
            let mut state = service.state.lock().unwrap();
            state.wallets = wallets.as_array().cloned().unwrap_or_default();
            state.next_id = state.wallets.len();
        }
        service
    }

    pub fn update(&self, f: impl FnOnce(&mut ServiceState)) {
        f(&mut self.state.lock().unwrap());
    }

    pub fn requests(&self) -> Vec<(String, Value)> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn wallets(&self) -> Vec<Value> {
        self.state.lock().unwrap().wallets.clone()
    }

    /// Serve on a random local port and return the base URL.
    pub async fn spawn(&self) -> String {
        let router = Router::new()
            .route("/wallets", get(list_wallets).post(create_wallet))
            .route("/transfer", post(transfer))
            .with_state(self.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{address}")
    }
}

fn bad_request(message: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "message": message }))).into_response()
}

async fn list_wallets(State(service): State<FakeService>) -> Response {
    let mut state = service.state.lock().unwrap();
    state.requests.push(("GET /wallets".to_string(), Value::Null));
    if state.crash {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    if state.malformed_list {
        return Json(json!({ "wallets": "soon" })).into_response();
    }
    Json(Value::Array(state.wallets.clone())).into_response()
}

async fn create_wallet(State(service): State<FakeService>, Json(body): Json<Value>) -> Response {
    let mut state = service.state.lock().unwrap();
    state.requests.push(("POST /wallets".to_string(), body.clone()));
    if state.crash {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    if let Some(message) = state.reject_wallets.clone() {
        return bad_request(&message);
    }

    state.next_id += 1;
    // The service reports the type as a label, not the code it was sent.
    let label = if body["type"] == json!(0) { "Shopkeeper" } else { "User" };
    let wallet = json!({
        "id": format!("w{}", state.next_id),
        "fullName": body["fullName"],
        "cpf": body["cpf"],
        "email": body["email"],
        "type": label,
        "balance": body["initialBalance"],
    });
    state.wallets.push(wallet);
    StatusCode::CREATED.into_response()
}

async fn transfer(State(service): State<FakeService>, Json(body): Json<Value>) -> Response {
    let mut state = service.state.lock().unwrap();
    state.requests.push(("POST /transfer".to_string(), body.clone()));
    if state.crash {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    if let Some(message) = state.reject_transfer.clone() {
        return bad_request(&message);
    }

    let value = body["value"].as_f64().unwrap_or_default();
    for wallet in state.wallets.iter_mut() {
        let balance = wallet["balance"].as_f64().unwrap_or_default();
        if wallet["id"] == body["payerId"] {
            wallet["balance"] = json!(balance - value);
        } else if wallet["id"] == body["payeeId"] {
            wallet["balance"] = json!(balance + value);
        }
    }
    StatusCode::OK.into_response()
}
