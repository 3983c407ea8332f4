//! HTTP client for the wallet/transfer REST API.

use std::fmt;
use std::future::Future;

use color_eyre::eyre::Result;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    config::Config,
    domain::wallet::{TransferRequest, WalletCreationRequest, WalletRecord},
};

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// The server answered with a non-success status.
    Remote { status: u16 },
    /// The request never produced a response.
    Transport,
    /// A success response whose body could not be decoded.
    Decode,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiErrorKind::Remote { status } => write!(f, "server returned {status}"),
            ApiErrorKind::Transport => f.write_str("request failed"),
            ApiErrorKind::Decode => f.write_str("malformed response"),
        }
    }
}

/// Failure of a single API call. `message` carries the server's own
/// explanation when the error body had one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}{}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: Option<String>,
}

impl ApiError {
    pub fn remote(status: u16, message: Option<String>) -> Self {
        Self {
            kind: ApiErrorKind::Remote { status },
            message,
        }
    }

    pub fn transport() -> Self {
        Self {
            kind: ApiErrorKind::Transport,
            message: None,
        }
    }

    pub fn decode() -> Self {
        Self {
            kind: ApiErrorKind::Decode,
            message: None,
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// The three remote operations the client needs.
pub trait WalletApi: Clone + Send + Sync + 'static {
    /// `GET /wallets`.
    fn list_wallets(&self) -> impl Future<Output = ApiResult<Vec<WalletRecord>>> + Send;

    /// `POST /wallets`.
    fn create_wallet(
        &self,
        request: &WalletCreationRequest,
    ) -> impl Future<Output = ApiResult<()>> + Send;

    /// `POST /transfer`.
    fn transfer(&self, request: &TransferRequest) -> impl Future<Output = ApiResult<()>> + Send;
}

/// reqwest-backed client. Every call is a single request: no retries, no
/// timeout, no caching.
#[derive(Clone)]
pub struct HttpWalletApi {
    client: Client,
    config: Config,
}

impl HttpWalletApi {
    pub fn new(config: Config) -> Result<Self> {
        let client = Client::builder()
            .danger_accept_invalid_certs(config.api.accept_invalid_certs)
            .build()?;
        Ok(Self { client, config })
    }

    /// Get the API base URL.
    pub fn base_url(&self) -> &str {
        &self.config.api.base_url
    }

    async fn post<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> ApiResult<()> {
        let url = self.config.endpoint(path);
        debug!("POST {}", url);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                warn!("POST {} failed: {}", url, e);
                ApiError::transport()
            })?;
        check_status(response).await.map(|_| ())
    }
}

impl WalletApi for HttpWalletApi {
    async fn list_wallets(&self) -> ApiResult<Vec<WalletRecord>> {
        let url = self.config.endpoint("wallets");
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await.map_err(|e| {
            warn!("GET {} failed: {}", url, e);
            ApiError::transport()
        })?;
        let response = check_status(response).await?;
        response.json::<Vec<WalletRecord>>().await.map_err(|e| {
            warn!("Failed to decode wallet list: {}", e);
            ApiError::decode()
        })
    }

    async fn create_wallet(&self, request: &WalletCreationRequest) -> ApiResult<()> {
        self.post("wallets", request).await
    }

    async fn transfer(&self, request: &TransferRequest) -> ApiResult<()> {
        self.post("transfer", request).await
    }
}

/// Turn a non-success response into an [`ApiError`], picking up the
/// `{"message": ...}` body when present.
async fn check_status(response: Response) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = match response.bytes().await {
        Ok(body) => serde_json::from_slice::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message),
        Err(e) => {
            debug!("Failed to read error body: {}", e);
            None
        }
    };
    warn!("Request failed with {}: {:?}", status, message);
    Err(ApiError::remote(status.as_u16(), message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ApiError::remote(400, Some("insufficient funds".into()));
        assert_eq!(err.to_string(), "server returned 400: insufficient funds");
        assert_eq!(ApiError::transport().to_string(), "request failed");
        assert_eq!(ApiError::decode().to_string(), "malformed response");
    }
}
