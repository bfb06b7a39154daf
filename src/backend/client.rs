// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Sigil Labs

//! Sigil backend API client.
//!
//! [`WalletBackend`] is the capability surface the hooks depend on;
//! [`HttpBackend`] is the reqwest implementation against the real backend.
//! Tests inject in-memory implementations instead.
//!
//! Error mapping: non-2xx responses with an `{"error": ...}` body surface
//! that message verbatim as [`SigilError::Backend`]; anything at the network
//! layer becomes [`SigilError::Transport`] with the original message kept.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::models::*;
use crate::error::SigilError;

/// HTTP client timeout; transaction relays can be slow, RPC-bound calls are
/// bounded by the node.
const HTTP_TIMEOUT: Duration = Duration::from_secs(15);

/// Backend operations the hooks consume.
#[async_trait]
pub trait WalletBackend: Send + Sync {
    /// `GET /api/wallet/:sessionId`
    async fn session_wallet(&self, session_id: &str) -> Result<WalletInfo, SigilError>;

    /// `POST /api/wallet/:sessionId/create`
    async fn create_session_wallet(&self, session_id: &str) -> Result<(), SigilError>;

    /// `GET /api/wallet/me` (bearer auth)
    async fn identity_wallet(&self, token: &str) -> Result<WalletInfo, SigilError>;

    /// `POST /api/wallet/me/create` (bearer auth)
    async fn create_identity_wallet(&self, token: &str) -> Result<(), SigilError>;

    /// `POST /api/wallet/:sessionId/withdraw`
    async fn withdraw(
        &self,
        session_id: &str,
        request: &WithdrawRequest,
    ) -> Result<WithdrawResponse, SigilError>;

    /// `POST /api/fees/claim-gas` (bearer auth)
    async fn claim_gas(&self, token: &str) -> Result<ClaimGasResponse, SigilError>;

    /// `POST /api/fees/claim` (bearer auth)
    async fn claim(&self, token: &str, request: &ClaimRequest) -> Result<ClaimResponse, SigilError>;

    /// `GET /api/launch/my-projects` (bearer auth)
    async fn my_projects(&self, token: &str) -> Result<MyProjects, SigilError>;
}

/// Live backend client over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: String,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

impl HttpBackend {
    /// Build a client for the given base URL (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Result<Self, SigilError> {
        let http = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| SigilError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `GET /api/verify` — environment/readiness probe.
    pub async fn verify(&self) -> Result<(), SigilError> {
        let response = self
            .http
            .get(self.url("/api/verify"))
            .send()
            .await
            .map_err(|e| SigilError::Transport(e.to_string()))?;
        check_status(response).await.map(|_| ())
    }

    /// `GET /api/fees/distributions` — readiness probe for the fee relay.
    pub async fn fee_distributions_reachable(&self) -> Result<(), SigilError> {
        let response = self
            .http
            .get(self.url("/api/fees/distributions"))
            .send()
            .await
            .map_err(|e| SigilError::Transport(e.to_string()))?;
        check_status(response).await.map(|_| ())
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, SigilError> {
        let response = request
            .send()
            .await
            .map_err(|e| SigilError::Transport(e.to_string()))?;
        let response = check_status(response).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| SigilError::Transport(format!("invalid response body: {e}")))
    }

    async fn send_unit(&self, request: RequestBuilder) -> Result<(), SigilError> {
        let response = request
            .send()
            .await
            .map_err(|e| SigilError::Transport(e.to_string()))?;
        check_status(response).await.map(|_| ())
    }
}

/// Map a non-success response to the backend's own error message when the
/// body carries one.
async fn check_status(response: Response) -> Result<Response, SigilError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let fallback = default_status_message(status);
    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => fallback,
    };
    Err(SigilError::Backend(message))
}

fn default_status_message(status: StatusCode) -> String {
    format!("backend returned {status}")
}

#[async_trait]
impl WalletBackend for HttpBackend {
    async fn session_wallet(&self, session_id: &str) -> Result<WalletInfo, SigilError> {
        self.send_json(self.http.get(self.url(&format!("/api/wallet/{session_id}"))))
            .await
    }

    async fn create_session_wallet(&self, session_id: &str) -> Result<(), SigilError> {
        self.send_unit(
            self.http
                .post(self.url(&format!("/api/wallet/{session_id}/create"))),
        )
        .await
    }

    async fn identity_wallet(&self, token: &str) -> Result<WalletInfo, SigilError> {
        self.send_json(self.http.get(self.url("/api/wallet/me")).bearer_auth(token))
            .await
    }

    async fn create_identity_wallet(&self, token: &str) -> Result<(), SigilError> {
        self.send_unit(
            self.http
                .post(self.url("/api/wallet/me/create"))
                .bearer_auth(token),
        )
        .await
    }

    async fn withdraw(
        &self,
        session_id: &str,
        request: &WithdrawRequest,
    ) -> Result<WithdrawResponse, SigilError> {
        self.send_json(
            self.http
                .post(self.url(&format!("/api/wallet/{session_id}/withdraw")))
                .json(request),
        )
        .await
    }

    async fn claim_gas(&self, token: &str) -> Result<ClaimGasResponse, SigilError> {
        self.send_json(
            self.http
                .post(self.url("/api/fees/claim-gas"))
                .bearer_auth(token),
        )
        .await
    }

    async fn claim(&self, token: &str, request: &ClaimRequest) -> Result<ClaimResponse, SigilError> {
        self.send_json(
            self.http
                .post(self.url("/api/fees/claim"))
                .bearer_auth(token)
                .json(request),
        )
        .await
    }

    async fn my_projects(&self, token: &str) -> Result<MyProjects, SigilError> {
        self.send_json(
            self.http
                .get(self.url("/api/launch/my-projects"))
                .bearer_auth(token),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_stripped() {
        let backend = HttpBackend::new("http://localhost:3001/").unwrap();
        assert_eq!(backend.url("/api/verify"), "http://localhost:3001/api/verify");
    }

    #[test]
    fn status_fallback_message_names_the_status() {
        assert_eq!(
            default_status_message(StatusCode::SERVICE_UNAVAILABLE),
            "backend returned 503 Service Unavailable"
        );
    }
}
