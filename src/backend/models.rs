// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Sigil Labs

//! # Backend API Data Models
//!
//! Request and response structures for the Sigil backend HTTP API. The
//! backend owns these records; the client holds read-only cached copies
//! refreshed by polling. Field names are camelCase on the wire.
//!
//! ## Wallet Address Type
//!
//! The [`WalletAddress`] newtype wraps Ethereum-style addresses (0x-prefixed,
//! 40 hex characters) on the backend-facing surface, where addresses travel
//! as strings. Chain-facing code parses into `alloy::primitives::Address`
//! at the boundary instead.

use serde::{Deserialize, Serialize};

// =============================================================================
// Wallet Address Type
// =============================================================================

/// Ethereum-compatible wallet address wrapper for backend payloads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WalletAddress(pub String);

impl std::fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for WalletAddress {
    fn from(value: String) -> Self {
        WalletAddress(value)
    }
}

impl From<&str> for WalletAddress {
    fn from(value: &str) -> Self {
        WalletAddress(value.to_string())
    }
}

impl From<WalletAddress> for String {
    fn from(value: WalletAddress) -> Self {
        value.0
    }
}

// =============================================================================
// Wallet Models
// =============================================================================

/// One token position inside a custodial wallet balance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenHolding {
    /// Token symbol (e.g. "SIGIL", "USDC").
    pub symbol: String,
    /// Balance as a decimal string in display units.
    pub balance: String,
    /// Token contract address.
    pub address: WalletAddress,
}

/// Balance section of a wallet record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WalletBalance {
    /// Native token balance as a decimal string.
    pub native_token: String,
    /// ERC-20 positions.
    pub tokens: Vec<TokenHolding>,
}

/// Custodial / identity-linked wallet record, as reported by the backend.
///
/// `exists == false` means the wallet has not been provisioned yet; the
/// poller auto-creates it exactly once per identity/session lifetime.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WalletInfo {
    pub exists: bool,
    pub address: Option<WalletAddress>,
    pub balance: Option<WalletBalance>,
}

impl WalletInfo {
    /// Record shape for a wallet the backend has not provisioned.
    pub fn missing() -> Self {
        Self {
            exists: false,
            address: None,
            balance: None,
        }
    }
}

/// `POST /api/wallet/:sessionId/withdraw` request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WithdrawRequest {
    /// Destination address.
    pub to: WalletAddress,
    /// Amount in display units, as a decimal string.
    pub amount: String,
    /// Token symbol or contract address; the backend resolves it.
    pub token: String,
}

/// `POST /api/wallet/:sessionId/withdraw` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawResponse {
    pub tx_hash: String,
}

// =============================================================================
// Fee Relay Models
// =============================================================================

/// `POST /api/fees/claim-gas` response.
///
/// The backend funds gas for the caller's claim wallet; `already_funded`
/// means a previous funding is still usable and no settle wait is needed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimGasResponse {
    pub funded: bool,
    pub already_funded: bool,
}

/// `POST /api/fees/claim` request body. `token` limits the claim to one
/// token; omitted means claim everything.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<WalletAddress>,
}

/// `POST /api/fees/claim` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimResponse {
    pub success: bool,
    #[serde(default)]
    pub tx_hash: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

// =============================================================================
// Launch Project Models
// =============================================================================

/// One launched project owned by the authenticated user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchProject {
    pub id: String,
    pub name: String,
    pub token_address: Option<WalletAddress>,
    #[serde(default)]
    pub status: Option<String>,
}

/// `GET /api/launch/my-projects` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MyProjects {
    pub projects: Vec<LaunchProject>,
    pub claimable_projects: Vec<LaunchProject>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wallet_address_from_and_into_string() {
        let from_str: WalletAddress = "0xabc".into();
        assert_eq!(from_str.0, "0xabc");

        let to_string: String = WalletAddress("0xdef".into()).into();
        assert_eq!(to_string, "0xdef");
    }

    #[test]
    fn wallet_info_deserializes_missing_record() {
        let info: WalletInfo =
            serde_json::from_str(r#"{"exists":false,"address":null,"balance":null}"#).unwrap();
        assert_eq!(info, WalletInfo::missing());
    }

    #[test]
    fn wallet_info_deserializes_full_record() {
        let body = r#"{
            "exists": true,
            "address": "0x742d35Cc6634C0532925a3b844Bc9e7595f4aB12",
            "balance": {
                "nativeToken": "0.42",
                "tokens": [
                    {"symbol": "USDC", "balance": "12.50", "address": "0x01"}
                ]
            }
        }"#;
        let info: WalletInfo = serde_json::from_str(body).unwrap();
        assert!(info.exists);
        let balance = info.balance.unwrap();
        assert_eq!(balance.native_token, "0.42");
        assert_eq!(balance.tokens[0].symbol, "USDC");
    }

    #[test]
    fn claim_response_tolerates_missing_optionals() {
        let ok: ClaimResponse = serde_json::from_str(r#"{"success":true,"txHash":"0xabc"}"#).unwrap();
        assert!(ok.success);
        assert_eq!(ok.tx_hash.as_deref(), Some("0xabc"));
        assert!(ok.error.is_none());

        let failed: ClaimResponse =
            serde_json::from_str(r#"{"success":false,"error":"nothing to claim"}"#).unwrap();
        assert!(!failed.success);
        assert_eq!(failed.error.as_deref(), Some("nothing to claim"));
    }

    #[test]
    fn claim_request_omits_absent_token() {
        let body = serde_json::to_string(&ClaimRequest { token: None }).unwrap();
        assert_eq!(body, "{}");
    }
}
