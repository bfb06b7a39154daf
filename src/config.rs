// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Sigil Labs

//! # Runtime Configuration
//!
//! This module defines environment variable names and default values used
//! throughout the client. Configuration is loaded from the environment once
//! at composition time via [`ClientConfig::from_env`].
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `SIGIL_API_URL` | Backend API base URL | `http://localhost:3001` |
//! | `SIGIL_RPC_URL` | Chain JSON-RPC endpoint | Base mainnet public RPC |
//! | `SIGIL_CHAIN_ID` | Target chain id | `8453` |
//! | `SIGIL_WALLET_KEY` | Hex private key for the connected wallet | Unset (no wallet) |
//! | `SIGIL_FEE_VAULT_ADDRESS` | Fee vault contract | Unset (fees disabled) |
//! | `SIGIL_ESCROW_ADDRESS` | Milestone escrow contract | Unset (escrow disabled) |
//! | `SIGIL_MIGRATOR_ADDRESS` | Token migrator contract | Unset (migration disabled) |
//! | `SIGIL_OLD_TOKEN_ADDRESS` | Legacy token being migrated | Unset |
//! | `SIGIL_USDC_ADDRESS` | Reference stablecoin (6 decimals) | Unset |
//!
//! A missing contract address disables the corresponding hook rather than
//! failing construction; the identity provider is injected separately (see
//! [`crate::auth`]).

use std::env;

use crate::chain::client::NetworkConfig;

/// Environment variable name for the backend API base URL.
pub const API_URL_ENV: &str = "SIGIL_API_URL";

/// Environment variable name for the chain RPC endpoint.
pub const RPC_URL_ENV: &str = "SIGIL_RPC_URL";

/// Environment variable name for the target chain id.
pub const CHAIN_ID_ENV: &str = "SIGIL_CHAIN_ID";

/// Environment variable name for the connected wallet's hex private key.
pub const WALLET_KEY_ENV: &str = "SIGIL_WALLET_KEY";

pub const FEE_VAULT_ADDRESS_ENV: &str = "SIGIL_FEE_VAULT_ADDRESS";
pub const ESCROW_ADDRESS_ENV: &str = "SIGIL_ESCROW_ADDRESS";
pub const MIGRATOR_ADDRESS_ENV: &str = "SIGIL_MIGRATOR_ADDRESS";
pub const OLD_TOKEN_ADDRESS_ENV: &str = "SIGIL_OLD_TOKEN_ADDRESS";
pub const USDC_ADDRESS_ENV: &str = "SIGIL_USDC_ADDRESS";

/// Default backend API base URL (local development backend).
pub const DEFAULT_API_URL: &str = "http://localhost:3001";

/// Client configuration resolved from the environment.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend API base URL, no trailing slash.
    pub api_base_url: String,
    /// Target network (RPC endpoint + chain id).
    pub network: NetworkConfig,
    /// Hex private key for the connected wallet, if any.
    pub wallet_key: Option<String>,
    /// Fee vault contract address, if deployed/configured.
    pub fee_vault_address: Option<String>,
    /// Milestone escrow contract address, if configured.
    pub escrow_address: Option<String>,
    /// Token migrator contract address, if configured.
    pub migrator_address: Option<String>,
    /// Legacy token address (migration source), if configured.
    pub old_token_address: Option<String>,
    /// Reference stablecoin address (6 decimals), if configured.
    pub usdc_address: Option<String>,
}

impl ClientConfig {
    /// Load configuration from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        let api_base_url = env_or_default(API_URL_ENV, DEFAULT_API_URL)
            .trim_end_matches('/')
            .to_string();

        let network = NetworkConfig {
            name: "Sigil".to_string(),
            chain_id: env::var(CHAIN_ID_ENV)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(crate::chain::client::BASE_MAINNET_CHAIN_ID),
            rpc_url: env_or_default(RPC_URL_ENV, crate::chain::client::BASE_MAINNET_RPC),
        };

        Self {
            api_base_url,
            network,
            wallet_key: env_opt(WALLET_KEY_ENV),
            fee_vault_address: env_opt(FEE_VAULT_ADDRESS_ENV),
            escrow_address: env_opt(ESCROW_ADDRESS_ENV),
            migrator_address: env_opt(MIGRATOR_ADDRESS_ENV),
            old_token_address: env_opt(OLD_TOKEN_ADDRESS_ENV),
            usdc_address: env_opt(USDC_ADDRESS_ENV),
        }
    }
}

fn env_or_default(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_opt(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
