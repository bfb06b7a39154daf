// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Sigil Labs

//! # Wallet Connection Accessor
//!
//! Exposes the list of connected wallets and a way to obtain a chain-bound
//! signing client for the first one. The accessor performs no network calls
//! itself; it degrades to an empty wallet list when no key material is
//! configured.
//!
//! A browser wallet "switches chain" on a shared provider; a local signer
//! has no ambient chain, so the same contract is met by constructing the
//! signing provider already bound to the target network's RPC endpoint.

use alloy::{
    network::EthereumWallet,
    primitives::Address,
    providers::{DynProvider, Provider, ProviderBuilder},
    signers::local::PrivateKeySigner,
};

use super::client::NetworkConfig;
use crate::error::SigilError;

/// A connected wallet: local key material plus its address.
#[derive(Debug, Clone)]
pub struct WalletHandle {
    address: Address,
    signer: PrivateKeySigner,
}

impl WalletHandle {
    /// Build a handle from a hex-encoded private key (with or without the
    /// `0x` prefix).
    pub fn from_hex_key(private_key_hex: &str) -> Result<Self, SigilError> {
        let trimmed = private_key_hex.trim_start_matches("0x");
        let key_bytes = alloy::hex::decode(trimmed)
            .map_err(|e| SigilError::InvalidAddress(format!("invalid private key: {e}")))?;

        let signer = PrivateKeySigner::from_slice(&key_bytes)
            .map_err(|e| SigilError::InvalidAddress(format!("invalid private key: {e}")))?;

        Ok(Self {
            address: signer.address(),
            signer,
        })
    }

    /// The wallet's address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Build a signing provider bound to `network` and this wallet's key.
    ///
    /// Each call constructs a fresh client; concurrent writes share the
    /// underlying wallet naturally.
    pub fn signing_client(&self, network: &NetworkConfig) -> Result<DynProvider, SigilError> {
        let url: url::Url = network
            .rpc_url
            .parse()
            .map_err(|e: url::ParseError| SigilError::InvalidRpcUrl(e.to_string()))?;

        let wallet = EthereumWallet::from(self.signer.clone());
        let provider = ProviderBuilder::new().wallet(wallet).connect_http(url);

        Ok(provider.erased())
    }
}

/// The set of connected wallets. Empty when unconfigured.
#[derive(Debug, Clone, Default)]
pub struct WalletAccessor {
    pub wallets: Vec<WalletHandle>,
}

impl WalletAccessor {
    /// Accessor with no connected wallets.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Accessor from an optional configured key. A malformed key is an
    /// error; an absent key degrades to the empty accessor.
    pub fn from_key(wallet_key: Option<&str>) -> Result<Self, SigilError> {
        let wallets = match wallet_key {
            Some(key) => vec![WalletHandle::from_hex_key(key)?],
            None => Vec::new(),
        };
        Ok(Self { wallets })
    }

    /// The active wallet handle, or `NoWalletConnected`.
    pub fn first(&self) -> Result<&WalletHandle, SigilError> {
        self.wallets.first().ok_or(SigilError::NoWalletConnected)
    }
}
