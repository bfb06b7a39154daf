// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Sigil Labs

//! Read-side chain client.

use alloy::{
    network::Ethereum,
    providers::{
        fillers::{BlobGasFiller, ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller},
        Identity, Provider, ProviderBuilder, RootProvider,
    },
};

use crate::error::SigilError;

/// HTTP provider type with the default fillers.
pub type HttpProvider = FillProvider<
    JoinFill<
        Identity,
        JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
    >,
    RootProvider<Ethereum>,
>;

/// Base mainnet public RPC endpoint (default deployment target).
pub const BASE_MAINNET_RPC: &str = "https://mainnet.base.org";

/// Base mainnet chain id.
pub const BASE_MAINNET_CHAIN_ID: u64 = 8453;

/// Target network configuration.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Network name for display and logging.
    pub name: String,
    /// Chain ID
    pub chain_id: u64,
    /// RPC endpoint URL
    pub rpc_url: String,
}

impl NetworkConfig {
    /// Base mainnet with the public RPC.
    pub fn base_mainnet() -> Self {
        Self {
            name: "Base".to_string(),
            chain_id: BASE_MAINNET_CHAIN_ID,
            rpc_url: BASE_MAINNET_RPC.to_string(),
        }
    }
}

/// Read-only JSON-RPC client for the target network.
///
/// Write paths go through [`crate::chain::signer`] instead, which binds a
/// wallet into the provider.
pub struct ChainClient {
    network: NetworkConfig,
    provider: HttpProvider,
}

impl ChainClient {
    /// Create a new client for the specified network.
    pub fn new(network: NetworkConfig) -> Result<Self, SigilError> {
        let url: url::Url = network
            .rpc_url
            .parse()
            .map_err(|e: url::ParseError| SigilError::InvalidRpcUrl(e.to_string()))?;

        let provider = ProviderBuilder::new().connect_http(url);

        Ok(Self { network, provider })
    }

    /// Get the current block number.
    pub async fn block_number(&self) -> Result<u64, SigilError> {
        self.provider
            .get_block_number()
            .await
            .map_err(|e| SigilError::Rpc(e.to_string()))
    }

    /// The underlying provider, for contract instances.
    pub fn provider(&self) -> &HttpProvider {
        &self.provider
    }

    /// The network configuration.
    pub fn network(&self) -> &NetworkConfig {
        &self.network
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_rpc_url() {
        let network = NetworkConfig {
            name: "bad".to_string(),
            chain_id: 1,
            rpc_url: "not a url".to_string(),
        };
        assert!(matches!(
            ChainClient::new(network),
            Err(SigilError::InvalidRpcUrl(_))
        ));
    }

    #[test]
    fn base_mainnet_defaults() {
        let network = NetworkConfig::base_mainnet();
        assert_eq!(network.chain_id, BASE_MAINNET_CHAIN_ID);
        assert!(ChainClient::new(network).is_ok());
    }
}
