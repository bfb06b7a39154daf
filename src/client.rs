// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Sigil Labs

//! Composition root.
//!
//! Wires config, auth bridge, backend client, chain client, and the hooks
//! together once at startup. Hooks whose contract addresses are not
//! configured come up as `None` — disabled, not an error.

use std::str::FromStr;
use std::sync::Arc;

use alloy::primitives::Address;

use crate::auth::AuthBridge;
use crate::backend::{HttpBackend, WalletBackend};
use crate::chain::executor::RpcSubmitter;
use crate::chain::migration::ChainMigratorReads;
use crate::chain::{
    ChainClient, EscrowActions, MigrationActions, MigrationStatus, WalletAccessor, WriteExecutor,
};
use crate::config::ClientConfig;
use crate::error::SigilError;
use crate::fees::{ChainFeeVaultReads, FeeVaultHook};
use crate::poller::WalletPoller;
use crate::session::SessionId;

/// One assembled Sigil client.
pub struct SigilClient {
    pub auth: AuthBridge,
    /// Ephemeral session id, generated at construction.
    pub session: SessionId,
    pub backend: Arc<HttpBackend>,
    pub chain: ChainClient,
    pub wallets: WalletAccessor,
    /// Wallet balance poller; spawn [`WalletPoller::run`] to start polling.
    pub poller: Arc<WalletPoller>,
    /// Fee vault hook; `None` without a fee vault address, reference
    /// stablecoin, and connected wallet.
    pub fees: Option<FeeVaultHook>,
    /// Migration read aggregator; `None` without migrator + legacy token.
    pub migration: Option<MigrationStatus>,
    /// Migration approve/migrate actions; `None` without migrator + legacy token.
    pub migration_actions: Option<MigrationActions>,
    /// Escrow governance actions; `None` without an escrow address.
    pub escrow: Option<EscrowActions>,
}

impl SigilClient {
    /// Assemble a client from configuration and the chosen auth adapter.
    pub fn from_config(config: ClientConfig, auth: AuthBridge) -> Result<Self, SigilError> {
        let backend = Arc::new(HttpBackend::new(config.api_base_url.clone())?);
        let chain = ChainClient::new(config.network.clone())?;
        let wallets = WalletAccessor::from_key(config.wallet_key.as_deref())?;
        let session = SessionId::new_ephemeral();

        let poller = Arc::new(WalletPoller::new(
            backend.clone() as Arc<dyn WalletBackend>,
            auth.clone(),
            Some(session.clone()),
        ));

        let fee_vault = parse_opt_address(config.fee_vault_address.as_deref())?;
        let escrow_addr = parse_opt_address(config.escrow_address.as_deref())?;
        let migrator = parse_opt_address(config.migrator_address.as_deref())?;
        let old_token = parse_opt_address(config.old_token_address.as_deref())?;
        let usdc = parse_opt_address(config.usdc_address.as_deref())?;

        let submitter = Arc::new(RpcSubmitter::new(
            wallets.clone(),
            config.network.clone(),
            escrow_addr,
            migrator,
            old_token,
        ));

        let escrow = escrow_addr
            .map(|_| EscrowActions::new(WriteExecutor::new(submitter.clone())));

        let (migration, migration_actions) = match (migrator, old_token) {
            (Some(migrator), Some(old_token)) => {
                let reads = ChainMigratorReads::new(chain.provider().clone(), migrator, old_token);
                (
                    Some(MigrationStatus::new(Arc::new(reads))),
                    Some(MigrationActions::new(WriteExecutor::new(submitter.clone()))),
                )
            }
            _ => (None, None),
        };

        let fees = match (fee_vault, usdc, wallets.first().ok()) {
            (Some(fee_vault), Some(usdc), Some(handle)) => {
                let reads = ChainFeeVaultReads::new(chain.provider().clone(), fee_vault, usdc);
                Some(FeeVaultHook::new(
                    Arc::new(reads),
                    backend.clone() as Arc<dyn WalletBackend>,
                    auth.clone(),
                    handle.address(),
                    usdc,
                ))
            }
            _ => None,
        };

        Ok(Self {
            auth,
            session,
            backend,
            chain,
            wallets,
            poller,
            fees,
            migration,
            migration_actions,
            escrow,
        })
    }
}

fn parse_opt_address(raw: Option<&str>) -> Result<Option<Address>, SigilError> {
    raw.map(|value| {
        Address::from_str(value).map_err(|e| SigilError::InvalidAddress(e.to_string()))
    })
    .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::NetworkConfig;

    fn bare_config() -> ClientConfig {
        ClientConfig {
            api_base_url: "http://localhost:3001".to_string(),
            network: NetworkConfig::base_mainnet(),
            wallet_key: None,
            fee_vault_address: None,
            escrow_address: None,
            migrator_address: None,
            old_token_address: None,
            usdc_address: None,
        }
    }

    #[test]
    fn unconfigured_contracts_disable_hooks_without_error() {
        let client = SigilClient::from_config(bare_config(), AuthBridge::disabled()).unwrap();
        assert!(client.fees.is_none());
        assert!(client.migration.is_none());
        assert!(client.migration_actions.is_none());
        assert!(client.escrow.is_none());
        assert!(client.wallets.wallets.is_empty());
    }

    #[test]
    fn configured_escrow_enables_the_actions() {
        let mut config = bare_config();
        config.escrow_address = Some("0x742d35Cc6634C0532925a3b844Bc9e7595f4aB12".to_string());
        let client = SigilClient::from_config(config, AuthBridge::disabled()).unwrap();
        assert!(client.escrow.is_some());
    }

    #[test]
    fn malformed_contract_address_is_an_error() {
        let mut config = bare_config();
        config.migrator_address = Some("nonsense".to_string());
        assert!(matches!(
            SigilClient::from_config(config, AuthBridge::disabled()),
            Err(SigilError::InvalidAddress(_))
        ));
    }
}
