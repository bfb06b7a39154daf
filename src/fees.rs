// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Sigil Labs

//! # Fee Vault Hook
//!
//! Presents claimable/lifetime developer fee balances and performs
//! gas-funded claim transactions through the backend relay: the backend
//! holds gas-funding custody and submits the on-chain claim, the client
//! never signs here.
//!
//! Claim flow: bearer token required up front (`Not authenticated` before
//! any network call otherwise) → `POST /fees/claim-gas` → if the backend
//! just funded gas, wait for the funding transaction to settle →
//! `POST /fees/claim` → on success store the hash and refresh balances.

use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::{Address, U256};
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::auth::AuthBridge;
use crate::backend::{ClaimRequest, MyProjects, WalletAddress, WalletBackend};
use crate::chain::client::HttpProvider;
use crate::chain::contracts::IFeeVault;
use crate::chain::format::format_units;
use crate::error::SigilError;

/// The reference stablecoin is 6-decimal.
const USDC_DECIMALS: u8 = 6;

/// Generic launch tokens are 18-decimal unless the contract states
/// otherwise; the reference stablecoin is the exception.
const TOKEN_DECIMALS: u8 = 18;

/// Settle wait after a fresh gas funding before the claim is relayed.
const GAS_SETTLE_DELAY: Duration = Duration::from_secs(2);

/// One entry of `getDevFeeBalances`, pre-formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFeeBalance {
    pub token: Address,
    pub symbol: String,
    pub balance: U256,
}

/// Read surface of the fee vault contract.
#[async_trait]
pub trait FeeVaultReads: Send + Sync {
    /// `devFees(dev, usdc)` — currently withdrawable.
    async fn claimable_usdc(&self, dev: Address) -> Result<U256, SigilError>;
    /// `totalDevFeesEarned(dev, usdc)` — cumulative lifetime fees.
    async fn lifetime_usdc(&self, dev: Address) -> Result<U256, SigilError>;
    /// `getDevFeeBalances(dev)` — all per-token balances, zeros included.
    async fn fee_balances(&self, dev: Address) -> Result<Vec<RawFeeBalance>, SigilError>;
}

/// Live reads against the fee vault contract.
pub struct ChainFeeVaultReads {
    provider: HttpProvider,
    fee_vault: Address,
    usdc: Address,
}

impl ChainFeeVaultReads {
    pub fn new(provider: HttpProvider, fee_vault: Address, usdc: Address) -> Self {
        Self {
            provider,
            fee_vault,
            usdc,
        }
    }
}

#[async_trait]
impl FeeVaultReads for ChainFeeVaultReads {
    async fn claimable_usdc(&self, dev: Address) -> Result<U256, SigilError> {
        IFeeVault::new(self.fee_vault, self.provider.clone())
            .devFees(dev, self.usdc)
            .call()
            .await
            .map_err(|e| SigilError::Contract(e.to_string()))
    }

    async fn lifetime_usdc(&self, dev: Address) -> Result<U256, SigilError> {
        IFeeVault::new(self.fee_vault, self.provider.clone())
            .totalDevFeesEarned(dev, self.usdc)
            .call()
            .await
            .map_err(|e| SigilError::Contract(e.to_string()))
    }

    async fn fee_balances(&self, dev: Address) -> Result<Vec<RawFeeBalance>, SigilError> {
        let result = IFeeVault::new(self.fee_vault, self.provider.clone())
            .getDevFeeBalances(dev)
            .call()
            .await
            .map_err(|e| SigilError::Contract(e.to_string()))?;

        Ok(result
            .tokens
            .into_iter()
            .zip(result.symbols)
            .zip(result.balances)
            .map(|((token, symbol), balance)| RawFeeBalance {
                token,
                symbol,
                balance,
            })
            .collect())
    }
}

/// One claimable token balance, formatted for display. Only nonzero
/// balances are retained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeBalance {
    pub token: WalletAddress,
    pub symbol: String,
    /// Base units.
    pub balance: U256,
    pub formatted: String,
}

/// Fee hook state snapshot.
#[derive(Debug, Clone, Default)]
pub struct FeeState {
    pub claimable: U256,
    pub lifetime: U256,
    pub claimable_display: String,
    pub lifetime_display: String,
    pub balances: Vec<FeeBalance>,
    pub claiming: bool,
    pub last_tx_hash: Option<String>,
    pub error: Option<String>,
}

/// The fee vault hook. Clones share state.
#[derive(Clone)]
pub struct FeeVaultHook {
    reads: Arc<dyn FeeVaultReads>,
    backend: Arc<dyn WalletBackend>,
    auth: AuthBridge,
    /// Developer account whose fees are shown and claimed.
    account: Address,
    /// Reference stablecoin for the single-token claim.
    usdc: Address,
    state: Arc<RwLock<FeeState>>,
}

impl FeeVaultHook {
    pub fn new(
        reads: Arc<dyn FeeVaultReads>,
        backend: Arc<dyn WalletBackend>,
        auth: AuthBridge,
        account: Address,
        usdc: Address,
    ) -> Self {
        Self {
            reads,
            backend,
            auth,
            account,
            usdc,
            state: Arc::new(RwLock::new(FeeState::default())),
        }
    }

    /// State snapshot.
    pub async fn state(&self) -> FeeState {
        self.state.read().await.clone()
    }

    /// Refresh claimable/lifetime balances and the per-token list.
    ///
    /// On a transient failure prior values stay untouched; the failure
    /// messages land in `error`.
    pub async fn refresh(&self) {
        let mut failures: Vec<String> = Vec::new();
        let mut next = self.state.read().await.clone();

        match self.reads.claimable_usdc(self.account).await {
            Ok(value) => {
                next.claimable = value;
                next.claimable_display = format_units(value, USDC_DECIMALS);
            }
            Err(e) => failures.push(format!("claimable: {e}")),
        }
        match self.reads.lifetime_usdc(self.account).await {
            Ok(value) => {
                next.lifetime = value;
                next.lifetime_display = format_units(value, USDC_DECIMALS);
            }
            Err(e) => failures.push(format!("lifetime: {e}")),
        }
        match self.reads.fee_balances(self.account).await {
            Ok(raw) => {
                next.balances = raw
                    .into_iter()
                    .filter(|b| !b.balance.is_zero())
                    .map(|b| {
                        let decimals = if b.token == self.usdc {
                            USDC_DECIMALS
                        } else {
                            TOKEN_DECIMALS
                        };
                        FeeBalance {
                            token: WalletAddress(b.token.to_string()),
                            formatted: format_units(b.balance, decimals),
                            symbol: b.symbol,
                            balance: b.balance,
                        }
                    })
                    .collect();
            }
            Err(e) => failures.push(format!("balances: {e}")),
        }

        next.error = if failures.is_empty() {
            None
        } else {
            warn!(account = %self.account, failed = failures.len(), "fee refresh had failing reads");
            Some(failures.join("; "))
        };

        *self.state.write().await = next;
    }

    /// Claim the reference-stablecoin balance through the relay.
    pub async fn claim_usdc(&self) -> Option<String> {
        self.claim(Some(WalletAddress(self.usdc.to_string()))).await
    }

    /// Claim every token balance through the relay.
    pub async fn claim_all(&self) -> Option<String> {
        self.claim(None).await
    }

    /// Launched and claimable projects of the authenticated user, for the
    /// fee dashboard.
    pub async fn projects(&self) -> Result<MyProjects, SigilError> {
        let bearer = self
            .auth
            .access_token()
            .await
            .ok_or(SigilError::NotAuthenticated)?;
        self.backend.my_projects(&bearer).await
    }

    async fn claim(&self, token: Option<WalletAddress>) -> Option<String> {
        let Some(bearer) = self.auth.access_token().await else {
            let mut state = self.state.write().await;
            state.error = Some(SigilError::NotAuthenticated.user_message());
            return None;
        };

        {
            let mut state = self.state.write().await;
            state.claiming = true;
            state.error = None;
        }

        let result = self.claim_inner(&bearer, token).await;

        let mut state = self.state.write().await;
        state.claiming = false;
        match result {
            Ok(tx_hash) => {
                state.last_tx_hash = tx_hash.clone();
                drop(state);
                self.refresh().await;
                tx_hash
            }
            Err(e) => {
                state.error = Some(e.user_message());
                None
            }
        }
    }

    async fn claim_inner(
        &self,
        bearer: &str,
        token: Option<WalletAddress>,
    ) -> Result<Option<String>, SigilError> {
        let gas = self.backend.claim_gas(bearer).await?;
        if gas.funded && !gas.already_funded {
            // Fresh funding transaction; give it time to settle before the
            // relay tries to spend it.
            tokio::time::sleep(GAS_SETTLE_DELAY).await;
        }

        let response = self.backend.claim(bearer, &ClaimRequest { token }).await?;
        if response.success {
            info!(tx_hash = ?response.tx_hash, "fee claim relayed");
            Ok(response.tx_hash)
        } else {
            Err(SigilError::Backend(
                response
                    .error
                    .unwrap_or_else(|| "claim failed".to_string()),
            ))
        }
    }
}
