// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Sigil Labs

//! # Contract Read Aggregator
//!
//! Batches the token-migration reads for one account into a consolidated
//! snapshot with per-field error isolation: a failing read keeps that
//! field's last-known value (zero sentinel initially) and must not blank
//! the others. Individual failure messages are joined into one surfaced
//! diagnostic naming the failing fields.
//!
//! `refetch` is idempotent: repeated calls with unchanged chain state yield
//! identical snapshots.

use std::sync::Arc;

use alloy::primitives::{Address, U256};
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::warn;

use super::client::HttpProvider;
use super::contracts::{IERC20, ITokenMigrator};
use super::format::format_compact_units;
use crate::error::SigilError;

/// Generic launch tokens are 18-decimal unless the contract states
/// otherwise.
const TOKEN_DECIMALS: u8 = 18;

/// Read surface of the migrator and the legacy token. The live
/// implementation calls the contracts; tests stub individual fields.
#[async_trait]
pub trait MigratorReads: Send + Sync {
    async fn allocation(&self, account: Address) -> Result<U256, SigilError>;
    async fn claimed(&self, account: Address) -> Result<U256, SigilError>;
    async fn claimable(&self, account: Address) -> Result<U256, SigilError>;
    async fn paused(&self) -> Result<bool, SigilError>;
    /// Legacy-token `balanceOf(account)`.
    async fn old_token_balance(&self, account: Address) -> Result<U256, SigilError>;
    /// Legacy-token `allowance(account, migrator)`.
    async fn migrator_allowance(&self, account: Address) -> Result<U256, SigilError>;
}

/// Live reads against the migrator and legacy token contracts.
pub struct ChainMigratorReads {
    provider: HttpProvider,
    migrator: Address,
    old_token: Address,
}

impl ChainMigratorReads {
    pub fn new(provider: HttpProvider, migrator: Address, old_token: Address) -> Self {
        Self {
            provider,
            migrator,
            old_token,
        }
    }
}

#[async_trait]
impl MigratorReads for ChainMigratorReads {
    async fn allocation(&self, account: Address) -> Result<U256, SigilError> {
        ITokenMigrator::new(self.migrator, self.provider.clone())
            .allocation(account)
            .call()
            .await
            .map_err(|e| SigilError::Contract(e.to_string()))
    }

    async fn claimed(&self, account: Address) -> Result<U256, SigilError> {
        ITokenMigrator::new(self.migrator, self.provider.clone())
            .claimed(account)
            .call()
            .await
            .map_err(|e| SigilError::Contract(e.to_string()))
    }

    async fn claimable(&self, account: Address) -> Result<U256, SigilError> {
        ITokenMigrator::new(self.migrator, self.provider.clone())
            .claimable(account)
            .call()
            .await
            .map_err(|e| SigilError::Contract(e.to_string()))
    }

    async fn paused(&self) -> Result<bool, SigilError> {
        ITokenMigrator::new(self.migrator, self.provider.clone())
            .paused()
            .call()
            .await
            .map_err(|e| SigilError::Contract(e.to_string()))
    }

    async fn old_token_balance(&self, account: Address) -> Result<U256, SigilError> {
        IERC20::new(self.old_token, self.provider.clone())
            .balanceOf(account)
            .call()
            .await
            .map_err(|e| SigilError::Contract(e.to_string()))
    }

    async fn migrator_allowance(&self, account: Address) -> Result<U256, SigilError> {
        IERC20::new(self.old_token, self.provider.clone())
            .allowance(account, self.migrator)
            .call()
            .await
            .map_err(|e| SigilError::Contract(e.to_string()))
    }
}

/// Consolidated migration view for one account. Raw values are base units;
/// `*_display` fields are the compact K/M/B rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationSnapshot {
    pub allocation: U256,
    pub claimed: U256,
    pub claimable: U256,
    pub old_balance: U256,
    pub allowance: U256,
    pub paused: bool,

    pub allocation_display: String,
    pub claimed_display: String,
    pub claimable_display: String,
    pub old_balance_display: String,
    pub allowance_display: String,

    /// Joined per-field failure messages from the last refetch, if any.
    pub error: Option<String>,
}

impl Default for MigrationSnapshot {
    fn default() -> Self {
        let zero = format_compact_units(U256::ZERO, TOKEN_DECIMALS);
        Self {
            allocation: U256::ZERO,
            claimed: U256::ZERO,
            claimable: U256::ZERO,
            old_balance: U256::ZERO,
            allowance: U256::ZERO,
            paused: false,
            allocation_display: zero.clone(),
            claimed_display: zero.clone(),
            claimable_display: zero.clone(),
            old_balance_display: zero.clone(),
            allowance_display: zero,
            error: None,
        }
    }
}

/// The aggregator hook. Holds the last snapshot; `refetch` refreshes it.
#[derive(Clone)]
pub struct MigrationStatus {
    reads: Arc<dyn MigratorReads>,
    snapshot: Arc<RwLock<MigrationSnapshot>>,
}

impl MigrationStatus {
    pub fn new(reads: Arc<dyn MigratorReads>) -> Self {
        Self {
            reads,
            snapshot: Arc::new(RwLock::new(MigrationSnapshot::default())),
        }
    }

    /// The last snapshot.
    pub async fn snapshot(&self) -> MigrationSnapshot {
        self.snapshot.read().await.clone()
    }

    /// Refresh every field for `account` and return the new snapshot.
    ///
    /// Reads are issued independently; a single failing read leaves the
    /// other fields populated and its message (prefixed with the field
    /// name) joined into `error`.
    pub async fn refetch(&self, account: Address) -> MigrationSnapshot {
        let mut next = self.snapshot.read().await.clone();
        let mut failures: Vec<String> = Vec::new();

        match self.reads.allocation(account).await {
            Ok(value) => next.allocation = value,
            Err(e) => failures.push(format!("allocation: {e}")),
        }
        match self.reads.claimed(account).await {
            Ok(value) => next.claimed = value,
            Err(e) => failures.push(format!("claimed: {e}")),
        }
        match self.reads.claimable(account).await {
            Ok(value) => next.claimable = value,
            Err(e) => failures.push(format!("claimable: {e}")),
        }
        match self.reads.paused().await {
            Ok(value) => next.paused = value,
            Err(e) => failures.push(format!("paused: {e}")),
        }
        match self.reads.old_token_balance(account).await {
            Ok(value) => next.old_balance = value,
            Err(e) => failures.push(format!("balance: {e}")),
        }
        match self.reads.migrator_allowance(account).await {
            Ok(value) => next.allowance = value,
            Err(e) => failures.push(format!("allowance: {e}")),
        }

        next.allocation_display = format_compact_units(next.allocation, TOKEN_DECIMALS);
        next.claimed_display = format_compact_units(next.claimed, TOKEN_DECIMALS);
        next.claimable_display = format_compact_units(next.claimable, TOKEN_DECIMALS);
        next.old_balance_display = format_compact_units(next.old_balance, TOKEN_DECIMALS);
        next.allowance_display = format_compact_units(next.allowance, TOKEN_DECIMALS);

        next.error = if failures.is_empty() {
            None
        } else {
            warn!(account = %account, failed = failures.len(), "migration refetch had failing reads");
            Some(failures.join("; "))
        };

        *self.snapshot.write().await = next.clone();
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Stub where each field either yields a constant or fails.
    #[derive(Default)]
    struct StubReads {
        allocation: Option<U256>,
        claimed: Option<U256>,
        claimable: Option<U256>,
        paused: Option<bool>,
        old_balance: Option<U256>,
        allowance: Option<U256>,
    }

    fn field(value: Option<U256>, name: &str) -> Result<U256, SigilError> {
        value.ok_or_else(|| SigilError::Rpc(format!("{name} read timed out")))
    }

    #[async_trait]
    impl MigratorReads for StubReads {
        async fn allocation(&self, _a: Address) -> Result<U256, SigilError> {
            field(self.allocation, "allocation")
        }
        async fn claimed(&self, _a: Address) -> Result<U256, SigilError> {
            field(self.claimed, "claimed")
        }
        async fn claimable(&self, _a: Address) -> Result<U256, SigilError> {
            field(self.claimable, "claimable")
        }
        async fn paused(&self) -> Result<bool, SigilError> {
            self.paused
                .ok_or_else(|| SigilError::Rpc("paused read timed out".to_string()))
        }
        async fn old_token_balance(&self, _a: Address) -> Result<U256, SigilError> {
            field(self.old_balance, "balance")
        }
        async fn migrator_allowance(&self, _a: Address) -> Result<U256, SigilError> {
            field(self.allowance, "allowance")
        }
    }

    /// Whole tokens at 18 decimals.
    fn tokens(count: u64) -> U256 {
        U256::from(count) * U256::from(10u64).pow(U256::from(18u64))
    }

    fn full_stub() -> StubReads {
        StubReads {
            allocation: Some(tokens(5_000)),
            claimed: Some(tokens(1_000)),
            claimable: Some(tokens(4_000)),
            paused: Some(false),
            old_balance: Some(tokens(9_000)),
            allowance: Some(U256::ZERO),
        }
    }

    fn account() -> Address {
        Address::ZERO
    }

    #[tokio::test]
    async fn refetch_is_idempotent_with_unchanged_state() {
        let status = MigrationStatus::new(Arc::new(full_stub()));
        let first = status.refetch(account()).await;
        let second = status.refetch(account()).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn single_failing_read_isolates_to_its_field() {
        let mut stub = full_stub();
        stub.claimable = None;
        let status = MigrationStatus::new(Arc::new(stub));

        let snapshot = status.refetch(account()).await;

        // The other five fields are populated.
        assert_eq!(snapshot.allocation, tokens(5_000));
        assert_eq!(snapshot.claimed, tokens(1_000));
        assert_eq!(snapshot.old_balance, tokens(9_000));
        assert!(!snapshot.paused);

        // The failing field keeps its zero sentinel and is the only one
        // named in the error.
        assert_eq!(snapshot.claimable, U256::ZERO);
        let error = snapshot.error.unwrap();
        assert!(error.contains("claimable"));
        assert!(!error.contains("allocation"));
        assert!(!error.contains("allowance"));
    }

    #[tokio::test]
    async fn failing_field_retains_last_known_value() {
        let status = MigrationStatus::new(Arc::new(full_stub()));
        status.refetch(account()).await;

        // Swap in a reads source where claimable now fails; the previously
        // fetched value must survive.
        let mut broken = full_stub();
        broken.claimable = None;
        let degraded = MigrationStatus {
            reads: Arc::new(broken),
            snapshot: status.snapshot.clone(),
        };
        let snapshot = degraded.refetch(account()).await;
        assert_eq!(snapshot.claimable, tokens(4_000));
        assert!(snapshot.error.is_some());
    }

    #[tokio::test]
    async fn all_failures_are_joined_into_one_message() {
        let stub = StubReads::default();
        let status = MigrationStatus::new(Arc::new(stub));
        let snapshot = status.refetch(account()).await;

        let error = snapshot.error.unwrap();
        for name in ["allocation", "claimed", "claimable", "paused", "balance", "allowance"] {
            assert!(error.contains(name), "missing {name} in: {error}");
        }
        assert_eq!(error.matches("; ").count(), 5);
    }

    #[tokio::test]
    async fn display_fields_use_compact_formatting() {
        let status = MigrationStatus::new(Arc::new(full_stub()));
        let snapshot = status.refetch(account()).await;
        assert_eq!(snapshot.allocation_display, "5.00K");
        assert_eq!(snapshot.claimed_display, "1.00K");
        assert_eq!(snapshot.allowance_display, "0.00");
    }
}
