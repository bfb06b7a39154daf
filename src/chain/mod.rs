// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Sigil Labs

//! On-chain interaction: RPC client, contract interfaces, signing, the
//! write executor, and the migration read aggregator.

pub mod client;
pub mod contracts;
pub mod escrow;
pub mod executor;
pub mod format;
pub mod migration;
pub mod signer;

pub use client::{ChainClient, NetworkConfig};
pub use escrow::{EscrowActions, MigrationActions};
pub use executor::{ContractCall, RpcSubmitter, TxSubmitter, WriteExecutor, WriteState, WriteStep};
pub use migration::{ChainMigratorReads, MigrationSnapshot, MigrationStatus, MigratorReads};
pub use signer::{WalletAccessor, WalletHandle};
