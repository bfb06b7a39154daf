// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Sigil Labs

//! Sigil Client SDK
//!
//! Embeddable client for the Sigil token-launch platform: custodial wallet
//! provisioning and polling against the Sigil backend API, fee-vault claims
//! through the backend gas relay, and milestone-escrow / token-migrator
//! contract interaction over JSON-RPC.
//!
//! ## Modules
//!
//! - `auth` - Optional-authentication bridge over the identity provider
//! - `backend` - Sigil backend HTTP API (wallets, fee relay, projects)
//! - `chain` - Contract reads/writes (alloy), signing, formatting
//! - `client` - Composition root
//! - `config` - Environment-variable configuration
//! - `error` - Error taxonomy shared by adapters and hooks
//! - `fees` - Fee vault hook (balances + relayed claims)
//! - `poller` - Wallet balance poller with auto-provisioning
//! - `session` - Ephemeral session ids and caller resolution

pub mod auth;
pub mod backend;
pub mod chain;
pub mod client;
pub mod config;
pub mod error;
pub mod fees;
pub mod poller;
pub mod session;

pub use client::SigilClient;
pub use config::ClientConfig;
pub use error::SigilError;

/// One-time tracing initialization for tests; filter via `RUST_LOG`.
#[cfg(test)]
pub(crate) fn init_test_logging() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}
