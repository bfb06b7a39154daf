// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Sigil Labs

//! Error taxonomy for the Sigil client.
//!
//! Hooks ([`crate::poller`], [`crate::fees`], [`crate::chain::executor`])
//! never let these escape to their callers: every failure is converted into
//! an `error: Option<String>` state field the embedding UI renders directly.
//! `SigilError` is the internal currency between the adapters and the hooks.
//!
//! Absence of configuration (identity provider or contract address not set)
//! is deliberately *not* a variant here — it degrades to disabled adapters
//! and `None` fields, never an error.

/// Errors produced by the backend client, chain adapters, and write paths.
#[derive(Debug, thiserror::Error)]
pub enum SigilError {
    /// A write required a bearer token that could not be obtained.
    #[error("Not authenticated")]
    NotAuthenticated,

    /// A write required a signing client but no wallet handle exists.
    #[error("No wallet connected")]
    NoWalletConnected,

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid RPC URL: {0}")]
    InvalidRpcUrl(String),

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("Contract error: {0}")]
    Contract(String),

    /// Backend business-logic failure (`{success:false, error}` or an
    /// `{"error": ...}` body), surfaced verbatim.
    #[error("{0}")]
    Backend(String),

    /// Network-level failure talking to the backend, original message kept.
    #[error("Request failed: {0}")]
    Transport(String),
}

impl SigilError {
    /// Human-readable message for hook state fields.
    ///
    /// `Backend` carries the server's message verbatim; everything else uses
    /// the `Display` form.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_message_is_verbatim() {
        let err = SigilError::Backend("insufficient fee balance".to_string());
        assert_eq!(err.user_message(), "insufficient fee balance");
    }

    #[test]
    fn auth_and_wallet_messages_are_stable() {
        assert_eq!(SigilError::NotAuthenticated.user_message(), "Not authenticated");
        assert_eq!(SigilError::NoWalletConnected.user_message(), "No wallet connected");
    }
}
