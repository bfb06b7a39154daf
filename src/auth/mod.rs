// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Sigil Labs

//! # Auth Context Bridge
//!
//! Uniform optional-authentication interface. Consumers get
//! `{ready, authenticated, user, login, logout, access_token}` without
//! knowing whether an identity provider is configured.
//!
//! Two adapters, selected once at composition root:
//!
//! - [`AuthBridge::live`] — backed by a real [`IdentityProvider`]
//!   implementation (the external sign-in / embedded-wallet service).
//! - [`AuthBridge::disabled`] — fixed "ready, not authenticated" state;
//!   `access_token` yields `None`, `login`/`logout` are silent no-ops.
//!
//! Absence of configuration is a valid, silent state, not an error. Nothing
//! here throws; callers treat a `None` token as "cannot authenticate this
//! request" and degrade.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// User information exposed by the identity provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthUser {
    /// Canonical subject id from the provider.
    pub id: String,
    /// Primary email, if the provider shares it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Embedded-wallet address linked to the identity, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet_address: Option<String>,
}

/// Snapshot of the authentication state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthState {
    /// Whether the provider has finished initializing.
    pub ready: bool,
    /// Whether a user session is active.
    pub authenticated: bool,
    /// The signed-in user, when authenticated.
    pub user: Option<AuthUser>,
}

impl AuthState {
    /// The fixed state of the disabled adapter.
    pub fn unauthenticated() -> Self {
        Self {
            ready: true,
            authenticated: false,
            user: None,
        }
    }
}

/// Capability interface over the external identity provider.
///
/// Implementations wrap whatever sign-in service the host application uses.
/// Tokens are opaque bearer strings; the backend verifies them.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Current provider state.
    fn state(&self) -> AuthState;

    /// Obtain a fresh bearer token, or `None` if no session is active or the
    /// provider cannot mint one right now.
    async fn access_token(&self) -> Option<String>;

    /// Begin the provider's sign-in flow.
    async fn login(&self);

    /// End the active session.
    async fn logout(&self);
}

/// The bridge handed to every hook. Cheap to clone.
#[derive(Clone)]
pub struct AuthBridge {
    provider: Option<Arc<dyn IdentityProvider>>,
}

impl AuthBridge {
    /// Bridge backed by a live identity provider.
    pub fn live(provider: Arc<dyn IdentityProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    /// Bridge for deployments with no identity provider configured.
    pub fn disabled() -> Self {
        Self { provider: None }
    }

    /// Whether a live provider is mounted.
    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Current authentication state.
    pub fn state(&self) -> AuthState {
        match &self.provider {
            Some(p) => p.state(),
            None => AuthState::unauthenticated(),
        }
    }

    /// Fresh bearer token, or `None` when unauthenticated or unconfigured.
    pub async fn access_token(&self) -> Option<String> {
        match &self.provider {
            Some(p) => p.access_token().await,
            None => None,
        }
    }

    /// Start sign-in. No-op when unconfigured.
    pub async fn login(&self) {
        if let Some(p) = &self.provider {
            p.login().await;
        }
    }

    /// Sign out. No-op when unconfigured.
    pub async fn logout(&self) {
        if let Some(p) = &self.provider {
            p.logout().await;
        }
    }
}

impl std::fmt::Debug for AuthBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthBridge")
            .field("configured", &self.is_configured())
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Canned providers for hook tests.

    use super::*;

    /// Provider with a fixed active session and token.
    pub struct StaticProvider {
        pub token: Option<String>,
        pub user: Option<AuthUser>,
    }

    #[async_trait]
    impl IdentityProvider for StaticProvider {
        fn state(&self) -> AuthState {
            AuthState {
                ready: true,
                authenticated: self.token.is_some(),
                user: self.user.clone(),
            }
        }

        async fn access_token(&self) -> Option<String> {
            self.token.clone()
        }

        async fn login(&self) {}

        async fn logout(&self) {}
    }

    /// Bridge whose provider always yields `token`.
    pub fn authenticated_bridge(token: &str) -> AuthBridge {
        AuthBridge::live(Arc::new(StaticProvider {
            token: Some(token.to_string()),
            user: Some(AuthUser {
                id: "user_test".to_string(),
                email: None,
                wallet_address: None,
            }),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn disabled_bridge_is_ready_and_unauthenticated() {
        let bridge = AuthBridge::disabled();
        let state = bridge.state();
        assert!(state.ready);
        assert!(!state.authenticated);
        assert!(state.user.is_none());
        assert_eq!(bridge.access_token().await, None);
    }

    #[tokio::test]
    async fn disabled_login_logout_are_noops() {
        let bridge = AuthBridge::disabled();
        bridge.login().await;
        bridge.logout().await;
        assert!(!bridge.state().authenticated);
    }

    #[tokio::test]
    async fn live_bridge_reflects_provider_session() {
        let bridge = test_support::authenticated_bridge("tok-abc");
        let state = bridge.state();
        assert!(state.authenticated);
        assert_eq!(state.user.as_ref().map(|u| u.id.as_str()), Some("user_test"));
        assert_eq!(bridge.access_token().await.as_deref(), Some("tok-abc"));
    }
}
