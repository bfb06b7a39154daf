// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Sigil Labs

//! Ephemeral session identity and caller resolution.
//!
//! A session id is generated client-side on first use and never persisted;
//! it identifies an anonymous custodial wallet on the backend. When the user
//! signs in, the identity bearer token takes precedence over the session id
//! for every backend call. Exactly one of the two is "effective" at a time.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::AuthBridge;

/// Ephemeral client-generated session identifier.
///
/// Created on first page load (here: client construction) and destroyed with
/// the process; the backend keys anonymous wallets by this value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SessionId(pub String);

impl SessionId {
    /// Generate a fresh session id.
    pub fn new_ephemeral() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The effective caller for a backend request.
///
/// Identity is preferred over session; with neither, calls that need a caller
/// are silent no-ops (not errors).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallerIdentity {
    /// Authenticated: a fresh bearer token was obtained for `subject`.
    Bearer {
        token: String,
        /// The provider's canonical user id; empty if the provider shares
        /// no user record.
        subject: String,
    },
    /// Anonymous but session-scoped.
    Session(SessionId),
    /// No identity and no session.
    Anonymous,
}

impl CallerIdentity {
    /// Resolve the effective caller: identity token first, then session id,
    /// then anonymous.
    pub async fn resolve(auth: &AuthBridge, session: Option<&SessionId>) -> Self {
        if let Some(token) = auth.access_token().await {
            let subject = auth.state().user.map(|u| u.id).unwrap_or_default();
            return CallerIdentity::Bearer { token, subject };
        }
        match session {
            Some(id) => CallerIdentity::Session(id.clone()),
            None => CallerIdentity::Anonymous,
        }
    }

    /// A stable key for "did the effective identity change" comparisons
    /// (auto-create guard resets on change). Tokens rotate within one
    /// signed-in user, so the bearer arm keys on the subject id rather than
    /// the token text.
    pub fn lifetime_key(&self) -> String {
        match self {
            CallerIdentity::Bearer { subject, .. } => format!("identity:{subject}"),
            CallerIdentity::Session(id) => format!("session:{id}"),
            CallerIdentity::Anonymous => "anonymous".to_string(),
        }
    }
}
