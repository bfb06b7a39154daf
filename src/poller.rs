// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Sigil Labs

//! # Wallet Balance Poller
//!
//! Background task that maintains a client-visible view of the user's
//! custodial or identity-linked wallet, auto-provisioning it on first
//! contact.
//!
//! ## Strategy
//!
//! Every `POLL_INTERVAL` (30 s) the poller:
//! 1. Resolves the effective caller: identity bearer token first, then the
//!    session id, otherwise the sweep is a silent no-op.
//! 2. Fetches the wallet record. A record with `exists == false` triggers
//!    `create_wallet` at most once per identity/session lifetime; the guard
//!    slot is taken before the create request is issued, so overlapping
//!    fetches provision exactly once. The guard resets whenever the
//!    effective identity or session changes.
//! 3. Errors become a descriptive string in the state; the timer keeps
//!    running and the next sweep retries.
//!
//! ## Shutdown
//!
//! One owned poller task per active session. Uses
//! `tokio_util::sync::CancellationToken`; once cancelled, in-flight work
//! commits no further state updates.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::auth::AuthBridge;
use crate::backend::{WalletBackend, WalletInfo, WithdrawRequest};
use crate::error::SigilError;
use crate::session::{CallerIdentity, SessionId};

/// Interval between polling sweeps.
pub const POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Minimum time the `refreshing` flag stays visible for UI feedback.
const REFRESH_MIN_VISIBLE: Duration = Duration::from_millis(600);

/// Poller state snapshot.
#[derive(Debug, Clone, Default)]
pub struct WalletPollState {
    /// Last fetched wallet record, if any fetch has succeeded.
    pub wallet: Option<WalletInfo>,
    /// A fetch is in flight.
    pub loading: bool,
    /// A manual refresh is in flight (held for at least 600 ms).
    pub refreshing: bool,
    /// Last fetch/create failure, cleared on the next success.
    pub error: Option<String>,
}

/// Auto-create guard: at most one provisioning attempt per
/// identity/session lifetime.
struct CreateGuard {
    attempted: bool,
    lifetime_key: String,
}

/// Polls the backend wallet record for one session/identity.
pub struct WalletPoller {
    backend: Arc<dyn WalletBackend>,
    auth: AuthBridge,
    session: RwLock<Option<SessionId>>,
    state: Arc<RwLock<WalletPollState>>,
    guard: Mutex<CreateGuard>,
    cancel: CancellationToken,
    poll_interval: Duration,
}

impl WalletPoller {
    pub fn new(
        backend: Arc<dyn WalletBackend>,
        auth: AuthBridge,
        session: Option<SessionId>,
    ) -> Self {
        Self {
            backend,
            auth,
            session: RwLock::new(session),
            state: Arc::new(RwLock::new(WalletPollState::default())),
            guard: Mutex::new(CreateGuard {
                attempted: false,
                lifetime_key: String::new(),
            }),
            cancel: CancellationToken::new(),
            poll_interval: POLL_INTERVAL,
        }
    }

    /// State snapshot.
    pub async fn state(&self) -> WalletPollState {
        self.state.read().await.clone()
    }

    /// Replace the session id; the auto-create guard resets on the next
    /// fetch because the effective lifetime changes.
    pub async fn set_session(&self, session: Option<SessionId>) {
        *self.session.write().await = session;
    }

    /// Stop the poller; no state updates are committed afterwards.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    /// Run the polling loop until [`shutdown`](Self::shutdown).
    ///
    /// Spawn as a background task:
    /// ```rust,ignore
    /// tokio::spawn(poller.clone().run());
    /// ```
    pub async fn run(self: Arc<Self>) {
        info!(
            interval_secs = self.poll_interval.as_secs(),
            "wallet poller starting"
        );

        loop {
            if self.cancel.is_cancelled() {
                info!("wallet poller shutting down");
                return;
            }

            self.fetch_wallet().await;

            tokio::select! {
                _ = tokio::time::sleep(self.poll_interval) => {}
                _ = self.cancel.cancelled() => {
                    info!("wallet poller shutting down");
                    return;
                }
            }
        }
    }

    /// Fetch the wallet record once.
    ///
    /// Resolution order: identity bearer token, then session id, otherwise
    /// a silent no-op (no fetch, no error). A missing record triggers the
    /// one-shot auto-create and an immediate re-fetch.
    pub async fn fetch_wallet(&self) {
        let session = self.session.read().await.clone();
        let caller = CallerIdentity::resolve(&self.auth, session.as_ref()).await;
        self.reset_guard_if_lifetime_changed(&caller).await;

        if caller == CallerIdentity::Anonymous {
            return;
        }

        self.commit(|s| s.loading = true).await;

        let mut outcome = self.fetch_for(&caller).await;
        if matches!(&outcome, Ok(info) if !info.exists) && self.take_create_slot().await {
            outcome = match self.create_for(&caller).await {
                Ok(()) => self.fetch_for(&caller).await,
                Err(e) => Err(e),
            };
        }

        match outcome {
            Ok(info) => {
                self.commit(move |s| {
                    s.wallet = Some(info);
                    s.error = None;
                    s.loading = false;
                })
                .await;
            }
            Err(e) => {
                warn!(error = %e, "wallet fetch failed");
                let message = e.user_message();
                self.commit(move |s| {
                    s.error = Some(message);
                    s.loading = false;
                })
                .await;
            }
        }
    }

    /// Provision the wallet explicitly, then re-fetch to populate balance.
    pub async fn create_wallet(&self) {
        let session = self.session.read().await.clone();
        let caller = CallerIdentity::resolve(&self.auth, session.as_ref()).await;
        self.reset_guard_if_lifetime_changed(&caller).await;

        if caller == CallerIdentity::Anonymous {
            return;
        }

        // An explicit create counts as this lifetime's attempt.
        self.guard.lock().await.attempted = true;

        match self.create_for(&caller).await {
            Ok(()) => self.fetch_wallet().await,
            Err(e) => {
                warn!(error = %e, "wallet create failed");
                let message = e.user_message();
                self.commit(move |s| s.error = Some(message)).await;
            }
        }
    }

    /// Immediate fetch with UI feedback, independent of the poll timer.
    /// The `refreshing` flag stays set for at least 600 ms.
    pub async fn refresh_balance(&self) {
        self.commit(|s| s.refreshing = true).await;
        let started = tokio::time::Instant::now();

        self.fetch_wallet().await;

        let elapsed = started.elapsed();
        if elapsed < REFRESH_MIN_VISIBLE {
            tokio::time::sleep(REFRESH_MIN_VISIBLE - elapsed).await;
        }
        self.commit(|s| s.refreshing = false).await;
    }

    /// Withdraw from the session wallet through the backend, then re-fetch.
    /// Resolves to the transaction hash, or `None` with the failure in
    /// state.
    pub async fn withdraw(&self, request: &WithdrawRequest) -> Option<String> {
        let session = self.session.read().await.clone();
        let Some(session) = session else {
            self.commit(|s| s.error = Some("No active session".to_string()))
                .await;
            return None;
        };

        match self.backend.withdraw(session.as_str(), request).await {
            Ok(response) => {
                self.fetch_wallet().await;
                Some(response.tx_hash)
            }
            Err(e) => {
                let message = e.user_message();
                self.commit(move |s| s.error = Some(message)).await;
                None
            }
        }
    }

    async fn fetch_for(&self, caller: &CallerIdentity) -> Result<WalletInfo, SigilError> {
        match caller {
            CallerIdentity::Bearer { token, .. } => self.backend.identity_wallet(token).await,
            CallerIdentity::Session(id) => self.backend.session_wallet(id.as_str()).await,
            CallerIdentity::Anonymous => Ok(WalletInfo::missing()),
        }
    }

    async fn create_for(&self, caller: &CallerIdentity) -> Result<(), SigilError> {
        match caller {
            CallerIdentity::Bearer { token, .. } => {
                self.backend.create_identity_wallet(token).await
            }
            CallerIdentity::Session(id) => self.backend.create_session_wallet(id.as_str()).await,
            CallerIdentity::Anonymous => Ok(()),
        }
    }

    /// Take the single auto-create slot. The slot is claimed before the
    /// create request goes out, so overlapping fetches cannot double-
    /// provision.
    async fn take_create_slot(&self) -> bool {
        let mut guard = self.guard.lock().await;
        if guard.attempted {
            false
        } else {
            guard.attempted = true;
            true
        }
    }

    async fn reset_guard_if_lifetime_changed(&self, caller: &CallerIdentity) {
        let key = caller.lifetime_key();
        let mut guard = self.guard.lock().await;
        if guard.lifetime_key != key {
            guard.lifetime_key = key;
            guard.attempted = false;
        }
    }

    /// Apply a state update unless the poller has been shut down.
    async fn commit<F: FnOnce(&mut WalletPollState)>(&self, update: F) {
        if self.cancel.is_cancelled() {
            return;
        }
        let mut state = self.state.write().await;
        update(&mut state);
    }
}
