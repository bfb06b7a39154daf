// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Sigil Labs

//! Named escrow and migration actions.
//!
//! Thin argument-shaping wrappers over [`WriteExecutor::execute`]: each
//! method shapes its inputs (address parsing, base-unit amounts, unix
//! timestamps) and resolves to the transaction hash or `None`, with the
//! failure message in the shared write state. The migration flow is two
//! sequential transactions (ERC-20 `approve`, then `migrate`); the caller
//! decides whether and when to invoke `migrate` after `approve` resolves —
//! nothing here auto-chains them.

use std::str::FromStr;

use alloy::primitives::{Address, U256};

use super::executor::{ContractCall, EscrowCall, MigratorCall, WriteExecutor, WriteState, WriteStep};

/// Milestone-escrow governance actions.
#[derive(Clone)]
pub struct EscrowActions {
    executor: WriteExecutor,
}

impl EscrowActions {
    pub fn new(executor: WriteExecutor) -> Self {
        Self { executor }
    }

    /// Current write state (pending/error/hash).
    pub async fn state(&self) -> WriteState {
        self.executor.state().await
    }

    /// `createProposal(token, description, amount, deadline)`.
    ///
    /// `amount` is in base units; `deadline` is a unix timestamp in seconds.
    pub async fn create_proposal(
        &self,
        token: &str,
        description: &str,
        amount: U256,
        deadline: u64,
    ) -> Option<String> {
        let token = match parse_address(token) {
            Ok(addr) => addr,
            Err(message) => {
                self.executor.record_failure(message).await;
                return None;
            }
        };
        self.executor
            .execute(ContractCall::Escrow(EscrowCall::CreateProposal {
                token,
                description: description.to_string(),
                amount,
                deadline,
            }))
            .await
    }

    pub async fn vote(&self, proposal_id: u64, support: bool) -> Option<String> {
        self.executor
            .execute(ContractCall::Escrow(EscrowCall::Vote {
                proposal_id,
                support,
            }))
            .await
    }

    pub async fn vote_with_comment(
        &self,
        proposal_id: u64,
        support: bool,
        comment: &str,
    ) -> Option<String> {
        self.executor
            .execute(ContractCall::Escrow(EscrowCall::VoteWithComment {
                proposal_id,
                support,
                comment: comment.to_string(),
            }))
            .await
    }

    pub async fn finalize_vote(&self, proposal_id: u64) -> Option<String> {
        self.executor
            .execute(ContractCall::Escrow(EscrowCall::FinalizeVote {
                proposal_id,
            }))
            .await
    }

    pub async fn submit_proof(&self, proposal_id: u64, proof_uri: &str) -> Option<String> {
        self.executor
            .execute(ContractCall::Escrow(EscrowCall::SubmitProof {
                proposal_id,
                proof_uri: proof_uri.to_string(),
            }))
            .await
    }

    pub async fn vote_completion(&self, proposal_id: u64, approve: bool) -> Option<String> {
        self.executor
            .execute(ContractCall::Escrow(EscrowCall::VoteCompletion {
                proposal_id,
                approve,
            }))
            .await
    }

    pub async fn vote_completion_with_comment(
        &self,
        proposal_id: u64,
        approve: bool,
        comment: &str,
    ) -> Option<String> {
        self.executor
            .execute(ContractCall::Escrow(EscrowCall::VoteCompletionWithComment {
                proposal_id,
                approve,
                comment: comment.to_string(),
            }))
            .await
    }

    pub async fn finalize_completion(&self, proposal_id: u64) -> Option<String> {
        self.executor
            .execute(ContractCall::Escrow(EscrowCall::FinalizeCompletion {
                proposal_id,
            }))
            .await
    }
}

/// Legacy-to-new token migration actions.
#[derive(Clone)]
pub struct MigrationActions {
    executor: WriteExecutor,
}

impl MigrationActions {
    pub fn new(executor: WriteExecutor) -> Self {
        Self { executor }
    }

    /// Current write state; `step` distinguishes the approve and migrate
    /// phases while a transaction is in flight.
    pub async fn state(&self) -> WriteState {
        self.executor.state().await
    }

    /// ERC-20 `approve` of the migrator for `amount` base units of the
    /// legacy token. First of the two migration transactions.
    pub async fn approve(&self, amount: U256) -> Option<String> {
        self.executor
            .execute_with_step(
                ContractCall::Migrator(MigratorCall::Approve { amount }),
                WriteStep::Approving,
            )
            .await
    }

    /// `migrate(amount)` on the migrator. Callers invoke this after
    /// `approve` has resolved.
    pub async fn migrate(&self, amount: U256) -> Option<String> {
        self.executor
            .execute_with_step(
                ContractCall::Migrator(MigratorCall::Migrate { amount }),
                WriteStep::Migrating,
            )
            .await
    }
}

fn parse_address(raw: &str) -> Result<Address, String> {
    Address::from_str(raw).map_err(|e| format!("Invalid address: {e}"))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;
    use crate::chain::executor::TxSubmitter;
    use crate::error::SigilError;

    struct Recording(tokio::sync::Mutex<Vec<String>>);

    #[async_trait]
    impl TxSubmitter for Recording {
        async fn submit(&self, call: &ContractCall) -> Result<String, SigilError> {
            self.0.lock().await.push(call.name().to_string());
            Ok(format!("0x{:02x}", self.0.lock().await.len()))
        }
    }

    #[tokio::test]
    async fn escrow_actions_map_to_named_operations() {
        let recorder = Arc::new(Recording(tokio::sync::Mutex::new(Vec::new())));
        let actions = EscrowActions::new(WriteExecutor::new(recorder.clone()));

        actions.vote(1, true).await;
        actions.vote_with_comment(1, false, "needs more detail").await;
        actions.finalize_vote(1).await;
        actions.submit_proof(1, "ipfs://proof").await;
        actions.vote_completion(1, true).await;
        actions.vote_completion_with_comment(1, true, "done well").await;
        actions.finalize_completion(1).await;

        let seen = recorder.0.lock().await.clone();
        assert_eq!(
            seen,
            vec![
                "vote",
                "voteWithComment",
                "finalizeVote",
                "submitProof",
                "voteCompletion",
                "voteCompletionWithComment",
                "finalizeCompletion",
            ]
        );
    }

    #[tokio::test]
    async fn create_proposal_rejects_bad_token_address_without_submitting() {
        let recorder = Arc::new(Recording(tokio::sync::Mutex::new(Vec::new())));
        let actions = EscrowActions::new(WriteExecutor::new(recorder.clone()));

        let result = actions
            .create_proposal("not-an-address", "milestone 1", U256::from(100u64), 1_700_000_000)
            .await;

        assert_eq!(result, None);
        assert!(recorder.0.lock().await.is_empty());
        let state = actions.state().await;
        assert!(state.error.as_deref().unwrap().starts_with("Invalid address"));
        assert!(!state.is_pending);
    }

    #[tokio::test]
    async fn migration_does_not_auto_chain_approve_and_migrate() {
        let recorder = Arc::new(Recording(tokio::sync::Mutex::new(Vec::new())));
        let actions = MigrationActions::new(WriteExecutor::new(recorder.clone()));

        actions.approve(U256::from(500u64)).await;
        assert_eq!(recorder.0.lock().await.as_slice(), ["approve"]);
        assert_eq!(actions.state().await.step, WriteStep::Approving);

        actions.migrate(U256::from(500u64)).await;
        assert_eq!(recorder.0.lock().await.as_slice(), ["approve", "migrate"]);
        assert_eq!(actions.state().await.step, WriteStep::Migrating);
    }
}
