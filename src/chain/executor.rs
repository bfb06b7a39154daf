// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Sigil Labs

//! # Contract Write Executor
//!
//! Generic transaction-submission routine: obtains a signing client, submits
//! one named contract call, and tracks pending/error/hash state.
//!
//! State transitions are monotonic within one `execute` call:
//! pending → (hash set | error set) → not pending. Errors never propagate to
//! the caller; `execute` resolves to `None` and the message lands in
//! [`WriteState::error`]. There is no retry and no executor-level timeout.
//!
//! Writes are not internally serialized: two overlapping `execute` calls
//! race and the last to settle wins the stored state. Callers gate their
//! trigger UI on [`WriteState::is_pending`].

use std::sync::Arc;

use alloy::{
    primitives::{Address, U256},
    providers::Provider,
    rpc::types::TransactionRequest,
    sol_types::SolCall,
};
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::client::NetworkConfig;
use super::contracts::{IMilestoneEscrow, ITokenMigrator, IERC20};
use super::signer::WalletAccessor;
use crate::error::SigilError;

/// Phase marker for the two-transaction migration flow; escrow writes stay
/// at `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteStep {
    #[default]
    Idle,
    Approving,
    Migrating,
}

/// Ephemeral per-invocation write state, reset at the start of each call.
#[derive(Debug, Clone, Default)]
pub struct WriteState {
    pub is_pending: bool,
    pub error: Option<String>,
    pub tx_hash: Option<String>,
    pub step: WriteStep,
}

/// Milestone-escrow governance operations.
#[derive(Debug, Clone)]
pub enum EscrowCall {
    CreateProposal {
        token: Address,
        description: String,
        /// Base units.
        amount: U256,
        /// Unix timestamp, seconds.
        deadline: u64,
    },
    Vote {
        proposal_id: u64,
        support: bool,
    },
    VoteWithComment {
        proposal_id: u64,
        support: bool,
        comment: String,
    },
    FinalizeVote {
        proposal_id: u64,
    },
    SubmitProof {
        proposal_id: u64,
        proof_uri: String,
    },
    VoteCompletion {
        proposal_id: u64,
        approve: bool,
    },
    VoteCompletionWithComment {
        proposal_id: u64,
        approve: bool,
        comment: String,
    },
    FinalizeCompletion {
        proposal_id: u64,
    },
}

/// Token-migration operations. `Approve` targets the legacy token contract,
/// `Migrate` the migrator itself.
#[derive(Debug, Clone)]
pub enum MigratorCall {
    Approve { amount: U256 },
    Migrate { amount: U256 },
}

/// A named contract call with shaped arguments.
#[derive(Debug, Clone)]
pub enum ContractCall {
    Escrow(EscrowCall),
    Migrator(MigratorCall),
}

impl ContractCall {
    /// Operation name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            ContractCall::Escrow(call) => match call {
                EscrowCall::CreateProposal { .. } => "createProposal",
                EscrowCall::Vote { .. } => "vote",
                EscrowCall::VoteWithComment { .. } => "voteWithComment",
                EscrowCall::FinalizeVote { .. } => "finalizeVote",
                EscrowCall::SubmitProof { .. } => "submitProof",
                EscrowCall::VoteCompletion { .. } => "voteCompletion",
                EscrowCall::VoteCompletionWithComment { .. } => "voteCompletionWithComment",
                EscrowCall::FinalizeCompletion { .. } => "finalizeCompletion",
            },
            ContractCall::Migrator(call) => match call {
                MigratorCall::Approve { .. } => "approve",
                MigratorCall::Migrate { .. } => "migrate",
            },
        }
    }
}

/// Submits an encoded call as a signed transaction. The live implementation
/// goes through the wallet accessor; tests inject mocks.
#[async_trait]
pub trait TxSubmitter: Send + Sync {
    /// Submit the call and return the transaction hash.
    async fn submit(&self, call: &ContractCall) -> Result<String, SigilError>;
}

/// Live submitter: encodes the call against the configured contract
/// addresses and sends it through a fresh signing client.
pub struct RpcSubmitter {
    accessor: WalletAccessor,
    network: NetworkConfig,
    escrow: Option<Address>,
    migrator: Option<Address>,
    old_token: Option<Address>,
}

impl RpcSubmitter {
    pub fn new(
        accessor: WalletAccessor,
        network: NetworkConfig,
        escrow: Option<Address>,
        migrator: Option<Address>,
        old_token: Option<Address>,
    ) -> Self {
        Self {
            accessor,
            network,
            escrow,
            migrator,
            old_token,
        }
    }

    /// Resolve target contract and calldata for one call.
    fn encode(&self, call: &ContractCall) -> Result<(Address, Vec<u8>), SigilError> {
        match call {
            ContractCall::Escrow(call) => {
                let target = self
                    .escrow
                    .ok_or_else(|| SigilError::Contract("escrow contract not configured".into()))?;
                Ok((target, encode_escrow(call)))
            }
            ContractCall::Migrator(MigratorCall::Approve { amount }) => {
                let token = self.old_token.ok_or_else(|| {
                    SigilError::Contract("legacy token not configured".into())
                })?;
                let spender = self.migrator.ok_or_else(|| {
                    SigilError::Contract("migrator contract not configured".into())
                })?;
                let data = IERC20::approveCall {
                    spender,
                    amount: *amount,
                }
                .abi_encode();
                Ok((token, data))
            }
            ContractCall::Migrator(MigratorCall::Migrate { amount }) => {
                let target = self.migrator.ok_or_else(|| {
                    SigilError::Contract("migrator contract not configured".into())
                })?;
                let data = ITokenMigrator::migrateCall { amount: *amount }.abi_encode();
                Ok((target, data))
            }
        }
    }
}

fn encode_escrow(call: &EscrowCall) -> Vec<u8> {
    match call {
        EscrowCall::CreateProposal {
            token,
            description,
            amount,
            deadline,
        } => IMilestoneEscrow::createProposalCall {
            token: *token,
            description: description.clone(),
            amount: *amount,
            deadline: U256::from(*deadline),
        }
        .abi_encode(),
        EscrowCall::Vote {
            proposal_id,
            support,
        } => IMilestoneEscrow::voteCall {
            proposalId: U256::from(*proposal_id),
            support: *support,
        }
        .abi_encode(),
        EscrowCall::VoteWithComment {
            proposal_id,
            support,
            comment,
        } => IMilestoneEscrow::voteWithCommentCall {
            proposalId: U256::from(*proposal_id),
            support: *support,
            comment: comment.clone(),
        }
        .abi_encode(),
        EscrowCall::FinalizeVote { proposal_id } => IMilestoneEscrow::finalizeVoteCall {
            proposalId: U256::from(*proposal_id),
        }
        .abi_encode(),
        EscrowCall::SubmitProof {
            proposal_id,
            proof_uri,
        } => IMilestoneEscrow::submitProofCall {
            proposalId: U256::from(*proposal_id),
            proofUri: proof_uri.clone(),
        }
        .abi_encode(),
        EscrowCall::VoteCompletion {
            proposal_id,
            approve,
        } => IMilestoneEscrow::voteCompletionCall {
            proposalId: U256::from(*proposal_id),
            approve: *approve,
        }
        .abi_encode(),
        EscrowCall::VoteCompletionWithComment {
            proposal_id,
            approve,
            comment,
        } => IMilestoneEscrow::voteCompletionWithCommentCall {
            proposalId: U256::from(*proposal_id),
            approve: *approve,
            comment: comment.clone(),
        }
        .abi_encode(),
        EscrowCall::FinalizeCompletion { proposal_id } => {
            IMilestoneEscrow::finalizeCompletionCall {
                proposalId: U256::from(*proposal_id),
            }
            .abi_encode()
        }
    }
}

#[async_trait]
impl TxSubmitter for RpcSubmitter {
    async fn submit(&self, call: &ContractCall) -> Result<String, SigilError> {
        let handle = self.accessor.first()?;
        let (target, data) = self.encode(call)?;
        let client = handle.signing_client(&self.network)?;

        let tx = TransactionRequest::default().to(target).input(data.into());

        let pending = client
            .send_transaction(tx)
            .await
            .map_err(|e| SigilError::Contract(e.to_string()))?;

        let tx_hash = format!("{:?}", pending.tx_hash());
        info!(op = call.name(), tx_hash = %tx_hash, "submitted contract call");
        Ok(tx_hash)
    }
}

/// The write executor hooks build on. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct WriteExecutor {
    submitter: Arc<dyn TxSubmitter>,
    state: Arc<RwLock<WriteState>>,
}

impl WriteExecutor {
    pub fn new(submitter: Arc<dyn TxSubmitter>) -> Self {
        Self {
            submitter,
            state: Arc::new(RwLock::new(WriteState::default())),
        }
    }

    /// Snapshot of the current write state.
    pub async fn state(&self) -> WriteState {
        self.state.read().await.clone()
    }

    /// Submit a call with the default `Idle` step marker.
    pub async fn execute(&self, call: ContractCall) -> Option<String> {
        self.execute_with_step(call, WriteStep::Idle).await
    }

    /// Submit a call, tagging the in-flight phase (migration approve/migrate).
    pub async fn execute_with_step(&self, call: ContractCall, step: WriteStep) -> Option<String> {
        {
            let mut state = self.state.write().await;
            state.is_pending = true;
            state.error = None;
            state.tx_hash = None;
            state.step = step;
        }

        let result = self.submitter.submit(&call).await;

        let mut state = self.state.write().await;
        state.is_pending = false;
        match result {
            Ok(hash) => {
                state.tx_hash = Some(hash.clone());
                Some(hash)
            }
            Err(e) => {
                warn!(op = call.name(), error = %e, "contract call failed");
                state.error = Some(e.user_message());
                None
            }
        }
    }

    /// Record a failure that happened before submission (argument shaping).
    pub(crate) async fn record_failure(&self, message: impl Into<String>) {
        let mut state = self.state.write().await;
        state.is_pending = false;
        state.error = Some(message.into());
    }
}
