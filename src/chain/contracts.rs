// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Sigil Labs

//! Contract interfaces for the Sigil platform.
//!
//! All contracts are external collaborators with fixed ABIs; nothing here is
//! deployed or owned by this client.

use alloy::sol;

sol! {
    /// Standard ERC-20 surface used by migration and fee display.
    #[sol(rpc)]
    interface IERC20 {
        function name() external view returns (string);
        function symbol() external view returns (string);
        function decimals() external view returns (uint8);
        function balanceOf(address account) external view returns (uint256);
        function transfer(address to, uint256 amount) external returns (bool);
        function allowance(address owner, address spender) external view returns (uint256);
        function approve(address spender, uint256 amount) external returns (bool);
    }

    /// Fee vault: per-developer claimable and lifetime fee accounting.
    #[sol(rpc)]
    interface IFeeVault {
        /// Currently withdrawable fees for `dev` in `token`.
        function devFees(address dev, address token) external view returns (uint256);
        /// Cumulative fees ever earned by `dev` in `token`.
        function totalDevFeesEarned(address dev, address token) external view returns (uint256);
        /// All claimable balances for `dev`: parallel token/symbol/balance arrays.
        function getDevFeeBalances(address dev)
            external
            view
            returns (address[] tokens, string[] symbols, uint256[] balances);
    }

    /// Milestone escrow governance.
    #[sol(rpc)]
    interface IMilestoneEscrow {
        function createProposal(
            address token,
            string description,
            uint256 amount,
            uint256 deadline
        ) external returns (uint256);
        function vote(uint256 proposalId, bool support) external;
        function voteWithComment(uint256 proposalId, bool support, string comment) external;
        function finalizeVote(uint256 proposalId) external;
        function submitProof(uint256 proposalId, string proofUri) external;
        function voteCompletion(uint256 proposalId, bool approve) external;
        function voteCompletionWithComment(uint256 proposalId, bool approve, string comment) external;
        function finalizeCompletion(uint256 proposalId) external;
    }

    /// Legacy-to-new token migrator.
    #[sol(rpc)]
    interface ITokenMigrator {
        function allocation(address account) external view returns (uint256);
        function claimed(address account) external view returns (uint256);
        function claimable(address account) external view returns (uint256);
        function paused() external view returns (bool);
        function migrate(uint256 amount) external;
    }
}
