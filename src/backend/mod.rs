// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Sigil Labs

//! Sigil backend API: wire models and HTTP client.

pub mod client;
pub mod models;

pub use client::{HttpBackend, WalletBackend};
pub use models::{
    ClaimGasResponse, ClaimRequest, ClaimResponse, LaunchProject, MyProjects, TokenHolding,
    WalletAddress, WalletBalance, WalletInfo, WithdrawRequest, WithdrawResponse,
};
