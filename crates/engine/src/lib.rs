// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! restock-engine: rule evaluation and request orchestration
//!
//! This crate provides:
//! - The capability interface onto the shared resource network
//! - The requester engine: per-rule evaluation, cross-rule
//!   deduplication, asynchronous calculation polling, job tracking
//! - A single-consumer event-loop runtime for multi-threaded hosts
//! - A scriptable fake network for tests

pub mod fake;
pub mod network;
pub mod requester;
pub mod runtime;

// Re-exports
pub use fake::{FakeCalc, FakeJob, FakeNetwork};
pub use network::{
    CalculationError, CalculationPoll, CraftingPlan, ResourceNetwork, SubmitError,
};
pub use requester::Requester;
pub use runtime::{NetworkEvent, Runtime};
