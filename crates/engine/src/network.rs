// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Capability interface onto the shared resource network
//!
//! The engine consumes the network through this narrow trait: cached
//! inventory reads, producibility queries, asynchronous plan
//! calculation, job submission and tracking, and change-notification
//! subscriptions. Nothing here blocks; calculation hands back a handle
//! that the engine polls at the tick boundary.

use restock_core::ResourceId;
use thiserror::Error;

/// A computed production plan for one rule's demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CraftingPlan {
    pub target: ResourceId,
    pub amount: u64,
    /// Simulation-only plans must never be submitted.
    pub simulated: bool,
    /// Inputs the network could not resolve. Non-empty means the plan
    /// is incomplete.
    pub missing_inputs: Vec<ResourceId>,
}

impl CraftingPlan {
    /// A complete, submittable plan.
    pub fn new(target: impl Into<ResourceId>, amount: u64) -> Self {
        Self {
            target: target.into(),
            amount,
            simulated: false,
            missing_inputs: Vec::new(),
        }
    }
}

/// Host-side fault inside a plan calculation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("calculation failed: {0}")]
pub struct CalculationError(pub String);

/// Result of polling a pending calculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalculationPoll {
    /// Still computing.
    Pending,
    /// Completed with a plan.
    Ready(CraftingPlan),
    /// Faulted host-side. Rule-scoped: the engine logs it and demotes
    /// the rule, never the whole pass.
    Failed(CalculationError),
}

/// Why a job submission was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("no execution unit available")]
    NoExecutionUnit,
    #[error("submission rejected: {0}")]
    Rejected(String),
}

/// Adapter onto the shared resource network.
///
/// The network is the system of record for inventory, production
/// capability, and job execution; the engine only signals demand.
pub trait ResourceNetwork {
    /// Handle for an in-flight plan calculation.
    type Calc;
    /// Handle for an accepted, executing job.
    type Job: PartialEq;

    /// Connectivity/readiness of the network link.
    fn is_ready(&self) -> bool;

    /// Whether a network channel is available for this device.
    fn channel_available(&self) -> bool;

    /// Cached inventory amount for a resource.
    fn current_amount(&self, resource: &ResourceId) -> i64;

    /// Whether the network knows how to produce the resource.
    fn is_producible(&self, resource: &ResourceId) -> bool;

    /// Start an asynchronous plan calculation. Never blocks.
    fn begin_calculation(&self, target: &ResourceId, amount: u64) -> Self::Calc;

    /// Check on a calculation started earlier.
    fn poll_calculation(&self, calc: &Self::Calc) -> CalculationPoll;

    /// Submit a completed plan for execution.
    fn submit_job(&self, plan: &CraftingPlan) -> Result<Self::Job, SubmitError>;

    fn job_is_finished(&self, job: &Self::Job) -> bool;

    fn job_was_canceled(&self, job: &Self::Job) -> bool;

    /// Subscribe to inventory-change notifications for a resource.
    fn watch(&self, resource: &ResourceId);

    /// Drop every subscription held by this device.
    fn clear_watches(&self);
}
