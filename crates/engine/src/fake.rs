// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scriptable in-memory network for engine tests
//!
//! Records every call the engine makes and lets tests script
//! connectivity, inventory, calculation outcomes, and job lifecycles.
//! Clones share state, so a test can keep a handle while the engine
//! owns its own.

use crate::network::{
    CalculationError, CalculationPoll, CraftingPlan, ResourceNetwork, SubmitError,
};
use restock_core::ResourceId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Handle for a scripted calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FakeCalc(u64);

/// Handle for a scripted job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FakeJob(pub u64);

#[derive(Debug)]
struct PendingCalc {
    target: ResourceId,
    amount: u64,
    held: bool,
}

#[derive(Debug, Default)]
struct JobState {
    finished: bool,
    canceled: bool,
}

#[derive(Debug)]
struct FakeState {
    ready: bool,
    channel: bool,
    amounts: HashMap<ResourceId, i64>,
    producible: HashMap<ResourceId, bool>,
    watches: Vec<ResourceId>,
    calcs: HashMap<u64, PendingCalc>,
    jobs: HashMap<u64, JobState>,
    next_handle: u64,
    calcs_started: usize,
    jobs_submitted: usize,
    hold_calculations: bool,
    simulated_plans: bool,
    missing_inputs: Vec<ResourceId>,
    calc_fault: Option<String>,
    submit_error: Option<SubmitError>,
}

impl Default for FakeState {
    fn default() -> Self {
        Self {
            ready: true,
            channel: true,
            amounts: HashMap::new(),
            producible: HashMap::new(),
            watches: Vec::new(),
            calcs: HashMap::new(),
            jobs: HashMap::new(),
            next_handle: 0,
            calcs_started: 0,
            jobs_submitted: 0,
            hold_calculations: false,
            simulated_plans: false,
            missing_inputs: Vec::new(),
            calc_fault: None,
            submit_error: None,
        }
    }
}

/// Shared-state fake implementing [`ResourceNetwork`].
#[derive(Debug, Clone, Default)]
pub struct FakeNetwork {
    state: Arc<Mutex<FakeState>>,
}

impl FakeNetwork {
    /// A connected network with a channel and empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    // ---- Scripting ------------------------------------------------

    pub fn set_ready(&self, ready: bool) {
        self.lock().ready = ready;
    }

    pub fn set_channel(&self, available: bool) {
        self.lock().channel = available;
    }

    pub fn set_amount(&self, resource: impl Into<ResourceId>, amount: i64) {
        self.lock().amounts.insert(resource.into(), amount);
    }

    pub fn set_producible(&self, resource: impl Into<ResourceId>, producible: bool) {
        self.lock().producible.insert(resource.into(), producible);
    }

    /// Keep calculations pending until released.
    pub fn hold_calculations(&self) {
        self.lock().hold_calculations = true;
    }

    /// Let held calculations complete on their next poll.
    pub fn release_calculations(&self) {
        let mut state = self.lock();
        state.hold_calculations = false;
        for calc in state.calcs.values_mut() {
            calc.held = false;
        }
    }

    /// Fault every calculation completed from now on.
    pub fn fail_calculations(&self, message: impl Into<String>) {
        self.lock().calc_fault = Some(message.into());
    }

    /// Produce simulation-only plans.
    pub fn simulate_plans(&self) {
        self.lock().simulated_plans = true;
    }

    /// Produce plans with the given unresolved inputs.
    pub fn plan_missing_inputs(&self, missing: Vec<ResourceId>) {
        self.lock().missing_inputs = missing;
    }

    /// Reject every submission with the given error.
    pub fn reject_submissions(&self, error: SubmitError) {
        self.lock().submit_error = Some(error);
    }

    /// Mark a submitted job finished.
    pub fn finish_job(&self, job: &FakeJob) {
        if let Some(state) = self.lock().jobs.get_mut(&job.0) {
            state.finished = true;
        }
    }

    /// Mark a submitted job canceled (which also finishes it).
    pub fn cancel_job(&self, job: &FakeJob) {
        if let Some(state) = self.lock().jobs.get_mut(&job.0) {
            state.finished = true;
            state.canceled = true;
        }
    }

    // ---- Inspection -----------------------------------------------

    /// Resources watched since the last `clear_watches`, in
    /// subscription order.
    pub fn watches(&self) -> Vec<ResourceId> {
        self.lock().watches.clone()
    }

    pub fn calculations_started(&self) -> usize {
        self.lock().calcs_started
    }

    pub fn jobs_submitted(&self) -> usize {
        self.lock().jobs_submitted
    }
}

impl ResourceNetwork for FakeNetwork {
    type Calc = FakeCalc;
    type Job = FakeJob;

    fn is_ready(&self) -> bool {
        self.lock().ready
    }

    fn channel_available(&self) -> bool {
        self.lock().channel
    }

    fn current_amount(&self, resource: &ResourceId) -> i64 {
        self.lock().amounts.get(resource).copied().unwrap_or(0)
    }

    fn is_producible(&self, resource: &ResourceId) -> bool {
        self.lock().producible.get(resource).copied().unwrap_or(false)
    }

    fn begin_calculation(&self, target: &ResourceId, amount: u64) -> FakeCalc {
        let mut state = self.lock();
        let handle = state.next_handle;
        state.next_handle += 1;
        state.calcs_started += 1;
        let held = state.hold_calculations;
        state.calcs.insert(
            handle,
            PendingCalc {
                target: target.clone(),
                amount,
                held,
            },
        );
        FakeCalc(handle)
    }

    fn poll_calculation(&self, calc: &FakeCalc) -> CalculationPoll {
        let mut state = self.lock();
        let Some(pending) = state.calcs.get(&calc.0) else {
            return CalculationPoll::Failed(CalculationError("unknown calculation".into()));
        };
        if pending.held {
            return CalculationPoll::Pending;
        }
        let pending = match state.calcs.remove(&calc.0) {
            Some(pending) => pending,
            None => return CalculationPoll::Pending,
        };
        if let Some(message) = state.calc_fault.clone() {
            return CalculationPoll::Failed(CalculationError(message));
        }
        CalculationPoll::Ready(CraftingPlan {
            target: pending.target,
            amount: pending.amount,
            simulated: state.simulated_plans,
            missing_inputs: state.missing_inputs.clone(),
        })
    }

    fn submit_job(&self, _plan: &CraftingPlan) -> Result<FakeJob, SubmitError> {
        let mut state = self.lock();
        if let Some(error) = state.submit_error.clone() {
            return Err(error);
        }
        let handle = state.next_handle;
        state.next_handle += 1;
        state.jobs_submitted += 1;
        state.jobs.insert(handle, JobState::default());
        Ok(FakeJob(handle))
    }

    fn job_is_finished(&self, job: &FakeJob) -> bool {
        self.lock().jobs.get(&job.0).is_some_and(|s| s.finished)
    }

    fn job_was_canceled(&self, job: &FakeJob) -> bool {
        self.lock().jobs.get(&job.0).is_some_and(|s| s.canceled)
    }

    fn watch(&self, resource: &ResourceId) {
        self.lock().watches.push(resource.clone());
    }

    fn clear_watches(&self) {
        self.lock().watches.clear();
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
