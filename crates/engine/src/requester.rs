// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The requester engine
//!
//! Owns the rule set and drives every rule through its status machine:
//! connectivity and inventory events take the fast path, the periodic
//! tick polls pending calculations and sweeps all rules as a fallback
//! for missed notifications. Cross-rule deduplication guarantees at
//! most one in-flight request per target resource.
//!
//! Entry points are `&mut self` and must be serialized by the host; no
//! call blocks. See [`crate::runtime`] for a channel-based host loop.

use crate::network::{CalculationPoll, CraftingPlan, ResourceNetwork, SubmitError};
use restock_core::{
    Condition, DeviceStatus, EngineConfig, ResourceId, Rule, RuleId, RuleSet, RuleStatus,
};
use std::collections::{HashMap, HashSet};

/// Standing orchestrator over one rule set and one network link.
pub struct Requester<N: ResourceNetwork> {
    network: N,
    config: EngineConfig,
    rules: RuleSet,
    /// Resources currently subscribed for change notification; derived
    /// from enabled rules, rebuilt on every rules change.
    watched: HashSet<ResourceId>,
    /// Rules with an accepted, executing job.
    active_jobs: HashMap<RuleId, N::Job>,
    /// Rules with an in-flight plan calculation. A rule never holds
    /// more than one.
    pending_calcs: HashMap<RuleId, N::Calc>,
    network_ready: bool,
    tick_counter: u32,
    device_status: DeviceStatus,
}

impl<N: ResourceNetwork> Requester<N> {
    pub fn new(network: N, config: EngineConfig) -> Self {
        let rules = RuleSet::new(config.max_rules);
        Self {
            network,
            config,
            rules,
            watched: HashSet::new(),
            active_jobs: HashMap::new(),
            pending_calcs: HashMap::new(),
            network_ready: false,
            tick_counter: 0,
            device_status: DeviceStatus::Off,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn device_status(&self) -> DeviceStatus {
        self.device_status
    }

    pub fn is_network_ready(&self) -> bool {
        self.network_ready
    }

    /// Job handles for every rule currently crafting.
    pub fn requested_jobs(&self) -> impl Iterator<Item = &N::Job> {
        self.active_jobs.values()
    }

    // ---- Reactor entry points -------------------------------------

    /// The host reports the network link going up or down.
    ///
    /// Coming up rebuilds subscriptions and evaluates everything;
    /// going down marks every rule `Error` without touching its
    /// configuration.
    pub fn on_connectivity_changed(&mut self, ready: bool) {
        let now_ready =
            ready && (!self.config.require_channel || self.network.channel_available());
        let was_ready = self.network_ready;
        self.network_ready = now_ready;

        if now_ready && !was_ready {
            tracing::info!("connected to resource network");
            self.rebuild_watches();
            self.evaluate_all();
        } else if !now_ready && was_ready {
            tracing::info!("disconnected from resource network");
            for rule in self.rules.iter_mut() {
                rule.set_status(RuleStatus::Error);
            }
        }

        self.refresh_device_status();
    }

    /// A watched resource's amount changed. Fast path: re-evaluates
    /// only the rules that reference the resource.
    pub fn on_inventory_changed(&mut self, resource: &ResourceId, amount: i64) {
        tracing::debug!(resource = %resource, amount, "inventory changed");
        for index in 0..self.rules.len() {
            let Some(rule) = self.rules.get(index) else {
                break;
            };
            if rule.is_enabled() && rule.is_valid() && references(rule, resource) {
                self.evaluate_rule_at(index);
            }
        }
        self.refresh_device_status();
    }

    /// Periodic tick. Every `check_interval` ticks: poll pending
    /// calculations, then sweep all rules as the authoritative
    /// catch-up for notifications that never arrived. Calculation
    /// completion is not pushed by the network, so this polling is
    /// load-bearing, not an optimization.
    pub fn on_tick(&mut self) {
        self.tick_counter += 1;
        if self.tick_counter < self.config.check_interval {
            return;
        }
        self.tick_counter = 0;

        if !self.pending_calcs.is_empty() {
            self.poll_pending_calculations();
        }

        if self.network_ready {
            self.evaluate_all();
        }

        self.refresh_device_status();
    }

    /// The network reports a submitted job finished or canceled.
    /// Either way the link is dropped and the rule re-evaluated, which
    /// starts the next batch if its conditions still hold.
    pub fn on_job_state_changed(&mut self, job: &N::Job) {
        let Some(id) = self
            .active_jobs
            .iter()
            .find_map(|(id, held)| (held == job).then_some(*id))
        else {
            return;
        };
        self.active_jobs.remove(&id);

        if self.network.job_was_canceled(job) {
            tracing::info!(rule = %id, "production job canceled");
        } else {
            tracing::info!(rule = %id, "production job completed");
        }

        if let Some(index) = self.rules.position(id) {
            self.evaluate_rule_at(index);
        }
        self.refresh_device_status();
    }

    /// The network offers produced output for local insertion. Always
    /// declined: produced goods belong in network storage, this device
    /// only signals demand.
    pub fn accept_crafted(&mut self, _job: &N::Job, _resource: &ResourceId, _amount: i64) -> i64 {
        0
    }

    // ---- Rule operations ------------------------------------------
    //
    // Every mutation runs the rules-changed reaction: rebuild watch
    // subscriptions, evaluate everything, refresh the aggregate.

    pub fn add_rule(&mut self, rule: Rule) -> bool {
        let added = self.rules.add(rule);
        if added {
            self.rules_changed();
        }
        added
    }

    pub fn remove_rule(&mut self, id: RuleId) -> bool {
        let removed = self.rules.remove_by_id(id);
        if removed {
            self.rules_changed();
        }
        removed
    }

    pub fn remove_rule_at(&mut self, index: usize) -> bool {
        let removed = self.rules.remove_at(index);
        if removed {
            self.rules_changed();
        }
        removed
    }

    /// Commit an edited copy back by id.
    pub fn update_rule(&mut self, rule: Rule) -> bool {
        let updated = self.rules.update(rule);
        if updated {
            self.rules_changed();
        }
        updated
    }

    pub fn move_rule_up(&mut self, index: usize) -> bool {
        let moved = self.rules.move_up(index);
        if moved {
            self.rules_changed();
        }
        moved
    }

    pub fn move_rule_down(&mut self, index: usize) -> bool {
        let moved = self.rules.move_down(index);
        if moved {
            self.rules_changed();
        }
        moved
    }

    pub fn duplicate_rule(&mut self, index: usize) -> Option<RuleId> {
        let id = self.rules.duplicate_at(index);
        if id.is_some() {
            self.rules_changed();
        }
        id
    }

    /// Replace the whole rule list from an external sync source.
    /// Idempotent; truncated to capacity like any other insert.
    pub fn replace_rules(&mut self, rules: Vec<Rule>) {
        tracing::info!(count = rules.len(), "replacing rule list");
        self.rules.replace_all(rules);
        self.rules_changed();
    }

    fn rules_changed(&mut self) {
        self.rebuild_watches();
        self.evaluate_all();
        self.refresh_device_status();
    }

    // ---- Evaluation -----------------------------------------------

    fn evaluate_all(&mut self) {
        for index in 0..self.rules.len() {
            let Some(rule) = self.rules.get(index) else {
                break;
            };
            if rule.is_enabled() {
                self.evaluate_rule_at(index);
            } else {
                self.set_status(index, RuleStatus::Idle);
            }
        }
    }

    /// The single-evaluation pass for one rule. Read-only until a
    /// calculation is started or a job submitted, so re-running it
    /// against unchanged network state converges to the same status.
    fn evaluate_rule_at(&mut self, index: usize) {
        let Some(rule) = self.rules.get(index) else {
            return;
        };

        if !self.network_ready {
            self.set_status(index, RuleStatus::Error);
            return;
        }

        if !rule.is_valid() || !rule.is_enabled() {
            self.set_status(index, RuleStatus::Idle);
            return;
        }

        let id = rule.id();
        let name = rule.display_name().to_owned();
        let Some(target) = rule.target().cloned() else {
            return;
        };
        let batch_size = rule.batch_size();

        // An unfinished job for this rule means we are crafting.
        if let Some(job) = self.active_jobs.get(&id) {
            if !self.network.job_is_finished(job) {
                self.set_status(index, RuleStatus::Crafting);
                return;
            }
            self.active_jobs.remove(&id);
        }

        // Cross-rule dedup: defer to a peer that already has work in
        // flight for the same target.
        if self.peer_has_work_in_flight(id, &target) {
            self.set_status(index, RuleStatus::Crafting);
            return;
        }

        if !self.conditions_met(index) {
            self.set_status(index, RuleStatus::ConditionsNotMet);
            return;
        }

        if !self.network.is_producible(&target) {
            self.set_status(index, RuleStatus::MissingPattern);
            return;
        }

        // At most one outstanding calculation per rule.
        if let Some(calc) = self.pending_calcs.get(&id) {
            match self.network.poll_calculation(calc) {
                CalculationPoll::Pending => self.set_status(index, RuleStatus::Ready),
                CalculationPoll::Ready(plan) => {
                    self.pending_calcs.remove(&id);
                    self.submit_plan(index, &plan);
                }
                CalculationPoll::Failed(error) => {
                    self.pending_calcs.remove(&id);
                    tracing::warn!(rule = %name, error = %error, "plan calculation failed");
                    self.set_status(index, RuleStatus::Error);
                }
            }
            return;
        }

        tracing::info!(rule = %name, target = %target, amount = batch_size, "starting plan calculation");
        let calc = self.network.begin_calculation(&target, batch_size);
        self.pending_calcs.insert(id, calc);
        self.set_status(index, RuleStatus::Ready);
    }

    /// Whether any other rule targeting `target` already holds an
    /// unfinished job or a pending calculation.
    fn peer_has_work_in_flight(&self, id: RuleId, target: &ResourceId) -> bool {
        self.rules.iter().any(|other| {
            other.id() != id
                && other.target() == Some(target)
                && (self
                    .active_jobs
                    .get(&other.id())
                    .is_some_and(|job| !self.network.job_is_finished(job))
                    || self.pending_calcs.contains_key(&other.id()))
        })
    }

    /// AND over the rule's conditions against cached amounts, stopping
    /// at the first failure. Conditions without a resource are skipped.
    fn conditions_met(&self, index: usize) -> bool {
        let Some(rule) = self.rules.get(index) else {
            return false;
        };
        for condition in rule.conditions() {
            let Some(resource) = condition.resource() else {
                continue;
            };
            if resource.is_empty() {
                continue;
            }
            let amount = self.network.current_amount(resource);
            if !condition.evaluate(amount) {
                tracing::debug!(
                    resource = %resource,
                    operator = %condition.operator(),
                    threshold = condition.threshold(),
                    amount,
                    "condition not met"
                );
                return false;
            }
        }
        true
    }

    /// Submission of a completed plan (the tail of the evaluation
    /// pass). Outcomes are statuses, not errors.
    fn submit_plan(&mut self, index: usize, plan: &CraftingPlan) {
        let Some(rule) = self.rules.get(index) else {
            return;
        };
        let id = rule.id();
        let name = rule.display_name().to_owned();

        if plan.simulated {
            tracing::debug!(rule = %name, "plan is simulation-only, not submitting");
            return;
        }

        if !plan.missing_inputs.is_empty() {
            tracing::debug!(
                rule = %name,
                missing = plan.missing_inputs.len(),
                "plan has unresolved inputs"
            );
            self.set_status(index, RuleStatus::MissingPattern);
            return;
        }

        match self.network.submit_job(plan) {
            Ok(job) => {
                self.active_jobs.insert(id, job);
                self.set_status(index, RuleStatus::Crafting);
                tracing::info!(rule = %name, target = %plan.target, amount = plan.amount, "production job started");
            }
            Err(SubmitError::NoExecutionUnit) => {
                tracing::warn!(rule = %name, "no execution unit available");
                self.set_status(index, RuleStatus::NoCpu);
            }
            Err(error) => {
                tracing::warn!(rule = %name, error = %error, "job submission rejected");
                self.set_status(index, RuleStatus::Error);
            }
        }
    }

    /// Poll every pending calculation, submitting the completed ones.
    /// Calculations whose rule has been removed or disabled in the
    /// meantime are dropped on the floor.
    fn poll_pending_calculations(&mut self) {
        let ids: Vec<RuleId> = self.pending_calcs.keys().copied().collect();
        for id in ids {
            let poll = match self.pending_calcs.get(&id) {
                Some(calc) => self.network.poll_calculation(calc),
                None => continue,
            };
            match poll {
                CalculationPoll::Pending => {}
                CalculationPoll::Ready(plan) => {
                    self.pending_calcs.remove(&id);
                    let Some(index) = self.rules.position(id) else {
                        continue;
                    };
                    if self.rules.get(index).is_some_and(Rule::is_enabled) {
                        self.submit_plan(index, &plan);
                    }
                }
                CalculationPoll::Failed(error) => {
                    self.pending_calcs.remove(&id);
                    let Some(index) = self.rules.position(id) else {
                        continue;
                    };
                    tracing::warn!(rule = %id, error = %error, "plan calculation failed");
                    self.set_status(index, RuleStatus::Error);
                }
            }
        }
    }

    // ---- Derived state --------------------------------------------

    /// Re-subscribe from scratch: every enabled rule's target and
    /// condition resources, set-deduplicated. Notification volume
    /// stays proportional to rule configuration, not inventory size.
    fn rebuild_watches(&mut self) {
        self.network.clear_watches();
        self.watched.clear();

        for rule in self.rules.iter() {
            if !rule.is_enabled() {
                continue;
            }
            let resources = rule
                .target()
                .into_iter()
                .chain(rule.conditions().iter().filter_map(Condition::resource));
            for resource in resources {
                if resource.is_empty() {
                    continue;
                }
                if self.watched.insert(resource.clone()) {
                    self.network.watch(resource);
                }
            }
        }

        tracing::debug!(count = self.watched.len(), "rebuilt watch subscriptions");
    }

    fn refresh_device_status(&mut self) {
        self.device_status = DeviceStatus::aggregate(
            self.network_ready,
            self.rules
                .iter()
                .filter(|rule| rule.is_enabled())
                .map(Rule::status),
        );
    }

    fn set_status(&mut self, index: usize, status: RuleStatus) {
        if let Some(rule) = self.rules.get_mut(index) {
            if rule.status() != status {
                tracing::debug!(
                    rule = %rule.display_name(),
                    from = rule.status().as_str(),
                    to = status.as_str(),
                    "rule status changed"
                );
                rule.set_status(status);
            }
        }
    }
}

/// Whether a rule's target or any of its conditions reference the
/// resource.
fn references(rule: &Rule, resource: &ResourceId) -> bool {
    rule.target() == Some(resource)
        || rule
            .conditions()
            .iter()
            .any(|condition| condition.resource() == Some(resource))
}

#[cfg(test)]
#[path = "requester_tests.rs"]
mod tests;
