// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Crafting rules
//!
//! A rule is a configured demand: craft `batch_size` of `target`
//! whenever every condition holds. Field mutators are plain writers
//! with no side effects beyond clamping; re-evaluation is the engine's
//! job, triggered when a rule is committed back through the engine's
//! rule operations.

use crate::condition::Condition;
use crate::config::Limit;
use crate::resource::ResourceId;
use crate::status::RuleStatus;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique, stable identity of a rule.
///
/// Survives edits (an editing copy keeps the id so commit updates
/// rather than inserts); regenerated only when a rule is duplicated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleId(Uuid);

impl RuleId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RuleId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Batch size for new rules.
const DEFAULT_BATCH_SIZE: u64 = 64;

/// Display name fallback for a rule with neither a name nor a target.
const EMPTY_RULE_NAME: &str = "Empty Rule";

/// A configured production demand, gated by conditions.
///
/// `status` is written only by the engine and read by observers;
/// everything else is edited through the engine's rule operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rule {
    id: RuleId,
    name: String,
    target: Option<ResourceId>,
    batch_size: u64,
    enabled: bool,
    conditions: Vec<Condition>,
    status: RuleStatus,
    /// Persisted but never read by evaluation; reserved for rate
    /// limiting that was never built.
    last_triggered: i64,
}

impl Default for Rule {
    fn default() -> Self {
        Self {
            id: RuleId::new(),
            name: String::new(),
            target: None,
            batch_size: DEFAULT_BATCH_SIZE,
            enabled: false,
            conditions: Vec::new(),
            status: RuleStatus::Idle,
            last_triggered: 0,
        }
    }
}

impl Rule {
    /// Create a blank, disabled rule.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> RuleId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Name for display: the configured name, else the target's label,
    /// else a placeholder.
    pub fn display_name(&self) -> &str {
        if !self.name.is_empty() {
            return &self.name;
        }
        if let Some(target) = &self.target {
            if !target.is_empty() {
                return target.as_str();
            }
        }
        EMPTY_RULE_NAME
    }

    pub fn target(&self) -> Option<&ResourceId> {
        self.target.as_ref()
    }

    pub fn set_target(&mut self, target: Option<ResourceId>) {
        self.target = target;
    }

    pub fn batch_size(&self) -> u64 {
        self.batch_size
    }

    /// Set the batch size, clamped to `[1, max]`.
    pub fn set_batch_size(&mut self, batch_size: u64, max: Limit) {
        self.batch_size = max.clamp(batch_size).max(1);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Append a condition, refusing (no-op) when at capacity.
    pub fn add_condition(&mut self, condition: Condition, max: Limit) -> bool {
        if !max.allows(self.conditions.len()) {
            return false;
        }
        self.conditions.push(condition);
        true
    }

    pub fn remove_condition(&mut self, index: usize) {
        if index < self.conditions.len() {
            self.conditions.remove(index);
        }
    }

    pub fn move_condition_up(&mut self, index: usize) {
        if index > 0 && index < self.conditions.len() {
            self.conditions.swap(index, index - 1);
        }
    }

    pub fn move_condition_down(&mut self, index: usize) {
        if index + 1 < self.conditions.len() {
            self.conditions.swap(index, index + 1);
        }
    }

    pub fn status(&self) -> RuleStatus {
        self.status
    }

    /// Engine-only write; observers read.
    pub fn set_status(&mut self, status: RuleStatus) {
        self.status = status;
    }

    pub fn last_triggered(&self) -> i64 {
        self.last_triggered
    }

    pub fn set_last_triggered(&mut self, last_triggered: i64) {
        self.last_triggered = last_triggered;
    }

    /// A rule is valid once it has a target. A valid rule with zero
    /// conditions triggers unconditionally while enabled.
    pub fn is_valid(&self) -> bool {
        self.target.as_ref().is_some_and(|t| !t.is_empty())
    }

    pub fn has_valid_conditions(&self) -> bool {
        self.conditions.iter().all(Condition::is_valid)
    }

    /// Copy for duplication: fresh id, disabled, status and trigger
    /// time reset, conditions deep-copied.
    ///
    /// An editing copy is plain `Clone` — the id is preserved so an
    /// edit-and-save round trip updates the original in place.
    pub fn duplicate(&self) -> Rule {
        Rule {
            id: RuleId::new(),
            name: if self.name.is_empty() {
                String::new()
            } else {
                format!("{} (Copy)", self.name)
            },
            target: self.target.clone(),
            batch_size: self.batch_size,
            enabled: false,
            conditions: self.conditions.clone(),
            status: RuleStatus::Idle,
            last_triggered: 0,
        }
    }
}

#[cfg(test)]
#[path = "rule_tests.rs"]
mod tests;
