// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ordered rule collection
//!
//! Rules keep their insertion order (order is priority for display and
//! evaluation) and are unique by id. Capacity violations refuse the
//! mutation instead of failing: callers check `is_full` before offering
//! the operation to the user.

use crate::config::Limit;
use crate::rule::{Rule, RuleId};

/// An ordered collection of rules with a configurable capacity.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
    capacity: Limit,
}

impl RuleSet {
    pub fn new(capacity: Limit) -> Self {
        Self {
            rules: Vec::new(),
            capacity,
        }
    }

    pub fn capacity(&self) -> Limit {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn is_full(&self) -> bool {
        !self.capacity.allows(self.rules.len())
    }

    pub fn get(&self, index: usize) -> Option<&Rule> {
        self.rules.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Rule> {
        self.rules.get_mut(index)
    }

    pub fn get_by_id(&self, id: RuleId) -> Option<&Rule> {
        self.rules.iter().find(|r| r.id() == id)
    }

    pub fn get_by_id_mut(&mut self, id: RuleId) -> Option<&mut Rule> {
        self.rules.iter_mut().find(|r| r.id() == id)
    }

    pub fn position(&self, id: RuleId) -> Option<usize> {
        self.rules.iter().position(|r| r.id() == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Rule> {
        self.rules.iter_mut()
    }

    /// Append a rule. Refused when at capacity or when the id is
    /// already present.
    pub fn add(&mut self, rule: Rule) -> bool {
        if self.is_full() || self.get_by_id(rule.id()).is_some() {
            return false;
        }
        self.rules.push(rule);
        true
    }

    pub fn remove_by_id(&mut self, id: RuleId) -> bool {
        match self.position(id) {
            Some(index) => {
                self.rules.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn remove_at(&mut self, index: usize) -> bool {
        if index < self.rules.len() {
            self.rules.remove(index);
            true
        } else {
            false
        }
    }

    /// Replace the rule with the same id. The committed object fully
    /// supersedes the stored one (explicit value semantics; editing
    /// never aliases the stored rule).
    pub fn update(&mut self, rule: Rule) -> bool {
        match self.position(rule.id()) {
            Some(index) => {
                self.rules[index] = rule;
                true
            }
            None => false,
        }
    }

    pub fn move_up(&mut self, index: usize) -> bool {
        if index > 0 && index < self.rules.len() {
            self.rules.swap(index, index - 1);
            true
        } else {
            false
        }
    }

    pub fn move_down(&mut self, index: usize) -> bool {
        if index + 1 < self.rules.len() {
            self.rules.swap(index, index + 1);
            true
        } else {
            false
        }
    }

    /// Insert a duplicate of the rule at `index` directly after it.
    /// Refused at capacity. Returns the new rule's id.
    pub fn duplicate_at(&mut self, index: usize) -> Option<RuleId> {
        if self.is_full() || index >= self.rules.len() {
            return None;
        }
        let copy = self.rules[index].duplicate();
        let id = copy.id();
        self.rules.insert(index + 1, copy);
        Some(id)
    }

    /// Replace the whole collection from an external sync source,
    /// truncated to capacity.
    pub fn replace_all(&mut self, rules: Vec<Rule>) {
        self.rules.clear();
        for rule in rules {
            if !self.capacity.allows(self.rules.len()) {
                break;
            }
            self.rules.push(rule);
        }
    }

    /// The rules as a plain list, for persistence and sync.
    pub fn as_slice(&self) -> &[Rule] {
        &self.rules
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

#[cfg(test)]
#[path = "ruleset_tests.rs"]
mod tests;
