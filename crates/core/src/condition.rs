// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Threshold conditions gating crafting rules

use crate::operator::ComparisonOperator;
use crate::resource::ResourceId;
use serde::{Deserialize, Deserializer, Serialize};

/// Threshold for a freshly created condition.
const DEFAULT_THRESHOLD: i64 = 1000;

/// A single gating condition: compares a resource's tracked amount
/// against a threshold.
///
/// Conditions are owned by their rule and copied verbatim when the rule
/// is duplicated; `Clone` is the copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    resource: Option<ResourceId>,
    operator: ComparisonOperator,
    #[serde(deserialize_with = "clamped_threshold")]
    threshold: i64,
}

impl Default for Condition {
    fn default() -> Self {
        Self {
            resource: None,
            operator: ComparisonOperator::LessThan,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl Condition {
    pub fn new(
        resource: impl Into<ResourceId>,
        operator: ComparisonOperator,
        threshold: i64,
    ) -> Self {
        let mut condition = Self {
            resource: Some(resource.into()),
            operator,
            threshold: 0,
        };
        condition.set_threshold(threshold);
        condition
    }

    pub fn resource(&self) -> Option<&ResourceId> {
        self.resource.as_ref()
    }

    pub fn set_resource(&mut self, resource: Option<ResourceId>) {
        self.resource = resource;
    }

    pub fn operator(&self) -> ComparisonOperator {
        self.operator
    }

    pub fn set_operator(&mut self, operator: ComparisonOperator) {
        self.operator = operator;
    }

    pub fn threshold(&self) -> i64 {
        self.threshold
    }

    /// Set the threshold, clamped to be non-negative.
    pub fn set_threshold(&mut self, threshold: i64) {
        self.threshold = threshold.max(0);
    }

    /// A condition is valid once it names a resource.
    pub fn is_valid(&self) -> bool {
        self.resource.as_ref().is_some_and(|r| !r.is_empty())
    }

    /// Evaluate against the resource's current amount.
    pub fn evaluate(&self, count: i64) -> bool {
        self.operator.evaluate(count, self.threshold)
    }
}

// Negative thresholds persisted by older versions are repaired on load.
fn clamped_threshold<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    Ok(i64::deserialize(deserializer)?.max(0))
}

#[cfg(test)]
#[path = "condition_tests.rs"]
mod tests;
