// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Comparison operators for threshold conditions

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Six-way integer comparison applied by rule conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ComparisonOperator {
    #[default]
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    Equal,
    NotEqual,
}

impl ComparisonOperator {
    /// All operators, in display order.
    pub const ALL: [ComparisonOperator; 6] = [
        ComparisonOperator::LessThan,
        ComparisonOperator::LessThanOrEqual,
        ComparisonOperator::GreaterThan,
        ComparisonOperator::GreaterThanOrEqual,
        ComparisonOperator::Equal,
        ComparisonOperator::NotEqual,
    ];

    /// Apply the comparison: `count <op> threshold`.
    pub fn evaluate(self, count: i64, threshold: i64) -> bool {
        match self {
            Self::LessThan => count < threshold,
            Self::LessThanOrEqual => count <= threshold,
            Self::GreaterThan => count > threshold,
            Self::GreaterThanOrEqual => count >= threshold,
            Self::Equal => count == threshold,
            Self::NotEqual => count != threshold,
        }
    }

    /// Short symbol for display.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
            Self::Equal => "=",
            Self::NotEqual => "!=",
        }
    }

    /// Canonical name used in persisted documents.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LessThan => "LESS_THAN",
            Self::LessThanOrEqual => "LESS_THAN_OR_EQUAL",
            Self::GreaterThan => "GREATER_THAN",
            Self::GreaterThanOrEqual => "GREATER_THAN_OR_EQUAL",
            Self::Equal => "EQUAL",
            Self::NotEqual => "NOT_EQUAL",
        }
    }

    /// Look up an operator by canonical name.
    ///
    /// Unknown names fall back to `LessThan` so a document written by a
    /// newer version still loads.
    pub fn from_name(name: &str) -> Self {
        match name {
            "LESS_THAN" => Self::LessThan,
            "LESS_THAN_OR_EQUAL" => Self::LessThanOrEqual,
            "GREATER_THAN" => Self::GreaterThan,
            "GREATER_THAN_OR_EQUAL" => Self::GreaterThanOrEqual,
            "EQUAL" => Self::Equal,
            "NOT_EQUAL" => Self::NotEqual,
            _ => Self::LessThan,
        }
    }

    /// The next operator in display order, wrapping at the end.
    ///
    /// Editing surfaces use this to step through operators in place.
    pub fn next(self) -> Self {
        match self {
            Self::LessThan => Self::LessThanOrEqual,
            Self::LessThanOrEqual => Self::GreaterThan,
            Self::GreaterThan => Self::GreaterThanOrEqual,
            Self::GreaterThanOrEqual => Self::Equal,
            Self::Equal => Self::NotEqual,
            Self::NotEqual => Self::LessThan,
        }
    }
}

impl std::fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl Serialize for ComparisonOperator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ComparisonOperator {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from_name(&name))
    }
}

#[cfg(test)]
#[path = "operator_tests.rs"]
mod tests;
