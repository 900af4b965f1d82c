// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! restock-core: data model for the restock orchestrator
//!
//! This crate provides:
//! - Comparison operators and threshold conditions
//! - Crafting rules and their per-rule status
//! - The ordered rule collection with capacity limits
//! - Engine configuration

pub mod condition;
pub mod config;
pub mod operator;
pub mod resource;
pub mod rule;
pub mod ruleset;
pub mod status;

// Re-exports
pub use condition::Condition;
pub use config::{ConfigError, EngineConfig, Limit};
pub use operator::ComparisonOperator;
pub use resource::ResourceId;
pub use rule::{Rule, RuleId};
pub use ruleset::RuleSet;
pub use status::{DeviceStatus, RuleStatus};
