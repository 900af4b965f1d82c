// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine configuration

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// A configurable count limit, either bounded or unlimited.
///
/// In TOML this is a plain integer or the string `"unlimited"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    Unlimited,
    Max(u64),
}

impl Limit {
    /// Whether a collection currently holding `len` entries may grow.
    pub fn allows(self, len: usize) -> bool {
        match self {
            Self::Unlimited => true,
            Self::Max(max) => (len as u64) < max,
        }
    }

    /// Clamp a value to the limit.
    pub fn clamp(self, value: u64) -> u64 {
        match self {
            Self::Unlimited => value,
            Self::Max(max) => value.min(max),
        }
    }
}

impl Serialize for Limit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Unlimited => serializer.serialize_str("unlimited"),
            Self::Max(max) => serializer.serialize_u64(*max),
        }
    }
}

impl<'de> Deserialize<'de> for Limit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Count(u64),
            Word(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Count(n) => Ok(Limit::Max(n)),
            Repr::Word(w) if w == "unlimited" => Ok(Limit::Unlimited),
            Repr::Word(w) => Err(de::Error::custom(format!(
                "expected a count or \"unlimited\", got {w:?}"
            ))),
        }
    }
}

/// Tunables for the requester engine.
///
/// Every field is optional in the TOML source and falls back to the
/// defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Ticks between slow-path evaluation passes (calculation polling
    /// and the fallback full evaluation).
    pub check_interval: u32,
    /// Maximum rules per device.
    pub max_rules: Limit,
    /// Maximum conditions per rule.
    pub max_conditions_per_rule: Limit,
    /// Maximum batch size a rule may request.
    pub max_batch_size: Limit,
    /// Whether a free network channel is required before the engine
    /// treats the network as ready.
    pub require_channel: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            check_interval: 20,
            max_rules: Limit::Max(16),
            max_conditions_per_rule: Limit::Max(8),
            max_batch_size: Limit::Max(10_000),
            require_channel: true,
        }
    }
}

/// Errors from loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl EngineConfig {
    /// Parse from TOML text. Missing keys take their defaults; a check
    /// interval of zero is raised to one so the slow path always runs.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let mut config: EngineConfig = toml::from_str(text)?;
        config.check_interval = config.check_interval.max(1);
        Ok(config)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
