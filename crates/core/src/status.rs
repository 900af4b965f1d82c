// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-rule and aggregate device status

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Status of a single rule, rewritten by every evaluation pass.
///
/// These are steady, user-visible states rather than errors: a rule
/// sits in `MissingPattern` or `NoCpu` until the underlying cause
/// clears and the next pass moves it on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RuleStatus {
    /// Rule disabled or not yet evaluated
    #[default]
    Idle,
    /// Conditions met, production plan being calculated
    Ready,
    /// A production job is in flight
    Crafting,
    /// One or more conditions evaluate false
    ConditionsNotMet,
    /// Target cannot be produced (no recipe known to the network)
    MissingPattern,
    /// Job submission rejected: no execution unit available
    NoCpu,
    /// Network unavailable or calculation fault
    Error,
}

impl RuleStatus {
    /// Canonical name used in persisted documents. Names, not
    /// ordinals, so reordering this enum never corrupts saves.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "IDLE",
            Self::Ready => "READY",
            Self::Crafting => "CRAFTING",
            Self::ConditionsNotMet => "CONDITIONS_NOT_MET",
            Self::MissingPattern => "MISSING_PATTERN",
            Self::NoCpu => "NO_CPU",
            Self::Error => "ERROR",
        }
    }

    /// Look up a status by canonical name; unknown names recover as `Idle`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "READY" => Self::Ready,
            "CRAFTING" => Self::Crafting,
            "CONDITIONS_NOT_MET" => Self::ConditionsNotMet,
            "MISSING_PATTERN" => Self::MissingPattern,
            "NO_CPU" => Self::NoCpu,
            "ERROR" => Self::Error,
            _ => Self::Idle,
        }
    }

    /// Work is in flight or about to be.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Ready | Self::Crafting)
    }

    /// Demand is currently unsatisfiable but not fatal.
    pub fn is_warning(self) -> bool {
        matches!(self, Self::MissingPattern)
    }

    /// Something is wrong beyond the rule's configuration.
    pub fn is_fault(self) -> bool {
        matches!(self, Self::NoCpu | Self::Error)
    }
}

impl Serialize for RuleStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RuleStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from_name(&name))
    }
}

/// Aggregate status of the whole device, rolled up from the statuses
/// of all enabled rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeviceStatus {
    /// Not connected to the resource network
    #[default]
    Off,
    /// Connected, nothing to do
    Idle,
    /// At least one rule is calculating or crafting
    Active,
    /// At least one rule cannot be satisfied (missing pattern)
    Warning,
    /// At least one rule is faulted (no CPU, error)
    Error,
}

impl DeviceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Idle => "idle",
            Self::Active => "active",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "idle" => Self::Idle,
            "active" => Self::Active,
            "warning" => Self::Warning,
            "error" => Self::Error,
            _ => Self::Off,
        }
    }

    /// Roll enabled rules' statuses into one device status.
    ///
    /// Priority order: any fault wins, then any warning, then any
    /// active rule; otherwise idle. An empty iterator (no enabled
    /// rules) is idle. A disconnected network is `Off` regardless.
    pub fn aggregate<I>(ready: bool, statuses: I) -> Self
    where
        I: IntoIterator<Item = RuleStatus>,
    {
        if !ready {
            return Self::Off;
        }

        let mut fault = false;
        let mut warning = false;
        let mut active = false;
        for status in statuses {
            fault |= status.is_fault();
            warning |= status.is_warning();
            active |= status.is_active();
        }

        if fault {
            Self::Error
        } else if warning {
            Self::Warning
        } else if active {
            Self::Active
        } else {
            Self::Idle
        }
    }
}

impl std::fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
