// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSON file-based rule persistence
//!
//! One device, one document: the full rule list plus the last observed
//! connectivity, written as pretty-printed JSON. Unknown operator and
//! status names in old documents are repaired on load by the data
//! model's deserializers, so a load only fails on real corruption.

use restock_core::Rule;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("not found: {path}")]
    NotFound { path: PathBuf },
}

/// Everything persisted for one device.
///
/// `network_ready` is a hint for observers rendering state before the
/// first connectivity report arrives; evaluation never reads it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleDocument {
    pub rules: Vec<Rule>,
    pub network_ready: bool,
}

/// JSON file-based rule storage.
#[derive(Debug, Clone)]
pub struct RuleStore {
    path: PathBuf,
}

impl RuleStore {
    const FILE_NAME: &'static str = "rules.json";

    /// Open a store under the given directory, creating it if needed.
    pub fn open(base_path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let base_path = base_path.into();
        fs::create_dir_all(&base_path)?;
        Ok(Self {
            path: base_path.join(Self::FILE_NAME),
        })
    }

    /// Open a temporary store for testing.
    pub fn open_temp() -> Result<Self, StorageError> {
        let temp_dir = std::env::temp_dir().join(format!("restock-test-{}", uuid::Uuid::new_v4()));
        Self::open(temp_dir)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the document, replacing whatever was stored.
    pub fn save(&self, document: &RuleDocument) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(document)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Load the stored document.
    pub fn load(&self) -> Result<RuleDocument, StorageError> {
        if !self.path.exists() {
            return Err(StorageError::NotFound {
                path: self.path.clone(),
            });
        }
        let json = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Load the stored document, or an empty one on first run.
    pub fn load_or_default(&self) -> Result<RuleDocument, StorageError> {
        match self.load() {
            Ok(document) => Ok(document),
            Err(StorageError::NotFound { .. }) => Ok(RuleDocument::default()),
            Err(error) => Err(error),
        }
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Delete the stored document. Deleting a missing document is fine.
    pub fn delete(&self) -> Result<(), StorageError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    /// Convenience for hosts that track connectivity separately.
    pub fn save_rules(&self, rules: &[Rule], network_ready: bool) -> Result<(), StorageError> {
        self.save(&RuleDocument {
            rules: rules.to_vec(),
            network_ready,
        })
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
