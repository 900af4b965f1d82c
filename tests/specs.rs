//! Behavioral specifications for the restock engine.
//!
//! These tests are black-box: they drive the published crate APIs end
//! to end — configure rules, script the fake network, and verify the
//! engine's observable state and what lands on disk.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

#[path = "specs/prelude.rs"]
mod prelude;

// engine/
#[path = "specs/engine/crafting.rs"]
mod engine_crafting;
#[path = "specs/engine/lifecycle.rs"]
mod engine_lifecycle;

// storage/
#[path = "specs/storage/persistence.rs"]
mod storage_persistence;
