// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Single-consumer event loop around a [`Requester`]
//!
//! The requester itself is synchronous and must never be entered from
//! two places at once. Multi-threaded hosts send [`NetworkEvent`]s into
//! an mpsc channel; this loop is the only consumer, interleaving them
//! with the periodic tick so every entry point runs serialized.

use crate::network::ResourceNetwork;
use crate::requester::Requester;
use restock_core::{ResourceId, Rule};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

/// Host-side notification delivered to the requester.
#[derive(Debug)]
pub enum NetworkEvent<J> {
    /// The network link came up or went down.
    ConnectivityChanged { ready: bool },
    /// A watched resource's tracked amount changed.
    InventoryChanged { resource: ResourceId, amount: i64 },
    /// A submitted job finished or was canceled.
    JobStateChanged { job: J },
    /// An external sync source replaced the whole rule list.
    RulesReplaced { rules: Vec<Rule> },
}

/// Event loop owning a requester and its inbound channel.
pub struct Runtime<N: ResourceNetwork> {
    requester: Requester<N>,
    events: mpsc::Receiver<NetworkEvent<N::Job>>,
    tick_period: Duration,
}

impl<N: ResourceNetwork> Runtime<N> {
    pub fn new(
        requester: Requester<N>,
        events: mpsc::Receiver<NetworkEvent<N::Job>>,
        tick_period: Duration,
    ) -> Self {
        Self {
            requester,
            events,
            tick_period,
        }
    }

    /// Run until every sender is dropped, then hand the requester back
    /// for inspection.
    pub async fn run(mut self) -> Requester<N> {
        let mut ticker = tokio::time::interval(self.tick_period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        ticker.reset();

        loop {
            tokio::select! {
                event = self.events.recv() => {
                    match event {
                        Some(event) => self.dispatch(event),
                        None => break,
                    }
                }
                _ = ticker.tick() => {
                    self.requester.on_tick();
                }
            }
        }

        tracing::debug!("event channel closed, stopping");
        self.requester
    }

    fn dispatch(&mut self, event: NetworkEvent<N::Job>) {
        match event {
            NetworkEvent::ConnectivityChanged { ready } => {
                self.requester.on_connectivity_changed(ready);
            }
            NetworkEvent::InventoryChanged { resource, amount } => {
                self.requester.on_inventory_changed(&resource, amount);
            }
            NetworkEvent::JobStateChanged { job } => {
                self.requester.on_job_state_changed(&job);
            }
            NetworkEvent::RulesReplaced { rules } => {
                self.requester.replace_rules(rules);
            }
        }
    }
}

#[cfg(test)]
#[path = "runtime_tests.rs"]
mod tests;
