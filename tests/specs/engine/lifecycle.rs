//! Connectivity lifecycle: link up, link down, channel gating, and the
//! device-level status lamp.

use crate::prelude::*;
use restock_core::{ComparisonOperator, DeviceStatus, EngineConfig, RuleStatus};
use restock_engine::{FakeNetwork, Requester};

#[test]
fn the_device_lamp_follows_the_worst_enabled_rule() {
    let (net, mut requester) = connected();
    assert_eq!(requester.device_status(), DeviceStatus::Idle);

    // A quiet rule keeps the lamp idle.
    net.set_producible("gear", true);
    net.set_amount("iron", 500);
    requester.add_rule(gated_rule("gear", "iron", ComparisonOperator::LessThan, 100));
    assert_eq!(requester.device_status(), DeviceStatus::Idle);

    // A rule with no pattern raises a warning even while another is
    // actively crafting.
    net.set_amount("iron", 0);
    requester.on_inventory_changed(&"iron".into(), 0);
    requester.on_tick();
    assert_eq!(requester.device_status(), DeviceStatus::Active);

    requester.add_rule(rule("unknown_alloy"));
    assert_eq!(requester.device_status(), DeviceStatus::Warning);
}

#[test]
fn losing_the_link_marks_rules_and_reconnecting_recovers_them() {
    let (net, mut requester) = connected();
    net.set_producible("gear", true);
    requester.add_rule(rule("gear"));
    requester.on_tick();
    assert_eq!(
        requester.rules().get(0).map(|r| r.status()),
        Some(RuleStatus::Crafting)
    );

    requester.on_connectivity_changed(false);
    assert_eq!(
        requester.rules().get(0).map(|r| r.status()),
        Some(RuleStatus::Error)
    );
    assert_eq!(requester.device_status(), DeviceStatus::Off);

    // Ticks while dark must not touch the network.
    let calcs_before = net.calculations_started();
    requester.on_tick();
    assert_eq!(net.calculations_started(), calcs_before);

    requester.on_connectivity_changed(true);
    assert_eq!(
        requester.rules().get(0).map(|r| r.status()),
        Some(RuleStatus::Crafting)
    );
}

#[test]
fn a_device_without_a_channel_stays_dark_until_one_appears() {
    let net = FakeNetwork::new();
    net.set_channel(false);
    net.set_producible("gear", true);
    let mut requester = Requester::new(net.clone(), eager_config());
    requester.add_rule(rule("gear"));

    requester.on_connectivity_changed(true);
    assert!(!requester.is_network_ready());
    assert_eq!(requester.device_status(), DeviceStatus::Off);

    net.set_channel(true);
    requester.on_connectivity_changed(true);
    assert!(requester.is_network_ready());
    assert_eq!(
        requester.rules().get(0).map(|r| r.status()),
        Some(RuleStatus::Ready)
    );
}

#[test]
fn channel_gating_can_be_configured_away() {
    let net = FakeNetwork::new();
    net.set_channel(false);
    let mut requester = Requester::new(
        net,
        EngineConfig {
            require_channel: false,
            ..eager_config()
        },
    );
    requester.on_connectivity_changed(true);
    assert!(requester.is_network_ready());
}

#[test]
fn watch_subscriptions_track_the_enabled_rule_set() {
    let (net, mut requester) = connected();
    requester.add_rule(gated_rule("gear", "iron", ComparisonOperator::LessThan, 100));
    assert_eq!(net.watches().len(), 2);

    let id = requester.rules().get(0).map(|r| r.id()).unwrap();
    requester.remove_rule(id);
    assert!(net.watches().is_empty());
}
