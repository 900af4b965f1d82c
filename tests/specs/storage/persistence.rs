//! Rules survive a device restart: save, reload, resume evaluation.

use crate::prelude::*;
use restock_core::{ComparisonOperator, RuleStatus};
use restock_storage::RuleStore;

#[test]
fn a_restart_restores_rules_and_resumes_evaluation() {
    let dir = tempfile::tempdir().unwrap();
    let store = RuleStore::open(dir.path()).unwrap();

    // First life: configure and run until a job is in flight.
    let (net, mut requester) = connected();
    net.set_producible("gear", true);
    let mut named = gated_rule("gear", "iron", ComparisonOperator::LessThan, 100);
    named.set_name("Gears");
    requester.add_rule(named);
    requester.on_tick();
    assert_eq!(
        requester.rules().get(0).map(|r| r.status()),
        Some(RuleStatus::Crafting)
    );

    store
        .save_rules(requester.rules().as_slice(), requester.is_network_ready())
        .unwrap();

    // Second life: a fresh engine over the same network state.
    let document = store.load().unwrap();
    assert!(document.network_ready);
    let (net, mut revived) = connected();
    net.set_producible("gear", true);
    revived.replace_rules(document.rules);

    let rule = revived.rules().get(0).unwrap();
    assert_eq!(rule.name(), "Gears");
    assert!(rule.is_enabled());
    // The persisted Crafting status is only a snapshot; evaluation
    // recomputes it against the new network, where no job exists.
    assert_eq!(rule.status(), RuleStatus::Ready);
    assert_eq!(net.calculations_started(), 1);
}

#[test]
fn rule_identity_is_stable_across_save_and_load() {
    let store = RuleStore::open_temp().unwrap();
    let (_net, mut requester) = connected();
    requester.add_rule(rule("gear"));
    let id = requester.rules().get(0).map(|r| r.id()).unwrap();

    store.save_rules(requester.rules().as_slice(), true).unwrap();
    let document = store.load().unwrap();
    assert_eq!(document.rules[0].id(), id);
}

#[test]
fn an_empty_document_boots_an_empty_engine() {
    let store = RuleStore::open_temp().unwrap();
    let document = store.load_or_default().unwrap();

    let (_net, mut requester) = connected();
    requester.replace_rules(document.rules);
    assert!(requester.rules().is_empty());
    assert_eq!(
        requester.device_status(),
        restock_core::DeviceStatus::Idle
    );
}

#[test]
fn duplicated_rules_persist_with_their_copy_semantics() {
    let store = RuleStore::open_temp().unwrap();
    let (net, mut requester) = connected();
    net.set_producible("gear", true);
    let mut named = rule("gear");
    named.set_name("Gears");
    requester.add_rule(named);
    let copy_id = requester.duplicate_rule(0).unwrap();

    store.save_rules(requester.rules().as_slice(), true).unwrap();
    let document = store.load().unwrap();

    let copy = document
        .rules
        .iter()
        .find(|r| r.id() == copy_id)
        .unwrap();
    assert_eq!(copy.name(), "Gears (Copy)");
    assert!(!copy.is_enabled());
    assert_eq!(copy.status(), RuleStatus::Idle);
}
