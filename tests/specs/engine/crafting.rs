//! End-to-end crafting cycles: condition trips, plan calculation, job
//! submission, completion, and the next batch.

use crate::prelude::*;
use restock_core::{ComparisonOperator, DeviceStatus, RuleStatus};

fn status(requester: &restock_engine::Requester<restock_engine::FakeNetwork>, i: usize) -> RuleStatus {
    requester.rules().get(i).map(|r| r.status()).unwrap()
}

#[test]
fn a_stock_level_drop_produces_one_batch_and_then_the_next() {
    let (net, mut requester) = connected();
    net.set_producible("gear", true);
    net.set_amount("gear", 500);
    requester.add_rule(gated_rule("gear", "gear", ComparisonOperator::LessThan, 100));
    assert_eq!(status(&requester, 0), RuleStatus::ConditionsNotMet);

    // Stock drops below the threshold.
    net.set_amount("gear", 40);
    requester.on_inventory_changed(&"gear".into(), 40);
    assert_eq!(status(&requester, 0), RuleStatus::Ready);

    // The tick polls the calculation and submits the job.
    requester.on_tick();
    assert_eq!(status(&requester, 0), RuleStatus::Crafting);
    assert_eq!(net.jobs_submitted(), 1);
    assert_eq!(requester.device_status(), DeviceStatus::Active);

    // The job finishes while stock is still low, so a second batch
    // starts immediately.
    let job = *requester.requested_jobs().next().unwrap();
    net.finish_job(&job);
    requester.on_job_state_changed(&job);
    assert_eq!(status(&requester, 0), RuleStatus::Ready);

    // Stock recovers; the cycle goes quiet.
    requester.on_tick();
    let job = *requester.requested_jobs().next().unwrap();
    net.set_amount("gear", 500);
    net.finish_job(&job);
    requester.on_job_state_changed(&job);
    assert_eq!(status(&requester, 0), RuleStatus::ConditionsNotMet);
    assert_eq!(requester.device_status(), DeviceStatus::Idle);
}

#[test]
fn two_rules_for_one_target_never_double_request() {
    let (net, mut requester) = connected();
    net.set_producible("plate", true);
    net.hold_calculations();
    requester.add_rule(rule("plate"));
    requester.add_rule(rule("plate"));

    // Only the first rule starts a calculation; the second defers.
    assert_eq!(net.calculations_started(), 1);

    net.release_calculations();
    requester.on_tick();
    assert_eq!(net.jobs_submitted(), 1);
    assert_eq!(status(&requester, 0), RuleStatus::Crafting);
    assert_eq!(status(&requester, 1), RuleStatus::Crafting);

    // Once the job completes, exactly one rule starts the next batch.
    let job = *requester.requested_jobs().next().unwrap();
    net.finish_job(&job);
    requester.on_job_state_changed(&job);
    requester.on_tick();
    assert_eq!(net.jobs_submitted(), 2);
}

#[test]
fn submission_failures_surface_as_rule_statuses() {
    let (net, mut requester) = connected();
    net.set_producible("gear", true);
    net.reject_submissions(restock_engine::SubmitError::NoExecutionUnit);
    requester.add_rule(rule("gear"));
    requester.on_tick();

    assert_eq!(status(&requester, 0), RuleStatus::NoCpu);
    assert_eq!(requester.device_status(), DeviceStatus::Error);
}

#[test]
fn editing_a_rule_takes_effect_on_commit() {
    let (net, mut requester) = connected();
    net.set_producible("gear", true);
    net.set_amount("iron", 50);
    requester.add_rule(gated_rule("gear", "iron", ComparisonOperator::LessThan, 100));
    assert_eq!(status(&requester, 0), RuleStatus::Ready);

    // Editing copy: tighten the threshold so the condition fails, then
    // commit. The engine re-evaluates on commit, not on edit.
    let mut edited = requester.rules().get(0).cloned().unwrap();
    let mut condition = edited.conditions()[0].clone();
    condition.set_threshold(10);
    edited.remove_condition(0);
    edited.add_condition(condition, restock_core::Limit::Unlimited);
    assert_eq!(status(&requester, 0), RuleStatus::Ready);

    assert!(requester.update_rule(edited));
    assert_eq!(status(&requester, 0), RuleStatus::ConditionsNotMet);
}
