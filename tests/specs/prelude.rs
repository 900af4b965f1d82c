//! Shared helpers for behavioral specs.

use restock_core::{ComparisonOperator, Condition, EngineConfig, Limit, Rule};
use restock_engine::{FakeNetwork, Requester};

/// Engine config with a one-tick check interval so specs can step the
/// engine with single `on_tick` calls.
pub fn eager_config() -> EngineConfig {
    EngineConfig {
        check_interval: 1,
        ..EngineConfig::default()
    }
}

/// A connected requester over a fresh fake network.
pub fn connected() -> (FakeNetwork, Requester<FakeNetwork>) {
    let net = FakeNetwork::new();
    let mut requester = Requester::new(net.clone(), eager_config());
    requester.on_connectivity_changed(true);
    (net, requester)
}

/// An enabled, unconditional rule for the given target.
pub fn rule(target: &str) -> Rule {
    let mut rule = Rule::new();
    rule.set_target(Some(target.into()));
    rule.set_enabled(true);
    rule
}

/// An enabled rule gated on one threshold condition.
pub fn gated_rule(
    target: &str,
    resource: &str,
    operator: ComparisonOperator,
    threshold: i64,
) -> Rule {
    let mut rule = rule(target);
    rule.add_condition(
        Condition::new(resource, operator, threshold),
        Limit::Unlimited,
    );
    rule
}
