//! Filing-rule validator trait and registry.
//!
//! The [`FilingRuleValidator`] trait is the seam between the scenario
//! pipeline and a validation strategy. Each validator is registered in a
//! [`ValidatorRegistry`] under its exact filing-rule name.
//!
//! # Example
//!
//! ```ignore
//! use claims_validate::default_registry;
//!
//! let validator = default_registry().get("UseGcodeAdminCPT")?;
//! let violations = validator.evaluate(&record);
//! ```

use std::collections::HashMap;
use std::sync::OnceLock;

use claims_model::{ClaimsError, ComparisonRecord, FilingRule, NO_FILING_RULE, Result, Violation};
use tracing::debug;

use crate::assertion::{Check, evaluate_checks};
use crate::strategy::Strategy;

/// Validates a comparison record under one filing rule.
pub trait FilingRuleValidator: Send + Sync {
    /// Filing-rule name this validator is registered under.
    fn rule_name(&self) -> &'static str;

    /// Name of the strategy the validator applies.
    fn strategy_name(&self) -> &'static str;

    fn description(&self) -> &'static str {
        "Filing rule validator"
    }

    /// Run every assertion and return all failures, in check order.
    fn evaluate(&self, record: &ComparisonRecord) -> Vec<Violation>;
}

/// A validator backed by a [`Strategy`] whose check list is built once.
pub struct StrategyValidator {
    rule_name: &'static str,
    strategy: Strategy,
    checks: Vec<Check>,
}

impl StrategyValidator {
    pub fn new(rule_name: &'static str, strategy: Strategy) -> Self {
        Self {
            rule_name,
            strategy,
            checks: strategy.checks(),
        }
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }
}

impl FilingRuleValidator for StrategyValidator {
    fn rule_name(&self) -> &'static str {
        self.rule_name
    }

    fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    fn description(&self) -> &'static str {
        self.strategy.description()
    }

    fn evaluate(&self, record: &ComparisonRecord) -> Vec<Violation> {
        let violations = evaluate_checks(&self.checks, record);
        debug!(
            filing_rule = self.rule_name,
            claim_id = record.claim_id(),
            checks = self.checks.len(),
            violations = violations.len(),
            "claim evaluated"
        );
        violations
    }
}

/// Registry of validators indexed by exact filing-rule name.
///
/// A lookup miss is a configuration error, not a fallback to the
/// standard strategy.
#[derive(Default)]
pub struct ValidatorRegistry {
    validators: HashMap<&'static str, Box<dyn FilingRuleValidator>>,
}

impl ValidatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a validator under its rule name, replacing any previous one.
    pub fn register(&mut self, validator: Box<dyn FilingRuleValidator>) {
        self.validators.insert(validator.rule_name(), validator);
    }

    pub fn get(&self, name: &str) -> Result<&dyn FilingRuleValidator> {
        self.validators
            .get(name)
            .map(|validator| validator.as_ref())
            .ok_or_else(|| ClaimsError::UnknownFilingRule {
                name: name.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Registered validators sorted by rule name.
    pub fn validators(&self) -> Vec<&dyn FilingRuleValidator> {
        let mut validators: Vec<&dyn FilingRuleValidator> =
            self.validators.values().map(|validator| validator.as_ref()).collect();
        validators.sort_by_key(|validator| validator.rule_name());
        validators
    }
}

static DEFAULT_REGISTRY: OnceLock<ValidatorRegistry> = OnceLock::new();

/// Returns the registry with every known filing rule plus the `None` run.
///
/// Built on first access and cached.
pub fn default_registry() -> &'static ValidatorRegistry {
    DEFAULT_REGISTRY.get_or_init(build_default_registry)
}

fn build_default_registry() -> ValidatorRegistry {
    let mut registry = ValidatorRegistry::new();
    registry.register(Box::new(StrategyValidator::new(
        NO_FILING_RULE,
        Strategy::Standard,
    )));
    for rule in FilingRule::ALL {
        registry.register(Box::new(StrategyValidator::new(
            rule.name(),
            Strategy::for_rule(rule),
        )));
    }
    registry
}
