//! Validation strategies over comparison records, the filing-rule validator
//! registry, and the billable-claim gate.

pub mod assertion;
pub mod billable;
pub mod fields;
mod registry;
mod strategy;

pub use assertion::{Check, Comparison, FieldAssertion, LineAssertion, evaluate_checks};
pub use billable::check_billable;
pub use registry::{FilingRuleValidator, StrategyValidator, ValidatorRegistry, default_registry};
pub use strategy::Strategy;
