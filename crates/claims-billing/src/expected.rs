//! Expected administration billing triple for one claim.

use claims_model::{BillingCodeResult, ParsedClaim, Result, Scenario};
use tracing::debug;

use crate::overrides::{override_code, override_quantity_and_charge};
use crate::rate_table::compute_base_code;

/// Inputs shared by the code and quantity stages.
#[derive(Debug, Clone, Copy)]
pub struct BillingRequest<'a> {
    pub filing_rule: &'a str,
    pub age_group: &'a str,
    pub administration_pattern: &'a str,
    /// Code the test matrix expects before any filing rule applies.
    pub matrix_code: &'a str,
}

/// Resolve the expected {code, quantity, charge} for `claim`.
///
/// `scenarios` are the rows of the claim under test. The first row supplies
/// the dose count and component total. The filing rule rewrites the code
/// first, the rate table prices the rewritten code, and a rule-defined
/// quantity/charge replaces the table result when present.
pub fn resolve_expected_billing(
    request: &BillingRequest<'_>,
    claim: &ParsedClaim,
    scenarios: &[Scenario],
) -> Result<BillingCodeResult> {
    let (dose_count, total_components) = scenarios
        .first()
        .map(|scenario| (scenario.dose_count, scenario.total_components))
        .unwrap_or_default();

    let code = override_code(request.filing_rule, request.matrix_code, claim, scenarios);
    let base = compute_base_code(
        request.age_group,
        request.administration_pattern,
        &code,
        dose_count,
        total_components,
    )?;

    match override_quantity_and_charge(request.filing_rule, &code, scenarios) {
        Some(overridden) => {
            debug!(
                filing_rule = request.filing_rule,
                code = %code,
                quantity = %overridden.quantity,
                charge = %overridden.charge,
                "quantity and charge overridden"
            );
            Ok(overridden)
        }
        None => Ok(base),
    }
}
