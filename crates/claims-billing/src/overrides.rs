//! Payer filing-rule overrides of the expected administration code.
//!
//! Code overrides run before quantity/charge overrides because the latter are
//! keyed by the possibly rewritten code. Rule names without special handling
//! pass the code and table result through unchanged.

use claims_model::scenario::any_scenario;
use claims_model::{BillingCodeResult, FilingRule, ParsedClaim, Scenario};
use tracing::debug;

use crate::codes;
use crate::rate_table::priced;

/// Age at which Medicare G-codes replace adult admin codes (65 years).
pub const MEDICARE_AGE_MONTHS: i32 = 780;
/// Age at which influenza is billed with a G-code under `UseGcodeAdminCPT` (19 years).
pub const GCODE_INFLUENZA_AGE_MONTHS: i32 = 228;

pub const INFLUENZA: &str = "Influenza";
pub const PNEUMOCOCCAL_ANTIGENS: &[&str] = &["PCV15", "PCV20", "PCV 21", "PPSV23"];
pub const IUD: &str = "IUD";
pub const IMPLANT: &str = "Implant";

fn has_antigen(scenarios: &[Scenario], antigen: &str) -> bool {
    any_scenario(scenarios, |scenario| scenario.antigen == antigen)
}

fn has_pneumococcal(scenarios: &[Scenario]) -> bool {
    any_scenario(scenarios, |scenario| {
        PNEUMOCOCCAL_ANTIGENS.contains(&scenario.antigen.as_str())
    })
}

fn has_vfc_stock(scenarios: &[Scenario]) -> bool {
    any_scenario(scenarios, Scenario::is_vfc_stock)
}

/// Rewrite, blank, or keep the expected administration code under a filing rule.
pub fn override_code(
    filing_rule: &str,
    code: &str,
    claim: &ParsedClaim,
    scenarios: &[Scenario],
) -> String {
    let Some(rule) = FilingRule::from_name(filing_rule) else {
        return code.to_string();
    };
    let overridden = match rule {
        FilingRule::BcbsScComponent | FilingRule::NoAddOnCpt | FilingRule::OverrideAdminCpts => {
            if code == codes::PEDIATRIC_ADD_ON {
                ""
            } else {
                code
            }
        }
        FilingRule::ExcludeAdminCodesForVfcClaims => {
            if has_vfc_stock(scenarios) {
                ""
            } else {
                code
            }
        }
        FilingRule::ExcludeAdultAdminCodes => match code {
            codes::ADULT_PRIMARY
            | codes::ADULT_ADD_ON
            | codes::PREVENTIVE_COUNSELING
            | codes::MEDICARE_INFLUENZA
            | codes::MEDICARE_PNEUMOCOCCAL => "",
            _ => code,
        },
        FilingRule::ExcludePediatricAdminCodes => {
            if has_vfc_stock(scenarios) && code == codes::PEDIATRIC_ADD_ON {
                ""
            } else {
                code
            }
        }
        FilingRule::KaiserPreventGCodes => match code {
            codes::MEDICARE_INFLUENZA | codes::MEDICARE_PNEUMOCOCCAL => codes::ADULT_PRIMARY,
            _ => code,
        },
        FilingRule::LarcNexplanonIudInsertionCode => {
            if has_antigen(scenarios, IUD) {
                codes::IUD_INSERTION
            } else if has_antigen(scenarios, IMPLANT) {
                codes::IMPLANT_INSERTION
            } else {
                code
            }
        }
        FilingRule::MedicareCodingOver65 => {
            let medicare_age = claim.patient_age_in_months() >= MEDICARE_AGE_MONTHS;
            if medicare_age && has_antigen(scenarios, INFLUENZA) {
                codes::MEDICARE_INFLUENZA
            } else if medicare_age && has_pneumococcal(scenarios) {
                codes::MEDICARE_PNEUMOCOCCAL
            } else {
                code
            }
        }
        FilingRule::SwitchVfcPediatricAdminCodesForAdultCodes => {
            let switch = has_vfc_stock(scenarios)
                && any_scenario(scenarios, |scenario| {
                    scenario.pediatric_single_component_billing
                });
            match code {
                codes::PEDIATRIC_PRIMARY if switch => codes::ADULT_PRIMARY,
                codes::PEDIATRIC_ADD_ON if switch => codes::ADULT_ADD_ON,
                _ => code,
            }
        }
        FilingRule::UseAdultAdminCodesForAllVaccines => match code {
            codes::PEDIATRIC_PRIMARY | codes::MEDICARE_INFLUENZA | codes::MEDICARE_PNEUMOCOCCAL => {
                codes::ADULT_PRIMARY
            }
            codes::PEDIATRIC_ADD_ON => codes::ADULT_ADD_ON,
            _ => code,
        },
        FilingRule::UseGcodeAdminCpt => {
            if has_antigen(scenarios, INFLUENZA)
                && claim.patient_age_in_months() >= GCODE_INFLUENZA_AGE_MONTHS
            {
                codes::MEDICARE_INFLUENZA
            } else {
                code
            }
        }
        _ => code,
    };
    if overridden != code {
        debug!(filing_rule, from = code, to = overridden, "admin code overridden");
    }
    overridden.to_string()
}

/// Quantity and charge dictated by a filing rule, if the rule defines one
/// for `code`. When `None`, the rate table result stands.
pub fn override_quantity_and_charge(
    filing_rule: &str,
    code: &str,
    scenarios: &[Scenario],
) -> Option<BillingCodeResult> {
    match FilingRule::from_name(filing_rule)? {
        FilingRule::BcbsKsComponent => {
            if !any_scenario(scenarios, |scenario| scenario.dose_count > 1) {
                return None;
            }
            match code {
                codes::PEDIATRIC_PRIMARY => Some(priced(code, 1, 5600)),
                codes::PEDIATRIC_ADD_ON => {
                    let total_components = scenarios
                        .first()
                        .map(|scenario| i64::from(scenario.total_components))
                        .unwrap_or_default();
                    Some(priced(code, total_components - 1, 3800))
                }
                _ => None,
            }
        }
        _ => None,
    }
}
