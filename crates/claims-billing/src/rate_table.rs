//! Base quantity and charge for an administration code.
//!
//! | code | quantity | charge |
//! |------|----------|--------|
//! | 90471 | 1 | 56.00 |
//! | 90472 | doses - 1 | 38.00 each |
//! | 90460 | doses | 56.00 each |
//! | 90461 | components - doses | 38.00 each |
//! | G0008, G0009 | 1 | 90.00 |
//! | 90480, 96380, 96381 | 1 | 50.00 |
//! | 58300, 11981 | 1 | 0.00 |
//! | "" | "" | "" |

use claims_model::{BillingCodeResult, ClaimsError, Result};

use crate::codes;

/// How the unit quantity of a per-unit code is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuantityRule {
    /// Every dose after the first.
    DosesAfterFirst,
    /// One unit per dose.
    Doses,
    /// Components not covered by the primary code.
    RemainingComponents,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RateBasis {
    /// One unit at a fixed charge (in cents).
    Flat(i64),
    /// A derived quantity at a unit rate (in cents).
    PerUnit { rate: i64, quantity: QuantityRule },
}

struct RateEntry {
    codes: &'static [&'static str],
    basis: RateBasis,
}

const RATE_TABLE: &[RateEntry] = &[
    RateEntry {
        codes: &[codes::ADULT_PRIMARY],
        basis: RateBasis::Flat(5600),
    },
    RateEntry {
        codes: &[codes::ADULT_ADD_ON],
        basis: RateBasis::PerUnit {
            rate: 3800,
            quantity: QuantityRule::DosesAfterFirst,
        },
    },
    RateEntry {
        codes: &[codes::PEDIATRIC_PRIMARY],
        basis: RateBasis::PerUnit {
            rate: 5600,
            quantity: QuantityRule::Doses,
        },
    },
    RateEntry {
        codes: &[codes::PEDIATRIC_ADD_ON],
        basis: RateBasis::PerUnit {
            rate: 3800,
            quantity: QuantityRule::RemainingComponents,
        },
    },
    RateEntry {
        codes: &[codes::MEDICARE_INFLUENZA, codes::MEDICARE_PNEUMOCOCCAL],
        basis: RateBasis::Flat(9000),
    },
    RateEntry {
        codes: &[
            codes::PRIVATE_COVID,
            codes::INJECTION_PRIMARY,
            codes::INJECTION_ADD_ON,
        ],
        basis: RateBasis::Flat(5000),
    },
    RateEntry {
        codes: &[codes::IUD_INSERTION, codes::IMPLANT_INSERTION],
        basis: RateBasis::Flat(0),
    },
];

/// Compute the table quantity and charge for `expected_code`.
///
/// An empty code yields an empty result. A code without a table entry fails
/// with [`ClaimsError::UnsupportedScenario`]: the table is incomplete for the
/// scenario, which is not the same thing as a claim mismatch.
pub fn compute_base_code(
    age_group: &str,
    administration_pattern: &str,
    expected_code: &str,
    dose_quantity: u32,
    total_components: u32,
) -> Result<BillingCodeResult> {
    if expected_code.is_empty() {
        return Ok(BillingCodeResult::empty());
    }
    let entry = RATE_TABLE
        .iter()
        .find(|entry| entry.codes.contains(&expected_code))
        .ok_or_else(|| ClaimsError::UnsupportedScenario {
            code: expected_code.to_string(),
            age_group: age_group.to_string(),
            administration_pattern: administration_pattern.to_string(),
        })?;

    let (quantity, rate) = match entry.basis {
        RateBasis::Flat(charge) => (1, charge),
        RateBasis::PerUnit { rate, quantity } => {
            let doses = i64::from(dose_quantity);
            let units = match quantity {
                QuantityRule::DosesAfterFirst => doses - 1,
                QuantityRule::Doses => doses,
                QuantityRule::RemainingComponents => i64::from(total_components) - doses,
            };
            (units, rate)
        }
    };
    Ok(priced(expected_code, quantity, rate))
}

/// Billing result for `quantity` units at `rate_cents` each.
pub fn priced(code: &str, quantity: i64, rate_cents: i64) -> BillingCodeResult {
    BillingCodeResult::new(code, quantity.to_string(), format_cents(quantity * rate_cents))
}

/// Render an amount in cents with exactly two decimal digits.
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adult_single_component() {
        let result = compute_base_code("Adult", "Single-Component", "90471", 1, 1).unwrap();
        assert_eq!(result, BillingCodeResult::new("90471", "1", "56.00"));
    }

    #[test]
    fn adult_add_on_scales_with_doses() {
        let result = compute_base_code("Adult", "Multi-Component", "90472", 3, 3).unwrap();
        assert_eq!(result, BillingCodeResult::new("90472", "2", "76.00"));
    }

    #[test]
    fn pediatric_primary_per_dose() {
        let result = compute_base_code("Pediatric", "Single-Component", "90460", 2, 2).unwrap();
        assert_eq!(result, BillingCodeResult::new("90460", "2", "112.00"));
    }

    #[test]
    fn pediatric_add_on_covers_remaining_components() {
        let result = compute_base_code("Pediatric", "Multi-Component", "90461", 2, 3).unwrap();
        assert_eq!(result, BillingCodeResult::new("90461", "1", "38.00"));
    }

    #[test]
    fn flat_codes() {
        for (code, charge) in [
            ("G0008", "90.00"),
            ("G0009", "90.00"),
            ("90480", "50.00"),
            ("96380", "50.00"),
            ("96381", "50.00"),
            ("58300", "0.00"),
            ("11981", "0.00"),
        ] {
            let result = compute_base_code("Adult", "Single-Component", code, 2, 4).unwrap();
            assert_eq!(result.quantity, "1", "{code}");
            assert_eq!(result.charge, charge, "{code}");
        }
    }

    #[test]
    fn empty_code_is_not_an_error() {
        let result = compute_base_code("Adult", "LARC - IUD", "", 1, 1).unwrap();
        assert_eq!(result, BillingCodeResult::empty());
    }

    #[test]
    fn unknown_code_is_unsupported() {
        let error = compute_base_code("Adult", "Single-Component", "99999", 1, 1).unwrap_err();
        assert_eq!(
            error,
            ClaimsError::UnsupportedScenario {
                code: "99999".to_string(),
                age_group: "Adult".to_string(),
                administration_pattern: "Single-Component".to_string(),
            }
        );
    }

    #[test]
    fn format_cents_pads_and_signs() {
        assert_eq!(format_cents(0), "0.00");
        assert_eq!(format_cents(5), "0.05");
        assert_eq!(format_cents(11200), "112.00");
        assert_eq!(format_cents(-3800), "-38.00");
    }
}
