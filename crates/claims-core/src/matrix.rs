//! The regression test matrix.

use std::fmt;

use claims_model::Scenario;

/// Antigen wildcard: the case matches scenarios of any antigen.
pub const ANY_ANTIGEN: &str = "None";

/// One (age group, pattern, antigen, expected code, dose count) case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixCase {
    pub age_group: &'static str,
    pub administration_pattern: &'static str,
    pub antigen: &'static str,
    /// Administration code expected before filing rules apply; empty for
    /// procedures billed without one.
    pub expected_code: &'static str,
    pub dose_count: u32,
}

const fn case(
    age_group: &'static str,
    administration_pattern: &'static str,
    antigen: &'static str,
    expected_code: &'static str,
    dose_count: u32,
) -> MatrixCase {
    MatrixCase {
        age_group,
        administration_pattern,
        antigen,
        expected_code,
        dose_count,
    }
}

pub const DEFAULT_MATRIX: [MatrixCase; 38] = [
    // Adult
    case("Adult", "Single-Component", ANY_ANTIGEN, "90471", 1),
    case("Adult", "Multi-Component", ANY_ANTIGEN, "90471", 1),
    case("Adult", "Private COVID", "COVID-19", "90480", 1),
    case("Adult", "RSV", "RSV", "90471", 1),
    case("Adult", "Single-Component", ANY_ANTIGEN, "90471", 2),
    case("Adult", "Single-Component", ANY_ANTIGEN, "90472", 2),
    case("Adult", "Multi-Component", ANY_ANTIGEN, "90471", 2),
    case("Adult", "Multi-Component", ANY_ANTIGEN, "90472", 2),
    case("Adult", "Single-Component", ANY_ANTIGEN, "90471", 3),
    case("Adult", "Single-Component", ANY_ANTIGEN, "90472", 3),
    case("Adult", "Multi-Component", ANY_ANTIGEN, "90471", 3),
    case("Adult", "Multi-Component", ANY_ANTIGEN, "90472", 3),
    // Pediatric
    case("Pediatric", "Single-Component", ANY_ANTIGEN, "90460", 1),
    case("Pediatric", "Multi-Component", ANY_ANTIGEN, "90460", 1),
    case("Pediatric", "Multi-Component", ANY_ANTIGEN, "90461", 1),
    case("Pediatric", "Private COVID", "COVID-19", "90480", 1),
    case("Pediatric", "RSV", "RSV", "96380", 1),
    case("Pediatric", "Single-Component", ANY_ANTIGEN, "90460", 2),
    case("Pediatric", "Single-Component", ANY_ANTIGEN, "90461", 2),
    case("Pediatric", "Multi-Component", ANY_ANTIGEN, "90460", 2),
    case("Pediatric", "Multi-Component", ANY_ANTIGEN, "90461", 2),
    case("Pediatric", "Single-Component", ANY_ANTIGEN, "90460", 3),
    case("Pediatric", "Single-Component", ANY_ANTIGEN, "90461", 3),
    case("Pediatric", "Multi-Component", ANY_ANTIGEN, "90460", 3),
    case("Pediatric", "Multi-Component", ANY_ANTIGEN, "90461", 3),
    // Medicare
    case("Medicare", "Single-Component", "Influenza", "G0008", 1),
    case("Medicare", "Single-Component", "PCV 21", "G0009", 1),
    case("Medicare", "Single-Component", "PCV20", "G0009", 1),
    case("Medicare", "Single-Component", "PPSV23", "G0009", 1),
    case("Medicare", "Private COVID", "COVID-19", "90480", 1),
    case("Medicare", "Single-Component", "Influenza", "G0008", 2),
    case("Medicare", "Single-Component", "PCV 21", "G0009", 2),
    case("Medicare", "Single-Component", "PCV20", "G0009", 2),
    case("Medicare", "Single-Component", "PPSV23", "G0009", 2),
    case("Medicare", "Private COVID", "COVID-19", "90480", 2),
    // LARC
    case("Adult", "LARC - Implant", "Implant", "", 1),
    case("Adult", "LARC - Injection", "Injection", "", 1),
    case("Adult", "LARC - IUD", "IUD", "", 1),
];

impl MatrixCase {
    /// Whether `scenario` is an encounter for this case.
    ///
    /// The expected code is not part of the match: several cases share the
    /// same encounters and differ only in the code they check.
    pub fn matches(&self, scenario: &Scenario) -> bool {
        scenario.administration_pattern == self.administration_pattern
            && scenario.age_group == self.age_group
            && scenario.dose_count == self.dose_count
            && (self.antigen == ANY_ANTIGEN || scenario.antigen == self.antigen)
    }

    pub fn select(&self, scenarios: &[Scenario]) -> Vec<Scenario> {
        scenarios
            .iter()
            .filter(|scenario| self.matches(scenario))
            .cloned()
            .collect()
    }
}

impl fmt::Display for MatrixCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = if self.expected_code.is_empty() {
            "no admin code"
        } else {
            self.expected_code
        };
        write!(
            f,
            "{} - {} - {} - {} x{}",
            self.age_group, self.administration_pattern, self.antigen, code, self.dose_count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario(antigen: &str, dose_count: u32) -> Scenario {
        Scenario {
            consent_form_id: 1,
            age_group: "Medicare".to_string(),
            administration_pattern: "Single-Component".to_string(),
            antigen: antigen.to_string(),
            dose_count,
            total_components: 1,
            stock_type: "Private".to_string(),
            pediatric_single_component_billing: false,
            filing_rule_name: "None".to_string(),
        }
    }

    #[test]
    fn matrix_has_unique_cases() {
        for (idx, case) in DEFAULT_MATRIX.iter().enumerate() {
            assert!(
                !DEFAULT_MATRIX[idx + 1..].contains(case),
                "duplicate case {case}"
            );
        }
    }

    #[test]
    fn antigen_is_matched_unless_wildcard() {
        let flu = case("Medicare", "Single-Component", "Influenza", "G0008", 1);
        assert!(flu.matches(&scenario("Influenza", 1)));
        assert!(!flu.matches(&scenario("PCV20", 1)));
        assert!(!flu.matches(&scenario("Influenza", 2)));

        let any = case("Medicare", "Single-Component", ANY_ANTIGEN, "G0008", 1);
        assert!(any.matches(&scenario("PCV20", 1)));
    }

    #[test]
    fn labels() {
        assert_eq!(
            DEFAULT_MATRIX[0].to_string(),
            "Adult - Single-Component - None - 90471 x1"
        );
        assert_eq!(
            DEFAULT_MATRIX[37].to_string(),
            "Adult - LARC - IUD - IUD - no admin code x1"
        );
    }
}
