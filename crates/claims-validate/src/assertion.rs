//! Field assertions over a [`ComparisonRecord`] and the loop that runs them.
//!
//! An assertion pairs an actual-value extractor with an expected-value
//! extractor and a [`Comparison`]. Every assertion in a list is evaluated;
//! nothing short-circuits.

use claims_model::{ComparisonRecord, ServiceLineComparison, Violation};

/// Extracts a value from the comparison record.
pub type RecordExtractor = fn(&ComparisonRecord) -> Option<String>;
/// Extracts a value from one joined service line.
pub type LineExtractor = fn(&ServiceLineComparison) -> Option<String>;
/// Extracts an expected line value, with the whole record available.
pub type LineExpectation = fn(&ServiceLineComparison, &ComparisonRecord) -> Option<String>;

/// How an actual value is compared against its expectation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// Actual must be present and equal to expected.
    Required,
    /// Plain equality; absent equals absent.
    Equal,
    /// Absent and empty are the same value.
    Blankable,
    /// Required, compared without regard to ASCII case.
    IgnoreCase,
    /// Required, compared on the first five characters (ZIP+4 vs ZIP).
    ZipPrefix,
}

impl Comparison {
    /// Returns true when `actual` satisfies `expected`.
    pub fn holds(self, actual: Option<&str>, expected: Option<&str>) -> bool {
        match self {
            Self::Equal => actual == expected,
            Self::Blankable => actual.unwrap_or_default() == expected.unwrap_or_default(),
            Self::Required => actual.is_some() && actual == expected,
            Self::IgnoreCase => match (actual, expected) {
                (Some(actual), Some(expected)) => actual.eq_ignore_ascii_case(expected),
                _ => false,
            },
            Self::ZipPrefix => match (actual, expected) {
                (Some(actual), Some(expected)) => zip5(actual) == zip5(expected),
                _ => false,
            },
        }
    }

    /// Value as shown in a violation message.
    fn render(self, value: Option<&str>) -> String {
        match (self, value) {
            (Self::IgnoreCase, Some(value)) => value.to_ascii_uppercase(),
            (Self::ZipPrefix, Some(value)) => zip5(value).to_string(),
            (_, value) => value.unwrap_or_default().to_string(),
        }
    }
}

fn zip5(value: &str) -> &str {
    match value.char_indices().nth(5) {
        Some((end, _)) => &value[..end],
        None => value,
    }
}

/// One claim-level field check.
#[derive(Clone, Copy)]
pub struct FieldAssertion {
    /// Stable key, e.g. `billing_provider.npi`.
    pub field: &'static str,
    /// Label used in the violation message.
    pub label: &'static str,
    pub actual: RecordExtractor,
    pub expected: RecordExtractor,
    pub comparison: Comparison,
}

impl FieldAssertion {
    pub fn check(&self, record: &ComparisonRecord) -> Option<Violation> {
        let actual = (self.actual)(record);
        let expected = (self.expected)(record);
        if self
            .comparison
            .holds(actual.as_deref(), expected.as_deref())
        {
            return None;
        }
        Some(Violation::mismatch(
            self.field,
            self.label,
            self.comparison.render(expected.as_deref()),
            self.comparison.render(actual.as_deref()),
        ))
    }
}

impl std::fmt::Debug for FieldAssertion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldAssertion")
            .field("field", &self.field)
            .field("comparison", &self.comparison)
            .finish_non_exhaustive()
    }
}

/// A check applied to every joined service line.
#[derive(Clone, Copy)]
pub struct LineAssertion {
    /// Key suffix; the line code is prefixed, e.g. `services[90700].ndc`.
    pub field: &'static str,
    /// Subject of the "is missing or invalid" message.
    pub subject: &'static str,
    pub actual: LineExtractor,
    pub expected: LineExpectation,
}

impl LineAssertion {
    pub fn check(&self, record: &ComparisonRecord) -> Vec<Violation> {
        record
            .service_lines
            .iter()
            .filter_map(|line| {
                let actual = (self.actual)(line);
                let expected = (self.expected)(line, record);
                if actual == expected {
                    return None;
                }
                let expected = expected.unwrap_or_default();
                let actual = actual.unwrap_or_default();
                Some(Violation::with_message(
                    format!("services[{}].{}", line.code, self.field),
                    format!(
                        "{} is missing or invalid. Expected value: {expected}; Actual value: {actual}.",
                        self.subject
                    ),
                    expected,
                    actual,
                ))
            })
            .collect()
    }
}

impl std::fmt::Debug for LineAssertion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineAssertion")
            .field("field", &self.field)
            .finish_non_exhaustive()
    }
}

/// An entry in a strategy's ordered check list.
#[derive(Debug, Clone, Copy)]
pub enum Check {
    Field(FieldAssertion),
    Line(LineAssertion),
}

impl From<FieldAssertion> for Check {
    fn from(assertion: FieldAssertion) -> Self {
        Self::Field(assertion)
    }
}

impl From<LineAssertion> for Check {
    fn from(assertion: LineAssertion) -> Self {
        Self::Line(assertion)
    }
}

/// Run every check in order and collect all violations.
pub fn evaluate_checks(checks: &[Check], record: &ComparisonRecord) -> Vec<Violation> {
    let mut violations = Vec::new();
    for check in checks {
        match check {
            Check::Field(assertion) => violations.extend(assertion.check(record)),
            Check::Line(assertion) => violations.extend(assertion.check(record)),
        }
    }
    violations
}
