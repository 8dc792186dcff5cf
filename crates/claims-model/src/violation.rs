use std::fmt;

use serde::{Deserialize, Serialize};

/// A single field mismatch found during validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Stable field key (e.g. "billing_provider.npi").
    pub field: String,
    /// Human-readable message with expected and actual values filled in.
    pub message: String,
    pub expected: String,
    pub actual: String,
}

impl Violation {
    /// Build a mismatch using the standard "does not match" template.
    pub fn mismatch(
        field: impl Into<String>,
        label: &str,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        let expected = expected.into();
        let actual = actual.into();
        Self {
            field: field.into(),
            message: format!(
                "{label} does not match. Expected value: {expected}; Actual Value: {actual}."
            ),
            expected,
            actual,
        }
    }

    /// Build a violation with a fixed message.
    pub fn with_message(
        field: impl Into<String>,
        message: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Result of executing one test-matrix case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CaseOutcome {
    Passed,
    Failed { violations: Vec<Violation> },
    /// No applicable data; a warning rather than a failure.
    Skipped { reason: String },
    /// A structural error stopped the case.
    Aborted { error: String },
}

impl CaseOutcome {
    pub fn from_violations(violations: Vec<Violation>) -> Self {
        if violations.is_empty() {
            Self::Passed
        } else {
            Self::Failed { violations }
        }
    }

    pub fn violations(&self) -> &[Violation] {
        match self {
            Self::Failed { violations } => violations,
            _ => &[],
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. } | Self::Aborted { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Passed => "PASS",
            Self::Failed { .. } => "FAIL",
            Self::Skipped { .. } => "SKIP",
            Self::Aborted { .. } => "ABORT",
        }
    }
}

/// Report for a single test-matrix case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseReport {
    /// Case label, e.g. "Adult - Single-Component - None - 90471 x1".
    pub case: String,
    pub filing_rule: String,
    pub claim_id: Option<i64>,
    pub outcome: CaseOutcome,
}

/// Report for a whole run over the test matrix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub filing_rule: String,
    pub cases: Vec<CaseReport>,
}

impl RunReport {
    pub fn new(filing_rule: impl Into<String>) -> Self {
        Self {
            filing_rule: filing_rule.into(),
            cases: Vec::new(),
        }
    }

    fn count(&self, predicate: impl Fn(&CaseOutcome) -> bool) -> usize {
        self.cases
            .iter()
            .filter(|case| predicate(&case.outcome))
            .count()
    }

    pub fn passed_count(&self) -> usize {
        self.count(|outcome| matches!(outcome, CaseOutcome::Passed))
    }

    pub fn failed_count(&self) -> usize {
        self.count(|outcome| matches!(outcome, CaseOutcome::Failed { .. }))
    }

    pub fn skipped_count(&self) -> usize {
        self.count(|outcome| matches!(outcome, CaseOutcome::Skipped { .. }))
    }

    pub fn aborted_count(&self) -> usize {
        self.count(|outcome| matches!(outcome, CaseOutcome::Aborted { .. }))
    }

    pub fn violation_count(&self) -> usize {
        self.cases
            .iter()
            .map(|case| case.outcome.violations().len())
            .sum()
    }

    pub fn has_failures(&self) -> bool {
        self.cases.iter().any(|case| case.outcome.is_failure())
    }
}
