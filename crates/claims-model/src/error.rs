use thiserror::Error;

/// Structural failures that abort a single scenario.
///
/// Field mismatches are not errors; they are collected as
/// [`Violation`](crate::Violation) values instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClaimsError {
    #[error(
        "admin code '{code}' has no rate table entry for {age_group} - {administration_pattern}"
    )]
    UnsupportedScenario {
        code: String,
        age_group: String,
        administration_pattern: String,
    },
    #[error("validator {name} not found")]
    UnknownFilingRule { name: String },
    #[error("{operation} failed after {attempts} attempt(s): {last_error}")]
    DataSourceExhausted {
        operation: String,
        attempts: u32,
        last_error: String,
    },
    #[error("claim {claim_id}: no claim message available")]
    MissingClaimMessage { claim_id: i64 },
    #[error("claim {claim_id}: failed to parse claim message: {message}")]
    ClaimParse { claim_id: i64, message: String },
}

pub type Result<T> = std::result::Result<T, ClaimsError>;
