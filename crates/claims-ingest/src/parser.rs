//! Claim message parsing.

use claims_model::{ClaimsError, ParsedClaim, Result};

/// Turns a raw claim message into the structured claim the validators read.
pub trait ClaimParser: Send + Sync {
    fn parse(&self, claim_id: i64, raw: &str) -> Result<ParsedClaim>;
}

/// Parser for claim messages stored as JSON documents.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonClaimParser;

impl ClaimParser for JsonClaimParser {
    fn parse(&self, claim_id: i64, raw: &str) -> Result<ParsedClaim> {
        serde_json::from_str(raw).map_err(|error| ClaimsError::ClaimParse {
            claim_id,
            message: error.to_string(),
        })
    }
}
