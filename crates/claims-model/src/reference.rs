//! Expected ("truth") data a generated claim must match.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Kind of a billed service line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    /// Vaccine product line (carries NDC and Rx number).
    #[default]
    Vaccine,
    /// Administration code line.
    Administration,
    Other,
}

/// Expected patient, payer and provider identity for one claim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpectedReferenceData {
    pub consent_form_id: i64,
    pub patient_first_name: Option<String>,
    pub patient_last_name: Option<String>,
    pub patient_dob: Option<NaiveDate>,
    pub patient_gender: Option<String>,
    pub patient_address_street: Option<String>,
    pub patient_address_city: Option<String>,
    pub patient_address_state: Option<String>,
    pub patient_address_zip_code: Option<String>,
    pub primary_insurance_name: Option<String>,
    pub member_id: Option<String>,
    pub group_id: Option<String>,
    pub relationship_to_insured: Option<String>,
    pub payer_entity_id: i64,
    pub billing_provider_name: Option<String>,
    pub billing_provider_npi: Option<String>,
    pub billing_provider_ein: Option<String>,
    pub billing_provider_entity_type_code: i32,
    pub billing_provider_taxonomy_code: Option<String>,
    pub billing_provider_address_street: Option<String>,
    pub billing_provider_address_city: Option<String>,
    pub billing_provider_address_state: Option<String>,
    pub billing_provider_address_zip_code: Option<String>,
    pub place_of_service_code: Option<String>,
    pub claim_filing_indicator_code: Option<String>,
    pub rendering_provider_first_name: Option<String>,
    pub rendering_provider_last_name: Option<String>,
    pub rendering_provider_npi: Option<String>,
    pub rendering_provider_entity_type_code: i32,
    pub rendering_provider_taxonomy_code: Option<String>,
    pub servicing_provider_name: Option<String>,
    pub servicing_provider_npi: Option<String>,
    pub servicing_provider_entity_type_code: i32,
    pub servicing_provider_address_street: Option<String>,
    pub servicing_provider_address_city: Option<String>,
    pub servicing_provider_address_state: Option<String>,
    pub servicing_provider_address_zip_code: Option<String>,
}

impl ExpectedReferenceData {
    /// Strip member and group ids down to ASCII alphanumerics, the form they
    /// take on a generated claim.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        self.member_id = self.member_id.as_deref().map(sanitize_identifier);
        self.group_id = self.group_id.as_deref().map(sanitize_identifier);
        self
    }
}

/// Remove every character that is not an ASCII letter or digit.
pub fn sanitize_identifier(value: &str) -> String {
    value.chars().filter(char::is_ascii_alphanumeric).collect()
}

/// A service line the claim is expected to carry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpectedServiceLine {
    pub consent_form_id: i64,
    pub code: String,
    pub ndc: Option<String>,
    pub service_type: ServiceType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_punctuation_and_spaces() {
        assert_eq!(sanitize_identifier("W12-345 678*"), "W12345678");
        assert_eq!(sanitize_identifier(""), "");
    }

    #[test]
    fn sanitized_leaves_missing_ids_missing() {
        let data = ExpectedReferenceData {
            member_id: Some("AB-12".to_string()),
            ..Default::default()
        }
        .sanitized();
        assert_eq!(data.member_id.as_deref(), Some("AB12"));
        assert_eq!(data.group_id, None);
    }
}
