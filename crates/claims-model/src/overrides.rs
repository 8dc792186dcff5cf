//! Sparse provider and payer override records.
//!
//! Any field left unset falls back to the matching field of
//! [`ExpectedReferenceData`](crate::ExpectedReferenceData) when the record is
//! merged into a comparison record.

use serde::{Deserialize, Serialize};

/// Provider-level overrides configured for a claim's clinic and payer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderOverride {
    pub consent_form_id: i64,
    pub partner_id: i64,
    pub clinic_id: i64,
    pub payer_entity_id: i64,
    pub provider_id: i64,
    pub eic_id: i64,
    pub information_entity_id: i64,
    pub entity_address_id: i64,
    pub rendering_npi_switch_npi: Option<String>,
    pub rendering_npi_switch_first_name: Option<String>,
    pub rendering_npi_switch_last_name: Option<String>,
    pub facility_rendering_provider_npi: Option<String>,
    pub facility_rendering_provider_first_name: Option<String>,
    pub facility_rendering_provider_last_name: Option<String>,
    pub billing_provider_override_npi: Option<String>,
    pub billing_provider_override_ein: Option<String>,
    pub billing_provider_override_last_name: Option<String>,
    pub billing_provider_override_address_street: Option<String>,
    pub billing_provider_override_city: Option<String>,
    pub billing_provider_override_state: Option<String>,
    pub billing_provider_override_zip_code: Option<String>,
    pub rendering_provider_override_npi: Option<String>,
    pub rendering_provider_override_first_name: Option<String>,
    pub rendering_provider_override_last_name: Option<String>,
    pub servicing_provider_override_npi: Option<String>,
    pub servicing_provider_override_last_name: Option<String>,
    pub servicing_provider_override_address_street: Option<String>,
    pub servicing_provider_override_city: Option<String>,
    pub servicing_provider_override_state: Option<String>,
    pub servicing_provider_override_zip_code: Option<String>,
    pub billing_provider_taxonomy_code: Option<String>,
    pub rendering_provider_taxonomy_code: Option<String>,
}

/// Payer switch mapping: the claim is filed to a different payer entity,
/// optionally with different billing and servicing provider identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayerSwitchOverride {
    pub consent_form_id: i64,
    pub partner_id: i64,
    pub clinic_id: i64,
    pub from_payer_entity_id: i64,
    pub to_payer_entity_id: i64,
    pub to_payer_name: Option<String>,
    pub billing_provider_name: Option<String>,
    pub billing_provider_npi: Option<String>,
    pub billing_provider_ein: Option<String>,
    pub billing_provider_taxonomy_code: Option<String>,
    pub billing_provider_address_street: Option<String>,
    pub billing_provider_address_city: Option<String>,
    pub billing_provider_address_state: Option<String>,
    pub billing_provider_address_zip_code: Option<String>,
    pub servicing_provider_name: Option<String>,
    pub servicing_provider_npi: Option<String>,
    pub servicing_provider_address_street: Option<String>,
    pub servicing_provider_address_city: Option<String>,
    pub servicing_provider_address_state: Option<String>,
    pub servicing_provider_address_zip_code: Option<String>,
}
