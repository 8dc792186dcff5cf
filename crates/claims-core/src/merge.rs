//! Override records merged with expected-data fallback.
//!
//! Precedence is one hop: the override value when set, otherwise the
//! corresponding expected reference value. Expected data never reads from an
//! override.

use claims_model::{ExpectedReferenceData, PayerSwitchOverride, ProviderOverride};

/// The override value when present, otherwise the fallback.
pub fn coalesce(value: Option<String>, fallback: &Option<String>) -> Option<String> {
    value.or_else(|| fallback.clone())
}

/// Fill every unset provider-override field from `expected`.
///
/// A claim without an override record merges as an empty record, so every
/// field resolves to the expected value.
pub fn merge_provider_override(
    record: Option<ProviderOverride>,
    expected: &ExpectedReferenceData,
) -> ProviderOverride {
    let record = record.unwrap_or_default();
    ProviderOverride {
        consent_form_id: record.consent_form_id,
        partner_id: record.partner_id,
        clinic_id: record.clinic_id,
        payer_entity_id: record.payer_entity_id,
        provider_id: record.provider_id,
        eic_id: record.eic_id,
        information_entity_id: record.information_entity_id,
        entity_address_id: record.entity_address_id,
        rendering_npi_switch_npi: coalesce(
            record.rendering_npi_switch_npi,
            &expected.rendering_provider_npi,
        ),
        rendering_npi_switch_first_name: coalesce(
            record.rendering_npi_switch_first_name,
            &expected.rendering_provider_first_name,
        ),
        rendering_npi_switch_last_name: coalesce(
            record.rendering_npi_switch_last_name,
            &expected.rendering_provider_last_name,
        ),
        facility_rendering_provider_npi: coalesce(
            record.facility_rendering_provider_npi,
            &expected.rendering_provider_npi,
        ),
        facility_rendering_provider_first_name: coalesce(
            record.facility_rendering_provider_first_name,
            &expected.rendering_provider_first_name,
        ),
        facility_rendering_provider_last_name: coalesce(
            record.facility_rendering_provider_last_name,
            &expected.rendering_provider_last_name,
        ),
        billing_provider_override_npi: coalesce(
            record.billing_provider_override_npi,
            &expected.billing_provider_npi,
        ),
        billing_provider_override_ein: coalesce(
            record.billing_provider_override_ein,
            &expected.billing_provider_ein,
        ),
        billing_provider_override_last_name: coalesce(
            record.billing_provider_override_last_name,
            &expected.billing_provider_name,
        ),
        billing_provider_override_address_street: coalesce(
            record.billing_provider_override_address_street,
            &expected.billing_provider_address_street,
        ),
        billing_provider_override_city: coalesce(
            record.billing_provider_override_city,
            &expected.billing_provider_address_city,
        ),
        billing_provider_override_state: coalesce(
            record.billing_provider_override_state,
            &expected.billing_provider_address_state,
        ),
        billing_provider_override_zip_code: coalesce(
            record.billing_provider_override_zip_code,
            &expected.billing_provider_address_zip_code,
        ),
        rendering_provider_override_npi: coalesce(
            record.rendering_provider_override_npi,
            &expected.rendering_provider_npi,
        ),
        rendering_provider_override_first_name: coalesce(
            record.rendering_provider_override_first_name,
            &expected.rendering_provider_first_name,
        ),
        rendering_provider_override_last_name: coalesce(
            record.rendering_provider_override_last_name,
            &expected.rendering_provider_last_name,
        ),
        servicing_provider_override_npi: coalesce(
            record.servicing_provider_override_npi,
            &expected.servicing_provider_npi,
        ),
        servicing_provider_override_last_name: coalesce(
            record.servicing_provider_override_last_name,
            &expected.servicing_provider_name,
        ),
        servicing_provider_override_address_street: coalesce(
            record.servicing_provider_override_address_street,
            &expected.servicing_provider_address_street,
        ),
        servicing_provider_override_city: coalesce(
            record.servicing_provider_override_city,
            &expected.servicing_provider_address_city,
        ),
        servicing_provider_override_state: coalesce(
            record.servicing_provider_override_state,
            &expected.servicing_provider_address_state,
        ),
        servicing_provider_override_zip_code: coalesce(
            record.servicing_provider_override_zip_code,
            &expected.servicing_provider_address_zip_code,
        ),
        billing_provider_taxonomy_code: coalesce(
            record.billing_provider_taxonomy_code,
            &expected.billing_provider_taxonomy_code,
        ),
        rendering_provider_taxonomy_code: coalesce(
            record.rendering_provider_taxonomy_code,
            &expected.rendering_provider_taxonomy_code,
        ),
    }
}

/// Fill every unset payer-switch field from `expected`.
pub fn merge_payer_switch(
    record: Option<PayerSwitchOverride>,
    expected: &ExpectedReferenceData,
) -> PayerSwitchOverride {
    let record = record.unwrap_or_default();
    PayerSwitchOverride {
        consent_form_id: record.consent_form_id,
        partner_id: record.partner_id,
        clinic_id: record.clinic_id,
        from_payer_entity_id: record.from_payer_entity_id,
        to_payer_entity_id: record.to_payer_entity_id,
        to_payer_name: coalesce(record.to_payer_name, &expected.primary_insurance_name),
        billing_provider_name: coalesce(
            record.billing_provider_name,
            &expected.billing_provider_name,
        ),
        billing_provider_npi: coalesce(record.billing_provider_npi, &expected.billing_provider_npi),
        billing_provider_ein: coalesce(record.billing_provider_ein, &expected.billing_provider_ein),
        billing_provider_taxonomy_code: coalesce(
            record.billing_provider_taxonomy_code,
            &expected.billing_provider_taxonomy_code,
        ),
        billing_provider_address_street: coalesce(
            record.billing_provider_address_street,
            &expected.billing_provider_address_street,
        ),
        billing_provider_address_city: coalesce(
            record.billing_provider_address_city,
            &expected.billing_provider_address_city,
        ),
        billing_provider_address_state: coalesce(
            record.billing_provider_address_state,
            &expected.billing_provider_address_state,
        ),
        billing_provider_address_zip_code: coalesce(
            record.billing_provider_address_zip_code,
            &expected.billing_provider_address_zip_code,
        ),
        servicing_provider_name: coalesce(
            record.servicing_provider_name,
            &expected.servicing_provider_name,
        ),
        servicing_provider_npi: coalesce(
            record.servicing_provider_npi,
            &expected.servicing_provider_npi,
        ),
        servicing_provider_address_street: coalesce(
            record.servicing_provider_address_street,
            &expected.servicing_provider_address_street,
        ),
        servicing_provider_address_city: coalesce(
            record.servicing_provider_address_city,
            &expected.servicing_provider_address_city,
        ),
        servicing_provider_address_state: coalesce(
            record.servicing_provider_address_state,
            &expected.servicing_provider_address_state,
        ),
        servicing_provider_address_zip_code: coalesce(
            record.servicing_provider_address_zip_code,
            &expected.servicing_provider_address_zip_code,
        ),
    }
}
