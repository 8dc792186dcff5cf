//! Field groups shared between strategies.
//!
//! Each group compares one section of the claim against a single source of
//! expected values: the reference data, the merged provider override, or the
//! merged payer switch.

use claims_model::ComparisonRecord;

use crate::assertion::{Comparison, FieldAssertion, LineAssertion, RecordExtractor};

/// Payer name billed to pediatric Aetna Florida members.
pub const AETNA_PEDS_FL_PAYER: &str = "AETNA (PEDS FL)";
/// Oldest patient age (18 years) billed as pediatric.
pub const PEDIATRIC_MAX_AGE_MONTHS: i32 = 216;
/// Well-child visit diagnosis code.
pub const WELL_CHILD_DIAGNOSIS: &str = "Z00129";
/// Qualifier prefixed to NDC values on the claim.
pub const NDC_QUALIFIER: &str = "N4";
/// Entity type code for an individual person.
pub const PERSON_ENTITY_TYPE: i32 = 1;

fn assert(
    field: &'static str,
    label: &'static str,
    actual: RecordExtractor,
    expected: RecordExtractor,
    comparison: Comparison,
) -> FieldAssertion {
    FieldAssertion {
        field,
        label,
        actual,
        expected,
        comparison,
    }
}

fn is_pediatric(record: &ComparisonRecord) -> bool {
    record.actual.patient_age_in_months() <= PEDIATRIC_MAX_AGE_MONTHS
}

pub fn patient() -> Vec<FieldAssertion> {
    vec![
        assert(
            "patient.first_name",
            "Patient FirstName",
            |r| r.actual.patient.first_name.clone(),
            |r| r.expected.patient_first_name.clone(),
            Comparison::Required,
        ),
        assert(
            "patient.last_name",
            "Patient LastName",
            |r| r.actual.patient.last_name.clone(),
            |r| r.expected.patient_last_name.clone(),
            Comparison::Required,
        ),
        assert(
            "patient.date_of_birth",
            "Patient DoB",
            |r| Some(r.actual.patient.date_of_birth.to_string()),
            |r| r.expected.patient_dob.map(|dob| dob.to_string()),
            Comparison::Required,
        ),
        assert(
            "patient.sex",
            "Patient Gender",
            |r| r.actual.patient.sex.clone(),
            |r| r.expected.patient_gender.clone(),
            Comparison::Required,
        ),
        assert(
            "patient_address.address1",
            "Patient Address (Street)",
            |r| r.actual.patient_address.address1.clone(),
            |r| r.expected.patient_address_street.clone(),
            Comparison::Required,
        ),
        assert(
            "patient_address.city",
            "Patient Address (City)",
            |r| r.actual.patient_address.city.clone(),
            |r| r.expected.patient_address_city.clone(),
            Comparison::Required,
        ),
        assert(
            "patient_address.state",
            "Patient Address (State)",
            |r| r.actual.patient_address.state.clone(),
            |r| r.expected.patient_address_state.clone(),
            Comparison::Required,
        ),
        assert(
            "patient_address.zip_code",
            "Patient Address (ZipCode)",
            |r| r.actual.patient_address.zip_code.clone(),
            |r| r.expected.patient_address_zip_code.clone(),
            Comparison::ZipPrefix,
        ),
        payer_name(),
        assert(
            "member_id",
            "MemberId",
            |r| r.actual.member_id.clone(),
            |r| r.expected.member_id.clone(),
            Comparison::Required,
        ),
        assert(
            "patient_relationship_to_insured",
            "Relationship To Insured",
            |r| r.actual.patient_relationship_to_insured.clone(),
            |r| r.expected.relationship_to_insured.clone(),
            Comparison::Required,
        ),
    ]
}

pub fn payer_name() -> FieldAssertion {
    assert(
        "payer_name",
        "Primary Insurance Name",
        |r| r.actual.payer_name.clone(),
        |r| r.expected.primary_insurance_name.clone(),
        Comparison::IgnoreCase,
    )
}

/// Pediatric members of this payer are billed to a dedicated payer name.
pub fn aetna_peds_payer_name() -> FieldAssertion {
    assert(
        "payer_name",
        "Primary Insurance Name",
        |r| r.actual.payer_name.clone(),
        |r| {
            if is_pediatric(r) {
                Some(AETNA_PEDS_FL_PAYER.to_string())
            } else {
                r.expected.primary_insurance_name.clone()
            }
        },
        Comparison::IgnoreCase,
    )
}

pub fn switched_payer_name() -> FieldAssertion {
    assert(
        "payer_name",
        "Primary Insurance Name",
        |r| r.actual.payer_name.clone(),
        |r| r.payer_switch.to_payer_name.clone(),
        Comparison::IgnoreCase,
    )
}

pub fn claim_header() -> Vec<FieldAssertion> {
    vec![place_of_service(), claim_filing_indicator()]
}

pub fn place_of_service() -> FieldAssertion {
    assert(
        "place_of_service",
        "Place Of Service Code",
        |r| r.actual.place_of_service.clone(),
        |r| r.expected.place_of_service_code.clone(),
        Comparison::Required,
    )
}

fn claim_filing_indicator() -> FieldAssertion {
    assert(
        "claim_filing_indicator_code",
        "Claim Filing Indicator Code",
        |r| r.actual.claim_filing_indicator_code.clone(),
        |r| r.expected.claim_filing_indicator_code.clone(),
        Comparison::Required,
    )
}

pub fn group_id() -> FieldAssertion {
    assert(
        "policy_group",
        "Policy Group ID",
        |r| r.actual.policy_group.clone(),
        |r| r.expected.group_id.clone(),
        Comparison::Required,
    )
}

fn billing_entity_type() -> FieldAssertion {
    assert(
        "billing_provider.entity_type",
        "Billing Provider Entity Type Code",
        |r| r.actual.billing_provider.entity_type.map(|code| code.to_string()),
        |r| Some(r.expected.billing_provider_entity_type_code.to_string()),
        Comparison::Required,
    )
}

pub fn billing_provider() -> Vec<FieldAssertion> {
    vec![
        assert(
            "billing_provider.name",
            "Billing Provider Name",
            |r| r.actual.billing_provider.last_name_or_organization_name.clone(),
            |r| r.expected.billing_provider_name.clone(),
            Comparison::Required,
        ),
        assert(
            "billing_provider.npi",
            "Billing Provider NPI",
            |r| r.actual.billing_provider.npi.clone(),
            |r| r.expected.billing_provider_npi.clone(),
            Comparison::Required,
        ),
        assert(
            "billing_provider.ein",
            "Billing Provider EIN",
            |r| r.actual.federal_tax_id_number.clone(),
            |r| r.expected.billing_provider_ein.clone(),
            Comparison::Required,
        ),
        billing_entity_type(),
        assert(
            "billing_provider.taxonomy_code",
            "Billing Provider Taxonomy Code",
            |r| r.actual.billing_provider.taxonomy_code.clone(),
            |r| r.expected.billing_provider_taxonomy_code.clone(),
            Comparison::Blankable,
        ),
        assert(
            "billing_provider.address1",
            "Billing Provider Address (Street)",
            |r| r.actual.billing_provider.address1.clone(),
            |r| r.expected.billing_provider_address_street.clone(),
            Comparison::Required,
        ),
        assert(
            "billing_provider.city",
            "Billing Provider Address (City)",
            |r| r.actual.billing_provider.city.clone(),
            |r| r.expected.billing_provider_address_city.clone(),
            Comparison::Required,
        ),
        assert(
            "billing_provider.state",
            "Billing Provider Address (State)",
            |r| r.actual.billing_provider.state.clone(),
            |r| r.expected.billing_provider_address_state.clone(),
            Comparison::Required,
        ),
        assert(
            "billing_provider.zip_code",
            "Billing Provider Address (ZipCode)",
            |r| r.actual.billing_provider.zip_code.clone(),
            |r| r.expected.billing_provider_address_zip_code.clone(),
            Comparison::ZipPrefix,
        ),
    ]
}

/// Billing provider identity taken from the merged provider override.
pub fn billing_provider_override() -> Vec<FieldAssertion> {
    vec![
        assert(
            "billing_provider.name",
            "Billing Provider Name",
            |r| r.actual.billing_provider.last_name_or_organization_name.clone(),
            |r| r.provider_override.billing_provider_override_last_name.clone(),
            Comparison::Required,
        ),
        assert(
            "billing_provider.npi",
            "Billing Provider NPI",
            |r| r.actual.billing_provider.npi.clone(),
            |r| r.provider_override.billing_provider_override_npi.clone(),
            Comparison::Required,
        ),
        assert(
            "billing_provider.ein",
            "Billing Provider EIN",
            |r| r.actual.federal_tax_id_number.clone(),
            |r| r.provider_override.billing_provider_override_ein.clone(),
            Comparison::Required,
        ),
        billing_entity_type(),
        assert(
            "billing_provider.taxonomy_code",
            "Billing Provider Taxonomy Code",
            |r| r.actual.billing_provider.taxonomy_code.clone(),
            |r| r.provider_override.billing_provider_taxonomy_code.clone(),
            Comparison::Blankable,
        ),
        assert(
            "billing_provider.address1",
            "Billing Provider Address (Street)",
            |r| r.actual.billing_provider.address1.clone(),
            |r| r.provider_override.billing_provider_override_address_street.clone(),
            Comparison::Required,
        ),
        assert(
            "billing_provider.city",
            "Billing Provider Address (City)",
            |r| r.actual.billing_provider.city.clone(),
            |r| r.provider_override.billing_provider_override_city.clone(),
            Comparison::Required,
        ),
        assert(
            "billing_provider.state",
            "Billing Provider Address (State)",
            |r| r.actual.billing_provider.state.clone(),
            |r| r.provider_override.billing_provider_override_state.clone(),
            Comparison::Required,
        ),
        assert(
            "billing_provider.zip_code",
            "Billing Provider Address (ZipCode)",
            |r| r.actual.billing_provider.zip_code.clone(),
            |r| r.provider_override.billing_provider_override_zip_code.clone(),
            Comparison::ZipPrefix,
        ),
    ]
}

/// Billing provider identity taken from the merged payer switch.
pub fn billing_provider_payer_switch() -> Vec<FieldAssertion> {
    vec![
        assert(
            "billing_provider.name",
            "Billing Provider Name",
            |r| r.actual.billing_provider.last_name_or_organization_name.clone(),
            |r| r.payer_switch.billing_provider_name.clone(),
            Comparison::Required,
        ),
        assert(
            "billing_provider.npi",
            "Billing Provider NPI",
            |r| r.actual.billing_provider.npi.clone(),
            |r| r.payer_switch.billing_provider_npi.clone(),
            Comparison::Required,
        ),
        assert(
            "billing_provider.ein",
            "Billing Provider EIN",
            |r| r.actual.federal_tax_id_number.clone(),
            |r| r.payer_switch.billing_provider_ein.clone(),
            Comparison::Required,
        ),
        assert(
            "billing_provider.taxonomy_code",
            "Billing Provider Taxonomy Code",
            |r| r.actual.billing_provider.taxonomy_code.clone(),
            |r| r.payer_switch.billing_provider_taxonomy_code.clone(),
            Comparison::Blankable,
        ),
        assert(
            "billing_provider.address1",
            "Billing Provider Address (Street)",
            |r| r.actual.billing_provider.address1.clone(),
            |r| r.payer_switch.billing_provider_address_street.clone(),
            Comparison::Required,
        ),
        assert(
            "billing_provider.city",
            "Billing Provider Address (City)",
            |r| r.actual.billing_provider.city.clone(),
            |r| r.payer_switch.billing_provider_address_city.clone(),
            Comparison::Required,
        ),
        assert(
            "billing_provider.state",
            "Billing Provider Address (State)",
            |r| r.actual.billing_provider.state.clone(),
            |r| r.payer_switch.billing_provider_address_state.clone(),
            Comparison::Required,
        ),
        assert(
            "billing_provider.zip_code",
            "Billing Provider Address (ZipCode)",
            |r| r.actual.billing_provider.zip_code.clone(),
            |r| r.payer_switch.billing_provider_address_zip_code.clone(),
            Comparison::ZipPrefix,
        ),
    ]
}

/// Where a strategy takes the expected rendering provider from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderingSource {
    Expected,
    /// Override fields, entity type from reference data.
    ProviderOverride,
    /// Rendering NPI switch fields, entity type fixed to a person.
    NpiSwitch,
    /// Facility rendering provider fields, entity type fixed to a person.
    Facility,
}

pub fn rendering_provider(source: RenderingSource) -> Vec<FieldAssertion> {
    let (first_name, last_name, npi): (RecordExtractor, RecordExtractor, RecordExtractor) =
        match source {
            RenderingSource::Expected => (
                |r| r.expected.rendering_provider_first_name.clone(),
                |r| r.expected.rendering_provider_last_name.clone(),
                |r| r.expected.rendering_provider_npi.clone(),
            ),
            RenderingSource::ProviderOverride => (
                |r| r.provider_override.rendering_provider_override_first_name.clone(),
                |r| r.provider_override.rendering_provider_override_last_name.clone(),
                |r| r.provider_override.rendering_provider_override_npi.clone(),
            ),
            RenderingSource::NpiSwitch => (
                |r| r.provider_override.rendering_npi_switch_first_name.clone(),
                |r| r.provider_override.rendering_npi_switch_last_name.clone(),
                |r| r.provider_override.rendering_npi_switch_npi.clone(),
            ),
            RenderingSource::Facility => (
                |r| r.provider_override.facility_rendering_provider_first_name.clone(),
                |r| r.provider_override.facility_rendering_provider_last_name.clone(),
                |r| r.provider_override.facility_rendering_provider_npi.clone(),
            ),
        };
    let entity_type: RecordExtractor = match source {
        RenderingSource::Expected | RenderingSource::ProviderOverride => {
            |r| Some(r.expected.rendering_provider_entity_type_code.to_string())
        }
        RenderingSource::NpiSwitch | RenderingSource::Facility => {
            |_| Some(PERSON_ENTITY_TYPE.to_string())
        }
    };
    let taxonomy: RecordExtractor = match source {
        RenderingSource::Expected => |r| r.expected.rendering_provider_taxonomy_code.clone(),
        _ => |r| r.provider_override.rendering_provider_taxonomy_code.clone(),
    };

    vec![
        assert(
            "rendering_provider.first_name",
            "Rendering Provider Name",
            |r| r.actual.rendering_provider.first_name.clone(),
            first_name,
            Comparison::Blankable,
        ),
        assert(
            "rendering_provider.last_name",
            "Rendering Provider Name",
            |r| r.actual.rendering_provider.last_name_or_organization_name.clone(),
            last_name,
            Comparison::Blankable,
        ),
        assert(
            "rendering_provider.npi",
            "Rendering Provider NPI",
            |r| r.actual.rendering_provider.npi.clone(),
            npi,
            Comparison::Blankable,
        ),
        assert(
            "rendering_provider.entity_type",
            "Rendering Provider Entity Type Code",
            |r| r.actual.rendering_provider.entity_type.map(|code| code.to_string()),
            entity_type,
            Comparison::Equal,
        ),
        assert(
            "rendering_provider.taxonomy_code",
            "Rendering Provider Taxonomy Code",
            |r| r.actual.rendering_provider.taxonomy_code.clone(),
            taxonomy,
            Comparison::Blankable,
        ),
    ]
}

/// Where a strategy takes the expected service facility from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServicingSource {
    Expected,
    /// Reference data, but the facility NPI must be left off the claim.
    ExpectedWithoutNpi,
    ProviderOverride,
    /// Merged payer switch; entity type is not checked.
    PayerSwitch,
}

pub fn servicing_provider(source: ServicingSource) -> Vec<FieldAssertion> {
    type Fields = (
        RecordExtractor,
        RecordExtractor,
        RecordExtractor,
        RecordExtractor,
        RecordExtractor,
        RecordExtractor,
    );
    let expected_address: Fields = (
        |r| r.expected.servicing_provider_name.clone(),
        |r| r.expected.servicing_provider_npi.clone(),
        |r| r.expected.servicing_provider_address_street.clone(),
        |r| r.expected.servicing_provider_address_city.clone(),
        |r| r.expected.servicing_provider_address_state.clone(),
        |r| r.expected.servicing_provider_address_zip_code.clone(),
    );
    let (name, npi, street, city, state, zip): Fields = match source {
        ServicingSource::Expected => expected_address,
        ServicingSource::ExpectedWithoutNpi => (
            expected_address.0,
            |_| None,
            expected_address.2,
            expected_address.3,
            expected_address.4,
            expected_address.5,
        ),
        ServicingSource::ProviderOverride => (
            |r| r.provider_override.servicing_provider_override_last_name.clone(),
            |r| r.provider_override.servicing_provider_override_npi.clone(),
            |r| r.provider_override.servicing_provider_override_address_street.clone(),
            |r| r.provider_override.servicing_provider_override_city.clone(),
            |r| r.provider_override.servicing_provider_override_state.clone(),
            |r| r.provider_override.servicing_provider_override_zip_code.clone(),
        ),
        ServicingSource::PayerSwitch => (
            |r| r.payer_switch.servicing_provider_name.clone(),
            |r| r.payer_switch.servicing_provider_npi.clone(),
            |r| r.payer_switch.servicing_provider_address_street.clone(),
            |r| r.payer_switch.servicing_provider_address_city.clone(),
            |r| r.payer_switch.servicing_provider_address_state.clone(),
            |r| r.payer_switch.servicing_provider_address_zip_code.clone(),
        ),
    };

    let mut fields = vec![
        assert(
            "service_facility.name",
            "Servicing Provider Name",
            |r| r.actual.service_facility_location.last_name_or_organization_name.clone(),
            name,
            Comparison::Required,
        ),
        assert(
            "service_facility.npi",
            "Servicing Provider Npi",
            |r| r.actual.service_facility_location.npi.clone(),
            npi,
            Comparison::Blankable,
        ),
    ];
    if source != ServicingSource::PayerSwitch {
        fields.push(assert(
            "service_facility.entity_type",
            "Servicing Provider Entity Type Code",
            |r| r.actual.service_facility_location.entity_type.map(|code| code.to_string()),
            |r| Some(r.expected.servicing_provider_entity_type_code.to_string()),
            Comparison::Required,
        ));
    }
    fields.extend([
        assert(
            "service_facility.address1",
            "Servicing Provider Address (Street)",
            |r| r.actual.service_facility_location.address1.clone(),
            street,
            Comparison::Required,
        ),
        assert(
            "service_facility.city",
            "Servicing Provider Address (City)",
            |r| r.actual.service_facility_location.city.clone(),
            city,
            Comparison::Required,
        ),
        assert(
            "service_facility.state",
            "Servicing Provider Address (State)",
            |r| r.actual.service_facility_location.state.clone(),
            state,
            Comparison::Required,
        ),
        assert(
            "service_facility.zip_code",
            "Servicing Provider Address (ZipCode)",
            |r| r.actual.service_facility_location.zip_code.clone(),
            zip,
            Comparison::ZipPrefix,
        ),
    ]);
    fields
}

/// Expected admin code, quantity and charge against the claim line for that code.
pub fn billing_code() -> Vec<FieldAssertion> {
    vec![
        assert(
            "admin_code.code",
            "Admin CPT Code",
            |r| Some(r.actual.service_code(&r.billing.code)),
            |r| Some(r.billing.code.clone()),
            Comparison::Required,
        ),
        assert(
            "admin_code.quantity",
            "Admin CPT Quantity",
            |r| Some(r.actual.service_quantity(&r.billing.code)),
            |r| Some(r.billing.quantity.clone()),
            Comparison::Required,
        ),
        assert(
            "admin_code.charge",
            "Admin CPT Billed Amount",
            |r| Some(r.actual.service_charge(&r.billing.code)),
            |r| Some(r.billing.charge.clone()),
            Comparison::Required,
        ),
    ]
}

pub fn well_visit_diagnosis() -> LineAssertion {
    LineAssertion {
        field: "diagnosis_code",
        subject: "Primary diagnosis code",
        actual: |line| line.actual_diagnosis_code.clone(),
        expected: |line, record| {
            if is_pediatric(record) {
                Some(WELL_CHILD_DIAGNOSIS.to_string())
            } else {
                line.expected_diagnosis_code.clone()
            }
        },
    }
}

pub fn ndc() -> LineAssertion {
    LineAssertion {
        field: "ndc",
        subject: "NDC code",
        actual: |line| line.actual_ndc.clone(),
        expected: |line, _| {
            Some(format!(
                "{NDC_QUALIFIER}{}",
                line.expected_ndc.as_deref().unwrap_or_default()
            ))
        },
    }
}

pub fn rx_number() -> LineAssertion {
    LineAssertion {
        field: "rx_number",
        subject: "RxNumber",
        actual: |line| line.actual_rx.clone(),
        expected: |line, _| line.expected_rx.clone(),
    }
}
