//! End-to-end scenario runs over an in-memory data source.

use chrono::NaiveDate;
use claims_core::{DEFAULT_MATRIX, MatrixCase, ScenarioPipeline};
use claims_ingest::{
    DataSource, JsonClaimParser, MockSleeper, RetryPolicy, RetryingSource, SourceError,
};
use claims_model::{
    BillableClaim, CaseOutcome, ClaimAddress, ClaimEntity, ClaimPatient, ClaimService,
    ExpectedReferenceData, ExpectedServiceLine, ParsedClaim, PayerSwitchOverride,
    ProviderOverride, Scenario, ServiceType,
};
use claims_validate::default_registry;

const CLAIM_ID: i64 = 88001;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn some(value: &str) -> Option<String> {
    Some(value.to_string())
}

fn scenario(filing_rule: &str) -> Scenario {
    Scenario {
        consent_form_id: CLAIM_ID,
        age_group: "Adult".to_string(),
        administration_pattern: "Single-Component".to_string(),
        antigen: "Hepatitis B".to_string(),
        dose_count: 1,
        total_components: 1,
        stock_type: "Private".to_string(),
        pediatric_single_component_billing: false,
        filing_rule_name: filing_rule.to_string(),
    }
}

fn expected() -> ExpectedReferenceData {
    ExpectedReferenceData {
        consent_form_id: CLAIM_ID,
        patient_first_name: some("MAYA"),
        patient_last_name: some("ORTIZ"),
        patient_dob: Some(date(1980, 4, 12)),
        patient_gender: some("F"),
        patient_address_street: some("12 HARBOR ST"),
        patient_address_city: some("CHARLESTON"),
        patient_address_state: some("SC"),
        patient_address_zip_code: some("29401"),
        primary_insurance_name: some("Blue Cross SC"),
        member_id: some("ZXC123456"),
        group_id: some("GRP001"),
        relationship_to_insured: some("18"),
        payer_entity_id: 310,
        billing_provider_name: some("LOWCOUNTRY PEDIATRICS"),
        billing_provider_npi: some("1234567893"),
        billing_provider_ein: some("571234567"),
        billing_provider_entity_type_code: 2,
        billing_provider_taxonomy_code: some("208000000X"),
        billing_provider_address_street: some("400 KING ST"),
        billing_provider_address_city: some("CHARLESTON"),
        billing_provider_address_state: some("SC"),
        billing_provider_address_zip_code: some("29403"),
        place_of_service_code: some("11"),
        claim_filing_indicator_code: some("BL"),
        rendering_provider_first_name: some("JUNE"),
        rendering_provider_last_name: some("PARK"),
        rendering_provider_npi: some("1098765432"),
        rendering_provider_entity_type_code: 1,
        rendering_provider_taxonomy_code: None,
        servicing_provider_name: some("LOWCOUNTRY PEDIATRICS EAST"),
        servicing_provider_npi: some("1555555555"),
        servicing_provider_entity_type_code: 2,
        servicing_provider_address_street: some("9 MEETING ST"),
        servicing_provider_address_city: some("CHARLESTON"),
        servicing_provider_address_state: some("SC"),
        servicing_provider_address_zip_code: some("29401"),
    }
}

fn vaccine_line(code: &str, ndc: &str) -> ClaimService {
    ClaimService {
        code: code.to_string(),
        service_type: ServiceType::Vaccine,
        ndc: some(ndc),
        rx_number: some("88001"),
        diagnosis_code: some("Z23"),
        quantity: 1.0,
        charged_amount: 0.0,
    }
}

fn claim() -> ParsedClaim {
    ParsedClaim {
        claim_id: CLAIM_ID,
        date_of_service: date(2024, 10, 1),
        patient: ClaimPatient {
            first_name: some("MAYA"),
            last_name: some("ORTIZ"),
            date_of_birth: date(1980, 4, 12),
            sex: some("F"),
        },
        patient_address: ClaimAddress {
            address1: some("12 HARBOR ST"),
            city: some("CHARLESTON"),
            state: some("SC"),
            zip_code: some("294011234"),
        },
        payer_name: some("BLUE CROSS SC"),
        member_id: some("ZXC123456"),
        policy_group: some("GRP001"),
        patient_relationship_to_insured: some("18"),
        federal_tax_id_number: some("571234567"),
        place_of_service: some("11"),
        claim_filing_indicator_code: some("BL"),
        billing_provider: ClaimEntity {
            last_name_or_organization_name: some("LOWCOUNTRY PEDIATRICS"),
            npi: some("1234567893"),
            entity_type: Some(2),
            taxonomy_code: some("208000000X"),
            address1: some("400 KING ST"),
            city: some("CHARLESTON"),
            state: some("SC"),
            zip_code: some("294031000"),
            ..Default::default()
        },
        rendering_provider: ClaimEntity {
            first_name: some("JUNE"),
            last_name_or_organization_name: some("PARK"),
            npi: some("1098765432"),
            entity_type: Some(1),
            ..Default::default()
        },
        service_facility_location: ClaimEntity {
            last_name_or_organization_name: some("LOWCOUNTRY PEDIATRICS EAST"),
            npi: some("1555555555"),
            entity_type: Some(2),
            address1: some("9 MEETING ST"),
            city: some("CHARLESTON"),
            state: some("SC"),
            zip_code: some("29401"),
            ..Default::default()
        },
        services: vec![
            vaccine_line("90746", "N458160082111"),
            ClaimService {
                code: "90471".to_string(),
                service_type: ServiceType::Administration,
                quantity: 1.0,
                charged_amount: 56.0,
                ..Default::default()
            },
        ],
    }
}

/// Serves one claim, optionally with gaps or outages.
struct MemorySource {
    scenarios: Vec<Scenario>,
    expected: Vec<ExpectedReferenceData>,
    provider_override: Option<ProviderOverride>,
    message: Option<String>,
    service_lines: Vec<ExpectedServiceLine>,
    down: bool,
}

impl MemorySource {
    fn new(filing_rule: &str) -> Self {
        Self::with_claim(filing_rule, &claim())
    }

    fn with_claim(filing_rule: &str, claim: &ParsedClaim) -> Self {
        Self {
            scenarios: vec![scenario(filing_rule)],
            expected: vec![expected()],
            provider_override: None,
            message: Some(serde_json::to_string(claim).expect("serialize claim")),
            service_lines: vec![
                ExpectedServiceLine {
                    consent_form_id: CLAIM_ID,
                    code: "90746".to_string(),
                    ndc: some("58160082111"),
                    service_type: ServiceType::Vaccine,
                },
                ExpectedServiceLine {
                    consent_form_id: CLAIM_ID,
                    code: "90471".to_string(),
                    ndc: None,
                    service_type: ServiceType::Administration,
                },
            ],
            down: false,
        }
    }

    fn check(&self) -> Result<(), SourceError> {
        if self.down {
            Err(SourceError::Transient {
                message: "database unavailable".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

impl DataSource for MemorySource {
    fn fetch_scenarios(&self, filing_rule: &str) -> Result<Vec<Scenario>, SourceError> {
        self.check()?;
        Ok(self
            .scenarios
            .iter()
            .filter(|scenario| scenario.filing_rule_name == filing_rule)
            .cloned()
            .collect())
    }

    fn fetch_expected_reference(
        &self,
        claim_ids: &[i64],
    ) -> Result<Vec<ExpectedReferenceData>, SourceError> {
        Ok(self
            .expected
            .iter()
            .filter(|row| claim_ids.contains(&row.consent_form_id))
            .cloned()
            .collect())
    }

    fn fetch_provider_override(&self, _: i64) -> Result<Option<ProviderOverride>, SourceError> {
        Ok(self.provider_override.clone())
    }

    fn fetch_payer_switch_override(
        &self,
        _: i64,
    ) -> Result<Option<PayerSwitchOverride>, SourceError> {
        Ok(None)
    }

    fn fetch_service_lines(&self, _: i64) -> Result<Vec<ExpectedServiceLine>, SourceError> {
        Ok(self.service_lines.clone())
    }

    fn fetch_raw_claim_message(&self, _: i64) -> Result<Option<String>, SourceError> {
        Ok(self.message.clone())
    }

    fn fetch_billable_claims(&self) -> Result<Vec<BillableClaim>, SourceError> {
        Ok(Vec::new())
    }
}

fn retrying(source: MemorySource) -> RetryingSource<MemorySource, MockSleeper> {
    RetryingSource::with_sleeper(source, RetryPolicy::default(), MockSleeper::new())
}

fn run_first_case(source: &RetryingSource<MemorySource, MockSleeper>, rule: &str) -> CaseOutcome {
    let pipeline = ScenarioPipeline::new(source, &JsonClaimParser, default_registry(), rule);
    let scenarios = source.fetch_scenarios(rule).expect("scenarios");
    pipeline.run_case(&scenarios, &DEFAULT_MATRIX[0]).outcome
}

#[test]
fn matching_claim_passes_every_applicable_rule() {
    for rule in [
        "None",
        "UseGcodeAdminCPT",
        "MedicareCodingOver65",
        "UseAdultAdminCodesForAllVaccines",
        "AetnaFLPeds",
        "BillingProviderInformationOverride",
        "Rendering NPI Switch",
        "RenderingProviderInformationOverride",
        "FacilityBasedRenderingProvider",
        "ServiceLocationOverride",
        "IpaBilling",
        "RequireGroupID",
        "RequiresZ23AndZ00129DiagCodes",
        "IncludeNDC",
        "IncludeRxInProductCpts",
    ] {
        let source = retrying(MemorySource::new(rule));
        assert_eq!(run_first_case(&source, rule), CaseOutcome::Passed, "{rule}");
    }
}

#[test]
fn pipeline_is_idempotent() {
    let mut mismatched = claim();
    mismatched.member_id = some("ZXC000000");
    let source = retrying(MemorySource::with_claim("None", &mismatched));
    let pipeline = ScenarioPipeline::new(&source, &JsonClaimParser, default_registry(), "None");
    assert_eq!(
        pipeline.run_matrix(&DEFAULT_MATRIX),
        pipeline.run_matrix(&DEFAULT_MATRIX)
    );
}

#[test]
fn billing_provider_npi_mismatch_is_one_violation() {
    let mut mismatched = claim();
    mismatched.billing_provider.npi = some("1999999999");
    let source = retrying(MemorySource::with_claim("None", &mismatched));
    let outcome = run_first_case(&source, "None");
    let violations = outcome.violations();
    assert_eq!(violations.len(), 1);
    insta::assert_snapshot!(
        violations[0].message,
        @"Billing Provider NPI does not match. Expected value: 1234567893; Actual Value: 1999999999."
    );
}

#[test]
fn matrix_skips_cases_without_encounters() {
    let source = retrying(MemorySource::new("None"));
    let pipeline = ScenarioPipeline::new(&source, &JsonClaimParser, default_registry(), "None");
    let report = pipeline.run_matrix(&DEFAULT_MATRIX);
    assert_eq!(report.cases.len(), 38);
    assert_eq!(report.passed_count(), 1);
    assert_eq!(report.failed_count(), 0);
    assert_eq!(report.skipped_count(), 37);
    assert!(!report.has_failures());
    assert_eq!(report.cases[0].claim_id, Some(CLAIM_ID));
    assert_eq!(
        report.cases[2].outcome,
        CaseOutcome::Skipped {
            reason: "no test case found for Adult - Private COVID".to_string()
        }
    );
}

#[test]
fn unmapped_payer_is_skipped() {
    let mut memory = MemorySource::new("None");
    memory.expected.clear();
    let source = retrying(memory);
    assert_eq!(
        run_first_case(&source, "None"),
        CaseOutcome::Skipped {
            reason: "payer entity not mapped for claim 88001".to_string()
        }
    );
}

#[test]
fn unknown_rule_aborts() {
    let source = retrying(MemorySource::new("NotARealRule"));
    assert_eq!(
        run_first_case(&source, "NotARealRule"),
        CaseOutcome::Aborted {
            error: "validator NotARealRule not found".to_string()
        }
    );
}

#[test]
fn rate_table_gap_aborts() {
    let source = retrying(MemorySource::new("None"));
    let pipeline = ScenarioPipeline::new(&source, &JsonClaimParser, default_registry(), "None");
    let scenarios = source.fetch_scenarios("None").expect("scenarios");
    let case = MatrixCase {
        expected_code: "99999",
        ..DEFAULT_MATRIX[0]
    };
    let report = pipeline.run_case(&scenarios, &case);
    assert_eq!(
        report.outcome,
        CaseOutcome::Aborted {
            error: "admin code '99999' has no rate table entry for Adult - Single-Component"
                .to_string()
        }
    );
}

#[test]
fn missing_claim_message_aborts_after_retries() {
    let mut memory = MemorySource::new("None");
    memory.message = None;
    let source = retrying(memory);
    assert_eq!(
        run_first_case(&source, "None"),
        CaseOutcome::Aborted {
            error: "claim 88001: no claim message available".to_string()
        }
    );
    assert_eq!(source.sleeper().calls(), 3);
}

#[test]
fn unreachable_source_aborts_every_case() {
    let mut memory = MemorySource::new("None");
    memory.down = true;
    let source = retrying(memory);
    let pipeline = ScenarioPipeline::new(&source, &JsonClaimParser, default_registry(), "None");
    let report = pipeline.run_matrix(&DEFAULT_MATRIX);
    assert_eq!(report.aborted_count(), 38);
    assert!(report.has_failures());
    assert!(matches!(
        &report.cases[0].outcome,
        CaseOutcome::Aborted { error } if error.starts_with("fetch_scenarios failed after 4 attempt(s)")
    ));
}

#[test]
fn unmatched_vaccine_lines_are_ignored() {
    let mut extra = claim();
    extra.services.push(vaccine_line("90707", "N400006468100"));
    let source = retrying(MemorySource::with_claim("IncludeNDC", &extra));
    assert_eq!(run_first_case(&source, "IncludeNDC"), CaseOutcome::Passed);
}

#[test]
fn rendering_switch_uses_override_record() {
    let mut memory = MemorySource::new("Rendering NPI Switch");
    memory.provider_override = Some(ProviderOverride {
        consent_form_id: CLAIM_ID,
        rendering_npi_switch_npi: some("1777777777"),
        ..Default::default()
    });
    let source = retrying(memory);
    let outcome = run_first_case(&source, "Rendering NPI Switch");
    let fields: Vec<&str> = outcome
        .violations()
        .iter()
        .map(|violation| violation.field.as_str())
        .collect();
    assert_eq!(fields, vec!["rendering_provider.npi"]);
}
