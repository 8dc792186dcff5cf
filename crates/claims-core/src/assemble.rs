//! Claim data assembly: one [`ComparisonRecord`] per scenario run.

use claims_billing::codes::IMMUNIZATION_DIAGNOSIS;
use claims_model::{
    BillingCodeResult, ClaimService, ComparisonRecord, ExpectedReferenceData, ExpectedServiceLine,
    ParsedClaim, PayerSwitchOverride, ProviderOverride, ServiceLineComparison,
};

use crate::merge::{merge_payer_switch, merge_provider_override};

/// Everything the assembler joins for one claim.
#[derive(Debug, Clone)]
pub struct AssemblyInput {
    pub actual: ParsedClaim,
    pub expected: ExpectedReferenceData,
    pub provider_override: Option<ProviderOverride>,
    pub payer_switch: Option<PayerSwitchOverride>,
    pub actual_services: Vec<ClaimService>,
    pub expected_services: Vec<ExpectedServiceLine>,
    pub billing: BillingCodeResult,
}

pub fn assemble(input: AssemblyInput) -> ComparisonRecord {
    let AssemblyInput {
        actual,
        expected,
        provider_override,
        payer_switch,
        actual_services,
        expected_services,
        billing,
    } = input;

    let service_lines = join_service_lines(&actual_services, &expected_services, &expected);
    ComparisonRecord {
        provider_override: merge_provider_override(provider_override, &expected),
        payer_switch: merge_payer_switch(payer_switch, &expected),
        actual,
        expected,
        billing,
        service_lines,
    }
}

/// Inner join on code. Lines present on only one side are dropped.
///
/// The expected Rx number is the claim id and the expected primary
/// diagnosis is the immunization encounter code.
pub fn join_service_lines(
    actual: &[ClaimService],
    expected: &[ExpectedServiceLine],
    reference: &ExpectedReferenceData,
) -> Vec<ServiceLineComparison> {
    let expected_rx = reference.consent_form_id.to_string();
    let expected_rx = expected_rx.as_str();
    actual
        .iter()
        .flat_map(move |line| {
            expected
                .iter()
                .filter(move |candidate| candidate.code == line.code)
                .map(move |candidate| ServiceLineComparison {
                    code: line.code.clone(),
                    expected_ndc: candidate.ndc.clone(),
                    actual_ndc: line.ndc.clone(),
                    expected_rx: Some(expected_rx.to_string()),
                    actual_rx: line.rx_number.clone(),
                    expected_diagnosis_code: Some(IMMUNIZATION_DIAGNOSIS.to_string()),
                    actual_diagnosis_code: line.diagnosis_code.clone(),
                })
        })
        .collect()
}
