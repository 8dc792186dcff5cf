use serde::{Deserialize, Serialize};

use crate::billing::BillingCodeResult;
use crate::claim::ParsedClaim;
use crate::overrides::{PayerSwitchOverride, ProviderOverride};
use crate::reference::ExpectedReferenceData;

/// Actual vs expected values for one billed product line, joined by code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceLineComparison {
    pub code: String,
    pub expected_ndc: Option<String>,
    pub actual_ndc: Option<String>,
    pub expected_rx: Option<String>,
    pub actual_rx: Option<String>,
    pub expected_diagnosis_code: Option<String>,
    pub actual_diagnosis_code: Option<String>,
}

/// Unified actual-vs-expected record evaluated by a validation strategy.
///
/// Built once per scenario run and read-only afterwards. The override records
/// are already merged with expected-data fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRecord {
    pub actual: ParsedClaim,
    pub expected: ExpectedReferenceData,
    pub provider_override: ProviderOverride,
    pub payer_switch: PayerSwitchOverride,
    pub billing: BillingCodeResult,
    pub service_lines: Vec<ServiceLineComparison>,
}

impl ComparisonRecord {
    pub fn claim_id(&self) -> i64 {
        self.expected.consent_form_id
    }
}
