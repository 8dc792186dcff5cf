//! The data-source seam.
//!
//! A [`DataSource`] returns read-only snapshots of scenario rows, expected
//! reference data, override records, expected service lines and raw claim
//! messages. Implementations never write.

use claims_model::{
    BillableClaim, ExpectedReferenceData, ExpectedServiceLine, PayerSwitchOverride,
    ProviderOverride, Scenario,
};

use crate::error::SourceError;

pub trait DataSource: Send + Sync {
    /// Scenario rows recorded under a filing rule (`"None"` for claims filed
    /// without one).
    fn fetch_scenarios(&self, filing_rule: &str) -> Result<Vec<Scenario>, SourceError>;

    /// Expected reference rows for the given claim ids.
    fn fetch_expected_reference(
        &self,
        claim_ids: &[i64],
    ) -> Result<Vec<ExpectedReferenceData>, SourceError>;

    fn fetch_provider_override(
        &self,
        claim_id: i64,
    ) -> Result<Option<ProviderOverride>, SourceError>;

    fn fetch_payer_switch_override(
        &self,
        claim_id: i64,
    ) -> Result<Option<PayerSwitchOverride>, SourceError>;

    fn fetch_service_lines(&self, claim_id: i64) -> Result<Vec<ExpectedServiceLine>, SourceError>;

    /// The generated claim message, `None` while it has not been produced.
    fn fetch_raw_claim_message(&self, claim_id: i64) -> Result<Option<String>, SourceError>;

    fn fetch_billable_claims(&self) -> Result<Vec<BillableClaim>, SourceError>;
}
