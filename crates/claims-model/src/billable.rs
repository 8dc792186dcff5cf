use serde::{Deserialize, Serialize};

/// Billing state of a claim as seen by the nightly billable-claims gather.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BillableClaim {
    pub consent_form_id: i64,
    /// Non-zero when the claim was voided.
    pub consent_form_exception_id: i64,
    /// 0 = insurance pay.
    pub claim_payment_mode: i32,
    pub compensation_status: Option<String>,
    pub is_test_partner: bool,
    /// 0 = no action assigned, 4 = hold claim.
    pub claim_action_id: i32,
    pub is_in_review: bool,
    pub product_count: i32,
    /// Highest exception level: 1 forceable, 2 superforceable, 3 critical.
    pub validation_level: i32,
}
