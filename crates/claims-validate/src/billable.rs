//! Billable-claim gate: whether a claim may be gathered for nightly billing.

use claims_model::{BillableClaim, Violation};

/// Claim action: hold the claim.
pub const HOLD_CLAIM_ACTION: i32 = 4;
/// Claim action: none assigned.
pub const NO_CLAIM_ACTION: i32 = 0;
pub const PENDING_COMPENSATION: &str = "Pending";

/// Exception level that blocks billing outright.
pub const CRITICAL_LEVEL: i32 = 3;
pub const FORCEABLE_LEVEL: i32 = 1;
pub const SUPERFORCEABLE_LEVEL: i32 = 2;

const SUPERFORCEABLE_ACTIONS: &[i32] = &[1, 2, 6, 8];
const FORCEABLE_ONLY_ACTIONS: &[i32] = &[3, 5];

pub fn has_superforceable_action(claim: &BillableClaim) -> bool {
    SUPERFORCEABLE_ACTIONS.contains(&claim.claim_action_id)
}

pub fn has_forceable_action(claim: &BillableClaim) -> bool {
    has_superforceable_action(claim) || FORCEABLE_ONLY_ACTIONS.contains(&claim.claim_action_id)
}

struct GateRule {
    field: &'static str,
    message: &'static str,
    /// `None` when the rule does not apply to this claim.
    passes: fn(&BillableClaim) -> Option<bool>,
    actual: fn(&BillableClaim) -> String,
}

const GATE_RULES: &[GateRule] = &[
    GateRule {
        field: "consent_form_exception_id",
        message: "Claim should not be voided.",
        passes: |claim| Some(claim.consent_form_exception_id == 0),
        actual: |claim| claim.consent_form_exception_id.to_string(),
    },
    GateRule {
        field: "claim_payment_mode",
        message: "Claim Payment Mode should be Insurance Pay.",
        passes: |claim| Some(claim.claim_payment_mode == 0),
        actual: |claim| claim.claim_payment_mode.to_string(),
    },
    GateRule {
        field: "compensation_status",
        message: "Claim should not have a Compensation Status of Pending.",
        passes: |claim| Some(claim.compensation_status.as_deref() != Some(PENDING_COMPENSATION)),
        actual: |claim| claim.compensation_status.clone().unwrap_or_default(),
    },
    GateRule {
        field: "is_test_partner",
        message: "Claim should not belong to a Test Partner.",
        passes: |claim| Some(!claim.is_test_partner),
        actual: |claim| claim.is_test_partner.to_string(),
    },
    GateRule {
        field: "claim_action_id",
        message: "Claim Action should not equal Hold Claim.",
        passes: |claim| Some(claim.claim_action_id != HOLD_CLAIM_ACTION),
        actual: |claim| claim.claim_action_id.to_string(),
    },
    GateRule {
        field: "is_in_review",
        message: "Claim cannot be in an In Review state.",
        passes: |claim| Some(!claim.is_in_review),
        actual: |claim| claim.is_in_review.to_string(),
    },
    GateRule {
        field: "product_count",
        message: "Claim must contain at least one product.",
        passes: |claim| Some(claim.product_count != 0),
        actual: |claim| claim.product_count.to_string(),
    },
    GateRule {
        field: "validation_level",
        message: "Claim cannot have any 'Critical' exceptions.",
        passes: |claim| Some(claim.validation_level != CRITICAL_LEVEL),
        actual: |claim| claim.validation_level.to_string(),
    },
    GateRule {
        field: "validation_level",
        message: "If claim has no Claim Action assigned, the Validation Level of any exceptions should be zero.",
        passes: |claim| {
            (claim.claim_action_id == NO_CLAIM_ACTION).then_some(claim.validation_level == 0)
        },
        actual: |claim| claim.validation_level.to_string(),
    },
    GateRule {
        field: "claim_action_id",
        message: "If a claim contains Forceable exceptions, the claim Action should be anything other than Hold Claim.",
        passes: |claim| {
            (claim.validation_level == FORCEABLE_LEVEL).then(|| has_forceable_action(claim))
        },
        actual: |claim| claim.claim_action_id.to_string(),
    },
    GateRule {
        field: "claim_action_id",
        message: "If a claim contains Superforceable exceptions, the claim Action should be anything other than Hold Claim.",
        passes: |claim| {
            (claim.validation_level == SUPERFORCEABLE_LEVEL)
                .then(|| has_superforceable_action(claim))
        },
        actual: |claim| claim.claim_action_id.to_string(),
    },
];

/// Evaluate every gate rule against `claim`.
///
/// An empty result means the claim is billable.
pub fn check_billable(claim: &BillableClaim) -> Vec<Violation> {
    GATE_RULES
        .iter()
        .filter(|rule| (rule.passes)(claim) == Some(false))
        .map(|rule| {
            Violation::with_message(rule.field, rule.message, "", (rule.actual)(claim))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean_claim() -> BillableClaim {
        BillableClaim {
            consent_form_id: 7001,
            claim_action_id: 1,
            product_count: 1,
            ..Default::default()
        }
    }

    fn messages(claim: &BillableClaim) -> Vec<String> {
        check_billable(claim)
            .into_iter()
            .map(|violation| violation.message)
            .collect()
    }

    #[test]
    fn clean_claim_is_billable() {
        assert!(check_billable(&clean_claim()).is_empty());
    }

    #[test]
    fn voided_claim_is_rejected() {
        let claim = BillableClaim {
            consent_form_exception_id: 12,
            ..clean_claim()
        };
        assert_eq!(messages(&claim), vec!["Claim should not be voided."]);
    }

    #[test]
    fn pending_compensation_is_rejected() {
        let claim = BillableClaim {
            compensation_status: Some("Pending".to_string()),
            ..clean_claim()
        };
        assert_eq!(
            messages(&claim),
            vec!["Claim should not have a Compensation Status of Pending."]
        );
        let paid = BillableClaim {
            compensation_status: Some("Paid".to_string()),
            ..clean_claim()
        };
        assert!(check_billable(&paid).is_empty());
    }

    #[test]
    fn held_claim_with_forceable_exception_fails_twice() {
        let claim = BillableClaim {
            claim_action_id: HOLD_CLAIM_ACTION,
            validation_level: FORCEABLE_LEVEL,
            ..clean_claim()
        };
        let messages = messages(&claim);
        assert_eq!(messages.len(), 2);
        assert!(messages[0].contains("Hold Claim"));
        assert!(messages[1].starts_with("If a claim contains Forceable"));
    }

    #[test]
    fn forceable_actions_include_superforceable() {
        for action in [1, 2, 3, 5, 6, 8] {
            let claim = BillableClaim {
                claim_action_id: action,
                validation_level: FORCEABLE_LEVEL,
                ..clean_claim()
            };
            assert!(check_billable(&claim).is_empty(), "action {action}");
        }
    }

    #[test]
    fn superforceable_requires_narrower_actions() {
        let claim = BillableClaim {
            claim_action_id: 3,
            validation_level: SUPERFORCEABLE_LEVEL,
            ..clean_claim()
        };
        assert_eq!(messages(&claim).len(), 1);
    }

    #[test]
    fn no_action_requires_clean_validation_level() {
        let claim = BillableClaim {
            claim_action_id: NO_CLAIM_ACTION,
            validation_level: CRITICAL_LEVEL,
            ..clean_claim()
        };
        assert_eq!(
            messages(&claim),
            vec![
                "Claim cannot have any 'Critical' exceptions.",
                "If claim has no Claim Action assigned, the Validation Level of any exceptions should be zero.",
            ]
        );
    }

    #[test]
    fn empty_claim_fails_product_count() {
        let claim = BillableClaim {
            product_count: 0,
            ..clean_claim()
        };
        assert_eq!(
            messages(&claim),
            vec!["Claim must contain at least one product."]
        );
    }
}
