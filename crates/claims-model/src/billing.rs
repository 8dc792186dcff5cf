use serde::{Deserialize, Serialize};

/// Expected administration billing code with its unit quantity and charge.
///
/// `quantity` is an integer-valued string and `charge` has exactly two
/// decimal digits. Both are empty when no administration code is billed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingCodeResult {
    pub code: String,
    pub quantity: String,
    pub charge: String,
}

impl BillingCodeResult {
    pub fn new(
        code: impl Into<String>,
        quantity: impl Into<String>,
        charge: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            quantity: quantity.into(),
            charge: charge.into(),
        }
    }

    /// A visit with no billable administration code.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }
}
