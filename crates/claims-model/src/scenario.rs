//! Scenario rows describing one real-world vaccination encounter.

use serde::{Deserialize, Serialize};

/// Stock type for program-funded (Vaccines for Children) inventory.
pub const VFC_STOCK: &str = "Vfc";

/// One encounter matched against the test matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Claim identifier (consent form id) of the encounter.
    pub consent_form_id: i64,
    /// Age group, e.g. "Adult", "Pediatric", "Medicare".
    pub age_group: String,
    /// Administration pattern, e.g. "Single-Component", "Private COVID".
    pub administration_pattern: String,
    pub antigen: String,
    pub dose_count: u32,
    pub total_components: u32,
    /// Inventory source, e.g. "Private" or "Vfc".
    pub stock_type: String,
    /// Feature flag: bill pediatric single-component doses with adult codes.
    #[serde(default)]
    pub pediatric_single_component_billing: bool,
    pub filing_rule_name: String,
}

impl Scenario {
    pub fn is_vfc_stock(&self) -> bool {
        self.stock_type == VFC_STOCK
    }
}

/// Returns true when any scenario row satisfies `predicate`.
pub fn any_scenario(scenarios: &[Scenario], predicate: impl Fn(&Scenario) -> bool) -> bool {
    scenarios.iter().any(predicate)
}
