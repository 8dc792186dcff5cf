use claims_model::Violation;

/// Gate result for one billable claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateEntry {
    pub claim_id: i64,
    pub violations: Vec<Violation>,
}

impl GateEntry {
    pub fn is_billable(&self) -> bool {
        self.violations.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GateReport {
    pub claims: Vec<GateEntry>,
}

impl GateReport {
    pub fn billable_count(&self) -> usize {
        self.claims.iter().filter(|entry| entry.is_billable()).count()
    }

    pub fn rejected_count(&self) -> usize {
        self.claims.len() - self.billable_count()
    }

    pub fn has_failures(&self) -> bool {
        self.rejected_count() > 0
    }
}
