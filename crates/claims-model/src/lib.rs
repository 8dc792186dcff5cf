pub mod billable;
pub mod billing;
pub mod claim;
pub mod comparison;
pub mod error;
pub mod filing_rule;
pub mod overrides;
pub mod reference;
pub mod scenario;
pub mod violation;

pub use billable::BillableClaim;
pub use billing::BillingCodeResult;
pub use claim::{ClaimAddress, ClaimEntity, ClaimPatient, ClaimService, ParsedClaim};
pub use comparison::{ComparisonRecord, ServiceLineComparison};
pub use error::{ClaimsError, Result};
pub use filing_rule::{FilingRule, NO_FILING_RULE};
pub use overrides::{PayerSwitchOverride, ProviderOverride};
pub use reference::{ExpectedReferenceData, ExpectedServiceLine, ServiceType};
pub use scenario::Scenario;
pub use violation::{CaseOutcome, CaseReport, RunReport, Violation};
