//! Expected administration billing: the rate table and the payer filing-rule
//! overrides layered on top of it.

pub mod codes;
pub mod expected;
pub mod overrides;
pub mod rate_table;

pub use expected::{BillingRequest, resolve_expected_billing};
pub use overrides::{override_code, override_quantity_and_charge};
pub use rate_table::{compute_base_code, format_cents};
