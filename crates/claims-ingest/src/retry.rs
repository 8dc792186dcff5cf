//! Retrying decorator over a [`DataSource`].
//!
//! Every fetch is attempted up to `max_retries + 1` times with a constant
//! delay between attempts. Any [`SourceError`] counts as transient. When the
//! budget runs out the last error is surfaced as
//! [`ClaimsError::DataSourceExhausted`], which aborts the scenario.

use claims_model::{
    BillableClaim, ClaimsError, ExpectedReferenceData, ExpectedServiceLine, PayerSwitchOverride,
    ProviderOverride, Result, Scenario,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::SourceError;
use crate::sleeper::{RealSleeper, Sleeper};
use crate::source::DataSource;

pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_DELAY_SECS: u64 = 3;

/// Retry budget, read from the `[retry]` table of the run configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Constant delay between attempts.
    pub delay_secs: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            delay_secs: DEFAULT_DELAY_SECS,
        }
    }
}

impl RetryPolicy {
    pub fn attempts(self) -> u32 {
        self.max_retries.saturating_add(1)
    }
}

pub struct RetryingSource<S, Z = RealSleeper> {
    inner: S,
    sleeper: Z,
    policy: RetryPolicy,
}

impl<S: DataSource> RetryingSource<S, RealSleeper> {
    pub fn new(inner: S, policy: RetryPolicy) -> Self {
        Self::with_sleeper(inner, policy, RealSleeper::new())
    }
}

impl<S: DataSource, Z: Sleeper> RetryingSource<S, Z> {
    pub fn with_sleeper(inner: S, policy: RetryPolicy, sleeper: Z) -> Self {
        Self {
            inner,
            sleeper,
            policy,
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn sleeper(&self) -> &Z {
        &self.sleeper
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    fn with_retries<T>(
        &self,
        operation: &str,
        mut fetch: impl FnMut() -> std::result::Result<T, SourceError>,
    ) -> Result<T> {
        let attempts = self.policy.attempts();
        let mut attempt = 0;
        let mut last_error = None;

        while attempt < attempts {
            attempt += 1;
            match fetch() {
                Ok(value) => {
                    if attempt > 1 {
                        debug!(operation, attempt, "fetch recovered after retry");
                    }
                    return Ok(value);
                }
                Err(error) => {
                    warn!(operation, attempt, attempts, %error, "fetch failed");
                    last_error = Some(error);
                    if attempt < attempts {
                        self.sleeper.sleep_sec(self.policy.delay_secs);
                    }
                }
            }
        }

        Err(ClaimsError::DataSourceExhausted {
            operation: operation.to_string(),
            attempts,
            last_error: last_error
                .map(|error| error.to_string())
                .unwrap_or_else(|| "no attempt was made".to_string()),
        })
    }

    pub fn fetch_scenarios(&self, filing_rule: &str) -> Result<Vec<Scenario>> {
        self.with_retries("fetch_scenarios", || self.inner.fetch_scenarios(filing_rule))
    }

    pub fn fetch_expected_reference(&self, claim_ids: &[i64]) -> Result<Vec<ExpectedReferenceData>> {
        self.with_retries("fetch_expected_reference", || {
            self.inner.fetch_expected_reference(claim_ids)
        })
    }

    /// Absent overrides are a normal answer and are not retried.
    pub fn fetch_provider_override(&self, claim_id: i64) -> Result<Option<ProviderOverride>> {
        self.with_retries("fetch_provider_override", || {
            self.inner.fetch_provider_override(claim_id)
        })
    }

    pub fn fetch_payer_switch_override(
        &self,
        claim_id: i64,
    ) -> Result<Option<PayerSwitchOverride>> {
        self.with_retries("fetch_payer_switch_override", || {
            self.inner.fetch_payer_switch_override(claim_id)
        })
    }

    pub fn fetch_service_lines(&self, claim_id: i64) -> Result<Vec<ExpectedServiceLine>> {
        self.with_retries("fetch_service_lines", || self.inner.fetch_service_lines(claim_id))
    }

    /// A message that has not been generated yet is retried like a failure.
    ///
    /// Exhausting the budget on a missing message yields
    /// [`ClaimsError::MissingClaimMessage`].
    pub fn fetch_raw_claim_message(&self, claim_id: i64) -> Result<String> {
        let mut missing = false;
        let message = self.with_retries("fetch_raw_claim_message", || {
            match self.inner.fetch_raw_claim_message(claim_id) {
                Ok(Some(message)) => {
                    missing = false;
                    Ok(message)
                }
                Ok(None) => {
                    missing = true;
                    Err(SourceError::NotFound {
                        what: format!("claim message {claim_id}"),
                    })
                }
                Err(error) => {
                    missing = false;
                    Err(error)
                }
            }
        });
        message.map_err(|error| {
            if missing {
                ClaimsError::MissingClaimMessage { claim_id }
            } else {
                error
            }
        })
    }

    pub fn fetch_billable_claims(&self) -> Result<Vec<BillableClaim>> {
        self.with_retries("fetch_billable_claims", || self.inner.fetch_billable_claims())
    }
}
