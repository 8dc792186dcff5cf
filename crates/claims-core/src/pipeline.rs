//! Scenario pipeline: select encounters for a matrix case, fetch and parse
//! the claim, compute the expected billing triple, assemble and validate.

use claims_billing::{BillingRequest, resolve_expected_billing};
use claims_ingest::{ClaimParser, DataSource, RetryingSource, Sleeper};
use claims_model::{
    CaseOutcome, CaseReport, ExpectedServiceLine, Result, RunReport, Scenario, ServiceType,
};
use claims_validate::ValidatorRegistry;
use tracing::{debug, error, info, info_span, warn};

use crate::assemble::{AssemblyInput, assemble};
use crate::matrix::MatrixCase;

/// Everything one run needs besides the matrix itself.
pub struct ScenarioPipeline<'a, S, Z> {
    source: &'a RetryingSource<S, Z>,
    parser: &'a dyn ClaimParser,
    registry: &'a ValidatorRegistry,
    filing_rule: &'a str,
}

impl<'a, S: DataSource, Z: Sleeper> ScenarioPipeline<'a, S, Z> {
    pub fn new(
        source: &'a RetryingSource<S, Z>,
        parser: &'a dyn ClaimParser,
        registry: &'a ValidatorRegistry,
        filing_rule: &'a str,
    ) -> Self {
        Self {
            source,
            parser,
            registry,
            filing_rule,
        }
    }

    pub fn filing_rule(&self) -> &str {
        self.filing_rule
    }

    /// Run every case in order.
    ///
    /// When the scenario rows cannot be fetched at all, every case is
    /// reported as aborted with that error.
    pub fn run_matrix(&self, cases: &[MatrixCase]) -> RunReport {
        let mut report = RunReport::new(self.filing_rule);
        match self.source.fetch_scenarios(self.filing_rule) {
            Ok(scenarios) => {
                info!(
                    filing_rule = self.filing_rule,
                    scenarios = scenarios.len(),
                    cases = cases.len(),
                    "running test matrix"
                );
                for case in cases {
                    report.cases.push(self.run_case(&scenarios, case));
                }
            }
            Err(fetch_error) => {
                error!(filing_rule = self.filing_rule, error = %fetch_error, "scenario fetch failed");
                for case in cases {
                    report.cases.push(self.report(
                        case,
                        None,
                        CaseOutcome::Aborted {
                            error: fetch_error.to_string(),
                        },
                    ));
                }
            }
        }
        info!(
            passed = report.passed_count(),
            failed = report.failed_count(),
            skipped = report.skipped_count(),
            aborted = report.aborted_count(),
            "test matrix complete"
        );
        report
    }

    /// Execute one matrix case against the fetched scenario rows.
    pub fn run_case(&self, scenarios: &[Scenario], case: &MatrixCase) -> CaseReport {
        let span = info_span!("scenario", case = %case, filing_rule = self.filing_rule);
        let _guard = span.enter();

        let selected = case.select(scenarios);
        let Some(first) = selected.first() else {
            warn!("no test case found");
            return self.report(
                case,
                None,
                CaseOutcome::Skipped {
                    reason: format!(
                        "no test case found for {} - {}",
                        case.age_group, case.administration_pattern
                    ),
                },
            );
        };
        let claim_id = first.consent_form_id;

        match self.evaluate(case, &selected, claim_id) {
            Ok(Some(outcome)) => {
                match &outcome {
                    CaseOutcome::Failed { violations } => {
                        for violation in violations {
                            warn!(claim_id, field = %violation.field, "field mismatch");
                        }
                    }
                    _ => debug!(claim_id, "claim passed validation"),
                }
                self.report(case, Some(claim_id), outcome)
            }
            Ok(None) => {
                warn!(claim_id, "payer entity not mapped");
                self.report(
                    case,
                    Some(claim_id),
                    CaseOutcome::Skipped {
                        reason: format!("payer entity not mapped for claim {claim_id}"),
                    },
                )
            }
            Err(abort) => {
                error!(claim_id, error = %abort, "scenario aborted");
                self.report(
                    case,
                    Some(claim_id),
                    CaseOutcome::Aborted {
                        error: abort.to_string(),
                    },
                )
            }
        }
    }

    /// `Ok(None)` when the claim has no expected reference row for its payer.
    fn evaluate(
        &self,
        case: &MatrixCase,
        selected: &[Scenario],
        claim_id: i64,
    ) -> Result<Option<CaseOutcome>> {
        let claim_ids: Vec<i64> = selected
            .iter()
            .map(|scenario| scenario.consent_form_id)
            .collect();
        let expected_rows = self.source.fetch_expected_reference(&claim_ids)?;

        let raw = self.source.fetch_raw_claim_message(claim_id)?;
        let claim = self.parser.parse(claim_id, &raw)?;

        let claim_scenarios: Vec<Scenario> = selected
            .iter()
            .filter(|scenario| scenario.consent_form_id == claim_id)
            .cloned()
            .collect();

        let billing = resolve_expected_billing(
            &BillingRequest {
                filing_rule: self.filing_rule,
                age_group: case.age_group,
                administration_pattern: case.administration_pattern,
                matrix_code: case.expected_code,
            },
            &claim,
            &claim_scenarios,
        )?;
        debug!(
            claim_id,
            code = %billing.code,
            quantity = %billing.quantity,
            charge = %billing.charge,
            "expected billing resolved"
        );

        let Some(expected) = expected_rows
            .into_iter()
            .find(|row| row.consent_form_id == claim_id)
        else {
            return Ok(None);
        };

        let provider_override = self.source.fetch_provider_override(claim_id)?;
        let payer_switch = self.source.fetch_payer_switch_override(claim_id)?;
        let expected_services: Vec<ExpectedServiceLine> = self
            .source
            .fetch_service_lines(claim_id)?
            .into_iter()
            .filter(|line| line.service_type == ServiceType::Vaccine)
            .collect();
        let actual_services = claim.services_of_type(ServiceType::Vaccine);

        let record = assemble(AssemblyInput {
            actual: claim,
            expected,
            provider_override,
            payer_switch,
            actual_services,
            expected_services,
            billing,
        });

        let validator = self.registry.get(self.filing_rule)?;
        let violations = validator.evaluate(&record);
        Ok(Some(CaseOutcome::from_violations(violations)))
    }

    fn report(&self, case: &MatrixCase, claim_id: Option<i64>, outcome: CaseOutcome) -> CaseReport {
        CaseReport {
            case: case.to_string(),
            filing_rule: self.filing_rule.to_string(),
            claim_id,
            outcome,
        }
    }
}
