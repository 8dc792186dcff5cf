use std::time::Instant;

use anyhow::{Context, Result, bail};
use claims_core::{DEFAULT_MATRIX, ScenarioPipeline};
use claims_ingest::{
    DataSource, Environment, FixtureSource, JsonClaimParser, RetryPolicy, RetryingSource,
    RunConfig, Sleeper,
};
use claims_model::RunReport;
use claims_validate::{check_billable, default_registry};
use tracing::{debug, info, info_span, warn};

use crate::cli::{RunArgs, SourceArgs};
use crate::logging::redact_value;
use crate::summary::rules_table;
use crate::types::{GateEntry, GateReport};

/// Build the retrying fixture source selected by `--config`/`--env` or
/// `--fixtures`.
pub fn open_source(args: &SourceArgs) -> Result<RetryingSource<FixtureSource>> {
    if let Some(path) = &args.config {
        let config = RunConfig::load(path)
            .with_context(|| format!("load run configuration {}", path.display()))?;
        let environment = Environment::from_name(&args.env);
        let selected = config
            .environment(environment)
            .with_context(|| format!("select environment {environment}"))?;
        info!(
            environment = %environment,
            fixtures = %selected.fixtures.display(),
            "using configured data source"
        );
        Ok(RetryingSource::new(
            FixtureSource::new(selected.fixtures.clone()),
            config.retry,
        ))
    } else if let Some(dir) = &args.fixtures {
        info!(fixtures = %dir.display(), "using fixture directory");
        Ok(RetryingSource::new(
            FixtureSource::new(dir.clone()),
            RetryPolicy::default(),
        ))
    } else {
        bail!("either --config or --fixtures is required")
    }
}

pub fn run_matrix(args: &RunArgs) -> Result<RunReport> {
    let span = info_span!("run", filing_rule = %args.filing_rule);
    let _guard = span.enter();
    let source = open_source(&args.source)?;
    Ok(run_cases(&source, &args.filing_rule))
}

/// Run the default matrix for `filing_rule` against `source`.
pub fn run_cases<S: DataSource, Z: Sleeper>(
    source: &RetryingSource<S, Z>,
    filing_rule: &str,
) -> RunReport {
    let registry = default_registry();
    if registry.get(filing_rule).is_err() {
        warn!(filing_rule, "filing rule has no registered validator");
    }
    let start = Instant::now();
    let pipeline = ScenarioPipeline::new(source, &JsonClaimParser, registry, filing_rule);
    let report = pipeline.run_matrix(&DEFAULT_MATRIX);
    for case in &report.cases {
        for violation in case.outcome.violations() {
            debug!(
                claim_id = case.claim_id,
                field = %violation.field,
                expected = redact_value(&violation.expected),
                actual = redact_value(&violation.actual),
                "violation detail"
            );
        }
    }
    info!(
        filing_rule,
        cases = report.cases.len(),
        duration_ms = start.elapsed().as_millis(),
        "run complete"
    );
    report
}

pub fn run_gate(args: &SourceArgs) -> Result<GateReport> {
    let span = info_span!("gate");
    let _guard = span.enter();
    let source = open_source(args)?;
    gate_claims(&source)
}

/// Evaluate the billable-claim gate over every billable claim.
pub fn gate_claims<S: DataSource, Z: Sleeper>(source: &RetryingSource<S, Z>) -> Result<GateReport> {
    let claims = source
        .fetch_billable_claims()
        .context("fetch billable claims")?;
    let report = GateReport {
        claims: claims
            .iter()
            .map(|claim| GateEntry {
                claim_id: claim.consent_form_id,
                violations: check_billable(claim),
            })
            .collect(),
    };
    info!(
        claims = report.claims.len(),
        rejected = report.rejected_count(),
        "gate complete"
    );
    Ok(report)
}

pub fn run_rules() {
    println!("{}", rules_table(default_registry()));
}
