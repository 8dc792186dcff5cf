//! Integration tests for the claimcheck command layer.

use std::path::PathBuf;

use clap::Parser;

use claims_cli::cli::{Cli, Command, SourceArgs};
use claims_cli::commands::{gate_claims, open_source, run_cases};
use claims_cli::summary::{case_table, gate_table, rules_table};
use claims_ingest::{FixtureSource, MockSleeper, RetryPolicy, RetryingSource};
use claims_model::CaseOutcome;
use claims_validate::default_registry;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../fixtures/qa")
}

fn fixture_source() -> RetryingSource<FixtureSource, MockSleeper> {
    RetryingSource::with_sleeper(
        FixtureSource::new(fixtures_dir()),
        RetryPolicy::default(),
        MockSleeper::new(),
    )
}

#[test]
fn parses_run_with_fixtures_and_rule() {
    let cli = Cli::try_parse_from([
        "claimcheck",
        "run",
        "--fixtures",
        "fixtures/qa",
        "--filing-rule",
        "UseGcodeAdminCPT",
    ])
    .unwrap();

    let Command::Run(args) = cli.command else {
        panic!("expected run command");
    };
    assert_eq!(args.filing_rule, "UseGcodeAdminCPT");
    assert_eq!(args.source.fixtures, Some(PathBuf::from("fixtures/qa")));
    assert_eq!(args.source.env, "qa");
}

#[test]
fn run_defaults_to_no_filing_rule() {
    let cli = Cli::try_parse_from(["claimcheck", "run", "--fixtures", "fixtures/qa"]).unwrap();
    let Command::Run(args) = cli.command else {
        panic!("expected run command");
    };
    assert_eq!(args.filing_rule, "None");
}

#[test]
fn config_conflicts_with_fixtures() {
    let result = Cli::try_parse_from([
        "claimcheck",
        "gate",
        "--config",
        "claimcheck.toml",
        "--fixtures",
        "fixtures/qa",
    ]);
    assert!(result.is_err());
}

#[test]
fn open_source_requires_a_location() {
    let args = SourceArgs {
        config: None,
        env: "qa".to_string(),
        fixtures: None,
    };
    let error = open_source(&args).err().unwrap();
    assert_eq!(error.to_string(), "either --config or --fixtures is required");
}

#[test]
fn open_source_reads_configured_environment() {
    let args = SourceArgs {
        config: Some(fixtures_dir().join("../claimcheck.toml")),
        env: "stg".to_string(),
        fixtures: None,
    };
    let source = open_source(&args).unwrap();
    assert!(source.inner().root().ends_with("qa"));
    assert_eq!(source.policy().max_retries, 3);
}

#[test]
fn sample_fixtures_pass_without_filing_rule() {
    let source = fixture_source();
    let report = run_cases(&source, "None");

    assert_eq!(report.cases.len(), 38);
    assert_eq!(report.passed_count(), 3);
    assert_eq!(report.failed_count(), 0);
    assert_eq!(report.aborted_count(), 0);
    assert_eq!(report.skipped_count(), 35);
    assert!(!report.has_failures());

    let medicare = report
        .cases
        .iter()
        .find(|case| case.claim_id == Some(7003))
        .unwrap();
    assert_eq!(
        medicare.outcome,
        CaseOutcome::Skipped {
            reason: "payer entity not mapped for claim 7003".to_string()
        }
    );
    assert_eq!(source.sleeper().calls(), 0);
}

#[test]
fn sample_fixtures_pass_gcode_rule() {
    let source = fixture_source();
    let report = run_cases(&source, "UseGcodeAdminCPT");

    assert_eq!(report.passed_count(), 1);
    let passed = report
        .cases
        .iter()
        .find(|case| case.outcome == CaseOutcome::Passed)
        .unwrap();
    assert_eq!(passed.claim_id, Some(7004));
}

#[test]
fn rule_without_scenarios_skips_every_case() {
    let source = fixture_source();
    let report = run_cases(&source, "IncludeNDC");

    assert_eq!(report.skipped_count(), 38);
    assert!(!report.has_failures());
}

#[test]
fn gate_reports_rejected_claims() {
    let source = fixture_source();
    let report = gate_claims(&source).unwrap();

    assert_eq!(report.claims.len(), 3);
    assert_eq!(report.billable_count(), 1);
    assert_eq!(report.rejected_count(), 2);
    assert!(report.has_failures());

    let held = report
        .claims
        .iter()
        .find(|entry| entry.claim_id == 7002)
        .unwrap();
    assert_eq!(held.violations.len(), 2);

    let rendered = gate_table(&report).to_string();
    assert!(rendered.contains("7004"));
}

#[test]
fn case_table_lists_every_case() {
    let source = fixture_source();
    let report = run_cases(&source, "None");
    let rendered = case_table(&report).to_string();
    assert!(rendered.contains("7001"));
    assert!(rendered.contains("7003"));
}

#[test]
fn rules_table_names_rules_and_strategies() {
    let rendered = rules_table(default_registry()).to_string();
    for name in ["None", "UseGcodeAdminCPT", "IncludeNDC", "Rendering NPI Switch"] {
        assert!(rendered.contains(name), "missing {name}");
    }
    assert!(rendered.contains("BillingCodeOnly"));
    assert!(rendered.contains("PayerSwitch"));
}
