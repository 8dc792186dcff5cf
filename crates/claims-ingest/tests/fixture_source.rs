//! Fixture-directory source behind the retrying decorator.

use std::fs;
use std::path::Path;

use claims_ingest::{
    ClaimParser, DataSource, Environment, FixtureSource, JsonClaimParser, MockSleeper,
    RetryPolicy, RetryingSource, RunConfig, SourceError,
};
use claims_model::{ClaimsError, ServiceType};
use tempfile::TempDir;

const SCENARIOS: &str = "\u{feff}consent_form_id,age_group,administration_pattern,antigen,dose_count,total_components,stock_type,pediatric_single_component_billing,filing_rule_name
7001,Adult,Single-Component,Influenza,1,1,Private,false,None
7002,Pediatric,Multi-Component,MMR,2,3,Vfc,true,UseGcodeAdminCPT
7003, Adult ,Single-Component,Hepatitis B,1,1,Private,,None
";

const EXPECTED: &str = r#"[
  {"consent_form_id": 7001, "member_id": "W12-345 678", "group_id": "G-1", "patient_first_name": "ANA"},
  {"consent_form_id": 7002, "member_id": "X9"}
]"#;

fn write(dir: &Path, name: &str, contents: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

fn fixture_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "scenarios.csv", SCENARIOS);
    write(dir.path(), "expected.json", EXPECTED);
    write(
        dir.path(),
        "service_lines.json",
        r#"[
          {"consent_form_id": 7001, "code": "90686", "ndc": "49281-0421-50", "service_type": "vaccine"},
          {"consent_form_id": 7001, "code": "90471", "service_type": "administration"},
          {"consent_form_id": 7002, "code": "90707", "service_type": "vaccine"}
        ]"#,
    );
    write(
        dir.path(),
        "provider_overrides.json",
        r#"[{"consent_form_id": 7001, "rendering_npi_switch_npi": "1999999999"}]"#,
    );
    write(
        dir.path(),
        "messages/7001.json",
        r#"{"claim_id": 7001, "date_of_service": "2025-10-01", "payer_name": "AETNA"}"#,
    );
    dir
}

fn retrying(dir: &TempDir) -> RetryingSource<FixtureSource, MockSleeper> {
    RetryingSource::with_sleeper(
        FixtureSource::new(dir.path()),
        RetryPolicy::default(),
        MockSleeper::new(),
    )
}

#[test]
fn scenarios_are_filtered_by_filing_rule() {
    let dir = fixture_dir();
    let source = FixtureSource::new(dir.path());

    let scenarios = source.fetch_scenarios("None").unwrap();
    assert_eq!(
        scenarios
            .iter()
            .map(|scenario| scenario.consent_form_id)
            .collect::<Vec<_>>(),
        vec![7001, 7003]
    );
    assert_eq!(scenarios[1].age_group, "Adult");
    assert!(!scenarios[1].pediatric_single_component_billing);

    let gcode = source.fetch_scenarios("UseGcodeAdminCPT").unwrap();
    assert_eq!(gcode.len(), 1);
    assert!(gcode[0].is_vfc_stock());
    assert!(gcode[0].pediatric_single_component_billing);
    assert_eq!(gcode[0].total_components, 3);
}

#[test]
fn expected_rows_are_sanitized_on_load() {
    let dir = fixture_dir();
    let source = FixtureSource::new(dir.path());
    let rows = source.fetch_expected_reference(&[7001]).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].member_id.as_deref(), Some("W12345678"));
    assert_eq!(rows[0].group_id.as_deref(), Some("G1"));
}

#[test]
fn optional_files_read_as_empty() {
    let dir = fixture_dir();
    let source = FixtureSource::new(dir.path());
    assert_eq!(source.fetch_payer_switch_override(7001).unwrap(), None);
    assert!(source.fetch_billable_claims().unwrap().is_empty());
    assert!(source.fetch_provider_override(7001).unwrap().is_some());
    assert_eq!(source.fetch_provider_override(7002).unwrap(), None);
}

#[test]
fn service_lines_for_one_claim() {
    let dir = fixture_dir();
    let source = FixtureSource::new(dir.path());
    let lines = source.fetch_service_lines(7001).unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1].service_type, ServiceType::Administration);
}

#[test]
fn claim_message_parses_through_retrying_source() {
    let dir = fixture_dir();
    let source = retrying(&dir);
    let raw = source.fetch_raw_claim_message(7001).unwrap();
    let claim = JsonClaimParser.parse(7001, &raw).unwrap();
    assert_eq!(claim.claim_id, 7001);
    assert_eq!(source.sleeper().calls(), 0);
}

#[test]
fn missing_message_exhausts_retries() {
    let dir = fixture_dir();
    let source = retrying(&dir);
    assert_eq!(
        source.fetch_raw_claim_message(7002).unwrap_err(),
        ClaimsError::MissingClaimMessage { claim_id: 7002 }
    );
    assert_eq!(source.sleeper().calls(), 3);
}

#[test]
fn malformed_file_aborts_after_retries() {
    let dir = fixture_dir();
    write(dir.path(), "expected.json", "{not json");
    let direct = FixtureSource::new(dir.path()).fetch_expected_reference(&[7001]);
    assert!(matches!(direct, Err(SourceError::Json { .. })));

    let error = retrying(&dir).fetch_expected_reference(&[7001]).unwrap_err();
    assert!(matches!(
        error,
        ClaimsError::DataSourceExhausted { attempts: 4, .. }
    ));
}

#[test]
fn run_config_resolves_relative_fixture_dirs() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "claimcheck.toml",
        "[qa]\nfixtures = \"qa\"\n\n[stg]\nfixtures = \"/srv/stg\"\n\n[retry]\ndelay_secs = 0\n",
    );
    let config = RunConfig::load(&dir.path().join("claimcheck.toml")).unwrap();
    assert_eq!(
        config.environment(Environment::Qa).unwrap().fixtures,
        dir.path().join("qa")
    );
    assert_eq!(
        config.environment(Environment::from_name("staging")).unwrap().fixtures,
        Path::new("/srv/stg")
    );
    assert_eq!(config.retry.max_retries, 3);
    assert_eq!(config.retry.delay_secs, 0);
}

#[test]
fn invalid_config_is_a_toml_error() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "claimcheck.toml", "[qa\n");
    let error = RunConfig::load(&dir.path().join("claimcheck.toml")).unwrap_err();
    assert!(matches!(error, SourceError::Toml { .. }));
}
