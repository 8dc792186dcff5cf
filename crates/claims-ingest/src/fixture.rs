//! Directory-backed data source.
//!
//! Layout of a fixture directory:
//!
//! ```text
//! scenarios.csv            one row per encounter
//! expected.json            expected reference rows
//! provider_overrides.json  optional
//! payer_switches.json      optional
//! service_lines.json       optional
//! billable_claims.json     optional
//! messages/<claim_id>.json generated claim messages
//! ```
//!
//! Files are read on every fetch, so a run always sees the current state of
//! the directory.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use claims_model::{
    BillableClaim, ExpectedReferenceData, ExpectedServiceLine, PayerSwitchOverride,
    ProviderOverride, Scenario,
};
use csv::ReaderBuilder;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::SourceError;
use crate::source::DataSource;

pub const SCENARIOS_FILE: &str = "scenarios.csv";
pub const EXPECTED_FILE: &str = "expected.json";
pub const PROVIDER_OVERRIDES_FILE: &str = "provider_overrides.json";
pub const PAYER_SWITCHES_FILE: &str = "payer_switches.json";
pub const SERVICE_LINES_FILE: &str = "service_lines.json";
pub const BILLABLE_CLAIMS_FILE: &str = "billable_claims.json";
pub const MESSAGES_DIR: &str = "messages";

#[derive(Debug, Clone)]
pub struct FixtureSource {
    root: PathBuf,
}

impl FixtureSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path(&self, file: &str) -> PathBuf {
        self.root.join(file)
    }

    fn message_path(&self, claim_id: i64) -> PathBuf {
        self.root.join(MESSAGES_DIR).join(format!("{claim_id}.json"))
    }
}

impl DataSource for FixtureSource {
    fn fetch_scenarios(&self, filing_rule: &str) -> Result<Vec<Scenario>, SourceError> {
        let path = self.path(SCENARIOS_FILE);
        let scenarios: Vec<Scenario> = read_csv_rows(&path)?
            .iter()
            .map(|row| scenario_from_row(row, &path))
            .filter(|scenario| {
                scenario
                    .as_ref()
                    .ok()
                    .is_none_or(|scenario| scenario.filing_rule_name == filing_rule)
            })
            .collect::<Result<_, _>>()?;
        debug!(filing_rule, count = scenarios.len(), "loaded scenarios");
        Ok(scenarios)
    }

    fn fetch_expected_reference(
        &self,
        claim_ids: &[i64],
    ) -> Result<Vec<ExpectedReferenceData>, SourceError> {
        let rows: Vec<ExpectedReferenceData> = read_json(&self.path(EXPECTED_FILE))?;
        Ok(rows
            .into_iter()
            .filter(|row| claim_ids.contains(&row.consent_form_id))
            .map(ExpectedReferenceData::sanitized)
            .collect())
    }

    fn fetch_provider_override(
        &self,
        claim_id: i64,
    ) -> Result<Option<ProviderOverride>, SourceError> {
        let rows: Vec<ProviderOverride> = read_optional_json(&self.path(PROVIDER_OVERRIDES_FILE))?;
        Ok(rows.into_iter().find(|row| row.consent_form_id == claim_id))
    }

    fn fetch_payer_switch_override(
        &self,
        claim_id: i64,
    ) -> Result<Option<PayerSwitchOverride>, SourceError> {
        let rows: Vec<PayerSwitchOverride> = read_optional_json(&self.path(PAYER_SWITCHES_FILE))?;
        Ok(rows.into_iter().find(|row| row.consent_form_id == claim_id))
    }

    fn fetch_service_lines(&self, claim_id: i64) -> Result<Vec<ExpectedServiceLine>, SourceError> {
        let rows: Vec<ExpectedServiceLine> = read_optional_json(&self.path(SERVICE_LINES_FILE))?;
        Ok(rows
            .into_iter()
            .filter(|row| row.consent_form_id == claim_id)
            .collect())
    }

    fn fetch_raw_claim_message(&self, claim_id: i64) -> Result<Option<String>, SourceError> {
        let path = self.message_path(claim_id);
        match fs::read_to_string(&path) {
            Ok(message) => Ok(Some(message)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(SourceError::io(path, error)),
        }
    }

    fn fetch_billable_claims(&self) -> Result<Vec<BillableClaim>, SourceError> {
        read_optional_json(&self.path(BILLABLE_CLAIMS_FILE))
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, SourceError> {
    let text = fs::read_to_string(path).map_err(|error| SourceError::io(path, error))?;
    serde_json::from_str(&text).map_err(|error| SourceError::json(path, error))
}

/// A missing file reads as an empty list.
fn read_optional_json<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, SourceError> {
    if path.exists() {
        read_json(path)
    } else {
        Ok(Vec::new())
    }
}

/// Read a CSV file into row maps keyed by header, trimming BOMs and
/// surrounding whitespace.
fn read_csv_rows(path: &Path) -> Result<Vec<BTreeMap<String, String>>, SourceError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|error| SourceError::csv(path, error.to_string()))?;

    let headers = reader
        .headers()
        .map_err(|error| SourceError::csv(path, error.to_string()))?
        .clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|error| SourceError::csv(path, error.to_string()))?;
        let mut row = BTreeMap::new();
        for (idx, value) in record.iter().enumerate() {
            let key = headers
                .get(idx)
                .unwrap_or("")
                .trim_matches('\u{feff}')
                .trim()
                .to_string();
            row.insert(key, value.trim().to_string());
        }
        rows.push(row);
    }
    Ok(rows)
}

fn get_field(row: &BTreeMap<String, String>, key: &str) -> String {
    row.get(key).cloned().unwrap_or_default()
}

fn parse_field<T: FromStr>(
    row: &BTreeMap<String, String>,
    key: &str,
    path: &Path,
) -> Result<T, SourceError> {
    let value = get_field(row, key);
    value
        .parse()
        .map_err(|_| SourceError::csv(path, format!("column {key}: invalid value '{value}'")))
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "y"
    )
}

fn scenario_from_row(row: &BTreeMap<String, String>, path: &Path) -> Result<Scenario, SourceError> {
    Ok(Scenario {
        consent_form_id: parse_field(row, "consent_form_id", path)?,
        age_group: get_field(row, "age_group"),
        administration_pattern: get_field(row, "administration_pattern"),
        antigen: get_field(row, "antigen"),
        dose_count: parse_field(row, "dose_count", path)?,
        total_components: parse_field(row, "total_components", path)?,
        stock_type: get_field(row, "stock_type"),
        pediatric_single_component_billing: parse_flag(&get_field(
            row,
            "pediatric_single_component_billing",
        )),
        filing_rule_name: get_field(row, "filing_rule_name"),
    })
}
