//! Structured view of a generated insurance claim.
//!
//! Produced by a claim parser from the wire-format message and consumed
//! verbatim by the assembler and validators.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::reference::ServiceType;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClaimPatient {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: NaiveDate,
    pub sex: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClaimAddress {
    pub address1: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
}

/// A provider or facility loop on the claim (billing, rendering, service
/// facility location).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClaimEntity {
    pub last_name_or_organization_name: Option<String>,
    pub first_name: Option<String>,
    pub npi: Option<String>,
    pub entity_type: Option<i32>,
    pub taxonomy_code: Option<String>,
    pub address1: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
}

/// One billed service line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClaimService {
    /// Procedure code (CPT/HCPCS).
    pub code: String,
    pub service_type: ServiceType,
    pub ndc: Option<String>,
    pub rx_number: Option<String>,
    pub diagnosis_code: Option<String>,
    pub quantity: f64,
    pub charged_amount: f64,
}

impl ClaimService {
    /// Unit quantity rendered the way expected quantities are written.
    pub fn quantity_text(&self) -> String {
        if self.quantity.fract() == 0.0 {
            format!("{}", self.quantity as i64)
        } else {
            self.quantity.to_string()
        }
    }

    /// Charged amount with two decimal digits.
    pub fn charge_text(&self) -> String {
        format!("{:.2}", self.charged_amount)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsedClaim {
    pub claim_id: i64,
    pub date_of_service: NaiveDate,
    pub patient: ClaimPatient,
    pub patient_address: ClaimAddress,
    pub payer_name: Option<String>,
    pub member_id: Option<String>,
    pub policy_group: Option<String>,
    pub patient_relationship_to_insured: Option<String>,
    pub federal_tax_id_number: Option<String>,
    pub place_of_service: Option<String>,
    pub claim_filing_indicator_code: Option<String>,
    pub billing_provider: ClaimEntity,
    pub rendering_provider: ClaimEntity,
    pub service_facility_location: ClaimEntity,
    pub services: Vec<ClaimService>,
}

impl ParsedClaim {
    /// Patient age in whole months on the date of service.
    pub fn patient_age_in_months(&self) -> i32 {
        months_between(self.patient.date_of_birth, self.date_of_service)
    }

    /// First service line billed under `code`.
    pub fn service(&self, code: &str) -> Option<&ClaimService> {
        self.services.iter().find(|service| service.code == code)
    }

    /// The billed code if a line for it exists, otherwise empty.
    pub fn service_code(&self, code: &str) -> String {
        self.service(code)
            .map(|service| service.code.clone())
            .unwrap_or_default()
    }

    pub fn service_quantity(&self, code: &str) -> String {
        self.service(code)
            .map(ClaimService::quantity_text)
            .unwrap_or_default()
    }

    pub fn service_charge(&self, code: &str) -> String {
        self.service(code)
            .map(ClaimService::charge_text)
            .unwrap_or_default()
    }

    /// Service lines of a single kind.
    pub fn services_of_type(&self, service_type: ServiceType) -> Vec<ClaimService> {
        self.services
            .iter()
            .filter(|service| service.service_type == service_type)
            .cloned()
            .collect()
    }
}

/// Whole months from `start` to `end`, one less when the day of month has not
/// yet been reached.
pub fn months_between(start: NaiveDate, end: NaiveDate) -> i32 {
    let mut months = (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32;
    if end.day() < start.day() {
        months -= 1;
    }
    months
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn months_between_whole_months() {
        assert_eq!(months_between(date(2000, 1, 15), date(2019, 1, 15)), 228);
        assert_eq!(months_between(date(2000, 1, 15), date(2000, 3, 20)), 2);
    }

    #[test]
    fn months_between_rounds_down_before_day_of_month() {
        assert_eq!(months_between(date(2000, 1, 15), date(2019, 1, 14)), 227);
        assert_eq!(months_between(date(2000, 1, 31), date(2000, 2, 29)), 0);
    }

    #[test]
    fn service_helpers_render_quantity_and_charge() {
        let claim = ParsedClaim {
            services: vec![ClaimService {
                code: "90472".to_string(),
                service_type: ServiceType::Administration,
                quantity: 2.0,
                charged_amount: 76.0,
                ..Default::default()
            }],
            ..Default::default()
        };
        assert_eq!(claim.service_code("90472"), "90472");
        assert_eq!(claim.service_quantity("90472"), "2");
        assert_eq!(claim.service_charge("90472"), "76.00");
        assert_eq!(claim.service_code("90471"), "");
        assert_eq!(claim.service_charge("90471"), "");
    }
}
