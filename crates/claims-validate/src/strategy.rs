//! Validation strategies: ordered check lists composed from field groups.

use claims_model::{ComparisonRecord, FilingRule, Violation};

use crate::assertion::{Check, FieldAssertion, evaluate_checks};
use crate::fields::{self, RenderingSource, ServicingSource};

/// A fixed, ordered list of checks selected by filing rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Every claim field against the reference data, plus the admin code.
    Standard,
    BillingCodeOnly,
    AetnaFlPeds,
    BillingProviderOverride,
    RenderingNpiSwitch,
    RenderingProviderOverride,
    FacilityRenderingProvider,
    ServiceLocationOverride,
    RemoveServiceFacilityNpi,
    PayerSwitch,
    RequireGroupId,
    WellVisitDiagnosis,
    IncludeNdc,
    IncludeRx,
}

impl Strategy {
    pub fn for_rule(rule: FilingRule) -> Self {
        match rule {
            FilingRule::AetnaFlPeds => Self::AetnaFlPeds,
            FilingRule::BcbsKsComponent
            | FilingRule::BcbsScComponent
            | FilingRule::ExcludeAdminCodesForVfcClaims
            | FilingRule::ExcludeAdultAdminCodes
            | FilingRule::ExcludePediatricAdminCodes
            | FilingRule::KaiserPreventGCodes
            | FilingRule::LarcNexplanonIudInsertionCode
            | FilingRule::MedicareCodingOver65
            | FilingRule::NoAddOnCpt
            | FilingRule::OverrideAdminCpts
            | FilingRule::SwitchVfcPediatricAdminCodesForAdultCodes
            | FilingRule::UseAdultAdminCodesForAllVaccines
            | FilingRule::UseGcodeAdminCpt => Self::BillingCodeOnly,
            FilingRule::BillingProviderInformationOverride => Self::BillingProviderOverride,
            FilingRule::IpaBilling
            | FilingRule::BcbsTxHmoSwitchPayerEntity
            | FilingRule::MemorialHealthSwitchPayerEntity => Self::PayerSwitch,
            FilingRule::FacilityBasedRenderingProvider => Self::FacilityRenderingProvider,
            FilingRule::IncludeNdc => Self::IncludeNdc,
            FilingRule::IncludeRxInProductCpts => Self::IncludeRx,
            FilingRule::RemoveServiceFacilityNpi => Self::RemoveServiceFacilityNpi,
            FilingRule::RenderingNpiSwitch => Self::RenderingNpiSwitch,
            FilingRule::RenderingProviderInformationOverride => Self::RenderingProviderOverride,
            FilingRule::RequireGroupId => Self::RequireGroupId,
            FilingRule::RequiresZ23AndZ00129DiagCodes => Self::WellVisitDiagnosis,
            FilingRule::ServiceLocationOverride => Self::ServiceLocationOverride,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::BillingCodeOnly => "BillingCodeOnly",
            Self::AetnaFlPeds => "AetnaFlPeds",
            Self::BillingProviderOverride => "BillingProviderOverride",
            Self::RenderingNpiSwitch => "RenderingNpiSwitch",
            Self::RenderingProviderOverride => "RenderingProviderOverride",
            Self::FacilityRenderingProvider => "FacilityRenderingProvider",
            Self::ServiceLocationOverride => "ServiceLocationOverride",
            Self::RemoveServiceFacilityNpi => "RemoveServiceFacilityNpi",
            Self::PayerSwitch => "PayerSwitch",
            Self::RequireGroupId => "RequireGroupId",
            Self::WellVisitDiagnosis => "WellVisitDiagnosis",
            Self::IncludeNdc => "IncludeNdc",
            Self::IncludeRx => "IncludeRx",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Standard => "patient, payer, providers, facility and admin code",
            Self::BillingCodeOnly => "admin code, quantity and charge",
            Self::AetnaFlPeds => "payer name, pediatric members billed to AETNA (PEDS FL)",
            Self::BillingProviderOverride => "billing provider from provider override",
            Self::RenderingNpiSwitch => "rendering provider from NPI switch",
            Self::RenderingProviderOverride => "rendering provider from provider override",
            Self::FacilityRenderingProvider => "rendering provider from facility provider",
            Self::ServiceLocationOverride => "service facility from provider override",
            Self::RemoveServiceFacilityNpi => "service facility without NPI",
            Self::PayerSwitch => "payer, billing provider and facility from payer switch",
            Self::RequireGroupId => "policy group id",
            Self::WellVisitDiagnosis => "Z00129 through age 18, Z23 after",
            Self::IncludeNdc => "NDC on every product line",
            Self::IncludeRx => "Rx number on every product line",
        }
    }

    /// The ordered check list for this strategy.
    pub fn checks(self) -> Vec<Check> {
        match self {
            Self::Standard => [
                fields::patient(),
                fields::billing_provider(),
                fields::claim_header(),
                fields::rendering_provider(RenderingSource::Expected),
                fields::servicing_provider(ServicingSource::Expected),
                fields::billing_code(),
            ]
            .into_iter()
            .flat_map(field_checks)
            .collect(),
            Self::BillingCodeOnly => field_checks(fields::billing_code()).collect(),
            Self::AetnaFlPeds => vec![fields::aetna_peds_payer_name().into()],
            Self::BillingProviderOverride => {
                field_checks(fields::billing_provider_override()).collect()
            }
            Self::RenderingNpiSwitch => {
                field_checks(fields::rendering_provider(RenderingSource::NpiSwitch)).collect()
            }
            Self::RenderingProviderOverride => {
                field_checks(fields::rendering_provider(RenderingSource::ProviderOverride))
                    .collect()
            }
            Self::FacilityRenderingProvider => {
                field_checks(fields::rendering_provider(RenderingSource::Facility)).collect()
            }
            Self::ServiceLocationOverride => {
                field_checks(fields::servicing_provider(ServicingSource::ProviderOverride))
                    .collect()
            }
            Self::RemoveServiceFacilityNpi => {
                std::iter::once(Check::Field(fields::place_of_service()))
                    .chain(field_checks(fields::servicing_provider(
                        ServicingSource::ExpectedWithoutNpi,
                    )))
                    .collect()
            }
            Self::PayerSwitch => std::iter::once(Check::Field(fields::switched_payer_name()))
                .chain(field_checks(fields::billing_provider_payer_switch()))
                .chain(field_checks(fields::servicing_provider(
                    ServicingSource::PayerSwitch,
                )))
                .collect(),
            Self::RequireGroupId => vec![fields::group_id().into()],
            Self::WellVisitDiagnosis => vec![fields::well_visit_diagnosis().into()],
            Self::IncludeNdc => vec![fields::ndc().into()],
            Self::IncludeRx => vec![fields::rx_number().into()],
        }
    }

    /// Evaluate every check and return all violations.
    pub fn evaluate(self, record: &ComparisonRecord) -> Vec<Violation> {
        evaluate_checks(&self.checks(), record)
    }
}

fn field_checks(group: Vec<FieldAssertion>) -> impl Iterator<Item = Check> {
    group.into_iter().map(Check::Field)
}
