//! Catalogue of payer filing rules known to the engine.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Name used for the regression run that applies no filing rule.
pub const NO_FILING_RULE: &str = "None";

/// A named, payer-specific policy that changes the expected claim content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FilingRule {
    AetnaFlPeds,
    BcbsKsComponent,
    BcbsScComponent,
    BcbsTxHmoSwitchPayerEntity,
    BillingProviderInformationOverride,
    ExcludeAdminCodesForVfcClaims,
    ExcludeAdultAdminCodes,
    ExcludePediatricAdminCodes,
    FacilityBasedRenderingProvider,
    IncludeNdc,
    IncludeRxInProductCpts,
    IpaBilling,
    KaiserPreventGCodes,
    LarcNexplanonIudInsertionCode,
    MedicareCodingOver65,
    MemorialHealthSwitchPayerEntity,
    NoAddOnCpt,
    OverrideAdminCpts,
    RemoveServiceFacilityNpi,
    RenderingNpiSwitch,
    RenderingProviderInformationOverride,
    RequireGroupId,
    RequiresZ23AndZ00129DiagCodes,
    ServiceLocationOverride,
    SwitchVfcPediatricAdminCodesForAdultCodes,
    UseAdultAdminCodesForAllVaccines,
    UseGcodeAdminCpt,
}

impl FilingRule {
    pub const ALL: [FilingRule; 27] = [
        Self::AetnaFlPeds,
        Self::BcbsKsComponent,
        Self::BcbsScComponent,
        Self::BcbsTxHmoSwitchPayerEntity,
        Self::BillingProviderInformationOverride,
        Self::ExcludeAdminCodesForVfcClaims,
        Self::ExcludeAdultAdminCodes,
        Self::ExcludePediatricAdminCodes,
        Self::FacilityBasedRenderingProvider,
        Self::IncludeNdc,
        Self::IncludeRxInProductCpts,
        Self::IpaBilling,
        Self::KaiserPreventGCodes,
        Self::LarcNexplanonIudInsertionCode,
        Self::MedicareCodingOver65,
        Self::MemorialHealthSwitchPayerEntity,
        Self::NoAddOnCpt,
        Self::OverrideAdminCpts,
        Self::RemoveServiceFacilityNpi,
        Self::RenderingNpiSwitch,
        Self::RenderingProviderInformationOverride,
        Self::RequireGroupId,
        Self::RequiresZ23AndZ00129DiagCodes,
        Self::ServiceLocationOverride,
        Self::SwitchVfcPediatricAdminCodesForAdultCodes,
        Self::UseAdultAdminCodesForAllVaccines,
        Self::UseGcodeAdminCpt,
    ];

    /// Rule name exactly as configured for the payer.
    pub fn name(self) -> &'static str {
        match self {
            Self::AetnaFlPeds => "AetnaFLPeds",
            Self::BcbsKsComponent => "BCBSKSComponent",
            Self::BcbsScComponent => "BCBS SC Component",
            Self::BcbsTxHmoSwitchPayerEntity => "BCBS TX HMO Switch Payer Entity",
            Self::BillingProviderInformationOverride => "BillingProviderInformationOverride",
            Self::ExcludeAdminCodesForVfcClaims => "ExcludeAdminCodesForVfcClaims",
            Self::ExcludeAdultAdminCodes => "ExcludeAdultAdminCodes",
            Self::ExcludePediatricAdminCodes => "ExcludePediatricAdminCodes",
            Self::FacilityBasedRenderingProvider => "FacilityBasedRenderingProvider",
            Self::IncludeNdc => "IncludeNDC",
            Self::IncludeRxInProductCpts => "IncludeRxInProductCpts",
            Self::IpaBilling => "IpaBilling",
            Self::KaiserPreventGCodes => "Kaiser Prevent G Codes",
            Self::LarcNexplanonIudInsertionCode => "LARCNexplanonIUDInsertionCode",
            Self::MedicareCodingOver65 => "MedicareCodingOver65",
            Self::MemorialHealthSwitchPayerEntity => "Memorial Health Switch Payer Entity",
            Self::NoAddOnCpt => "NoAddOnCPT",
            Self::OverrideAdminCpts => "OverrideAdminCPTs",
            Self::RemoveServiceFacilityNpi => "RemoveServiceFacilityNpi",
            Self::RenderingNpiSwitch => "Rendering NPI Switch",
            Self::RenderingProviderInformationOverride => "RenderingProviderInformationOverride",
            Self::RequireGroupId => "RequireGroupID",
            Self::RequiresZ23AndZ00129DiagCodes => "RequiresZ23AndZ00129DiagCodes",
            Self::ServiceLocationOverride => "ServiceLocationOverride",
            Self::SwitchVfcPediatricAdminCodesForAdultCodes => {
                "SwitchVfcPediatricAdminCodesForAdultCodes"
            }
            Self::UseAdultAdminCodesForAllVaccines => "UseAdultAdminCodesForAllVaccines",
            Self::UseGcodeAdminCpt => "UseGcodeAdminCPT",
        }
    }

    /// Look up a rule by its exact configured name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|rule| rule.name() == name)
    }
}

impl fmt::Display for FilingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
