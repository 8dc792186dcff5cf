//! Administration procedure codes with rate table entries.

/// Adult single-dose administration.
pub const ADULT_PRIMARY: &str = "90471";
/// Adult add-on administration for each additional dose.
pub const ADULT_ADD_ON: &str = "90472";
/// Pediatric administration with counseling, first component.
pub const PEDIATRIC_PRIMARY: &str = "90460";
/// Pediatric add-on for each additional vaccine component.
pub const PEDIATRIC_ADD_ON: &str = "90461";
/// Medicare influenza administration.
pub const MEDICARE_INFLUENZA: &str = "G0008";
/// Medicare pneumococcal administration.
pub const MEDICARE_PNEUMOCOCCAL: &str = "G0009";
/// Private COVID-19 administration.
pub const PRIVATE_COVID: &str = "90480";
/// Self-administered injection codes.
pub const INJECTION_PRIMARY: &str = "96380";
pub const INJECTION_ADD_ON: &str = "96381";
/// IUD insertion.
pub const IUD_INSERTION: &str = "58300";
/// Contraceptive implant insertion.
pub const IMPLANT_INSERTION: &str = "11981";
/// Preventive counseling, excluded together with adult admin codes.
pub const PREVENTIVE_COUNSELING: &str = "99401";

/// Primary diagnosis code expected on vaccine lines.
pub const IMMUNIZATION_DIAGNOSIS: &str = "Z23";
/// Well-child visit diagnosis code.
pub const WELL_CHILD_DIAGNOSIS: &str = "Z00129";
