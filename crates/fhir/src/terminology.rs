//! Fixed terminology tables for coded demographic fields.
//!
//! The create payload carries race, ethnicity, gender identity and sexual
//! orientation as codes from fixed lookup tables rather than free text. Each
//! table is a closed enum with wire conversion; unknown wire codes map to
//! `None` so a newer backend vocabulary never fails a parse.

use serde::{Deserialize, Serialize};

/// Administrative sex as recorded at registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdministrativeSex {
    Female,
    Male,
    Other,
    Unknown,
}

impl AdministrativeSex {
    /// Convert to FHIR wire format string.
    pub fn to_wire(self) -> &'static str {
        match self {
            AdministrativeSex::Female => "female",
            AdministrativeSex::Male => "male",
            AdministrativeSex::Other => "other",
            AdministrativeSex::Unknown => "unknown",
        }
    }

    /// Parse from FHIR wire format string.
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "female" => Some(AdministrativeSex::Female),
            "male" => Some(AdministrativeSex::Male),
            "other" => Some(AdministrativeSex::Other),
            "unknown" => Some(AdministrativeSex::Unknown),
            _ => None,
        }
    }
}

/// OMB race categories (CDC race & ethnicity code system).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Race {
    AmericanIndianOrAlaskaNative,
    Asian,
    BlackOrAfricanAmerican,
    NativeHawaiianOrOtherPacificIslander,
    White,
    Other,
    DeclinedToAnswer,
}

impl Race {
    /// CDC code for the category.
    pub fn code(self) -> &'static str {
        match self {
            Race::AmericanIndianOrAlaskaNative => "1002-5",
            Race::Asian => "2028-9",
            Race::BlackOrAfricanAmerican => "2054-5",
            Race::NativeHawaiianOrOtherPacificIslander => "2076-8",
            Race::White => "2106-3",
            Race::Other => "2131-1",
            Race::DeclinedToAnswer => "ASKU",
        }
    }

    /// Human-readable display text.
    pub fn display(self) -> &'static str {
        match self {
            Race::AmericanIndianOrAlaskaNative => "American Indian or Alaska Native",
            Race::Asian => "Asian",
            Race::BlackOrAfricanAmerican => "Black or African American",
            Race::NativeHawaiianOrOtherPacificIslander => {
                "Native Hawaiian or Other Pacific Islander"
            }
            Race::White => "White",
            Race::Other => "Other Race",
            Race::DeclinedToAnswer => "Asked but unknown",
        }
    }

    /// Look up a category by its CDC code.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "1002-5" => Some(Race::AmericanIndianOrAlaskaNative),
            "2028-9" => Some(Race::Asian),
            "2054-5" => Some(Race::BlackOrAfricanAmerican),
            "2076-8" => Some(Race::NativeHawaiianOrOtherPacificIslander),
            "2106-3" => Some(Race::White),
            "2131-1" => Some(Race::Other),
            "ASKU" => Some(Race::DeclinedToAnswer),
            _ => None,
        }
    }
}

/// OMB ethnicity categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ethnicity {
    HispanicOrLatino,
    NotHispanicOrLatino,
    DeclinedToAnswer,
}

impl Ethnicity {
    pub fn code(self) -> &'static str {
        match self {
            Ethnicity::HispanicOrLatino => "2135-2",
            Ethnicity::NotHispanicOrLatino => "2186-5",
            Ethnicity::DeclinedToAnswer => "ASKU",
        }
    }

    pub fn display(self) -> &'static str {
        match self {
            Ethnicity::HispanicOrLatino => "Hispanic or Latino",
            Ethnicity::NotHispanicOrLatino => "Not Hispanic or Latino",
            Ethnicity::DeclinedToAnswer => "Asked but unknown",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "2135-2" => Some(Ethnicity::HispanicOrLatino),
            "2186-5" => Some(Ethnicity::NotHispanicOrLatino),
            "ASKU" => Some(Ethnicity::DeclinedToAnswer),
            _ => None,
        }
    }
}

/// Gender identity value set (SNOMED CT plus null-flavor codes).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenderIdentity {
    Female,
    Male,
    NonBinary,
    TransgenderFemale,
    TransgenderMale,
    Other,
    DeclinedToAnswer,
}

impl GenderIdentity {
    pub fn code(self) -> &'static str {
        match self {
            GenderIdentity::Female => "446141000124107",
            GenderIdentity::Male => "446151000124109",
            GenderIdentity::NonBinary => "33791000087105",
            GenderIdentity::TransgenderFemale => "407376001",
            GenderIdentity::TransgenderMale => "407377005",
            GenderIdentity::Other => "OTH",
            GenderIdentity::DeclinedToAnswer => "ASKU",
        }
    }

    pub fn display(self) -> &'static str {
        match self {
            GenderIdentity::Female => "Identifies as female",
            GenderIdentity::Male => "Identifies as male",
            GenderIdentity::NonBinary => "Identifies as nonbinary",
            GenderIdentity::TransgenderFemale => "Transgender female",
            GenderIdentity::TransgenderMale => "Transgender male",
            GenderIdentity::Other => "Other",
            GenderIdentity::DeclinedToAnswer => "Asked but unknown",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "446141000124107" => Some(GenderIdentity::Female),
            "446151000124109" => Some(GenderIdentity::Male),
            "33791000087105" => Some(GenderIdentity::NonBinary),
            "407376001" => Some(GenderIdentity::TransgenderFemale),
            "407377005" => Some(GenderIdentity::TransgenderMale),
            "OTH" => Some(GenderIdentity::Other),
            "ASKU" => Some(GenderIdentity::DeclinedToAnswer),
            _ => None,
        }
    }
}

/// Sexual orientation value set (SNOMED CT plus null-flavor codes).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SexualOrientation {
    Straight,
    LesbianGayOrHomosexual,
    Bisexual,
    Other,
    DontKnow,
    DeclinedToAnswer,
}

impl SexualOrientation {
    pub fn code(self) -> &'static str {
        match self {
            SexualOrientation::Straight => "20430005",
            SexualOrientation::LesbianGayOrHomosexual => "38628009",
            SexualOrientation::Bisexual => "42035005",
            SexualOrientation::Other => "OTH",
            SexualOrientation::DontKnow => "UNK",
            SexualOrientation::DeclinedToAnswer => "ASKU",
        }
    }

    pub fn display(self) -> &'static str {
        match self {
            SexualOrientation::Straight => "Straight or heterosexual",
            SexualOrientation::LesbianGayOrHomosexual => "Lesbian, gay or homosexual",
            SexualOrientation::Bisexual => "Bisexual",
            SexualOrientation::Other => "Other",
            SexualOrientation::DontKnow => "Don't know",
            SexualOrientation::DeclinedToAnswer => "Asked but unknown",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "20430005" => Some(SexualOrientation::Straight),
            "38628009" => Some(SexualOrientation::LesbianGayOrHomosexual),
            "42035005" => Some(SexualOrientation::Bisexual),
            "OTH" => Some(SexualOrientation::Other),
            "UNK" => Some(SexualOrientation::DontKnow),
            "ASKU" => Some(SexualOrientation::DeclinedToAnswer),
            _ => None,
        }
    }
}
