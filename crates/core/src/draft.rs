//! The in-memory registration draft.
//!
//! A [`RegistrationDraft`] holds every wizard field across the five steps. It is
//! created empty on wizard start, mutated per field as the user types, and
//! discarded on successful submission or cancel. Empty strings mean "not yet
//! entered" (form semantics); validation decides what is required per step.
//!
//! The draft serialises to camelCase JSON so a draft file can stand in for the
//! filled-in form in non-interactive runs.

use fhir::terminology::{AdministrativeSex, Ethnicity, GenderIdentity, Race, SexualOrientation};
use serde::{Deserialize, Serialize};

/// Demographic fields collected at step one.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Demographics {
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    /// ISO 8601 date (YYYY-MM-DD).
    pub birth_date: String,
    pub sex: Option<AdministrativeSex>,
    pub race: Option<Race>,
    pub ethnicity: Option<Ethnicity>,
    pub gender_identity: Option<GenderIdentity>,
    pub sexual_orientation: Option<SexualOrientation>,
}

impl Demographics {
    /// The fields the duplicate check keys on, normalised for comparison.
    ///
    /// Used to decide whether demographics changed since the last check when
    /// the re-check policy is enabled.
    pub(crate) fn match_fingerprint(&self) -> String {
        format!(
            "{}|{}|{}|{}",
            self.first_name.trim().to_lowercase(),
            self.last_name.trim().to_lowercase(),
            self.birth_date.trim(),
            self.sex.map(|s| s.to_wire()).unwrap_or("")
        )
    }
}

/// Postal address within the contact step.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    pub line: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
}

/// Contact fields collected at step two.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Contact {
    pub phone: String,
    pub email: String,
    pub address: Address,
}

/// One emergency contact entry from step three.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct EmergencyContact {
    pub name: String,
    pub relationship: String,
    pub phone: String,
}

/// Insurance fields from step four. Coverage is optional as a whole.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Insurance {
    pub carrier: String,
    pub member_id: String,
    pub group_number: String,
}

impl Insurance {
    pub fn is_empty(&self) -> bool {
        self.carrier.trim().is_empty()
            && self.member_id.trim().is_empty()
            && self.group_number.trim().is_empty()
    }
}

/// Consent booleans from the final step. Only consent-to-treat is mandatory.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Consent {
    pub consent_to_treat: bool,
    pub hipaa_acknowledged: bool,
    pub financial_agreement: bool,
}

/// All wizard fields. One writer at a time; never shared across sessions.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrationDraft {
    pub demographics: Demographics,
    pub contact: Contact,
    pub emergency_contacts: Vec<EmergencyContact>,
    pub insurance: Insurance,
    pub consent: Consent,
}
