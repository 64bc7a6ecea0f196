//! Wire models for the patient-create endpoint.
//!
//! Responsibilities:
//! - Define the outgoing create payload with coded demographic fields
//! - Translate terminology table entries into `{code, display}` pairs
//! - Parse the created-patient response
//!
//! The payload is FHIR-aligned rather than full FHIR: the backend flattens
//! the Patient resource plus its US-Core style coded extensions into one
//! body, and owns the mapping onto the FHIR server.

use crate::terminology::{AdministrativeSex, Ethnicity, GenderIdentity, Race, SexualOrientation};
use crate::{parse_json, FhirResult};
use serde::{Deserialize, Serialize};

/// A `{code, display}` pair from a fixed terminology table.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct CodedValue {
    pub code: String,
    pub display: String,
}

impl From<Race> for CodedValue {
    fn from(value: Race) -> Self {
        CodedValue {
            code: value.code().to_string(),
            display: value.display().to_string(),
        }
    }
}

impl From<Ethnicity> for CodedValue {
    fn from(value: Ethnicity) -> Self {
        CodedValue {
            code: value.code().to_string(),
            display: value.display().to_string(),
        }
    }
}

impl From<GenderIdentity> for CodedValue {
    fn from(value: GenderIdentity) -> Self {
        CodedValue {
            code: value.code().to_string(),
            display: value.display().to_string(),
        }
    }
}

impl From<SexualOrientation> for CodedValue {
    fn from(value: SexualOrientation) -> Self {
        CodedValue {
            code: value.code().to_string(),
            display: value.display().to_string(),
        }
    }
}

/// Postal address as registered.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WireAddress {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
}

/// One emergency contact entry.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WireEmergencyContact {
    pub name: String,
    pub relationship: String,
    pub phone: String,
}

/// Insurance coverage details.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WireInsurance {
    pub carrier: String,
    pub member_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_number: Option<String>,
}

/// Consent booleans captured at the final step.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WireConsent {
    pub consent_to_treat: bool,
    #[serde(default)]
    pub hipaa_acknowledged: bool,
    #[serde(default)]
    pub financial_agreement: bool,
}

/// Outgoing body for patient creation.
///
/// `bypass_duplicate_check` is only serialised when set, so an ordinary
/// submission carries no trace of the bypass mechanism.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePatient {
    pub first_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    pub last_name: String,
    /// ISO 8601 date (YYYY-MM-DD).
    pub birth_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sex: Option<AdministrativeSex>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub race: Option<CodedValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ethnicity: Option<CodedValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender_identity: Option<CodedValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sexual_orientation: Option<CodedValue>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<WireAddress>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub emergency_contacts: Vec<WireEmergencyContact>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub insurance: Option<WireInsurance>,

    pub consent: WireConsent,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub bypass_duplicate_check: bool,
}

/// Response body for a successful creation.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreatedPatient {
    pub patient_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mrn: Option<String>,
}

impl CreatedPatient {
    /// Parse a created-patient response from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FhirError`] if the JSON does not match the schema.
    pub fn parse(json_text: &str) -> FhirResult<Self> {
        parse_json(json_text)
    }
}
