//! Patient creation: payload translation and the directory collaborator.
//!
//! Translates a finalised [`RegistrationDraft`] into the create payload with
//! coded demographic fields, and defines the trait the HTTP client implements
//! against the backend's patient-create endpoint.

use crate::draft::RegistrationDraft;
use crate::error::{IntakeError, IntakeResult};
use async_trait::async_trait;
use fhir::matching::ConflictBody;
use fhir::patient::{
    CreatePatient, CreatedPatient, WireAddress, WireConsent, WireEmergencyContact, WireInsurance,
};

/// Failures of the create call.
#[derive(Debug, thiserror::Error)]
pub enum CreateError {
    /// The server's own matching pass found duplicates; candidates attached.
    #[error("duplicate patient detected by the server")]
    Conflict(ConflictBody),
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("directory service failure: {0}")]
    Server(String),
    #[error("malformed directory response: {0}")]
    Malformed(#[from] fhir::FhirError),
}

/// Collaborator that persists new patient records.
#[async_trait]
pub trait PatientDirectory: Send + Sync {
    async fn create_patient(&self, payload: &CreatePatient) -> Result<CreatedPatient, CreateError>;
}

fn opt(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Translate a draft into the create payload.
///
/// Coded demographic fields are expanded into `{code, display}` pairs from the
/// fixed terminology tables. Assumes the draft already passed step validation.
///
/// # Errors
///
/// Returns `IntakeError::InvalidInput` if a matcher-required identity field is
/// still empty, which would indicate submission without validation.
pub fn translate_draft(draft: &RegistrationDraft, bypass: bool) -> IntakeResult<CreatePatient> {
    let d = &draft.demographics;
    let (Some(first_name), Some(last_name), Some(birth_date)) =
        (opt(&d.first_name), opt(&d.last_name), opt(&d.birth_date))
    else {
        return Err(IntakeError::InvalidInput(
            "first name, last name and date of birth are required".into(),
        ));
    };

    let address = {
        let a = &draft.contact.address;
        let wire = WireAddress {
            line: opt(&a.line),
            city: opt(&a.city),
            state: opt(&a.state),
            postal_code: opt(&a.postal_code),
        };
        if wire == WireAddress::default() {
            None
        } else {
            Some(wire)
        }
    };

    let emergency_contacts = draft
        .emergency_contacts
        .iter()
        .map(|c| WireEmergencyContact {
            name: c.name.trim().to_string(),
            relationship: c.relationship.trim().to_string(),
            phone: c.phone.trim().to_string(),
        })
        .collect();

    let insurance = if draft.insurance.is_empty() {
        None
    } else {
        Some(WireInsurance {
            carrier: draft.insurance.carrier.trim().to_string(),
            member_id: draft.insurance.member_id.trim().to_string(),
            group_number: opt(&draft.insurance.group_number),
        })
    };

    Ok(CreatePatient {
        first_name,
        middle_name: opt(&d.middle_name),
        last_name,
        birth_date,
        sex: d.sex,
        race: d.race.map(Into::into),
        ethnicity: d.ethnicity.map(Into::into),
        gender_identity: d.gender_identity.map(Into::into),
        sexual_orientation: d.sexual_orientation.map(Into::into),
        phone: opt(&draft.contact.phone),
        email: opt(&draft.contact.email),
        address,
        emergency_contacts,
        insurance,
        consent: WireConsent {
            consent_to_treat: draft.consent.consent_to_treat,
            hipaa_acknowledged: draft.consent.hipaa_acknowledged,
            financial_agreement: draft.consent.financial_agreement,
        },
        bypass_duplicate_check: bypass,
    })
}
