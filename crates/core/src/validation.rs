//! Per-step field validation.
//!
//! Each wizard step validates only the fields declared required for that step;
//! fields belonging to other steps are never touched. Failures are reported as
//! field-level errors so callers can surface them inline next to the input.

use crate::draft::RegistrationDraft;
use crate::wizard::WizardStep;
use chrono::NaiveDate;

const NAME_MIN_LEN: usize = 2;
const PHONE_MIN_DIGITS: usize = 7;

/// One inline validation failure, addressed by dotted field path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate the fields required for `step`. Empty result means the step passes.
pub fn validate_step(step: WizardStep, draft: &RegistrationDraft) -> Vec<FieldError> {
    match step {
        WizardStep::Demographics => validate_demographics(draft),
        WizardStep::Contact => validate_contact(draft),
        WizardStep::EmergencyContacts => validate_emergency_contacts(draft),
        WizardStep::Insurance => validate_insurance(draft),
        WizardStep::ConsentReview => validate_consent(draft),
    }
}

fn validate_demographics(draft: &RegistrationDraft) -> Vec<FieldError> {
    let d = &draft.demographics;
    let mut errors = Vec::new();

    if d.first_name.trim().is_empty() {
        errors.push(FieldError::new(
            "demographics.firstName",
            "first name is required",
        ));
    }
    if d.last_name.trim().is_empty() {
        errors.push(FieldError::new(
            "demographics.lastName",
            "last name is required",
        ));
    } else if d.last_name.trim().chars().count() < NAME_MIN_LEN {
        errors.push(FieldError::new(
            "demographics.lastName",
            format!("last name must be at least {NAME_MIN_LEN} characters"),
        ));
    }

    let dob = d.birth_date.trim();
    if dob.is_empty() {
        errors.push(FieldError::new(
            "demographics.birthDate",
            "date of birth is required",
        ));
    } else if NaiveDate::parse_from_str(dob, "%Y-%m-%d").is_err() {
        errors.push(FieldError::new(
            "demographics.birthDate",
            "date of birth must be YYYY-MM-DD",
        ));
    }

    errors
}

fn validate_contact(draft: &RegistrationDraft) -> Vec<FieldError> {
    let c = &draft.contact;
    let mut errors = Vec::new();

    if !is_plausible_phone(&c.phone) {
        errors.push(FieldError::new(
            "contact.phone",
            format!("phone number needs at least {PHONE_MIN_DIGITS} digits"),
        ));
    }
    // Email is optional on the contact step, but must be well formed when given.
    if !c.email.trim().is_empty() && !is_valid_email(&c.email) {
        errors.push(FieldError::new(
            "contact.email",
            "email address is not valid",
        ));
    }
    if c.address.line.trim().is_empty() {
        errors.push(FieldError::new(
            "contact.address.line",
            "street address is required",
        ));
    }
    if c.address.city.trim().is_empty() {
        errors.push(FieldError::new("contact.address.city", "city is required"));
    }
    if !is_valid_postal_code(&c.address.postal_code) {
        errors.push(FieldError::new(
            "contact.address.postalCode",
            "postal code must be 12345 or 12345-6789",
        ));
    }

    errors
}

fn validate_emergency_contacts(draft: &RegistrationDraft) -> Vec<FieldError> {
    let mut errors = Vec::new();

    // The step itself may be skipped (no entries), but any entry supplied must
    // be complete.
    for (i, contact) in draft.emergency_contacts.iter().enumerate() {
        if contact.name.trim().chars().count() < NAME_MIN_LEN {
            errors.push(FieldError::new(
                format!("emergencyContacts.{i}.name"),
                "contact name is required",
            ));
        }
        if contact.relationship.trim().is_empty() {
            errors.push(FieldError::new(
                format!("emergencyContacts.{i}.relationship"),
                "relationship is required",
            ));
        }
        if !is_plausible_phone(&contact.phone) {
            errors.push(FieldError::new(
                format!("emergencyContacts.{i}.phone"),
                format!("phone number needs at least {PHONE_MIN_DIGITS} digits"),
            ));
        }
    }

    errors
}

fn validate_insurance(draft: &RegistrationDraft) -> Vec<FieldError> {
    let ins = &draft.insurance;
    let mut errors = Vec::new();

    // Coverage is optional as a whole; a partially filled section is not.
    if !ins.is_empty() {
        if ins.carrier.trim().is_empty() {
            errors.push(FieldError::new("insurance.carrier", "carrier is required"));
        }
        if ins.member_id.trim().is_empty() {
            errors.push(FieldError::new(
                "insurance.memberId",
                "member ID is required",
            ));
        }
    }

    errors
}

fn validate_consent(draft: &RegistrationDraft) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if !draft.consent.consent_to_treat {
        errors.push(FieldError::new(
            "consent.consentToTreat",
            "consent to treat must be granted",
        ));
    }
    errors
}

/// Accepts `12345` and `12345-6789`.
fn is_valid_postal_code(input: &str) -> bool {
    let input = input.trim();
    let bytes = input.as_bytes();
    match bytes.len() {
        5 => bytes.iter().all(u8::is_ascii_digit),
        10 => {
            bytes[..5].iter().all(u8::is_ascii_digit)
                && bytes[5] == b'-'
                && bytes[6..].iter().all(u8::is_ascii_digit)
        }
        _ => false,
    }
}

/// Conservative email shape check: one `@`, non-empty local part, dotted domain.
fn is_valid_email(input: &str) -> bool {
    let input = input.trim();
    if input.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = input.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && !tld.is_empty()
}

/// A phone field is plausible when it carries enough digits, whatever the
/// punctuation around them.
fn is_plausible_phone(input: &str) -> bool {
    input.chars().filter(char::is_ascii_digit).count() >= PHONE_MIN_DIGITS
}
