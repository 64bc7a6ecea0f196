//! FHIR wire/boundary support for the patient intake workflow.
//!
//! This crate provides **wire models** and **format/translation helpers** for the
//! two collaborator endpoints the intake flow talks to over HTTP:
//! - the similarity (duplicate-match) query and its ranked candidate response
//! - the patient-create payload and its structured duplicate-conflict body
//!
//! This crate focuses on:
//! - FHIR semantic alignment for demographic coding (without FHIR REST transport)
//! - serialisation/deserialisation of the JSON bodies
//! - translation between domain primitives and wire structs
//!
//! The backend owns the exact endpoint shapes; everything here is strict about
//! what it produces and tolerant about unknown fields it receives.

pub mod matching;
pub mod patient;
pub mod terminology;

// Re-export facades
pub use matching::{ConflictBody, MatchCandidate, MatchQuery, MatchResponse};
pub use patient::{CreatePatient, CreatedPatient};

// Re-export terminology tables
pub use terminology::{AdministrativeSex, Ethnicity, GenderIdentity, Race, SexualOrientation};

/// Errors returned by the `fhir` boundary crate.
#[derive(Debug, thiserror::Error)]
pub enum FhirError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("translation error: {0}")]
    Translation(String),
}

/// Type alias for Results that can fail with a [`FhirError`].
pub type FhirResult<T> = Result<T, FhirError>;

/// Deserialize `T` from JSON text, surfacing the path to the failing field.
///
/// Uses `serde_path_to_error` so a schema mismatch reports e.g.
/// `candidates.0.score` rather than a bare serde message.
pub(crate) fn parse_json<T>(json_text: &str) -> FhirResult<T>
where
    T: serde::de::DeserializeOwned,
{
    let mut deserializer = serde_json::Deserializer::from_str(json_text);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|err| {
        let path = err.path().to_string();
        let source = err.into_inner();
        let path = if path.is_empty() {
            "<root>"
        } else {
            path.as_str()
        };
        FhirError::Translation(format!("schema mismatch at {path}: {source}"))
    })
}
