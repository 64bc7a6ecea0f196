//! # Intake Core
//!
//! The patient-registration workflow: a five-step wizard over an in-memory
//! draft, a similar-patient (duplicate) detection gate, the review/resolution
//! flow, and submission against the patient directory.
//!
//! The two collaborator endpoints (the matcher and the directory) are reached
//! through the [`gate::SimilarityService`] and [`registrar::PatientDirectory`]
//! traits; `intake-client` provides the HTTP implementations.
//!
//! **No transport concerns**: request shapes and HTTP mechanics live in the
//! `fhir` and `intake-client` crates.

pub mod config;
pub mod draft;
pub mod error;
pub mod gate;
pub mod registrar;
pub mod review;
pub mod session;
pub mod validation;
pub mod wizard;

pub use config::IntakeConfig;
pub use draft::RegistrationDraft;
pub use error::{IntakeError, IntakeResult};
pub use gate::{DuplicateGate, GateError, GateOutcome, SimilarityService};
pub use registrar::{CreateError, PatientDirectory};
pub use review::{CandidateSource, Resolution, ResolutionOutcome, ReviewState};
pub use session::SessionContext;
pub use validation::FieldError;
pub use wizard::{AdvanceOutcome, RegistrationWizard, RetreatOutcome, SubmitOutcome, WizardStep};

/// One ranked similar-patient match, as validated at the wire boundary.
pub use fhir::matching::MatchCandidate as SimilarPatientCandidate;
