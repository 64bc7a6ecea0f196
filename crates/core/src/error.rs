use crate::validation::FieldError;

#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("step has {} invalid field(s)", errors.len())]
    StepInvalid { errors: Vec<FieldError> },
    #[error("similar-patient candidates are awaiting a decision")]
    ReviewPending,
    #[error("no similar-patient review is pending")]
    NoReviewPending,
    #[error("dismiss is not available for server-detected duplicates")]
    DismissUnavailable,
    #[error("force-create is only available from the consent & review step after candidates were shown")]
    BypassUnavailable,
    #[error("submission is only available from the consent & review step")]
    NotAtFinalStep,
    #[error("consent to treat must be granted before submission")]
    ConsentNotGranted,
    #[error("the wizard has already finished")]
    WizardFinished,
    #[error("patient creation failed: {0}")]
    CreateFailed(String),
    #[error("translation error: {0}")]
    Fhir(#[from] fhir::FhirError),
}

pub type IntakeResult<T> = std::result::Result<T, IntakeError>;
