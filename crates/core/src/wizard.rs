//! The five-step registration wizard.
//!
//! Owns the draft, the current step, and the pending similar-patient review.
//! Forward navigation out of the demographics step runs the duplicate-check
//! gate; while a review is pending the wizard refuses to advance or submit
//! until the user resolves it. A draft becomes a persisted patient only when
//! the gate came back clear or the user explicitly bypassed after seeing the
//! candidates.

use crate::config::IntakeConfig;
use crate::draft::RegistrationDraft;
use crate::error::{IntakeError, IntakeResult};
use crate::gate::{DuplicateGate, GateOutcome};
use crate::registrar::{translate_draft, CreateError, PatientDirectory};
use crate::review::{Resolution, ResolutionOutcome, ReviewState};
use crate::validation::validate_step;
use fhir::patient::CreatedPatient;

/// The five fixed wizard steps, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum WizardStep {
    Demographics,
    Contact,
    EmergencyContacts,
    Insurance,
    ConsentReview,
}

impl WizardStep {
    /// One-based step number as displayed to the user.
    pub fn number(self) -> u8 {
        match self {
            WizardStep::Demographics => 1,
            WizardStep::Contact => 2,
            WizardStep::EmergencyContacts => 3,
            WizardStep::Insurance => 4,
            WizardStep::ConsentReview => 5,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::Demographics => "Demographics",
            WizardStep::Contact => "Contact Info",
            WizardStep::EmergencyContacts => "Emergency Contacts",
            WizardStep::Insurance => "Insurance",
            WizardStep::ConsentReview => "Consent & Review",
        }
    }

    fn next(self) -> WizardStep {
        match self {
            WizardStep::Demographics => WizardStep::Contact,
            WizardStep::Contact => WizardStep::EmergencyContacts,
            WizardStep::EmergencyContacts => WizardStep::Insurance,
            // Clamped at the final step.
            WizardStep::Insurance | WizardStep::ConsentReview => WizardStep::ConsentReview,
        }
    }

    fn prev(self) -> Option<WizardStep> {
        match self {
            WizardStep::Demographics => None,
            WizardStep::Contact => Some(WizardStep::Demographics),
            WizardStep::EmergencyContacts => Some(WizardStep::Contact),
            WizardStep::Insurance => Some(WizardStep::EmergencyContacts),
            WizardStep::ConsentReview => Some(WizardStep::Insurance),
        }
    }
}

/// Result of a forward-navigation attempt.
#[derive(Clone, Debug)]
pub enum AdvanceOutcome {
    /// Now on the given step.
    Advanced(WizardStep),
    /// Candidates are pending; the user must resolve the review first.
    ReviewRequired,
}

/// Result of a backward-navigation attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RetreatOutcome {
    SteppedBack(WizardStep),
    /// Retreating from the first step cancels the wizard; the draft is dropped.
    Cancelled,
}

/// Result of a submission attempt that reached the backend.
#[derive(Clone, Debug)]
pub enum SubmitOutcome {
    Created(CreatedPatient),
    /// The server detected duplicates; its candidate list replaced any earlier
    /// pre-check result and is now pending review. The draft is preserved.
    Conflict,
}

/// Wizard state for one registration session.
pub struct RegistrationWizard {
    draft: RegistrationDraft,
    step: WizardStep,
    review: Option<ReviewState>,
    /// Fingerprint of the demographics at the last completed check.
    checked: Option<String>,
    /// Whether candidates were ever shown for this draft; gates the bypass.
    candidates_shown: bool,
    finished: bool,
    config: IntakeConfig,
}

impl RegistrationWizard {
    /// Start a wizard with an empty draft.
    pub fn new(config: IntakeConfig) -> Self {
        Self::with_draft(RegistrationDraft::default(), config)
    }

    /// Start a wizard over a pre-filled draft (e.g. loaded from a draft file).
    pub fn with_draft(draft: RegistrationDraft, config: IntakeConfig) -> Self {
        Self {
            draft,
            step: WizardStep::Demographics,
            review: None,
            checked: None,
            candidates_shown: false,
            finished: false,
            config,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &RegistrationDraft {
        &self.draft
    }

    /// Mutable access for field edits. The single writer of the draft.
    pub fn draft_mut(&mut self) -> &mut RegistrationDraft {
        &mut self.draft
    }

    /// The pending similar-patient review, if any.
    pub fn review(&self) -> Option<&ReviewState> {
        self.review.as_ref()
    }

    /// Whether the force-create action is currently offered: final step
    /// reached and candidates were shown for this draft.
    pub fn bypass_available(&self) -> bool {
        self.step == WizardStep::ConsentReview && self.candidates_shown
    }

    /// Validate only the fields required for the current step.
    pub fn validate_current_step(&self) -> Vec<crate::validation::FieldError> {
        validate_step(self.step, &self.draft)
    }

    /// Attempt to move to the next step.
    ///
    /// On the demographics step this first runs the duplicate-check gate
    /// (unless the configured policy says the draft was already checked).
    /// Navigation is suspended for the duration of the in-flight check.
    ///
    /// # Errors
    ///
    /// Returns `StepInvalid` when required fields of the current step fail
    /// validation, and `WizardFinished` after the wizard completed.
    pub async fn advance(&mut self, gate: &DuplicateGate) -> IntakeResult<AdvanceOutcome> {
        self.ensure_active()?;
        if self.review.is_some() {
            return Ok(AdvanceOutcome::ReviewRequired);
        }

        let errors = validate_step(self.step, &self.draft);
        if !errors.is_empty() {
            return Err(IntakeError::StepInvalid { errors });
        }

        if self.step == WizardStep::Demographics && self.needs_check() {
            let outcome = gate.check(&self.draft.demographics).await;
            self.checked = Some(self.draft.demographics.match_fingerprint());
            if let GateOutcome::NeedsReview(candidates) = outcome {
                self.review = Some(ReviewState::from_precheck(candidates));
                self.candidates_shown = true;
                return Ok(AdvanceOutcome::ReviewRequired);
            }
        }

        self.step = self.step.next();
        Ok(AdvanceOutcome::Advanced(self.step))
    }

    /// Move one step back; at the first step this cancels the wizard.
    pub fn retreat(&mut self) -> IntakeResult<RetreatOutcome> {
        self.ensure_active()?;
        match self.step.prev() {
            Some(prev) => {
                self.step = prev;
                Ok(RetreatOutcome::SteppedBack(prev))
            }
            None => {
                self.finished = true;
                Ok(RetreatOutcome::Cancelled)
            }
        }
    }

    /// Apply the user's decision on the pending review.
    ///
    /// # Errors
    ///
    /// - `NoReviewPending` when no candidates are awaiting a decision
    /// - `DismissUnavailable` for dismissing a server-conflict list
    /// - `BypassUnavailable` for bypassing before the final step
    pub fn resolve_review(&mut self, resolution: Resolution) -> IntakeResult<ResolutionOutcome> {
        self.ensure_active()?;
        let Some(review) = self.review.as_ref() else {
            return Err(IntakeError::NoReviewPending);
        };

        match resolution {
            Resolution::SelectExisting { patient_id } => {
                // The draft is abandoned in favour of the existing record.
                self.finished = true;
                self.review = None;
                Ok(ResolutionOutcome::OpenExisting { patient_id })
            }
            Resolution::Dismiss => {
                if !review.dismiss_available() {
                    return Err(IntakeError::DismissUnavailable);
                }
                self.review = None;
                Ok(ResolutionOutcome::Dismissed)
            }
            Resolution::Bypass => {
                if self.step != WizardStep::ConsentReview {
                    return Err(IntakeError::BypassUnavailable);
                }
                self.review = None;
                Ok(ResolutionOutcome::ReadyToBypass)
            }
        }
    }

    /// Submit the finalised draft.
    ///
    /// Only reachable from the final step with consent-to-treat granted; the
    /// consent check happens before any network call. A plain submission is
    /// refused while candidates are pending; a bypass submission requires that
    /// candidates were shown for this draft and clears any pending review.
    ///
    /// On a structured conflict the server's candidates are installed for
    /// review and the draft is preserved; on any other failure the draft is
    /// also preserved and a retryable error is returned.
    pub async fn submit(
        &mut self,
        directory: &dyn PatientDirectory,
        bypass: bool,
    ) -> IntakeResult<SubmitOutcome> {
        self.ensure_active()?;
        if self.step != WizardStep::ConsentReview {
            return Err(IntakeError::NotAtFinalStep);
        }
        if !self.draft.consent.consent_to_treat {
            return Err(IntakeError::ConsentNotGranted);
        }
        let errors = validate_step(self.step, &self.draft);
        if !errors.is_empty() {
            return Err(IntakeError::StepInvalid { errors });
        }

        if bypass {
            if !self.candidates_shown {
                return Err(IntakeError::BypassUnavailable);
            }
            // An explicit force-create acknowledges the pending list.
            self.review = None;
        } else if self.review.is_some() {
            return Err(IntakeError::ReviewPending);
        }

        let payload = translate_draft(&self.draft, bypass)?;
        match directory.create_patient(&payload).await {
            Ok(created) => {
                tracing::info!(patient_id = %created.patient_id, "patient created");
                self.finished = true;
                Ok(SubmitOutcome::Created(created))
            }
            Err(CreateError::Conflict(body)) => {
                tracing::info!(
                    count = body.candidates.len(),
                    "server detected duplicates on create"
                );
                self.review = Some(ReviewState::from_server_conflict(body.candidates));
                self.candidates_shown = true;
                Ok(SubmitOutcome::Conflict)
            }
            Err(err) => {
                tracing::warn!(error = %err, "patient creation failed, draft preserved");
                Err(IntakeError::CreateFailed(err.to_string()))
            }
        }
    }

    fn ensure_active(&self) -> IntakeResult<()> {
        if self.finished {
            return Err(IntakeError::WizardFinished);
        }
        Ok(())
    }

    /// Whether the gate must run before leaving the demographics step.
    fn needs_check(&self) -> bool {
        match &self.checked {
            None => true,
            Some(fingerprint) => {
                self.config.recheck_on_demographics_change()
                    && *fingerprint != self.draft.demographics.match_fingerprint()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::{GateError, SimilarityService};
    use async_trait::async_trait;
    use fhir::matching::{ConflictBody, MatchCandidate, MatchQuery};
    use fhir::patient::{CreatePatient, CreatedPatient};
    use intake_types::Confidence;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn candidate(patient_id: &str, score: f64, reason: &str) -> MatchCandidate {
        MatchCandidate {
            patient_id: patient_id.into(),
            mrn: None,
            family: Some("Gonzalez".into()),
            given: vec!["Maria".into()],
            birth_date: Some("1962-03-15".into()),
            sex: None,
            score: Confidence::new(score).expect("valid score"),
            reasons: vec![reason.into()],
        }
    }

    struct CountingMatcher {
        candidates: Vec<MatchCandidate>,
        calls: AtomicUsize,
    }

    impl CountingMatcher {
        fn new(candidates: Vec<MatchCandidate>) -> Arc<Self> {
            Arc::new(Self {
                candidates,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl SimilarityService for CountingMatcher {
        async fn find_similar(
            &self,
            _query: &MatchQuery,
        ) -> Result<Vec<MatchCandidate>, GateError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.candidates.clone())
        }
    }

    enum DirectoryScript {
        Created,
        ConflictThenCreated(Vec<MatchCandidate>),
        Failure,
    }

    struct ScriptedDirectory {
        script: DirectoryScript,
        calls: AtomicUsize,
    }

    impl ScriptedDirectory {
        fn new(script: DirectoryScript) -> Self {
            Self {
                script,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PatientDirectory for ScriptedDirectory {
        async fn create_patient(
            &self,
            payload: &CreatePatient,
        ) -> Result<CreatedPatient, CreateError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.script {
                DirectoryScript::Created => Ok(CreatedPatient {
                    patient_id: "pat-new".into(),
                    mrn: Some("MRN-9001".into()),
                }),
                DirectoryScript::ConflictThenCreated(candidates) => {
                    if call == 0 && !payload.bypass_duplicate_check {
                        Err(CreateError::Conflict(ConflictBody {
                            code: ConflictBody::DUPLICATE_PATIENT.into(),
                            diagnostics: None,
                            candidates: candidates.clone(),
                        }))
                    } else {
                        Ok(CreatedPatient {
                            patient_id: "pat-new".into(),
                            mrn: None,
                        })
                    }
                }
                DirectoryScript::Failure => {
                    Err(CreateError::Server("internal error".into()))
                }
            }
        }
    }

    fn filled_wizard(config: IntakeConfig) -> RegistrationWizard {
        let mut wizard = RegistrationWizard::new(config);
        let draft = wizard.draft_mut();
        draft.demographics.first_name = "Maria".into();
        draft.demographics.last_name = "Gonzalez".into();
        draft.demographics.birth_date = "1962-03-15".into();
        draft.contact.phone = "(503) 555-0100".into();
        draft.contact.address.line = "1200 NW Couch St".into();
        draft.contact.address.city = "Portland".into();
        draft.contact.address.state = "OR".into();
        draft.contact.address.postal_code = "97205".into();
        draft.consent.consent_to_treat = true;
        wizard
    }

    async fn advance_to_final(wizard: &mut RegistrationWizard, gate: &DuplicateGate) {
        while wizard.step() != WizardStep::ConsentReview {
            match wizard.advance(gate).await.expect("advance") {
                AdvanceOutcome::Advanced(_) => {}
                AdvanceOutcome::ReviewRequired => panic!("unexpected review"),
            }
        }
    }

    #[tokio::test]
    async fn clear_check_advances_without_interaction() {
        let matcher = CountingMatcher::new(vec![]);
        let gate = DuplicateGate::new(matcher.clone(), None);
        let mut wizard = filled_wizard(IntakeConfig::new());

        match wizard.advance(&gate).await.expect("advance") {
            AdvanceOutcome::Advanced(step) => assert_eq!(step, WizardStep::Contact),
            AdvanceOutcome::ReviewRequired => panic!("should be clear"),
        }
        assert_eq!(matcher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn candidates_block_until_resolved() {
        let matcher = CountingMatcher::new(vec![candidate("pat-1", 0.94, "exact date of birth")]);
        let gate = DuplicateGate::new(matcher, None);
        let mut wizard = filled_wizard(IntakeConfig::new());

        assert!(matches!(
            wizard.advance(&gate).await.expect("advance"),
            AdvanceOutcome::ReviewRequired
        ));
        assert_eq!(wizard.step(), WizardStep::Demographics);
        assert_eq!(wizard.review().expect("review pending").candidates().len(), 1);

        // Still blocked until a resolution is applied.
        assert!(matches!(
            wizard.advance(&gate).await.expect("advance"),
            AdvanceOutcome::ReviewRequired
        ));

        let outcome = wizard
            .resolve_review(Resolution::Dismiss)
            .expect("dismiss allowed");
        assert_eq!(outcome, ResolutionOutcome::Dismissed);
        assert!(wizard.review().is_none());

        match wizard.advance(&gate).await.expect("advance") {
            AdvanceOutcome::Advanced(step) => assert_eq!(step, WizardStep::Contact),
            AdvanceOutcome::ReviewRequired => panic!("review was dismissed"),
        }
    }

    #[tokio::test]
    async fn check_runs_once_per_draft_by_default() {
        let matcher = CountingMatcher::new(vec![candidate("pat-1", 0.9, "exact date of birth")]);
        let gate = DuplicateGate::new(matcher.clone(), None);
        let mut wizard = filled_wizard(IntakeConfig::new());

        wizard.advance(&gate).await.expect("advance");
        wizard
            .resolve_review(Resolution::Dismiss)
            .expect("dismiss allowed");
        wizard.advance(&gate).await.expect("advance");
        assert_eq!(wizard.step(), WizardStep::Contact);

        // Go back, edit the name, come forward again: no second check.
        wizard.retreat().expect("retreat");
        wizard.draft_mut().demographics.first_name = "Mariana".into();
        wizard.advance(&gate).await.expect("advance");
        assert_eq!(matcher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn recheck_policy_reruns_on_demographic_edits() {
        let matcher = CountingMatcher::new(vec![]);
        let gate = DuplicateGate::new(matcher.clone(), None);
        let config = IntakeConfig::new().with_recheck_on_demographics_change(true);
        let mut wizard = filled_wizard(config);

        wizard.advance(&gate).await.expect("advance");
        wizard.retreat().expect("retreat");

        // Unchanged demographics: no re-check.
        wizard.advance(&gate).await.expect("advance");
        assert_eq!(matcher.calls.load(Ordering::SeqCst), 1);

        wizard.retreat().expect("retreat");
        wizard.draft_mut().demographics.first_name = "Mariana".into();
        wizard.advance(&gate).await.expect("advance");
        assert_eq!(matcher.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn invalid_step_blocks_navigation_locally() {
        let matcher = CountingMatcher::new(vec![]);
        let gate = DuplicateGate::new(matcher.clone(), None);
        let mut wizard = RegistrationWizard::new(IntakeConfig::new());

        match wizard.advance(&gate).await {
            Err(IntakeError::StepInvalid { errors }) => assert!(!errors.is_empty()),
            other => panic!("expected StepInvalid, got {other:?}"),
        }
        // No network call for an invalid step.
        assert_eq!(matcher.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn retreat_at_first_step_cancels() {
        let mut wizard = filled_wizard(IntakeConfig::new());
        assert_eq!(wizard.retreat().expect("retreat"), RetreatOutcome::Cancelled);
        assert!(matches!(
            wizard.retreat(),
            Err(IntakeError::WizardFinished)
        ));
    }

    #[tokio::test]
    async fn select_existing_abandons_the_draft() {
        let matcher = CountingMatcher::new(vec![candidate("pat-1", 0.94, "exact date of birth")]);
        let gate = DuplicateGate::new(matcher, None);
        let mut wizard = filled_wizard(IntakeConfig::new());

        wizard.advance(&gate).await.expect("advance");
        let outcome = wizard
            .resolve_review(Resolution::SelectExisting {
                patient_id: "pat-1".into(),
            })
            .expect("select allowed");
        assert_eq!(
            outcome,
            ResolutionOutcome::OpenExisting {
                patient_id: "pat-1".into()
            }
        );
        assert!(matches!(
            wizard.advance(&gate).await,
            Err(IntakeError::WizardFinished)
        ));
    }

    #[tokio::test]
    async fn bypass_is_not_offered_before_final_step() {
        let matcher = CountingMatcher::new(vec![candidate("pat-1", 0.94, "exact date of birth")]);
        let gate = DuplicateGate::new(matcher, None);
        let mut wizard = filled_wizard(IntakeConfig::new());

        wizard.advance(&gate).await.expect("advance");
        assert!(!wizard.bypass_available());
        assert!(matches!(
            wizard.resolve_review(Resolution::Bypass),
            Err(IntakeError::BypassUnavailable)
        ));
    }

    #[tokio::test]
    async fn bypass_submits_after_candidates_were_shown() {
        let matcher = CountingMatcher::new(vec![candidate("pat-1", 0.94, "exact date of birth")]);
        let gate = DuplicateGate::new(matcher, None);
        let mut wizard = filled_wizard(IntakeConfig::new());

        wizard.advance(&gate).await.expect("advance");
        wizard
            .resolve_review(Resolution::Dismiss)
            .expect("dismiss allowed");
        advance_to_final(&mut wizard, &gate).await;
        assert!(wizard.bypass_available());

        let directory = ScriptedDirectory::new(DirectoryScript::Created);
        match wizard.submit(&directory, true).await.expect("submit") {
            SubmitOutcome::Created(created) => assert_eq!(created.patient_id, "pat-new"),
            SubmitOutcome::Conflict => panic!("unexpected conflict"),
        }
    }

    #[tokio::test]
    async fn bypass_is_refused_when_no_candidates_were_shown() {
        let matcher = CountingMatcher::new(vec![]);
        let gate = DuplicateGate::new(matcher, None);
        let mut wizard = filled_wizard(IntakeConfig::new());
        advance_to_final(&mut wizard, &gate).await;

        let directory = ScriptedDirectory::new(DirectoryScript::Created);
        assert!(matches!(
            wizard.submit(&directory, true).await,
            Err(IntakeError::BypassUnavailable)
        ));
        assert_eq!(directory.calls(), 0);
    }

    #[tokio::test]
    async fn missing_consent_blocks_submission_without_network_call() {
        let matcher = CountingMatcher::new(vec![]);
        let gate = DuplicateGate::new(matcher, None);
        let mut wizard = filled_wizard(IntakeConfig::new());
        advance_to_final(&mut wizard, &gate).await;
        wizard.draft_mut().consent.consent_to_treat = false;

        let directory = ScriptedDirectory::new(DirectoryScript::Created);
        assert!(matches!(
            wizard.submit(&directory, false).await,
            Err(IntakeError::ConsentNotGranted)
        ));
        assert_eq!(directory.calls(), 0);
    }

    #[tokio::test]
    async fn submission_is_refused_before_final_step() {
        let mut wizard = filled_wizard(IntakeConfig::new());
        let directory = ScriptedDirectory::new(DirectoryScript::Created);
        assert!(matches!(
            wizard.submit(&directory, false).await,
            Err(IntakeError::NotAtFinalStep)
        ));
    }

    #[tokio::test]
    async fn server_conflict_replaces_candidates_and_allows_bypass() {
        // The pre-check finds one candidate; the server later reports two
        // different ones. The review must show the server's list.
        let matcher = CountingMatcher::new(vec![candidate("pat-1", 0.85, "phonetic name match")]);
        let gate = DuplicateGate::new(matcher, None);
        let mut wizard = filled_wizard(IntakeConfig::new());

        wizard.advance(&gate).await.expect("advance");
        wizard
            .resolve_review(Resolution::Dismiss)
            .expect("dismiss allowed");
        advance_to_final(&mut wizard, &gate).await;

        let server_candidates = vec![
            candidate("pat-7", 0.91, "exact date of birth"),
            candidate("pat-8", 0.77, "phonetic name match"),
        ];
        let directory =
            ScriptedDirectory::new(DirectoryScript::ConflictThenCreated(server_candidates));

        match wizard.submit(&directory, false).await.expect("submit") {
            SubmitOutcome::Conflict => {}
            SubmitOutcome::Created(_) => panic!("expected conflict"),
        }

        let review = wizard.review().expect("server candidates pending");
        let ids: Vec<&str> = review
            .candidates()
            .iter()
            .map(|c| c.patient_id.as_str())
            .collect();
        assert_eq!(ids, vec!["pat-7", "pat-8"]);

        // Dismiss-then-retry is not offered for the authoritative list.
        assert!(matches!(
            wizard.resolve_review(Resolution::Dismiss),
            Err(IntakeError::DismissUnavailable)
        ));

        // Plain resubmission is refused while the conflict is unresolved.
        assert!(matches!(
            wizard.submit(&directory, false).await,
            Err(IntakeError::ReviewPending)
        ));

        // Force-create completes the registration.
        let outcome = wizard
            .resolve_review(Resolution::Bypass)
            .expect("bypass allowed at final step");
        assert_eq!(outcome, ResolutionOutcome::ReadyToBypass);
        match wizard.submit(&directory, true).await.expect("submit") {
            SubmitOutcome::Created(created) => assert_eq!(created.patient_id, "pat-new"),
            SubmitOutcome::Conflict => panic!("bypass must skip the duplicate rejection"),
        }
    }

    #[tokio::test]
    async fn create_failure_preserves_the_draft() {
        let matcher = CountingMatcher::new(vec![]);
        let gate = DuplicateGate::new(matcher, None);
        let mut wizard = filled_wizard(IntakeConfig::new());
        advance_to_final(&mut wizard, &gate).await;

        let directory = ScriptedDirectory::new(DirectoryScript::Failure);
        assert!(matches!(
            wizard.submit(&directory, false).await,
            Err(IntakeError::CreateFailed(_))
        ));

        // Draft intact and wizard still active for a retry.
        assert_eq!(wizard.draft().demographics.first_name, "Maria");
        assert_eq!(wizard.step(), WizardStep::ConsentReview);
        let retry = ScriptedDirectory::new(DirectoryScript::Created);
        assert!(wizard.submit(&retry, false).await.is_ok());
    }
}
