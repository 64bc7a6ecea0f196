//! Similar-patient review state and resolutions.
//!
//! When the gate (or a server-side conflict) produces candidates, the wizard
//! holds a [`ReviewState`] until the user takes exactly one of three actions:
//! select an existing patient, dismiss the candidates, or force-create with
//! the bypass flag. Which actions are available depends on where the
//! candidates came from: the server's conflict list is authoritative, so
//! dismiss-then-retry is not offered for it.

use fhir::matching::MatchCandidate;

/// Where the current candidate list came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CandidateSource {
    /// Client-side pre-check while leaving the demographics step.
    Precheck,
    /// Structured 409 conflict on the final create call.
    ServerConflict,
}

/// The candidate list awaiting a user decision.
///
/// Candidates are never mutated, only replaced wholesale when a new check or
/// conflict supplies a fresh list.
#[derive(Clone, Debug)]
pub struct ReviewState {
    candidates: Vec<MatchCandidate>,
    source: CandidateSource,
}

impl ReviewState {
    pub(crate) fn from_precheck(candidates: Vec<MatchCandidate>) -> Self {
        Self {
            candidates,
            source: CandidateSource::Precheck,
        }
    }

    pub(crate) fn from_server_conflict(candidates: Vec<MatchCandidate>) -> Self {
        Self {
            candidates,
            source: CandidateSource::ServerConflict,
        }
    }

    pub fn candidates(&self) -> &[MatchCandidate] {
        &self.candidates
    }

    pub fn source(&self) -> CandidateSource {
        self.source
    }

    /// Dismiss is only offered for the client-side pre-check list.
    pub fn dismiss_available(&self) -> bool {
        self.source == CandidateSource::Precheck
    }
}

/// The single decision the user takes on a pending review.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Abandon the draft and open the chosen existing patient.
    SelectExisting { patient_id: String },
    /// The candidates were reviewed and are not matches; continue the wizard.
    Dismiss,
    /// Force-create, skipping the server's duplicate rejection once.
    Bypass,
}

/// What the caller should do after a resolution was applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolutionOutcome {
    /// Navigate to the existing patient; the draft has been discarded.
    OpenExisting { patient_id: String },
    /// Candidates cleared; the wizard advances normally again.
    Dismissed,
    /// Submit with the bypass flag to complete the registration.
    ReadyToBypass,
}
