//! The duplicate-check gate.
//!
//! Before the wizard leaves the demographics step it asks an external matcher
//! service for similar existing patients. The gate classifies the answer as
//! "clear" or "needs review" and deliberately fails open: duplicate detection
//! is advisory, so a matcher outage must never block registration. The server
//! runs its own authoritative pass on the final create call.

use crate::draft::Demographics;
use async_trait::async_trait;
use fhir::matching::{MatchCandidate, MatchQuery};
use std::sync::Arc;
use std::time::Duration;

/// Failures while querying the matcher. All of them fail open at the gate.
#[derive(Debug, thiserror::Error)]
pub enum GateError {
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("matcher service failure: {0}")]
    Server(String),
    #[error("malformed matcher response: {0}")]
    Malformed(#[from] fhir::FhirError),
}

/// Collaborator that ranks existing patients against draft demographics.
#[async_trait]
pub trait SimilarityService: Send + Sync {
    async fn find_similar(&self, query: &MatchQuery) -> Result<Vec<MatchCandidate>, GateError>;
}

/// Classification of a gate run.
#[derive(Clone, Debug)]
pub enum GateOutcome {
    /// No candidates (or the check was skipped / failed open); proceed.
    Clear,
    /// Ranked candidates need a user decision before the wizard may advance.
    NeedsReview(Vec<MatchCandidate>),
}

/// Runs the similarity query with skip-on-incomplete and fail-open semantics.
pub struct DuplicateGate {
    service: Arc<dyn SimilarityService>,
    timeout: Option<Duration>,
}

impl DuplicateGate {
    pub fn new(service: Arc<dyn SimilarityService>, timeout: Option<Duration>) -> Self {
        Self { service, timeout }
    }

    /// Check the draft demographics against the matcher.
    ///
    /// Skips the query (treated as clear) when first name, last name or date of
    /// birth is still empty, so an incomplete form is never blocked. Transport
    /// and server failures, malformed responses and timeouts are logged and
    /// also treated as clear.
    pub async fn check(&self, demographics: &Demographics) -> GateOutcome {
        let Some(query) = build_query(demographics) else {
            tracing::debug!("duplicate check skipped: demographics incomplete");
            return GateOutcome::Clear;
        };

        let result = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, self.service.find_similar(&query)).await
            {
                Ok(result) => result,
                Err(_) => {
                    tracing::warn!(
                        timeout_ms = limit.as_millis() as u64,
                        "duplicate check timed out, failing open"
                    );
                    return GateOutcome::Clear;
                }
            },
            None => self.service.find_similar(&query).await,
        };

        match result {
            Ok(candidates) if candidates.is_empty() => GateOutcome::Clear,
            Ok(candidates) => {
                tracing::info!(count = candidates.len(), "similar patients found");
                GateOutcome::NeedsReview(candidates)
            }
            Err(err) => {
                tracing::warn!(error = %err, "duplicate check failed, failing open");
                GateOutcome::Clear
            }
        }
    }
}

/// Build the matcher query, or `None` when a required field is missing.
fn build_query(demographics: &Demographics) -> Option<MatchQuery> {
    let first_name = demographics.first_name.trim();
    let last_name = demographics.last_name.trim();
    let birth_date = demographics.birth_date.trim();
    if first_name.is_empty() || last_name.is_empty() || birth_date.is_empty() {
        return None;
    }
    Some(MatchQuery {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        birth_date: birth_date.to_string(),
        sex: demographics.sex,
    })
}
