//! # Intake Client
//!
//! HTTP implementations of the intake core's collaborator traits:
//! - [`SimilarityService`] against `POST /api/patients/match`
//! - [`PatientDirectory`] against `POST /api/patients`
//!
//! The client carries an explicit [`SessionContext`] (no ambient auth store):
//! every request bears the session token, refuses to fire once the session has
//! idled out, and counts as observed activity when it succeeds.

use async_trait::async_trait;
use fhir::matching::{ConflictBody, MatchCandidate, MatchQuery, MatchResponse};
use fhir::patient::{CreatePatient, CreatedPatient};
use intake_core::{CreateError, GateError, PatientDirectory, SessionContext, SimilarityService};
use reqwest::StatusCode;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// Connection settings resolved once at startup.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    base_url: String,
    request_timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self {
            base_url: base_url.as_ref().trim_end_matches('/').to_string(),
            request_timeout: None,
        }
    }

    /// Bound every request to `timeout` at the HTTP layer.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// HTTP client for the matcher and directory endpoints.
pub struct IntakeClient {
    http: reqwest::Client,
    config: ClientConfig,
    session: Mutex<SessionContext>,
}

impl IntakeClient {
    /// Build a client from resolved config and an explicit session.
    ///
    /// # Errors
    ///
    /// Returns the underlying builder error if the HTTP client cannot be
    /// constructed (e.g. no TLS backend).
    pub fn new(config: ClientConfig, session: SessionContext) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            config,
            session: Mutex::new(session),
        })
    }

    /// Current session token, refusing expired sessions.
    fn session_token(&self) -> Result<String, String> {
        let session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        if session.is_expired() {
            return Err("session idled out; sign in again".to_string());
        }
        Ok(session.token().to_string())
    }

    /// A completed request counts as observed activity.
    fn touch_session(&self) {
        self.session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .touch();
    }

    fn match_url(&self) -> String {
        format!("{}/api/patients/match", self.config.base_url)
    }

    fn create_url(&self) -> String {
        format!("{}/api/patients", self.config.base_url)
    }
}

#[async_trait]
impl SimilarityService for IntakeClient {
    async fn find_similar(&self, query: &MatchQuery) -> Result<Vec<MatchCandidate>, GateError> {
        let token = self.session_token().map_err(GateError::Transport)?;

        let response = self
            .http
            .post(self.match_url())
            .bearer_auth(token)
            .json(query)
            .send()
            .await
            .map_err(|e| GateError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GateError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(GateError::Server(format!("matcher returned {status}")));
        }

        let parsed = MatchResponse::parse(&body)?;
        self.touch_session();
        Ok(parsed.candidates)
    }
}

#[async_trait]
impl PatientDirectory for IntakeClient {
    async fn create_patient(&self, payload: &CreatePatient) -> Result<CreatedPatient, CreateError> {
        let token = self.session_token().map_err(CreateError::Transport)?;

        let response = self
            .http
            .post(self.create_url())
            .bearer_auth(token)
            .json(payload)
            .send()
            .await
            .map_err(|e| CreateError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CreateError::Transport(e.to_string()))?;

        if status == StatusCode::CONFLICT {
            let conflict = ConflictBody::parse(&body)?;
            self.touch_session();
            return Err(CreateError::Conflict(conflict));
        }
        if !status.is_success() {
            tracing::warn!(%status, "patient creation rejected");
            return Err(CreateError::Server(format!("directory returned {status}")));
        }

        let created = CreatedPatient::parse(&body)?;
        self.touch_session();
        Ok(created)
    }
}
