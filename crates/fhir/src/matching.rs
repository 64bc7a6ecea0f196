//! Wire models for the similarity (duplicate-match) endpoint.
//!
//! Responsibilities:
//! - Define the outgoing match query body
//! - Define the ranked candidate response and validate its invariants
//! - Define the structured conflict body returned by the create endpoint
//!   when the server's own matching pass detects a duplicate
//!
//! The response models are tolerant of unknown fields (the backend may add
//! more), but candidate invariants are checked on parse: scores must lie in
//! [0, 1] (enforced by [`Confidence`]) and every candidate must carry at
//! least one match reason.

use crate::terminology::AdministrativeSex;
use crate::{parse_json, FhirError, FhirResult};
use intake_types::Confidence;
use serde::{Deserialize, Serialize};

/// Outgoing body for the similarity query.
///
/// First name, last name and birth date are required by the endpoint; sex is
/// forwarded when recorded to narrow the match set.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchQuery {
    pub first_name: String,
    pub last_name: String,
    /// ISO 8601 date (YYYY-MM-DD).
    pub birth_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sex: Option<AdministrativeSex>,
}

/// One ranked candidate returned by the matcher.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MatchCandidate {
    /// Backend identifier of the existing patient record.
    pub patient_id: String,

    /// Facility-assigned medical record number, when one exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mrn: Option<String>,

    /// Family name (surname).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,

    /// Given names in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub given: Vec<String>,

    /// ISO 8601 birth date, when recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<AdministrativeSex>,

    /// Match confidence in [0, 1]; higher means more likely the same person.
    pub score: Confidence,

    /// Human-readable match reasons, e.g. "exact date of birth".
    pub reasons: Vec<String>,
}

impl MatchCandidate {
    /// Single-line summary for logs and CLI output.
    pub fn summary(&self) -> String {
        let name = match (&self.family, self.given.first()) {
            (Some(family), Some(given)) => format!("{given} {family}"),
            (Some(family), None) => family.clone(),
            (None, Some(given)) => given.clone(),
            (None, None) => "(name unknown)".to_string(),
        };
        let dob = self.birth_date.as_deref().unwrap_or("unknown DOB");
        let mrn = self.mrn.as_deref().unwrap_or("no MRN");
        format!(
            "{name} ({dob}, {mrn}) - {} [{}]",
            self.score,
            self.reasons.join(", ")
        )
    }
}

/// Response body of the similarity query.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResponse {
    #[serde(default)]
    pub candidates: Vec<MatchCandidate>,
}

impl MatchResponse {
    /// Parse a match response from JSON text and validate candidate invariants.
    ///
    /// # Errors
    ///
    /// Returns [`FhirError`] if the JSON does not match the schema, any score
    /// is outside [0, 1], or any candidate has an empty reason list.
    pub fn parse(json_text: &str) -> FhirResult<Self> {
        let response: MatchResponse = parse_json(json_text)?;
        validate_candidates(&response.candidates)?;
        Ok(response)
    }
}

/// Structured conflict body returned with a 409 on patient creation.
///
/// The server re-runs matching on create; these candidates are authoritative
/// and replace whatever the client-side pre-check produced.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictBody {
    /// Machine-readable discriminator; `"duplicate-patient"` for this flow.
    pub code: String,

    /// Human-readable diagnostic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<String>,

    #[serde(default)]
    pub candidates: Vec<MatchCandidate>,
}

impl ConflictBody {
    /// Wire value of `code` for a duplicate-patient conflict.
    pub const DUPLICATE_PATIENT: &'static str = "duplicate-patient";

    /// Parse a conflict body from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`FhirError`] if the JSON does not match the schema, the code
    /// is not `duplicate-patient`, or the candidate invariants fail.
    pub fn parse(json_text: &str) -> FhirResult<Self> {
        let body: ConflictBody = parse_json(json_text)?;
        if body.code != Self::DUPLICATE_PATIENT {
            return Err(FhirError::InvalidInput(format!(
                "expected conflict code '{}', got '{}'",
                Self::DUPLICATE_PATIENT,
                body.code
            )));
        }
        validate_candidates(&body.candidates)?;
        Ok(body)
    }
}

fn validate_candidates(candidates: &[MatchCandidate]) -> FhirResult<()> {
    for candidate in candidates {
        if candidate.reasons.iter().all(|r| r.trim().is_empty()) {
            return Err(FhirError::InvalidInput(format!(
                "candidate '{}' has no match reasons",
                candidate.patient_id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_empty_candidate_list() {
        let response = MatchResponse::parse(r#"{"candidates": []}"#).expect("parse response");
        assert!(response.candidates.is_empty());

        // A missing list is the same as an empty one.
        let response = MatchResponse::parse("{}").expect("parse response");
        assert!(response.candidates.is_empty());
    }

    #[test]
    fn parses_ranked_candidates() {
        let input = r#"{
            "candidates": [
                {
                    "patientId": "pat-100",
                    "mrn": "MRN-4411",
                    "family": "Gonzalez",
                    "given": ["Maria"],
                    "birthDate": "1962-03-15",
                    "sex": "female",
                    "score": 0.94,
                    "reasons": ["exact date of birth", "phonetic name match"]
                }
            ]
        }"#;

        let response = MatchResponse::parse(input).expect("parse response");
        assert_eq!(response.candidates.len(), 1);
        let candidate = &response.candidates[0];
        assert_eq!(candidate.patient_id, "pat-100");
        assert_eq!(candidate.score.as_percent(), 94);
        assert_eq!(candidate.sex, Some(AdministrativeSex::Female));
        assert_eq!(candidate.reasons.len(), 2);
    }

    #[test]
    fn rejects_score_out_of_range() {
        let input = r#"{"candidates": [{"patientId": "p", "score": 1.2, "reasons": ["x"]}]}"#;
        let err = MatchResponse::parse(input).expect_err("should reject score");
        match err {
            FhirError::Translation(msg) => assert!(msg.contains("score")),
            other => panic!("expected Translation error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_candidate_without_reasons() {
        let input = r#"{"candidates": [{"patientId": "p", "score": 0.8, "reasons": []}]}"#;
        let err = MatchResponse::parse(input).expect_err("should reject empty reasons");
        assert!(matches!(err, FhirError::InvalidInput(_)));
    }

    #[test]
    fn tolerates_unknown_response_fields() {
        let input = r#"{"candidates": [], "elapsedMillis": 12}"#;
        assert!(MatchResponse::parse(input).is_ok());
    }

    #[test]
    fn match_query_omits_absent_sex() {
        let query = MatchQuery {
            first_name: "Maria".into(),
            last_name: "Gonzalez".into(),
            birth_date: "1962-03-15".into(),
            sex: None,
        };
        let json = serde_json::to_value(&query).expect("serialize query");
        assert_eq!(json["firstName"], "Maria");
        assert!(json.get("sex").is_none());
    }

    #[test]
    fn conflict_body_requires_duplicate_code() {
        let input = r#"{
            "code": "duplicate-patient",
            "diagnostics": "matching patient on record",
            "candidates": [
                {"patientId": "pat-7", "score": 0.91, "reasons": ["exact date of birth"]}
            ]
        }"#;
        let body = ConflictBody::parse(input).expect("parse conflict");
        assert_eq!(body.candidates.len(), 1);

        let other = r#"{"code": "validation-failed", "candidates": []}"#;
        let err = ConflictBody::parse(other).expect_err("should reject code");
        assert!(matches!(err, FhirError::InvalidInput(_)));
    }

    #[test]
    fn candidate_summary_reads_naturally() {
        let candidate = MatchCandidate {
            patient_id: "pat-100".into(),
            mrn: Some("MRN-4411".into()),
            family: Some("Gonzalez".into()),
            given: vec!["Maria".into()],
            birth_date: Some("1962-03-15".into()),
            sex: None,
            score: Confidence::new(0.94).expect("valid score"),
            reasons: vec!["exact date of birth".into()],
        };
        assert_eq!(
            candidate.summary(),
            "Maria Gonzalez (1962-03-15, MRN-4411) - 94% [exact date of birth]"
        );
    }
}
