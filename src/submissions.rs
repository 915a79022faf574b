//! Work submissions
//!
//! The sibling feature next to the chat pipeline: creators submit their work
//! through a form whose payload is relayed to a hosted form service, and
//! accepted submissions are kept in an in-memory log for the admin view.
//! The log is page-lifetime only; entries vanish when the process exits.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SubmitError;

/// Maximum size of an attached file, in bytes (10 MB)
pub const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Metadata of a file the creator attached
///
/// Only metadata travels to the relay; the file itself is never uploaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileMeta {
    /// Original file name
    pub name: String,
    /// File size in bytes
    pub size_bytes: u64,
}

/// A submission as entered by the creator, before validation
#[derive(Debug, Clone, Default)]
pub struct SubmissionDraft {
    /// Creator's name (required)
    pub name: String,
    /// Contact email (required)
    pub email: String,
    /// Work category, e.g. "Art", "Music", "Dance"
    pub category: String,
    /// Description of the work (required)
    pub description: String,
    /// Optional link to the work
    pub link: Option<String>,
    /// Optional attached file metadata
    pub file: Option<FileMeta>,
}

impl SubmissionDraft {
    /// Validate the draft
    ///
    /// Collects every problem instead of stopping at the first, so the UI
    /// can show them all at once.
    pub fn validate(&self) -> Result<(), SubmitError> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push("name is required".to_string());
        }
        if self.email.trim().is_empty() {
            errors.push("email is required".to_string());
        }
        if self.description.trim().is_empty() {
            errors.push("description is required".to_string());
        }
        if let Some(file) = &self.file {
            if file.size_bytes > MAX_FILE_SIZE_BYTES {
                errors.push(format!(
                    "file \"{}\" exceeds the 10MB limit",
                    file.name
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SubmitError::Validation(errors))
        }
    }

    /// Compose the free-text message body sent to the relay
    fn message_body(&self) -> String {
        let mut body = format!("Description:\n{}\n\n", self.description);
        if let Some(link) = &self.link {
            body.push_str(&format!("Work Link: {link}\n\n"));
        }
        if let Some(file) = &self.file {
            body.push_str(&format!(
                "[System Note]: User selected file: \"{}\" (Size: {:.2} KB). File not uploaded, see description.",
                file.name,
                file.size_bytes as f64 / 1024.0
            ));
        }
        body
    }
}

/// An accepted submission, as shown in the admin view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    /// Timestamp-derived identifier
    pub id: String,
    /// Creator's name
    pub name: String,
    /// Contact email
    pub email: String,
    /// Work category
    pub category: String,
    /// Description of the work
    pub description: String,
    /// Link to the work, if one was provided
    pub work_url: Option<String>,
    /// Name of the attached file, if any
    pub file_name: Option<String>,
    /// When the submission was accepted
    pub timestamp: DateTime<Utc>,
}

impl Submission {
    /// Build a submission record from an accepted draft
    pub fn from_draft(draft: &SubmissionDraft) -> Self {
        Self {
            id: Utc::now().timestamp_millis().to_string(),
            name: draft.name.clone(),
            email: draft.email.clone(),
            category: draft.category.clone(),
            description: draft.description.clone(),
            work_url: draft.link.clone(),
            file_name: draft.file.as_ref().map(|f| f.name.clone()),
            timestamp: Utc::now(),
        }
    }
}

/// JSON payload the relay service expects
#[derive(Serialize, Debug)]
struct RelayPayload<'a> {
    name: &'a str,
    email: &'a str,
    #[serde(rename = "_replyto")]
    replyto: &'a str,
    category: &'a str,
    #[serde(rename = "_subject")]
    subject: String,
    message: String,
    link: Option<&'a str>,
}

/// Error body shape returned by the relay on rejection
#[derive(Deserialize, Debug)]
struct RelayErrorBody {
    #[serde(default)]
    errors: Vec<RelayErrorItem>,
}

#[derive(Deserialize, Debug)]
struct RelayErrorItem {
    #[serde(default)]
    message: String,
}

/// Client for the hosted form-relay service
#[derive(Debug, Clone)]
pub struct RelayClient {
    http: reqwest::Client,
    endpoint: String,
}

impl RelayClient {
    /// Create a relay client for the given endpoint
    pub fn new(http: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    /// Validate and relay a submission
    ///
    /// On success returns the accepted [`Submission`] record for the caller
    /// to log. On rejection the relay's own error messages are returned so
    /// the UI can surface them.
    pub async fn submit(&self, draft: &SubmissionDraft) -> Result<Submission, SubmitError> {
        draft.validate()?;

        let payload = RelayPayload {
            name: &draft.name,
            email: &draft.email,
            replyto: &draft.email,
            category: &draft.category,
            subject: format!(
                "New Creator Submission: {} - {}",
                draft.name, draft.category
            ),
            message: draft.message_body(),
            link: draft.link.as_deref(),
        };

        tracing::debug!(name = %draft.name, category = %draft.category, "Relaying submission");

        let response = self
            .http
            .post(&self.endpoint)
            .header("Accept", "application/json")
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            tracing::info!(name = %draft.name, "Submission relayed");
            return Ok(Submission::from_draft(draft));
        }

        let body = response.text().await.unwrap_or_default();
        let errors = serde_json::from_str::<RelayErrorBody>(&body)
            .map(|parsed| {
                parsed
                    .errors
                    .into_iter()
                    .map(|e| e.message)
                    .filter(|m| !m.is_empty())
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        tracing::error!(status = status.as_u16(), ?errors, "Submission relay rejected payload");
        Err(SubmitError::Rejected {
            status: status.as_u16(),
            errors,
        })
    }
}

/// In-memory, newest-first log of accepted submissions
#[derive(Debug, Default)]
pub struct SubmissionLog {
    entries: Vec<Submission>,
}

impl SubmissionLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an accepted submission at the front
    pub fn record(&mut self, submission: Submission) {
        self.entries.insert(0, submission);
    }

    /// Entries, newest first
    pub fn entries(&self) -> &[Submission] {
        &self.entries
    }

    /// Number of recorded submissions
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serial_test::serial;

    fn valid_draft() -> SubmissionDraft {
        SubmissionDraft {
            name: "Anusha".to_string(),
            email: "anusha@example.com".to_string(),
            category: "Art".to_string(),
            description: "Evil Eye artwork series".to_string(),
            link: Some("https://example.com/portfolio".to_string()),
            file: None,
        }
    }

    #[test]
    fn validate_accepts_complete_draft() {
        assert!(valid_draft().validate().is_ok());
    }

    #[test]
    fn validate_collects_all_missing_fields() {
        let draft = SubmissionDraft::default();
        match draft.validate() {
            Err(SubmitError::Validation(errors)) => {
                assert_eq!(errors.len(), 3);
                assert!(errors.iter().any(|e| e.contains("name")));
                assert!(errors.iter().any(|e| e.contains("email")));
                assert!(errors.iter().any(|e| e.contains("description")));
            }
            other => panic!("expected validation errors, got {other:?}"),
        }
    }

    #[test]
    fn validate_rejects_oversized_file() {
        let mut draft = valid_draft();
        draft.file = Some(FileMeta {
            name: "huge.mp4".to_string(),
            size_bytes: MAX_FILE_SIZE_BYTES + 1,
        });
        match draft.validate() {
            Err(SubmitError::Validation(errors)) => {
                assert!(errors[0].contains("10MB"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn message_body_mentions_link_and_file() {
        let mut draft = valid_draft();
        draft.file = Some(FileMeta {
            name: "art.png".to_string(),
            size_bytes: 2048,
        });
        let body = draft.message_body();
        assert!(body.contains("Evil Eye artwork series"));
        assert!(body.contains("https://example.com/portfolio"));
        assert!(body.contains("art.png"));
        assert!(body.contains("2.00 KB"));
    }

    #[tokio::test]
    #[serial]
    async fn submit_posts_relay_payload() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/f/test")
            .match_header("accept", "application/json")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "name": "Anusha",
                "_replyto": "anusha@example.com",
                "_subject": "New Creator Submission: Anusha - Art"
            })))
            .with_status(200)
            .with_body(r#"{"ok": true}"#)
            .create_async()
            .await;

        let client = RelayClient::new(reqwest::Client::new(), format!("{}/f/test", server.url()));
        let submission = client.submit(&valid_draft()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(submission.name, "Anusha");
        assert_eq!(submission.work_url.as_deref(), Some("https://example.com/portfolio"));
    }

    #[tokio::test]
    #[serial]
    async fn submit_surfaces_relay_error_list() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/f/test")
            .with_status(422)
            .with_body(r#"{"errors": [{"message": "email is suspicious"}]}"#)
            .create_async()
            .await;

        let client = RelayClient::new(reqwest::Client::new(), format!("{}/f/test", server.url()));
        match client.submit(&valid_draft()).await {
            Err(SubmitError::Rejected { status, errors }) => {
                assert_eq!(status, 422);
                assert_eq!(errors, vec!["email is suspicious".to_string()]);
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn invalid_draft_never_reaches_the_wire() {
        // Endpoint that would fail if contacted.
        let client = RelayClient::new(reqwest::Client::new(), "http://127.0.0.1:1/f/test");
        let result = client.submit(&SubmissionDraft::default()).await;
        assert!(matches!(result, Err(SubmitError::Validation(_))));
    }

    #[test]
    fn log_is_newest_first() {
        let mut log = SubmissionLog::new();
        assert!(log.is_empty());

        let mut first = Submission::from_draft(&valid_draft());
        first.name = "first".to_string();
        let mut second = Submission::from_draft(&valid_draft());
        second.name = "second".to_string();

        log.record(first);
        log.record(second);

        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[0].name, "second");
        assert_eq!(log.entries()[1].name, "first");
    }
}
