//! Gemini API client
//!
//! Direct HTTP client for `generateContent`. The client is stateless: the
//! session layer owns the conversation history and passes the full turn list
//! on every call.

use crate::error::ChatError;
use crate::gemini::types::{Content, GenerateRequest, GenerateResponse};

/// HTTP client bound to one credential and model
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a client
    ///
    /// The shared `reqwest::Client` is passed in so all requests reuse one
    /// connection pool.
    pub fn new(
        http: reqwest::Client,
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            http,
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.into(),
        }
    }

    /// Send the conversation to the model and return the reply text
    ///
    /// `contents` is the full turn history ending with the new user turn.
    /// An empty reply text is a *successful* result: the dispatcher decides
    /// what to do with an unhelpful answer, so it is returned as `Ok("")`
    /// rather than an error.
    pub async fn generate(
        &self,
        contents: Vec<Content>,
        system_instruction: Option<Content>,
    ) -> Result<String, ChatError> {
        if self.api_key.is_empty() {
            return Err(ChatError::MissingCredential);
        }

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let request_body = GenerateRequest {
            contents,
            system_instruction,
        };

        tracing::debug!(
            model = %self.model,
            turns = request_body.contents.len(),
            "Calling Gemini API"
        );

        let response = self.http.post(&url).json(&request_body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let status_code = status.as_u16();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());

            tracing::error!(
                status_code,
                error_body = %error_body,
                "Gemini API returned error status"
            );

            if status_code == 429 {
                return Err(ChatError::RateLimited(error_body));
            }
            return Err(ChatError::Api {
                status: status_code,
                body: error_body,
            });
        }

        let response_body = response.text().await?;
        let parsed: GenerateResponse = serde_json::from_str(&response_body).map_err(|e| {
            ChatError::MalformedResponse(format!("{e} (body: {response_body})"))
        })?;

        if let Some(feedback) = &parsed.prompt_feedback {
            if let Some(reason) = &feedback.block_reason {
                return Err(ChatError::Blocked(reason.clone()));
            }
        }

        let candidate = parsed
            .candidates
            .first()
            .ok_or_else(|| ChatError::MalformedResponse("response contains no candidates".into()))?;

        let text = candidate
            .content
            .parts
            .first()
            .map(|part| part.text.clone())
            .unwrap_or_default();

        tracing::debug!(response_len = text.len(), "Gemini API reply received");
        Ok(text)
    }
}
