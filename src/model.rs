use crate::{
    config::ModelConfig,
    error::{Error, Result},
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, trace};

/// A single text completion returned by the generative model.
///
/// The model guarantees nothing about the output format; callers impose
/// textual conventions by instruction only and must tolerate deviations.
#[derive(Debug, Clone)]
pub struct Completion {
    /// Raw completion text; may be empty
    pub text: String,
}

impl Completion {
    /// Creates a completion from raw model text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Returns true if the completion is empty or whitespace-only.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Interface to a generative text model.
///
/// Implementations should be thread-safe. Each call blocks until a response
/// (or error) is available; a bounded timeout belongs inside the
/// implementation and surfaces as [`Error::Model`].
pub trait TextModel: Send + Sync {
    /// Generates a completion for the given prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails for any reason (transport failure,
    /// timeout, non-success status, malformed response envelope).
    fn complete(&self, prompt: &str) -> Result<Completion>;
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

impl<'a> GenerateRequest<'a> {
    fn for_prompt(prompt: &'a str) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<ResponseCandidate>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ResponseCandidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    parts: Option<Vec<ResponsePart>>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

impl GenerateResponse {
    /// Joins all candidate part texts into one completion string.
    fn into_text(self) -> String {
        self.candidates
            .unwrap_or_default()
            .into_iter()
            .filter_map(|c| c.content)
            .filter_map(|c| c.parts)
            .flatten()
            .filter_map(|p| p.text)
            .collect::<Vec<_>>()
            .join("")
    }
}

/// Blocking HTTP client for a `generateContent`-style model endpoint.
pub struct GeminiClient {
    http: reqwest::blocking::Client,
    api_base: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    /// Creates a client from model configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the HTTP client cannot
    /// be constructed.
    pub fn new(config: &ModelConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(Error::config(
                "model API key is missing; set GEMINI_API_KEY or pass --api-key",
            ));
        }

        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::model(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_base, self.model
        )
    }
}

/// Maps transport-level failures onto the library error type.
fn map_transport_error(err: &reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::model(format!("request timed out: {err}"))
    } else if err.is_connect() {
        Error::model(format!("connection failed: {err}"))
    } else {
        Error::model(err.to_string())
    }
}

impl TextModel for GeminiClient {
    fn complete(&self, prompt: &str) -> Result<Completion> {
        trace!("Issuing completion request ({} prompt chars)", prompt.len());

        let response = self
            .http
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&GenerateRequest::for_prompt(prompt))
            .send()
            .map_err(|e| map_transport_error(&e))?;

        let status = response.status();
        let body: GenerateResponse = response
            .json()
            .map_err(|e| Error::model(format!("malformed response body: {e}")))?;

        if let Some(api_error) = body.error {
            return Err(Error::model(api_error.message));
        }

        if !status.is_success() {
            return Err(Error::model(format!("endpoint returned status {status}")));
        }

        let text = body.into_text();
        debug!("Received completion ({} chars)", text.len());

        Ok(Completion::new(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let request = GenerateRequest::for_prompt("hello model");
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello model");
    }

    #[test]
    fn test_response_text_joining() {
        let body = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "part one "}, {"text": "part two"}]}}
            ]
        }"#;
        let response: GenerateResponse = serde_json::from_str(body).unwrap();

        assert_eq!(response.into_text(), "part one part two");
    }

    #[test]
    fn test_response_without_candidates_is_empty() {
        let response: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response.into_text(), "");
    }

    #[test]
    fn test_api_error_parses() {
        let body = r#"{"error": {"message": "quota exhausted"}}"#;
        let response: GenerateResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.error.unwrap().message, "quota exhausted");
    }

    #[test]
    fn test_client_requires_api_key() {
        let config = ModelConfig::default();
        let result = GeminiClient::new(&config);
        assert!(result.is_err());
    }

    #[test]
    fn test_completion_is_blank() {
        assert!(Completion::new("").is_blank());
        assert!(Completion::new("  \n\t ").is_blank());
        assert!(!Completion::new("# Topic").is_blank());
    }
}
