//! REST client for the portal backend.
//!
//! Wraps the generation endpoints (`/api/crossword/generate`,
//! `/api/horoscope/generate`) and the informational ones (`/api/health`,
//! `/api/version`, `/api/crossword/themes`) using [`reqwest`]. Every decoded
//! body is checked against the expected shape before it is handed out.

use async_trait::async_trait;
use portal_core::crossword::{CrosswordParams, CrosswordPuzzle};
use portal_core::error::CoreError;
use portal_core::horoscope::HoroscopeRequest;
use serde::Deserialize;

use crate::config::ClientConfig;

/// HTTP client for one portal backend.
#[derive(Debug, Clone)]
pub struct PortalApi {
    client: reqwest::Client,
    api_url: String,
}

/// Response of `GET /api/health`.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub service: Option<String>,
}

/// Response of `GET /api/version`.
#[derive(Debug, Clone, Deserialize)]
pub struct VersionResponse {
    pub app: String,
    pub version: String,
    #[serde(default)]
    pub azure: Option<AiBackendInfo>,
}

/// AI deployment details reported by `/api/version`.
#[derive(Debug, Clone, Deserialize)]
pub struct AiBackendInfo {
    pub endpoint_configured: bool,
    pub deployment: String,
    pub api_version: String,
}

#[derive(Debug, Deserialize)]
struct ThemesResponse {
    themes: Vec<String>,
}

/// Response of `POST /api/horoscope/generate`.
///
/// Only `horoscope` is required; the rest echoes the request.
#[derive(Debug, Clone, Deserialize)]
pub struct HoroscopeReply {
    pub horoscope: String,
    #[serde(default)]
    pub sign: Option<String>,
    #[serde(default, rename = "type")]
    pub horoscope_type: Option<String>,
    #[serde(default)]
    pub magazine: Option<String>,
    #[serde(default)]
    pub tone: Option<String>,
}

/// Errors from the portal REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code.
    #[error("Portal API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the error body, or the raw body.
        message: String,
    },

    /// The body could not be decoded or does not have the expected shape.
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// The request parameters were rejected before sending.
    #[error(transparent)]
    Invalid(#[from] CoreError),
}

/// Something that can write one sign's horoscope.
///
/// Implemented by [`PortalApi`]; the seam lets the runner be driven by any
/// source.
#[async_trait]
pub trait HoroscopeGenerator: Send + Sync {
    async fn generate(&self, request: &HoroscopeRequest) -> Result<String, ApiError>;
}

impl PortalApi {
    /// Create a new API client for a backend.
    ///
    /// * `api_url` - Base HTTP URL, e.g. `http://localhost:8000`.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_url)
    }

    /// Create an API client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self { client, api_url }
    }

    /// Build a client honouring the configured URL and optional timeout.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_client(builder.build()?, config.api_url.clone()))
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// `GET /api/health`.
    pub async fn health(&self) -> Result<HealthResponse, ApiError> {
        let response = self
            .client
            .get(format!("{}/api/health", self.api_url))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// `GET /api/version`.
    pub async fn version(&self) -> Result<VersionResponse, ApiError> {
        let response = self
            .client
            .get(format!("{}/api/version", self.api_url))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// `GET /api/crossword/themes`: the backend's predefined theme names.
    pub async fn themes(&self) -> Result<Vec<String>, ApiError> {
        let response = self
            .client
            .get(format!("{}/api/crossword/themes", self.api_url))
            .send()
            .await?;

        let body: ThemesResponse = Self::parse_response(response).await?;
        Ok(body.themes)
    }

    /// Generate a themed crossword puzzle.
    ///
    /// Parameters are validated first; a decoded puzzle that breaks the grid
    /// invariants is reported as [`ApiError::Malformed`].
    pub async fn generate_crossword(
        &self,
        params: &CrosswordParams,
    ) -> Result<CrosswordPuzzle, ApiError> {
        params.validate()?;

        tracing::debug!(theme = %params.theme, size = params.size, "Requesting crossword");

        let response = self
            .client
            .post(format!("{}/api/crossword/generate", self.api_url))
            .json(params)
            .send()
            .await?;

        let puzzle: CrosswordPuzzle = Self::parse_response(response).await?;
        puzzle
            .validate()
            .map_err(|e| ApiError::Malformed(e.to_string()))?;

        tracing::debug!(
            theme = %puzzle.theme,
            word_count = puzzle.word_count,
            "Crossword received",
        );
        Ok(puzzle)
    }

    /// Generate one sign's horoscope and return its text as sent.
    ///
    /// A blank reply is [`ApiError::Malformed`].
    pub async fn generate_horoscope(&self, request: &HoroscopeRequest) -> Result<String, ApiError> {
        let response = self
            .client
            .post(format!("{}/api/horoscope/generate", self.api_url))
            .json(request)
            .send()
            .await?;

        let reply: HoroscopeReply = Self::parse_response(response).await?;
        if reply.horoscope.trim().is_empty() {
            return Err(ApiError::Malformed(format!(
                "Empty horoscope for {}",
                request.zodiac_sign
            )));
        }
        Ok(reply.horoscope)
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or an [`ApiError::Api`] carrying the
    /// backend's message on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }
        Ok(response)
    }

    /// Decode a successful JSON body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let response = Self::ensure_success(response).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl HoroscopeGenerator for PortalApi {
    async fn generate(&self, request: &HoroscopeRequest) -> Result<String, ApiError> {
        self.generate_horoscope(request).await
    }
}

/// Pull a human-readable message out of an error body.
///
/// The backend reports failures as `{"detail": {"message": ..}}`, sometimes
/// with only `error`, and framework errors as `{"detail": ".."}`.
fn error_message(body: &str) -> String {
    let Ok(json) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.trim().to_string();
    };

    let detail = &json["detail"];
    let candidates = [
        &detail["message"],
        &detail["error"],
        detail,
        &json["error"]["message"],
        &json["message"],
    ];

    let message = candidates
        .iter()
        .find_map(|v| v.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| body.trim().to_string());
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_from_detail_message() {
        let body = r#"{"detail": {"error": "Azure OpenAI API error", "message": "Rate limit exceeded"}}"#;
        assert_eq!(error_message(body), "Rate limit exceeded");
    }

    #[test]
    fn message_from_detail_error() {
        let body = r#"{"detail": {"error": "userPrompt cannot be empty"}}"#;
        assert_eq!(error_message(body), "userPrompt cannot be empty");
    }

    #[test]
    fn message_from_plain_detail() {
        let body = r#"{"detail": "Not Found"}"#;
        assert_eq!(error_message(body), "Not Found");
    }

    #[test]
    fn message_falls_back_to_raw_body() {
        assert_eq!(error_message("Bad Gateway\n"), "Bad Gateway");
        assert_eq!(error_message(r#"{"unexpected": 1}"#), r#"{"unexpected": 1}"#);
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let api = PortalApi::new("http://localhost:8000/");
        assert_eq!(api.api_url(), "http://localhost:8000");
    }

    #[test]
    fn api_error_display() {
        let err = ApiError::Api {
            status: 502,
            message: "AI service error".to_string(),
        };
        assert_eq!(err.to_string(), "Portal API error (502): AI service error");
    }

    #[test]
    fn request_error_display() {
        let req_err = reqwest::Client::new().get("://bad").build().unwrap_err();
        let err = ApiError::Request(req_err);
        assert!(err.to_string().contains("HTTP request failed"));
    }
}
