// Async HTTP client for a Gemini-style `generateContent` API.
//
// Base path: /v1beta/
// Auth: x-goog-api-key header

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;
use url::Url;

use super::types::{ErrorEnvelope, GenerateContentRequest, GenerateContentResponse};
use crate::error::Error;
use crate::transport::{TransportConfig, body_preview};

/// Default public endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/";

/// Default model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Async client for the language-model `generateContent` endpoint.
pub struct AdvisoryClient {
    http: reqwest::Client,
    base_url: Url,
    model: String,
}

impl AdvisoryClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from an API key, injecting `x-goog-api-key` on every request.
    pub fn from_api_key(
        base_url: &str,
        model: impl Into<String>,
        api_key: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let mut key_value =
            HeaderValue::from_str(api_key.expose_secret()).map_err(|e| Error::Authentication {
                message: format!("invalid API key header value: {e}"),
            })?;
        key_value.set_sensitive(true);
        headers.insert("x-goog-api-key", key_value);

        let http = transport.build_client_with_headers(headers)?;
        Ok(Self {
            http,
            base_url: Self::normalize_base_url(base_url)?,
            model: model.into(),
        })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(
        base_url: &str,
        model: impl Into<String>,
        http: reqwest::Client,
    ) -> Result<Self, Error> {
        Ok(Self {
            http,
            base_url: Self::normalize_base_url(base_url)?,
            model: model.into(),
        })
    }

    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    /// The configured model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// Run a single-turn prompt and return the model's text.
    ///
    /// `POST /models/{model}:generateContent`
    pub async fn generate_text(&self, prompt: &str) -> Result<String, Error> {
        let response = self
            .generate_content(&GenerateContentRequest::from_prompt(prompt))
            .await?;
        response.text().ok_or(Error::EmptyCompletion)
    }

    /// Raw `generateContent` call.
    pub async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, Error> {
        let url = self
            .base_url
            .join(&format!("models/{}:generateContent", self.model))?;
        debug!(model = %self.model, "POST {url}");

        let resp = self.http.post(url).json(request).send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            if status == reqwest::StatusCode::UNAUTHORIZED
                || status == reqwest::StatusCode::FORBIDDEN
            {
                return Err(Error::Authentication {
                    message: format!("advisory API rejected the key (HTTP {})", status.as_u16()),
                });
            }
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .ok()
                .and_then(|env| env.error.message.or(env.error.status))
                .unwrap_or_else(|| body_preview(&body));
            return Err(Error::Advisory {
                message,
                status: status.as_u16(),
            });
        }

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: format!("{e} (body preview: {:?})", body_preview(&body)),
            body,
        })
    }
}
