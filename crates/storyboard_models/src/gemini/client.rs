//! Gemini REST client.

use super::conversion;
use super::dto::{GenerateContentRequest, GenerateContentResponse};
use crate::{GenerationMetrics, RetryPolicy, retry_transient};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Instant;
use storyboard_config::GeminiConfig;
use storyboard_core::{ImagePayload, ImageRequest, ShotlistDocument, ShotlistRequest};
use storyboard_error::{GenerationError, GenerationErrorKind};
use storyboard_interface::{ImageBackend, ShotlistBackend};
use storyboard_narrative::parse_shotlist;
use tracing::{debug, instrument};

const PROVIDER: &str = "gemini";

/// Environment variables checked for the API key, in order.
const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Client for the Gemini `generateContent` endpoint.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct GeminiClient {
    http: Client,
    api_key: String,
    api_base: String,
    text_model: String,
    image_model: String,
    retry: RetryPolicy,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("api_base", &self.api_base)
            .field("text_model", &self.text_model)
            .field("image_model", &self.image_model)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Create a client, reading the API key from `GEMINI_API_KEY` (or `API_KEY`).
    ///
    /// # Errors
    ///
    /// Returns `MissingApiKey` if neither variable is set, or
    /// `BackendUnavailable` if the HTTP client cannot be built.
    #[instrument(skip_all)]
    pub fn new(config: &GeminiConfig) -> Result<Self, GenerationError> {
        let api_key = API_KEY_VARS
            .iter()
            .find_map(|var| std::env::var(var).ok().filter(|v| !v.trim().is_empty()))
            .ok_or_else(|| GenerationError::new(GenerationErrorKind::MissingApiKey))?;
        Self::with_api_key(api_key, config)
    }

    /// Create a client with an explicit API key.
    ///
    /// # Errors
    ///
    /// Returns `BackendUnavailable` if the HTTP client cannot be built.
    #[instrument(skip_all)]
    pub fn with_api_key(
        api_key: impl Into<String>,
        config: &GeminiConfig,
    ) -> Result<Self, GenerationError> {
        let http = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| conversion::error_from_transport(&e))?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            text_model: config.text_model.clone(),
            image_model: config.image_model.clone(),
            retry: RetryPolicy::from(config),
        })
    }

    /// Model used for the story and shotlist.
    pub fn text_model(&self) -> &str {
        &self.text_model
    }

    /// Model used for shot images.
    pub fn image_model(&self) -> &str {
        &self.image_model
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.api_base, model)
    }

    /// One `generateContent` round trip, without retries.
    async fn post(
        &self,
        model: &str,
        body: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GenerationError> {
        let url = self.endpoint(model);
        debug!(url = %url, "Sending Gemini API request");

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| conversion::error_from_transport(&e))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(conversion::error_from_status(status.as_u16(), &text));
        }

        response.json().await.map_err(|e| {
            GenerationError::new(GenerationErrorKind::MalformedResponse(format!(
                "failed to decode Gemini response: {}",
                e
            )))
        })
    }

    /// Retried round trip with metrics.
    async fn call(
        &self,
        model: &str,
        operation: &str,
        body: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GenerationError> {
        let started = Instant::now();
        let result = retry_transient(self.retry, || self.post(model, body)).await;
        let metrics = GenerationMetrics::get();
        match &result {
            Ok(_) => metrics.record_request(
                PROVIDER,
                model,
                operation,
                started.elapsed().as_secs_f64(),
            ),
            Err(e) => metrics.record_error(PROVIDER, model, operation, e.kind.label()),
        }
        result
    }
}

#[async_trait]
impl ShotlistBackend for GeminiClient {
    #[instrument(skip(self, request), fields(model = %self.text_model))]
    async fn generate_shotlist(
        &self,
        request: &ShotlistRequest,
    ) -> Result<ShotlistDocument, GenerationError> {
        let body = conversion::shotlist_body(request);
        let response = self.call(&self.text_model, "shotlist", &body).await?;
        let text = conversion::text_from_response(&response)?;
        let document = parse_shotlist(&text)?;
        debug!(shots = document.shots.len(), "Received shotlist");
        Ok(document)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}

#[async_trait]
impl ImageBackend for GeminiClient {
    #[instrument(
        skip(self, request),
        fields(model = %self.image_model, references = request.reference_images.len())
    )]
    async fn generate_image(
        &self,
        request: &ImageRequest,
    ) -> Result<ImagePayload, GenerationError> {
        let body = conversion::image_body(request);
        let response = self.call(&self.image_model, "image", &body).await?;
        let image = conversion::image_from_response(&response)?;
        GenerationMetrics::get().record_image(&self.image_model, image.len());
        debug!(bytes = image.len(), mime_type = %image.mime_type(), "Received image");
        Ok(image)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GeminiConfig {
        GeminiConfig {
            api_base: "https://example.invalid/v1beta/".to_string(),
            text_model: "text-model".to_string(),
            image_model: "image-model".to_string(),
            request_timeout_secs: 5,
            max_retries: 0,
            retry_backoff_ms: 1,
            max_retry_delay_secs: 1,
            no_retry: true,
        }
    }

    #[test]
    fn endpoint_joins_base_and_model() {
        let client = GeminiClient::with_api_key("key", &config()).unwrap();
        assert_eq!(
            client.endpoint("image-model"),
            "https://example.invalid/v1beta/models/image-model:generateContent"
        );
    }

    #[test]
    fn debug_output_hides_api_key() {
        let client = GeminiClient::with_api_key("secret-key", &config()).unwrap();
        assert!(!format!("{:?}", client).contains("secret-key"));
    }
}
