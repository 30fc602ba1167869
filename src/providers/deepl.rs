/*!
 * DeepL API client implementation.
 *
 * Talks to the DeepL REST API v2 over form-encoded requests. The endpoint
 * host is derived from the API key tier unless overridden: keys suffixed
 * `:fx` belong to the free tier on `api-free.deepl.com`, all other keys use
 * `api.deepl.com`.
 */

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::errors::ProviderError;
use crate::providers::Translator;

/// Default endpoint for paid tier API keys
const PAID_ENDPOINT: &str = "https://api.deepl.com";
/// Default endpoint for free tier API keys (suffixed ":fx")
const FREE_ENDPOINT: &str = "https://api-free.deepl.com";
/// Maximum length of an API error body kept in error messages
const ERROR_BODY_LIMIT: usize = 200;

/// DeepL API client
#[derive(Debug, Clone)]
pub struct DeepL {
    /// API key sent in the Authorization header
    api_key: String,
    /// Base endpoint URL, without the /v2 suffix or a trailing slash
    endpoint: String,
    /// HTTP client for making requests
    client: Client,
}

/// Response payload of the translate endpoint
#[derive(Debug, Deserialize)]
struct TranslateResponse {
    translations: Vec<TranslatedText>,
}

/// One translated text within a translate response
#[derive(Debug, Deserialize)]
struct TranslatedText {
    text: String,
}

impl DeepL {
    /// Create a new client with the default 30 second request timeout
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self::new_with_config(api_key, endpoint, 30)
    }

    /// Create a new client with an explicit request timeout.
    ///
    /// An empty `endpoint` selects the default host for the key tier.
    pub fn new_with_config(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        timeout_secs: u64,
    ) -> Self {
        let api_key = api_key.into();
        let endpoint = endpoint.into();
        let endpoint = if endpoint.is_empty() {
            Self::default_endpoint(&api_key).to_string()
        } else {
            endpoint.trim_end_matches('/').to_string()
        };

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_default();

        DeepL {
            api_key,
            endpoint,
            client,
        }
    }

    /// Default endpoint host for an API key
    pub fn default_endpoint(api_key: &str) -> &'static str {
        if api_key.ends_with(":fx") {
            FREE_ENDPOINT
        } else {
            PAID_ENDPOINT
        }
    }

    /// Base endpoint this client talks to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Map a non-success response status to the matching provider error
    fn error_for_status(status: StatusCode, body: &str) -> ProviderError {
        let message: String = body.chars().take(ERROR_BODY_LIMIT).collect();
        match status.as_u16() {
            401 | 403 => ProviderError::AuthenticationError(format!(
                "DeepL rejected the API key: {}",
                message
            )),
            456 | 429 => ProviderError::RateLimitExceeded(format!(
                "DeepL rate or quota limit reached: {}",
                message
            )),
            code => ProviderError::ApiError {
                status_code: code,
                message,
            },
        }
    }

    /// Map a transport error to the matching provider error
    fn error_for_transport(error: reqwest::Error) -> ProviderError {
        if error.is_connect() || error.is_timeout() {
            ProviderError::ConnectionError(error.to_string())
        } else {
            ProviderError::RequestFailed(error.to_string())
        }
    }
}

#[async_trait]
impl Translator for DeepL {
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, ProviderError> {
        let url = format!("{}/v2/translate", self.endpoint);
        let source = source_language.trim().to_uppercase();
        let target = target_language.trim().to_uppercase();

        debug!(
            "DeepL translate request: {} -> {}, {} chars",
            source,
            target,
            text.len()
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
            .form(&[
                ("text", text),
                ("source_lang", source.as_str()),
                ("target_lang", target.as_str()),
                ("preserve_formatting", "1"),
            ])
            .send()
            .await
            .map_err(Self::error_for_transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let provider_error = Self::error_for_status(status, &body);
            error!("DeepL translate failed: {}", provider_error);
            return Err(provider_error);
        }

        let payload: TranslateResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        payload
            .translations
            .into_iter()
            .next()
            .map(|translation| translation.text.trim_end().to_string())
            .ok_or_else(|| {
                ProviderError::ParseError("Response contained no translations".to_string())
            })
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        let url = format!("{}/v2/usage", self.endpoint);

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
            .send()
            .await
            .map_err(Self::error_for_transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::error_for_status(status, &body));
        }

        debug!("DeepL connection test succeeded against {}", self.endpoint);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "deepl"
    }
}
