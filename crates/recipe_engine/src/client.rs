use futures_util::StreamExt;
use recipe_logging::{recipe_debug, recipe_info};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde_json::Value;

use crate::config::ClientSettings;
use crate::error::{FailureKind, RecipeError, ServiceFailure};
use crate::prompt::GenerateRequest;

/// The recipe-generation backend, seen from the client side.
#[async_trait::async_trait]
pub trait RecipeService: Send + Sync {
    /// Send one instruction and return the decoded JSON response body.
    async fn generate(&self, message: &str) -> Result<Value, RecipeError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestRecipeService {
    settings: ClientSettings,
    client: reqwest::Client,
}

impl ReqwestRecipeService {
    pub fn new(settings: ClientSettings) -> Result<Self, RecipeError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ServiceFailure::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn too_large(&self, actual: u64) -> ServiceFailure {
        ServiceFailure::new(
            FailureKind::TooLarge {
                max_bytes: self.settings.max_bytes,
                actual: Some(actual),
            },
            "response too large",
        )
    }
}

#[async_trait::async_trait]
impl RecipeService for ReqwestRecipeService {
    async fn generate(&self, message: &str) -> Result<Value, RecipeError> {
        let endpoint = self.settings.endpoint()?;
        let body = serde_json::to_vec(&GenerateRequest { message })
            .map_err(|err| ServiceFailure::new(FailureKind::InvalidBody, err.to_string()))?;

        recipe_info!("POST {} message_len={}", endpoint, message.len());
        let response = self
            .client
            .post(endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(self.too_large(content_len).into());
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(self.too_large(next_len).into());
            }
            bytes.extend_from_slice(&chunk);
        }
        recipe_debug!("response status={} bytes={}", status, bytes.len());

        if !status.is_success() {
            // The backend reports its own failures as `{ "error": ... }` with a 4xx/5xx.
            if let Some(message) = backend_error(&bytes) {
                return Err(ServiceFailure::backend(message).into());
            }
            return Err(ServiceFailure::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            )
            .into());
        }

        serde_json::from_slice::<Value>(&bytes).map_err(|err| {
            ServiceFailure::new(FailureKind::InvalidBody, err.to_string()).into()
        })
    }
}

fn backend_error(bytes: &[u8]) -> Option<String> {
    let value = serde_json::from_slice::<Value>(bytes).ok()?;
    value
        .get("error")
        .and_then(Value::as_str)
        .filter(|message| !message.is_empty())
        .map(ToOwned::to_owned)
}

fn map_reqwest_error(err: reqwest::Error) -> ServiceFailure {
    if err.is_timeout() {
        return ServiceFailure::new(FailureKind::Timeout, err.to_string());
    }
    ServiceFailure::new(FailureKind::Network, err.to_string())
}
