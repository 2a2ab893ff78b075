use std::time::Duration;

use url::Url;

use crate::error::{FailureKind, ServiceFailure};

/// Environment variable naming the generation service base URL.
pub const API_URL_ENV: &str = "RECIPE_API_URL";
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            // Reasoning models take a while before they answer.
            request_timeout: Duration::from_secs(60),
            max_bytes: 1024 * 1024,
        }
    }
}

impl ClientSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`ClientSettings::from_env`] but reads variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Self::default();
        if let Some(base_url) = lookup(API_URL_ENV).filter(|value| !value.trim().is_empty()) {
            settings.base_url = base_url.trim().to_string();
        }
        settings
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// `{base_url}/generate`, validated.
    pub fn endpoint(&self) -> Result<Url, ServiceFailure> {
        let raw = format!("{}/generate", self.base_url.trim_end_matches('/'));
        Url::parse(&raw).map_err(|err| ServiceFailure::new(FailureKind::InvalidUrl, err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_overrides_base_url() {
        let settings = ClientSettings::from_lookup(|key| {
            (key == API_URL_ENV).then(|| " https://recipes.example.com/ ".to_string())
        });
        assert_eq!(settings.base_url, "https://recipes.example.com/");
        assert_eq!(
            settings.endpoint().unwrap().as_str(),
            "https://recipes.example.com/generate"
        );
    }

    #[test]
    fn blank_env_keeps_default() {
        let settings = ClientSettings::from_lookup(|_| Some("   ".to_string()));
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn endpoint_keeps_base_path() {
        let settings = ClientSettings::default().with_base_url("http://host:8080/api");
        assert_eq!(
            settings.endpoint().unwrap().as_str(),
            "http://host:8080/api/generate"
        );
    }

    #[test]
    fn invalid_base_url_is_reported() {
        let err = ClientSettings::default()
            .with_base_url("not a url")
            .endpoint()
            .unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidUrl);
    }
}
