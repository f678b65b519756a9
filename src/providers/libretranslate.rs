use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::http;
use super::{ProviderOutcome, TranslationProvider};
use crate::app_config::{ProviderConfig, ProviderKind};
use crate::errors::ProviderError;

/// LibreTranslate client (`GET /translate?q=..&source=..&target=..&format=text`)
#[derive(Debug)]
pub struct LibreTranslate {
    client: Client,
    endpoint: String,
}

/// LibreTranslate response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibreTranslateResponse {
    pub translated_text: String,
}

impl LibreTranslate {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn from_config(config: &ProviderConfig) -> Self {
        debug_assert_eq!(config.kind, ProviderKind::LibreTranslate);
        Self::new(
            http::build_client(config.connect_timeout(), config.read_timeout()),
            config.effective_endpoint(),
        )
    }

    /// Map a 2xx response body to an outcome
    pub fn parse_body(body: &str) -> ProviderOutcome {
        serde_json::from_str::<LibreTranslateResponse>(body)
            .map(|r| r.translated_text)
            .map_err(|e| ProviderError::ParseError(e.to_string()))
            .into()
    }
}

#[async_trait]
impl TranslationProvider for LibreTranslate {
    fn name(&self) -> &str {
        "libretranslate"
    }

    async fn translate(&self, text: &str, source: &str, target: &str) -> ProviderOutcome {
        let params = [("q", text), ("source", source), ("target", target), ("format", "text")];
        let url = match http::build_url(&self.endpoint, "translate", &params) {
            Ok(url) => url,
            Err(e) => return ProviderOutcome::Failure(e),
        };

        match http::get_body(&self.client, url).await {
            Ok(body) => Self::parse_body(&body),
            Err(e) => ProviderOutcome::Failure(e),
        }
    }
}
