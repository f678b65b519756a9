use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use super::http;
use super::{ProviderOutcome, TranslationProvider};
use crate::app_config::{ProviderConfig, ProviderKind};
use crate::errors::ProviderError;

/// MyMemory client (`GET /get?q=..&langpair=src|tgt`)
#[derive(Debug)]
pub struct MyMemory {
    /// HTTP client for API requests
    client: Client,
    /// Base URL without trailing slash
    endpoint: String,
}

/// MyMemory response envelope
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MyMemoryResponse {
    pub response_data: ResponseData,
    /// Numeric status; MyMemory sometimes sends it as a string
    pub response_status: Value,
    #[serde(default)]
    pub response_details: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseData {
    pub translated_text: Option<String>,
}

impl MyMemory {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn from_config(config: &ProviderConfig) -> Self {
        debug_assert_eq!(config.kind, ProviderKind::MyMemory);
        Self::new(
            http::build_client(config.connect_timeout(), config.read_timeout()),
            config.effective_endpoint(),
        )
    }

    /// Map a 2xx response body to an outcome
    pub fn parse_body(body: &str) -> ProviderOutcome {
        let response: MyMemoryResponse = match serde_json::from_str(body) {
            Ok(r) => r,
            Err(e) => return ProviderOutcome::Failure(ProviderError::ParseError(e.to_string())),
        };

        let status = match &response.response_status {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };

        match status {
            Some(200) => match response.response_data.translated_text {
                Some(text) => ProviderOutcome::Success(text),
                None => ProviderOutcome::Failure(ProviderError::ParseError(
                    "missing responseData.translatedText".to_string(),
                )),
            },
            Some(other) => ProviderOutcome::Failure(ProviderError::ApiStatus {
                status: other,
                message: response.response_details.unwrap_or_default(),
            }),
            None => ProviderOutcome::Failure(ProviderError::ParseError(format!(
                "unexpected responseStatus {}",
                response.response_status
            ))),
        }
    }
}

#[async_trait]
impl TranslationProvider for MyMemory {
    fn name(&self) -> &str {
        "mymemory"
    }

    async fn translate(&self, text: &str, source: &str, target: &str) -> ProviderOutcome {
        let lang_pair = format!("{}|{}", source, target);
        let url = match http::build_url(&self.endpoint, "get", &[("q", text), ("langpair", &lang_pair)]) {
            Ok(url) => url,
            Err(e) => return ProviderOutcome::Failure(e),
        };

        match http::get_body(&self.client, url).await {
            Ok(body) => Self::parse_body(&body),
            Err(e) => ProviderOutcome::Failure(e),
        }
    }
}
