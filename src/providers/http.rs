/*!
 * Shared HTTP plumbing for query-parameter providers.
 */

use log::debug;
use reqwest::Client;
use std::time::Duration;
use url::Url;

use crate::errors::ProviderError;

/// Build a client bounded by the connect and read timeouts.
///
/// reqwest 0.11 only offers a connect timeout and a total timeout, so the
/// total is the sum of both.
pub fn build_client(connect_timeout: Duration, read_timeout: Duration) -> Client {
    Client::builder()
        .connect_timeout(connect_timeout)
        .timeout(connect_timeout + read_timeout)
        .build()
        .unwrap_or_default()
}

/// Build `{base}/{path}?{params}` with proper query encoding
pub fn build_url(base: &str, path: &str, params: &[(&str, &str)]) -> Result<Url, ProviderError> {
    let raw = format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'));
    Url::parse_with_params(&raw, params)
        .map_err(|e| ProviderError::RequestFailed(format!("invalid URL {}: {}", raw, e)))
}

/// Send a GET request and return the body of a 2xx response
pub async fn get_body(client: &Client, url: Url) -> Result<String, ProviderError> {
    debug!("GET {}", url.path());

    let response = client.get(url).send().await.map_err(map_reqwest_error)?;

    let status = response.status();
    if !status.is_success() {
        return Err(ProviderError::HttpStatus {
            status: status.as_u16(),
        });
    }

    let body = response.text().await.map_err(map_reqwest_error)?;
    if body.trim().is_empty() {
        return Err(ProviderError::EmptyBody);
    }

    Ok(body)
}

fn map_reqwest_error(error: reqwest::Error) -> ProviderError {
    if error.is_timeout() {
        ProviderError::Timeout(error.to_string())
    } else {
        ProviderError::RequestFailed(error.to_string())
    }
}
