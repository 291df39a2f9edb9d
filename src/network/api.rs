use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::ApiEndpoint;
use crate::network::NetworkError;

/// Thin JSON-over-HTTP client shared by the node and indexer clients.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base: String,
    token_header: &'static str,
    token: String,
    http: Client
}

impl ApiClient {
    pub fn new(endpoint: &ApiEndpoint, token_header: &'static str, timeout: Duration) -> Result<Self, NetworkError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(Self {
            base: endpoint.url.as_str().trim_end_matches('/').to_string(),
            token_header,
            token: endpoint.token.clone(),
            http
        })
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, NetworkError> {
        let (url, request) = self.request(Method::GET, path);
        let response = ensure_success(&url, request.send().await?).await?;

        Ok(response.json().await?)
    }

    /// Like `get_json`, but a 404 is an answer rather than an error.
    pub async fn get_json_if_found<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, NetworkError> {
        let (url, request) = self.request(Method::GET, path);
        let response = request.send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!("GET {url} found nothing");
            return Ok(None);
        }

        let response = ensure_success(&url, response).await?;

        Ok(Some(response.json().await?))
    }

    pub async fn post_bytes<T: DeserializeOwned>(&self, path: &str, content_type: &'static str, body: Vec<u8>) -> Result<T, NetworkError> {
        let (url, request) = self.request(Method::POST, path);
        let response = request
            .header(CONTENT_TYPE, content_type)
            .body(body)
            .send()
            .await?;
        let response = ensure_success(&url, response).await?;

        Ok(response.json().await?)
    }

    fn request(&self, method: Method, path: &str) -> (String, RequestBuilder) {
        let url = format!("{}{}", self.base, path);
        debug!("{method} {url}");

        let mut request = self.http.request(method, &url);

        if !self.token.is_empty() {
            request = request.header(self.token_header, &self.token);
        }

        (url, request)
    }
}

async fn ensure_success(url: &str, response: Response) -> Result<Response, NetworkError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();

    Err(NetworkError::Status {
        url: url.to_string(),
        status: status.as_u16(),
        body
    })
}
