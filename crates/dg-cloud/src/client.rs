//! Blocking HTTP client with API-key authentication.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{CloudError, CloudResult};

const API_KEY_HEADER: &str = "x-api-key";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Authenticated handle to the job service.
pub struct ApiClient {
    base_url: String,
    http: Client,
}

impl ApiClient {
    /// An empty API key is rejected up front so every later call can
    /// assume credentials are present.
    pub fn new(base_url: &str, api_key: &str) -> CloudResult<Self> {
        if api_key.trim().is_empty() {
            return Err(CloudError::MissingApiKey);
        }
        let mut headers = HeaderMap::new();
        let mut key_value =
            HeaderValue::from_str(api_key).map_err(|_| CloudError::InvalidApiKey)?;
        key_value.set_sensitive(true);
        headers.insert(API_KEY_HEADER, key_value);

        let http = Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn get_json<T: DeserializeOwned>(&self, path: &str) -> CloudResult<T> {
        let response = self.http.get(self.url(path)).send()?;
        let response = check_status(response)?;
        Ok(response.json()?)
    }

    pub fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> CloudResult<T> {
        let response = self.http.post(self.url(path)).json(body).send()?;
        let response = check_status(response)?;
        Ok(response.json()?)
    }

    pub fn put_bytes<T: DeserializeOwned>(&self, path: &str, bytes: Vec<u8>) -> CloudResult<T> {
        let response = self.http.put(self.url(path)).body(bytes).send()?;
        let response = check_status(response)?;
        Ok(response.json()?)
    }

    pub fn get_bytes(&self, path: &str) -> CloudResult<Vec<u8>> {
        let response = self.http.get(self.url(path)).send()?;
        let response = check_status(response)?;
        Ok(response.bytes()?.to_vec())
    }
}

fn check_status(
    response: reqwest::blocking::Response,
) -> CloudResult<reqwest::blocking::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().unwrap_or_default();
    Err(CloudError::Api {
        status: status.as_u16(),
        message: if message.is_empty() {
            status.to_string()
        } else {
            message
        },
    })
}
