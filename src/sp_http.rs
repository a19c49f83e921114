//! Minimal REST client for the host's `/_api` endpoints.
//!
//! Every call speaks OData v4 with minimal metadata and carries the caller's
//! session credential. Non-2xx answers are turned into errors; nothing is
//! retried.

use std::future::Future;

use reqwest::Client;
use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{RecorderError, Result};

const ODATA_ACCEPT: &str = "application/json;odata.metadata=minimal";
const ODATA_VERSION: &str = "4.0";

/// The two verbs the recorder needs from the host.
pub trait SpHttp: Send + Sync {
    fn get(&self, url: &str) -> impl Future<Output = Result<Value>> + Send;

    fn post(
        &self,
        url: &str,
        body: &Value,
        headers: &[(&'static str, &'static str)],
    ) -> impl Future<Output = Result<Value>> + Send;
}

/// Default OData headers, with caller headers replacing defaults of the same name.
fn odata_headers(overrides: &[(&'static str, &'static str)]) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(header::ACCEPT, HeaderValue::from_static(ODATA_ACCEPT));
    headers.insert("odata-version", HeaderValue::from_static(ODATA_VERSION));
    for (name, value) in overrides {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| RecorderError::InvalidHeader(name.to_string()))?;
        let header_value =
            HeaderValue::from_str(value).map_err(|_| RecorderError::InvalidHeader(name.to_string()))?;
        headers.insert(header_name, header_value);
    }
    Ok(headers)
}

/// Decode a JSON body into the shape a caller expects.
pub fn decode<T: DeserializeOwned>(value: Value, what: &'static str) -> Result<T> {
    serde_json::from_value(value).map_err(RecorderError::parse(what))
}

#[derive(Debug, Clone)]
pub struct SpRestClient {
    client: Client,
    token: Option<String>,
}

impl SpRestClient {
    pub fn new(client: Client, token: Option<String>) -> Self {
        Self { client, token }
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn read_json(url: &str, resp: reqwest::Response) -> Result<Value> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(RecorderError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let bytes = resp.bytes().await.map_err(|source| RecorderError::Transport {
            url: url.to_string(),
            source,
        })?;
        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes).map_err(RecorderError::parse("response body"))
    }
}

impl SpHttp for SpRestClient {
    async fn get(&self, url: &str) -> Result<Value> {
        tracing::debug!(url, "GET");
        let req = self.client.get(url).headers(odata_headers(&[])?);

        let resp = self
            .authorize(req)
            .send()
            .await
            .map_err(|source| RecorderError::Transport {
                url: url.to_string(),
                source,
            })?;

        Self::read_json(url, resp).await
    }

    async fn post(
        &self,
        url: &str,
        body: &Value,
        headers: &[(&'static str, &'static str)],
    ) -> Result<Value> {
        tracing::debug!(url, "POST");
        let req = self.client.post(url).headers(odata_headers(headers)?).json(body);

        let resp = self
            .authorize(req)
            .send()
            .await
            .map_err(|source| RecorderError::Transport {
                url: url.to_string(),
                source,
            })?;

        Self::read_json(url, resp).await
    }
}
