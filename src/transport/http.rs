//! `reqwest`-backed transport for the Civo API.

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

use super::{Method, Transport, TransportError, TransportFuture};
use crate::config::CivoConfig;

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = concat!("civo-rs/", env!("CARGO_PKG_VERSION"));

/// Longest slice of an error body echoed into the log.
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Error envelope returned by the Civo API on non-success statuses.
#[derive(Debug, Default, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    reason: String,
}

/// Transport that talks to the Civo API over HTTPS.
///
/// Every request carries the bearer token and the configured region as a
/// `region` query parameter.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    region: String,
}

impl HttpTransport {
    /// Builds a transport for the given API endpoint, key and region.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Request`] when the underlying HTTP client
    /// cannot be constructed.
    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        region: impl Into<String>,
    ) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|err| TransportError::Request {
                message: err.to_string(),
            })?;
        Ok(Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_owned(),
            api_key: api_key.into(),
            region: region.into(),
        })
    }

    /// Builds a transport from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Request`] when the underlying HTTP client
    /// cannot be constructed.
    pub fn from_config(config: &CivoConfig) -> Result<Self, TransportError> {
        Self::new(&config.api_url, &config.api_key, &config.region)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.api_url)
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Vec<u8>, TransportError> {
        let url = self.url(path);
        tracing::debug!(%method, %url, "sending request");

        let verb = match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };
        let mut request = self
            .client
            .request(verb, &url)
            .bearer_auth(&self.api_key)
            .query(&[("region", self.region.as_str())]);
        if let Some(payload) = body {
            request = request.json(payload);
        }

        let response = request
            .send()
            .await
            .map_err(|err| TransportError::Request {
                message: err.to_string(),
            })?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|err| TransportError::Request {
                message: err.to_string(),
            })?;

        if !status.is_success() {
            let text = String::from_utf8_lossy(&bytes).into_owned();
            tracing::warn!(
                %method,
                %url,
                status = status.as_u16(),
                body = %truncate_for_log(&text),
                "API request failed"
            );
            return Err(status_error(status.as_u16(), &text));
        }

        if bytes.is_empty() {
            return Ok(b"null".to_vec());
        }
        Ok(bytes.to_vec())
    }
}

impl Transport for HttpTransport {
    fn send<'a>(
        &'a self,
        method: Method,
        path: &'a str,
        body: Option<&'a Value>,
    ) -> TransportFuture<'a> {
        Box::pin(self.execute(method, path, body))
    }
}

fn status_error(status: u16, text: &str) -> TransportError {
    match serde_json::from_str::<ApiErrorBody>(text) {
        Ok(parsed) if !parsed.code.is_empty() || !parsed.reason.is_empty() => {
            TransportError::Status {
                status,
                code: if parsed.code.is_empty() {
                    String::from("unknown")
                } else {
                    parsed.code
                },
                reason: parsed.reason,
            }
        }
        _ => TransportError::Status {
            status,
            code: String::from("unknown"),
            reason: text.trim().to_owned(),
        },
    }
}

fn truncate_for_log(body: &str) -> String {
    let count = body.chars().count();
    if count <= MAX_LOG_BODY_LENGTH {
        return body.to_owned();
    }
    let head: String = body.chars().take(MAX_LOG_BODY_LENGTH).collect();
    format!("{head}... [truncated, {count} chars total]")
}
