//! Client handle shared by every resource module.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::CivoConfig;
use crate::error::{ClientError, ResourceKind};
use crate::transport::{HttpTransport, Method, Transport};

/// Acknowledgment returned by delete, attach, detach, and resize calls.
#[derive(Clone, Debug, Default, Deserialize, Serialize, Eq, PartialEq)]
#[serde(default)]
pub struct SimpleResponse {
    /// Identifier of the affected resource, when the API echoes it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Name of the affected resource, when the API echoes it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Outcome reported by the API, normally `success`.
    pub result: String,
    /// Provider error code, present on soft failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Provider error reason, present on soft failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl SimpleResponse {
    /// Returns `true` when the API reported success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.result.eq_ignore_ascii_case("success")
    }
}

/// Typed client for the Civo v2 API.
///
/// The client holds only the transport and the region, both read-only after
/// construction, so it can be shared between tasks when the transport allows.
#[derive(Clone, Debug)]
pub struct CivoClient<T = HttpTransport> {
    transport: T,
    region: String,
}

impl CivoClient<HttpTransport> {
    /// Builds a client talking to the real API from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] when the configuration fails
    /// validation or the HTTP client cannot be constructed.
    pub fn from_config(config: &CivoConfig) -> Result<Self, ClientError> {
        config.validate()?;
        let transport = HttpTransport::from_config(config)
            .map_err(|err| ClientError::Config(err.to_string()))?;
        Ok(Self::new(transport, &config.region))
    }
}

impl<T: Transport> CivoClient<T> {
    /// Wraps a transport. `region` is sent in bodies that require it.
    #[must_use]
    pub fn new(transport: T, region: impl Into<String>) -> Self {
        Self {
            transport,
            region: region.into(),
        }
    }

    /// Region this client operates in.
    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }

    async fn send(
        &self,
        resource: ResourceKind,
        operation: &'static str,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Vec<u8>, ClientError> {
        self.transport
            .send(method, path, body)
            .await
            .map_err(|source| ClientError::Transport {
                resource,
                operation,
                source,
            })
    }

    /// Issues a `GET` and decodes the body as `R`.
    pub(crate) async fn fetch<R: DeserializeOwned>(
        &self,
        resource: ResourceKind,
        operation: &'static str,
        path: &str,
    ) -> Result<R, ClientError> {
        let body = self.send(resource, operation, Method::Get, path, None).await?;
        decode(resource, &body)
    }

    /// Issues a `GET` for a collection. A `null` body yields an empty list.
    pub(crate) async fn fetch_list<R: DeserializeOwned>(
        &self,
        resource: ResourceKind,
        path: &str,
    ) -> Result<Vec<R>, ClientError> {
        let items: Option<Vec<R>> = self.fetch(resource, "list", path).await?;
        Ok(items.unwrap_or_default())
    }

    /// Serialises `payload`, sends it with `method`, and decodes the reply.
    pub(crate) async fn submit<B, R>(
        &self,
        resource: ResourceKind,
        operation: &'static str,
        method: Method,
        path: &str,
        payload: &B,
    ) -> Result<R, ClientError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let value = serde_json::to_value(payload).map_err(|err| ClientError::Encode {
            resource,
            message: err.to_string(),
        })?;
        let body = self
            .send(resource, operation, method, path, Some(&value))
            .await?;
        decode(resource, &body)
    }

    /// Issues a `DELETE` and decodes the acknowledgment.
    pub(crate) async fn remove(
        &self,
        resource: ResourceKind,
        path: &str,
    ) -> Result<SimpleResponse, ClientError> {
        let body = self
            .send(resource, "delete", Method::Delete, path, None)
            .await?;
        decode(resource, &body)
    }
}

fn decode<R: DeserializeOwned>(resource: ResourceKind, body: &[u8]) -> Result<R, ClientError> {
    serde_json::from_slice(body).map_err(|err| ClientError::Decode {
        resource,
        message: err.to_string(),
    })
}
