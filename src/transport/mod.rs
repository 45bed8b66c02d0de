//! Request/response transport abstraction for the Civo API.
//!
//! Resource modules never talk to the network directly. They hand a path and
//! an optional JSON body to a [`Transport`], which returns the raw response
//! body. [`HttpTransport`] is the production implementation; tests drive the
//! resource layer through [`crate::test_support::ScriptedTransport`].

mod http;

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use serde_json::Value;
use thiserror::Error;

pub use http::HttpTransport;

/// HTTP verbs used by the Civo API.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
}

impl Method {
    /// Returns the verb as it appears on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised below the resource layer.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum TransportError {
    /// The request never produced a response (connection, TLS, timeout, or
    /// body read failure).
    #[error("request failed: {message}")]
    Request {
        /// Message reported by the HTTP stack.
        message: String,
    },
    /// The API answered with a non-success status.
    #[error("API returned {status} ({code}): {reason}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Provider error code, or `unknown` when the body carried none.
        code: String,
        /// Provider error reason, or the raw body text.
        reason: String,
    },
}

/// Future returned by transport operations. Resolves to the raw response
/// body.
pub type TransportFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Vec<u8>, TransportError>> + Send + 'a>>;

/// Capability for issuing a single request against the Civo API.
///
/// Paths are absolute API paths such as `/v2/volumes`, optionally carrying a
/// query string. Implementations own the base URL, authentication, and any
/// per-request query parameters.
pub trait Transport: Send + Sync {
    /// Sends one request and returns the response body.
    fn send<'a>(
        &'a self,
        method: Method,
        path: &'a str,
        body: Option<&'a Value>,
    ) -> TransportFuture<'a>;

    /// Issues a `GET` request.
    fn get<'a>(&'a self, path: &'a str) -> TransportFuture<'a> {
        self.send(Method::Get, path, None)
    }

    /// Issues a `POST` request with a JSON body.
    fn post<'a>(&'a self, path: &'a str, body: &'a Value) -> TransportFuture<'a> {
        self.send(Method::Post, path, Some(body))
    }

    /// Issues a `PUT` request with a JSON body.
    fn put<'a>(&'a self, path: &'a str, body: &'a Value) -> TransportFuture<'a> {
        self.send(Method::Put, path, Some(body))
    }

    /// Issues a `DELETE` request.
    fn delete<'a>(&'a self, path: &'a str) -> TransportFuture<'a> {
        self.send(Method::Delete, path, None)
    }
}
