//! Error types surfaced by the resource operations.

use std::fmt;

use thiserror::Error;

use crate::config::ConfigError;
use crate::transport::TransportError;

/// Kind of API resource an operation worked on, used to give errors context.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ResourceKind {
    /// Block storage volume.
    Volume,
    /// Snapshot of a block storage volume.
    VolumeSnapshot,
    /// Network firewall.
    Firewall,
    /// Rule belonging to a firewall.
    FirewallRule,
    /// Kubernetes cluster.
    KubernetesCluster,
}

impl ResourceKind {
    /// Human readable name used in error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Volume => "volume",
            Self::VolumeSnapshot => "volume snapshot",
            Self::Firewall => "firewall",
            Self::FirewallRule => "firewall rule",
            Self::KubernetesCluster => "kubernetes cluster",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by [`crate::CivoClient`] operations.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ClientError {
    /// Raised when the transport fails to deliver a request or the API
    /// answers with a non-success status.
    #[error("failed to {operation} {resource}: {source}")]
    Transport {
        /// Resource the request targeted.
        resource: ResourceKind,
        /// Operation being performed (for example `list` or `delete`).
        operation: &'static str,
        /// Underlying transport failure.
        #[source]
        source: TransportError,
    },
    /// Raised when a response body does not match the expected shape.
    #[error("failed to decode {resource} response: {message}")]
    Decode {
        /// Resource the response described.
        resource: ResourceKind,
        /// Parser error message.
        message: String,
    },
    /// Raised when a request body cannot be serialised.
    #[error("failed to encode {resource} request: {message}")]
    Encode {
        /// Resource the request described.
        resource: ResourceKind,
        /// Serialiser error message.
        message: String,
    },
    /// Raised when a search matches nothing.
    #[error("unable to find {resource} {search}, zero matches")]
    ZeroMatches {
        /// Resource that was searched.
        resource: ResourceKind,
        /// Search term supplied by the caller.
        search: String,
    },
    /// Raised when a search matches several resources without an exact hit.
    #[error("unable to find {resource} {search} because there were multiple matches")]
    MultipleMatches {
        /// Resource that was searched.
        resource: ResourceKind,
        /// Search term supplied by the caller.
        search: String,
    },
    /// Raised when a request is missing a required field.
    #[error("missing or empty field: {0}")]
    Validation(String),
    /// Raised when a referenced resource does not exist.
    #[error("{resource} {search} not found")]
    NotFound {
        /// Resource that was referenced.
        resource: ResourceKind,
        /// Identifier or search term used for the lookup.
        search: String,
    },
    /// Raised when the client configuration is incomplete.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<ConfigError> for ClientError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value.to_string())
    }
}
