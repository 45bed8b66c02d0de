//! Typed client for the Civo v2 REST API.
//!
//! The crate maps each API call onto one method of [`CivoClient`]: block
//! storage volumes and their snapshots, firewalls and their rules, plus the
//! cluster-scoped volume queries used to find volumes orphaned by deleted
//! Kubernetes clusters. Requests go through an injected [`Transport`], so the
//! resource layer can be driven without a network.

pub mod client;
pub mod config;
pub mod error;
pub mod firewall;
pub mod janitor;
pub mod kubernetes;
pub mod search;
pub mod test_support;
pub mod transport;
pub mod volume;

pub use client::{CivoClient, SimpleResponse};
pub use config::{CivoConfig, ConfigError};
pub use error::{ClientError, ResourceKind};
pub use firewall::{Firewall, FirewallConfig, FirewallResult, FirewallRule, FirewallRuleConfig};
pub use janitor::{Janitor, JanitorConfig, JanitorError, SweepSummary};
pub use kubernetes::{KubernetesCluster, PaginatedKubernetesClusters};
pub use transport::{HttpTransport, Method, Transport, TransportError, TransportFuture};
pub use volume::{
    Volume, VolumeAttachConfig, VolumeConfig, VolumeResult, VolumeSnapshot, VolumeSnapshotConfig,
};
