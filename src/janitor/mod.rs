//! Dangling-volume janitor.
//!
//! Kubernetes clusters that are deleted without their persistent volumes
//! leave volumes behind whose `cluster_id` points at nothing. The janitor
//! finds those volumes and, when asked to, deletes them.
//!
//! A volume only counts as dangling against a complete cluster listing. The
//! janitor reads a single page of clusters, so it refuses to delete anything
//! when the API reports further pages.

use thiserror::Error;

use crate::client::CivoClient;
use crate::error::ClientError;
use crate::transport::Transport;
use crate::volume::dangling_volumes;

/// Configuration for a janitor sweep.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct JanitorConfig {
    /// Delete dangling volumes instead of only reporting them.
    pub delete: bool,
    /// Cascade deletion to the volumes' snapshots.
    pub with_snapshots: bool,
}

impl JanitorConfig {
    /// Report-only configuration.
    #[must_use]
    pub const fn dry_run() -> Self {
        Self {
            delete: false,
            with_snapshots: false,
        }
    }

    /// Configuration that deletes dangling volumes.
    #[must_use]
    pub const fn deleting(with_snapshots: bool) -> Self {
        Self {
            delete: true,
            with_snapshots,
        }
    }
}

/// Summary of janitor work.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SweepSummary {
    /// Identifiers of the dangling volumes found, in listing order.
    pub dangling: Vec<String>,
    /// Number of volumes deleted during the sweep.
    pub deleted_volumes: usize,
}

/// Errors returned by the janitor.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum JanitorError {
    /// Raised when the API rejects a deletion with a non-success result.
    #[error("deletion of volume {volume_id} was rejected: {result}")]
    Rejected {
        /// Volume that could not be deleted.
        volume_id: String,
        /// Result string returned by the API.
        result: String,
    },
    /// Raised in delete mode when the cluster listing spans several pages,
    /// so live clusters on later pages could be mistaken for deleted ones.
    #[error("cluster listing is incomplete (page {page} of {pages}), refusing to delete volumes")]
    IncompleteClusterListing {
        /// Page returned by the API.
        page: u32,
        /// Total number of pages reported by the API.
        pages: u32,
    },
    /// Raised when an API call fails.
    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Finds and optionally deletes dangling volumes.
#[derive(Clone, Debug)]
pub struct Janitor<T: Transport> {
    config: JanitorConfig,
    client: CivoClient<T>,
}

impl<T: Transport> Janitor<T> {
    /// Creates a new janitor using the provided configuration and client.
    #[must_use]
    pub const fn new(config: JanitorConfig, client: CivoClient<T>) -> Self {
        Self { config, client }
    }

    /// Performs a sweep.
    ///
    /// Volumes are deleted in listing order and the sweep stops at the first
    /// failure; volumes deleted before it stay deleted.
    ///
    /// # Errors
    ///
    /// Returns [`JanitorError::Client`] when listing or deleting fails,
    /// [`JanitorError::IncompleteClusterListing`] in delete mode when the
    /// cluster listing has further pages, and [`JanitorError::Rejected`] when
    /// the API acknowledges a deletion with a non-success result.
    pub async fn sweep(&self) -> Result<SweepSummary, JanitorError> {
        let clusters = self.client.list_kubernetes_clusters().await?;
        if !clusters.is_complete() {
            if self.config.delete {
                return Err(JanitorError::IncompleteClusterListing {
                    page: clusters.page,
                    pages: clusters.pages,
                });
            }
            tracing::warn!(
                page = clusters.page,
                pages = clusters.pages,
                "cluster listing is incomplete, dangling report may include live volumes"
            );
        }
        let volumes = self.client.list_volumes().await?;
        let dangling = dangling_volumes(&clusters.items, volumes);
        let mut summary = SweepSummary {
            dangling: dangling.iter().map(|volume| volume.id.clone()).collect(),
            deleted_volumes: 0,
        };

        if !self.config.delete {
            tracing::info!(count = summary.dangling.len(), "dry run, nothing deleted");
            return Ok(summary);
        }

        for volume in &dangling {
            let response = if self.config.with_snapshots {
                self.client.delete_volume_and_all_snapshots(&volume.id).await?
            } else {
                self.client.delete_volume(&volume.id).await?
            };
            if !response.is_success() {
                return Err(JanitorError::Rejected {
                    volume_id: volume.id.clone(),
                    result: response.result,
                });
            }
            tracing::info!(
                volume_id = %volume.id,
                cluster_id = %volume.cluster_id,
                "deleted dangling volume"
            );
            summary.deleted_volumes += 1;
        }

        Ok(summary)
    }
}
