//! Kubernetes cluster lookups needed by the cluster-scoped volume queries.

use serde::{Deserialize, Serialize};

use crate::client::CivoClient;
use crate::error::{ClientError, ResourceKind};
use crate::search::{Searchable, find_one};
use crate::transport::Transport;

/// A Kubernetes cluster as reported by the cluster listing.
#[derive(Clone, Debug, Default, Deserialize, Serialize, Eq, PartialEq)]
#[serde(default)]
pub struct KubernetesCluster {
    /// Cluster identifier.
    pub id: String,
    /// Cluster name.
    pub name: String,
    /// Lifecycle status, for example `ACTIVE`.
    pub status: String,
    /// Network the cluster runs in.
    pub network_id: String,
}

impl Searchable for KubernetesCluster {
    fn search_keys(&self) -> (&str, &str) {
        (&self.id, &self.name)
    }
}

/// Paginated envelope returned by `GET /v2/kubernetes/clusters`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, Eq, PartialEq)]
#[serde(default)]
pub struct PaginatedKubernetesClusters {
    /// Page number of this response.
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
    /// Total number of pages.
    pub pages: u32,
    /// Clusters on this page.
    pub items: Vec<KubernetesCluster>,
}

impl PaginatedKubernetesClusters {
    /// Returns `true` when no page follows this one, so `items` lists every
    /// cluster.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.pages <= self.page
    }
}

impl<T: Transport> CivoClient<T> {
    /// Lists the Kubernetes clusters visible to the account.
    ///
    /// Only the first page returned by the API is considered.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] or [`ClientError::Decode`].
    pub async fn list_kubernetes_clusters(
        &self,
    ) -> Result<PaginatedKubernetesClusters, ClientError> {
        self.fetch(
            ResourceKind::KubernetesCluster,
            "list",
            "/v2/kubernetes/clusters",
        )
        .await
    }

    /// Finds a cluster by exact or partial id or name.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::ZeroMatches`] or [`ClientError::MultipleMatches`]
    /// when the search does not resolve to one cluster.
    pub async fn find_kubernetes_cluster(
        &self,
        search: &str,
    ) -> Result<KubernetesCluster, ClientError> {
        let clusters = self.list_kubernetes_clusters().await?;
        find_one(ResourceKind::KubernetesCluster, clusters.items, search)
    }
}
