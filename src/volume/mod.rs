//! Block storage volumes.
//!
//! Covers the volume CRUD and lifecycle calls, the cluster-scoped listing
//! queries, and the volume snapshot sub-resources ([`VolumeSnapshot`]).

mod snapshot;

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::client::{CivoClient, SimpleResponse};
use crate::error::{ClientError, ResourceKind};
use crate::kubernetes::KubernetesCluster;
use crate::search::{Searchable, find_one};
use crate::transport::{Method, Transport};

pub use snapshot::{VolumeSnapshot, VolumeSnapshotConfig};

/// A block of attachable storage.
#[derive(Clone, Debug, Default, Deserialize, Serialize, Eq, PartialEq)]
#[serde(default)]
pub struct Volume {
    /// Volume identifier.
    pub id: String,
    /// Volume name.
    pub name: String,
    /// Instance the volume is attached to, empty when detached.
    pub instance_id: String,
    /// Kubernetes cluster owning the volume, empty when unowned.
    pub cluster_id: String,
    /// Network the volume lives in.
    pub network_id: String,
    /// Mount point on the attached instance.
    #[serde(rename = "mountpoint")]
    pub mount_point: String,
    /// Provider status, for example `available` or `attached`.
    pub status: String,
    /// Storage class of the volume.
    pub volume_type: String,
    /// Size in gigabytes.
    pub size_gb: u32,
    /// Whether the volume can be booted from.
    pub bootable: bool,
    /// Creation timestamp, when reported.
    pub created_at: Option<DateTime<Utc>>,
}

impl Volume {
    /// Returns `true` when the volume records an owning cluster.
    #[must_use]
    pub fn has_cluster(&self) -> bool {
        !self.cluster_id.is_empty()
    }
}

impl Searchable for Volume {
    fn search_keys(&self) -> (&str, &str) {
        (&self.id, &self.name)
    }
}

/// Creation acknowledgment returned by [`CivoClient::new_volume`].
#[derive(Clone, Debug, Default, Deserialize, Serialize, Eq, PartialEq)]
#[serde(default)]
pub struct VolumeResult {
    /// Identifier assigned to the new volume.
    pub id: String,
    /// Name of the new volume.
    pub name: String,
    /// Outcome reported by the API.
    pub result: String,
}

/// Settings required to create a new volume.
#[derive(Clone, Debug, Default, Deserialize, Serialize, Eq, PartialEq)]
pub struct VolumeConfig {
    /// Volume name.
    pub name: String,
    /// Kubernetes namespace for cluster-owned volumes.
    pub namespace: String,
    /// Owning cluster, empty for standalone volumes.
    pub cluster_id: String,
    /// Network to create the volume in.
    pub network_id: String,
    /// Region to create the volume in.
    pub region: String,
    /// Requested size in gigabytes.
    pub size_gb: u32,
    /// Whether the volume should be bootable.
    pub bootable: bool,
    /// Storage class.
    pub volume_type: String,
    /// Snapshot to clone the volume from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot_id: Option<String>,
}

impl VolumeConfig {
    /// Starts a config for a volume of the given name and size, trimming the
    /// name.
    #[must_use]
    pub fn new(name: impl Into<String>, size_gb: u32) -> Self {
        Self {
            name: name.into().trim().to_owned(),
            size_gb,
            ..Self::default()
        }
    }

    /// Sets the region.
    #[must_use]
    pub fn region(mut self, value: impl Into<String>) -> Self {
        self.region = value.into();
        self
    }

    /// Sets the network.
    #[must_use]
    pub fn network_id(mut self, value: impl Into<String>) -> Self {
        self.network_id = value.into();
        self
    }

    /// Places the volume under a cluster and namespace.
    #[must_use]
    pub fn cluster(mut self, cluster_id: impl Into<String>, namespace: impl Into<String>) -> Self {
        self.cluster_id = cluster_id.into();
        self.namespace = namespace.into();
        self
    }

    /// Sets the storage class.
    #[must_use]
    pub fn volume_type(mut self, value: impl Into<String>) -> Self {
        self.volume_type = value.into();
        self
    }

    /// Marks the volume bootable.
    #[must_use]
    pub const fn bootable(mut self, value: bool) -> Self {
        self.bootable = value;
        self
    }

    /// Clones the volume from an existing snapshot.
    #[must_use]
    pub fn snapshot_id(mut self, value: Option<String>) -> Self {
        self.snapshot_id = value;
        self
    }
}

/// Configuration used to attach a volume to an instance.
#[derive(Clone, Debug, Default, Deserialize, Serialize, Eq, PartialEq)]
pub struct VolumeAttachConfig {
    /// Instance to attach to.
    pub instance_id: String,
    /// Keep the volume attached across reboots.
    pub attach_at_boot: bool,
    /// Region of the instance.
    pub region: String,
}

/// Keeps the volumes that record a cluster absent from `clusters`, in
/// listing order.
pub(crate) fn dangling_volumes(clusters: &[KubernetesCluster], volumes: Vec<Volume>) -> Vec<Volume> {
    let live: HashSet<&str> = clusters.iter().map(|cluster| cluster.id.as_str()).collect();
    volumes
        .into_iter()
        .filter(|volume| volume.has_cluster() && !live.contains(volume.cluster_id.as_str()))
        .collect()
}

impl<T: Transport> CivoClient<T> {
    /// Lists all volumes owned by the account, in server order.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] or [`ClientError::Decode`].
    pub async fn list_volumes(&self) -> Result<Vec<Volume>, ClientError> {
        self.fetch_list(ResourceKind::Volume, "/v2/volumes").await
    }

    /// Lists the volumes owned by a cluster, resolving `cluster` by exact or
    /// partial id or name.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] when no cluster matches and
    /// [`ClientError::MultipleMatches`] when the search is ambiguous. The
    /// volume listing is not requested in either case.
    pub async fn list_volumes_for_cluster(&self, cluster: &str) -> Result<Vec<Volume>, ClientError> {
        let resolved = self
            .find_kubernetes_cluster(cluster)
            .await
            .map_err(|err| match err {
                ClientError::ZeroMatches { resource, search } => {
                    ClientError::NotFound { resource, search }
                }
                other => other,
            })?;

        let volumes = self.list_volumes().await?;
        Ok(volumes
            .into_iter()
            .filter(|volume| volume.has_cluster() && volume.cluster_id == resolved.id)
            .collect())
    }

    /// Lists volumes whose recorded cluster no longer exists.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] or [`ClientError::Decode`] from
    /// either listing.
    pub async fn list_dangling_volumes(&self) -> Result<Vec<Volume>, ClientError> {
        let clusters = self.list_kubernetes_clusters().await?;
        let volumes = self.list_volumes().await?;
        Ok(dangling_volumes(&clusters.items, volumes))
    }

    /// Fetches a volume by its full identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] or [`ClientError::Decode`].
    pub async fn get_volume(&self, id: &str) -> Result<Volume, ClientError> {
        self.fetch(ResourceKind::Volume, "get", &format!("/v2/volumes/{id}"))
            .await
    }

    /// Finds a volume by exact or partial id or name.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::ZeroMatches`] or [`ClientError::MultipleMatches`]
    /// when the search does not resolve to one volume.
    pub async fn find_volume(&self, search: &str) -> Result<Volume, ClientError> {
        let volumes = self.list_volumes().await?;
        find_one(ResourceKind::Volume, volumes, search)
    }

    /// Creates a new volume. The acknowledgment carries the id; fetch the
    /// volume for its full state.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] or [`ClientError::Decode`].
    pub async fn new_volume(&self, config: &VolumeConfig) -> Result<VolumeResult, ClientError> {
        self.submit(
            ResourceKind::Volume,
            "create",
            Method::Post,
            "/v2/volumes",
            config,
        )
        .await
    }

    /// Resizes a volume to `size_gb` gigabytes.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] or [`ClientError::Decode`].
    pub async fn resize_volume(&self, id: &str, size_gb: u32) -> Result<SimpleResponse, ClientError> {
        let body = json!({"size_gb": size_gb, "region": self.region()});
        self.submit(
            ResourceKind::Volume,
            "resize",
            Method::Put,
            &format!("/v2/volumes/{id}/resize"),
            &body,
        )
        .await
    }

    /// Attaches a volume to an instance.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] or [`ClientError::Decode`].
    pub async fn attach_volume(
        &self,
        id: &str,
        config: &VolumeAttachConfig,
    ) -> Result<SimpleResponse, ClientError> {
        self.submit(
            ResourceKind::Volume,
            "attach",
            Method::Put,
            &format!("/v2/volumes/{id}/attach"),
            config,
        )
        .await
    }

    /// Detaches a volume from whichever instance holds it.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] or [`ClientError::Decode`].
    pub async fn detach_volume(&self, id: &str) -> Result<SimpleResponse, ClientError> {
        let body = json!({"region": self.region()});
        self.submit(
            ResourceKind::Volume,
            "detach",
            Method::Put,
            &format!("/v2/volumes/{id}/detach"),
            &body,
        )
        .await
    }

    /// Deletes a volume, leaving its snapshots in place.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] or [`ClientError::Decode`].
    pub async fn delete_volume(&self, id: &str) -> Result<SimpleResponse, ClientError> {
        self.remove(ResourceKind::Volume, &format!("/v2/volumes/{id}"))
            .await
    }

    /// Deletes a volume together with all of its snapshots.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] or [`ClientError::Decode`].
    pub async fn delete_volume_and_all_snapshots(
        &self,
        id: &str,
    ) -> Result<SimpleResponse, ClientError> {
        self.remove(
            ResourceKind::Volume,
            &format!("/v2/volumes/{id}?delete_snapshot=true"),
        )
        .await
    }
}
