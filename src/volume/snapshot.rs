//! Volume snapshot sub-resources.

use serde::{Deserialize, Serialize};

use crate::client::{CivoClient, SimpleResponse};
use crate::error::{ClientError, ResourceKind};
use crate::transport::{Method, Transport};

/// Point-in-time copy of a volume.
#[derive(Clone, Debug, Default, Deserialize, Serialize, Eq, PartialEq)]
#[serde(default)]
pub struct VolumeSnapshot {
    /// Snapshot identifier.
    pub snapshot_id: String,
    /// Snapshot name.
    pub name: String,
    /// Free-form description.
    pub snapshot_description: String,
    /// Volume the snapshot was taken from.
    pub volume_id: String,
    /// Instance the volume was attached to when the snapshot was taken.
    pub instance_id: String,
    /// Name of the source volume.
    pub source_volume_name: String,
    /// Size in gigabytes a restore will need.
    pub restore_size: u32,
    /// Provider state, for example `Ready`.
    pub state: String,
    /// Creation time as reported by the API.
    pub creation_time: String,
}

/// Settings for a new volume snapshot.
#[derive(Clone, Debug, Default, Deserialize, Serialize, Eq, PartialEq)]
pub struct VolumeSnapshotConfig {
    /// Snapshot name.
    pub name: String,
    /// Optional description.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl<T: Transport> CivoClient<T> {
    /// Fetches one snapshot of a volume.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] or [`ClientError::Decode`].
    pub async fn get_volume_snapshot_by_volume_id(
        &self,
        volume_id: &str,
        snapshot_id: &str,
    ) -> Result<VolumeSnapshot, ClientError> {
        self.fetch(
            ResourceKind::VolumeSnapshot,
            "get",
            &format!("/v2/volumes/{volume_id}/snapshots/{snapshot_id}"),
        )
        .await
    }

    /// Lists every snapshot of a volume, in server order.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] or [`ClientError::Decode`].
    pub async fn list_volume_snapshots_by_volume_id(
        &self,
        volume_id: &str,
    ) -> Result<Vec<VolumeSnapshot>, ClientError> {
        self.fetch_list(
            ResourceKind::VolumeSnapshot,
            &format!("/v2/volumes/{volume_id}/snapshots"),
        )
        .await
    }

    /// Takes a snapshot of a volume.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] or [`ClientError::Decode`].
    pub async fn create_volume_snapshot(
        &self,
        volume_id: &str,
        config: &VolumeSnapshotConfig,
    ) -> Result<VolumeSnapshot, ClientError> {
        self.submit(
            ResourceKind::VolumeSnapshot,
            "create",
            Method::Post,
            &format!("/v2/volumes/{volume_id}/snapshots"),
            config,
        )
        .await
    }

    /// Deletes a single snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] or [`ClientError::Decode`].
    pub async fn delete_volume_snapshot(
        &self,
        snapshot_id: &str,
    ) -> Result<SimpleResponse, ClientError> {
        self.remove(
            ResourceKind::VolumeSnapshot,
            &format!("/v2/snapshots/{snapshot_id}"),
        )
        .await
    }
}
