//! Network firewalls and their rules.

mod rule;

use serde::{Deserialize, Serialize};

use crate::client::{CivoClient, SimpleResponse};
use crate::error::{ClientError, ResourceKind};
use crate::search::{Searchable, find_one};
use crate::transport::{Method, Transport};

pub use rule::{FirewallRule, FirewallRuleConfig};

/// A firewall grouping a set of rules.
#[derive(Clone, Debug, Default, Deserialize, Serialize, Eq, PartialEq)]
#[serde(default)]
pub struct Firewall {
    /// Firewall identifier.
    pub id: String,
    /// Firewall name.
    pub name: String,
    /// Number of rules, as reported by the API.
    pub rules_count: String,
    /// Number of instances using the firewall, as reported by the API.
    pub instances_count: String,
    /// Region the firewall lives in.
    pub region: String,
}

impl Searchable for Firewall {
    fn search_keys(&self) -> (&str, &str) {
        (&self.id, &self.name)
    }
}

/// Creation acknowledgment returned by [`CivoClient::new_firewall`].
#[derive(Clone, Debug, Default, Deserialize, Serialize, Eq, PartialEq)]
#[serde(default)]
pub struct FirewallResult {
    /// Identifier assigned to the new firewall.
    pub id: String,
    /// Name of the new firewall.
    pub name: String,
    /// Outcome reported by the API.
    pub result: String,
}

/// Settings for a new firewall.
#[derive(Clone, Debug, Default, Deserialize, Serialize, Eq, PartialEq)]
pub struct FirewallConfig {
    /// Firewall name.
    pub name: String,
    /// Network to create the firewall in; the default network when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_id: Option<String>,
}

impl<T: Transport> CivoClient<T> {
    /// Lists all firewalls owned by the account, in server order.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] or [`ClientError::Decode`].
    pub async fn list_firewalls(&self) -> Result<Vec<Firewall>, ClientError> {
        self.fetch_list(ResourceKind::Firewall, "/v2/firewalls").await
    }

    /// Finds a firewall by exact or partial id or name.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::ZeroMatches`] or [`ClientError::MultipleMatches`]
    /// when the search does not resolve to one firewall.
    pub async fn find_firewall(&self, search: &str) -> Result<Firewall, ClientError> {
        let firewalls = self.list_firewalls().await?;
        find_one(ResourceKind::Firewall, firewalls, search)
    }

    /// Creates a new firewall.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] or [`ClientError::Decode`].
    pub async fn new_firewall(&self, config: &FirewallConfig) -> Result<FirewallResult, ClientError> {
        self.submit(
            ResourceKind::Firewall,
            "create",
            Method::Post,
            "/v2/firewalls/",
            config,
        )
        .await
    }

    /// Deletes a firewall.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] or [`ClientError::Decode`].
    pub async fn delete_firewall(&self, id: &str) -> Result<SimpleResponse, ClientError> {
        self.remove(ResourceKind::Firewall, &format!("/v2/firewalls/{id}"))
            .await
    }
}

#[cfg(test)]
mod tests;
