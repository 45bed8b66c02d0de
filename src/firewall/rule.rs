//! Firewall rule sub-resources.

use serde::{Deserialize, Serialize};

use crate::client::{CivoClient, SimpleResponse};
use crate::error::{ClientError, ResourceKind};
use crate::search::{Searchable, find_one};
use crate::transport::{Method, Transport};

/// A single rule of a firewall.
#[derive(Clone, Debug, Default, Deserialize, Serialize, Eq, PartialEq)]
#[serde(default)]
pub struct FirewallRule {
    /// Rule identifier.
    pub id: String,
    /// Firewall the rule belongs to.
    pub firewall_id: String,
    /// Protocol, for example `tcp`.
    pub protocol: String,
    /// First port of the range.
    pub start_port: String,
    /// Last port of the range.
    pub end_port: String,
    /// Source or destination CIDR blocks.
    pub cidr: Vec<String>,
    /// `ingress` or `egress`.
    pub direction: String,
    /// Optional human readable label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Searchable for FirewallRule {
    fn search_keys(&self) -> (&str, &str) {
        (&self.id, self.label.as_deref().unwrap_or_default())
    }
}

/// Settings for a new firewall rule.
#[derive(Clone, Debug, Default, Deserialize, Serialize, Eq, PartialEq)]
pub struct FirewallRuleConfig {
    /// Firewall to add the rule to. Required.
    pub firewall_id: String,
    /// Protocol, for example `tcp`.
    pub protocol: String,
    /// First port of the range.
    pub start_port: String,
    /// Last port of the range.
    pub end_port: String,
    /// Source or destination CIDR blocks.
    pub cidr: Vec<String>,
    /// `ingress` or `egress`.
    pub direction: String,
    /// Optional human readable label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl<T: Transport> CivoClient<T> {
    /// Adds a rule to the firewall named by `config.firewall_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] without sending a request when the
    /// firewall id is empty, otherwise [`ClientError::Transport`] or
    /// [`ClientError::Decode`].
    pub async fn new_firewall_rule(
        &self,
        config: &FirewallRuleConfig,
    ) -> Result<FirewallRule, ClientError> {
        if config.firewall_id.trim().is_empty() {
            return Err(ClientError::Validation(String::from("firewall_id")));
        }
        self.submit(
            ResourceKind::FirewallRule,
            "create",
            Method::Post,
            &format!("/v2/firewalls/{}/rules", config.firewall_id),
            config,
        )
        .await
    }

    /// Lists the rules of a firewall, in server order.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] or [`ClientError::Decode`].
    pub async fn list_firewall_rules(
        &self,
        firewall_id: &str,
    ) -> Result<Vec<FirewallRule>, ClientError> {
        self.fetch_list(
            ResourceKind::FirewallRule,
            &format!("/v2/firewalls/{firewall_id}/rules"),
        )
        .await
    }

    /// Finds a rule of a firewall by exact or partial id or label.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::ZeroMatches`] or [`ClientError::MultipleMatches`]
    /// when the search does not resolve to one rule.
    pub async fn find_firewall_rule(
        &self,
        firewall_id: &str,
        search: &str,
    ) -> Result<FirewallRule, ClientError> {
        let rules = self.list_firewall_rules(firewall_id).await?;
        find_one(ResourceKind::FirewallRule, rules, search)
    }

    /// Deletes a rule from a firewall.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] or [`ClientError::Decode`].
    pub async fn delete_firewall_rule(
        &self,
        firewall_id: &str,
        rule_id: &str,
    ) -> Result<SimpleResponse, ClientError> {
        self.remove(
            ResourceKind::FirewallRule,
            &format!("/v2/firewalls/{firewall_id}/rules/{rule_id}"),
        )
        .await
    }
}
