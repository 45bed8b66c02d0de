//! Command-line interface definitions for the `civo` binary.
//!
//! This module centralises the clap parser structures so both the main binary
//! and the build script can reuse them when generating the manual page.

use clap::{Parser, Subcommand};

/// Top-level CLI for the `civo` binary.
#[derive(Debug, Parser)]
#[command(
    name = "civo",
    about = "Inspect and manage Civo volumes and firewalls",
    arg_required_else_help = true
)]
pub(crate) enum Cli {
    /// Block storage volumes.
    #[command(subcommand)]
    Volume(VolumeCommand),
    /// Network firewalls and their rules.
    #[command(subcommand)]
    Firewall(FirewallCommand),
}

/// Volume subcommands. `<VOLUME>` arguments accept a full or partial id or
/// name.
#[derive(Debug, Subcommand)]
pub(crate) enum VolumeCommand {
    /// List every volume.
    List,
    /// Show one volume.
    Show {
        /// Volume id or name.
        volume: String,
    },
    /// List the volumes owned by a Kubernetes cluster.
    Cluster {
        /// Cluster id or name.
        cluster: String,
    },
    /// List volumes whose Kubernetes cluster no longer exists.
    Dangling,
    /// List the snapshots of a volume.
    Snapshots {
        /// Volume id or name.
        volume: String,
    },
    /// Resize a volume.
    Resize {
        /// Volume id or name.
        volume: String,
        /// New size in gigabytes.
        #[arg(long, value_name = "GB")]
        size_gb: u32,
    },
    /// Detach a volume from its instance.
    Detach {
        /// Volume id or name.
        volume: String,
    },
    /// Delete a volume.
    Delete {
        /// Volume id or name.
        volume: String,
        /// Also delete every snapshot of the volume.
        #[arg(long)]
        with_snapshots: bool,
    },
}

/// Firewall subcommands. `<FIREWALL>` arguments accept a full or partial id
/// or name.
#[derive(Debug, Subcommand)]
pub(crate) enum FirewallCommand {
    /// List every firewall.
    List,
    /// Show one firewall.
    Show {
        /// Firewall id or name.
        firewall: String,
    },
    /// List the rules of a firewall.
    Rules {
        /// Firewall id or name.
        firewall: String,
    },
    /// Delete a firewall.
    Delete {
        /// Firewall id or name.
        firewall: String,
    },
    /// Delete one rule of a firewall.
    DeleteRule {
        /// Firewall id or name.
        firewall: String,
        /// Rule id or label.
        rule: String,
    },
}
