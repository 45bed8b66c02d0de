//! Binary entry point for the `civo` CLI.

mod cli;

use std::io::{self, Write};
use std::process;

use clap::Parser;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use civo::{
    CivoClient, CivoConfig, ClientError, Firewall, FirewallRule, SimpleResponse, Transport, Volume,
    VolumeSnapshot,
};
use cli::{Cli, FirewallCommand, VolumeCommand};

#[derive(Debug, Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();
    let exit_code = match run(cli).await {
        Ok(()) => 0,
        Err(err) => {
            report_error(&err);
            1
        }
    };

    process::exit(exit_code);
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .ok();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config =
        CivoConfig::load_without_cli_args().map_err(|err| CliError::Config(err.to_string()))?;
    let client = connect(&config)?;
    let mut out = io::stdout().lock();
    dispatch(&client, cli, &mut out).await
}

fn connect(config: &CivoConfig) -> Result<CivoClient, CliError> {
    CivoClient::from_config(config).map_err(CliError::from)
}

async fn dispatch<T: Transport>(
    client: &CivoClient<T>,
    cli: Cli,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match cli {
        Cli::Volume(command) => run_volume(client, command, out).await,
        Cli::Firewall(command) => run_firewall(client, command, out).await,
    }
}

async fn run_volume<T: Transport>(
    client: &CivoClient<T>,
    command: VolumeCommand,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match command {
        VolumeCommand::List => write_volumes(out, &client.list_volumes().await?)?,
        VolumeCommand::Show { volume } => {
            write_volumes(out, &[client.find_volume(&volume).await?])?;
        }
        VolumeCommand::Cluster { cluster } => {
            write_volumes(out, &client.list_volumes_for_cluster(&cluster).await?)?;
        }
        VolumeCommand::Dangling => write_volumes(out, &client.list_dangling_volumes().await?)?,
        VolumeCommand::Snapshots { volume } => {
            let found = client.find_volume(&volume).await?;
            let snapshots = client.list_volume_snapshots_by_volume_id(&found.id).await?;
            write_snapshots(out, &snapshots)?;
        }
        VolumeCommand::Resize { volume, size_gb } => {
            let found = client.find_volume(&volume).await?;
            write_ack(out, &found.id, &client.resize_volume(&found.id, size_gb).await?)?;
        }
        VolumeCommand::Detach { volume } => {
            let found = client.find_volume(&volume).await?;
            write_ack(out, &found.id, &client.detach_volume(&found.id).await?)?;
        }
        VolumeCommand::Delete {
            volume,
            with_snapshots,
        } => {
            let found = client.find_volume(&volume).await?;
            let response = if with_snapshots {
                client.delete_volume_and_all_snapshots(&found.id).await?
            } else {
                client.delete_volume(&found.id).await?
            };
            write_ack(out, &found.id, &response)?;
        }
    }
    Ok(())
}

async fn run_firewall<T: Transport>(
    client: &CivoClient<T>,
    command: FirewallCommand,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match command {
        FirewallCommand::List => write_firewalls(out, &client.list_firewalls().await?)?,
        FirewallCommand::Show { firewall } => {
            write_firewalls(out, &[client.find_firewall(&firewall).await?])?;
        }
        FirewallCommand::Rules { firewall } => {
            let found = client.find_firewall(&firewall).await?;
            write_rules(out, &client.list_firewall_rules(&found.id).await?)?;
        }
        FirewallCommand::Delete { firewall } => {
            let found = client.find_firewall(&firewall).await?;
            write_ack(out, &found.id, &client.delete_firewall(&found.id).await?)?;
        }
        FirewallCommand::DeleteRule { firewall, rule } => {
            let found = client.find_firewall(&firewall).await?;
            let target = client.find_firewall_rule(&found.id, &rule).await?;
            let response = client.delete_firewall_rule(&found.id, &target.id).await?;
            write_ack(out, &target.id, &response)?;
        }
    }
    Ok(())
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}

fn write_volumes(out: &mut impl Write, volumes: &[Volume]) -> io::Result<()> {
    for volume in volumes {
        writeln!(
            out,
            "{}\t{}\t{}\t{}GB\t{}",
            volume.id,
            volume.name,
            or_dash(&volume.status),
            volume.size_gb,
            or_dash(&volume.cluster_id)
        )?;
    }
    Ok(())
}

fn write_snapshots(out: &mut impl Write, snapshots: &[VolumeSnapshot]) -> io::Result<()> {
    for snapshot in snapshots {
        writeln!(
            out,
            "{}\t{}\t{}",
            snapshot.snapshot_id,
            snapshot.name,
            or_dash(&snapshot.state)
        )?;
    }
    Ok(())
}

fn write_firewalls(out: &mut impl Write, firewalls: &[Firewall]) -> io::Result<()> {
    for firewall in firewalls {
        writeln!(
            out,
            "{}\t{}\t{} rules\t{} instances",
            firewall.id,
            firewall.name,
            or_dash(&firewall.rules_count),
            or_dash(&firewall.instances_count)
        )?;
    }
    Ok(())
}

fn write_rules(out: &mut impl Write, rules: &[FirewallRule]) -> io::Result<()> {
    for rule in rules {
        writeln!(
            out,
            "{}\t{}\t{}\t{}-{}\t{}\t{}",
            rule.id,
            rule.direction,
            rule.protocol,
            rule.start_port,
            rule.end_port,
            rule.cidr.join(","),
            rule.label.as_deref().unwrap_or("-")
        )?;
    }
    Ok(())
}

fn write_ack(out: &mut impl Write, id: &str, response: &SimpleResponse) -> io::Result<()> {
    writeln!(out, "{id}\t{}", response.result)
}

fn report_error(err: &CliError) {
    write_error(io::stderr(), err);
}

fn write_error(mut target: impl Write, err: &CliError) {
    writeln!(target, "{err}").ok();
}
