//! Dangling-volume janitor for Civo.
//!
//! This binary lists volumes whose Kubernetes cluster no longer exists and,
//! with `--delete`, deletes them.

use std::io::Write as _;

use clap::Parser;
use civo::{CivoClient, CivoConfig, Janitor, JanitorConfig};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "civo-janitor",
    about = "Find and delete Civo volumes left behind by deleted Kubernetes clusters"
)]
struct Cli {
    /// Civo API key.
    #[arg(long, env = "CIVO_API_KEY", hide_env_values = true)]
    api_key: String,
    /// Region to sweep.
    #[arg(long, env = "CIVO_REGION", default_value = "LON1")]
    region: String,
    /// Base URL of the Civo API.
    #[arg(long, env = "CIVO_API_URL", default_value = "https://api.civo.com")]
    api_url: String,
    /// Delete dangling volumes instead of only listing them.
    #[arg(long)]
    delete: bool,
    /// Also delete the snapshots of each deleted volume.
    #[arg(long, requires = "delete")]
    with_snapshots: bool,
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();

    let cli = Cli::parse();
    let config = CivoConfig {
        api_key: cli.api_key,
        region: cli.region,
        api_url: cli.api_url,
    };
    let client = CivoClient::from_config(&config).map_err(|err| err.to_string())?;
    let janitor_config = if cli.delete {
        JanitorConfig::deleting(cli.with_snapshots)
    } else {
        JanitorConfig::dry_run()
    };
    let summary = Janitor::new(janitor_config, client)
        .sweep()
        .await
        .map_err(|err| err.to_string())?;

    let mut stdout = std::io::stdout();
    for id in &summary.dangling {
        writeln!(stdout, "{id}").map_err(|err| err.to_string())?;
    }
    writeln!(
        stdout,
        "janitor sweep complete: dangling_volumes={}, deleted_volumes={}",
        summary.dangling.len(),
        summary.deleted_volumes
    )
    .map_err(|err| err.to_string())?;
    Ok(())
}
