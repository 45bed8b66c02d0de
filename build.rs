//! Build script rendering the `civo` man pages into `OUT_DIR`.
//!
//! Writes `civo.1` for the top-level command plus one `civo-<group>.1` page
//! per resource group (`civo-volume.1`, `civo-firewall.1`).

use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Command, CommandFactory};
use clap_mangen::Man;

#[path = "src/cli/mod.rs"]
mod cli;

use cli::Cli;

fn render_page(out_dir: &Path, file_name: &str, man: &Man) -> Result<(), Box<dyn std::error::Error>> {
    let mut buffer = Vec::new();
    man.render(&mut buffer)?;
    fs::write(out_dir.join(file_name), buffer)?;
    Ok(())
}

fn group_page(group: &Command) -> (String, Man) {
    let title = format!("civo-{}", group.get_name());
    let man = Man::new(group.clone()).title(title.clone());
    (format!("{title}.1"), man)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut stdout = std::io::stdout();
    writeln!(stdout, "cargo:rerun-if-changed=build.rs")?;
    writeln!(stdout, "cargo:rerun-if-changed=src/cli/mod.rs")?;

    let out_dir = PathBuf::from(env::var_os("OUT_DIR").ok_or("OUT_DIR was not set")?);

    let command = Cli::command();
    for group in command.get_subcommands() {
        let (file_name, man) = group_page(group);
        render_page(&out_dir, &file_name, &man)?;
    }
    render_page(&out_dir, "civo.1", &Man::new(command))?;

    Ok(())
}
