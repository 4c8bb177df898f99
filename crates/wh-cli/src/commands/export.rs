//! `wh export`: write the whole collection as a dated JSON file.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;

use wh_core::{export_file_name, export_json};
use wh_store::Store;

use crate::Config;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// File to write. Defaults to a dated file name in the export directory.
    #[arg(long, short, conflicts_with = "stdout")]
    pub output: Option<PathBuf>,

    /// Print the JSON to stdout instead of writing a file.
    #[arg(long)]
    pub stdout: bool,
}

pub fn run<W: Write>(
    writer: &mut W,
    args: &ExportArgs,
    store: &Store,
    config: &Config,
    today: NaiveDate,
) -> Result<()> {
    let entries = store.load_entries()?;
    let json = export_json(&entries).context("failed to encode entries")?;

    if args.stdout {
        writeln!(writer, "{json}")?;
        return Ok(());
    }

    let path = args.output.clone().unwrap_or_else(|| {
        let dir = config.export_dir.clone().unwrap_or_default();
        dir.join(export_file_name(today))
    });
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(&path, format!("{json}\n"))
        .with_context(|| format!("failed to write {}", path.display()))?;

    tracing::info!(path = %path.display(), count = entries.len(), "exported entries");
    writeln!(writer, "Exported {} entries to {}.", entries.len(), path.display())?;
    Ok(())
}
