//! `wh import`: merge or replace the collection from a JSON export file.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use wh_core::{ImportMode, Ledger};
use wh_store::Store;

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// JSON file holding an array of entries.
    pub file: PathBuf,

    /// Replace the whole collection instead of merging by id.
    #[arg(long)]
    pub replace: bool,
}

pub fn run<W: Write>(writer: &mut W, args: &ImportArgs, store: &mut Store) -> Result<()> {
    let buffer = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let mode = if args.replace {
        ImportMode::Replace
    } else {
        ImportMode::Merge
    };

    let mut ledger = Ledger::new(store.load_entries()?);
    let before = ledger.len();
    let count = ledger
        .import(&buffer, mode)
        .with_context(|| format!("failed to import {}", args.file.display()))?;
    store.save_entries(ledger.entries())?;

    tracing::info!(%mode, count, before, after = ledger.len(), "import complete");
    match mode {
        ImportMode::Merge => writeln!(
            writer,
            "Merged {count} new entries from {} ({} total).",
            args.file.display(),
            ledger.len()
        )?,
        ImportMode::Replace => writeln!(
            writer,
            "Replaced {before} entries with {count} from {}.",
            args.file.display()
        )?,
    }
    Ok(())
}
