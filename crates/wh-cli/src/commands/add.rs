//! `wh add` and `wh edit`: create an entry or replace one in place.

use std::io::Write;

use anyhow::Result;
use clap::Args;

use wh_core::Ledger;
use wh_store::Store;

use super::util::{EntryArgs, describe_entry};

#[derive(Debug, Args)]
pub struct EditArgs {
    /// ID of the entry to replace.
    pub id: String,

    #[command(flatten)]
    pub entry: EntryArgs,
}

pub fn run<W: Write>(writer: &mut W, args: &EntryArgs, store: &mut Store) -> Result<()> {
    let mut ledger = Ledger::new(store.load_entries()?);
    let entry = ledger.add(&args.to_draft())?;
    let line = format!("Added {}: {}", entry.id, describe_entry(entry));
    store.save_entries(ledger.entries())?;

    writeln!(writer, "{line}")?;
    Ok(())
}

pub fn edit<W: Write>(writer: &mut W, args: &EditArgs, store: &mut Store) -> Result<()> {
    let mut ledger = Ledger::new(store.load_entries()?);
    let entry = ledger.edit(&args.id, &args.entry.to_draft())?;
    let line = format!("Updated {}: {}", entry.id, describe_entry(entry));
    store.save_entries(ledger.entries())?;

    writeln!(writer, "{line}")?;
    Ok(())
}
