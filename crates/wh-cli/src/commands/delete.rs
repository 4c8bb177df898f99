//! Removal commands: one entry, one day, or everything.

use std::io::Write;

use anyhow::{Result, bail};
use chrono::NaiveDate;

use wh_core::Ledger;
use wh_store::Store;

use super::util::describe_entry;

/// Removes the entry with `id`.
pub fn run<W: Write>(writer: &mut W, id: &str, store: &mut Store) -> Result<()> {
    let mut ledger = Ledger::new(store.load_entries()?);
    let removed = ledger.remove(id)?;
    store.save_entries(ledger.entries())?;

    writeln!(writer, "Deleted {}: {}", removed.id, describe_entry(&removed))?;
    Ok(())
}

/// Removes every entry starting or ending on `day`.
pub fn remove_day<W: Write>(writer: &mut W, day: NaiveDate, store: &mut Store) -> Result<()> {
    let mut ledger = Ledger::new(store.load_entries()?);
    let removed = ledger.remove_day(day);
    if removed == 0 {
        writeln!(writer, "No entries on {day}.")?;
        return Ok(());
    }
    store.save_entries(ledger.entries())?;

    writeln!(writer, "Deleted {removed} entries on {day}.")?;
    Ok(())
}

/// Removes every entry. Refuses unless `confirmed`.
pub fn clear<W: Write>(writer: &mut W, confirmed: bool, store: &mut Store) -> Result<()> {
    let mut ledger = Ledger::new(store.load_entries()?);
    if !confirmed {
        bail!(
            "refusing to delete all {} entries without --yes",
            ledger.len()
        );
    }
    let removed = ledger.clear();
    store.save_entries(ledger.entries())?;

    tracing::info!(removed, "cleared all entries");
    writeln!(writer, "Deleted all {removed} entries.")?;
    Ok(())
}
