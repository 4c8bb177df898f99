//! `wh list` and `wh day`: entry listings for a month or a single day.

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;

use wh_core::{Period, TimeEntry, YearMonth, classify_group, entries_in_period, entries_starting_on};
use wh_store::Store;

use super::util::{describe_entry, month_or_current, rule};

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Month to list (YYYY-MM). Defaults to the current month.
    #[arg(long)]
    pub month: Option<YearMonth>,

    /// Output the entries as a JSON array.
    #[arg(long)]
    pub json: bool,
}

/// Lists entries starting or ending in the month, newest first.
pub fn run<W: Write>(writer: &mut W, args: &ListArgs, store: &Store, today: NaiveDate) -> Result<()> {
    let month = month_or_current(args.month, today);
    let entries = store.load_entries()?;
    let selected = entries_in_period(&entries, &Period::Month(month));

    if args.json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&selected)?)?;
        return Ok(());
    }

    if selected.is_empty() {
        writeln!(writer, "No entries for {month}.")?;
        return Ok(());
    }

    let title = format!("Entries for {month} ({})", selected.len());
    writeln!(writer, "{title}")?;
    writeln!(writer, "{}", rule(&title))?;
    for entry in selected {
        write_entry(writer, entry)?;
    }
    Ok(())
}

/// Shows the entries starting on `day` and the day's classification.
pub fn day<W: Write>(writer: &mut W, date: NaiveDate, store: &Store) -> Result<()> {
    let entries = store.load_entries()?;
    let group = entries_starting_on(&entries, date);

    if group.is_empty() {
        writeln!(writer, "No entries on {date}.")?;
        return Ok(());
    }

    let classification = classify_group(group.iter().copied());
    let title = format!(
        "{}  {}  {}",
        date.format("%A %Y-%m-%d"),
        classification.dominant.label(),
        classification.hours
    );
    writeln!(writer, "{title}")?;
    writeln!(writer, "{}", rule(&title))?;
    for entry in group {
        write_entry(writer, entry)?;
    }
    Ok(())
}

fn write_entry<W: Write>(writer: &mut W, entry: &TimeEntry) -> Result<()> {
    writeln!(writer, "{}  {}", entry.id, describe_entry(entry))?;
    if let Some(notes) = entry.notes.as_deref().filter(|n| !n.trim().is_empty()) {
        writeln!(writer, "    {notes}")?;
    }
    Ok(())
}
