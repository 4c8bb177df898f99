//! `wh calendar`: Monday-first month grid with per-day classification.

use std::io::Write;

use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use clap::Args;

use wh_core::{CalendarMonth, YearMonth, month_calendar};
use wh_store::Store;

use super::util::{month_or_current, rule};

const WEEKDAY_HEADER: &str = "Mo  Tu  We  Th  Fr  Sa  Su";

#[derive(Debug, Args)]
pub struct CalendarArgs {
    /// Month to show (YYYY-MM). Defaults to the current month.
    #[arg(long)]
    pub month: Option<YearMonth>,
}

pub fn run<W: Write>(
    writer: &mut W,
    args: &CalendarArgs,
    store: &Store,
    today: NaiveDate,
) -> Result<()> {
    let month = month_or_current(args.month, today);
    let entries = store.load_entries()?;
    let calendar = month_calendar(&entries, month);

    let title = format!("Calendar {month}");
    writeln!(writer, "{title}")?;
    writeln!(writer, "{}", rule(&title))?;
    write_grid(writer, &calendar)?;

    let mut classified = calendar
        .days
        .iter()
        .filter_map(|day| day.classification.as_ref().map(|c| (day.date, c)))
        .peekable();

    writeln!(writer)?;
    if classified.peek().is_none() {
        writeln!(writer, "No entries this month.")?;
        return Ok(());
    }
    for (date, classification) in classified {
        writeln!(
            writer,
            "{}  {:<9}  {:<8}  {}",
            date.format("%d"),
            date.format("%A").to_string(),
            classification.dominant.label(),
            classification.hours
        )?;
    }
    Ok(())
}

/// Days with at least one entry are marked with `*`.
fn write_grid<W: Write>(writer: &mut W, calendar: &CalendarMonth) -> Result<()> {
    writeln!(writer, "{WEEKDAY_HEADER}")?;

    let blanks = (0..calendar.leading_blanks).map(|_| "   ".to_string());
    let cells = calendar.days.iter().map(|day| {
        let marker = if day.classification.is_some() { '*' } else { ' ' };
        format!("{:>2}{marker}", day.date.day())
    });
    let cells: Vec<String> = blanks.chain(cells).collect();

    for week in cells.chunks(7) {
        writeln!(writer, "{}", week.join(" ").trim_end())?;
    }
    Ok(())
}
