//! Report command for printable date-range reports.
//!
//! This module implements `wh report --from --to`, listing every entry in the
//! range grouped by month, with an optional summary block. Output is plain
//! text or JSON for an external renderer.

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;

use wh_core::{PeriodSummary, Report, ReportRow, build_report, format_hours};
use wh_store::Store;

use super::util::rule;

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// First day of the report (inclusive).
    #[arg(long)]
    pub from: NaiveDate,

    /// Last day of the report (inclusive).
    #[arg(long)]
    pub to: NaiveDate,

    /// Append the period summary.
    #[arg(long)]
    pub summary: bool,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

pub fn run<W: Write>(writer: &mut W, args: &ReportArgs, store: &Store) -> Result<()> {
    let entries = store.load_entries()?;
    let report = build_report(&entries, args.from, args.to, args.summary)?;
    tracing::debug!(rows = report.row_count(), "built report");

    if args.json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        write_report(writer, &report)?;
    }
    Ok(())
}

// ========== Text Output ==========

fn write_report<W: Write>(writer: &mut W, report: &Report) -> Result<()> {
    let title = format!("WORK HOURS REPORT: {} to {}", report.start, report.end);
    writeln!(writer, "{title}")?;
    writeln!(writer, "{}", rule(&title))?;

    if report.months.is_empty() {
        writeln!(writer)?;
        writeln!(writer, "No entries in this range.")?;
    }

    for group in &report.months {
        writeln!(writer)?;
        writeln!(writer, "{}", group.month.first_day().format("%B %Y"))?;
        for row in &group.rows {
            write_row(writer, row)?;
        }
    }

    if let Some(summary) = &report.summary {
        writeln!(writer)?;
        write_summary(writer, summary)?;
    }
    Ok(())
}

fn write_row<W: Write>(writer: &mut W, row: &ReportRow) -> Result<()> {
    let dates = row.end_date.map_or_else(
        || row.date.to_string(),
        |end| format!("{} to {end}", row.date),
    );
    let hours = row
        .hours
        .map(|h| format!("{}h", format_hours(h)))
        .unwrap_or_default();
    writeln!(
        writer,
        "  {dates:<24}  {:<13}  {hours:>6}  {}",
        row.time_range.as_deref().unwrap_or_default(),
        row.type_label
    )?;
    if let Some(notes) = &row.notes {
        writeln!(writer, "      {notes}")?;
    }
    Ok(())
}

fn write_summary<W: Write>(writer: &mut W, summary: &PeriodSummary) -> Result<()> {
    writeln!(writer, "SUMMARY")?;
    writeln!(writer, "{}", rule("SUMMARY"))?;
    writeln!(writer, "Normal hours:    {}h", format_hours(summary.normal_hours))?;
    writeln!(writer, "Overtime hours:  {}h", format_hours(summary.overtime_hours))?;
    writeln!(writer, "Total hours:     {}h", format_hours(summary.total_hours))?;
    writeln!(writer, "Days worked:     {}", summary.days_worked)?;
    Ok(())
}
