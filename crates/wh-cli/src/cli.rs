//! Command-line argument definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::commands::add::EditArgs;
use crate::commands::calendar::CalendarArgs;
use crate::commands::export::ExportArgs;
use crate::commands::import::ImportArgs;
use crate::commands::list::ListArgs;
use crate::commands::report::ReportArgs;
use crate::commands::summary::{StatsArgs, SummaryArgs};
use crate::commands::util::EntryArgs;

/// Personal work-hours ledger.
///
/// Records shifts, overnight shifts, and leave days, and reports hours per
/// day, week, month, or date range.
#[derive(Debug, Parser)]
#[command(name = "wh", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Record a new entry.
    Add(EntryArgs),

    /// Replace every field of an existing entry.
    Edit(EditArgs),

    /// Delete one entry by id.
    Delete {
        /// ID of the entry to delete.
        id: String,
    },

    /// Delete every entry starting or ending on a day.
    DeleteDay {
        /// The day (YYYY-MM-DD).
        date: NaiveDate,
    },

    /// Delete all entries.
    Clear {
        /// Confirm deleting everything.
        #[arg(long)]
        yes: bool,
    },

    /// List a month's entries, newest first.
    List(ListArgs),

    /// Show the entries starting on a day.
    Day {
        /// The day (YYYY-MM-DD).
        date: NaiveDate,
    },

    /// Show a month as a calendar grid.
    Calendar(CalendarArgs),

    /// Show hour totals for a month, day, or date range.
    Summary(SummaryArgs),

    /// Show monthly statistics and hours per week.
    Stats(StatsArgs),

    /// Import entries from a JSON export file.
    Import(ImportArgs),

    /// Export all entries as JSON.
    Export(ExportArgs),

    /// Print a report for a date range, grouped by month.
    Report(ReportArgs),

    /// Show database location and entry count.
    Status,
}
