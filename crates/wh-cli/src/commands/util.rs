//! Shared utilities for CLI commands.

use std::fmt::Write as _;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, ValueEnum};

use wh_core::{ClockTime, EntryDraft, EntrySpan, EntryType, TimeEntry, YearMonth, format_hours};
use wh_store::Store;

use crate::Config;

/// Opens the store named by the configuration, creating its directory.
pub fn open_store(config: &Config) -> Result<Store> {
    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }
    Store::open(&config.database_path)
        .with_context(|| format!("failed to open {}", config.database_path.display()))
}

/// The month to show when `--month` is not given.
pub fn month_or_current(month: Option<YearMonth>, today: NaiveDate) -> YearMonth {
    month.unwrap_or_else(|| YearMonth::of(today))
}

/// Entry types accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum KindArg {
    #[default]
    Normal,
    Overtime,
    Night,
    Weekend,
    Leave,
}

impl From<KindArg> for EntryType {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Normal => Self::Normal,
            KindArg::Overtime => Self::Overtime,
            KindArg::Night => Self::Night,
            KindArg::Weekend => Self::Weekend,
            KindArg::Leave => Self::Leave,
        }
    }
}

/// Fields of a new or edited entry.
#[derive(Debug, Clone, Args)]
pub struct EntryArgs {
    /// Start date (YYYY-MM-DD).
    #[arg(long)]
    pub date: NaiveDate,

    /// Start time (HH:MM). Not needed for leave.
    #[arg(long)]
    pub start: Option<ClockTime>,

    /// End time (HH:MM). Not needed for leave.
    #[arg(long)]
    pub end: Option<ClockTime>,

    /// End date for a shift that runs past midnight.
    #[arg(long)]
    pub end_date: Option<NaiveDate>,

    /// Entry type.
    #[arg(long = "type", value_enum, default_value_t = KindArg::Normal)]
    pub kind: KindArg,

    /// Free-text notes.
    #[arg(long)]
    pub notes: Option<String>,
}

impl EntryArgs {
    pub fn to_draft(&self) -> EntryDraft {
        EntryDraft {
            date: Some(self.date),
            start_time: self.start,
            end_time: self.end,
            spans_two_days: self.end_date.is_some(),
            end_date: self.end_date,
            kind: self.kind.into(),
            notes: self.notes.clone(),
        }
    }
}

/// One-line description of an entry: dates, times, hours, and type label.
pub fn describe_entry(entry: &TimeEntry) -> String {
    let mut line = entry.date.to_string();
    if let Some(end_date) = entry.end_date.filter(|_| entry.spans_midnight()) {
        let _ = write!(line, " to {end_date}");
    }
    if entry.kind.is_leave() {
        line.push_str("  Leave");
    } else {
        let _ = write!(
            line,
            "  {} - {}  {}h  {}",
            entry.start_time,
            entry.end_time,
            format_hours(entry.hours()),
            entry.kind.label()
        );
    }
    line
}

/// Underline matching the width of `title`.
pub fn rule(title: &str) -> String {
    "─".repeat(title.chars().count())
}
