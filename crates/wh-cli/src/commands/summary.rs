//! `wh summary` and `wh stats`: hour totals and derived statistics.

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use serde::Serialize;

use wh_core::{
    Period, PeriodStatistics, PeriodSummary, WeekHours, YearMonth, format_hours,
    period_statistics, period_summary, weekly_series,
};
use wh_store::Store;

use super::util::{month_or_current, rule};

#[derive(Debug, Args)]
pub struct SummaryArgs {
    /// Month to summarize (YYYY-MM). Defaults to the current month.
    #[arg(long, conflicts_with_all = ["day", "from", "to"])]
    pub month: Option<YearMonth>,

    /// Summarize a single day instead.
    #[arg(long, conflicts_with_all = ["from", "to"])]
    pub day: Option<NaiveDate>,

    /// Start of an inclusive date range.
    #[arg(long, requires = "to")]
    pub from: Option<NaiveDate>,

    /// End of an inclusive date range.
    #[arg(long, requires = "from")]
    pub to: Option<NaiveDate>,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

impl SummaryArgs {
    fn period(&self, today: NaiveDate) -> Result<Period> {
        if let (Some(from), Some(to)) = (self.from, self.to) {
            return Ok(Period::range(from, to)?);
        }
        if let Some(day) = self.day {
            return Ok(Period::Day(day));
        }
        Ok(Period::Month(month_or_current(self.month, today)))
    }
}

#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Month to analyse (YYYY-MM). Defaults to the current month.
    #[arg(long)]
    pub month: Option<YearMonth>,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct JsonSummary {
    period: String,
    #[serde(flatten)]
    summary: PeriodSummary,
}

#[derive(Debug, Serialize)]
struct JsonStats {
    month: YearMonth,
    #[serde(flatten)]
    statistics: PeriodStatistics,
    weeks: Vec<WeekHours>,
}

pub fn run<W: Write>(
    writer: &mut W,
    args: &SummaryArgs,
    store: &Store,
    today: NaiveDate,
) -> Result<()> {
    let period = args.period(today)?;
    let entries = store.load_entries()?;
    let summary = period_summary(&entries, &period);

    if args.json {
        let json = JsonSummary {
            period: period.to_string(),
            summary,
        };
        writeln!(writer, "{}", serde_json::to_string_pretty(&json)?)?;
        return Ok(());
    }

    let title = format!("Summary for {period}");
    writeln!(writer, "{title}")?;
    writeln!(writer, "{}", rule(&title))?;
    writeln!(writer, "Normal hours:    {}h", format_hours(summary.normal_hours))?;
    writeln!(writer, "Overtime hours:  {}h", format_hours(summary.overtime_hours))?;
    writeln!(writer, "Total hours:     {}h", format_hours(summary.total_hours))?;
    writeln!(writer, "Days worked:     {}", summary.days_worked)?;
    Ok(())
}

pub fn stats<W: Write>(
    writer: &mut W,
    args: &StatsArgs,
    store: &Store,
    today: NaiveDate,
) -> Result<()> {
    let month = month_or_current(args.month, today);
    let entries = store.load_entries()?;
    let statistics = period_statistics(&entries, &Period::Month(month));
    let weeks = weekly_series(&entries, month);

    if args.json {
        let json = JsonStats {
            month,
            statistics,
            weeks,
        };
        writeln!(writer, "{}", serde_json::to_string_pretty(&json)?)?;
        return Ok(());
    }

    let title = format!("Statistics for {month}");
    writeln!(writer, "{title}")?;
    writeln!(writer, "{}", rule(&title))?;
    writeln!(writer, "Days worked:      {}", statistics.days_worked)?;
    writeln!(
        writer,
        "Average per day:  {}h",
        format_hours(statistics.average_hours_per_day)
    )?;
    writeln!(writer, "Overtime share:   {}%", statistics.overtime_percent)?;

    writeln!(writer)?;
    writeln!(writer, "HOURS BY WEEK")?;
    writeln!(writer, "{}", rule("HOURS BY WEEK"))?;
    if weeks.is_empty() {
        writeln!(writer, "(no hours recorded)")?;
    }
    for week in &weeks {
        writeln!(writer, "Week {:<3} {:>6}h", week.week, format_hours(week.hours))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;
    use wh_core::{ImportMode, Ledger};

    fn seeded_store() -> Store {
        let mut store = Store::open_in_memory().unwrap();
        let mut ledger = Ledger::default();
        ledger
            .import(
                r#"[
                {"id":"1","date":"2025-01-06","startTime":"08:00","endTime":"16:00","type":"normal"},
                {"id":"2","date":"2025-01-07","startTime":"08:00","endTime":"18:00","type":"overtime"},
                {"id":"3","date":"2025-01-08","startTime":"20:00","endTime":"05:00","endDate":"2025-01-09","type":"night"},
                {"id":"4","date":"2025-01-11","startTime":"09:00","endTime":"12:00","type":"weekend"},
                {"id":"5","date":"2025-01-13","startTime":"00:00","endTime":"00:00","type":"leave"},
                {"id":"6","date":"2025-01-20","startTime":"08:00","endTime":"12:00","type":"normal"}
            ]"#,
                ImportMode::Replace,
            )
            .unwrap();
        store.save_entries(ledger.entries()).unwrap();
        store
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 25).unwrap()
    }

    fn summary_args() -> SummaryArgs {
        SummaryArgs {
            month: None,
            day: None,
            from: None,
            to: None,
            json: false,
        }
    }

    #[test]
    fn test_summary_for_current_month() {
        let store = seeded_store();
        let mut output = Vec::new();
        run(&mut output, &summary_args(), &store, today()).unwrap();

        assert_snapshot!(String::from_utf8(output).unwrap(), @r"
        Summary for 2025-01
        ───────────────────
        Normal hours:    12.0h
        Overtime hours:  22.0h
        Total hours:     34.0h
        Days worked:     6
        ");
    }

    #[test]
    fn test_summary_for_range_and_day() {
        let store = seeded_store();
        let mut output = Vec::new();
        let args = SummaryArgs {
            from: NaiveDate::from_ymd_opt(2025, 1, 9),
            to: NaiveDate::from_ymd_opt(2025, 1, 12),
            ..summary_args()
        };
        run(&mut output, &args, &store, today()).unwrap();
        assert_snapshot!(String::from_utf8(output).unwrap(), @r"
        Summary for 2025-01-09 to 2025-01-12
        ────────────────────────────────────
        Normal hours:    0.0h
        Overtime hours:  12.0h
        Total hours:     12.0h
        Days worked:     3
        ");

        let mut output = Vec::new();
        let args = SummaryArgs {
            day: NaiveDate::from_ymd_opt(2025, 1, 13),
            json: true,
            ..summary_args()
        };
        run(&mut output, &args, &store, today()).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(parsed["period"], "2025-01-13");
        assert_eq!(parsed["total_hours"], 0.0);
        assert_eq!(parsed["days_worked"], 0);
    }

    #[test]
    fn test_summary_rejects_reversed_range() {
        let store = seeded_store();
        let args = SummaryArgs {
            from: NaiveDate::from_ymd_opt(2025, 1, 12),
            to: NaiveDate::from_ymd_opt(2025, 1, 9),
            ..summary_args()
        };
        let err = run(&mut Vec::new(), &args, &store, today()).unwrap_err();
        assert!(err.to_string().contains("before range start"));
    }

    #[test]
    fn test_stats_with_weekly_series() {
        let store = seeded_store();
        let mut output = Vec::new();
        let args = StatsArgs {
            month: None,
            json: false,
        };
        stats(&mut output, &args, &store, today()).unwrap();

        assert_snapshot!(String::from_utf8(output).unwrap(), @r"
        Statistics for 2025-01
        ──────────────────────
        Days worked:      6
        Average per day:  5.7h
        Overtime share:   65%

        HOURS BY WEEK
        ─────────────
        Week 2     30.0h
        Week 4      4.0h
        ");
    }

    #[test]
    fn test_stats_json_for_empty_month() {
        let store = seeded_store();
        let mut output = Vec::new();
        let args = StatsArgs {
            month: Some(YearMonth::new(2025, 3).unwrap()),
            json: true,
        };
        stats(&mut output, &args, &store, today()).unwrap();

        assert_snapshot!(String::from_utf8(output).unwrap(), @r#"
        {
          "month": "2025-03",
          "days_worked": 0,
          "average_hours_per_day": 0.0,
          "overtime_percent": 0,
          "weeks": []
        }
        "#);
    }
}
