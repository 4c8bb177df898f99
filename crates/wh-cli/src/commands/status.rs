//! Status command for showing where the ledger lives and how big it is.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use chrono::SecondsFormat;

use wh_store::Store;

pub fn run<W: Write>(writer: &mut W, store: &Store, database_path: &Path) -> Result<()> {
    let entries = store.load_entries()?;
    let last_saved = store.last_saved_at()?;

    writeln!(writer, "Work hours status")?;
    writeln!(writer, "Database: {}", database_path.display())?;
    writeln!(writer, "Entries: {}", entries.len())?;
    match last_saved {
        Some(at) => writeln!(
            writer,
            "Last saved: {}",
            at.to_rfc3339_opts(SecondsFormat::Secs, true)
        )?,
        None => writeln!(writer, "Last saved: never")?,
    }

    if let (Some(first), Some(last)) = (
        entries.iter().map(|e| e.date).min(),
        entries.iter().map(|e| e.date).max(),
    ) {
        writeln!(writer, "Covering: {first} to {last}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;
    use wh_core::parse_import;

    #[test]
    fn test_status_for_empty_store() {
        let temp = tempfile::tempdir().unwrap();
        let db_path = temp.path().join("wh.db");
        let store = Store::open(&db_path).unwrap();

        let mut output = Vec::new();
        run(&mut output, &store, &db_path).unwrap();

        let output = String::from_utf8(output).unwrap();
        let output = output.replace(&db_path.display().to_string(), "[TEMP]/wh.db");
        assert_snapshot!(output, @r"
        Work hours status
        Database: [TEMP]/wh.db
        Entries: 0
        Last saved: never
        ");
    }

    #[test]
    fn test_status_reports_count_and_date_span() {
        let temp = tempfile::tempdir().unwrap();
        let db_path = temp.path().join("wh.db");
        let mut store = Store::open(&db_path).unwrap();
        let entries = parse_import(
            r#"[
            {"id":"1","date":"2025-03-04","startTime":"08:00","endTime":"12:00","type":"normal"},
            {"id":"2","date":"2025-01-06","startTime":"08:00","endTime":"12:00","type":"normal"}
        ]"#,
        )
        .unwrap();
        store.save_entries(&entries).unwrap();

        let mut output = Vec::new();
        run(&mut output, &store, &db_path).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Entries: 2\n"));
        assert!(output.contains("Covering: 2025-01-06 to 2025-03-04\n"));
        assert!(!output.contains("never"));
    }
}
